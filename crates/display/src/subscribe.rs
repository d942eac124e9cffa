//! WebSocket subscription to draw notifications.
//!
//! Every `draw.inserted` frame becomes one unit sent on the notification
//! channel. The payload itself is ignored; the display refetches the whole
//! board instead. Dropped connections are retried after a fixed delay.

use std::time::Duration;

use futures::StreamExt;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

/// Delay before reconnecting after a failure or a closed session.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(5);

const DRAW_INSERTED: &str = "draw.inserted";

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
}

/// Whether a text frame announces a new draw.
pub fn is_draw_inserted(text: &str) -> bool {
    serde_json::from_str::<Envelope>(text).is_ok_and(|e| e.kind == DRAW_INSERTED)
}

/// Subscribe until `notify` has no receiver left.
pub async fn run(ws_url: &str, notify: mpsc::UnboundedSender<()>, reconnect_delay: Duration) {
    loop {
        tracing::info!(url = %ws_url, "Connecting to draw notifications");

        match connect_async(ws_url).await {
            Ok((ws_stream, _response)) => {
                tracing::info!("Draw notifications connected");
                if !run_session(ws_stream, &notify).await {
                    return;
                }
                tracing::warn!("Draw notification session ended, reconnecting");
            }
            Err(e) => {
                tracing::error!(error = %e, "Draw notification connection failed");
            }
        }

        if notify.is_closed() {
            return;
        }
        tokio::time::sleep(reconnect_delay).await;
    }
}

/// Forward notifications from one session. Returns `false` once nobody is
/// listening any more.
async fn run_session(
    ws_stream: tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >,
    notify: &mpsc::UnboundedSender<()>,
) -> bool {
    let (_sink, mut stream) = ws_stream.split();

    while let Some(msg) = stream.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                if is_draw_inserted(&text) {
                    tracing::debug!("New draw announced");
                    if notify.send(()).is_err() {
                        return false;
                    }
                } else {
                    tracing::warn!(raw = %text, "Unknown notification frame");
                }
            }
            Ok(Message::Close(frame)) => {
                tracing::info!(?frame, "Server closed draw notifications");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!(error = %e, "Draw notification receive error");
                break;
            }
        }
    }

    true
}
