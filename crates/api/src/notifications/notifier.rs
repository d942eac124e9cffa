use std::sync::Arc;

use axum::extract::ws::Message;
use lucky_six_events::DrawEvent;
use tokio::sync::broadcast;

use crate::ws::WsManager;

/// Pushes every [`DrawEvent`] to all connected display clients.
///
/// The frame is the event's JSON, e.g.
/// `{"type":"draw.inserted","draw":{...}}`. Clients use it only as a cue
/// to refetch the board.
pub struct DrawNotifier {
    ws_manager: Arc<WsManager>,
}

impl DrawNotifier {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run until the event bus is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<DrawEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.deliver(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Draw notifier lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, draw notifier shutting down");
                    break;
                }
            }
        }
    }

    /// Serialize one event and broadcast it.
    pub async fn deliver(&self, event: &DrawEvent) {
        let text = match serde_json::to_string(event) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, event_type = event.event_type(), "Failed to serialize event");
                return;
            }
        };

        let delivered = self.ws_manager.broadcast(Message::Text(text.into())).await;
        tracing::debug!(event_type = event.event_type(), delivered, "Draw event pushed");
    }
}
