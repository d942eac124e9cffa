//! The display loop.
//!
//! Ties together the board client, the notification subscription, the
//! one-second countdown tick and screen redraws.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};

use crate::client::BoardClient;
use crate::error::DisplayError;
use crate::render;
use crate::state::{DisplayState, FetchOutcome};
use crate::subscribe;

/// Wait between a new-draw notification and the refetch, so the server has
/// finished writing before the board is read.
pub const REFETCH_DELAY: Duration = Duration::from_millis(500);

/// Countdown resolution.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Shared handle to the board state and the client that fills it.
#[derive(Clone)]
pub struct Display {
    client: BoardClient,
    state: Arc<Mutex<DisplayState>>,
}

impl Display {
    pub fn new(client: BoardClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(DisplayState::new())),
        }
    }

    pub fn state(&self) -> &Arc<Mutex<DisplayState>> {
        &self.state
    }

    /// Fetch the board. Returns `None` when a fetch is already running; that
    /// fetch then runs once more after it finishes, so the request is not lost.
    pub async fn refresh(&self) -> Option<FetchOutcome> {
        let Some(mut ticket) = self.state.lock().await.begin_fetch() else {
            tracing::debug!("Fetch already in flight, queued a refetch");
            return None;
        };

        loop {
            let result = self.client.fetch_board().await;
            if let Err(e) = &result {
                tracing::warn!(error = %e, "Board fetch failed");
            }

            let mut state = self.state.lock().await;
            let outcome = state.finish_fetch(ticket, result);
            if outcome == FetchOutcome::Stale {
                tracing::debug!(seq = ticket.seq(), "Dropped stale board response");
            }
            if !state.refetch_pending() {
                return Some(outcome);
            }
            match state.begin_fetch() {
                Some(next) => {
                    tracing::debug!(seq = next.seq(), "Refetching for a request made mid-fetch");
                    ticket = next;
                }
                None => return Some(outcome),
            }
        }
    }

    /// Advance the countdown by one second.
    pub async fn tick(&self) {
        self.state.lock().await.tick();
    }

    pub async fn render(&self) -> String {
        render::render(&*self.state.lock().await)
    }

    /// Run until Ctrl-C.
    pub async fn run(self) -> Result<(), DisplayError> {
        let ws_url = self.client.notifications_url()?;

        self.refresh().await;
        self.redraw().await;

        let (notify_tx, mut notify_rx) = mpsc::unbounded_channel();
        let subscription = tokio::spawn(async move {
            subscribe::run(&ws_url, notify_tx, subscribe::RECONNECT_DELAY).await;
        });

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        let mut ticker = tokio::time::interval(TICK_INTERVAL);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick().await;
                    self.redraw().await;
                }
                Some(()) = notify_rx.recv() => {
                    let display = self.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(REFETCH_DELAY).await;
                        display.refresh().await;
                        display.redraw().await;
                    });
                }
                _ = &mut ctrl_c => {
                    tracing::info!("Received Ctrl-C, exiting");
                    break;
                }
            }
        }

        subscription.abort();
        Ok(())
    }

    async fn redraw(&self) {
        let screen = self.render().await;
        // Clear the terminal and move the cursor home.
        print!("\x1B[2J\x1B[H{screen}");
        let _ = std::io::stdout().flush();
    }
}
