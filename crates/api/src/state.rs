use std::sync::Arc;

use lucky_six_core::generator::DrawGenerator;
use lucky_six_db::DrawStore;
use lucky_six_events::EventBus;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Draw and schedule persistence.
    pub store: Arc<dyn DrawStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (display clients).
    pub ws_manager: Arc<WsManager>,
    /// Publishes draw events to the notifier.
    pub event_bus: Arc<EventBus>,
    /// Produces new draws.
    pub generator: Arc<DrawGenerator>,
}
