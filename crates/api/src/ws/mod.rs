//! WebSocket infrastructure for pushing draw notifications.
//!
//! Provides connection management, heartbeat pings and the HTTP upgrade
//! handler mounted at `/api/draws/ws`.

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::ws_handler;
pub use heartbeat::{start_heartbeat, HEARTBEAT_INTERVAL};
pub use manager::WsManager;
