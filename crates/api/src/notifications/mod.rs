//! Fan-out of draw events to WebSocket clients.

mod notifier;

pub use notifier::DrawNotifier;
