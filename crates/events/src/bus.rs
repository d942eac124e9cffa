//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`DrawEvent`]s. It is
//! designed to be shared via `Arc<EventBus>` across the application.

use lucky_six_core::draw::Draw;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// DrawEvent
// ---------------------------------------------------------------------------

/// Something that happened to the draw stream.
///
/// Serializes with a `type` tag so the JSON can be pushed to clients as is:
/// `{"type":"draw.inserted","draw":{...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DrawEvent {
    /// A new draw was persisted.
    #[serde(rename = "draw.inserted")]
    Inserted { draw: Draw },
}

impl DrawEvent {
    /// Dot-separated event name, matching the serialized `type` tag.
    pub fn event_type(&self) -> &'static str {
        match self {
            DrawEvent::Inserted { .. } => "draw.inserted",
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`DrawEvent`].
pub struct EventBus {
    sender: broadcast::Sender<DrawEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is dropped.
    pub fn publish(&self, event: DrawEvent) {
        let event_type = event.event_type();
        match self.sender.send(event) {
            Ok(receivers) => tracing::trace!(event_type, receivers, "Event published"),
            // SendError only means there are zero receivers.
            Err(_) => tracing::debug!(event_type, "No subscribers, event dropped"),
        }
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<DrawEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
