//! Lucky Six event bus.
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`DrawEvent`] — what happened to the draw stream.

pub mod bus;

pub use bus::{DrawEvent, EventBus};
