//! One draw, end to end.
//!
//! Shared by the scheduler and the on-demand endpoint so both paths
//! generate, persist and announce a draw the same way.

use lucky_six_core::draw::Draw;
use lucky_six_core::generator::DrawGenerator;
use lucky_six_db::{DrawStore, StoreError};
use lucky_six_events::{DrawEvent, EventBus};

/// Generate a draw, insert it, then publish [`DrawEvent::Inserted`].
///
/// Nothing is published when the insert fails.
pub async fn run_draw(
    store: &dyn DrawStore,
    generator: &DrawGenerator,
    event_bus: &EventBus,
) -> Result<Draw, StoreError> {
    let draw = generator.generate().await;
    store.insert_draw(&draw).await?;
    announce(event_bus, &draw);
    Ok(draw)
}

/// Log a persisted draw and publish [`DrawEvent::Inserted`] for it.
pub fn announce(event_bus: &EventBus, draw: &Draw) {
    tracing::info!(
        draw_id = %draw.id,
        numbers = ?draw.numbers,
        sum = draw.sum,
        high_low = %draw.high_low,
        "Draw inserted",
    );

    event_bus.publish(DrawEvent::Inserted { draw: draw.clone() });
}
