//! Behaviour of the in-memory [`DrawStore`], which the API integration tests
//! rely on standing in for PostgreSQL.

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use lucky_six_core::draw::{BallColor, Draw};
use lucky_six_core::schedule::ScheduleStatus;
use lucky_six_core::types::Timestamp;
use lucky_six_db::{DrawStore, MemoryDrawStore, StoreError};

fn draw(id: &str, created_at: Timestamp) -> Draw {
    Draw::from_parts(
        id.to_string(),
        [10, 20, 30, 40, 50, 60],
        [BallColor::Blue; 6],
        created_at,
    )
}

// ---------------------------------------------------------------------------
// Test: empty store has no schedule and no draws
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_store_has_nothing() {
    let store = MemoryDrawStore::new();

    assert!(store.latest_schedule().await.unwrap().is_none());
    assert!(store.recent_draws(20).await.unwrap().is_empty());
    store.ping().await.unwrap();
}

// ---------------------------------------------------------------------------
// Test: recent_draws is newest-first and honours the limit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn recent_draws_newest_first_with_limit() {
    let store = MemoryDrawStore::new();
    let base = Utc::now();

    for i in 0..25 {
        store
            .insert_draw(&draw(&format!("draw_{i}"), base + Duration::seconds(i)))
            .await
            .unwrap();
    }

    let recent = store.recent_draws(20).await.unwrap();
    assert_eq!(recent.len(), 20);
    assert_eq!(recent[0].id, "draw_24");
    assert_eq!(recent[19].id, "draw_5");
}

// ---------------------------------------------------------------------------
// Test: draws sharing a timestamp come back latest insert first
// ---------------------------------------------------------------------------

#[tokio::test]
async fn recent_draws_break_timestamp_ties_by_insert_order() {
    let store = MemoryDrawStore::new();
    let at = Utc::now();

    store.insert_draw(&draw("draw_first", at)).await.unwrap();
    store.insert_draw(&draw("draw_second", at)).await.unwrap();
    store.insert_draw(&draw("draw_third", at)).await.unwrap();

    let ids: Vec<String> = store
        .recent_draws(20)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(ids, ["draw_third", "draw_second", "draw_first"]);
}

// ---------------------------------------------------------------------------
// Test: a due slot is claimed once, together with its draw
// ---------------------------------------------------------------------------

#[tokio::test]
async fn scheduled_draw_claims_due_slot_once() {
    let store = MemoryDrawStore::new();
    let now = Utc::now();

    let created = store
        .create_schedule(now, 180, ScheduleStatus::Active)
        .await
        .unwrap();
    assert_eq!(created.draw_interval, "00:03:00");
    assert_eq!(created.interval_secs(), 180);

    let later = now + Duration::seconds(180);
    let advanced = store
        .insert_scheduled_draw(&draw("draw_1", now), created.id, now, later)
        .await
        .unwrap()
        .expect("slot is due");
    assert_eq!(advanced.next_draw_time, later);
    assert_eq!(store.latest_schedule().await.unwrap().unwrap(), advanced);

    // Same slot again: already moved on, nothing stored.
    let again = store
        .insert_scheduled_draw(&draw("draw_2", now), created.id, now, later)
        .await
        .unwrap();
    assert!(again.is_none());

    let recent = store.recent_draws(20).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, "draw_1");
}

// ---------------------------------------------------------------------------
// Test: a slot that is not due stores nothing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn scheduled_draw_before_due_time_is_skipped() {
    let store = MemoryDrawStore::new();
    let now = Utc::now();
    let created = store
        .create_schedule(now + Duration::seconds(60), 180, ScheduleStatus::Active)
        .await
        .unwrap();

    let result = store
        .insert_scheduled_draw(&draw("draw_1", now), created.id, now, now + Duration::seconds(180))
        .await
        .unwrap();

    assert!(result.is_none());
    assert!(store.recent_draws(20).await.unwrap().is_empty());
    assert_eq!(
        store.latest_schedule().await.unwrap().unwrap().next_draw_time,
        now + Duration::seconds(60)
    );
}

// ---------------------------------------------------------------------------
// Test: claiming an unknown schedule fails and stores nothing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn scheduled_draw_for_unknown_schedule_fails() {
    let store = MemoryDrawStore::new();
    let now = Utc::now();

    let result = store
        .insert_scheduled_draw(&draw("draw_1", now), 99, now, now)
        .await;

    assert_matches!(result, Err(StoreError::ScheduleNotFound(99)));
    assert!(store.recent_draws(20).await.unwrap().is_empty());
}
