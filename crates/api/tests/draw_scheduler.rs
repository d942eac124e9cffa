//! Tests for the background draw scheduler, one tick at a time.

mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use lucky_six_api::background::draw_scheduler::{DrawScheduler, TickOutcome};
use lucky_six_core::draw::Draw;
use lucky_six_core::generator::DrawGenerator;
use lucky_six_core::schedule::{DrawSchedule, ScheduleStatus};
use lucky_six_core::types::{DbId, Timestamp};
use lucky_six_db::{DrawStore, MemoryDrawStore, StoreError};
use lucky_six_events::{DrawEvent, EventBus};
use tokio_util::sync::CancellationToken;

fn scheduler(store: Arc<MemoryDrawStore>, bus: Arc<EventBus>) -> DrawScheduler {
    DrawScheduler::new(store, Arc::new(DrawGenerator::random_only()), bus, 180)
}

// ---------------------------------------------------------------------------
// Test: first tick creates an active schedule one interval ahead
// ---------------------------------------------------------------------------

#[tokio::test]
async fn first_tick_creates_schedule() {
    let store = Arc::new(MemoryDrawStore::new());
    let scheduler = scheduler(store.clone(), Arc::new(EventBus::default()));
    let now = Utc::now();

    let outcome = scheduler.tick(now).await.unwrap();

    let schedule = assert_matches!(outcome, TickOutcome::ScheduleCreated(s) => s);
    assert_eq!(schedule.status, ScheduleStatus::Active);
    assert_eq!(schedule.next_draw_time, now + Duration::seconds(180));
    assert_eq!(schedule.interval_secs(), 180);
    assert!(store.recent_draws(20).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test: ticks before the due time only wait
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tick_before_due_time_waits() {
    let store = Arc::new(MemoryDrawStore::new());
    let scheduler = scheduler(store.clone(), Arc::new(EventBus::default()));
    let now = Utc::now();
    scheduler.tick(now).await.unwrap();

    let outcome = scheduler.tick(now + Duration::seconds(60)).await.unwrap();

    assert_eq!(outcome, TickOutcome::Waiting { seconds_left: 120 });
    assert!(store.recent_draws(20).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test: a due tick draws, publishes and advances the schedule
// ---------------------------------------------------------------------------

#[tokio::test]
async fn due_tick_draws_and_advances() {
    let store = Arc::new(MemoryDrawStore::new());
    let bus = Arc::new(EventBus::default());
    let mut events = bus.subscribe();
    let scheduler = scheduler(store.clone(), bus);
    let now = Utc::now();
    scheduler.tick(now).await.unwrap();

    let due = now + Duration::seconds(185);
    let outcome = scheduler.tick(due).await.unwrap();

    let (draw, next) = assert_matches!(
        outcome,
        TickOutcome::Drew { draw, next_draw_time } => (draw, next_draw_time)
    );
    assert_eq!(next, due + Duration::seconds(180));

    let stored = store.recent_draws(20).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, draw.id);

    let DrawEvent::Inserted { draw: published } = events.recv().await.unwrap();
    assert_eq!(published.id, draw.id);

    let schedule = store.latest_schedule().await.unwrap().unwrap();
    assert_eq!(schedule.next_draw_time, next);
}

// ---------------------------------------------------------------------------
// Test: an existing schedule keeps its own interval
// ---------------------------------------------------------------------------

#[tokio::test]
async fn existing_interval_wins_over_default() {
    let store = Arc::new(MemoryDrawStore::new());
    let now = Utc::now();
    store
        .create_schedule(now - Duration::seconds(1), 60, ScheduleStatus::Active)
        .await
        .unwrap();
    let scheduler = scheduler(store.clone(), Arc::new(EventBus::default()));

    let outcome = scheduler.tick(now).await.unwrap();

    assert_matches!(outcome, TickOutcome::Drew { next_draw_time, .. } if next_draw_time == now + Duration::seconds(60));
}

// ---------------------------------------------------------------------------
// Test: paused schedules never draw
// ---------------------------------------------------------------------------

#[tokio::test]
async fn paused_schedule_does_not_draw() {
    let store = Arc::new(MemoryDrawStore::new());
    let now = Utc::now();
    store
        .create_schedule(now - Duration::seconds(30), 180, ScheduleStatus::Paused)
        .await
        .unwrap();
    let scheduler = scheduler(store.clone(), Arc::new(EventBus::default()));

    let outcome = scheduler.tick(now).await.unwrap();

    assert_eq!(outcome, TickOutcome::Inactive(ScheduleStatus::Paused));
    assert!(store.recent_draws(20).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test: store failures surface from tick
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tick_surfaces_store_errors() {
    let scheduler = DrawScheduler::new(
        Arc::new(common::FailingStore),
        Arc::new(DrawGenerator::random_only()),
        Arc::new(EventBus::default()),
        180,
    );

    assert!(scheduler.tick(Utc::now()).await.is_err());
}

// ---------------------------------------------------------------------------
// Test: a failed claim stores nothing and the next tick draws exactly once
// ---------------------------------------------------------------------------

/// In-memory store whose scheduled insert fails while `failing` is set.
struct ClaimFails {
    inner: MemoryDrawStore,
    failing: AtomicBool,
}

#[async_trait]
impl DrawStore for ClaimFails {
    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }

    async fn latest_schedule(&self) -> Result<Option<DrawSchedule>, StoreError> {
        self.inner.latest_schedule().await
    }

    async fn recent_draws(&self, limit: i64) -> Result<Vec<Draw>, StoreError> {
        self.inner.recent_draws(limit).await
    }

    async fn insert_draw(&self, draw: &Draw) -> Result<(), StoreError> {
        self.inner.insert_draw(draw).await
    }

    async fn create_schedule(
        &self,
        next_draw_time: Timestamp,
        interval_secs: i64,
        status: ScheduleStatus,
    ) -> Result<DrawSchedule, StoreError> {
        self.inner
            .create_schedule(next_draw_time, interval_secs, status)
            .await
    }

    async fn insert_scheduled_draw(
        &self,
        draw: &Draw,
        schedule_id: DbId,
        due_by: Timestamp,
        next_draw_time: Timestamp,
    ) -> Result<Option<DrawSchedule>, StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        self.inner
            .insert_scheduled_draw(draw, schedule_id, due_by, next_draw_time)
            .await
    }
}

#[tokio::test]
async fn failed_claim_is_retried_without_duplicate_draws() {
    let store = Arc::new(ClaimFails {
        inner: MemoryDrawStore::new(),
        failing: AtomicBool::new(true),
    });
    let now = Utc::now();
    store
        .create_schedule(now - Duration::seconds(1), 180, ScheduleStatus::Active)
        .await
        .unwrap();
    let bus = Arc::new(EventBus::default());
    let mut events = bus.subscribe();
    let scheduler = DrawScheduler::new(
        store.clone(),
        Arc::new(DrawGenerator::random_only()),
        bus,
        180,
    );

    for _ in 0..3 {
        assert!(scheduler.tick(now).await.is_err());
    }
    assert!(store.recent_draws(20).await.unwrap().is_empty());
    assert!(events.try_recv().is_err());

    store.failing.store(false, Ordering::SeqCst);
    let outcome = scheduler.tick(now).await.unwrap();
    assert_matches!(outcome, TickOutcome::Drew { .. });

    // The slot has moved on; a repeat tick at the same instant only waits.
    let outcome = scheduler.tick(now).await.unwrap();
    assert_eq!(outcome, TickOutcome::Waiting { seconds_left: 180 });

    assert_eq!(store.recent_draws(20).await.unwrap().len(), 1);
    assert!(events.try_recv().is_ok());
    assert!(events.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// Test: run() stops when cancelled
// ---------------------------------------------------------------------------

#[tokio::test]
async fn run_stops_on_cancel() {
    let store = Arc::new(MemoryDrawStore::new());
    let scheduler = scheduler(store.clone(), Arc::new(EventBus::default()));
    let cancel = CancellationToken::new();

    let handle = tokio::spawn(scheduler.run(cancel.clone()));
    // The first interval tick fires immediately and creates the schedule.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    cancel.cancel();

    tokio::time::timeout(std::time::Duration::from_secs(2), handle)
        .await
        .expect("scheduler should stop")
        .unwrap();
    assert!(store.latest_schedule().await.unwrap().is_some());
}
