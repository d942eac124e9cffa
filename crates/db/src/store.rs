//! The [`DrawStore`] seam and its two implementations.

use async_trait::async_trait;
use lucky_six_core::draw::Draw;
use lucky_six_core::error::CoreError;
use lucky_six_core::schedule::{format_interval, DrawSchedule, ScheduleStatus};
use lucky_six_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;

use crate::repositories::{DrawRepo, ScheduleRepo};
use crate::DbPool;

/// Errors surfaced by a [`DrawStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database rejected or failed the query.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be turned back into a domain value.
    #[error("Corrupt record: {0}")]
    Corrupt(#[from] CoreError),

    /// The schedule row to update does not exist.
    #[error("Schedule {0} not found")]
    ScheduleNotFound(DbId),
}

/// Persistence for draws and the schedule row.
#[async_trait]
pub trait DrawStore: Send + Sync {
    /// Whether the backing store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// The schedule with the latest `next_draw_time`, or `None` before one
    /// has been created.
    async fn latest_schedule(&self) -> Result<Option<DrawSchedule>, StoreError>;

    /// The `limit` most recent draws, newest first.
    async fn recent_draws(&self, limit: i64) -> Result<Vec<Draw>, StoreError>;

    /// Persist a freshly generated draw.
    async fn insert_draw(&self, draw: &Draw) -> Result<(), StoreError>;

    /// Create the schedule row.
    async fn create_schedule(
        &self,
        next_draw_time: Timestamp,
        interval_secs: i64,
        status: ScheduleStatus,
    ) -> Result<DrawSchedule, StoreError>;

    /// Claim the due slot of schedule `id` and persist `draw` for it, as one
    /// unit: either the schedule moves to `next_draw_time` and the draw is
    /// stored, or neither happens.
    ///
    /// The slot counts as due while `next_draw_time` is at or before
    /// `due_by`. Returns `Ok(None)` and stores nothing when it is not due,
    /// which is what a second writer for an already claimed slot sees.
    async fn insert_scheduled_draw(
        &self,
        draw: &Draw,
        schedule_id: DbId,
        due_by: Timestamp,
        next_draw_time: Timestamp,
    ) -> Result<Option<DrawSchedule>, StoreError>;
}

// ---------------------------------------------------------------------------
// PostgreSQL
// ---------------------------------------------------------------------------

/// [`DrawStore`] backed by PostgreSQL through the repositories.
#[derive(Clone)]
pub struct PgDrawStore {
    pool: DbPool,
}

impl PgDrawStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DrawStore for PgDrawStore {
    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn latest_schedule(&self) -> Result<Option<DrawSchedule>, StoreError> {
        match ScheduleRepo::latest(&self.pool).await? {
            Some(row) => Ok(Some(DrawSchedule::try_from(row)?)),
            None => Ok(None),
        }
    }

    async fn recent_draws(&self, limit: i64) -> Result<Vec<Draw>, StoreError> {
        let rows = DrawRepo::list_recent(&self.pool, limit).await?;
        rows.into_iter()
            .map(|row| Draw::try_from(row).map_err(StoreError::from))
            .collect()
    }

    async fn insert_draw(&self, draw: &Draw) -> Result<(), StoreError> {
        DrawRepo::insert(&self.pool, draw).await?;
        Ok(())
    }

    async fn create_schedule(
        &self,
        next_draw_time: Timestamp,
        interval_secs: i64,
        status: ScheduleStatus,
    ) -> Result<DrawSchedule, StoreError> {
        let row = ScheduleRepo::create(&self.pool, next_draw_time, interval_secs, status).await?;
        Ok(DrawSchedule::try_from(row)?)
    }

    async fn insert_scheduled_draw(
        &self,
        draw: &Draw,
        schedule_id: DbId,
        due_by: Timestamp,
        next_draw_time: Timestamp,
    ) -> Result<Option<DrawSchedule>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let Some(row) =
            ScheduleRepo::claim_due(&mut *tx, schedule_id, due_by, next_draw_time).await?
        else {
            let exists = ScheduleRepo::exists(&mut *tx, schedule_id).await?;
            tx.rollback().await?;
            if !exists {
                return Err(StoreError::ScheduleNotFound(schedule_id));
            }
            tracing::debug!(schedule_id, %due_by, "Schedule slot not due, draw not stored");
            return Ok(None);
        };

        DrawRepo::insert(&mut *tx, draw).await?;
        tx.commit().await?;

        Ok(Some(DrawSchedule::try_from(row)?))
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// [`DrawStore`] held in process memory. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryDrawStore {
    /// Oldest first; reads reverse it.
    draws: RwLock<Vec<Draw>>,
    schedules: RwLock<Vec<DrawSchedule>>,
}

impl MemoryDrawStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DrawStore for MemoryDrawStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn latest_schedule(&self) -> Result<Option<DrawSchedule>, StoreError> {
        Ok(self
            .schedules
            .read()
            .await
            .iter()
            .max_by_key(|s| s.next_draw_time)
            .cloned())
    }

    async fn recent_draws(&self, limit: i64) -> Result<Vec<Draw>, StoreError> {
        // Reversed first so the stable sort keeps later inserts ahead on ties.
        let mut draws: Vec<Draw> = self.draws.read().await.iter().rev().cloned().collect();
        draws.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        draws.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(draws)
    }

    async fn insert_draw(&self, draw: &Draw) -> Result<(), StoreError> {
        self.draws.write().await.push(draw.clone());
        Ok(())
    }

    async fn create_schedule(
        &self,
        next_draw_time: Timestamp,
        interval_secs: i64,
        status: ScheduleStatus,
    ) -> Result<DrawSchedule, StoreError> {
        let mut schedules = self.schedules.write().await;
        let schedule = DrawSchedule {
            id: schedules.len() as DbId + 1,
            next_draw_time,
            draw_interval: format_interval(interval_secs),
            status,
        };
        schedules.push(schedule.clone());
        Ok(schedule)
    }

    async fn insert_scheduled_draw(
        &self,
        draw: &Draw,
        schedule_id: DbId,
        due_by: Timestamp,
        next_draw_time: Timestamp,
    ) -> Result<Option<DrawSchedule>, StoreError> {
        // Schedules before draws, held together for the whole claim.
        let mut schedules = self.schedules.write().await;
        let schedule = schedules
            .iter_mut()
            .find(|s| s.id == schedule_id)
            .ok_or(StoreError::ScheduleNotFound(schedule_id))?;

        if schedule.next_draw_time > due_by {
            return Ok(None);
        }

        self.draws.write().await.push(draw.clone());
        schedule.next_draw_time = next_draw_time;
        Ok(Some(schedule.clone()))
    }
}
