//! Repository for the `draw_schedule` table.

use lucky_six_core::schedule::{format_interval, ScheduleStatus};
use lucky_six_core::types::{DbId, Timestamp};
use sqlx::{PgExecutor, PgPool};

use crate::models::schedule::DrawScheduleRow;

/// Column list for `draw_schedule` queries. The interval is read as text.
const COLUMNS: &str = "\
    id, next_draw_time, draw_interval::text AS draw_interval, status";

/// Provides data access for the draw schedule row.
pub struct ScheduleRepo;

impl ScheduleRepo {
    /// The schedule with the latest `next_draw_time`, if any row exists.
    pub async fn latest(pool: &PgPool) -> Result<Option<DrawScheduleRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM draw_schedule ORDER BY next_draw_time DESC LIMIT 1"
        );
        sqlx::query_as::<_, DrawScheduleRow>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Create the schedule row.
    pub async fn create(
        pool: &PgPool,
        next_draw_time: Timestamp,
        interval_secs: i64,
        status: ScheduleStatus,
    ) -> Result<DrawScheduleRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO draw_schedule (next_draw_time, draw_interval, status) \
             VALUES ($1, $2::interval, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DrawScheduleRow>(&query)
            .bind(next_draw_time)
            .bind(format_interval(interval_secs))
            .bind(status.as_str())
            .fetch_one(pool)
            .await
    }

    /// Move the schedule to `next_draw_time`, but only while its current
    /// `next_draw_time` is at or before `due_by`.
    ///
    /// Returns `None` when the row is missing or not yet due, so two writers
    /// can never both claim the same slot.
    pub async fn claim_due<'e, E>(
        executor: E,
        id: DbId,
        due_by: Timestamp,
        next_draw_time: Timestamp,
    ) -> Result<Option<DrawScheduleRow>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE draw_schedule SET next_draw_time = $3, updated_at = now() \
             WHERE id = $1 AND next_draw_time <= $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DrawScheduleRow>(&query)
            .bind(id)
            .bind(due_by)
            .bind(next_draw_time)
            .fetch_optional(executor)
            .await
    }

    /// Whether a schedule row with `id` exists.
    pub async fn exists<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM draw_schedule WHERE id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await
    }
}
