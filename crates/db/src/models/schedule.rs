use lucky_six_core::error::CoreError;
use lucky_six_core::schedule::DrawSchedule;
use lucky_six_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `draw_schedule` table.
///
/// `draw_interval` is selected as `draw_interval::text`, i.e. `HH:MM:SS`.
#[derive(Debug, Clone, FromRow)]
pub struct DrawScheduleRow {
    pub id: DbId,
    pub next_draw_time: Timestamp,
    pub draw_interval: String,
    pub status: String,
}

impl TryFrom<DrawScheduleRow> for DrawSchedule {
    type Error = CoreError;

    fn try_from(row: DrawScheduleRow) -> Result<Self, Self::Error> {
        Ok(DrawSchedule {
            id: row.id,
            next_draw_time: row.next_draw_time,
            draw_interval: row.draw_interval,
            status: row.status.parse()?,
        })
    }
}
