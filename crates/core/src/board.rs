//! The board payload served by `GET /api/draws`.

use serde::{Deserialize, Serialize};

use crate::draw::Draw;
use crate::schedule::{DrawSchedule, ScheduleStatus, DEFAULT_DRAW_INTERVAL_SECS};
use crate::types::Timestamp;

/// Current draw, recent history and countdown, as one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawBoard {
    pub current_draw: Option<Draw>,
    pub history: Vec<Draw>,
    pub time_to_next_draw: i64,
    pub draw_interval: i64,
    pub draw_schedule_status: ScheduleStatus,
}

impl DrawBoard {
    /// The board before any schedule row exists.
    pub fn pending() -> Self {
        Self {
            current_draw: None,
            history: Vec::new(),
            time_to_next_draw: DEFAULT_DRAW_INTERVAL_SECS,
            draw_interval: DEFAULT_DRAW_INTERVAL_SECS,
            draw_schedule_status: ScheduleStatus::Pending,
        }
    }

    /// Build the board from the schedule row and the newest-first history.
    pub fn compose(schedule: &DrawSchedule, history: Vec<Draw>, now: Timestamp) -> Self {
        Self {
            current_draw: history.first().cloned(),
            time_to_next_draw: schedule.seconds_until_next(now),
            draw_interval: schedule.interval_secs(),
            draw_schedule_status: schedule.status,
            history,
        }
    }
}
