//! The draw schedule and its time math.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Interval between draws when no schedule says otherwise (3 minutes).
pub const DEFAULT_DRAW_INTERVAL_SECS: i64 = 180;

/// How many recent draws the board carries.
pub const HISTORY_LIMIT: i64 = 20;

/// Lifecycle state of the schedule row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    /// No draw loop has claimed the schedule yet.
    Pending,
    /// Draws are being produced on the interval.
    Active,
    /// Draws are suspended; the countdown still reports `next_draw_time`.
    Paused,
}

impl ScheduleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ScheduleStatus::Pending => "pending",
            ScheduleStatus::Active => "active",
            ScheduleStatus::Paused => "paused",
        }
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ScheduleStatus::Pending),
            "active" => Ok(ScheduleStatus::Active),
            "paused" => Ok(ScheduleStatus::Paused),
            other => Err(CoreError::Validation(format!(
                "unknown schedule status '{other}'"
            ))),
        }
    }
}

/// The persisted "next draw" record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawSchedule {
    pub id: DbId,
    pub next_draw_time: Timestamp,
    /// Interval in its `HH:MM:SS` text form, as the database renders it.
    pub draw_interval: String,
    pub status: ScheduleStatus,
}

impl DrawSchedule {
    /// Interval in whole seconds, or the default when the text is unreadable.
    pub fn interval_secs(&self) -> i64 {
        match parse_interval_secs(&self.draw_interval) {
            Ok(secs) => secs,
            Err(e) => {
                tracing::warn!(
                    schedule_id = self.id,
                    draw_interval = %self.draw_interval,
                    error = %e,
                    "Unreadable draw interval, using default"
                );
                DEFAULT_DRAW_INTERVAL_SECS
            }
        }
    }

    /// Whole seconds until the next draw, never negative.
    pub fn seconds_until_next(&self, now: Timestamp) -> i64 {
        seconds_until(self.next_draw_time, now)
    }

    /// Whether a draw is owed at `now`.
    pub fn is_due(&self, now: Timestamp) -> bool {
        self.status == ScheduleStatus::Active && now >= self.next_draw_time
    }
}

/// Parse an `HH:MM:SS` duration (seconds may carry a fraction, which is
/// dropped) into whole seconds.
pub fn parse_interval_secs(text: &str) -> Result<i64, CoreError> {
    let invalid = || CoreError::Validation(format!("'{text}' is not an HH:MM:SS interval"));

    let mut parts = text.trim().split(':');
    let (Some(h), Some(m), Some(s), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let hours: i64 = h.parse().map_err(|_| invalid())?;
    let minutes: i64 = m.parse().map_err(|_| invalid())?;
    let seconds: f64 = s.parse().map_err(|_| invalid())?;
    if hours < 0 || !(0..60).contains(&minutes) || !(0.0..60.0).contains(&seconds) {
        return Err(invalid());
    }

    Ok(hours * 3600 + minutes * 60 + seconds.floor() as i64)
}

/// Render whole seconds as `HH:MM:SS`.
pub fn format_interval(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Whole seconds from `now` until `at`, floored and clamped at zero.
pub fn seconds_until(at: Timestamp, now: Timestamp) -> i64 {
    (at - now).num_seconds().max(0)
}
