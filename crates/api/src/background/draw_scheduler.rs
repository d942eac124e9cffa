//! Periodic draws driven by the schedule row.
//!
//! Every tick reads the latest schedule. A missing row is created as
//! `active` with the configured interval. When an active schedule is due,
//! one draw is generated and stored in the same step that moves
//! `next_draw_time` to `now + interval`, so a slot yields at most one draw.
//! Errors are logged and the next tick tries the whole step again.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use lucky_six_core::draw::Draw;
use lucky_six_core::generator::DrawGenerator;
use lucky_six_core::schedule::{DrawSchedule, ScheduleStatus};
use lucky_six_core::types::Timestamp;
use lucky_six_db::{DrawStore, StoreError};
use lucky_six_events::EventBus;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::engine;

/// How often the schedule is checked.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// What a single tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No schedule existed; this one was created.
    ScheduleCreated(DrawSchedule),
    /// The schedule is active but not yet due.
    Waiting { seconds_left: i64 },
    /// The schedule is not active.
    Inactive(ScheduleStatus),
    /// A draw ran and the schedule moved forward.
    Drew { draw: Box<Draw>, next_draw_time: Timestamp },
}

/// Runs draws whenever the schedule row says one is due.
pub struct DrawScheduler {
    store: Arc<dyn DrawStore>,
    generator: Arc<DrawGenerator>,
    event_bus: Arc<EventBus>,
    interval_secs: i64,
}

impl DrawScheduler {
    /// `interval_secs` is used for a newly created schedule row only; an
    /// existing row keeps its own interval.
    pub fn new(
        store: Arc<dyn DrawStore>,
        generator: Arc<DrawGenerator>,
        event_bus: Arc<EventBus>,
        interval_secs: i64,
    ) -> Self {
        Self {
            store,
            generator,
            event_bus,
            interval_secs,
        }
    }

    /// Tick until `cancel` fires.
    pub async fn run(self, cancel: CancellationToken) {
        tracing::info!(
            default_interval_secs = self.interval_secs,
            tick_secs = TICK_INTERVAL.as_secs(),
            "Draw scheduler started"
        );

        let mut interval = tokio::time::interval(TICK_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Draw scheduler stopping");
                    break;
                }
                _ = interval.tick() => {
                    match self.tick(Utc::now()).await {
                        Ok(TickOutcome::ScheduleCreated(schedule)) => {
                            tracing::info!(
                                schedule_id = schedule.id,
                                next_draw_time = %schedule.next_draw_time,
                                "Draw schedule created"
                            );
                        }
                        Ok(TickOutcome::Drew { draw, next_draw_time }) => {
                            tracing::debug!(draw_id = %draw.id, %next_draw_time, "Scheduled draw complete");
                        }
                        Ok(TickOutcome::Waiting { .. } | TickOutcome::Inactive(_)) => {}
                        Err(e) => {
                            tracing::error!(error = %e, "Draw scheduler tick failed");
                        }
                    }
                }
            }
        }
    }

    /// Check the schedule once at `now` and act on it.
    pub async fn tick(&self, now: Timestamp) -> Result<TickOutcome, StoreError> {
        let Some(schedule) = self.store.latest_schedule().await? else {
            let next = now + chrono::Duration::seconds(self.interval_secs);
            let schedule = self
                .store
                .create_schedule(next, self.interval_secs, ScheduleStatus::Active)
                .await?;
            return Ok(TickOutcome::ScheduleCreated(schedule));
        };

        if schedule.status != ScheduleStatus::Active {
            return Ok(TickOutcome::Inactive(schedule.status));
        }

        if !schedule.is_due(now) {
            return Ok(TickOutcome::Waiting {
                seconds_left: schedule.seconds_until_next(now),
            });
        }

        let draw = self.generator.generate().await;
        let next = now + chrono::Duration::seconds(schedule.interval_secs());

        let Some(advanced) = self
            .store
            .insert_scheduled_draw(&draw, schedule.id, now, next)
            .await?
        else {
            // Another writer claimed this slot between the read and the claim.
            let seconds_left = self
                .store
                .latest_schedule()
                .await?
                .map_or(0, |s| s.seconds_until_next(now));
            return Ok(TickOutcome::Waiting { seconds_left });
        };

        engine::announce(&self.event_bus, &draw);

        Ok(TickOutcome::Drew {
            draw: Box::new(draw),
            next_draw_time: advanced.next_draw_time,
        })
    }
}
