//! Background tasks.
//!
//! Each task is a long-running async function intended to be spawned via
//! `tokio::spawn` and stopped through a [`CancellationToken`](tokio_util::sync::CancellationToken).

pub mod draw_scheduler;
