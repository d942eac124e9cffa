//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod draw_repo;
pub mod schedule_repo;

pub use draw_repo::DrawRepo;
pub use schedule_repo::ScheduleRepo;
