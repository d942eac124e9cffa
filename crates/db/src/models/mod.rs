//! Row structs for the `draws` and `draw_schedule` tables.
//!
//! Each row converts into its domain type from `lucky_six_core`; the
//! conversion is fallible because the database could hold values the domain
//! types cannot represent.

pub mod draw;
pub mod schedule;
