//! Lucky Six domain core.
//!
//! Holds the draw model and its derived statistics, the draw generator with
//! its lucky-number source seam, and the schedule math behind the board
//! payload served to display clients. Nothing in here touches the database
//! or the network.

pub mod board;
pub mod draw;
pub mod error;
pub mod generator;
pub mod lucky;
pub mod schedule;
pub mod types;
