//! Terminal display for the Lucky Six board.
//!
//! Fetches `GET /api/draws`, refetches whenever the server announces a new
//! draw over `/api/draws/ws`, and counts down to the next draw locally
//! between fetches.

pub mod app;
pub mod client;
pub mod error;
pub mod render;
pub mod state;
pub mod subscribe;
