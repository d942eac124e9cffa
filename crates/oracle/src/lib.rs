//! Lucky-number source backed by a hosted generative-language model.
//!
//! [`GeminiApi`] is the thin HTTP wrapper around `generateContent`;
//! [`GeminiLuckyNumbers`] adapts it to the
//! [`LuckyNumberSource`](lucky_six_core::lucky::LuckyNumberSource) seam,
//! folding every failure into an explicit answer the draw generator can
//! match on.

pub mod api;
pub mod config;
pub mod prompt;
pub mod source;

pub use api::{GeminiApi, OracleError};
pub use config::OracleConfig;
pub use source::GeminiLuckyNumbers;
