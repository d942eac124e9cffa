//! The lucky-number source seam.
//!
//! A [`LuckyNumberSource`] is an optional, best-effort collaborator that
//! proposes six numbers for the next draw. Its answer is an explicit
//! [`LuckyNumbers`] value rather than a `Result`: the generator matches on it
//! and only a well-formed `Numbers` answer skips the random fallback.

use async_trait::async_trait;

use crate::draw::{DRAW_SIZE, MAX_NUMBER, MIN_NUMBER};

/// What a lucky-number source answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LuckyNumbers {
    /// The source produced a list of numbers. Not yet validated.
    Numbers(Vec<i64>),
    /// The source could not be reached or failed (network, model, timeout).
    SourceError(String),
    /// The source answered, but the answer could not be read as numbers.
    Malformed(String),
}

/// Something that can propose six numbers for a draw.
#[async_trait]
pub trait LuckyNumberSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Ask for six numbers. Implementations never panic on bad input; every
    /// failure is folded into [`LuckyNumbers::SourceError`] or
    /// [`LuckyNumbers::Malformed`].
    async fn request_numbers(&self) -> LuckyNumbers;
}

/// Check that a proposed list is usable as draw numbers.
///
/// Requires exactly six values, each within 1..=99, all distinct. Order is
/// preserved.
pub fn validate_lucky_numbers(numbers: &[i64]) -> Result<[u8; DRAW_SIZE], String> {
    if numbers.len() != DRAW_SIZE {
        return Err(format!(
            "expected {DRAW_SIZE} numbers, got {}",
            numbers.len()
        ));
    }

    let mut out = [0u8; DRAW_SIZE];
    for (i, &n) in numbers.iter().enumerate() {
        let value = u8::try_from(n)
            .ok()
            .filter(|v| (MIN_NUMBER..=MAX_NUMBER).contains(v))
            .ok_or_else(|| format!("number {n} is outside {MIN_NUMBER}..={MAX_NUMBER}"))?;
        if out[..i].contains(&value) {
            return Err(format!("number {value} appears more than once"));
        }
        out[i] = value;
    }

    Ok(out)
}
