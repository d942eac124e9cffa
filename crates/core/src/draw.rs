//! The draw record and its derived statistics.
//!
//! A [`Draw`] is built once from six numbers and six ball colors; every other
//! field (`sum`, `high_low`, `color_counts`, `winning_colors`) is derived in
//! [`Draw::from_parts`] and never set independently.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Number of balls in one draw.
pub const DRAW_SIZE: usize = 6;

/// Smallest number a ball can carry.
pub const MIN_NUMBER: u8 = 1;

/// Largest number a ball can carry.
pub const MAX_NUMBER: u8 = 99;

/// Sums strictly below this are `Low`.
pub const LOW_SUM_THRESHOLD: u16 = 150;

/// Sums strictly above this are `High`.
pub const HIGH_SUM_THRESHOLD: u16 = 350;

// ---------------------------------------------------------------------------
// BallColor
// ---------------------------------------------------------------------------

/// Color of a single ball.
///
/// Declaration order is the palette order; `Ord` follows it, so maps keyed by
/// color iterate red, blue, green.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BallColor {
    Red,
    Blue,
    Green,
}

/// The fixed three-color palette balls are sampled from.
pub const PALETTE: [BallColor; 3] = [BallColor::Red, BallColor::Blue, BallColor::Green];

impl BallColor {
    pub fn as_str(self) -> &'static str {
        match self {
            BallColor::Red => "red",
            BallColor::Blue => "blue",
            BallColor::Green => "green",
        }
    }
}

impl fmt::Display for BallColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BallColor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(BallColor::Red),
            "blue" => Ok(BallColor::Blue),
            "green" => Ok(BallColor::Green),
            other => Err(CoreError::Validation(format!("unknown ball color '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// HighLow
// ---------------------------------------------------------------------------

/// Bucket of a draw's number sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HighLow {
    Low,
    Mid,
    High,
}

impl HighLow {
    /// `Low` below 150, `High` above 350, `Mid` for 150..=350.
    pub fn from_sum(sum: u16) -> Self {
        if sum < LOW_SUM_THRESHOLD {
            HighLow::Low
        } else if sum > HIGH_SUM_THRESHOLD {
            HighLow::High
        } else {
            HighLow::Mid
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HighLow::Low => "Low",
            HighLow::Mid => "Mid",
            HighLow::High => "High",
        }
    }
}

impl fmt::Display for HighLow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HighLow {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(HighLow::Low),
            "Mid" => Ok(HighLow::Mid),
            "High" => Ok(HighLow::High),
            other => Err(CoreError::Validation(format!("unknown high/low bucket '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Draw
// ---------------------------------------------------------------------------

/// One round's result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draw {
    pub id: String,
    pub numbers: [u8; DRAW_SIZE],
    pub colors: [BallColor; DRAW_SIZE],
    pub sum: u16,
    pub high_low: HighLow,
    pub color_counts: BTreeMap<BallColor, u8>,
    pub winning_colors: Vec<BallColor>,
    pub created_at: Timestamp,
}

impl Draw {
    /// Assemble a draw, deriving every statistic from `numbers` and `colors`.
    pub fn from_parts(
        id: String,
        numbers: [u8; DRAW_SIZE],
        colors: [BallColor; DRAW_SIZE],
        created_at: Timestamp,
    ) -> Self {
        let sum = number_sum(&numbers);
        let color_counts = color_counts(&colors);
        let winning_colors = winning_colors(&color_counts);

        Self {
            id,
            numbers,
            colors,
            sum,
            high_low: HighLow::from_sum(sum),
            color_counts,
            winning_colors,
            created_at,
        }
    }
}

/// Exact sum of the drawn numbers.
pub fn number_sum(numbers: &[u8]) -> u16 {
    numbers.iter().map(|&n| u16::from(n)).sum()
}

/// Occurrences of each color. Colors that never appear have no key.
pub fn color_counts(colors: &[BallColor]) -> BTreeMap<BallColor, u8> {
    let mut counts = BTreeMap::new();
    for &color in colors {
        *counts.entry(color).or_insert(0) += 1;
    }
    counts
}

/// Every color whose count equals the maximum, in palette order.
pub fn winning_colors(counts: &BTreeMap<BallColor, u8>) -> Vec<BallColor> {
    let max = counts.values().copied().max().unwrap_or(0);
    counts
        .iter()
        .filter(|(_, count)| **count == max)
        .map(|(&color, _)| color)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
