//! Draw generation.
//!
//! [`DrawGenerator::generate`] always returns a valid [`Draw`]. It first asks
//! the configured [`LuckyNumberSource`] (bounded by a timeout); any source
//! failure, malformed answer or invalid numbers are logged and replaced by
//! uniformly sampled numbers. Callers cannot tell the two paths apart.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::Rng;

use crate::draw::{BallColor, Draw, DRAW_SIZE, MAX_NUMBER, MIN_NUMBER, PALETTE};
use crate::lucky::{validate_lucky_numbers, LuckyNumberSource, LuckyNumbers};
use crate::types::Timestamp;

/// Default upper bound on a single lucky-number request.
pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(10);

/// Length of the random suffix in draw ids.
const ID_SUFFIX_LEN: usize = 7;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Produces draws. Stateless apart from its configuration, so one instance
/// can be shared behind an `Arc` and called concurrently.
#[derive(Clone)]
pub struct DrawGenerator {
    source: Option<Arc<dyn LuckyNumberSource>>,
    source_timeout: Duration,
}

impl DrawGenerator {
    /// A generator that asks `source` first, falling back to random numbers.
    pub fn new(source: Arc<dyn LuckyNumberSource>, source_timeout: Duration) -> Self {
        Self {
            source: Some(source),
            source_timeout,
        }
    }

    /// A generator that always uses random numbers.
    pub fn random_only() -> Self {
        Self {
            source: None,
            source_timeout: DEFAULT_SOURCE_TIMEOUT,
        }
    }

    /// Produce one draw. Never fails.
    pub async fn generate(&self) -> Draw {
        let numbers = match &self.source {
            Some(source) => self.numbers_from_source(source.as_ref()).await,
            None => None,
        };

        assemble(numbers, &mut rand::rng(), Utc::now())
    }

    /// Ask the source once. `None` means "use the fallback".
    async fn numbers_from_source(&self, source: &dyn LuckyNumberSource) -> Option<[u8; DRAW_SIZE]> {
        let answer = tokio::time::timeout(self.source_timeout, source.request_numbers())
            .await
            .unwrap_or_else(|_| {
                LuckyNumbers::SourceError(format!(
                    "no answer within {}ms",
                    self.source_timeout.as_millis()
                ))
            });

        match answer {
            LuckyNumbers::Numbers(raw) => match validate_lucky_numbers(&raw) {
                Ok(numbers) => {
                    tracing::debug!(source = source.name(), ?numbers, "Using lucky numbers");
                    Some(numbers)
                }
                Err(reason) => {
                    tracing::warn!(
                        source = source.name(),
                        %reason,
                        "Lucky numbers rejected, using fallback"
                    );
                    None
                }
            },
            LuckyNumbers::Malformed(reason) => {
                tracing::warn!(
                    source = source.name(),
                    %reason,
                    "Lucky number answer was malformed, using fallback"
                );
                None
            }
            LuckyNumbers::SourceError(reason) => {
                tracing::error!(
                    source = source.name(),
                    %reason,
                    "Lucky number source failed, using fallback"
                );
                None
            }
        }
    }
}

/// Build a draw from already-chosen numbers (or fallback numbers when
/// `numbers` is `None`), sampling colors and the id from `rng`.
pub fn assemble<R: Rng + ?Sized>(
    numbers: Option<[u8; DRAW_SIZE]>,
    rng: &mut R,
    now: Timestamp,
) -> Draw {
    let numbers = numbers.unwrap_or_else(|| fallback_numbers(rng));
    let colors = random_colors(rng);
    let id = new_draw_id(now, rng);
    Draw::from_parts(id, numbers, colors, now)
}

/// Six distinct numbers sampled uniformly from 1..=99, kept in draw order.
pub fn fallback_numbers<R: Rng + ?Sized>(rng: &mut R) -> [u8; DRAW_SIZE] {
    let mut numbers = [0u8; DRAW_SIZE];
    let mut len = 0;
    while len < DRAW_SIZE {
        let candidate = rng.random_range(MIN_NUMBER..=MAX_NUMBER);
        if !numbers[..len].contains(&candidate) {
            numbers[len] = candidate;
            len += 1;
        }
    }
    numbers
}

/// Six colors sampled uniformly, with replacement, from the palette.
pub fn random_colors<R: Rng + ?Sized>(rng: &mut R) -> [BallColor; DRAW_SIZE] {
    std::array::from_fn(|_| PALETTE[rng.random_range(0..PALETTE.len())])
}

/// `draw_<unix millis>_<7 base-36 chars>`.
pub fn new_draw_id<R: Rng + ?Sized>(now: Timestamp, rng: &mut R) -> String {
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
        .collect();
    format!("draw_{}_{suffix}", now.timestamp_millis())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
