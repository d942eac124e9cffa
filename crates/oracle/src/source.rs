//! [`LuckyNumberSource`] implementation over [`GeminiApi`].

use async_trait::async_trait;
use lucky_six_core::lucky::{LuckyNumberSource, LuckyNumbers};
use serde::Deserialize;

use crate::api::{GeminiApi, OracleError};
use crate::config::OracleConfig;
use crate::prompt::LUCKY_NUMBERS_PROMPT;

/// Shape of the answer the model is asked to produce.
#[derive(Debug, Deserialize)]
struct LuckyAnswer {
    numbers: Vec<i64>,
}

/// Asks a hosted model for the next draw's numbers.
pub struct GeminiLuckyNumbers {
    api: GeminiApi,
}

impl GeminiLuckyNumbers {
    pub fn new(api: GeminiApi) -> Self {
        Self { api }
    }

    pub fn from_config(config: OracleConfig) -> Self {
        Self::new(GeminiApi::new(config))
    }
}

#[async_trait]
impl LuckyNumberSource for GeminiLuckyNumbers {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn request_numbers(&self) -> LuckyNumbers {
        match self.api.generate_json(LUCKY_NUMBERS_PROMPT).await {
            Ok(text) => parse_lucky_answer(&text),
            Err(OracleError::EmptyAnswer) => LuckyNumbers::Malformed("empty answer".into()),
            Err(e) => {
                tracing::debug!(model = self.api.model(), error = %e, "Lucky-number request failed");
                LuckyNumbers::SourceError(e.to_string())
            }
        }
    }
}

/// Read the model's text as `{"numbers": [...]}`.
///
/// Tolerates a surrounding markdown code fence. Anything else that does not
/// parse is [`LuckyNumbers::Malformed`]; range and count checks happen later
/// in the generator.
pub fn parse_lucky_answer(text: &str) -> LuckyNumbers {
    let body = strip_code_fence(text.trim());
    match serde_json::from_str::<LuckyAnswer>(body) {
        Ok(answer) => LuckyNumbers::Numbers(answer.numbers),
        Err(e) => LuckyNumbers::Malformed(e.to_string()),
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
