/// Default model asked for lucky numbers.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default base URL of the generative-language API.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings for the lucky-number model.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub api_key: String,
    pub model: String,
    pub api_url: String,
}

impl OracleConfig {
    /// Load from environment variables.
    ///
    /// Returns `None` when `LUCKY_NUMBERS_API_KEY` is unset or empty, which
    /// means draws use random numbers only.
    ///
    /// | Env Var                 | Default                                             |
    /// |-------------------------|-----------------------------------------------------|
    /// | `LUCKY_NUMBERS_API_KEY` | --                                                  |
    /// | `LUCKY_NUMBERS_MODEL`   | `gemini-2.0-flash`                                  |
    /// | `LUCKY_NUMBERS_API_URL` | `https://generativelanguage.googleapis.com/v1beta`  |
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("LUCKY_NUMBERS_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())?;

        let model = std::env::var("LUCKY_NUMBERS_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        let api_url = std::env::var("LUCKY_NUMBERS_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.into())
            .trim_end_matches('/')
            .to_string();

        Some(Self {
            api_key,
            model,
            api_url,
        })
    }
}
