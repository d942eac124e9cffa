//! HTTP client for the board endpoint.

use std::time::Duration;

use lucky_six_core::board::DrawBoard;
use serde::Deserialize;

use crate::error::DisplayError;

/// Default server base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Upper bound on one board request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// `{error, code}` body returned by the server on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Talks to one Lucky Six server.
#[derive(Debug, Clone)]
pub struct BoardClient {
    http: reqwest::Client,
    base_url: String,
}

impl BoardClient {
    pub fn new(base_url: &str) -> Result<Self, DisplayError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/draws`.
    pub async fn fetch_board(&self) -> Result<DrawBoard, DisplayError> {
        let response = self
            .http
            .get(format!("{}/api/draws", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            return Err(DisplayError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// The WebSocket URL for draw notifications on the same server.
    pub fn notifications_url(&self) -> Result<String, DisplayError> {
        ws_url(&self.base_url)
    }
}

/// Map `http(s)://host` to `ws(s)://host/api/draws/ws`.
pub fn ws_url(base_url: &str) -> Result<String, DisplayError> {
    let base = base_url.trim_end_matches('/');
    let rest = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        return Err(DisplayError::InvalidUrl(base_url.to_string()));
    };
    Ok(format!("{rest}/api/draws/ws"))
}
