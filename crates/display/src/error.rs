/// Errors from talking to the draw server.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    /// The HTTP request failed or the body was not a board.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    /// The configured server URL cannot be turned into a WebSocket URL.
    #[error("invalid server URL '{0}'")]
    InvalidUrl(String),
}
