//! `lucky-six-display` -- terminal board for a Lucky Six server.
//!
//! # Environment variables
//!
//! | Variable            | Required | Default                 |
//! |---------------------|----------|-------------------------|
//! | `LUCKY_SIX_API_URL` | no       | `http://localhost:3000` |

use lucky_six_display::app::Display;
use lucky_six_display::client::{BoardClient, DEFAULT_API_URL};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout is the screen.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lucky_six_display=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let api_url =
        std::env::var("LUCKY_SIX_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

    let client = BoardClient::new(&api_url).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build HTTP client");
        std::process::exit(1);
    });

    tracing::info!(api_url = %client.base_url(), "Starting lucky-six-display");

    if let Err(e) = Display::new(client).run().await {
        tracing::error!(error = %e, "Display stopped");
        std::process::exit(1);
    }
}
