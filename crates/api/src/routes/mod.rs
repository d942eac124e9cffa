pub mod draws;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /draws         board (GET), run a draw now (POST, service key)
/// /draws/ws      WebSocket draw notifications
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/draws", draws::router())
}
