use axum::routing::get;
use axum::Router;

use crate::handlers::draws;
use crate::state::AppState;
use crate::ws;

/// Mount draw routes under `/draws`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(draws::get_board).post(draws::create_draw))
        .route("/ws", get(ws::ws_handler))
}
