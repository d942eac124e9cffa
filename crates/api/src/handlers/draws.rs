//! Handlers for the draw board and on-demand draws.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use lucky_six_core::board::DrawBoard;
use lucky_six_core::schedule::HISTORY_LIMIT;

use crate::engine;
use crate::error::AppResult;
use crate::middleware::service_key::ServiceKey;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/draws
///
/// Current draw, the 20 most recent draws and the countdown to the next one.
/// Before the schedule row exists the board is the pending default and
/// draws are not queried.
pub async fn get_board(State(state): State<AppState>) -> AppResult<Json<DrawBoard>> {
    let Some(schedule) = state.store.latest_schedule().await? else {
        tracing::debug!("No draw schedule yet, serving pending board");
        return Ok(Json(DrawBoard::pending()));
    };

    let history = state.store.recent_draws(HISTORY_LIMIT).await?;
    Ok(Json(DrawBoard::compose(&schedule, history, Utc::now())))
}

/// POST /api/draws
///
/// Run one draw now. Requires the service key.
pub async fn create_draw(
    _key: ServiceKey,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let draw = engine::run_draw(state.store.as_ref(), &state.generator, &state.event_bus).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: draw })))
}
