//! Bearer-token guard for privileged draw operations.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use lucky_six_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Proof that the request carried `Authorization: Bearer <SERVICE_ROLE_KEY>`.
///
/// Add it as a handler parameter to require the service key:
///
/// ```ignore
/// async fn create_draw(_key: ServiceKey, State(state): State<AppState>) -> AppResult<...>
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ServiceKey;

impl FromRequestParts<AppState> for ServiceKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        if token != state.config.service_role_key {
            tracing::warn!("Rejected request with invalid service key");
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid service key".into(),
            )));
        }

        Ok(ServiceKey)
    }
}
