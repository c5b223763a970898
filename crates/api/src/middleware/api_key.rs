//! Fixed API-key extractor for the admin/content surface.
//!
//! The dashboard authenticates with a single pre-shared key in the
//! `x-api-key` header. A missing header is rejected with 403, a wrong key
//! with 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use carelink_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Marker extractor proving the request carried the configured API key.
///
/// ```ignore
/// async fn admin_only(_key: ApiKeyGuard, State(state): State<AppState>) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct ApiKeyGuard;

impl FromRequestParts<AppState> for ApiKeyGuard {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Forbidden(
                    "Access denied. No API key provided.".into(),
                ))
            })?;

        if provided != state.config.api_key {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid API key".into(),
            )));
        }

        Ok(ApiKeyGuard)
    }
}
