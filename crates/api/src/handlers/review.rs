//! Handlers for the `/reviews` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use carelink_core::error::CoreError;
use carelink_core::types::DbId;
use carelink_db::models::review::{CreateReview, Review, UpdateReview};
use carelink_db::repositories::ReviewRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::api_key::ApiKeyGuard;
use crate::state::AppState;

/// POST /api/v1/reviews
pub async fn create(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Json(input): Json<CreateReview>,
) -> AppResult<(StatusCode, Json<Review>)> {
    input.validate()?;
    let review = ReviewRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// GET /api/v1/reviews
pub async fn list(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Review>>> {
    let reviews = ReviewRepo::list(&state.pool).await?;
    Ok(Json(reviews))
}

/// GET /api/v1/reviews/{id}
pub async fn get_by_id(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Review>> {
    let review = ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }))?;
    Ok(Json(review))
}

/// PUT /api/v1/reviews/{id}
pub async fn update(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateReview>,
) -> AppResult<Json<Review>> {
    input.validate()?;
    let review = ReviewRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }))?;
    Ok(Json(review))
}

/// DELETE /api/v1/reviews/{id}
pub async fn delete(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ReviewRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }))
    }
}
