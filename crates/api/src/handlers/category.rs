//! Handlers for the `/categories` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use carelink_core::error::CoreError;
use carelink_core::translations;
use carelink_core::types::DbId;
use carelink_db::models::category::{Category, CreateCategory, UpdateCategory};
use carelink_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::api_key::ApiKeyGuard;
use crate::query::LangParams;
use crate::state::AppState;

/// POST /api/v1/categories
pub async fn create(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    translations::validate(&input.translations)?;
    let category = CategoryRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/v1/categories
///
/// Returns full translation objects; the dashboard edits all languages at
/// once.
pub async fn list(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Category>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(categories))
}

/// GET /api/v1/categories/{id}
///
/// `translations` is resolved to the requested language (fallback English).
pub async fn get_by_id(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<LangParams>,
) -> AppResult<Json<Category>> {
    let mut category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    category.translations = translations::resolve(&category.translations, &params.lang).clone();
    Ok(Json(category))
}

/// PUT /api/v1/categories/{id}
///
/// The submitted language blocks are merged over the stored ones.
pub async fn update(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<Category>> {
    translations::validate(&input.translations)?;

    let existing = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    let merged = translations::merge(&existing.translations, &input.translations);
    let category = CategoryRepo::update_translations(&state.pool, id, &merged)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(category))
}

/// DELETE /api/v1/categories/{id}
pub async fn delete(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CategoryRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))
    }
}
