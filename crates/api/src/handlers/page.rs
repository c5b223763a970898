//! Handlers for the `/pages` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use carelink_core::error::CoreError;
use carelink_core::translations;
use carelink_core::types::DbId;
use carelink_db::models::page::{CreatePage, Page, PageFilter, UpdatePage};
use carelink_db::repositories::PageRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::api_key::ApiKeyGuard;
use crate::response::Paginated;
use crate::state::AppState;

/// Query parameters for the page list endpoint.
#[derive(Debug, Deserialize)]
pub struct PageListParams {
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/v1/pages
pub async fn create(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Json(input): Json<CreatePage>,
) -> AppResult<(StatusCode, Json<Page>)> {
    translations::validate(&input.translations)?;
    let page = PageRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(page)))
}

/// GET /api/v1/pages
///
/// Supports `?search=` (title match in any language) and limit/offset
/// pagination; the response carries the total match count.
pub async fn list(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Query(params): Query<PageListParams>,
) -> AppResult<Json<Paginated<Page>>> {
    let filter = PageFilter {
        search: params.search,
        limit: params.limit,
        offset: params.offset,
    };
    let (pages, total) = PageRepo::list(&state.pool, &filter).await?;
    Ok(Json(Paginated { data: pages, total }))
}

/// GET /api/v1/pages/{id}
pub async fn get_by_id(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Page>> {
    let page = PageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;
    Ok(Json(page))
}

/// PUT /api/v1/pages/{id}
///
/// The submitted language blocks are merged over the stored ones.
pub async fn update(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePage>,
) -> AppResult<Json<Page>> {
    translations::validate(&input.translations)?;

    let existing = PageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;

    let merged = translations::merge(&existing.translations, &input.translations);
    let page = PageRepo::update_translations(&state.pool, id, &merged)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;
    Ok(Json(page))
}

/// DELETE /api/v1/pages/{id}
pub async fn delete(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PageRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Page", id }))
    }
}
