//! Handlers for the `/departments` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use carelink_core::error::CoreError;
use carelink_core::translations;
use carelink_core::types::DbId;
use carelink_db::models::department::{CreateDepartment, Department, UpdateDepartment};
use carelink_db::repositories::DepartmentRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::api_key::ApiKeyGuard;
use crate::query::LangParams;
use crate::state::AppState;

/// POST /api/v1/departments
pub async fn create(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Json(input): Json<CreateDepartment>,
) -> AppResult<(StatusCode, Json<Department>)> {
    translations::validate(&input.translations)?;
    let department = DepartmentRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(department)))
}

/// GET /api/v1/departments
pub async fn list(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Department>>> {
    let departments = DepartmentRepo::list(&state.pool).await?;
    Ok(Json(departments))
}

/// GET /api/v1/departments/{id}
///
/// `translations` is resolved to the requested language (fallback English).
pub async fn get_by_id(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<LangParams>,
) -> AppResult<Json<Department>> {
    let mut department = DepartmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id,
        }))?;
    department.translations =
        translations::resolve(&department.translations, &params.lang).clone();
    Ok(Json(department))
}

/// PUT /api/v1/departments/{id}
///
/// The submitted language blocks are merged over the stored ones.
pub async fn update(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDepartment>,
) -> AppResult<Json<Department>> {
    translations::validate(&input.translations)?;

    let existing = DepartmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id,
        }))?;

    let merged = translations::merge(&existing.translations, &input.translations);
    let department = DepartmentRepo::update_translations(&state.pool, id, &merged)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id,
        }))?;
    Ok(Json(department))
}

/// DELETE /api/v1/departments/{id}
pub async fn delete(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = DepartmentRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id,
        }))
    }
}
