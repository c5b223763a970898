//! Handlers for the `/doctors` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use carelink_core::error::CoreError;
use carelink_core::slug::slugify;
use carelink_core::translations;
use carelink_core::types::DbId;
use carelink_db::models::doctor::{
    CreateDoctor, Doctor, DoctorDetail, DoctorFilter, ScheduleEntry, UpdateDoctor,
};
use carelink_db::repositories::DoctorRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::api_key::ApiKeyGuard;
use crate::query::LangParams;
use crate::state::AppState;

/// Query parameters for the doctor list endpoint.
#[derive(Debug, Deserialize)]
pub struct DoctorListParams {
    #[serde(default = "default_lang")]
    pub lang: String,
    pub search: Option<String>,
    pub department: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn default_lang() -> String {
    translations::DEFAULT_LANG.to_string()
}

/// POST /api/v1/doctors
///
/// The slug is derived from the English display name (falling back to the
/// email local part) and de-duplicated with numeric suffixes.
pub async fn create(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Json(input): Json<CreateDoctor>,
) -> AppResult<(StatusCode, Json<DoctorDetail>)> {
    if input.email.trim().is_empty() {
        return Err(AppError::BadRequest("Email is required".into()));
    }
    translations::validate(&input.translations)?;

    if DoctorRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "A doctor with this email already exists".into(),
        )));
    }

    let slug_base = slug_source(&input);
    let slug = DoctorRepo::next_free_slug(&state.pool, &slug_base).await?;

    let detail = DoctorRepo::create(&state.pool, &input, &slug).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/v1/doctors
pub async fn list(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Query(params): Query<DoctorListParams>,
) -> AppResult<Json<Vec<Doctor>>> {
    let filter = DoctorFilter {
        search: params.search,
        department: params.department,
        lang: params.lang,
        limit: params.limit,
        offset: params.offset,
    };
    let doctors = DoctorRepo::list(&state.pool, &filter).await?;
    Ok(Json(doctors))
}

/// GET /api/v1/doctors/{id}
///
/// Returns the doctor with all collections; `translations` is resolved to
/// the requested language (fallback English).
pub async fn get_by_id(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<LangParams>,
) -> AppResult<Json<DoctorDetail>> {
    let doctor = DoctorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Doctor",
            id,
        }))?;
    Ok(Json(resolved_detail(&state, doctor, &params.lang).await?))
}

/// GET /api/v1/doctors/slug/{slug}
pub async fn get_by_slug(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<LangParams>,
) -> AppResult<Json<DoctorDetail>> {
    let doctor = DoctorRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No doctor with slug '{slug}'")))?;
    Ok(Json(resolved_detail(&state, doctor, &params.lang).await?))
}

/// PUT /api/v1/doctors/{id}
pub async fn update(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDoctor>,
) -> AppResult<Json<DoctorDetail>> {
    if let Some(t) = &input.translations {
        translations::validate(t)?;
    }

    let detail = DoctorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Doctor",
            id,
        }))?;
    Ok(Json(detail))
}

/// DELETE /api/v1/doctors/{id}
pub async fn delete(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = DoctorRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Doctor",
            id,
        }))
    }
}

/// GET /api/v1/doctors/{id}/schedule
pub async fn schedule(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<ScheduleEntry>>> {
    if DoctorRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Doctor",
            id,
        }));
    }
    let entries = DoctorRepo::schedule_of(&state.pool, id).await?;
    Ok(Json(entries))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Pick the slug source: English name if present, otherwise the email
/// local part.
fn slug_source(input: &CreateDoctor) -> String {
    let from_name = input
        .translations
        .get(translations::DEFAULT_LANG)
        .and_then(|block| block.get("name"))
        .and_then(|name| name.as_str())
        .map(slugify)
        .filter(|s| !s.is_empty());

    from_name.unwrap_or_else(|| {
        let local = input.email.split('@').next().unwrap_or(&input.email);
        slugify(local)
    })
}

/// Load the detail view with `translations` resolved for one language.
async fn resolved_detail(
    state: &AppState,
    mut doctor: Doctor,
    lang: &str,
) -> AppResult<DoctorDetail> {
    doctor.translations = translations::resolve(&doctor.translations, lang).clone();
    Ok(DoctorRepo::load_detail(&state.pool, doctor).await?)
}
