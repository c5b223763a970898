//! Handlers for the `/patients` resource.
//!
//! Create and update accept multipart forms because the dashboard submits
//! the photo together with the fields. Creation find-or-creates the owning
//! site user by mobile number, so walk-in patients registered at the desk
//! get an account they can later claim via OTP login.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;

use carelink_core::booking::normalize_blood_group;
use carelink_core::error::CoreError;
use carelink_core::types::DbId;
use carelink_core::uploads::IMAGE_EXTENSIONS;
use carelink_db::models::patient::{CreatePatient, Patient, UpdatePatient};
use carelink_db::repositories::{PatientRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::api_key::ApiKeyGuard;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::uploads::{save_upload, SavedUpload};

/// Fields collected from the multipart form (all optional at parse time;
/// requiredness is checked per operation).
#[derive(Debug, Default)]
struct PatientForm {
    name: Option<String>,
    phone_number: Option<String>,
    email: Option<String>,
    gender: Option<String>,
    blood_group: Option<String>,
    date_of_birth: Option<NaiveDate>,
    age: Option<i32>,
    weight: Option<f64>,
    height: Option<f64>,
    medical_history: Option<String>,
    image: Option<SavedUpload>,
}

/// POST /api/v1/patients
pub async fn create(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Patient>)> {
    let form = read_form(&state, multipart).await?;

    let name = form
        .name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Name and phone number are required".into()))?;
    let phone_number = form
        .phone_number
        .clone()
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Name and phone number are required".into()))?;

    // The owning account is keyed by the phone number.
    let user = UserRepo::find_or_create(&state.pool, &name, &phone_number).await?;

    let input = CreatePatient {
        user_id: user.id,
        name,
        phone_number,
        email: form.email,
        gender: form.gender,
        blood_group: form.blood_group,
        date_of_birth: form.date_of_birth,
        age: form.age,
        weight: form.weight,
        height: form.height,
        medical_history: form.medical_history,
        image: form.image.map(|i| i.public_path),
    };

    let patient = PatientRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(patient)))
}

/// GET /api/v1/patients
pub async fn list(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Patient>>> {
    let patients = PatientRepo::list(&state.pool).await?;
    Ok(Json(patients))
}

/// GET /api/v1/patients/{id}
pub async fn get_by_id(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Patient>> {
    let patient = PatientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Patient",
            id,
        }))?;
    Ok(Json(patient))
}

/// PUT /api/v1/patients/{id}
pub async fn update(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<Patient>> {
    let form = read_form(&state, multipart).await?;

    let input = UpdatePatient {
        name: form.name,
        phone_number: form.phone_number,
        email: form.email,
        gender: form.gender,
        blood_group: form.blood_group,
        date_of_birth: form.date_of_birth,
        age: form.age,
        weight: form.weight,
        height: form.height,
        medical_history: form.medical_history,
        image: form.image.map(|i| i.public_path),
    };

    let patient = PatientRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Patient",
            id,
        }))?;
    Ok(Json(patient))
}

/// DELETE /api/v1/patients/{id}
pub async fn delete(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PatientRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Patient",
            id,
        }))
    }
}

/// GET /api/v1/my/patients
///
/// The patient records owned by the logged-in site user.
pub async fn list_own(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<Patient>>> {
    let patients = PatientRepo::list_by_user(&state.pool, auth.user_id).await?;
    Ok(Json(patients))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Read the multipart form into a [`PatientForm`], storing the image (if
/// any) and normalizing typed fields as they arrive.
async fn read_form(state: &AppState, mut multipart: Multipart) -> AppResult<PatientForm> {
    let mut form = PatientForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "image" {
            let original = field.file_name().unwrap_or("image").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            form.image = Some(
                save_upload(&state.config.upload_dir, &original, &data, IMAGE_EXTENSIONS).await?,
            );
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        if text.is_empty() {
            continue;
        }

        match name.as_str() {
            "name" => form.name = Some(text),
            "phone_number" => form.phone_number = Some(text),
            "email" => form.email = Some(text),
            "gender" => form.gender = Some(text),
            "blood_group" => form.blood_group = Some(normalize_blood_group(&text)?),
            "date_of_birth" => {
                form.date_of_birth = Some(text.parse().map_err(|_| {
                    AppError::BadRequest(format!("'{text}' is not a valid date (YYYY-MM-DD)"))
                })?);
            }
            "age" => form.age = Some(parse_number(&name, &text)?),
            "weight" => form.weight = Some(parse_number(&name, &text)?),
            "height" => form.height = Some(parse_number(&name, &text)?),
            "medical_history" => form.medical_history = Some(text),
            _ => {}
        }
    }

    Ok(form)
}

fn parse_number<T: std::str::FromStr>(field: &str, text: &str) -> AppResult<T> {
    text.parse()
        .map_err(|_| AppError::BadRequest(format!("'{text}' is not a valid value for {field}")))
}
