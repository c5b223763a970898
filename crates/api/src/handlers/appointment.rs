//! Handlers for appointments: the admin CRUD surface (`/appointments`,
//! api-key) and the patient self-service surface (`/my/appointments`, JWT).

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use carelink_core::booking::{
    normalize_blood_group, AppointmentStatus, ConsultationType, PaymentMethod,
};
use carelink_core::error::CoreError;
use carelink_core::translations;
use carelink_core::types::DbId;
use carelink_db::models::appointment::{
    Appointment, AppointmentChanges, AppointmentDetail, BookAppointmentRequest,
    CreateAppointmentRequest, NewAppointment, UpdateAppointmentRequest,
};
use carelink_db::models::patient::{CreatePatient, Patient};
use carelink_db::repositories::{AppointmentRepo, DoctorRepo, PatientRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::auth::load_user;
use crate::middleware::api_key::ApiKeyGuard;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Admin surface
// ---------------------------------------------------------------------------

/// POST /api/v1/appointments
///
/// Resolves the patient record before insert: an explicit `patient_id` is
/// verified; otherwise the mobile number find-or-creates a site user and,
/// if that account has no patient yet, a bare patient record.
pub async fn create(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Json(input): Json<CreateAppointmentRequest>,
) -> AppResult<(StatusCode, Json<Appointment>)> {
    if input.doctor_name.trim().is_empty()
        || input.patient_name.trim().is_empty()
        || input.mobile_number.trim().is_empty()
    {
        return Err(AppError::BadRequest(
            "Doctor name, patient name, and mobile number are required".into(),
        ));
    }

    if DoctorRepo::find_by_id(&state.pool, input.doctor_id)
        .await?
        .is_none()
    {
        return Err(AppError::BadRequest("Doctor not found".into()));
    }

    let patient = resolve_patient(&state, &input).await?;

    let new_appointment = NewAppointment {
        doctor_id: input.doctor_id,
        patient_id: patient.id,
        doctor_name: input.doctor_name,
        patient_name: input.patient_name,
        mobile_number: input.mobile_number,
        appointment_date: input.appointment_date,
        serial_number: input.serial_number,
        weight: input.weight,
        age: input.age,
        blood_group: normalize_optional_blood_group(input.blood_group)?,
        consultation_fee: input.consultation_fee,
        vat: input.vat,
        promo_code: input.promo_code,
        consultation_type: normalize_consultation_type(input.consultation_type)?,
        payment_method: normalize_payment_method(input.payment_method)?,
        director_reference: input.director_reference,
        reason: input.reason,
        address: input.address,
    };

    let appointment = AppointmentRepo::create(&state.pool, &new_appointment).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// GET /api/v1/appointments
///
/// Every appointment joined with its doctor and patient rows.
pub async fn list(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AppointmentDetail>>> {
    let appointments = AppointmentRepo::list(&state.pool).await?;

    let doctor_ids: Vec<DbId> = appointments.iter().map(|a| a.doctor_id).collect();
    let patient_ids: Vec<DbId> = appointments.iter().map(|a| a.patient_id).collect();

    let doctors: HashMap<DbId, _> = DoctorRepo::list_by_ids(&state.pool, &doctor_ids)
        .await?
        .into_iter()
        .map(|d| (d.id, d))
        .collect();
    let patients: HashMap<DbId, _> = PatientRepo::list_by_ids(&state.pool, &patient_ids)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let details = appointments
        .into_iter()
        .map(|appointment| AppointmentDetail {
            doctor: doctors.get(&appointment.doctor_id).cloned(),
            patient: patients.get(&appointment.patient_id).cloned(),
            appointment,
        })
        .collect();

    Ok(Json(details))
}

/// GET /api/v1/appointments/{id}
pub async fn get_by_id(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<AppointmentDetail>> {
    let appointment = AppointmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Appointment",
            id,
        }))?;

    let doctor = DoctorRepo::find_by_id(&state.pool, appointment.doctor_id).await?;
    let patient = PatientRepo::find_by_id(&state.pool, appointment.patient_id).await?;

    Ok(Json(AppointmentDetail {
        appointment,
        doctor,
        patient,
    }))
}

/// PUT /api/v1/appointments/{id}
pub async fn update(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAppointmentRequest>,
) -> AppResult<Json<Appointment>> {
    let changes = AppointmentChanges {
        doctor_name: input.doctor_name,
        patient_name: input.patient_name,
        mobile_number: input.mobile_number,
        appointment_date: input.appointment_date,
        serial_number: input.serial_number,
        weight: input.weight,
        age: input.age,
        blood_group: normalize_optional_blood_group(input.blood_group)?,
        consultation_fee: input.consultation_fee,
        vat: input.vat,
        promo_code: input.promo_code,
        consultation_type: normalize_consultation_type(input.consultation_type)?,
        payment_method: normalize_payment_method(input.payment_method)?,
        director_reference: input.director_reference,
        reason: input.reason,
        address: input.address,
        status: input
            .status
            .map(|s| AppointmentStatus::parse(&s).map(|v| v.as_str().to_string()))
            .transpose()?,
    };

    let appointment = AppointmentRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Appointment",
            id,
        }))?;
    Ok(Json(appointment))
}

/// DELETE /api/v1/appointments/{id}
pub async fn delete(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = AppointmentRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Appointment",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Patient self-service surface
// ---------------------------------------------------------------------------

/// POST /api/v1/my/appointments
///
/// Books against the caller's own patient record, creating one on first
/// booking.
pub async fn book_own(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<BookAppointmentRequest>,
) -> AppResult<(StatusCode, Json<Appointment>)> {
    let doctor = DoctorRepo::find_by_id(&state.pool, input.doctor_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("Doctor not found".into()))?;

    let user = load_user(&state, auth.user_id).await?;

    let patient = match PatientRepo::find_first_by_user(&state.pool, user.id).await? {
        Some(patient) => patient,
        None => {
            PatientRepo::create(
                &state.pool,
                &CreatePatient {
                    user_id: user.id,
                    name: input.patient_name.clone().unwrap_or_else(|| user.name.clone()),
                    phone_number: user.mobile.clone(),
                    email: user.email.clone(),
                    gender: None,
                    blood_group: None,
                    date_of_birth: None,
                    age: None,
                    weight: None,
                    height: None,
                    medical_history: None,
                    image: None,
                },
            )
            .await?
        }
    };

    let doctor_name = translations::resolve(&doctor.translations, translations::DEFAULT_LANG)
        .get("name")
        .and_then(|n| n.as_str())
        .unwrap_or(&doctor.email)
        .to_string();

    let new_appointment = NewAppointment {
        doctor_id: doctor.id,
        patient_id: patient.id,
        doctor_name,
        patient_name: input.patient_name.unwrap_or(user.name),
        mobile_number: user.mobile,
        appointment_date: input.appointment_date,
        serial_number: None,
        weight: None,
        age: None,
        blood_group: None,
        consultation_fee: doctor.appointment_fee,
        vat: None,
        promo_code: None,
        consultation_type: normalize_consultation_type(input.consultation_type)?,
        payment_method: normalize_payment_method(input.payment_method)?,
        director_reference: None,
        reason: input.reason,
        address: input.address,
    };

    let appointment = AppointmentRepo::create(&state.pool, &new_appointment).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// GET /api/v1/my/appointments
pub async fn list_own(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<Appointment>>> {
    let appointments = AppointmentRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(appointments))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the patient for an admin-created appointment.
async fn resolve_patient(
    state: &AppState,
    input: &CreateAppointmentRequest,
) -> AppResult<Patient> {
    if let (Some(patient_id), false) = (input.patient_id, input.is_new_patient) {
        return PatientRepo::find_by_id(&state.pool, patient_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("Patient not found".into()));
    }

    let user =
        UserRepo::find_or_create(&state.pool, &input.patient_name, &input.mobile_number).await?;

    if let Some(patient) = PatientRepo::find_first_by_user(&state.pool, user.id).await? {
        return Ok(patient);
    }

    Ok(PatientRepo::create(
        &state.pool,
        &CreatePatient {
            user_id: user.id,
            name: input.patient_name.clone(),
            phone_number: input.mobile_number.clone(),
            email: None,
            gender: None,
            blood_group: None,
            date_of_birth: None,
            age: None,
            weight: None,
            height: None,
            medical_history: None,
            image: None,
        },
    )
    .await?)
}

fn normalize_consultation_type(raw: Option<String>) -> AppResult<Option<String>> {
    Ok(raw
        .map(|v| ConsultationType::parse(&v).map(|t| t.as_str().to_string()))
        .transpose()?)
}

fn normalize_payment_method(raw: Option<String>) -> AppResult<Option<String>> {
    Ok(raw
        .map(|v| PaymentMethod::parse(&v).map(|m| m.as_str().to_string()))
        .transpose()?)
}

fn normalize_optional_blood_group(raw: Option<String>) -> AppResult<Option<String>> {
    Ok(raw.map(|v| normalize_blood_group(&v)).transpose()?)
}
