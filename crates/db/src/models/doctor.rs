//! Doctor entity, per-doctor collections, and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use carelink_core::types::{DbId, Timestamp};

/// A doctor row from the `doctors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Doctor {
    pub id: DbId,
    pub email: String,
    pub slug: String,
    pub profile_photo: Option<String>,
    pub translations: serde_json::Value,
    pub appointment_fee: Option<f64>,
    pub follow_up_fee: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A weekly schedule entry (`doctor_schedules` row).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScheduleEntry {
    pub id: DbId,
    pub doctor_id: DbId,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

/// A FAQ entry (`doctor_faqs` row).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DoctorFaq {
    pub id: DbId,
    pub question: String,
    pub answer: String,
}

/// A doctor together with all of its collections, as returned by the
/// detail endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorDetail {
    #[serde(flatten)]
    pub doctor: Doctor,
    pub memberships: Vec<String>,
    pub awards: Vec<String>,
    pub treatments: Vec<String>,
    pub conditions: Vec<String>,
    pub schedule: Vec<ScheduleEntry>,
    pub faqs: Vec<DoctorFaq>,
}

/// Input shape for a schedule entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleEntryInput {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

/// Input shape for a FAQ entry.
#[derive(Debug, Clone, Deserialize)]
pub struct FaqInput {
    pub question: String,
    pub answer: String,
}

/// DTO for creating a doctor. The slug is derived server-side from the
/// English name.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDoctor {
    pub email: String,
    pub profile_photo: Option<String>,
    pub translations: serde_json::Value,
    pub appointment_fee: Option<f64>,
    pub follow_up_fee: Option<f64>,
    #[serde(default)]
    pub memberships: Vec<String>,
    #[serde(default)]
    pub awards: Vec<String>,
    #[serde(default)]
    pub treatments: Vec<String>,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub schedule: Vec<ScheduleEntryInput>,
    #[serde(default)]
    pub faqs: Vec<FaqInput>,
}

/// DTO for updating a doctor. Scalar fields are partial; a collection that
/// is present replaces the stored collection wholesale.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDoctor {
    pub email: Option<String>,
    pub profile_photo: Option<String>,
    pub translations: Option<serde_json::Value>,
    pub appointment_fee: Option<f64>,
    pub follow_up_fee: Option<f64>,
    pub memberships: Option<Vec<String>>,
    pub awards: Option<Vec<String>>,
    pub treatments: Option<Vec<String>>,
    pub conditions: Option<Vec<String>>,
    pub schedule: Option<Vec<ScheduleEntryInput>>,
    pub faqs: Option<Vec<FaqInput>>,
}

/// Filters accepted by the doctor list endpoint.
#[derive(Debug, Clone, Default)]
pub struct DoctorFilter {
    /// Case-insensitive name match, checked in every language.
    pub search: Option<String>,
    /// Exact department match in the requested language.
    pub department: Option<String>,
    /// Language used for the department filter.
    pub lang: String,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
