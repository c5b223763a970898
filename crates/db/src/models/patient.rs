//! Patient entity and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use carelink_core::types::{DbId, Timestamp};

/// A patient row. Every patient belongs to a site user (the account that
/// books for them).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Patient {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub medical_history: Option<String>,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a patient. `user_id` is resolved by the caller
/// (find-or-create by mobile number, or the authenticated user).
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePatient {
    #[serde(skip)]
    pub user_id: DbId,
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub medical_history: Option<String>,
    #[serde(skip)]
    pub image: Option<String>,
}

/// DTO for updating a patient. Absent fields keep their current values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePatient {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub medical_history: Option<String>,
    #[serde(skip)]
    pub image: Option<String>,
}
