//! Site user model and DTOs (OTP-registered website accounts).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use carelink_core::types::{DbId, Timestamp};

/// A user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub mobile: String,
    pub email: Option<String>,
    pub username: Option<String>,
    pub profile_photo: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user after OTP verification.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub mobile: String,
    pub email: Option<String>,
}

/// DTO for profile updates. All fields optional; absent fields keep their
/// current values.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserProfile {
    pub name: Option<String>,
    pub username: Option<String>,
    pub profile_photo: Option<String>,
}
