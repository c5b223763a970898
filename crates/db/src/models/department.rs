//! Department entity and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use carelink_core::types::{DbId, Timestamp};

/// A department row. All display fields live in the per-language
/// `translations` payload.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Department {
    pub id: DbId,
    pub translations: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a department.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDepartment {
    pub translations: serde_json::Value,
}

/// DTO for updating a department. The submitted language blocks are merged
/// over the stored ones.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDepartment {
    pub translations: serde_json::Value,
}
