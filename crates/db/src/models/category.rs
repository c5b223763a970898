//! Blog category entity and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use carelink_core::types::{DbId, Timestamp};

/// A category row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub translations: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub translations: serde_json::Value,
}

/// DTO for updating a category; merged per language key.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCategory {
    pub translations: serde_json::Value,
}
