//! Static page entity and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use carelink_core::types::{DbId, Timestamp};

/// A page row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Page {
    pub id: DbId,
    pub translations: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a page.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePage {
    pub translations: serde_json::Value,
}

/// DTO for updating a page; merged per language key.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePage {
    pub translations: serde_json::Value,
}

/// Filters accepted by the page list endpoint.
#[derive(Debug, Clone, Default)]
pub struct PageFilter {
    /// Case-insensitive title match, checked in every language.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
