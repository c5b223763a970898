//! Blog post entity and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use carelink_core::types::{DbId, Timestamp};

/// A blog row. Title, body, and slug live per-language in `translations`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Blog {
    pub id: DbId,
    pub translations: serde_json::Value,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Values written on blog insert. Built by the handler from the multipart
/// form (`translations` JSON field plus an optional image upload).
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub translations: serde_json::Value,
    pub image: Option<String>,
}

/// Values applied on blog update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct BlogChanges {
    pub translations: Option<serde_json::Value>,
    pub image: Option<String>,
}
