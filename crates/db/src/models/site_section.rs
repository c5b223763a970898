//! Singleton site content sections (header, footer, homepage, about).

use serde::Serialize;
use sqlx::FromRow;

use carelink_core::types::{DbId, Timestamp};

/// The four singleton sections. Stored in one table keyed by `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Header,
    Footer,
    Homepage,
    About,
}

impl SectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Header => "header",
            SectionKind::Footer => "footer",
            SectionKind::Homepage => "homepage",
            SectionKind::About => "about",
        }
    }
}

/// A `site_sections` row. `logo` and `contact_icon` are only used by the
/// header; the other sections keep their image paths inside the
/// translations payload.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SiteSection {
    pub id: DbId,
    #[serde(skip)]
    pub kind: String,
    pub translations: serde_json::Value,
    pub logo: Option<String>,
    pub contact_icon: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
