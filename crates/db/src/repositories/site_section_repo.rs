//! Repository for the singleton `site_sections` rows.

use sqlx::PgPool;

use crate::models::site_section::{SectionKind, SiteSection};

const COLUMNS: &str = "id, kind, translations, logo, contact_icon, created_at, updated_at";

/// Fields applied on section update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct SectionChanges {
    pub translations: Option<serde_json::Value>,
    pub logo: Option<String>,
    pub contact_icon: Option<String>,
}

/// Provides access to the header/footer/homepage/about singletons.
pub struct SiteSectionRepo;

impl SiteSectionRepo {
    /// Fetch the row for a section kind, if it has been created.
    pub async fn find(pool: &PgPool, kind: SectionKind) -> Result<Option<SiteSection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM site_sections WHERE kind = $1");
        sqlx::query_as::<_, SiteSection>(&query)
            .bind(kind.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Insert the row for a section kind. Fails on the unique constraint
    /// if the section already exists.
    pub async fn create(
        pool: &PgPool,
        kind: SectionKind,
        translations: &serde_json::Value,
        logo: Option<&str>,
        contact_icon: Option<&str>,
    ) -> Result<SiteSection, sqlx::Error> {
        let query = format!(
            "INSERT INTO site_sections (kind, translations, logo, contact_icon)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteSection>(&query)
            .bind(kind.as_str())
            .bind(translations)
            .bind(logo)
            .bind(contact_icon)
            .fetch_one(pool)
            .await
    }

    /// Update a section. Only non-`None` fields are applied.
    ///
    /// Returns `None` if the section has not been created yet.
    pub async fn update(
        pool: &PgPool,
        kind: SectionKind,
        changes: &SectionChanges,
    ) -> Result<Option<SiteSection>, sqlx::Error> {
        let query = format!(
            "UPDATE site_sections SET
                translations = COALESCE($2, translations),
                logo = COALESCE($3, logo),
                contact_icon = COALESCE($4, contact_icon),
                updated_at = NOW()
             WHERE kind = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteSection>(&query)
            .bind(kind.as_str())
            .bind(&changes.translations)
            .bind(&changes.logo)
            .bind(&changes.contact_icon)
            .fetch_optional(pool)
            .await
    }
}
