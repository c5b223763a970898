//! Repository for the `pages` table.

use sqlx::PgPool;

use carelink_core::types::DbId;

use crate::models::page::{CreatePage, Page, PageFilter};
use crate::repositories::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, translations, created_at, updated_at";

/// Title-search condition shared by the list and count queries.
const SEARCH_CONDITION: &str = "($1::text IS NULL OR EXISTS (
    SELECT 1 FROM jsonb_each(translations) AS t
    WHERE t.value->>'title' ILIKE '%' || $1 || '%'))";

/// Provides CRUD operations for static pages.
pub struct PageRepo;

impl PageRepo {
    /// Insert a new page, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePage) -> Result<Page, sqlx::Error> {
        let query = format!("INSERT INTO pages (translations) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Page>(&query)
            .bind(&input.translations)
            .fetch_one(pool)
            .await
    }

    /// Find a page by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE id = $1");
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List pages with optional title search and pagination, newest first.
    /// Returns the matching rows and the total match count.
    pub async fn list(pool: &PgPool, filter: &PageFilter) -> Result<(Vec<Page>, i64), sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pages
             WHERE {SEARCH_CONDITION}
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, Page>(&query)
            .bind(&filter.search)
            .bind(clamp_limit(filter.limit))
            .bind(clamp_offset(filter.offset))
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM pages WHERE {SEARCH_CONDITION}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&filter.search)
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }

    /// Replace the stored translations payload (the caller merges).
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_translations(
        pool: &PgPool,
        id: DbId,
        translations: &serde_json::Value,
    ) -> Result<Option<Page>, sqlx::Error> {
        let query = format!(
            "UPDATE pages SET translations = $2, updated_at = NOW()
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .bind(translations)
            .fetch_optional(pool)
            .await
    }

    /// Delete a page by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
