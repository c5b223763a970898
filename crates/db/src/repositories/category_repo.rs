//! Repository for the `categories` table.

use sqlx::PgPool;

use carelink_core::types::DbId;

use crate::models::category::{Category, CreateCategory};

const COLUMNS: &str = "id, translations, created_at, updated_at";

/// Provides CRUD operations for blog categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (translations) VALUES ($1) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.translations)
            .fetch_one(pool)
            .await
    }

    /// Find a category by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all categories, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY created_at DESC");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Replace the stored translations payload (the caller merges).
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_translations(
        pool: &PgPool,
        id: DbId,
        translations: &serde_json::Value,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET translations = $2, updated_at = NOW()
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(translations)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
