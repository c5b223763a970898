//! Repository for the `blogs` table.

use sqlx::PgPool;

use carelink_core::types::DbId;

use crate::models::blog::{Blog, BlogChanges, NewBlog};

const COLUMNS: &str = "id, translations, image, created_at, updated_at";

/// Provides CRUD operations for blog posts.
pub struct BlogRepo;

impl BlogRepo {
    /// Insert a new blog, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewBlog) -> Result<Blog, sqlx::Error> {
        let query = format!(
            "INSERT INTO blogs (translations, image) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(&input.translations)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    /// Find a blog by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blogs WHERE id = $1");
        sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a blog whose slug matches in any language
    /// (`translations->{lang}->>'slug'`).
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blogs
             WHERE EXISTS (
                 SELECT 1 FROM jsonb_each(translations) AS t
                 WHERE t.value->>'slug' = $1)
             LIMIT 1"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List all blogs, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Blog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blogs ORDER BY created_at DESC");
        sqlx::query_as::<_, Blog>(&query).fetch_all(pool).await
    }

    /// Update a blog. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &BlogChanges,
    ) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!(
            "UPDATE blogs SET
                translations = COALESCE($2, translations),
                image = COALESCE($3, image),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .bind(&input.translations)
            .bind(&input.image)
            .fetch_optional(pool)
            .await
    }

    /// Delete a blog by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
