//! Repository for the `reviews` table.

use sqlx::PgPool;

use carelink_core::types::DbId;

use crate::models::review::{CreateReview, Review, UpdateReview};

const COLUMNS: &str = "id, name, role, image, rating, review_text, created_at, updated_at";

/// Provides CRUD operations for testimonials.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a new review, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateReview) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (name, role, image, rating, review_text)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.image)
            .bind(input.rating)
            .bind(&input.review_text)
            .fetch_one(pool)
            .await
    }

    /// Find a review by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all reviews, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews ORDER BY created_at DESC");
        sqlx::query_as::<_, Review>(&query).fetch_all(pool).await
    }

    /// Update a review. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateReview,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET
                name = COALESCE($2, name),
                role = COALESCE($3, role),
                image = COALESCE($4, image),
                rating = COALESCE($5, rating),
                review_text = COALESCE($6, review_text),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.image)
            .bind(input.rating)
            .bind(&input.review_text)
            .fetch_optional(pool)
            .await
    }

    /// Delete a review by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
