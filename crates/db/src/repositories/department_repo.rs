//! Repository for the `departments` table.

use sqlx::PgPool;

use carelink_core::types::DbId;

use crate::models::department::{CreateDepartment, Department};

const COLUMNS: &str = "id, translations, created_at, updated_at";

/// Provides CRUD operations for departments.
pub struct DepartmentRepo;

impl DepartmentRepo {
    /// Insert a new department, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDepartment,
    ) -> Result<Department, sqlx::Error> {
        let query = format!(
            "INSERT INTO departments (translations) VALUES ($1) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(&input.translations)
            .fetch_one(pool)
            .await
    }

    /// Find a department by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Department>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM departments WHERE id = $1");
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all departments, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Department>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM departments ORDER BY created_at DESC");
        sqlx::query_as::<_, Department>(&query).fetch_all(pool).await
    }

    /// Replace the stored translations payload (the caller merges).
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_translations(
        pool: &PgPool,
        id: DbId,
        translations: &serde_json::Value,
    ) -> Result<Option<Department>, sqlx::Error> {
        let query = format!(
            "UPDATE departments SET translations = $2, updated_at = NOW()
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .bind(translations)
            .fetch_optional(pool)
            .await
    }

    /// Delete a department by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
