//! Repository for the `users` table.

use sqlx::PgPool;

use carelink_core::types::DbId;

use crate::models::user::{CreateUser, UpdateUserProfile, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, mobile, email, username, profile_photo, is_active, created_at, updated_at";

/// Provides CRUD operations for site users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, mobile, email)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.mobile)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by mobile number.
    pub async fn find_by_mobile(pool: &PgPool, mobile: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE mobile = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(mobile)
            .fetch_optional(pool)
            .await
    }

    /// Find the user for a mobile number, creating a bare account when none
    /// exists. Used by walk-in appointment booking.
    pub async fn find_or_create(
        pool: &PgPool,
        name: &str,
        mobile: &str,
    ) -> Result<User, sqlx::Error> {
        if let Some(user) = Self::find_by_mobile(pool, mobile).await? {
            return Ok(user);
        }
        Self::create(
            pool,
            &CreateUser {
                name: name.to_string(),
                mobile: mobile.to_string(),
                email: None,
            },
        )
        .await
    }

    /// Update profile fields. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUserProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                username = COALESCE($3, username),
                profile_photo = COALESCE($4, profile_photo),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.username)
            .bind(&input.profile_photo)
            .fetch_optional(pool)
            .await
    }
}
