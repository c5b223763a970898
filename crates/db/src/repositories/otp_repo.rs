//! Repository for the `otp_codes` table.

use sqlx::PgPool;

use carelink_core::types::{DbId, Timestamp};

use crate::models::otp::OtpCode;

const COLUMNS: &str = "id, mobile, code, expires_at, is_used, created_at";

/// Stores and verifies one-time codes, one active code per mobile number.
pub struct OtpRepo;

impl OtpRepo {
    /// Insert or replace the code for a mobile number. A fresh request
    /// always resets `is_used` and the expiry.
    pub async fn upsert(
        pool: &PgPool,
        mobile: &str,
        code: &str,
        expires_at: Timestamp,
    ) -> Result<OtpCode, sqlx::Error> {
        let query = format!(
            "INSERT INTO otp_codes (mobile, code, expires_at)
             VALUES ($1, $2, $3)
             ON CONFLICT (mobile) DO UPDATE
                SET code = $2, expires_at = $3, is_used = FALSE, created_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OtpCode>(&query)
            .bind(mobile)
            .bind(code)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find an unused, unexpired code matching the mobile/code pair.
    pub async fn find_valid(
        pool: &PgPool,
        mobile: &str,
        code: &str,
    ) -> Result<Option<OtpCode>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM otp_codes
             WHERE mobile = $1 AND code = $2 AND is_used = FALSE AND expires_at >= NOW()"
        );
        sqlx::query_as::<_, OtpCode>(&query)
            .bind(mobile)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Mark a code as consumed. Returns `true` if a row was updated.
    pub async fn mark_used(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE otp_codes SET is_used = TRUE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
