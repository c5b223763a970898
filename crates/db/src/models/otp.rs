//! One-time-code model.

use sqlx::FromRow;

use carelink_core::types::{DbId, Timestamp};

/// A row from `otp_codes`. One row per mobile number; re-requesting a code
/// overwrites the previous one.
#[derive(Debug, Clone, FromRow)]
pub struct OtpCode {
    pub id: DbId,
    pub mobile: String,
    pub code: String,
    pub expires_at: Timestamp,
    pub is_used: bool,
    pub created_at: Timestamp,
}
