//! Handlers for the `/auth` resource: OTP request, registration, login,
//! profile, and logout.
//!
//! There are no passwords. A user proves control of their mobile number by
//! echoing back the one-time code; login then issues a long-lived JWT.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use carelink_core::error::CoreError;
use carelink_core::otp::{generate_code, normalize_mobile, OTP_EXPIRY_MINS};
use carelink_core::types::DbId;
use carelink_db::models::otp::OtpCode;
use carelink_db::models::user::{CreateUser, User};
use carelink_db::repositories::{OtpRepo, UserRepo};

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/send-otp`.
#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    pub mobile: String,
}

/// Response for `POST /auth/send-otp`.
#[derive(Debug, Serialize)]
pub struct SendOtpResponse {
    /// Whether the code left through at least one channel (SMS or email).
    /// `false` means no delivery channel is configured; the code is stored
    /// and can still be verified (useful in development).
    pub delivered: bool,
    /// Seconds until the code expires.
    pub expires_in: i64,
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub mobile: String,
    pub otp: String,
    pub email: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub mobile: String,
    pub otp: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: User,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/send-otp
///
/// Generate a fresh code for the mobile number and dispatch it. A repeat
/// request replaces the previous code.
pub async fn send_otp(
    State(state): State<AppState>,
    Json(input): Json<SendOtpRequest>,
) -> AppResult<Json<SendOtpResponse>> {
    let mobile = normalize_mobile(&input.mobile)?;

    let code = generate_code();
    let expires_at = Utc::now() + Duration::minutes(OTP_EXPIRY_MINS);
    OtpRepo::upsert(&state.pool, &mobile, &code, expires_at).await?;

    let mut delivered = false;

    if let Some(sms) = &state.sms {
        sms.send_otp(&mobile, &code).await?;
        delivered = true;
    }

    // Email is a secondary channel for users that registered an address.
    if let Some(mailer) = &state.mailer {
        if let Some(user) = UserRepo::find_by_mobile(&state.pool, &mobile).await? {
            if let Some(email) = &user.email {
                mailer.send_otp(email, &code).await?;
                delivered = true;
            }
        }
    }

    if !delivered {
        tracing::warn!(%mobile, "no delivery channel configured; OTP stored but not sent");
    }

    Ok(Json(SendOtpResponse {
        delivered,
        expires_in: OTP_EXPIRY_MINS * 60,
    }))
}

/// POST /api/v1/auth/register
///
/// Create an account after OTP verification. The code is consumed whether
/// or not it has been used for login before; each code verifies once.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".into()));
    }
    let mobile = normalize_mobile(&input.mobile)?;

    let otp = verify_code(&state, &mobile, &input.otp).await?;

    if UserRepo::find_by_mobile(&state.pool, &mobile).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "A user with this mobile number already exists".into(),
        )));
    }

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name.trim().to_string(),
            mobile,
            email: input.email,
        },
    )
    .await?;

    OtpRepo::mark_used(&state.pool, otp.id).await?;

    tracing::info!(user_id = user.id, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/v1/auth/login
///
/// Verify the OTP and issue an access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let mobile = normalize_mobile(&input.mobile)?;

    let otp = verify_code(&state, &mobile, &input.otp).await?;

    let user = UserRepo::find_by_mobile(&state.pool, &mobile)
        .await?
        .ok_or_else(|| AppError::NotFound("No account exists for this mobile number".into()))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    OtpRepo::mark_used(&state.pool, otp.id).await?;

    let access_token = generate_access_token(user.id, &user.mobile, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.expiry_days * 24 * 60 * 60,
        user,
    }))
}

/// GET /api/v1/auth/profile
pub async fn profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;
    Ok(Json(user))
}

/// POST /api/v1/auth/logout
///
/// Tokens are stateless, so logout is an acknowledgement; clients drop the
/// token.
pub async fn logout(user: AuthUser) -> StatusCode {
    tracing::info!(user_id = user.user_id, "user logged out");
    StatusCode::NO_CONTENT
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Look up an unused, unexpired code for the mobile/code pair.
async fn verify_code(state: &AppState, mobile: &str, code: &str) -> AppResult<OtpCode> {
    OtpRepo::find_valid(&state.pool, mobile, code)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid or expired OTP".into()))
}

/// Convenience used by booking flows that need the full user row.
pub async fn load_user(state: &AppState, user_id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))
}
