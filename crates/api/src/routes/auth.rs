//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /send-otp   -> send_otp (public)
/// POST /register   -> register (public)
/// POST /login      -> login (public)
/// GET  /profile    -> profile (requires auth)
/// POST /logout     -> logout (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/send-otp", post(auth::send_otp))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/profile", get(auth::profile))
        .route("/logout", post(auth::logout))
}
