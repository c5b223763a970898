//! Route definitions for the authenticated user's own account.

use axum::routing::put;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// PUT /profile  -> update_profile (requires auth, multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/profile", put(user::update_profile))
}
