//! Route definitions for appointments.

use axum::routing::get;
use axum::Router;

use crate::handlers::appointment;
use crate::state::AppState;

/// Admin routes mounted at `/appointments` (API key).
///
/// ```text
/// GET    /      -> list (joined doctor + patient)
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(appointment::list).post(appointment::create))
        .route(
            "/{id}",
            get(appointment::get_by_id)
                .put(appointment::update)
                .delete(appointment::delete),
        )
}

/// Patient self-service routes mounted at `/my/appointments` (JWT).
///
/// ```text
/// GET  /  -> list_own
/// POST /  -> book_own
/// ```
pub fn my_router() -> Router<AppState> {
    Router::new().route("/", get(appointment::list_own).post(appointment::book_own))
}
