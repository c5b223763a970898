//! Route definitions for the `/patients` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::patient;
use crate::state::AppState;

/// Routes mounted at `/patients`. All require the API key; create and
/// update take multipart forms (optional `image` file).
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create (multipart)
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update (multipart)
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(patient::list).post(patient::create))
        .route(
            "/{id}",
            get(patient::get_by_id)
                .put(patient::update)
                .delete(patient::delete),
        )
}

/// Self-service routes mounted at `/my/patients` (JWT).
///
/// ```text
/// GET /  -> list_own
/// ```
pub fn my_router() -> Router<AppState> {
    Router::new().route("/", get(patient::list_own))
}
