//! Route definitions for the `/doctors` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::doctor;
use crate::state::AppState;

/// Routes mounted at `/doctors`. All require the API key.
///
/// ```text
/// GET    /              -> list (?lang=&search=&department=&limit=&offset=)
/// POST   /              -> create
/// GET    /{id}          -> get_by_id (?lang=)
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// GET    /{id}/schedule -> schedule
/// GET    /slug/{slug}   -> get_by_slug (?lang=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(doctor::list).post(doctor::create))
        .route(
            "/{id}",
            get(doctor::get_by_id)
                .put(doctor::update)
                .delete(doctor::delete),
        )
        .route("/{id}/schedule", get(doctor::schedule))
        .route("/slug/{slug}", get(doctor::get_by_slug))
}
