//! Route definitions for the `/blogs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::blog;
use crate::state::AppState;

/// Routes mounted at `/blogs`. All require the API key; create and update
/// take multipart forms (`translations` JSON field + optional `image`).
///
/// ```text
/// GET    /             -> list
/// POST   /             -> create (multipart)
/// GET    /{id}         -> get_by_id
/// PUT    /{id}         -> update (multipart)
/// DELETE /{id}         -> delete
/// GET    /slug/{slug}  -> get_by_slug
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(blog::list).post(blog::create))
        .route(
            "/{id}",
            get(blog::get_by_id).put(blog::update).delete(blog::delete),
        )
        .route("/slug/{slug}", get(blog::get_by_slug))
}
