//! Route definitions for the `/reviews` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::review;
use crate::state::AppState;

/// Routes mounted at `/reviews`. All require the API key.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(review::list).post(review::create))
        .route(
            "/{id}",
            get(review::get_by_id)
                .put(review::update)
                .delete(review::delete),
        )
}
