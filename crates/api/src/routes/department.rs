//! Route definitions for the `/departments` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::department;
use crate::state::AppState;

/// Routes mounted at `/departments`. All require the API key.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// GET    /{id}  -> get_by_id (?lang=)
/// PUT    /{id}  -> update (merges languages)
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(department::list).post(department::create))
        .route(
            "/{id}",
            get(department::get_by_id)
                .put(department::update)
                .delete(department::delete),
        )
}
