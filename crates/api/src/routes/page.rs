//! Route definitions for the `/pages` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::page;
use crate::state::AppState;

/// Routes mounted at `/pages`. All require the API key.
///
/// ```text
/// GET    /      -> list (?search=&limit=&offset=, returns total)
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update (merges languages)
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(page::list).post(page::create))
        .route(
            "/{id}",
            get(page::get_by_id).put(page::update).delete(page::delete),
        )
}
