//! Route definitions for the voice-cloning integration.

use axum::routing::post;
use axum::Router;

use crate::handlers::voice;
use crate::state::AppState;

/// Routes mounted at `/voice`.
///
/// ```text
/// POST /train     -> train (multipart audio sample)
/// POST /generate  -> generate (text to MP3)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/train", post(voice::train))
        .route("/generate", post(voice::generate))
}
