//! Route definitions for the singleton site sections under `/content`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::site_content;
use crate::state::AppState;

/// Routes mounted at `/content`. All require the API key.
///
/// ```text
/// GET  /header                        -> get_header
/// POST /header                        -> create_header (multipart, create-once)
/// PUT  /header                        -> update_header (multipart, merges)
///
/// GET  /footer                        -> get_footer
/// POST /footer                        -> upsert_footer (multipart, per language)
///
/// GET  /homepage                      -> get_homepage (?section=&lang=)
/// POST /homepage                      -> create_homepage (create-once)
/// PUT  /homepage/{section}            -> update_homepage_section
/// POST /homepage/{section}/image      -> upload_homepage_section_image (multipart)
/// POST /homepage/copy-translations    -> copy_homepage_translations
///
/// GET  /about                         -> get_about
/// POST /about                         -> upsert_about (multipart, per language)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/header",
            get(site_content::get_header)
                .post(site_content::create_header)
                .put(site_content::update_header),
        )
        .route(
            "/footer",
            get(site_content::get_footer).post(site_content::upsert_footer),
        )
        .route(
            "/homepage",
            get(site_content::get_homepage).post(site_content::create_homepage),
        )
        .route(
            "/homepage/copy-translations",
            post(site_content::copy_homepage_translations),
        )
        .route(
            "/homepage/{section}",
            put(site_content::update_homepage_section),
        )
        .route(
            "/homepage/{section}/image",
            post(site_content::upload_homepage_section_image),
        )
        .route(
            "/about",
            get(site_content::get_about).post(site_content::upsert_about),
        )
}
