pub mod appointment;
pub mod auth;
pub mod blog;
pub mod category;
pub mod content;
pub mod department;
pub mod doctor;
pub mod health;
pub mod page;
pub mod patient;
pub mod review;
pub mod schedule;
pub mod user;
pub mod voice;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/send-otp                      request an OTP (public)
/// /auth/register                      register after OTP (public)
/// /auth/login                         login with OTP (public)
/// /auth/profile                       own profile (JWT)
/// /auth/logout                        logout (JWT)
/// /users/profile                      update own profile (JWT, multipart)
///
/// /doctors                            list, create (api-key)
/// /doctors/{id}                       get, update, delete
/// /doctors/{id}/schedule              weekly schedule
/// /doctors/slug/{slug}                get by slug
/// /schedules/{id}/time-slots          bookable slots
/// /departments[...]                   CRUD (api-key)
/// /patients[...]                      CRUD (api-key, multipart)
/// /appointments[...]                  admin CRUD (api-key)
/// /my/appointments                    own bookings (JWT)
/// /my/patients                        own patient records (JWT)
///
/// /reviews[...]                       CRUD (api-key)
/// /blogs[...]                         CRUD + slug lookup (api-key, multipart)
/// /categories[...]                    CRUD (api-key)
/// /pages[...]                         CRUD + search (api-key)
/// /content/header|footer|homepage|about   singleton site sections (api-key)
///
/// /voice/train                        train a custom voice
/// /voice/generate                     synthesize speech
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", user::router())
        .nest("/doctors", doctor::router())
        .nest("/schedules", schedule::router())
        .nest("/departments", department::router())
        .nest("/patients", patient::router())
        .nest("/appointments", appointment::router())
        .nest("/my/appointments", appointment::my_router())
        .nest("/my/patients", patient::my_router())
        .nest("/reviews", review::router())
        .nest("/blogs", blog::router())
        .nest("/categories", category::router())
        .nest("/pages", page::router())
        .nest("/content", content::router())
        .nest("/voice", voice::router())
}
