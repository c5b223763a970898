//! Handlers for the authenticated user's own profile.

use axum::extract::{Multipart, State};
use axum::Json;

use carelink_core::uploads::IMAGE_EXTENSIONS;
use carelink_db::models::user::{UpdateUserProfile, User};
use carelink_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::uploads::save_upload;

/// PUT /api/v1/users/profile
///
/// Multipart form with optional `name`, `username`, and `profile_photo`
/// (image file) fields. Absent fields keep their current values.
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<User>> {
    let mut changes = UpdateUserProfile::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "name" => {
                changes.name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            "username" => {
                changes.username = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            "profile_photo" => {
                let original = field.file_name().unwrap_or("photo").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let saved =
                    save_upload(&state.config.upload_dir, &original, &data, IMAGE_EXTENSIONS)
                        .await?;
                changes.profile_photo = Some(saved.public_path);
            }
            _ => {}
        }
    }

    let updated = UserRepo::update_profile(&state.pool, user.user_id, &changes)
        .await?
        .ok_or(AppError::Core(carelink_core::error::CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;

    Ok(Json(updated))
}
