//! Handlers for the `/blogs` resource.
//!
//! Create and update are multipart: a `translations` JSON field plus an
//! optional `image` file.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;

use carelink_core::error::CoreError;
use carelink_core::translations;
use carelink_core::types::DbId;
use carelink_core::uploads::IMAGE_EXTENSIONS;
use carelink_db::models::blog::{Blog, BlogChanges, NewBlog};
use carelink_db::repositories::BlogRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::api_key::ApiKeyGuard;
use crate::state::AppState;
use crate::uploads::{save_upload, SavedUpload};

/// Fields collected from the multipart form.
#[derive(Debug, Default)]
struct BlogForm {
    translations: Option<serde_json::Value>,
    image: Option<SavedUpload>,
}

/// POST /api/v1/blogs
pub async fn create(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Blog>)> {
    let form = read_form(&state, multipart).await?;

    let translations = form
        .translations
        .ok_or_else(|| AppError::BadRequest("translations field is required".into()))?;
    translations::validate(&translations)?;

    let blog = BlogRepo::create(
        &state.pool,
        &NewBlog {
            translations,
            image: form.image.map(|i| i.public_path),
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(blog)))
}

/// GET /api/v1/blogs
pub async fn list(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Blog>>> {
    let blogs = BlogRepo::list(&state.pool).await?;
    Ok(Json(blogs))
}

/// GET /api/v1/blogs/{id}
pub async fn get_by_id(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Blog>> {
    let blog = BlogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Blog", id }))?;
    Ok(Json(blog))
}

/// GET /api/v1/blogs/slug/{slug}
///
/// Matches the slug against every language's `slug` field.
pub async fn get_by_slug(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Blog>> {
    let blog = BlogRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No blog with slug '{slug}'")))?;
    Ok(Json(blog))
}

/// PUT /api/v1/blogs/{id}
pub async fn update(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<Blog>> {
    let form = read_form(&state, multipart).await?;

    if let Some(t) = &form.translations {
        translations::validate(t)?;
    }

    let blog = BlogRepo::update(
        &state.pool,
        id,
        &BlogChanges {
            translations: form.translations,
            image: form.image.map(|i| i.public_path),
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound { entity: "Blog", id }))?;
    Ok(Json(blog))
}

/// DELETE /api/v1/blogs/{id}
pub async fn delete(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = BlogRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Blog", id }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn read_form(state: &AppState, mut multipart: Multipart) -> AppResult<BlogForm> {
    let mut form = BlogForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "translations" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.translations = Some(serde_json::from_str(&text).map_err(|e| {
                    AppError::BadRequest(format!("translations is not valid JSON: {e}"))
                })?);
            }
            "image" => {
                let original = field.file_name().unwrap_or("image").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.image = Some(
                    save_upload(&state.config.upload_dir, &original, &data, IMAGE_EXTENSIONS)
                        .await?,
                );
            }
            _ => {}
        }
    }

    Ok(form)
}
