//! Handlers for the singleton site sections under `/content`: header,
//! footer, homepage, and the about page.
//!
//! Multipart endpoints take the text content as a JSON field plus named
//! image fields; uploaded image paths are patched into the JSON payload at
//! fixed keys before it is stored.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{Map, Value};

use carelink_core::error::CoreError;
use carelink_core::translations;
use carelink_core::uploads::IMAGE_EXTENSIONS;
use carelink_db::models::site_section::{SectionKind, SiteSection};
use carelink_db::repositories::{SectionChanges, SiteSectionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::api_key::ApiKeyGuard;
use crate::state::AppState;
use crate::uploads::{save_upload, SavedUpload};

// ---------------------------------------------------------------------------
// Multipart form
// ---------------------------------------------------------------------------

/// Fields shared by the multipart content endpoints: a target language, a
/// JSON payload, and any number of named image files.
#[derive(Debug)]
struct ContentForm {
    language: String,
    data: Option<Value>,
    files: Vec<(String, SavedUpload)>,
}

async fn read_content_form(state: &AppState, mut multipart: Multipart) -> AppResult<ContentForm> {
    let mut form = ContentForm {
        language: translations::DEFAULT_LANG.to_string(),
        data: None,
        files: Vec::new(),
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();

        // A file field carries a filename; everything else is text.
        if field.file_name().is_some() {
            let original = field.file_name().unwrap_or("image").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            let saved =
                save_upload(&state.config.upload_dir, &original, &data, IMAGE_EXTENSIONS).await?;
            form.files.push((name, saved));
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        match name.as_str() {
            "language" => form.language = text,
            "data" => {
                form.data = Some(serde_json::from_str(&text).map_err(|e| {
                    AppError::BadRequest(format!("data is not valid JSON: {e}"))
                })?);
            }
            _ => {}
        }
    }

    Ok(form)
}

impl ContentForm {
    fn file(&self, field: &str) -> Option<&SavedUpload> {
        self.files.iter().find(|(name, _)| name == field).map(|(_, f)| f)
    }
}

/// Patch an uploaded file path into a JSON object at a dotted key path
/// (e.g. `contact.logo`), creating intermediate objects as needed.
fn patch_path(block: &mut Map<String, Value>, dotted: &str, path: &str) {
    let mut segments = dotted.split('.').peekable();
    let mut current = block;
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            current.insert(segment.to_string(), Value::String(path.to_string()));
            return;
        }
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        current = entry.as_object_mut().expect("entry was just made an object");
    }
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Every language block of a header payload must carry a `menus` array.
fn validate_header_menus(payload: &Value) -> AppResult<()> {
    translations::validate(payload)?;
    for (lang, block) in payload.as_object().into_iter().flatten() {
        if !block.get("menus").map(Value::is_array).unwrap_or(false) {
            return Err(AppError::BadRequest(format!(
                "Invalid or missing menus for language: {lang}"
            )));
        }
    }
    Ok(())
}

/// GET /api/v1/content/header
pub async fn get_header(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
) -> AppResult<Json<SiteSection>> {
    let header = SiteSectionRepo::find(&state.pool, SectionKind::Header)
        .await?
        .ok_or_else(|| AppError::NotFound("Header not found".into()))?;
    Ok(Json(header))
}

/// POST /api/v1/content/header
///
/// Create-once. Multipart: `data` = full translations payload (with
/// per-language menus); optional `logo` and `contact_icon` images.
pub async fn create_header(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<SiteSection>)> {
    let form = read_content_form(&state, multipart).await?;

    let payload = form
        .data
        .clone()
        .ok_or_else(|| AppError::BadRequest("data field is required".into()))?;
    validate_header_menus(&payload)?;

    if SiteSectionRepo::find(&state.pool, SectionKind::Header)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(
            "Header already exists. Use PUT to update.".into(),
        ));
    }

    let header = SiteSectionRepo::create(
        &state.pool,
        SectionKind::Header,
        &payload,
        form.file("logo").map(|f| f.public_path.as_str()),
        form.file("contact_icon").map(|f| f.public_path.as_str()),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(header)))
}

/// PUT /api/v1/content/header
///
/// Merges the submitted language blocks over the stored ones; uploaded
/// images replace the stored paths.
pub async fn update_header(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<SiteSection>> {
    let form = read_content_form(&state, multipart).await?;

    let existing = SiteSectionRepo::find(&state.pool, SectionKind::Header)
        .await?
        .ok_or_else(|| AppError::NotFound("Header not found".into()))?;

    let translations = match &form.data {
        Some(incoming) => {
            validate_header_menus(incoming)?;
            Some(translations::merge(&existing.translations, incoming))
        }
        None => None,
    };

    let changes = SectionChanges {
        translations,
        logo: form.file("logo").map(|f| f.public_path.clone()),
        contact_icon: form.file("contact_icon").map(|f| f.public_path.clone()),
    };

    let header = SiteSectionRepo::update(&state.pool, SectionKind::Header, &changes)
        .await?
        .ok_or_else(|| AppError::NotFound("Header not found".into()))?;
    Ok(Json(header))
}

// ---------------------------------------------------------------------------
// Footer
// ---------------------------------------------------------------------------

/// GET /api/v1/content/footer
pub async fn get_footer(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
) -> AppResult<Json<SiteSection>> {
    let footer = SiteSectionRepo::find(&state.pool, SectionKind::Footer)
        .await?
        .ok_or_else(|| AppError::NotFound("Footer not found".into()))?;
    Ok(Json(footer))
}

/// POST /api/v1/content/footer
///
/// Upsert of one language block. Multipart: `language`, `data` = that
/// language's footer content; optional `footer_logo` and `contact_logo`
/// images, whose paths are patched into the block.
pub async fn upsert_footer(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<SiteSection>> {
    let form = read_content_form(&state, multipart).await?;

    let mut block = form
        .data
        .clone()
        .unwrap_or_else(|| Value::Object(Map::new()))
        .as_object()
        .cloned()
        .ok_or_else(|| AppError::BadRequest("data must be a JSON object".into()))?;

    if let Some(logo) = form.file("footer_logo") {
        patch_path(&mut block, "footer_logo", &logo.public_path);
    }
    if let Some(logo) = form.file("contact_logo") {
        patch_path(&mut block, "contact.logo", &logo.public_path);
    }

    let incoming = Value::Object(Map::from_iter([(
        form.language.clone(),
        Value::Object(block),
    )]));

    let footer = upsert_section(&state, SectionKind::Footer, &incoming).await?;
    Ok(Json(footer))
}

// ---------------------------------------------------------------------------
// Homepage
// ---------------------------------------------------------------------------

/// Query parameters for the homepage read endpoint.
#[derive(Debug, Deserialize)]
pub struct HomepageParams {
    pub section: Option<String>,
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_lang() -> String {
    translations::DEFAULT_LANG.to_string()
}

/// Request body for `POST /content/homepage`.
#[derive(Debug, Deserialize)]
pub struct CreateHomepageRequest {
    pub translations: Value,
}

/// Request body for `PUT /content/homepage/{section}`.
#[derive(Debug, Deserialize)]
pub struct UpdateSectionRequest {
    #[serde(default = "default_lang")]
    pub lang: String,
    pub content: Value,
}

/// Request body for `POST /content/homepage/copy-translations`.
#[derive(Debug, Deserialize)]
pub struct CopyTranslationsRequest {
    pub from: String,
    pub to: String,
}

/// GET /api/v1/content/homepage
///
/// Returns the whole homepage, or one section of one language when
/// `?section=` is given.
pub async fn get_homepage(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Query(params): Query<HomepageParams>,
) -> AppResult<axum::response::Response> {
    use axum::response::IntoResponse;

    let homepage = SiteSectionRepo::find(&state.pool, SectionKind::Homepage)
        .await?
        .ok_or_else(|| AppError::NotFound("Homepage not found".into()))?;

    match &params.section {
        None => Ok(Json(homepage).into_response()),
        Some(section) => {
            let block = translations::resolve(&homepage.translations, &params.lang);
            let content = block.get(section).cloned().ok_or_else(|| {
                AppError::NotFound(format!("Homepage has no section '{section}'"))
            })?;
            Ok(Json(content).into_response())
        }
    }
}

/// POST /api/v1/content/homepage
///
/// Create-once from a full translations payload.
pub async fn create_homepage(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Json(input): Json<CreateHomepageRequest>,
) -> AppResult<(StatusCode, Json<SiteSection>)> {
    translations::validate(&input.translations)?;

    if SiteSectionRepo::find(&state.pool, SectionKind::Homepage)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(
            "Homepage already exists. Use PUT to update a section.".into(),
        ));
    }

    let homepage = SiteSectionRepo::create(
        &state.pool,
        SectionKind::Homepage,
        &input.translations,
        None,
        None,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(homepage)))
}

/// PUT /api/v1/content/homepage/{section}
///
/// Replaces one named section within one language.
pub async fn update_homepage_section(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(section): Path<String>,
    Json(input): Json<UpdateSectionRequest>,
) -> AppResult<Json<SiteSection>> {
    let homepage = SiteSectionRepo::find(&state.pool, SectionKind::Homepage)
        .await?
        .ok_or_else(|| AppError::NotFound("Homepage not found".into()))?;

    let updated = translations::set_section(
        &homepage.translations,
        &input.lang,
        &section,
        input.content,
    );

    let homepage = SiteSectionRepo::update(
        &state.pool,
        SectionKind::Homepage,
        &SectionChanges {
            translations: Some(updated),
            ..Default::default()
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Homepage not found".into()))?;
    Ok(Json(homepage))
}

/// POST /api/v1/content/homepage/copy-translations
///
/// Copies the full tree of one language onto another.
pub async fn copy_homepage_translations(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Json(input): Json<CopyTranslationsRequest>,
) -> AppResult<Json<SiteSection>> {
    let homepage = SiteSectionRepo::find(&state.pool, SectionKind::Homepage)
        .await?
        .ok_or_else(|| AppError::NotFound("Homepage not found".into()))?;

    let copied = translations::copy_language(&homepage.translations, &input.from, &input.to)?;

    let homepage = SiteSectionRepo::update(
        &state.pool,
        SectionKind::Homepage,
        &SectionChanges {
            translations: Some(copied),
            ..Default::default()
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Homepage not found".into()))?;
    Ok(Json(homepage))
}

/// POST /api/v1/content/homepage/{section}/image
///
/// Stores an uploaded image and patches its path into the section.
pub async fn upload_homepage_section_image(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    Path(section): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<SiteSection>> {
    let form = read_content_form(&state, multipart).await?;

    let image = form
        .files
        .first()
        .map(|(_, saved)| saved.clone())
        .ok_or_else(|| AppError::BadRequest("An image file is required".into()))?;

    let homepage = SiteSectionRepo::find(&state.pool, SectionKind::Homepage)
        .await?
        .ok_or_else(|| AppError::NotFound("Homepage not found".into()))?;

    // Patch the image path into the existing section content (or start an
    // empty section if it has none yet).
    let mut content = translations::resolve(&homepage.translations, &form.language)
        .get(&section)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    patch_path(&mut content, "image", &image.public_path);

    let updated = translations::set_section(
        &homepage.translations,
        &form.language,
        &section,
        Value::Object(content),
    );

    let homepage = SiteSectionRepo::update(
        &state.pool,
        SectionKind::Homepage,
        &SectionChanges {
            translations: Some(updated),
            ..Default::default()
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Homepage not found".into()))?;
    Ok(Json(homepage))
}

// ---------------------------------------------------------------------------
// About
// ---------------------------------------------------------------------------

/// GET /api/v1/content/about
pub async fn get_about(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
) -> AppResult<Json<SiteSection>> {
    let about = SiteSectionRepo::find(&state.pool, SectionKind::About)
        .await?
        .ok_or_else(|| AppError::NotFound("About page not found".into()))?;
    Ok(Json(about))
}

/// POST /api/v1/content/about
///
/// Upsert of one language block. Multipart: `language`, `data`; optional
/// `hero_image` and `callback_image` files patched into the block.
pub async fn upsert_about(
    _key: ApiKeyGuard,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<SiteSection>> {
    let form = read_content_form(&state, multipart).await?;

    let mut block = form
        .data
        .clone()
        .unwrap_or_else(|| Value::Object(Map::new()))
        .as_object()
        .cloned()
        .ok_or_else(|| AppError::BadRequest("data must be a JSON object".into()))?;

    if let Some(hero) = form.file("hero_image") {
        patch_path(&mut block, "hero_image", &hero.public_path);
    }
    if let Some(callback) = form.file("callback_image") {
        patch_path(&mut block, "callback_image", &callback.public_path);
    }

    let incoming = Value::Object(Map::from_iter([(
        form.language.clone(),
        Value::Object(block),
    )]));

    let about = upsert_section(&state, SectionKind::About, &incoming).await?;
    Ok(Json(about))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Merge-or-create a singleton section from an incoming translations
/// payload.
async fn upsert_section(
    state: &AppState,
    kind: SectionKind,
    incoming: &Value,
) -> AppResult<SiteSection> {
    match SiteSectionRepo::find(&state.pool, kind).await? {
        Some(existing) => {
            let merged = translations::merge(&existing.translations, incoming);
            SiteSectionRepo::update(
                &state.pool,
                kind,
                &SectionChanges {
                    translations: Some(merged),
                    ..Default::default()
                },
            )
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Internal(
                    "section vanished during upsert".into(),
                ))
            })
        }
        None => Ok(SiteSectionRepo::create(&state.pool, kind, incoming, None, None).await?),
    }
}
