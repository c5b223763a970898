//! Writing multipart uploads to the upload directory.
//!
//! Validation (extension allow-list, size cap, name sanitization) lives in
//! `carelink_core::uploads`; this module does the actual filesystem work
//! and produces the public `/uploads/...` path stored in the database.

use std::path::Path;

use carelink_core::uploads::{storage_name, validate_extension, validate_size};

use crate::error::{AppError, AppResult};

/// A stored upload: the on-disk file name and the public URL path.
#[derive(Debug, Clone)]
pub struct SavedUpload {
    pub file_name: String,
    pub public_path: String,
}

/// Validate and persist one uploaded file.
///
/// The stored name is `<unix_millis>_<sanitized original name>`, which also
/// keeps concurrent uploads of the same file from clobbering each other.
pub async fn save_upload(
    upload_dir: &Path,
    original_name: &str,
    data: &[u8],
    allowed_extensions: &[&str],
) -> AppResult<SavedUpload> {
    validate_extension(original_name, allowed_extensions)?;
    validate_size(data.len())?;

    let file_name = storage_name(original_name, chrono::Utc::now().timestamp_millis())?;

    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

    let dest = upload_dir.join(&file_name);
    tokio::fs::write(&dest, data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    tracing::debug!(file = %dest.display(), bytes = data.len(), "upload stored");

    Ok(SavedUpload {
        public_path: format!("/uploads/{file_name}"),
        file_name,
    })
}

/// Persist raw bytes produced server-side (e.g. synthesized audio) under a
/// generated name with the given extension.
pub async fn save_generated(
    upload_dir: &Path,
    prefix: &str,
    extension: &str,
    data: &[u8],
) -> AppResult<SavedUpload> {
    let file_name = format!(
        "{}_{}.{extension}",
        prefix,
        chrono::Utc::now().timestamp_millis()
    );

    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

    let dest = upload_dir.join(&file_name);
    tokio::fs::write(&dest, data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store file: {e}")))?;

    Ok(SavedUpload {
        public_path: format!("/uploads/{file_name}"),
        file_name,
    })
}
