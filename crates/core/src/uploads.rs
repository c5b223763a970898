//! Upload policy: accepted file types, size cap, and stored-name derivation.

use crate::error::CoreError;

/// Maximum accepted upload size in bytes (5 MB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Extensions accepted for image uploads.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "webp"];

/// Extensions accepted for voice-sample uploads.
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3"];

/// Extract the lowercase extension of a filename, if any.
fn extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Check a filename against an allowed-extension list.
pub fn validate_extension(filename: &str, allowed: &[&str]) -> Result<(), CoreError> {
    match extension(filename) {
        Some(ext) if allowed.contains(&ext.as_str()) => Ok(()),
        _ => Err(CoreError::Validation(format!(
            "file type not allowed for '{filename}' (expected one of: {})",
            allowed.join(", ")
        ))),
    }
}

/// Check an upload's size against [`MAX_UPLOAD_BYTES`].
pub fn validate_size(len: usize) -> Result<(), CoreError> {
    if len > MAX_UPLOAD_BYTES {
        return Err(CoreError::Validation(format!(
            "file too large ({len} bytes, max {MAX_UPLOAD_BYTES})"
        )));
    }
    Ok(())
}

/// Derive the on-disk name for an upload: `<unix_millis>_<sanitized name>`.
///
/// The original name is reduced to its final path component and every
/// character outside `[A-Za-z0-9._-]` becomes `_`, so client-supplied names
/// can never escape the upload directory. An empty or traversal-only name
/// is rejected.
pub fn storage_name(original: &str, unix_millis: i64) -> Result<String, CoreError> {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .trim();

    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() || sanitized.chars().all(|c| c == '.') {
        return Err(CoreError::Validation(format!(
            "'{original}' is not a usable file name"
        )));
    }

    Ok(format!("{unix_millis}_{sanitized}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_extensions_are_enforced() {
        assert!(validate_extension("photo.JPG", IMAGE_EXTENSIONS).is_ok());
        assert!(validate_extension("photo.webp", IMAGE_EXTENSIONS).is_ok());
        assert!(validate_extension("document.pdf", IMAGE_EXTENSIONS).is_err());
        assert!(validate_extension("noextension", IMAGE_EXTENSIONS).is_err());
    }

    #[test]
    fn size_cap_is_enforced() {
        assert!(validate_size(MAX_UPLOAD_BYTES).is_ok());
        assert!(validate_size(MAX_UPLOAD_BYTES + 1).is_err());
    }

    #[test]
    fn storage_name_is_prefixed_and_sanitized() {
        let name = storage_name("profile photo.png", 1700000000000).unwrap();
        assert_eq!(name, "1700000000000_profile_photo.png");
    }

    #[test]
    fn storage_name_strips_directories() {
        let name = storage_name("../../etc/passwd", 42).unwrap();
        assert_eq!(name, "42_passwd");

        assert!(storage_name("..", 42).is_err());
        assert!(storage_name("", 42).is_err());
    }
}
