//! Poster filename and URL rules.
//!
//! Only the bare filename is persisted. The public URL is derived on every
//! read as `{base_url}/file/{filename}`.

use crate::error::CoreError;

/// Route prefix under which poster files are served.
pub const FILE_ROUTE_PREFIX: &str = "/file";

/// Maximum filename length in bytes (common filesystem limit).
pub const MAX_FILENAME_BYTES: usize = 255;

/// Fallback extension for generated names when the upload has none.
const DEFAULT_EXTENSION: &str = "bin";

/// Build the public URL of a poster file.
///
/// A trailing `/` on `base_url` is ignored so both `http://host` and
/// `http://host/` produce `http://host/file/{filename}`.
pub fn poster_url(base_url: &str, filename: &str) -> String {
    format!(
        "{}{FILE_ROUTE_PREFIX}/{filename}",
        base_url.trim_end_matches('/')
    )
}

/// Validate that `name` is a bare filename safe to join onto the storage
/// directory.
pub fn validate_filename(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Please provide the movie's poster".into()));
    }
    if name.len() > MAX_FILENAME_BYTES {
        return Err(CoreError::Validation(format!(
            "Filename must be at most {MAX_FILENAME_BYTES} bytes"
        )));
    }
    if name.contains(&['/', '\\', '\0'][..]) || name == "." || name == ".." {
        return Err(CoreError::Validation(format!("Invalid filename '{name}'")));
    }
    Ok(())
}

/// Resolve the name an upload is stored under.
///
/// Uses the client's original filename when present (after validation),
/// otherwise generates `{uuid}.{ext}` with the extension guessed from the
/// upload's content type.
pub fn resolve_filename(
    original: Option<&str>,
    content_type: Option<&str>,
) -> Result<String, CoreError> {
    match original.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => {
            validate_filename(name)?;
            Ok(name.to_string())
        }
        None => {
            let ext = content_type
                .and_then(extension_for_content_type)
                .unwrap_or(DEFAULT_EXTENSION);
            Ok(format!("{}.{ext}", uuid::Uuid::new_v4()))
        }
    }
}

/// Map an image content type to its usual file extension.
pub fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    let essence = content_type.split(';').next().unwrap_or("").trim();
    match essence.to_ascii_lowercase().as_str() {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        "image/svg+xml" => Some("svg"),
        "image/bmp" => Some("bmp"),
        _ => None,
    }
}

/// Guess a Content-Type from a filename extension.
pub fn content_type_for_filename(name: &str) -> &'static str {
    let ext = name.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}
