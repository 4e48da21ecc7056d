//! File naming for downloaded images.

use super::constants::DEFAULT_IMAGE_EXTENSION;

/// Builds the stem `<prefix>_<index>` for the image at 1-based `index`.
#[must_use]
pub fn image_file_stem(prefix: &str, index: usize) -> String {
    format!("{prefix}_{index}")
}

/// Guesses a file extension (with leading dot) from a Content-Type header.
///
/// Parameters such as `; charset=utf-8` are ignored and the match is
/// case-insensitive. Returns `None` for anything not in the table.
#[must_use]
pub fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    let ext = match mime.as_str() {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => ".jpg",
        "image/png" => ".png",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        "image/bmp" | "image/x-ms-bmp" => ".bmp",
        "image/svg+xml" => ".svg",
        "image/tiff" => ".tiff",
        "image/x-icon" | "image/vnd.microsoft.icon" => ".ico",
        "image/avif" => ".avif",
        "image/heic" => ".heic",
        "text/html" => ".html",
        "text/plain" => ".txt",
        "application/json" => ".json",
        _ => return None,
    };
    Some(ext)
}

/// Extension for an optional Content-Type, falling back to `.jpg`.
#[must_use]
pub fn extension_or_default(content_type: Option<&str>) -> &'static str {
    content_type
        .and_then(extension_for_content_type)
        .unwrap_or(DEFAULT_IMAGE_EXTENSION)
}
