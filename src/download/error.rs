//! Error types for the download module.
//!
//! Every variant carries the URL or path it concerns so a single log line is
//! enough to tell which image went wrong.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching a single image.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout downloading {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// Server answered with anything other than 200.
    #[error("HTTP {status} downloading {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
        /// Raw response body, captured only when the caller asked for it.
        body: Option<Vec<u8>>,
    },

    /// File system error while writing the image.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The URL could not be parsed as an absolute http(s) URL.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },
}

impl DownloadError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error without a captured body.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
            body: None,
        }
    }

    /// Creates an HTTP status error carrying the response body.
    pub fn http_status_with_body(url: impl Into<String>, status: u16, body: Vec<u8>) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
            body: Some(body),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Returns true when the failure is local to one image and the batch
    /// should move on to the next URL.
    ///
    /// Only local file system errors stop a batch.
    #[must_use]
    pub fn is_skippable(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_download_error_timeout_display() {
        let error = DownloadError::timeout("https://example.com/a.jpg");
        assert!(error.to_string().contains("timeout"));
        assert!(error.to_string().contains("https://example.com/a.jpg"));
    }

    #[test]
    fn test_download_error_http_status_display() {
        let error = DownloadError::http_status("https://example.com/a.jpg", 404);
        let msg = error.to_string();
        assert!(msg.contains("404"), "Expected '404' in: {msg}");
        assert!(
            msg.contains("https://example.com/a.jpg"),
            "Expected URL in: {msg}"
        );
    }

    #[test]
    fn test_download_error_http_status_with_body_keeps_body() {
        let error =
            DownloadError::http_status_with_body("https://example.com/a.jpg", 403, b"{}".to_vec());
        match error {
            DownloadError::HttpStatus { body, status, .. } => {
                assert_eq!(status, 403);
                assert_eq!(body.unwrap(), b"{}");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_download_error_io_display() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let error = DownloadError::io(PathBuf::from("/tmp/主图_1.jpg"), io_error);
        let msg = error.to_string();
        assert!(msg.contains("/tmp/主图_1.jpg"), "Expected path in: {msg}");
    }

    #[test]
    fn test_download_error_invalid_url_display() {
        let error = DownloadError::invalid_url("not-a-url");
        let msg = error.to_string();
        assert!(msg.contains("invalid URL"), "Expected 'invalid URL' in: {msg}");
        assert!(msg.contains("not-a-url"), "Expected URL in: {msg}");
    }

    #[test]
    fn test_is_skippable_only_rejects_io() {
        assert!(DownloadError::timeout("u").is_skippable());
        assert!(DownloadError::http_status("u", 500).is_skippable());
        assert!(DownloadError::invalid_url("u").is_skippable());
        let io_error = std::io::Error::other("disk full");
        assert!(!DownloadError::io("/tmp/x", io_error).is_skippable());
    }
}
