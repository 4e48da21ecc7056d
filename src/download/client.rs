//! HTTP client wrapper for fetching images.
//!
//! This module provides the `ImageClient` struct which streams one image
//! response to disk, naming the file after the caller's stem and the
//! extension guessed from the response `Content-Type`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, instrument};
use url::Url;

use super::constants::CONNECT_TIMEOUT_SECS;
use super::error::DownloadError;
use super::filename::extension_or_default;

/// Settings applied when building an [`ImageClient`].
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// User-Agent header sent with every request; `None` keeps reqwest's default.
    pub user_agent: Option<String>,
    /// Per-read timeout; `None` lets a stalled connection hang.
    pub read_timeout: Option<Duration>,
    /// Keep the body of non-200 responses so it can be logged.
    pub capture_error_body: bool,
}

/// HTTP client for fetching images with streaming support.
///
/// Created once per run and reused for every image so connections to the
/// same CDN host are pooled.
///
/// # Example
///
/// ```no_run
/// use product_images::download::{ClientOptions, ImageClient};
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ImageClient::new(&ClientOptions::default())?;
/// let saved = client
///     .fetch_to_file("https://example.com/a.png", Path::new("./images"), "主图_1")
///     .await?;
/// println!("Saved: {}", saved.path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ImageClient {
    client: Client,
    capture_error_body: bool,
}

/// Outcome of one successful fetch.
#[derive(Debug, Clone)]
pub struct SavedImage {
    /// Final output path, including the guessed extension.
    pub path: PathBuf,
    /// Number of body bytes written.
    pub bytes: u64,
    /// Content-Type reported by the server, if any.
    pub content_type: Option<String>,
}

impl ImageClient {
    /// Builds a client from `options`.
    ///
    /// # Errors
    ///
    /// Returns the underlying reqwest error when the TLS backend or system
    /// configuration cannot be initialised.
    pub fn new(options: &ClientOptions) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .gzip(true);
        if let Some(ua) = options.user_agent.as_deref() {
            builder = builder.user_agent(ua);
        }
        if let Some(timeout) = options.read_timeout {
            builder = builder.read_timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            capture_error_body: options.capture_error_body,
        })
    }

    /// Fetches `url` and writes the body to `<output_dir>/<stem><ext>`.
    ///
    /// Only status 200 counts as success. An existing file with the same
    /// name is overwritten.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The URL is not an absolute http(s) URL
    /// - The request fails (network error, timeout)
    /// - The server answers with any status other than 200
    /// - Writing to disk fails
    #[must_use = "fetch result contains the path of the saved image"]
    #[instrument(skip(self, output_dir), fields(url = %url))]
    pub async fn fetch_to_file(
        &self,
        url: &str,
        output_dir: &Path,
        stem: &str,
    ) -> Result<SavedImage, DownloadError> {
        let parsed = Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DownloadError::invalid_url(url));
        }

        let response = self.client.get(parsed).send().await.map_err(|e| {
            if e.is_timeout() {
                DownloadError::timeout(url)
            } else {
                DownloadError::network(url, e)
            }
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(self.status_error(url, response).await);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(std::string::ToString::to_string);
        let extension = extension_or_default(content_type.as_deref());
        let file_path = output_dir.join(format!("{stem}{extension}"));
        debug!(content_type = ?content_type, path = %file_path.display(), "resolved output path");

        let mut file = File::create(&file_path)
            .await
            .map_err(|e| DownloadError::io(file_path.clone(), e))?;

        let stream_result = stream_to_file(&mut file, response, url, &file_path).await;
        if stream_result.is_err() {
            debug!(path = %file_path.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(&file_path).await;
        }
        let bytes = stream_result?;

        Ok(SavedImage {
            path: file_path,
            bytes,
            content_type,
        })
    }

    async fn status_error(&self, url: &str, response: reqwest::Response) -> DownloadError {
        let status = response.status().as_u16();
        if !self.capture_error_body {
            return DownloadError::http_status(url, status);
        }
        match response.bytes().await {
            Ok(body) => DownloadError::http_status_with_body(url, status, body.to_vec()),
            Err(e) => {
                debug!(error = %e, "could not read error body");
                DownloadError::http_status(url, status)
            }
        }
    }
}

/// Streams response body to file, returning bytes written.
///
/// Kept separate so the caller can remove the partial file on error.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}
