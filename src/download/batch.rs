//! Sequential download of one list of image URLs.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use super::client::ImageClient;
use super::delay::RequestPacer;
use super::error::DownloadError;
use super::filename::image_file_stem;

/// Result of downloading one prefixed list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Filename prefix used for this list.
    pub prefix: String,
    /// Number of URLs requested.
    pub attempted: usize,
    /// Files written, in URL order.
    pub saved: Vec<PathBuf>,
    /// URLs that were skipped because of a per-image failure.
    pub failed: usize,
}

impl BatchReport {
    fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            ..Self::default()
        }
    }

    /// Number of images written to disk.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.saved.len()
    }
}

/// Downloads `urls` in order into `output_dir` as `<prefix>_<n><ext>`.
///
/// The directory is created if missing. Per-image failures (bad status,
/// network, invalid URL) are logged and skipped. `pacer` is consulted before
/// every request; pass the same pacer for every list of a run so the pause
/// also applies across list boundaries.
///
/// # Errors
///
/// Returns `DownloadError::Io` when the directory cannot be created or an
/// image cannot be written. The batch stops at that point.
#[instrument(skip(client, urls, pacer), fields(count = urls.len()))]
pub async fn download_from_list(
    client: &ImageClient,
    urls: &[String],
    prefix: &str,
    output_dir: &Path,
    pacer: &mut RequestPacer,
) -> Result<BatchReport, DownloadError> {
    if !output_dir.exists() {
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|e| DownloadError::io(output_dir, e))?;
        debug!(dir = %output_dir.display(), "created output directory");
    }

    info!(prefix, count = urls.len(), "image links found");

    let mut report = BatchReport::new(prefix);
    for (idx, url) in urls.iter().enumerate() {
        pacer.before_request().await;
        report.attempted += 1;

        let stem = image_file_stem(prefix, idx + 1);
        match client.fetch_to_file(url, output_dir, &stem).await {
            Ok(saved) => {
                info!(path = %saved.path.display(), bytes = saved.bytes, "downloaded");
                report.saved.push(saved.path);
            }
            Err(err) if err.is_skippable() => {
                log_failure(&err);
                report.failed += 1;
            }
            Err(err) => return Err(err),
        }
    }

    debug!(
        prefix,
        completed = report.completed(),
        failed = report.failed,
        "batch finished"
    );
    Ok(report)
}

fn log_failure(err: &DownloadError) {
    match err {
        DownloadError::HttpStatus { url, status, body } => {
            warn!(url = %url, status, "failed to download");
            if let Some(body) = body {
                log_error_body(body);
            }
        }
        other => warn!(error = %other, "failed to download"),
    }
}

/// Logs a failure body when it decodes as JSON.
fn log_error_body(body: &[u8]) {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(json) => warn!(response = %json, "error response body"),
        Err(_) => debug!(bytes = body.len(), "error response body is not JSON"),
    }
}
