//! One extract-and-download run for a single page.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::download::{
    BatchReport, ClientOptions, ImageClient, RequestDelay, RequestPacer, download_from_list,
};
use crate::marketplace::Marketplace;
use crate::page::ImageSet;

use super::error::ScrapeError;

/// Filename prefix for main gallery images.
pub const MAIN_PREFIX: &str = "主图";
/// Filename prefix for SKU thumbnails.
pub const SKU_PREFIX: &str = "sku";
/// Filename prefix for description images.
pub const DESCRIPTION_PREFIX: &str = "详情";

/// Settings for one run, seeded from the marketplace defaults.
#[derive(Debug, Clone)]
pub struct ScrapeJob {
    /// Site the page came from.
    pub marketplace: Marketplace,
    /// Directory wiped and refilled by the run.
    pub output_dir: PathBuf,
    /// Pause between requests within a list.
    pub delay: RequestDelay,
    /// User-Agent header, if any.
    pub user_agent: Option<String>,
    /// Per-read timeout, if any.
    pub read_timeout: Option<Duration>,
}

/// Per-list reports of a finished run, in download order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Directory the images were written to.
    pub output_dir: PathBuf,
    /// Main images.
    pub main: BatchReport,
    /// SKU images.
    pub sku: BatchReport,
    /// Description images.
    pub description: BatchReport,
}

impl RunSummary {
    /// Images written across all lists.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.batches().map(BatchReport::completed).sum()
    }

    /// Images skipped across all lists.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.batches().map(|batch| batch.failed).sum()
    }

    /// Reports in download order.
    pub fn batches(&self) -> impl Iterator<Item = &BatchReport> {
        [&self.main, &self.sku, &self.description].into_iter()
    }
}

impl ScrapeJob {
    /// Job with every setting taken from `marketplace`.
    #[must_use]
    pub fn for_marketplace(marketplace: Marketplace) -> Self {
        Self {
            marketplace,
            output_dir: marketplace.default_output_dir(),
            delay: marketplace.request_delay(),
            user_agent: marketplace.user_agent().map(str::to_string),
            read_timeout: None,
        }
    }

    /// Client options implied by this job.
    #[must_use]
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            user_agent: self.user_agent.clone(),
            read_timeout: self.read_timeout,
            capture_error_body: self.marketplace.logs_failure_body(),
        }
    }

    /// Recreates the output directory and downloads main, SKU, then
    /// description images.
    ///
    /// # Errors
    ///
    /// Returns `ScrapeError` when the directory cannot be prepared, the
    /// client cannot be built, or an image cannot be written to disk.
    #[instrument(skip(self, images), fields(marketplace = %self.marketplace, total = images.total()))]
    pub async fn run(&self, images: &ImageSet) -> Result<RunSummary, ScrapeError> {
        let client =
            ImageClient::new(&self.client_options()).map_err(ScrapeError::HttpClient)?;

        recreate_output_dir(&self.output_dir).await?;

        let dir = self.output_dir.as_path();
        // Shared across the three lists so pacing never resets mid-run.
        let mut pacer = RequestPacer::new(self.delay);
        let main =
            download_from_list(&client, &images.main, MAIN_PREFIX, dir, &mut pacer).await?;
        let sku = download_from_list(&client, &images.sku, SKU_PREFIX, dir, &mut pacer).await?;
        let description =
            download_from_list(&client, &images.description, DESCRIPTION_PREFIX, dir, &mut pacer)
                .await?;

        let summary = RunSummary {
            output_dir: self.output_dir.clone(),
            main,
            sku,
            description,
        };
        info!(
            dir = %self.output_dir.display(),
            completed = summary.completed(),
            failed = summary.failed(),
            "download finished"
        );
        Ok(summary)
    }
}

/// Removes `dir` with everything in it, then creates it empty.
///
/// # Errors
///
/// Returns `ScrapeError::OutputDir` if removal or creation fails.
pub async fn recreate_output_dir(dir: &Path) -> Result<(), ScrapeError> {
    if tokio::fs::try_exists(dir).await.unwrap_or(false) {
        debug!(dir = %dir.display(), "removing previous output");
        tokio::fs::remove_dir_all(dir)
            .await
            .map_err(|e| ScrapeError::output_dir(dir, e))?;
    }
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| ScrapeError::output_dir(dir, e))
}
