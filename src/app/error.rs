//! Errors that end a scrape run.

use std::path::PathBuf;

use thiserror::Error;

use crate::download::DownloadError;
use crate::source::SourceError;

/// Fatal errors for a full run. Per-image failures never reach this type.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The page HTML could not be acquired.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The output directory could not be wiped or recreated.
    #[error("failed to prepare output directory {path}: {source}")]
    OutputDir {
        /// Directory being prepared.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Writing an image to disk failed.
    #[error(transparent)]
    Download(#[from] DownloadError),
}

impl ScrapeError {
    /// Creates an output directory error.
    pub fn output_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputDir {
            path: path.into(),
            source,
        }
    }
}
