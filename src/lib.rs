//! Product Images Library
//!
//! Pulls product image URLs out of saved marketplace page HTML and
//! downloads them into a local folder.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`marketplace`] - Per-site constants (base URL, folders, selectors, delay)
//! - [`source`] - Acquiring the page HTML (inline, console prompt, file)
//! - [`page`] - DOM parsing and the main / SKU / description extractors
//! - [`download`] - Sequential streaming image downloads
//! - [`app`] - The full run: wipe folder, download the three lists in order
//! - [`cli`] - Command-line flags shared by the binaries

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cli;
pub mod download;
pub mod marketplace;
pub mod page;
pub mod source;
mod user_agent;

// Re-export commonly used types
pub use app::{RunSummary, ScrapeError, ScrapeJob, run_cli, scrape};
pub use download::{
    BatchReport, DownloadError, ImageClient, RequestDelay, RequestPacer, download_from_list,
};
pub use marketplace::{MainImageRule, Marketplace};
pub use page::{ImageSet, ProductPage};
pub use source::{HtmlSource, SourceError};
pub use user_agent::BROWSER_USER_AGENT;
