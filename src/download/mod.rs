//! HTTP download of extracted image lists.
//!
//! Images are fetched one at a time, in list order, and streamed to disk.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for large files)
//! - Extension guessed from the Content-Type header, `.jpg` otherwise
//! - Optional randomized pause between requests
//! - Per-image failures are logged and skipped
//!
//! # Example
//!
//! ```no_run
//! use product_images::download::{
//!     ClientOptions, ImageClient, RequestDelay, RequestPacer, download_from_list,
//! };
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ImageClient::new(&ClientOptions::default())?;
//! let urls = vec!["https://example.com/a.png".to_string()];
//! let mut pacer = RequestPacer::new(RequestDelay::random_default());
//! let report = download_from_list(&client, &urls, "主图", Path::new("./images"), &mut pacer).await?;
//! println!("saved {} of {}", report.completed(), report.attempted);
//! # Ok(())
//! # }
//! ```

mod batch;
mod client;
pub mod constants;
mod delay;
mod error;
mod filename;

pub use batch::{BatchReport, download_from_list};
pub use client::{ClientOptions, ImageClient, SavedImage};
pub use delay::{RequestDelay, RequestPacer};
pub use error::DownloadError;
pub use filename::{extension_for_content_type, extension_or_default, image_file_stem};
