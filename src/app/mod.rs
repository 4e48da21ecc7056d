//! Orchestration: read the page, extract, wipe the folder, download.

mod error;
mod job;
mod runtime;
mod terminal;

pub use error::ScrapeError;
pub use job::{
    DESCRIPTION_PREFIX, MAIN_PREFIX, RunSummary, SKU_PREFIX, ScrapeJob, recreate_output_dir,
};
pub use runtime::{run_cli, scrape};
