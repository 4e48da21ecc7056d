//! Command-line entry flow shared by both binaries.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use crate::cli::Args;
use crate::download::RequestDelay;
use crate::marketplace::Marketplace;
use crate::page::ProductPage;
use crate::source::HtmlSource;

use super::error::ScrapeError;
use super::job::{RunSummary, ScrapeJob};
use super::terminal;

/// Entry point shared by the marketplace binaries.
///
/// # Errors
///
/// Fails when the HTML cannot be read, the output directory cannot be
/// prepared, or an image cannot be written.
pub async fn run_cli(marketplace: Marketplace) -> Result<()> {
    // Parse before tracing so --help works without logs
    let args = Args::parse();
    terminal::init_tracing(args.default_log_level());

    debug!(?args, "CLI arguments parsed");
    info!(marketplace = %marketplace, "starting");

    let source = resolve_source(&args, marketplace);
    let job = build_job(&args, marketplace);
    let summary = scrape(source, &job).await?;

    if !args.quiet {
        terminal::print_summary(&summary);
    }
    Ok(())
}

/// Reads, parses, extracts, and downloads in one go.
///
/// # Errors
///
/// Returns `ScrapeError` for source, directory, client, or disk failures.
pub async fn scrape(source: HtmlSource, job: &ScrapeJob) -> Result<RunSummary, ScrapeError> {
    let html = source
        .or_default(job.marketplace.default_html_source())
        .read()?;
    info!(bytes = html.len(), "HTML loaded");

    // The parsed document is dropped before any download starts.
    let images = ProductPage::parse(&html).extract(job.marketplace);
    job.run(&images).await
}

fn resolve_source(args: &Args, marketplace: Marketplace) -> HtmlSource {
    args.html_file
        .clone()
        .map_or_else(|| marketplace.default_html_source(), HtmlSource::File)
}

fn build_job(args: &Args, marketplace: Marketplace) -> ScrapeJob {
    let mut job = ScrapeJob::for_marketplace(marketplace);
    if let Some(dir) = &args.output_dir {
        job.output_dir.clone_from(dir);
    }
    if args.no_delay {
        job.delay = RequestDelay::None;
    }
    if args.read_timeout > 0 {
        job.read_timeout = Some(Duration::from_secs(args.read_timeout));
    }
    if let Some(ua) = &args.user_agent {
        job.user_agent = Some(ua.clone());
    }
    job
}
