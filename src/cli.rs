//! CLI argument definitions using clap derive macros.
//!
//! Both binaries share these flags. Running with none of them keeps the
//! marketplace defaults.

use std::path::PathBuf;

use clap::Parser;

use crate::download::constants::MAX_READ_TIMEOUT_SECS;

/// Extract product images from a saved marketplace page and download them.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Read the page HTML from this file instead of the default source
    #[arg(long, value_name = "PATH")]
    pub html_file: Option<PathBuf>,

    /// Write images here instead of the default folder (wiped before each run)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Issue requests back-to-back even where a pause is the default
    #[arg(long)]
    pub no_delay: bool,

    /// Per-read timeout in seconds (0 waits indefinitely)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u64).range(0..=MAX_READ_TIMEOUT_SECS))]
    pub read_timeout: u64,

    /// Override the User-Agent header sent with image requests
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,
}

impl Args {
    /// Default log level implied by the verbosity flags.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}
