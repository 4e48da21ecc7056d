//! Acquisition of the product page HTML.

use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

/// Prompt shown when the HTML is typed or pasted at the console.
pub const PROMPT_TEXT: &str = "Paste the product page HTML: ";

/// Where the page HTML comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlSource {
    /// HTML already in memory.
    Inline(String),
    /// Ask on the console and read standard input.
    Prompt,
    /// Read a UTF-8 file.
    File(PathBuf),
}

/// Errors raised while acquiring the HTML.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The HTML file could not be read.
    #[error("failed to read HTML from {path}: {source}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Standard input could not be read.
    #[error("failed to read HTML from standard input: {0}")]
    Stdin(#[source] io::Error),
}

impl HtmlSource {
    /// Returns `self`, or `fallback` when `self` is an empty inline string.
    #[must_use]
    pub fn or_default(self, fallback: HtmlSource) -> HtmlSource {
        match self {
            Self::Inline(html) if html.is_empty() => fallback,
            other => other,
        }
    }

    /// Reads the HTML.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` when the file or standard input cannot be read,
    /// including when the file is not valid UTF-8.
    pub fn read(self) -> Result<String, SourceError> {
        match self {
            Self::Inline(html) => Ok(html),
            Self::File(path) => {
                info!(path = %path.display(), "reading HTML file");
                let html = std::fs::read_to_string(&path)
                    .map_err(|source| SourceError::Read { path, source })?;
                debug!(bytes = html.len(), "HTML file read");
                Ok(html)
            }
            Self::Prompt => {
                let stdin = io::stdin();
                let interactive = stdin.is_terminal();
                if interactive {
                    print!("{PROMPT_TEXT}");
                    io::stdout().flush().map_err(SourceError::Stdin)?;
                }
                read_prompt_from(stdin.lock(), interactive)
            }
        }
    }
}

/// Reads one line when `interactive`, otherwise everything until EOF.
///
/// # Errors
///
/// Returns `SourceError::Stdin` on a read failure.
pub fn read_prompt_from<R: BufRead>(mut reader: R, interactive: bool) -> Result<String, SourceError> {
    let mut buffer = String::new();
    if interactive {
        reader.read_line(&mut buffer).map_err(SourceError::Stdin)?;
        let trimmed_len = buffer.trim_end_matches(['\r', '\n']).len();
        buffer.truncate(trimmed_len);
    } else {
        reader
            .read_to_string(&mut buffer)
            .map_err(SourceError::Stdin)?;
    }
    Ok(buffer)
}
