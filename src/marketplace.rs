//! Per-site constants for the supported marketplaces.
//!
//! Everything that differs between the two scrapers lives here, so the
//! extractors and the downloader stay site-agnostic.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

use url::Url;

use crate::download::RequestDelay;
use crate::source::HtmlSource;
use crate::user_agent::BROWSER_USER_AGENT;

/// File the Xiapi scraper reads its HTML from when none is given.
pub const XIAPI_HTML_FILE: &str = "forUse";

/// How the main gallery images are located on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainImageRule {
    /// `img` elements that are direct children of the first `div` with the
    /// class; the URL is in `src`.
    DirectChildImgSrc {
        /// Class of the gallery container.
        container_class: &'static str,
    },
    /// `source` elements with the class and `type` attribute; the URL is the
    /// first candidate of `srcset`.
    SourceSrcset {
        /// Class carried by each `source` element.
        class: &'static str,
        /// Required value of the `type` attribute.
        mime_type: &'static str,
    },
}

/// A supported marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marketplace {
    /// detail.1688.com product pages.
    Ali1688,
    /// Xiapi (Shopee mirror) product pages.
    Xiapi,
}

impl Marketplace {
    /// Short identifier used in logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Ali1688 => "1688",
            Self::Xiapi => "xiapi",
        }
    }

    /// Base URL relative image links are resolved against.
    #[must_use]
    #[allow(clippy::missing_panics_doc)]
    pub fn base_url(self) -> Url {
        let raw = match self {
            Self::Ali1688 => "https://detail.1688.com",
            Self::Xiapi => "https://my.xiapibuy.com",
        };
        // Both literals are valid absolute URLs.
        Url::parse(raw).unwrap_or_else(|e| panic!("invalid base URL '{raw}': {e}"))
    }

    /// Name of the folder images are written to.
    #[must_use]
    pub fn folder_name(self) -> &'static str {
        match self {
            Self::Ali1688 => "图片1688",
            Self::Xiapi => "图片虾皮",
        }
    }

    /// Output directory used when the command line does not override it.
    ///
    /// 1688 writes next to the working directory; Xiapi writes to the
    /// user's desktop, or the working directory when no home is known.
    #[must_use]
    pub fn default_output_dir(self) -> PathBuf {
        match self {
            Self::Ali1688 => PathBuf::from(self.folder_name()),
            Self::Xiapi => home_dir().map_or_else(
                || PathBuf::from(self.folder_name()),
                |home| home.join("Desktop").join(self.folder_name()),
            ),
        }
    }

    /// Where the HTML comes from when the command line does not say.
    #[must_use]
    pub fn default_html_source(self) -> HtmlSource {
        match self {
            Self::Ali1688 => HtmlSource::Prompt,
            Self::Xiapi => HtmlSource::File(PathBuf::from(XIAPI_HTML_FILE)),
        }
    }

    /// Rule for locating main gallery images.
    #[must_use]
    pub fn main_image_rule(self) -> MainImageRule {
        match self {
            Self::Ali1688 => MainImageRule::DirectChildImgSrc {
                container_class: "img-list-wrapper",
            },
            Self::Xiapi => MainImageRule::SourceSrcset {
                class: "UkIsx8",
                mime_type: "image/webp",
            },
        }
    }

    /// Pause between consecutive image requests.
    #[must_use]
    pub fn request_delay(self) -> RequestDelay {
        match self {
            Self::Ali1688 => RequestDelay::None,
            Self::Xiapi => RequestDelay::random_default(),
        }
    }

    /// User-Agent sent with image requests, if any.
    #[must_use]
    pub fn user_agent(self) -> Option<&'static str> {
        match self {
            Self::Ali1688 => None,
            Self::Xiapi => Some(BROWSER_USER_AGENT),
        }
    }

    /// Whether failed responses have their body logged.
    #[must_use]
    pub fn logs_failure_body(self) -> bool {
        matches!(self, Self::Xiapi)
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn home_dir() -> Option<PathBuf> {
    env_var_non_empty_os("HOME")
        .or_else(|| env_var_non_empty_os("USERPROFILE"))
        .map(PathBuf::from)
}

fn env_var_non_empty_os(name: &str) -> Option<OsString> {
    let value = std::env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}
