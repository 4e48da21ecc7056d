//! Helpers that turn raw attribute values into absolute image URLs.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Compiles a regex at static init; panics on invalid pattern.
fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

/// `url("...")` inside an inline style, double-quoted form only.
static STYLE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r#"url\("([^"]+)"\)"#));

/// Returns the first `url("...")` value found in an inline style string.
///
/// ```
/// use product_images::page::style_background_url;
///
/// let style = r#"background-image: url("https://cbu01.alicdn.com/a.jpg");"#;
/// assert_eq!(
///     style_background_url(style).as_deref(),
///     Some("https://cbu01.alicdn.com/a.jpg")
/// );
/// ```
#[must_use]
pub fn style_background_url(style: &str) -> Option<String> {
    STYLE_URL_RE
        .captures(style)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Returns the URL of the first candidate in a `srcset` value.
#[must_use]
pub fn first_srcset_url(srcset: &str) -> Option<&str> {
    srcset
        .split(',')
        .next()
        .and_then(|candidate| candidate.split_whitespace().next())
        .filter(|url| !url.is_empty())
}

/// Resolves `value` against `base`.
///
/// Absolute URLs come back unchanged and `//host/...` takes the base scheme.
/// A value the URL parser rejects is returned as is so the downloader can
/// report it.
#[must_use]
pub fn resolve_url(base: &Url, value: &str) -> String {
    let value = value.trim();
    base.join(value)
        .map_or_else(|_| value.to_string(), |url| url.to_string())
}
