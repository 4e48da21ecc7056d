//! Parsed product page and the three image extractors.
//!
//! A [`ProductPage`] owns the parsed DOM. Extraction never fails: a missing
//! container gives an empty list and a malformed item is skipped.
//!
//! # Example
//!
//! ```
//! use product_images::Marketplace;
//! use product_images::page::ProductPage;
//!
//! let html = r#"<div class="img-list-wrapper"><img src="/a.jpg"></div>"#;
//! let images = ProductPage::parse(html).extract(Marketplace::Ali1688);
//! assert_eq!(images.main, vec!["https://detail.1688.com/a.jpg".to_string()]);
//! assert!(images.sku.is_empty());
//! ```

mod urls;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};
use url::Url;

use crate::marketplace::{MainImageRule, Marketplace};

pub use urls::{first_srcset_url, resolve_url, style_background_url};

/// Wrapper around each SKU entry.
pub const SKU_WRAPPER_CLASS: &str = "sku-item-wrapper";
/// Element inside a SKU entry whose inline style carries the thumbnail.
pub const SKU_IMAGE_CLASS: &str = "sku-item-image";
/// Container of the long product description.
pub const CONTENT_DETAIL_CLASS: &str = "content-detail";
/// Class the page puts on description images once they are loaded.
pub const DESC_IMAGE_CLASS: &str = "desc-img-loaded";

/// Image URLs found on one page, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSet {
    /// Gallery (main) images.
    pub main: Vec<String>,
    /// SKU variant thumbnails.
    pub sku: Vec<String>,
    /// Images embedded in the description.
    pub description: Vec<String>,
}

impl ImageSet {
    /// Total number of URLs across all three lists.
    #[must_use]
    pub fn total(&self) -> usize {
        self.main.len() + self.sku.len() + self.description.len()
    }

    /// Returns true when no image was found at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// A parsed product page.
pub struct ProductPage {
    document: Html,
}

impl std::fmt::Debug for ProductPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductPage").finish_non_exhaustive()
    }
}

impl ProductPage {
    /// Parses raw HTML. Malformed markup is repaired by the parser, never rejected.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Runs all three extractors with the marketplace's rules.
    #[must_use]
    pub fn extract(&self, marketplace: Marketplace) -> ImageSet {
        let base = marketplace.base_url();
        let images = ImageSet {
            main: self.main_images(&marketplace.main_image_rule(), &base),
            sku: self.sku_images(&base),
            description: self.description_images(&base),
        };
        debug!(
            marketplace = %marketplace,
            main = images.main.len(),
            sku = images.sku.len(),
            description = images.description.len(),
            "extracted image links"
        );
        images
    }

    /// Main gallery images, resolved against `base`.
    #[must_use]
    pub fn main_images(&self, rule: &MainImageRule, base: &Url) -> Vec<String> {
        match rule {
            MainImageRule::DirectChildImgSrc { container_class } => {
                let Some(container) = self.first_div_with_class(container_class) else {
                    debug!(container_class, "main image container not found");
                    return Vec::new();
                };
                container
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|child| child.value().name() == "img")
                    .filter_map(|img| non_empty_attr(img, "src"))
                    .map(|src| resolve_url(base, src))
                    .collect()
            }
            MainImageRule::SourceSrcset { class, mime_type } => {
                let Some(selector) = css(&format!(r#"source.{class}[type="{mime_type}"]"#)) else {
                    return Vec::new();
                };
                self.document
                    .select(&selector)
                    .filter_map(|source| non_empty_attr(source, "srcset"))
                    .filter_map(first_srcset_url)
                    .map(|src| resolve_url(base, src))
                    .collect()
            }
        }
    }

    /// SKU thumbnails taken from each wrapper's inline `url("...")` style.
    #[must_use]
    pub fn sku_images(&self, base: &Url) -> Vec<String> {
        let (Some(wrapper_sel), Some(image_sel)) = (
            css(&format!("div.{SKU_WRAPPER_CLASS}")),
            css(&format!("div.{SKU_IMAGE_CLASS}")),
        ) else {
            return Vec::new();
        };

        let mut urls = Vec::new();
        for wrapper in self.document.select(&wrapper_sel) {
            let Some(image) = wrapper.select(&image_sel).next() else {
                trace!("sku wrapper without image element, skipping");
                continue;
            };
            let Some(style) = image.value().attr("style") else {
                trace!("sku image without style attribute, skipping");
                continue;
            };
            if let Some(url) = style_background_url(style) {
                urls.push(resolve_url(base, &url));
            }
        }
        urls
    }

    /// `src` of every loaded description image inside the content container.
    #[must_use]
    pub fn description_images(&self, base: &Url) -> Vec<String> {
        let Some(container) = self.first_div_with_class(CONTENT_DETAIL_CLASS) else {
            debug!("description container not found");
            return Vec::new();
        };
        let Some(img_sel) = css(&format!("img.{DESC_IMAGE_CLASS}")) else {
            return Vec::new();
        };
        container
            .select(&img_sel)
            .filter_map(|img| non_empty_attr(img, "src"))
            .map(|src| resolve_url(base, src))
            .collect()
    }

    fn first_div_with_class(&self, class: &str) -> Option<ElementRef<'_>> {
        let selector = css(&format!("div.{class}"))?;
        self.document.select(&selector).next()
    }
}

fn css(selector: &str) -> Option<Selector> {
    Selector::parse(selector).ok()
}

fn non_empty_attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
