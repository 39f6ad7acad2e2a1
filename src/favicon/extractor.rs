//! HTML parser for locating the favicon of a page
//!
//! The document is scanned in document order for `<link>` elements whose
//! `rel` mentions "icon". Selection:
//! - the last `rel="icon"` link that carries a `sizes` attribute wins
//! - otherwise the first icon link of any kind
//! - otherwise `<base>/favicon.ico`
//!
//! "Last sized" is deliberate: sizes are not compared.

use crate::FaviconError;
use scraper::{ElementRef, Html, Selector};

/// Attributes of one `<link>` element seen during the scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconCandidate {
    pub rel: String,
    pub href: String,
    pub sizes: String,
}

impl IconCandidate {
    fn from_element(element: ElementRef<'_>) -> Self {
        let attr = |name: &str| element.value().attr(name).unwrap_or_default().to_string();
        Self {
            rel: attr("rel"),
            href: attr("href"),
            sizes: attr("sizes"),
        }
    }

    /// Any rel containing "icon" ("shortcut icon", "apple-touch-icon", ...)
    /// with a non-empty href. Matching is case-sensitive.
    pub fn is_icon(&self) -> bool {
        self.rel.contains("icon") && !self.href.is_empty()
    }

    /// Exactly `rel="icon"` with a `sizes` value
    pub fn is_sized_icon(&self) -> bool {
        self.rel == "icon" && !self.sizes.is_empty()
    }
}

/// Extracts the favicon URL from an HTML document
///
/// # Arguments
///
/// * `html` - The HTML content
/// * `base_url` - Scheme+host prefix used for root-relative hrefs
///
/// # Returns
///
/// * `Ok(String)` - The chosen icon URL, or `<base_url>/favicon.ico`
/// * `Err(FaviconError::Parse)` - The document tree could not be queried
///
/// # Example
///
/// ```
/// use favicon_scout::favicon::extract_favicon;
///
/// let html = r#"<html><head><link rel="icon" href="/icon.png"></head></html>"#;
/// let icon = extract_favicon(html, "https://example.com").unwrap();
/// assert_eq!(icon, "https://example.com/icon.png");
/// ```
pub fn extract_favicon(html: &str, base_url: &str) -> Result<String, FaviconError> {
    let document = Html::parse_document(html);
    let link_selector =
        Selector::parse("link").map_err(|e| FaviconError::Parse(format!("{:?}", e)))?;

    let mut first_icon: Option<String> = None;
    let mut sized_icon: Option<String> = None;

    // select() walks the tree depth-first in document order
    for element in document.select(&link_selector) {
        let candidate = IconCandidate::from_element(element);
        if !candidate.is_icon() {
            continue;
        }

        let href = resolve_icon_href(&candidate.href, base_url);

        if candidate.is_sized_icon() {
            sized_icon = Some(href.clone());
        }

        if first_icon.is_none() {
            first_icon = Some(href);
        }
    }

    Ok(sized_icon
        .or(first_icon)
        .unwrap_or_else(|| format!("{}/favicon.ico", base_url)))
}

/// Resolves an icon href against the base URL
///
/// - `/path` becomes `<base_url>/path`
/// - `//host/path` becomes `http://host/path`
/// - anything else is returned as is, including plain relative paths
pub fn resolve_icon_href(href: &str, base_url: &str) -> String {
    if href.starts_with("//") {
        format!("http:{}", href)
    } else if href.starts_with('/') {
        format!("{}{}", base_url, href)
    } else {
        href.to_string()
    }
}
