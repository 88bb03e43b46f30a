//! URL handling module for Web Analyzer
//!
//! This module provides link resolution, host extraction, target-URL
//! validation, and internal/external link classification.

mod domain;
mod target;

// Re-export main functions
pub use domain::same_host;
pub use target::{resolve_link, validate_target_url};

use url::Url;

/// Where a harvested link points relative to the analysed page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkLocality {
    /// Same host as the page (or a same-page anchor)
    Internal,
    /// Different host, no host at all, or unparsable
    External,
}

impl LinkLocality {
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Classifies a harvested link against the page's base URL
///
/// Rules, in order:
/// 1. Empty or fragment-only (`#...`) links are same-page anchors → Internal
/// 2. Links that cannot be resolved against the base → External
/// 3. Internal iff the resolved host equals the base host (case-insensitive).
///    Subdomains are different hosts.
///
/// No I/O is performed.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use web_analyzer::url::{classify_link, LinkLocality};
///
/// let base = Url::parse("https://example.com/page").unwrap();
/// assert_eq!(classify_link("/about", &base), LinkLocality::Internal);
/// assert_eq!(classify_link("https://sub.example.com/y", &base), LinkLocality::External);
/// ```
pub fn classify_link(link: &str, base: &Url) -> LinkLocality {
    if link.is_empty() || link.starts_with('#') {
        return LinkLocality::Internal;
    }

    let resolved = match resolve_link(link, base) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Treating unparsable link {:?} as external: {}", link, e);
            return LinkLocality::External;
        }
    };

    if same_host(&resolved, base) {
        LinkLocality::Internal
    } else {
        LinkLocality::External
    }
}
