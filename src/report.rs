//! Page report data model
//!
//! A `PageReport` is the immutable result of one analysis call.

use serde::{Serialize, Serializer};
use std::fmt;

/// HTML version detected from the document's doctype declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HtmlVersion {
    Html5,
    Xhtml10,
    Html401,
    /// No recognised doctype near the start of the document
    #[default]
    Unknown,
}

impl HtmlVersion {
    /// Returns the human-readable label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Html5 => "HTML5",
            Self::Xhtml10 => "XHTML 1.0",
            Self::Html401 => "HTML 4.01",
            Self::Unknown => "Unknown (possibly HTML5 without explicit DOCTYPE)",
        }
    }
}

impl fmt::Display for HtmlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for HtmlVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Number of `h1`..`h6` elements found in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HeadingCounts {
    pub h1: usize,
    pub h2: usize,
    pub h3: usize,
    pub h4: usize,
    pub h5: usize,
    pub h6: usize,
}

impl HeadingCounts {
    /// Increments the counter for a tag name; returns false for non-heading tags
    pub fn record(&mut self, tag: &str) -> bool {
        let slot = match tag {
            "h1" => &mut self.h1,
            "h2" => &mut self.h2,
            "h3" => &mut self.h3,
            "h4" => &mut self.h4,
            "h5" => &mut self.h5,
            "h6" => &mut self.h6,
            _ => return false,
        };
        *slot += 1;
        true
    }

    /// Total number of headings of any level
    pub fn total(&self) -> usize {
        self.h1 + self.h2 + self.h3 + self.h4 + self.h5 + self.h6
    }

    /// Counts paired with their tag names, in level order
    pub fn levels(&self) -> [(&'static str, usize); 6] {
        [
            ("h1", self.h1),
            ("h2", self.h2),
            ("h3", self.h3),
            ("h4", self.h4),
            ("h5", self.h5),
            ("h6", self.h6),
        ]
    }
}

/// Aggregate result of analysing one page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PageReport {
    pub html_version: HtmlVersion,

    /// Trimmed text of the first `<title>`, empty when absent
    pub page_title: String,

    pub heading_counts: HeadingCounts,

    pub internal_link_count: usize,

    pub external_link_count: usize,

    /// Links whose probe failed or returned a status >= 400.
    /// Orthogonal to the internal/external split.
    pub inaccessible_link_count: usize,

    pub has_login_form: bool,

    /// True when the shared probing deadline fired before every link got a verdict
    pub link_check_truncated: bool,
}

impl PageReport {
    /// Total number of links that received a verdict
    pub fn checked_link_count(&self) -> usize {
        self.internal_link_count + self.external_link_count
    }
}
