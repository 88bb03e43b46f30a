//! Structural extractors and the link harvester
//!
//! Each function is a pure, read-only pass over a `Document` (or, for the
//! version detector, the raw markup), so any number of them may run at the
//! same time against one shared tree.

use crate::analyzer::parser::{Document, Element, NodeRef};
use crate::report::{HeadingCounts, HtmlVersion};
use regex::Regex;
use std::sync::OnceLock;

/// Number of leading characters inspected for a doctype
const DOCTYPE_SCAN_CHARS: usize = 1000;

/// Substrings of an `<input type=...>` that indicate a credential field
const AUTH_INPUT_TYPES: &[&str] = &["password", "otp", "code"];

/// Button text/attribute keywords that indicate a login action
const LOGIN_KEYWORDS: &[&str] = &["login", "log in", "sign in", "signin"];

fn doctype_patterns() -> &'static [(HtmlVersion, Regex); 3] {
    static PATTERNS: OnceLock<[(HtmlVersion, Regex); 3]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (
                HtmlVersion::Html5,
                Regex::new(r"(?i)<!DOCTYPE\s+html>").expect("valid doctype pattern"),
            ),
            (
                HtmlVersion::Xhtml10,
                Regex::new(r#"(?i)<!DOCTYPE\s+html\s+PUBLIC\s+"[^"]*//DTD\s+XHTML"#)
                    .expect("valid doctype pattern"),
            ),
            (
                HtmlVersion::Html401,
                Regex::new(r#"(?i)<!DOCTYPE\s+HTML\s+PUBLIC\s+"[^"]*//DTD\s+HTML\s+4"#)
                    .expect("valid doctype pattern"),
            ),
        ]
    })
}

/// Detects the HTML version from the doctype in the first 1000 characters
///
/// Patterns are tried in order HTML5, XHTML 1.0, HTML 4.01; first match wins.
pub fn detect_html_version(raw_html: &str) -> HtmlVersion {
    let head = match raw_html.char_indices().nth(DOCTYPE_SCAN_CHARS) {
        Some((end, _)) => &raw_html[..end],
        None => raw_html,
    };

    doctype_patterns()
        .iter()
        .find(|(_, pattern)| pattern.is_match(head))
        .map(|(version, _)| *version)
        .unwrap_or(HtmlVersion::Unknown)
}

/// Extracts the trimmed text of the first `<title>` element
///
/// Returns an empty string when there is no title or it has no text.
pub fn extract_title(doc: &Document) -> String {
    doc.elements()
        .find(|(_, el)| el.name() == "title")
        .map(|(node, _)| node.text_content().trim().to_string())
        .unwrap_or_default()
}

/// Counts `h1`..`h6` elements at any nesting depth
pub fn count_headings(doc: &Document) -> HeadingCounts {
    let mut counts = HeadingCounts::default();
    for (_, el) in doc.elements() {
        counts.record(el.name());
    }
    counts
}

/// Collects the `href` of every `<a>` element that has one, in document order
///
/// Values are returned verbatim: no trimming, resolution or deduplication.
/// An `<a>` without `href` contributes nothing; `href=""` contributes an empty string.
pub fn harvest_links(doc: &Document) -> Vec<String> {
    doc.elements()
        .filter(|(_, el)| el.name() == "a")
        .filter_map(|(_, el)| el.attr("href"))
        .map(str::to_string)
        .collect()
}

/// Returns true if any `<form>` contains a credential input or a login button
///
/// A form qualifies when it holds either
/// - an `<input>` whose `type` contains `password`, `otp` or `code`, or
/// - a `<button>` / `<input type="submit">` whose text or attribute values
///   mention `login`, `log in`, `sign in` or `signin`.
///
/// All comparisons are case-insensitive substring matches.
pub fn has_login_form(doc: &Document) -> bool {
    doc.elements()
        .filter(|(_, el)| el.name() == "form")
        .any(|(form, _)| form_has_auth_indicators(form))
}

fn form_has_auth_indicators(form: NodeRef<'_>) -> bool {
    form.descendants().any(|node| match node.as_element() {
        Some(el) if el.name() == "input" && is_auth_input(el) => true,
        Some(el) if is_button_like(el) => has_login_keyword(node, el),
        _ => false,
    })
}

fn is_auth_input(input: &Element) -> bool {
    input.attr("type").is_some_and(|kind| {
        let kind = kind.to_lowercase();
        AUTH_INPUT_TYPES.iter().any(|auth| kind.contains(auth))
    })
}

fn is_button_like(el: &Element) -> bool {
    match el.name() {
        "button" => true,
        "input" => el
            .attr("type")
            .is_some_and(|kind| kind.eq_ignore_ascii_case("submit")),
        _ => false,
    }
}

fn has_login_keyword(node: NodeRef<'_>, el: &Element) -> bool {
    let mut haystack = node.text_content().to_lowercase();
    for (_, value) in el.attrs() {
        haystack.push(' ');
        haystack.push_str(&value.to_lowercase());
    }
    LOGIN_KEYWORDS.iter().any(|kw| haystack.contains(kw))
}
