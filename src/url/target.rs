use crate::UrlError;
use url::Url;

/// Validates a target URL before it is handed to the analyzer
///
/// Accepts only absolute `http`/`https` URLs that carry a host.
///
/// # Examples
///
/// ```
/// use web_analyzer::url::validate_target_url;
///
/// assert!(validate_target_url("https://example.com/").is_ok());
/// assert!(validate_target_url("ftp://example.com/").is_err());
/// assert!(validate_target_url("/relative").is_err());
/// ```
pub fn validate_target_url(target: &str) -> Result<Url, UrlError> {
    let url = Url::parse(target.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingHost),
    }
}

/// Resolves a harvested link against the page's base URL
///
/// Handles absolute, protocol-relative, root-relative, path-relative and
/// fragment links. The link is used verbatim apart from the URL parser's own
/// whitespace handling.
pub fn resolve_link(link: &str, base: &Url) -> Result<Url, UrlError> {
    base.join(link).map_err(|e| UrlError::Parse(e.to_string()))
}
