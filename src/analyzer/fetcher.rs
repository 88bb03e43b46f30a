//! HTTP fetcher for the analysed page
//!
//! This module handles the single page request of an analysis:
//! - Building the HTTP client with the configured user agent and timeout
//! - Classifying transport failures (timeout vs. everything else)
//! - Rejecting any status other than 200
//! - Parsing the body into a `Document`, keeping the raw markup alongside

use crate::analyzer::parser::{parse_document, Document};
use crate::config::FetchConfig;
use crate::AnalyzerError;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// A fetched and parsed page
#[derive(Debug)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: Url,
    /// Response body as received, used for doctype sniffing
    pub raw_html: String,
    /// Parsed document tree
    pub document: Document,
}

/// Builds the HTTP client used for the page fetch
///
/// The timeout covers the whole request, including reading the body.
///
/// # Example
///
/// ```no_run
/// use web_analyzer::analyzer::build_http_client;
/// use web_analyzer::config::FetchConfig;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and parses it into a document
///
/// # Failure Classification
///
/// | Condition | Error |
/// |-----------|-------|
/// | Request or body read timed out | `Timeout` |
/// | DNS failure, connection refused, TLS, broken body | `Transport` |
/// | Any status other than 200 | `BadStatus` |
/// | Document nested beyond `max_depth` | `HtmlParse` |
///
/// Nothing is retried.
pub async fn fetch_document(
    client: &Client,
    url: &Url,
    max_depth: usize,
) -> Result<FetchedPage, AnalyzerError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify_transport_error(url, e))?;

    let status = response.status();
    if status != StatusCode::OK {
        tracing::warn!("Unexpected status code {} from {}", status.as_u16(), url);
        return Err(AnalyzerError::BadStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let final_url = response.url().clone();
    let raw_html = response
        .text()
        .await
        .map_err(|e| classify_transport_error(url, e))?;

    // Tree construction is CPU-bound; keep it off the async workers
    let (raw_html, parsed) = tokio::task::spawn_blocking(move || {
        let parsed = parse_document(&raw_html, max_depth);
        (raw_html, parsed)
    })
    .await?;

    let document = parsed.map_err(|e| {
        tracing::error!("Failed to parse HTML from {}: {}", url, e);
        AnalyzerError::HtmlParse {
            url: url.to_string(),
            message: e.to_string(),
        }
    })?;

    tracing::info!(
        "Fetched {} ({} bytes, status {}, {} nodes)",
        final_url,
        raw_html.len(),
        status.as_u16(),
        document.len()
    );

    Ok(FetchedPage {
        final_url,
        raw_html,
        document,
    })
}

/// Maps a reqwest failure onto the timeout / transport split
fn classify_transport_error(url: &Url, error: reqwest::Error) -> AnalyzerError {
    if error.is_timeout() {
        tracing::error!("Request to {} timed out", url);
        AnalyzerError::Timeout {
            url: url.to_string(),
        }
    } else {
        tracing::error!("Failed to fetch {}: {}", url, error);
        AnalyzerError::Transport {
            url: url.to_string(),
            source: error,
        }
    }
}
