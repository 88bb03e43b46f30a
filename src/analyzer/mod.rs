//! Analyzer module: the page analysis pipeline
//!
//! This module contains the core analysis logic, including:
//! - Fetching and parsing the target page
//! - Structural extraction (doctype, title, headings, login form)
//! - Link harvesting, classification and reachability probing
//! - Orchestration of all of the above into one `PageReport`

mod coordinator;
mod extract;
mod fetcher;
mod parser;
mod prober;

pub use coordinator::{check_links, LinkCheckSettings, LinkTally, LinkVerdict};
pub use extract::{
    count_headings, detect_html_version, extract_title, harvest_links, has_login_form,
};
pub use fetcher::{build_http_client, fetch_document, FetchedPage};
pub use parser::{parse_document, Document, Element, NodeId, NodeKind, NodeRef, ParseError};
pub use prober::{ProbeOutcome, Prober};

use crate::config::Config;
use crate::report::PageReport;
use crate::state::AnalysisState;
use crate::AnalyzerError;
use reqwest::Client;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Runs page analyses with a fixed configuration
///
/// HTTP clients are built once and reused across calls; every call gets its
/// own document, queues and counters.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: Arc<Config>,
    client: Client,
    prober: Prober,
    link_settings: LinkCheckSettings,
}

impl Analyzer {
    /// Creates an analyzer from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Analyzer)` - Ready to analyse pages
    /// * `Err(AnalyzerError)` - An HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, AnalyzerError> {
        let link_settings = LinkCheckSettings::from(&config.links);
        Self::with_link_settings(config, link_settings)
    }

    /// Creates an analyzer with explicit link-check settings
    ///
    /// Allows sub-second deadlines and timeouts, which the TOML config cannot express.
    pub fn with_link_settings(
        config: Config,
        link_settings: LinkCheckSettings,
    ) -> Result<Self, AnalyzerError> {
        let client = build_http_client(&config.fetch)?;
        let prober = Prober::new(&link_settings, &config.fetch.user_agent)?;

        Ok(Self {
            config: Arc::new(config),
            client,
            prober,
            link_settings,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyses the page at `target`
    ///
    /// # State Flow
    ///
    /// 1. *fetching*: request and parse the page; any failure ends the call
    ///    (→ *done*) with the failure returned to the caller
    /// 2. *analyzing*: four extractors and the harvest → probe pipeline run
    ///    concurrently against the shared, read-only document
    /// 3. *done*: once all five branches have joined, their outputs are merged
    ///
    /// Broken links never fail the analysis; they only raise the inaccessible count.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use web_analyzer::{Analyzer, Config};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let analyzer = Analyzer::new(Config::default())?;
    /// let report = analyzer.analyze("https://example.com/").await?;
    /// println!("{}: {} links", report.page_title, report.checked_link_count());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn analyze(&self, target: &str) -> Result<PageReport, AnalyzerError> {
        let started = Instant::now();
        let state = AnalysisState::Fetching;

        let base_url = Url::parse(target).map_err(|source| AnalyzerError::InvalidUrl {
            url: target.to_string(),
            source,
        })?;

        tracing::info!("Analyzing {}", base_url);

        let page = match fetch_document(&self.client, &base_url, self.config.parser.max_depth).await
        {
            Ok(page) => page,
            Err(e) => {
                state.advance(AnalysisState::Done)?;
                return Err(e);
            }
        };

        let state = state.advance(AnalysisState::Analyzing)?;
        let report = self.analyze_page_content(page, &base_url).await?;
        state.advance(AnalysisState::Done)?;

        tracing::info!(
            "Analysis of {} finished in {:?}: version {}, {} headings, {} internal / {} external / {} inaccessible links, login form: {}",
            base_url,
            started.elapsed(),
            report.html_version,
            report.heading_counts.total(),
            report.internal_link_count,
            report.external_link_count,
            report.inaccessible_link_count,
            report.has_login_form
        );

        Ok(report)
    }

    /// Runs the five analysis branches and merges their results
    ///
    /// Each branch owns its output; merging happens only after the join.
    async fn analyze_page_content(
        &self,
        page: FetchedPage,
        base_url: &Url,
    ) -> Result<PageReport, AnalyzerError> {
        let FetchedPage {
            final_url,
            raw_html,
            document,
        } = page;
        if final_url != *base_url {
            tracing::debug!(
                "{} redirected to {}; links still resolve against {}",
                base_url,
                final_url,
                base_url
            );
        }
        let raw_html: Arc<str> = Arc::from(raw_html);
        let document = Arc::new(document);

        let version = {
            let raw_html = Arc::clone(&raw_html);
            tokio::task::spawn_blocking(move || detect_html_version(&raw_html))
        };
        let title = {
            let document = Arc::clone(&document);
            tokio::task::spawn_blocking(move || extract_title(&document))
        };
        let headings = {
            let document = Arc::clone(&document);
            tokio::task::spawn_blocking(move || count_headings(&document))
        };
        let login_form = {
            let document = Arc::clone(&document);
            tokio::task::spawn_blocking(move || has_login_form(&document))
        };
        let links = {
            let document = Arc::clone(&document);
            let base_url = base_url.clone();
            let prober = self.prober.clone();
            let settings = self.link_settings.clone();
            tokio::spawn(async move {
                let harvested = harvest_links(&document);
                drop(document);
                tracing::debug!("Harvested {} links from {}", harvested.len(), base_url);
                check_links(harvested, &base_url, &prober, &settings).await
            })
        };

        let (version, title, headings, login_form, links) =
            tokio::join!(version, title, headings, login_form, links);
        let links = links?;

        Ok(PageReport {
            html_version: version?,
            page_title: title?,
            heading_counts: headings?,
            internal_link_count: links.internal,
            external_link_count: links.external,
            inaccessible_link_count: links.inaccessible,
            has_login_form: login_form?,
            link_check_truncated: links.deadline_exceeded,
        })
    }
}

/// Analyses a page with the default configuration
///
/// Convenience wrapper over `Analyzer::new(Config::default())?.analyze(target)`.
pub async fn analyze_page(target: &str) -> Result<PageReport, AnalyzerError> {
    Analyzer::new(Config::default())?.analyze(target).await
}
