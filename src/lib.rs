//! Web Analyzer: single-page HTML structure and link report
//!
//! This crate fetches one web page, parses it, and reports its HTML version,
//! title, heading counts, internal/external/inaccessible link counts and
//! whether it contains a login form.

pub mod analyzer;
pub mod config;
pub mod output;
pub mod report;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for analysis operations
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid target URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Failed to fetch {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("Unexpected status code {status} from {url}")]
    BadStatus { url: String, status: u16 },

    #[error("HTML parse error for {url}: {message}")]
    HtmlParse { url: String, message: String },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Analysis task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::AnalysisState,
        to: state::AnalysisState,
    },
}

impl AnalyzerError {
    /// Classifies the error for callers that map failures to their own status codes
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Transport { .. } => FailureKind::Transport,
            Self::BadStatus { .. } => FailureKind::BadStatus,
            Self::HtmlParse { .. } => FailureKind::Parse,
            Self::Timeout { .. } => FailureKind::Timeout,
            Self::InvalidUrl { .. } => FailureKind::InvalidUrl,
            Self::Config(_) | Self::Client(_) | Self::Task(_) | Self::InvalidTransition { .. } => {
                FailureKind::Internal
            }
        }
    }

    /// Returns the observed HTTP status for `BadStatus` failures
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::BadStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure classification exposed to the calling layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// DNS failure, connection refused, or a broken body read
    Transport,
    /// The target answered with something other than 200
    BadStatus,
    /// The body could not be turned into a document tree
    Parse,
    /// The fetch did not complete within its timeout
    Timeout,
    /// The target string is not an absolute URL
    InvalidUrl,
    /// Anything else (client construction, task failure, config)
    Internal,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "fetch-transport-error",
            Self::BadStatus => "fetch-bad-status",
            Self::Parse => "parse-error",
            Self::Timeout => "timeout",
            Self::InvalidUrl => "invalid-url",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;

// Re-export commonly used types
pub use analyzer::{analyze_page, Analyzer};
pub use config::Config;
pub use report::{HeadingCounts, HtmlVersion, PageReport};
pub use state::AnalysisState;
pub use url::{classify_link, validate_target_url, LinkLocality};
