//! Output envelope types
//!
//! This module defines the values handed to the renderers: a successful
//! analysis wrapped with its run metadata, and a classified failure.

use crate::report::PageReport;
use crate::AnalyzerError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A finished analysis with the metadata of the run that produced it
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutput {
    /// The URL that was analysed
    pub url: String,

    /// When the analysis finished
    pub analyzed_at: DateTime<Utc>,

    /// Wall-clock time spent on the analysis
    pub elapsed_ms: u64,

    #[serde(flatten)]
    pub report: PageReport,
}

impl AnalysisOutput {
    pub fn new(url: impl Into<String>, report: PageReport, elapsed: Duration) -> Self {
        Self {
            url: url.into(),
            analyzed_at: Utc::now(),
            elapsed_ms: elapsed.as_millis() as u64,
            report,
        }
    }
}

/// A failed analysis, classified for the caller
#[derive(Debug, Clone, Serialize)]
pub struct FailureOutput {
    pub url: String,

    /// Failure kind label, e.g. `fetch-bad-status`
    pub error: &'static str,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl FailureOutput {
    pub fn from_error(url: impl Into<String>, error: &AnalyzerError) -> Self {
        Self {
            url: url.into(),
            error: error.kind().as_str(),
            message: error.to_string(),
            status_code: error.status_code(),
        }
    }
}
