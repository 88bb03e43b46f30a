//! Output module for rendering analysis reports
//!
//! This module handles:
//! - Wrapping a report with its run metadata
//! - Rendering reports and failures as JSON, markdown or plain text
//! - Writing rendered output to a file

mod markdown;
mod text;
mod types;

pub use markdown::{format_markdown_failure, format_markdown_report};
pub use text::{format_text_failure, format_text_report};
pub use types::{AnalysisOutput, FailureOutput, OutputError, OutputResult};

use clap::ValueEnum;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// Markdown document
    Markdown,
    /// Aligned plain text
    Text,
}

/// Renders a successful analysis in the given format
pub fn render_report(output: &AnalysisOutput, format: OutputFormat) -> OutputResult<String> {
    Ok(match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(output)?;
            json.push('\n');
            json
        }
        OutputFormat::Markdown => format_markdown_report(output),
        OutputFormat::Text => format_text_report(output),
    })
}

/// Renders a failed analysis in the given format
pub fn render_failure(failure: &FailureOutput, format: OutputFormat) -> OutputResult<String> {
    Ok(match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(failure)?;
            json.push('\n');
            json
        }
        OutputFormat::Markdown => format_markdown_failure(failure),
        OutputFormat::Text => format_text_failure(failure),
    })
}

/// Writes rendered output to a file, replacing any existing content
///
/// # Arguments
///
/// * `rendered` - Output of `render_report` or `render_failure`
/// * `output_path` - Destination file
pub fn write_output(rendered: &str, output_path: &Path) -> OutputResult<()> {
    let mut file = File::create(output_path)?;
    file.write_all(rendered.as_bytes())?;
    Ok(())
}
