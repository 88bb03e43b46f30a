//! Plain-text report rendering for terminals

use crate::output::types::{AnalysisOutput, FailureOutput};

/// Formats an analysis as aligned plain text
pub fn format_text_report(output: &AnalysisOutput) -> String {
    let report = &output.report;
    let headings = report
        .heading_counts
        .levels()
        .iter()
        .map(|(level, count)| format!("{}={}", level, count))
        .collect::<Vec<_>>()
        .join(" ");

    let mut text = String::new();
    text.push_str(&format!("URL:           {}\n", output.url));
    text.push_str(&format!("HTML version:  {}\n", report.html_version));
    text.push_str(&format!("Title:         {}\n", report.page_title));
    text.push_str(&format!("Headings:      {}\n", headings));
    text.push_str(&format!(
        "Links:         {} internal, {} external, {} inaccessible\n",
        report.internal_link_count, report.external_link_count, report.inaccessible_link_count
    ));
    text.push_str(&format!(
        "Login form:    {}\n",
        if report.has_login_form { "yes" } else { "no" }
    ));
    if report.link_check_truncated {
        text.push_str("Note:          link check deadline exceeded, counts are partial\n");
    }
    text.push_str(&format!("Elapsed:       {} ms\n", output.elapsed_ms));
    text
}

/// Formats a failed analysis as a single line
pub fn format_text_failure(failure: &FailureOutput) -> String {
    format!("error [{}]: {}\n", failure.error, failure.message)
}
