//! Markdown report generation
//!
//! This module renders an analysis as a human-readable markdown document.

use crate::output::types::{AnalysisOutput, FailureOutput};

/// Formats an analysis as markdown
pub fn format_markdown_report(output: &AnalysisOutput) -> String {
    let report = &output.report;
    let mut md = String::new();

    md.push_str("# Web Page Analysis\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **URL**: {}\n", output.url));
    md.push_str(&format!("- **Analyzed**: {}\n", output.analyzed_at.to_rfc3339()));
    md.push_str(&format!(
        "- **Duration**: {} ms ({:.2} seconds)\n\n",
        output.elapsed_ms,
        output.elapsed_ms as f64 / 1000.0
    ));

    // Document structure
    md.push_str("## Document\n\n");
    md.push_str(&format!("- **HTML Version**: {}\n", report.html_version));
    if report.page_title.is_empty() {
        md.push_str("- **Title**: _(none)_\n");
    } else {
        md.push_str(&format!("- **Title**: {}\n", report.page_title));
    }
    md.push_str(&format!(
        "- **Login Form**: {}\n\n",
        if report.has_login_form { "yes" } else { "no" }
    ));

    // Headings
    md.push_str("## Headings\n\n");
    md.push_str("| Level | Count |\n");
    md.push_str("|-------|-------|\n");
    for (level, count) in report.heading_counts.levels() {
        md.push_str(&format!("| {} | {} |\n", level, count));
    }
    md.push('\n');

    // Links
    md.push_str("## Links\n\n");
    md.push_str("| Kind | Count |\n");
    md.push_str("|------|-------|\n");
    md.push_str(&format!("| Internal | {} |\n", report.internal_link_count));
    md.push_str(&format!("| External | {} |\n", report.external_link_count));
    md.push_str(&format!(
        "| Inaccessible | {} |\n\n",
        report.inaccessible_link_count
    ));

    if report.link_check_truncated {
        md.push_str(
            "> Link checking hit its deadline; counts cover only the links checked in time.\n\n",
        );
    }

    md
}

/// Formats a failed analysis as markdown
pub fn format_markdown_failure(failure: &FailureOutput) -> String {
    let mut md = String::new();
    md.push_str("# Web Page Analysis Failed\n\n");
    md.push_str(&format!("- **URL**: {}\n", failure.url));
    md.push_str(&format!("- **Error**: {}\n", failure.error));
    if let Some(status) = failure.status_code {
        md.push_str(&format!("- **Status Code**: {}\n", status));
    }
    md.push_str(&format!("- **Message**: {}\n", failure.message));
    md
}
