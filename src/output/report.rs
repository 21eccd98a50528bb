//! Markdown summaries of batch runs
//!
//! Human-readable counterparts to the JSON export and revalidation
//! documents, printed by the CLI after a run.

use crate::crawler::{BulkExport, RevalidationReport, RevalidationStatus};

const MAX_LISTED_FAILURES: usize = 20;

/// Formats a bulk export as a markdown summary
pub fn format_export_summary(export: &BulkExport) -> String {
    let mut md = String::new();

    md.push_str("# Seo-Mirror Export Summary\n\n");
    md.push_str(&format!("- **Generated**: {}\n", export.generated_at.to_rfc3339()));
    md.push_str(&format!("- **Total Pages**: {}\n", export.total_pages));
    md.push_str(&format!("- **Successful**: {}\n", export.successful.len()));
    md.push_str(&format!("- **Failed**: {}\n", export.failed.len()));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n\n",
        percentage(export.successful.len(), export.total_pages)
    ));

    if !export.successful.is_empty() {
        md.push_str("## Pages\n\n");
        md.push_str("| Path | Title |\n");
        md.push_str("|------|-------|\n");
        for page in &export.successful {
            md.push_str(&format!("| {} | {} |\n", page.path, escape_cell(&page.seo.title)));
        }
        md.push('\n');
    }

    if !export.failed.is_empty() {
        md.push_str(&format!("## Top {} Failures\n\n", MAX_LISTED_FAILURES));
        md.push_str("| Path | Error |\n");
        md.push_str("|------|-------|\n");
        for failure in export.failed.iter().take(MAX_LISTED_FAILURES) {
            md.push_str(&format!("| {} | {} |\n", failure.path, escape_cell(&failure.error)));
        }
        if export.failed.len() > MAX_LISTED_FAILURES {
            md.push_str(&format!(
                "\n... and {} more\n",
                export.failed.len() - MAX_LISTED_FAILURES
            ));
        }
        md.push('\n');
    }

    md
}

/// Formats a revalidation report as a markdown summary
pub fn format_revalidation_summary(report: &RevalidationReport) -> String {
    let mut md = String::new();
    let refreshed = report.refreshed();

    md.push_str("# Seo-Mirror Revalidation Summary\n\n");
    md.push_str(&format!("- **Generated**: {}\n", report.generated_at.to_rfc3339()));
    md.push_str(&format!("- **Paths**: {}\n", report.total));
    md.push_str(&format!("- **Refreshed**: {}\n", refreshed));
    md.push_str(&format!("- **Fallback**: {}\n\n", report.total - refreshed));

    let fallbacks: Vec<_> = report
        .paths
        .iter()
        .filter_map(|entry| match &entry.status {
            RevalidationStatus::Fallback(error) => Some((entry.path.as_str(), error.as_str())),
            RevalidationStatus::Refreshed => None,
        })
        .collect();

    if !fallbacks.is_empty() {
        md.push_str("## Paths Served With Fallback\n\n");
        md.push_str("| Path | Error |\n");
        md.push_str("|------|-------|\n");
        for (path, error) in fallbacks.iter().take(MAX_LISTED_FAILURES) {
            md.push_str(&format!("| {} | {} |\n", path, escape_cell(error)));
        }
        md.push('\n');
    }

    md
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
