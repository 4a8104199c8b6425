//! Report rendering
//!
//! Turns a [`QualityReport`] into the fixed-layout text summary shown to the
//! operator. Rendering is a pure projection of the report: the same report
//! always yields the same bytes.

use std::path::Path;

use indexmap::IndexMap;

use super::diagnostics;
use super::error::ReportError;
use super::model::{Issue, QualityReport, Summary};

const TITLE: &str = "DATA QUALITY SUMMARY REPORT";
const HEADER_WIDTH: usize = 58;
const PANEL_WIDTH: usize = 48;

/// Samples shown per issue
pub const MAX_SAMPLES: usize = 3;

pub const NO_ISSUES: &str = "✓ No data quality issues detected!";
pub const NO_ANOMALIES: &str = "✓ No significant anomalies detected.";

/// Read the report at `path` and render it
pub fn render_file(path: impl AsRef<Path>) -> Result<String, ReportError> {
    let report = QualityReport::load(path)?;
    Ok(render(&report))
}

/// Render a report as newline-separated text
pub fn render(report: &QualityReport) -> String {
    let mut lines = Vec::new();

    header(report, &mut lines);
    overview(&report.summary, &mut lines);
    issues(&report.issues, &mut lines);
    anomalies(&report.issues, &mut lines);
    output_files(&report.output_files, &mut lines);

    lines.join("\n")
}

fn header(report: &QualityReport, lines: &mut Vec<String>) {
    let rule = "═".repeat(HEADER_WIDTH);
    lines.push(String::new());
    lines.push(format!("╔{rule}╗"));
    lines.push(format!("║{:^width$}║", TITLE, width = HEADER_WIDTH));
    lines.push(format!("╚{rule}╝"));
    lines.push(String::new());
    lines.push(format!("  Pipeline:       {}", report.pipeline_name));
    lines.push(format!("  Run at:         {}", report.run_timestamp));
    lines.push(format!("  Spec from:      {}", report.spec_generated_by));
    lines.push(String::new());
}

fn overview(summary: &Summary, lines: &mut Vec<String>) {
    let counts = [
        ("Total input rows:", summary.total_input_rows),
        ("Rows after dedup:", summary.rows_after_dedup),
        ("Clean rows:", summary.clean_rows),
        ("Flagged rows:", summary.flagged_rows),
    ];

    lines.push(panel_top("OVERVIEW"));
    for (label, value) in counts {
        lines.push(boxed_row(&format!("  {:<20}{:>8}", label, value)));
    }
    lines.push(boxed_row(&format!(
        "  {:<20}{:>7}%",
        "Pass rate:",
        summary.pass_rate_pct.to_string()
    )));
    lines.push(boxed_row(&format!(
        "  {:<20}{:>8}",
        "Issues detected:", summary.total_issues_found
    )));
    lines.push(panel_bottom());
    lines.push(String::new());
}

fn issues(issues: &[Issue], lines: &mut Vec<String>) {
    if issues.is_empty() {
        lines.push(format!("  {NO_ISSUES}"));
    } else {
        lines.push(panel_top("ISSUES DETAIL"));
        for issue in issues {
            lines.push(open_row(&format!("  [{}] {}", issue.rule_id, issue.rule_name)));
            lines.push(open_row(&format!("     → {}", issue.detail)));
            if let Some(samples) = issue.samples(MAX_SAMPLES) {
                lines.push(open_row(&format!("     → Samples: {samples}")));
            }
            lines.push(open_row(""));
        }
        lines.push(panel_bottom());
    }
    lines.push(String::new());
}

/// Issues whose rule has no diagnostic contribute nothing here
fn anomalies(issues: &[Issue], lines: &mut Vec<String>) {
    lines.push(panel_top("KEY ANOMALIES & RECOMMENDATIONS"));

    let mut found = false;
    for issue in issues {
        let Some(diag) = diagnostics::lookup(&issue.rule_id) else {
            continue;
        };
        found = true;
        lines.push(open_row(&format!(
            "  ⚠ {}: {}",
            diag.category,
            diag.warning(&issue.detail)
        )));
        lines.push(open_row(&format!("    → {}", diag.recommendation)));
    }

    if !found {
        lines.push(open_row(&format!("  {NO_ANOMALIES}")));
    }

    lines.push(panel_bottom());
    lines.push(String::new());
}

fn output_files(files: &IndexMap<String, String>, lines: &mut Vec<String>) {
    lines.push("  Output files:".to_string());
    for (label, path) in files {
        lines.push(format!("    • {label}: {path}"));
    }
    lines.push(String::new());
}

fn panel_top(title: &str) -> String {
    let label = format!(" {title} ");
    let dashes = PANEL_WIDTH.saturating_sub(label.chars().count());
    let left = dashes / 2;
    format!(
        "  ┌{}{}{}┐",
        "─".repeat(left),
        label,
        "─".repeat(dashes - left)
    )
}

fn panel_bottom() -> String {
    format!("  └{}┘", "─".repeat(PANEL_WIDTH))
}

/// Row with a right border, for fixed-width content
fn boxed_row(content: &str) -> String {
    format!("  │{:<width$}│", content, width = PANEL_WIDTH)
}

/// Row without a right border, for free text of any length
fn open_row(content: &str) -> String {
    format!("  │{content}")
}
