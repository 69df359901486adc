use crate::model::{OptionSet, ScanReport};
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// Renders the `--results` summary of a scan.
///
/// `kept` is the number of packages left after filtering.
pub fn render_summary(report: &ScanReport, kept: usize, options: &OptionSet) -> String {
    let options = if options.is_empty() {
        "-".to_string()
    } else {
        options.to_string()
    };

    let rows = vec![
        SummaryRow {
            metric: "Files parsed",
            value: report.files_parsed.to_string(),
        },
        SummaryRow {
            metric: "Files skipped (no package clause)",
            value: report.empty_files.to_string(),
        },
        SummaryRow {
            metric: "Unreadable entries",
            value: report.walk_errors.to_string(),
        },
        SummaryRow {
            metric: "Imports found",
            value: report.packages.len().to_string(),
        },
        SummaryRow {
            metric: "Packages reported",
            value: kept.to_string(),
        },
        SummaryRow {
            metric: "Options",
            value: options,
        },
    ];

    format!(
        "Scan completed at: {}\n{}",
        report.scan_time.format("%Y-%m-%d %H:%M:%S UTC"),
        Table::new(rows).with(Style::rounded())
    )
}

/// Prints the summary to stderr so stdout carries only results.
pub fn print_summary(report: &ScanReport, kept: usize, options: &OptionSet) {
    eprintln!();
    eprintln!("{}", render_summary(report, kept, options));
}
