#![warn(missing_docs)]
//! LapBench Report - Results and Rendering
//!
//! Generates various output formats:
//! - Human (terminal text with a comparison chart)
//! - JSON (machine-readable)
//! - CSV (spreadsheet-compatible)

mod chart;
mod csv;
mod human;
mod json;
mod report;

pub use chart::render_comparison_chart;
pub use csv::generate_csv_report;
pub use human::format_human_output;
pub use json::generate_json_report;
pub use report::{
    BaselineReference, Report, ReportMeta, ReportSummary, ScoreReport, SuiteInfo, SystemInfo,
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON with full schema
    Json,
    /// CSV for spreadsheets
    Csv,
    /// Human-readable terminal output
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Render a report in the selected format
pub fn render(report: &Report, format: OutputFormat) -> Result<String, serde_json::Error> {
    Ok(match format {
        OutputFormat::Json => generate_json_report(report)?,
        OutputFormat::Csv => generate_csv_report(report),
        OutputFormat::Human => format_human_output(report),
    })
}
