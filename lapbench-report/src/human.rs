//! Human-Readable Output
//!
//! Terminal rendering of a run:
//! - Headline score (2 decimals, half-up; `undefined` when degenerate)
//! - Comparison chart against the baseline table
//! - One line per test with its average lap time (3 decimals)
//! - Run summary

use crate::chart::render_comparison_chart;
use crate::report::Report;
use lapbench_stats::{SECONDS_DIGITS, format_rounded};

/// Format a report for human-readable terminal display
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();
    let suite = suite_label(report);

    output.push('\n');
    output.push_str("LapBench Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    output.push_str(&format!(
        "The {} benchmark suite has been run with {} laps per test.\n\n",
        suite, report.meta.laps
    ));
    output.push_str(&format!(
        "Your {} score is {} (Higher is better).\n",
        suite, report.scores.score
    ));

    if !report.baselines.is_empty() {
        output.push_str("\nComparison\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&render_comparison_chart(
            &report.baselines,
            report.scores.score,
        ));
    }

    output.push_str("\nTests\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');

    if report.scores.results.is_empty() {
        output.push_str("  No tests were run.\n");
    }

    for result in &report.scores.results {
        output.push_str(&format!(
            "  The {} test took {} seconds.",
            result.test_name,
            format_rounded(result.average_time_secs, SECONDS_DIGITS)
        ));
        if !result.description.is_empty() {
            output.push(' ');
            output.push_str(&result.description);
        }
        output.push('\n');
    }

    output.push_str("\nSummary\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  Tests: {}  Laps: {}  Measured: {:.3} s\n",
        report.summary.total_tests, report.summary.total_laps, report.summary.measured_secs
    ));
    output.push_str(&format!(
        "  Duration: {:.2} ms\n",
        report.summary.total_duration_ms
    ));

    output
}

fn suite_label(report: &Report) -> String {
    let suite = &report.meta.suite;
    match (suite.title.is_empty(), suite.version.is_empty()) {
        (true, _) => "LapBench".to_string(),
        (false, true) => suite.title.clone(),
        (false, false) => format!("{} {}", suite.title, suite.version),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::BaselineReference;
    use crate::report::fixtures::{report, result};

    #[test]
    fn test_headline_score_two_decimals() {
        let output = format_human_output(&report(
            vec![result("a", 0.5), result("b", 0.25)],
            Vec::new(),
        ));
        assert!(output.contains("Your jsDOM 1 score is 1.33 (Higher is better)."));
    }

    #[test]
    fn test_per_test_lines() {
        let output = format_human_output(&report(vec![result("tableCreation", 0.0104)], Vec::new()));
        assert!(output.contains("The tableCreation test took 0.01 seconds. Measures tableCreation."));
    }

    #[test]
    fn test_undefined_score() {
        let output = format_human_output(&report(Vec::new(), Vec::new()));
        assert!(output.contains("score is undefined"));
        assert!(output.contains("No tests were run."));
    }

    #[test]
    fn test_comparison_section_only_with_baselines() {
        let without = format_human_output(&report(vec![result("a", 0.1)], Vec::new()));
        assert!(!without.contains("Comparison"));

        let with = format_human_output(&report(
            vec![result("a", 0.1)],
            BaselineReference::jsdom_browsers(),
        ));
        assert!(with.contains("Comparison"));
        assert!(with.contains("Google Chrome 7"));
        assert!(with.contains("You"));
    }

    #[test]
    fn test_results_keep_registration_order() {
        let output = format_human_output(&report(
            vec![result("zeta", 0.1), result("alpha", 0.1)],
            Vec::new(),
        ));
        let zeta = output.find("The zeta test").unwrap();
        let alpha = output.find("The alpha test").unwrap();
        assert!(zeta < alpha);
    }
}
