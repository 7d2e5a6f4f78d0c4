//! Report Building
//!
//! ```text
//! Vec<RunResult> (registration order)
//!        │
//!        ▼
//!   ScoreReport      score = 1 / Σ average, undefined when the sum is zero
//!        │
//!        ▼
//!   Report           + meta, baselines, summary
//! ```

use lapbench_core::RunResult;
use lapbench_report::{BaselineReference, Report, ReportMeta, ReportSummary, ScoreReport};

/// Build a complete Report from run results
///
/// `total_duration_ms` is the wall-clock time of the whole run, untimed
/// setup and teardown included.
pub fn build_report(
    results: Vec<RunResult>,
    meta: ReportMeta,
    baselines: Vec<BaselineReference>,
    total_duration_ms: f64,
) -> Report {
    let summary = ReportSummary::from_results(&results, total_duration_ms);
    let scores = ScoreReport::from_results(results);

    tracing::debug!(
        tests = summary.total_tests,
        score = %scores.score,
        "report built"
    );

    Report {
        meta,
        scores,
        baselines,
        summary,
    }
}
