//! Report Data Structures

use chrono::{DateTime, Utc};
use lapbench_core::{LapCount, RunResult};
use lapbench_stats::{Score, compute_score};
use serde::{Deserialize, Serialize};

/// Complete run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub meta: ReportMeta,
    #[serde(flatten)]
    pub scores: ScoreReport,
    pub baselines: Vec<BaselineReference>,
    pub summary: ReportSummary,
}

impl Report {
    /// Look up a test result by name
    pub fn result(&self, test_name: &str) -> Option<&RunResult> {
        self.scores.result(test_name)
    }
}

/// Score plus the per-test results it was computed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Suite score, `null` in JSON when undefined
    pub score: Score,
    /// Per-test results in registration order
    pub results: Vec<RunResult>,
}

impl ScoreReport {
    /// Aggregate a completed run
    pub fn from_results(results: Vec<RunResult>) -> Self {
        let score = compute_score(results.iter().map(|r| r.average_time_secs));
        Self { score, results }
    }

    /// Look up a test result by name
    pub fn result(&self, test_name: &str) -> Option<&RunResult> {
        self.results.iter().find(|r| r.test_name == test_name)
    }
}

/// Reference score shown for comparison; never interpreted by the harness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineReference {
    /// Display label (e.g. a browser and version)
    pub label: String,
    /// Score recorded for that label
    pub reference_score: f64,
}

impl BaselineReference {
    /// Create a reference entry
    pub fn new(label: impl Into<String>, reference_score: f64) -> Self {
        Self {
            label: label.into(),
            reference_score,
        }
    }

    /// Browser scores published with the jsDOM suite, measured on
    /// Windows Server 2003 SP2 with an Intel Core 2 Duo E4600 2.4 GHz
    pub fn jsdom_browsers() -> Vec<Self> {
        vec![
            Self::new("Microsoft Internet Explorer 8 (8.0.6001.18702)", 0.76),
            Self::new("Mozilla Firefox 3.6 (3.6.11)", 1.94),
            Self::new("Opera 10 (10.63 build 3516)", 3.85),
            Self::new("Apple Safari 5 (5.0.2 (7533.18.5))", 6.85),
            Self::new("Google Chrome 7 (7.0.514.41)", 6.89),
        ]
    }
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    /// Harness version
    pub version: String,
    pub suite: SuiteInfo,
    pub timestamp: DateTime<Utc>,
    pub laps: LapCount,
    /// Clock the timers read ("monotonic" or "system")
    pub clock: String,
    pub system: SystemInfo,
}

/// Identity of the suite that was run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuiteInfo {
    pub title: String,
    pub version: String,
}

/// System information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    pub cpu: String,
    pub cpu_cores: u32,
}

/// Report summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_tests: usize,
    pub total_laps: u64,
    /// Measured (main-only) time over all tests and laps
    pub measured_secs: f64,
    /// Wall-clock duration of the whole run, setup and teardown included
    pub total_duration_ms: f64,
}

impl ReportSummary {
    /// Summarise a set of results
    pub fn from_results(results: &[RunResult], total_duration_ms: f64) -> Self {
        Self {
            total_tests: results.len(),
            total_laps: results.iter().map(|r| u64::from(r.laps)).sum(),
            measured_secs: results.iter().map(|r| r.total_time_secs).sum(),
            total_duration_ms,
        }
    }
}
