#![warn(missing_docs)]
//! # LapBench
//!
//! Lap-based micro-benchmark harness that reduces a whole suite to one
//! comparable score.
//!
//! - **Laps**: every test runs a fixed number of laps (10 unless configured)
//! - **Untimed setup and teardown**: only the main operation is measured
//! - **Shared environment**: tests mutate one environment that a suite-wide
//!   teardown wipes after every lap
//! - **Single score**: `1 / Σ average lap time`, higher is better
//! - **Baselines**: chart the score against reference scores
//!
//! ## Quick Start
//!
//! ```ignore
//! use lapbench::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut suite = Suite::new("vectors", Vec::<u64>::new())
//!         .with_teardown(|v: &mut Vec<u64>| {
//!             v.clear();
//!             Ok(())
//!         });
//!
//!     suite.register(
//!         "fill",
//!         "Pushes ten thousand integers.",
//!         |_| Ok(()),
//!         |v: &mut Vec<u64>, ()| {
//!             v.extend(0..10_000);
//!             Ok(())
//!         },
//!     )?;
//!
//!     lapbench::run(suite)
//! }
//! ```
//!
//! ## Using the pieces directly
//!
//! ```ignore
//! let runner = TrialRunner::monotonic();
//! let results = runner.run_all(&registry, &mut env, LapCount::DEFAULT, |env| {
//!     env.clear();
//!     Ok(())
//! })?;
//! let score = compute_score(results.iter().map(|r| r.average_time_secs));
//! println!("score: {}", score);
//! ```

// Re-export core types
pub use lapbench_core::{
    BoxError, Clock, LapCount, ManualClock, MonotonicClock, OperationError, Panicked, Phase,
    RegistryError, RunObserver, RunResult, SystemClock, TestDefinition, TestRegistry, Timer,
    TimerPhase, TrialRunner,
};

// Re-export stats
pub use lapbench_stats::{Score, compute_score, format_rounded, round_half_up};

// Re-export reporting
pub use lapbench_report::{
    BaselineReference, OutputFormat, Report, ReportMeta, ReportSummary, ScoreReport, SuiteInfo,
    SystemInfo, format_human_output, generate_csv_report, generate_json_report,
    render_comparison_chart,
};

// Re-export the CLI surface
pub use lapbench_cli::{
    Cli, ClockKind, ExecutionConfig, Executor, LapConfig, Suite, build_report, build_report_meta,
    execute_suite, run_with_cli,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        BaselineReference, BoxError, LapCount, RunResult, Score, Suite, TestDefinition,
        TestRegistry, Timer, TrialRunner, compute_score,
    };
}

/// Run the LapBench CLI harness over a suite.
///
/// Call this from your suite binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     lapbench::run(build_suite()?)
/// }
/// ```
pub use lapbench_cli::run;
