//! Suite Execution
//!
//! Runs a [`Suite`] in-process on the calling thread. Progress is shown on
//! stderr with one tick per lap; the bar stays hidden when stderr is not a
//! terminal.

use crate::config::ClockKind;
use crate::suite::Suite;
use indicatif::{ProgressBar, ProgressStyle};
use lapbench_core::{LapCount, OperationError, RunObserver, RunResult, TrialRunner};

/// Settings for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionConfig {
    /// Laps per test
    pub laps: LapCount,
    /// Clock the lap timers read
    pub clock: ClockKind,
    /// Draw a progress bar
    pub progress: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            laps: LapCount::DEFAULT,
            clock: ClockKind::default(),
            progress: true,
        }
    }
}

/// Execute suites and collect their results
#[derive(Debug, Clone)]
pub struct Executor {
    config: ExecutionConfig,
}

impl Executor {
    /// Create an executor for `config`
    pub fn new(config: ExecutionConfig) -> Self {
        Self { config }
    }

    /// Settings this executor runs with
    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Run every test registered in `suite`.
    ///
    /// Stops at the first failing operation; nothing measured so far is
    /// returned in that case.
    pub fn execute<E>(&self, suite: &mut Suite<E>) -> Result<Vec<RunResult>, OperationError> {
        let runner = TrialRunner::new(self.config.clock.clock());
        let total_laps = suite.registry().len() as u64 * u64::from(self.config.laps.get());

        let mut progress = if self.config.progress {
            LapProgress::new(total_laps)
        } else {
            LapProgress::hidden()
        };

        let outcome = suite.run_observed(&runner, self.config.laps, &mut progress);

        match &outcome {
            Ok(_) => progress.pb.finish_with_message("Complete"),
            Err(e) => {
                progress.pb.abandon_with_message(format!("Aborted: {}", e.test_name));
                tracing::error!("{}", e);
            }
        }

        outcome
    }
}

/// Progress bar driven by runner events
struct LapProgress {
    pb: ProgressBar,
}

impl LapProgress {
    fn new(total_laps: u64) -> Self {
        let pb = ProgressBar::new(total_laps);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} laps {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self { pb }
    }

    fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }
}

impl RunObserver for LapProgress {
    fn test_started(&mut self, name: &str, index: usize, total: usize) {
        self.pb
            .set_message(format!("{} ({}/{})", name, index + 1, total));
    }

    fn lap_finished(&mut self, _name: &str, _lap_index: u32) {
        self.pb.inc(1);
    }

    fn test_finished(&mut self, result: &RunResult) {
        tracing::info!(
            test = %result.test_name,
            average_secs = result.average_time_secs,
            "finished"
        );
    }
}
