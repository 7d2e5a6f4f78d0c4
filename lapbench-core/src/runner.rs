//! Trial Runner
//!
//! Drives every registered test through its laps:
//!
//! ```text
//! for each test (registration order):
//!     fresh Timer
//!     repeat lap_count times:
//!         setup()            untimed
//!         timer.start()
//!         main(scratch)      timed
//!         timer.stop()
//!         teardown()         untimed, resets the shared environment
//!     average = elapsed / lap_count
//! ```
//!
//! Everything runs on the calling thread. The environment is borrowed
//! mutably for the whole run, and teardown always finishes before the next
//! setup starts. The first failing operation aborts the run; results of
//! tests that already completed are dropped.

use crate::laps::LapCount;
use crate::measure::{Clock, MonotonicClock, Timer};
use crate::registry::{TestDefinition, TestRegistry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Error type returned by setup, main and teardown operations
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Phase of a lap in which an operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Untimed preparation
    Setup,
    /// Measured operation
    Main,
    /// Global environment reset
    Teardown,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Setup => "setup",
            Phase::Main => "main",
            Phase::Teardown => "teardown",
        })
    }
}

/// An operation panicked instead of returning an error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("panicked: {0}")]
pub struct Panicked(pub String);

/// Failure inside one lap, before the test name and lap index are attached
#[derive(Debug)]
pub(crate) struct LapFailure {
    phase: Phase,
    source: BoxError,
}

/// An operation failed during a run; the whole run is aborted
#[derive(Debug, Error)]
#[error("test '{test_name}' failed in {phase} on lap {lap_index}: {source}")]
pub struct OperationError {
    /// Test whose lap failed
    pub test_name: String,
    /// Phase that failed
    pub phase: Phase,
    /// Zero-based index of the failing lap
    pub lap_index: u32,
    /// Error returned (or panic raised) by the operation
    #[source]
    pub source: BoxError,
}

/// Call an operation, turning both errors and panics into a [`LapFailure`]
pub(crate) fn invoke<T>(
    phase: Phase,
    op: impl FnOnce() -> Result<T, BoxError>,
) -> Result<T, LapFailure> {
    let outcome = catch_unwind(AssertUnwindSafe(op)).unwrap_or_else(|panic| {
        let message = if let Some(s) = panic.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        Err(Panicked(message).into())
    });

    outcome.map_err(|source| LapFailure { phase, source })
}

/// Outcome of running one test for all of its laps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Test name
    pub test_name: String,
    /// Test description
    pub description: String,
    /// Mean measured time per lap, in seconds
    pub average_time_secs: f64,
    /// Number of laps the average covers
    pub laps: u32,
    /// Total measured time over all laps, in seconds
    pub total_time_secs: f64,
}

impl RunResult {
    fn from_timer(test_name: &str, description: &str, laps: LapCount, timer: &mut Timer) -> Self {
        // Every lap starts the timer, so a measurement always exists here
        let elapsed = timer.elapsed().unwrap_or(Duration::ZERO);
        let total_time_secs = elapsed.as_secs_f64();

        Self {
            test_name: test_name.to_string(),
            description: description.to_string(),
            average_time_secs: total_time_secs / f64::from(laps.get()),
            laps: laps.get(),
            total_time_secs,
        }
    }
}

/// Hooks for following a run as it progresses. All methods default to no-ops.
pub trait RunObserver {
    /// A test is about to run its first lap
    fn test_started(&mut self, _name: &str, _index: usize, _total: usize) {}

    /// A lap (including teardown) completed
    fn lap_finished(&mut self, _name: &str, _lap_index: u32) {}

    /// All laps of a test completed
    fn test_finished(&mut self, _result: &RunResult) {}
}

impl RunObserver for () {}

/// Runs registered tests lap by lap against a shared environment
#[derive(Debug, Clone)]
pub struct TrialRunner {
    clock: Arc<dyn Clock>,
}

impl TrialRunner {
    /// Create a runner whose timers read `clock`
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Create a runner on a fresh [`MonotonicClock`]
    pub fn monotonic() -> Self {
        Self::new(Arc::new(MonotonicClock::new()))
    }

    /// Run every test for `laps` laps, calling `teardown` after each lap.
    ///
    /// Returns one [`RunResult`] per test in registration order, or the
    /// first [`OperationError`].
    pub fn run_all<E, T>(
        &self,
        registry: &TestRegistry<E>,
        env: &mut E,
        laps: LapCount,
        teardown: T,
    ) -> Result<Vec<RunResult>, OperationError>
    where
        T: FnMut(&mut E) -> Result<(), BoxError>,
    {
        self.run_all_observed(registry, env, laps, teardown, &mut ())
    }

    /// Same as [`run_all`](Self::run_all), reporting progress to `observer`
    pub fn run_all_observed<E, T>(
        &self,
        registry: &TestRegistry<E>,
        env: &mut E,
        laps: LapCount,
        mut teardown: T,
        observer: &mut dyn RunObserver,
    ) -> Result<Vec<RunResult>, OperationError>
    where
        T: FnMut(&mut E) -> Result<(), BoxError>,
    {
        let total = registry.len();
        let mut results = Vec::with_capacity(total);

        for (index, test) in registry.iter().enumerate() {
            observer.test_started(test.name(), index, total);
            tracing::debug!(test = test.name(), laps = laps.get(), "running test");

            let result = self.run_test(test, env, laps, &mut teardown, observer)?;

            tracing::debug!(
                test = test.name(),
                average_secs = result.average_time_secs,
                "test complete"
            );
            observer.test_finished(&result);
            results.push(result);
        }

        Ok(results)
    }

    fn run_test<E, T>(
        &self,
        test: &TestDefinition<E>,
        env: &mut E,
        laps: LapCount,
        teardown: &mut T,
        observer: &mut dyn RunObserver,
    ) -> Result<RunResult, OperationError>
    where
        T: FnMut(&mut E) -> Result<(), BoxError>,
    {
        let mut timer = Timer::new(Arc::clone(&self.clock));

        for lap_index in 0..laps.get() {
            let attribute = |failure: LapFailure| OperationError {
                test_name: test.name().to_string(),
                phase: failure.phase,
                lap_index,
                source: failure.source,
            };

            test.run_lap(env, &mut timer).map_err(attribute)?;
            invoke(Phase::Teardown, || teardown(env)).map_err(attribute)?;

            observer.lap_finished(test.name(), lap_index);
        }

        Ok(RunResult::from_timer(
            test.name(),
            test.description(),
            laps,
            &mut timer,
        ))
    }
}

impl Default for TrialRunner {
    fn default() -> Self {
        Self::monotonic()
    }
}
