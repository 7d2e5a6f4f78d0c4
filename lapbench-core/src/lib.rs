#![warn(missing_docs)]
//! LapBench Core - Timing and Trial Engine
//!
//! This crate provides everything needed to time a suite of tests:
//! - `Clock` implementations (monotonic, wall clock, manual)
//! - `Timer`, a start/stop stopwatch that accumulates across laps
//! - `TestRegistry` of uniquely named setup/main test definitions
//! - `TrialRunner`, which runs each test for a number of laps with a
//!   global teardown between laps and reports per-test averages

mod laps;
mod measure;
mod registry;
mod runner;

pub use laps::LapCount;
pub use measure::{Clock, ManualClock, MonotonicClock, SystemClock, Timer, TimerPhase};
pub use registry::{RegistryError, TestDefinition, TestRegistry};
pub use runner::{
    BoxError, OperationError, Panicked, Phase, RunObserver, RunResult, TrialRunner,
};
