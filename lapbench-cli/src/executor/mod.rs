//! Suite Executor
//!
//! Runs a suite's tests and turns the results into a report.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Suite (tests registered explicitly)
//!       │
//!       ▼
//! ┌─────────────┐
//! │  execution  │  Run every lap, average each test
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   report    │  Score, summary, baselines
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │  metadata   │  Suite identity, lap count, system info
//! └─────────────┘
//! ```

mod execution;
mod metadata;
mod report;

pub use execution::{ExecutionConfig, Executor};
pub use metadata::build_report_meta;
pub use report::build_report;
