#![warn(missing_docs)]
//! LapBench Scoring
//!
//! Reduces per-test average lap times to one comparable number:
//! - `compute_score`: reciprocal of the summed averages (higher is better)
//! - `Score`: finite score or the `Undefined` sentinel for a zero sum
//! - `round_half_up`: presentation rounding shared by the renderers

mod rounding;
mod score;

pub use rounding::{format_rounded, round_half_up};
pub use score::{Score, compute_score};

/// Decimal places used for the headline score
pub const SCORE_DIGITS: u32 = 2;

/// Decimal places used for per-test seconds
pub const SECONDS_DIGITS: u32 = 3;
