//! Score Aggregation
//!
//! `score = 1 / Σ average_time_secs`. The sum is unweighted, so the slowest
//! test dominates the result.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregated suite score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Score {
    /// Reciprocal of the summed per-test averages
    Finite(f64),
    /// The averages summed to zero (no tests, or nothing measurable)
    Undefined,
}

impl Score {
    /// Score value, if defined
    pub fn value(self) -> Option<f64> {
        match self {
            Score::Finite(v) => Some(v),
            Score::Undefined => None,
        }
    }

    /// Whether the score is the degenerate sentinel
    pub fn is_undefined(self) -> bool {
        matches!(self, Score::Undefined)
    }
}

impl From<Option<f64>> for Score {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Score::Finite(v),
            _ => Score::Undefined,
        }
    }
}

impl From<Score> for Option<f64> {
    fn from(score: Score) -> Self {
        score.value()
    }
}

impl fmt::Display for Score {
    /// Two decimals, half-up, without trailing zeros; `undefined` for the sentinel
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Finite(v) => f.write_str(&crate::format_rounded(*v, crate::SCORE_DIGITS)),
            Score::Undefined => f.write_str("undefined"),
        }
    }
}

/// Compute the score of a set of per-test average times in seconds.
///
/// The averages are summed in ascending order, so any permutation of the
/// same inputs yields a bit-identical score.
pub fn compute_score(averages: impl IntoIterator<Item = f64>) -> Score {
    let mut averages: Vec<f64> = averages.into_iter().collect();
    averages.sort_by(f64::total_cmp);

    let total: f64 = averages.iter().sum();
    if total == 0.0 {
        return Score::Undefined;
    }

    let score = 1.0 / total;
    if score.is_finite() {
        Score::Finite(score)
    } else {
        Score::Undefined
    }
}
