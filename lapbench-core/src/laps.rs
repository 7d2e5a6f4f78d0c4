//! Lap Count Resolution

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Number of laps each test runs. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LapCount(NonZeroU32);

impl LapCount {
    /// Lap count used when no valid value is supplied
    pub const DEFAULT: LapCount = LapCount(match NonZeroU32::new(10) {
        Some(n) => n,
        None => unreachable!(),
    });

    /// Wrap an explicit count; `None` for zero
    pub const fn new(laps: u32) -> Option<Self> {
        match NonZeroU32::new(laps) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    /// Resolve an external value, falling back to [`LapCount::DEFAULT`].
    ///
    /// Accepts a base-10 positive integer with optional surrounding
    /// whitespace. Missing, empty, zero, negative, fractional or otherwise
    /// malformed input resolves to the default without failing.
    pub fn resolve(input: Option<&str>) -> Self {
        let Some(raw) = input else {
            return Self::DEFAULT;
        };

        match raw.trim().parse::<NonZeroU32>() {
            Ok(n) => Self(n),
            Err(e) => {
                tracing::debug!(
                    input = raw,
                    error = %e,
                    default = Self::DEFAULT.get(),
                    "invalid lap count, using default"
                );
                Self::DEFAULT
            }
        }
    }

    /// Resolve an integer value such as one read from a config file
    pub fn resolve_int(input: Option<i64>) -> Self {
        match input.and_then(|n| u32::try_from(n).ok()).and_then(Self::new) {
            Some(laps) => laps,
            None => {
                if let Some(n) = input {
                    tracing::debug!(
                        input = n,
                        default = Self::DEFAULT.get(),
                        "invalid lap count, using default"
                    );
                }
                Self::DEFAULT
            }
        }
    }

    /// Count as a plain integer
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for LapCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for LapCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NonZeroU32> for LapCount {
    fn from(n: NonZeroU32) -> Self {
        Self(n)
    }
}
