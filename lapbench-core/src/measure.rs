//! Clocks and the Lap Timer
//!
//! A [`Clock`] hands out readings as offsets from an arbitrary origin. The
//! [`Timer`] turns pairs of readings into accumulated measured time across
//! many start/stop cycles, so one timer covers every lap of a test.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

// ─── Clocks ──────────────────────────────────────────────────────────────────

/// Source of time readings for a [`Timer`].
///
/// Readings only need to be comparable with each other. A clock is allowed
/// to go backwards; the timer clamps such intervals to zero.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current reading, as an offset from the clock's origin
    fn now(&self) -> Duration;
}

/// Monotonic clock backed by [`std::time::Instant`]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: std::time::Instant,
}

impl MonotonicClock {
    /// Create a clock whose origin is the current instant
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline(always)]
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Wall clock backed by [`SystemTime`].
///
/// Can jump backwards when the system time is adjusted.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
    }
}

/// Hand-driven clock for deterministic tests.
///
/// Clones share the same reading, so a test can keep one handle and give
/// another to the runner.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock reading zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reading
    pub fn set(&self, reading: Duration) {
        self.nanos
            .store(reading.as_nanos() as u64, Ordering::SeqCst);
    }

    /// Move the reading forward
    pub fn advance(&self, by: Duration) {
        self.nanos
            .fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
    }

    /// Move the reading backward, saturating at zero
    pub fn rewind(&self, by: Duration) {
        let by = by.as_nanos() as u64;
        let _ = self
            .nanos
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                Some(n.saturating_sub(by))
            });
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

// ─── Timer ───────────────────────────────────────────────────────────────────

/// Phase of a [`Timer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    /// Never started
    Idle,
    /// Measuring since `started_at`
    Running {
        /// Clock reading taken by the last `start()`
        started_at: Duration,
    },
    /// Stopped at least once, not measuring
    Stopped,
}

/// Stopwatch accumulating time over repeated start/stop cycles.
///
/// | phase     | `start()`            | `stop()`                   |
/// |-----------|----------------------|----------------------------|
/// | `Idle`    | → `Running`          | no-op                      |
/// | `Running` | re-record timestamp  | → `Stopped`, add interval  |
/// | `Stopped` | → `Running`          | no-op                      |
pub struct Timer {
    clock: Arc<dyn Clock>,
    phase: TimerPhase,
    accumulated: Duration,
}

impl Timer {
    /// Create an idle timer reading from `clock`
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            phase: TimerPhase::Idle,
            accumulated: Duration::ZERO,
        }
    }

    /// Create an idle timer on a fresh [`MonotonicClock`]
    pub fn monotonic() -> Self {
        Self::new(Arc::new(MonotonicClock::new()))
    }

    /// Begin (or restart) measuring
    #[inline]
    pub fn start(&mut self) {
        self.phase = TimerPhase::Running {
            started_at: self.clock.now(),
        };
    }

    /// Stop measuring and add the interval to the total.
    ///
    /// An interval that comes out negative counts as zero.
    #[inline]
    pub fn stop(&mut self) {
        if let TimerPhase::Running { started_at } = self.phase {
            let delta = self.clock.now().saturating_sub(started_at);
            self.accumulated += delta;
            self.phase = TimerPhase::Stopped;
        }
    }

    /// Total measured time, or `None` if the timer was never started.
    ///
    /// Reading a running timer stops it first.
    pub fn elapsed(&mut self) -> Option<Duration> {
        match self.phase {
            TimerPhase::Idle => None,
            TimerPhase::Running { .. } => {
                self.stop();
                Some(self.accumulated)
            }
            TimerPhase::Stopped => Some(self.accumulated),
        }
    }

    /// Current phase
    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    /// Time accumulated by completed intervals, without stopping
    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("phase", &self.phase)
            .field("accumulated", &self.accumulated)
            .finish()
    }
}
