//! Frame pacing clocks.
//!
//! Wheels measure their own `dt` as the difference between two readings of a
//! [`FrameClock`], so the clock must be monotonic.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source read once per wheel per frame.
pub trait FrameClock {
    fn now(&self) -> Duration;
}

/// Wall clock measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Shareable clock advanced explicitly by the host (or a test).
///
/// Clones observe the same time, so a host can keep one handle and give
/// another to the controller.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    time: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn with_time(time: Duration) -> Self {
        Self {
            time: Rc::new(Cell::new(time)),
        }
    }

    /// Sets the current time. Readings never go backwards; earlier times are ignored.
    pub fn set(&self, time: Duration) {
        if time > self.time.get() {
            self.time.set(time);
        }
    }

    pub fn advance(&self, by: Duration) {
        self.time.set(self.time.get() + by);
    }

    /// Convenience for hosts that report milliseconds (e.g. `requestAnimationFrame`).
    pub fn set_millis(&self, millis: f64) {
        if millis.is_finite() && millis >= 0.0 {
            self.set(Duration::from_secs_f64(millis / 1000.0));
        }
    }
}

impl FrameClock for ManualClock {
    fn now(&self) -> Duration {
        self.time.get()
    }
}

impl<C: FrameClock + ?Sized> FrameClock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}
