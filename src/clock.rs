//! Time sources used to sample drag velocity.

use std::cell::Cell;
use std::time::Instant;

/// A monotonic millisecond clock.
pub trait TimeSource {
    /// Milliseconds elapsed since an arbitrary fixed origin.
    fn now_millis(&self) -> f64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now_millis(&self) -> f64 {
        (**self).now_millis()
    }
}

/// Wall clock backed by [`Instant`], measured from construction.
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

impl TimeSource for SystemClock {
    fn now_millis(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_millis: f64) -> Self {
        Self {
            now: Cell::new(start_millis),
        }
    }

    pub fn set(&self, millis: f64) {
        self.now.set(millis);
    }

    pub fn advance(&self, millis: f64) {
        self.now.set(self.now.get() + millis);
    }
}

impl TimeSource for ManualClock {
    fn now_millis(&self) -> f64 {
        self.now.get()
    }
}
