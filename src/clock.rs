//! Injectable time source.
//!
//! Phase transitions compare elapsed wall-clock time, never frame counts, so
//! the clock is the one piece of ambient state the arbiter takes by
//! injection: `RealClock` for the app, `ManualClock` for tests that want to
//! step time explicitly instead of sleeping.

use instant::Instant;
use std::cell::Cell;
use std::rc::Rc;

/// Monotonic seconds since some fixed epoch.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall clock, seconds since construction.
pub struct RealClock {
    start: Instant,
}

impl RealClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for RealClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for RealClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Test clock; cloned handles share the same time cell.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, now: f64) {
        self.now.set(now);
    }

    pub fn advance(&self, dt: f64) {
        self.now.set(self.now.get() + dt);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}
