// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::cell::Cell;

use crate::Scheduler;

/// A source of monotonic time in milliseconds.
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin.
    fn now(&self) -> f64;
}

/// A clock that only moves when told to.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    /// Creates a clock reading `start`.
    #[must_use]
    pub fn new(start: f64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Moves the clock forward by `ms`.
    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }

    /// Sets the clock to `ms`.
    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

/// Wall‑clock time from [`std::time::Instant`], relative to creation.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug)]
pub struct InstantClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl Default for InstantClock {
    fn default() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Clock for InstantClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Runs due interval callbacks, then one frame, at the clock's current time.
///
/// Returns the number of callbacks that ran.
pub fn pump(scheduler: &mut Scheduler, clock: &impl Clock) -> usize {
    let now = clock.now();
    scheduler.run_due(now) + scheduler.run_frame(now)
}
