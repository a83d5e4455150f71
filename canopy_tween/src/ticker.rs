// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_timing::{Cadence, CallbackId, Scheduler, TickControl};

/// Timing passed to a per‑frame callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInfo {
    /// Milliseconds since the ticker started.
    pub elapsed: f64,
    /// Milliseconds since the previous frame.
    pub delta: f64,
}

/// Calls a function on every frame until stopped.
#[derive(Debug, Default)]
pub struct FrameTicker {
    id: Option<CallbackId>,
}

impl FrameTicker {
    /// Registers `f` to run on every frame, starting at `now`.
    #[must_use]
    pub fn start(
        scheduler: &mut Scheduler,
        now: f64,
        mut f: impl FnMut(FrameInfo) + 'static,
    ) -> Self {
        let mut last = now;
        let id = scheduler.register(Cadence::Frame, now, move |t| {
            f(FrameInfo {
                elapsed: t - now,
                delta: t - last,
            });
            last = t;
            TickControl::Continue
        });
        Self { id: Some(id) }
    }

    /// Unregisters the callback.
    pub fn stop(&mut self, scheduler: &mut Scheduler) {
        if let Some(id) = self.id.take() {
            scheduler.cancel(id);
        }
    }

    /// Whether the callback is still registered.
    #[must_use]
    pub fn is_running(&self, scheduler: &Scheduler) -> bool {
        self.id.is_some_and(|id| scheduler.is_registered(id))
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use canopy_timing::Scheduler;

    use super::{FrameInfo, FrameTicker};

    #[test]
    fn reports_elapsed_and_delta() {
        let mut s = Scheduler::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let mut ticker = FrameTicker::start(&mut s, 100.0, move |info| log.borrow_mut().push(info));
        s.run_frame(116.0);
        s.run_frame(150.0);
        assert!(ticker.is_running(&s));
        ticker.stop(&mut s);
        s.run_frame(200.0);
        assert!(!ticker.is_running(&s));
        assert_eq!(
            *seen.borrow(),
            [
                FrameInfo {
                    elapsed: 16.0,
                    delta: 16.0
                },
                FrameInfo {
                    elapsed: 50.0,
                    delta: 34.0
                },
            ]
        );
    }
}
