// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Timing: a host‑agnostic repeating‑callback scheduler.
//!
//! Animations register callbacks with a [`Scheduler`] and get back a
//! [`CallbackId`] they can cancel later. The scheduler itself never reads
//! the time: the host drives it, calling [`Scheduler::run_frame`] once per
//! display frame and [`Scheduler::run_due`] from a coarse timer so that
//! animations keep progressing when frames are throttled.
//!
//! A [`Clock`] supplies timestamps. [`ManualClock`] is a virtual clock for
//! tests; with the `std` feature, `InstantClock` reads wall time.
//!
//! ## Example
//!
//! ```rust
//! use canopy_timing::{Cadence, Clock, ManualClock, Scheduler, TickControl, pump};
//!
//! let clock = ManualClock::default();
//! let mut scheduler = Scheduler::new();
//! let id = scheduler.register(Cadence::Frame, clock.now(), |now| {
//!     if now >= 50.0 { TickControl::Stop } else { TickControl::Continue }
//! });
//!
//! pump(&mut scheduler, &clock);
//! assert!(scheduler.is_registered(id));
//! clock.advance(50.0);
//! pump(&mut scheduler, &clock);
//! assert!(!scheduler.is_registered(id));
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod clock;
mod scheduler;

#[cfg(feature = "std")]
pub use clock::InstantClock;
pub use clock::{Clock, ManualClock, pump};
pub use scheduler::{Cadence, Callback, CallbackId, Scheduler, TickControl};
