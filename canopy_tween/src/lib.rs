// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Tween: easing, time‑based tweens and frame tickers.
//!
//! - [`Easing`]: the preset curves plus custom functions, looked up by name
//!   with [`easing_by_name`].
//! - [`Tween`]: a scalar animation with delay, looping, yoyo, reverse and a
//!   debounced replay key. Progress is recomputed from elapsed time on each
//!   tick, so it never drifts.
//! - [`PropertyTween`]: animates a [`Pose2D`] and converts it into a
//!   pixel‑space [`AnimatedFrame`] through the current plot space.
//! - [`FrameTicker`]: a per‑frame callback with elapsed and delta times.
//!
//! All of them run on a [`canopy_timing::Scheduler`] passed in explicitly.
//!
//! ## Example
//!
//! ```rust
//! use canopy_timing::{Clock, ManualClock, Scheduler, pump};
//! use canopy_tween::{Easing, Tween, TweenConfig};
//!
//! let clock = ManualClock::default();
//! let mut scheduler = Scheduler::new();
//! let config = TweenConfig::default()
//!     .with_duration(1000.0)
//!     .with_easing(Easing::QuadIn);
//! let tween = Tween::start(config, &mut scheduler, clock.now());
//!
//! clock.advance(500.0);
//! pump(&mut scheduler, &clock);
//! assert_eq!(tween.value(), 0.25);
//! ```

#![no_std]

extern crate alloc;

mod driver;
mod easing;
mod pose;
mod ticker;

pub use driver::{FALLBACK_POLL_MS, REPLAY_DEBOUNCE_MS, Tween, TweenConfig};
pub use easing::{Easing, easing_by_name, easing_names};
pub use pose::{AnimatedFrame, Pose2D, PropertyTween};
pub use ticker::{FrameInfo, FrameTicker};
