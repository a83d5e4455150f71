// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Axis: headless numeric axis mapping and tick primitives.
//!
//! This crate provides the two pure building blocks every Canopy plot axis is
//! made of:
//! - [`LinearMapper`]: a bidirectional affine mapping between a world‑space
//!   interval and a pixel‑space interval.
//! - Tick generation: [`nice_ticks`] picks human‑friendly positions from an
//!   approximate count, [`ticks_from_delta`] walks a caller‑supplied step,
//!   and [`generate_ticks`] dispatches on a [`TickSpec`] with the usual
//!   fallback from a too‑coarse delta to nice ticks.
//!
//! Everything here is deterministic and allocation‑light; generating ticks
//! twice from the same inputs yields bit‑identical results.
//!
//! ## Mapping example
//!
//! ```rust
//! use canopy_axis::LinearMapper;
//!
//! // World X in [-10, 10] onto 400 pixels.
//! let x = LinearMapper::new(-10.0..10.0, 0.0..400.0);
//! assert_eq!(x.forward(0.0), 200.0);
//! assert_eq!(x.inverse(200.0), 0.0);
//!
//! // World Y grows upward, pixel Y grows downward: swap the range.
//! let y = LinearMapper::new(-5.0..5.0, 300.0..0.0);
//! assert_eq!(y.forward(-5.0), 300.0);
//! ```
//!
//! ## Tick example
//!
//! ```rust
//! use canopy_axis::{nice_ticks, ticks_from_delta};
//!
//! assert_eq!(nice_ticks(0.0, 100.0, 5), [0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
//! assert_eq!(ticks_from_delta(0.0, 10.0, 3.0, 0.0), [0.0, 3.0, 6.0, 9.0]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod format;
mod mapper;
mod ticks;

pub use format::format_tick;
pub use mapper::{LinearMapper, MIN_SPAN};
pub use ticks::{TickSpec, generate_ticks, minor_ticks, nice_ticks, ticks_from_delta};
