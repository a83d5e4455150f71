// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy View: world‑space viewports and world/pixel coordinate spaces.
//!
//! A Canopy plot shows a rectangle of world space (the [`Viewport`]) inside a
//! fixed‑size drawing surface inset by [`Margins`]. This crate provides:
//! - [`Viewport`]: the visible world rectangle, with pure translate/scale
//!   helpers used by pan and zoom.
//! - [`PlotFrame`]: the container size plus margins, producing the inner
//!   plotting rectangle in pixels.
//! - [`PlotSpace`]: a pair of [`LinearMapper`]s derived from a viewport and
//!   a frame, converting points, vectors and rectangles between world and
//!   pixel space. World Y grows upward; pixel Y grows downward.
//! - [`SamplingMode`] / [`Lattice`]: regular sampling grids for fields and
//!   heatmaps, either fixed to world coordinates or stretched over the
//!   viewport.
//!
//! It does **not** handle input; see `canopy_gesture` for the pan/zoom
//! state machine that mutates a viewport.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use canopy_view::{Margins, PlotFrame, PlotSpace, Viewport};
//!
//! let viewport = Viewport::new(-10.0..10.0, -5.0..5.0);
//! let frame = PlotFrame::new(400.0, 300.0, Margins::ZERO);
//! let space = PlotSpace::new(viewport, frame);
//!
//! assert_eq!(space.world_to_pixel(Point::new(0.0, 0.0)), Point::new(200.0, 150.0));
//! assert_eq!(space.world_to_pixel(Point::new(-10.0, -5.0)), Point::new(0.0, 300.0));
//! assert_eq!(space.world_to_pixel(Point::new(10.0, 5.0)), Point::new(400.0, 0.0));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod frame;
mod lattice;
mod space;
mod viewport;

pub use canopy_axis::LinearMapper;
pub use frame::{Margins, PlotFrame};
pub use lattice::{Lattice, SamplingMode};
pub use space::PlotSpace;
pub use viewport::Viewport;
