// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Contour: iso‑lines of scalar fields by marching squares.
//!
//! Sample a function `F(x, y)` on a regular lattice with
//! [`ScalarGrid::sample`], then extract the line where `F == level` as a set
//! of independent segments:
//!
//! - Each cell gets a 4‑bit [`case_index`] from its corner signs.
//! - [`case_segments`] lists the crossed [`Edge`] pairs for that case.
//! - Crossing points are linearly interpolated along each edge.
//!
//! Saddle cells (cases 5 and 10) use a fixed pairing and are not
//! disambiguated.
//!
//! ## Example
//!
//! ```rust
//! use canopy_contour::{ScalarGrid, contour_path};
//! use kurbo::Rect;
//!
//! let circle = |x: f64, y: f64| x * x + y * y;
//! let grid = ScalarGrid::sample(circle, 1.0, 32, 32, Rect::new(-2.0, -2.0, 2.0, 2.0));
//! let segments = grid.segments();
//! assert!(!segments.is_empty());
//! let path = contour_path(&segments);
//! assert_eq!(path.elements().len(), 2 * segments.len());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cases;
mod grid;

pub use cases::{
    BOTTOM_LEFT, BOTTOM_RIGHT, Edge, TOP_LEFT, TOP_RIGHT, case_index, case_segments,
};
pub use grid::{ScalarGrid, contour, contour_levels, contour_path};
