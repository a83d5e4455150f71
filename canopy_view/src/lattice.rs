// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Regular sampling lattices over a viewport.

use kurbo::{Point, Rect, Size};

use crate::Viewport;

/// Largest number of cells a lattice may have along one axis.
const MAX_CELLS: usize = 4096;

/// How a sampled mark lays out its lattice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SamplingMode {
    /// Cells of a fixed world size, aligned to multiples of `step`.
    ///
    /// Sample positions stay put while the viewport pans.
    World {
        /// Cell size in world units on both axes.
        step: f64,
    },
    /// A fixed number of cells stretched over the visible viewport.
    Viewport {
        /// Cells along X.
        count_x: usize,
        /// Cells along Y.
        count_y: usize,
    },
}

impl Default for SamplingMode {
    fn default() -> Self {
        Self::Viewport {
            count_x: 32,
            count_y: 32,
        }
    }
}

/// A rectangular lattice of `count_x × count_y` cells over world `bounds`.
///
/// The lattice has `(count_x + 1) × (count_y + 1)` nodes. Node `(0, 0)` sits
/// at the bounds' minimum corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lattice {
    /// World rectangle covered by the lattice.
    pub bounds: Rect,
    /// Cells along X, at least one.
    pub count_x: usize,
    /// Cells along Y, at least one.
    pub count_y: usize,
}

impl Lattice {
    /// Creates a lattice; zero counts are raised to one.
    #[must_use]
    pub fn new(bounds: Rect, count_x: usize, count_y: usize) -> Self {
        Self {
            bounds,
            count_x: count_x.clamp(1, MAX_CELLS),
            count_y: count_y.clamp(1, MAX_CELLS),
        }
    }

    /// Lays out a lattice for `viewport` according to `mode`.
    ///
    /// In world mode the bounds are widened outward to multiples of `step`
    /// so the lattice covers the viewport. If that would exceed the per‑axis
    /// cell cap, the step is widened by an integer factor instead.
    #[must_use]
    pub fn for_viewport(mode: SamplingMode, viewport: &Viewport) -> Self {
        let rect = viewport.to_rect();
        match mode {
            SamplingMode::Viewport { count_x, count_y } => Self::new(rect, count_x, count_y),
            SamplingMode::World { step } => {
                let mut step = step.abs();
                if !step.is_finite() || step < canopy_axis::MIN_SPAN {
                    return Self::new(rect, 1, 1);
                }
                let longest = rect.width().max(rect.height());
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "ratio is finite and positive here"
                )]
                let ratio = libm::ceil(longest / step / MAX_CELLS as f64) as u32;
                if ratio > 1 {
                    step *= f64::from(ratio);
                }
                let x0 = libm::floor(rect.x0 / step) * step;
                let y0 = libm::floor(rect.y0 / step) * step;
                let x1 = libm::ceil(rect.x1 / step) * step;
                let y1 = libm::ceil(rect.y1 / step) * step;
                Self::new(
                    Rect::new(x0, y0, x1, y1),
                    cells(x1 - x0, step),
                    cells(y1 - y0, step),
                )
            }
        }
    }

    /// World size of one cell.
    #[must_use]
    pub fn cell_size(&self) -> Size {
        Size::new(
            self.bounds.width() / self.count_x as f64,
            self.bounds.height() / self.count_y as f64,
        )
    }

    /// World position of node `(i, j)`, with `i <= count_x`, `j <= count_y`.
    #[must_use]
    pub fn node(&self, i: usize, j: usize) -> Point {
        let cell = self.cell_size();
        Point::new(
            self.bounds.x0 + i as f64 * cell.width,
            self.bounds.y0 + j as f64 * cell.height,
        )
    }

    /// World rectangle of cell `(i, j)`.
    #[must_use]
    pub fn cell(&self, i: usize, j: usize) -> Rect {
        Rect::from_points(self.node(i, j), self.node(i + 1, j + 1))
    }

    /// Iterates over every cell center, row by row from the bottom.
    pub fn cell_centers(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.count_y)
            .flat_map(move |j| (0..self.count_x).map(move |i| self.cell(i, j).center()))
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "clamped to MAX_CELLS before the cast"
)]
fn cells(span: f64, step: f64) -> usize {
    libm::round(span / step).clamp(1.0, MAX_CELLS as f64) as usize
}
