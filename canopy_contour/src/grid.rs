// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{BezPath, Line, Point, Rect};

use crate::cases::{Edge, case_index, case_segments};

/// Largest number of cells sampled along one axis.
const MAX_CELLS: usize = 4096;

/// Samples of `F(x, y) - level` on a regular lattice.
///
/// Nodes are stored row by row starting at the bottom edge of `bounds`
/// (smallest Y), so node `(i, j)` sits at
/// `(x0 + i * cell_width, y0 + j * cell_height)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarGrid {
    bounds: Rect,
    count_x: usize,
    count_y: usize,
    values: Vec<f64>,
}

impl ScalarGrid {
    /// Samples `f - level` over `count_x × count_y` cells covering `bounds`.
    ///
    /// Counts are clamped to `1..=4096`.
    #[must_use]
    pub fn sample(
        f: impl Fn(f64, f64) -> f64,
        level: f64,
        count_x: usize,
        count_y: usize,
        bounds: Rect,
    ) -> Self {
        let count_x = count_x.clamp(1, MAX_CELLS);
        let count_y = count_y.clamp(1, MAX_CELLS);
        let bounds = bounds.abs();
        let dx = bounds.width() / count_x as f64;
        let dy = bounds.height() / count_y as f64;
        let mut values = Vec::with_capacity((count_x + 1) * (count_y + 1));
        for j in 0..=count_y {
            let y = bounds.y0 + j as f64 * dy;
            for i in 0..=count_x {
                let x = bounds.x0 + i as f64 * dx;
                values.push(f(x, y) - level);
            }
        }
        Self {
            bounds,
            count_x,
            count_y,
            values,
        }
    }

    /// World rectangle covered by the grid.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Cells along X and Y.
    #[must_use]
    pub fn cell_counts(&self) -> (usize, usize) {
        (self.count_x, self.count_y)
    }

    /// Sample at node `(i, j)`, or `None` outside the grid.
    #[must_use]
    pub fn value(&self, i: usize, j: usize) -> Option<f64> {
        if i > self.count_x || j > self.count_y {
            return None;
        }
        self.values.get(j * (self.count_x + 1) + i).copied()
    }

    fn node(&self, i: usize, j: usize) -> Point {
        Point::new(
            self.bounds.x0 + i as f64 * self.bounds.width() / self.count_x as f64,
            self.bounds.y0 + j as f64 * self.bounds.height() / self.count_y as f64,
        )
    }

    /// Iso‑line segments at level zero, in world coordinates.
    ///
    /// Each crossed edge pair of each cell yields one independent segment;
    /// segments are not joined into polylines. Cells with a non‑finite
    /// corner are skipped.
    #[must_use]
    pub fn segments(&self) -> Vec<Line> {
        let mut out = Vec::new();
        for j in 0..self.count_y {
            for i in 0..self.count_x {
                self.cell_segments(i, j, &mut out);
            }
        }
        out
    }

    fn cell_segments(&self, i: usize, j: usize, out: &mut Vec<Line>) {
        let stride = self.count_x + 1;
        let bl = self.values[j * stride + i];
        let br = self.values[j * stride + i + 1];
        let tr = self.values[(j + 1) * stride + i + 1];
        let tl = self.values[(j + 1) * stride + i];
        if !(bl.is_finite() && br.is_finite() && tr.is_finite() && tl.is_finite()) {
            return;
        }
        let corners = Corners {
            bl: (self.node(i, j), bl),
            br: (self.node(i + 1, j), br),
            tr: (self.node(i + 1, j + 1), tr),
            tl: (self.node(i, j + 1), tl),
        };
        for (a, b) in case_segments(case_index(bl, br, tr, tl)) {
            out.push(Line::new(corners.crossing(*a), corners.crossing(*b)));
        }
    }
}

struct Corners {
    bl: (Point, f64),
    br: (Point, f64),
    tr: (Point, f64),
    tl: (Point, f64),
}

impl Corners {
    fn crossing(&self, edge: Edge) -> Point {
        let (a, b) = match edge {
            Edge::Bottom => (self.bl, self.br),
            Edge::Right => (self.br, self.tr),
            Edge::Top => (self.tl, self.tr),
            Edge::Left => (self.bl, self.tl),
        };
        interpolate(a, b)
    }
}

/// Point where the linear interpolant between two samples crosses zero.
fn interpolate((pa, va): (Point, f64), (pb, vb): (Point, f64)) -> Point {
    let t = if va == vb { 0.5 } else { -va / (vb - va) };
    pa.lerp(pb, t)
}

/// Samples `f` and returns iso‑line segments at `level` in pixel space.
///
/// `to_pixel` maps world points to pixels; pass
/// `|p| space.world_to_pixel(p)` for a plot.
pub fn contour(
    f: impl Fn(f64, f64) -> f64,
    level: f64,
    count_x: usize,
    count_y: usize,
    bounds: Rect,
    to_pixel: impl Fn(Point) -> Point,
) -> Vec<Line> {
    ScalarGrid::sample(f, level, count_x, count_y, bounds)
        .segments()
        .into_iter()
        .map(|l| Line::new(to_pixel(l.p0), to_pixel(l.p1)))
        .collect()
}

/// Builds a path of independent `move_to`/`line_to` pairs from segments.
#[must_use]
pub fn contour_path(segments: &[Line]) -> BezPath {
    let mut path = BezPath::new();
    for seg in segments {
        path.move_to(seg.p0);
        path.line_to(seg.p1);
    }
    path
}

/// Iso‑levels at multiples of `interval` within `[min, max]`.
///
/// A non‑positive or non‑finite interval yields no levels.
#[must_use]
pub fn contour_levels(min: f64, max: f64, interval: f64) -> Vec<f64> {
    if !(interval.is_finite() && interval > 0.0) {
        return Vec::new();
    }
    canopy_axis::ticks_from_delta(min, max, interval, 0.0)
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::{ScalarGrid, contour_levels, contour_path};

    #[test]
    fn vertical_line_is_interpolated_exactly() {
        let grid = ScalarGrid::sample(|x, _| x, 0.25, 1, 1, Rect::new(0.0, 0.0, 1.0, 1.0));
        let segs = grid.segments();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].p0, Point::new(0.25, 0.0));
        assert_eq!(segs[0].p1, Point::new(0.25, 1.0));
    }

    #[test]
    fn flat_fields_produce_nothing() {
        let above = ScalarGrid::sample(|_, _| 2.0, 1.0, 4, 4, Rect::new(0.0, 0.0, 1.0, 1.0));
        let below = ScalarGrid::sample(|_, _| 0.0, 1.0, 4, 4, Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(above.segments().is_empty());
        assert!(below.segments().is_empty());
    }

    #[test]
    fn nan_cells_are_skipped() {
        let f = |x: f64, y: f64| if x > 0.5 { f64::NAN } else { x + y - 0.5 };
        let grid = ScalarGrid::sample(f, 0.0, 2, 2, Rect::new(0.0, 0.0, 1.0, 1.0));
        for seg in grid.segments() {
            assert!(seg.p0.x <= 0.5 && seg.p1.x <= 0.5, "{seg:?}");
        }
    }

    #[test]
    fn saddle_cell_emits_two_segments() {
        // Positive on BL and TR corners of the unit square.
        let f = |x: f64, y: f64| (x - 0.5) * (y - 0.5);
        let grid = ScalarGrid::sample(f, 0.0, 1, 1, Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(grid.segments().len(), 2);
    }

    #[test]
    fn value_lookup() {
        let grid = ScalarGrid::sample(|x, y| x + 10.0 * y, 0.0, 2, 1, Rect::new(0.0, 0.0, 2.0, 1.0));
        assert_eq!(grid.cell_counts(), (2, 1));
        assert_eq!(grid.value(0, 0), Some(0.0));
        assert_eq!(grid.value(2, 1), Some(12.0));
        assert_eq!(grid.value(3, 0), None);
    }

    #[test]
    fn path_has_one_subpath_per_segment() {
        let grid = ScalarGrid::sample(|x, y| x * x + y * y, 1.0, 8, 8, Rect::new(-2.0, -2.0, 2.0, 2.0));
        let segs = grid.segments();
        let path = contour_path(&segs);
        assert_eq!(path.elements().len(), segs.len() * 2);
    }

    #[test]
    fn levels_are_interval_multiples() {
        assert_eq!(contour_levels(-1.0, 2.5, 1.0), [-1.0, 0.0, 1.0, 2.0]);
        assert!(contour_levels(0.0, 1.0, 0.0).is_empty());
        assert!(contour_levels(0.0, 1.0, f64::NAN).is_empty());
    }
}
