// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use kurbo::{Point, Rect, Vec2};

/// The visible world‑space rectangle of a plot.
///
/// Stored as independent X and Y intervals. Consumers assume
/// `min <= max` on each axis, but the type does not enforce it; a reversed
/// interval simply renders mirrored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Default for Viewport {
    /// The unit square around the origin, `[-1, 1] × [-1, 1]`.
    fn default() -> Self {
        Self::new(-1.0..1.0, -1.0..1.0)
    }
}

impl Viewport {
    /// Creates a viewport from world X and Y intervals.
    #[must_use]
    pub fn new(x: Range<f64>, y: Range<f64>) -> Self {
        Self {
            x_min: x.start,
            x_max: x.end,
            y_min: y.start,
            y_max: y.end,
        }
    }

    /// Creates a viewport covering `rect`.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.x0..rect.x1, rect.y0..rect.y1)
    }

    /// Visible world X interval.
    #[must_use]
    pub fn x_range(&self) -> Range<f64> {
        self.x_min..self.x_max
    }

    /// Visible world Y interval.
    #[must_use]
    pub fn y_range(&self) -> Range<f64> {
        self.y_min..self.y_max
    }

    /// World width of the viewport.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// World height of the viewport.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// World point at the center of the viewport.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            (self.x_min + self.x_max) * 0.5,
            (self.y_min + self.y_max) * 0.5,
        )
    }

    /// The viewport as a world‑space rectangle.
    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x_min, self.y_min, self.x_max, self.y_max)
    }

    /// Returns `true` if `pt` lies inside the viewport (inclusive).
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x_min && pt.x <= self.x_max && pt.y >= self.y_min && pt.y <= self.y_max
    }

    /// Returns this viewport shifted by a world‑space delta.
    #[must_use]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            x_min: self.x_min + delta.x,
            x_max: self.x_max + delta.x,
            y_min: self.y_min + delta.y,
            y_max: self.y_max + delta.y,
        }
    }

    /// Returns this viewport scaled about a world‑space anchor.
    ///
    /// Each bound becomes `anchor + (bound - anchor) * factor`, so the anchor
    /// keeps its world position. Factors above one zoom out, below one zoom in.
    #[must_use]
    pub fn scaled_about(&self, anchor: Point, factor_x: f64, factor_y: f64) -> Self {
        Self {
            x_min: anchor.x + (self.x_min - anchor.x) * factor_x,
            x_max: anchor.x + (self.x_max - anchor.x) * factor_x,
            y_min: anchor.y + (self.y_min - anchor.y) * factor_y,
            y_max: anchor.y + (self.y_max - anchor.y) * factor_y,
        }
    }

    /// Returns `true` if every bound is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x_min.is_finite()
            && self.x_max.is_finite()
            && self.y_min.is_finite()
            && self.y_max.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Vec2};

    use super::Viewport;

    #[test]
    fn accessors_report_ranges() {
        let vp = Viewport::new(-10.0..10.0, -5.0..5.0);
        assert_eq!(vp.x_range(), -10.0..10.0);
        assert_eq!(vp.y_range(), -5.0..5.0);
        assert_eq!(vp.width(), 20.0);
        assert_eq!(vp.height(), 10.0);
        assert_eq!(vp.center(), Point::ORIGIN);
        assert_eq!(vp.to_rect(), Rect::new(-10.0, -5.0, 10.0, 5.0));
        assert_eq!(Viewport::from_rect(vp.to_rect()), vp);
    }

    #[test]
    fn translate_preserves_size() {
        let vp = Viewport::new(0.0..4.0, 0.0..2.0).translated(Vec2::new(1.0, -1.0));
        assert_eq!(vp.x_range(), 1.0..5.0);
        assert_eq!(vp.y_range(), -1.0..1.0);
    }

    #[test]
    fn scale_about_anchor_keeps_anchor() {
        let vp = Viewport::new(-2.0..2.0, -2.0..2.0);
        let anchor = Point::new(1.0, 1.0);
        let zoomed = vp.scaled_about(anchor, 0.5, 0.5);
        assert_eq!(zoomed.x_range(), -0.5..1.5);
        assert_eq!(zoomed.y_range(), -0.5..1.5);
        assert!(zoomed.contains(anchor));
    }

    #[test]
    fn finiteness() {
        assert!(Viewport::default().is_finite());
        assert!(!Viewport::new(0.0..f64::INFINITY, 0.0..1.0).is_finite());
    }
}
