// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_axis::LinearMapper;
use kurbo::{Affine, Point, Rect, Vec2};

use crate::{PlotFrame, Viewport};

/// World ↔ pixel coordinate space for one frame of a plot.
///
/// Built from a [`Viewport`] and a [`PlotFrame`]: world X maps onto the inner
/// rectangle left to right and world Y maps onto it bottom to top, so that
/// `viewport.y_min` lands on the inner rectangle's bottom edge.
///
/// A `PlotSpace` is a value: recompute it whenever the viewport or frame
/// changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotSpace {
    viewport: Viewport,
    frame: PlotFrame,
    x: LinearMapper,
    y: LinearMapper,
}

impl PlotSpace {
    /// Derives the coordinate space for `viewport` shown in `frame`.
    #[must_use]
    pub fn new(viewport: Viewport, frame: PlotFrame) -> Self {
        let inner = frame.inner_rect();
        Self {
            viewport,
            frame,
            x: LinearMapper::new(viewport.x_range(), inner.x0..inner.x1),
            y: LinearMapper::new(viewport.y_range(), inner.y1..inner.y0),
        }
    }

    /// The world rectangle this space shows.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The frame this space draws into.
    #[must_use]
    pub fn frame(&self) -> PlotFrame {
        self.frame
    }

    /// World X → pixel X mapper.
    #[must_use]
    pub fn x(&self) -> &LinearMapper {
        &self.x
    }

    /// World Y → pixel Y mapper (range is inverted).
    #[must_use]
    pub fn y(&self) -> &LinearMapper {
        &self.y
    }

    /// The inner plotting rectangle in pixels.
    #[must_use]
    pub fn inner_rect(&self) -> Rect {
        self.frame.inner_rect()
    }

    /// Maps a world point to a pixel point.
    #[must_use]
    pub fn world_to_pixel(&self, pt: Point) -> Point {
        Point::new(self.x.forward(pt.x), self.y.forward(pt.y))
    }

    /// Maps a pixel point to a world point.
    #[must_use]
    pub fn pixel_to_world(&self, pt: Point) -> Point {
        Point::new(self.x.inverse(pt.x), self.y.inverse(pt.y))
    }

    /// Maps a world displacement to a pixel displacement (Y flips sign).
    #[must_use]
    pub fn world_vec_to_pixel(&self, v: Vec2) -> Vec2 {
        Vec2::new(self.x.forward_len(v.x), self.y.forward_len(v.y))
    }

    /// Maps a pixel displacement to a world displacement.
    #[must_use]
    pub fn pixel_vec_to_world(&self, v: Vec2) -> Vec2 {
        Vec2::new(self.x.inverse_len(v.x), self.y.inverse_len(v.y))
    }

    /// Unsigned pixels per world unit on each axis.
    #[must_use]
    pub fn pixels_per_unit(&self) -> Vec2 {
        Vec2::new(self.x.scale().abs(), self.y.scale().abs())
    }

    /// The world → pixel mapping as an affine transform.
    ///
    /// Useful for handing world‑space geometry to a renderer in one piece.
    #[must_use]
    pub fn world_to_pixel_affine(&self) -> Affine {
        let kx = self.x.scale();
        let ky = self.y.scale();
        let origin = self.world_to_pixel(Point::ORIGIN);
        Affine::new([kx, 0.0, 0.0, ky, origin.x, origin.y])
    }

    /// World rectangle covered by the inner plotting area.
    ///
    /// Equal to the viewport up to rounding; always normalized.
    #[must_use]
    pub fn visible_world_rect(&self) -> Rect {
        let inner = self.inner_rect();
        let a = self.pixel_to_world(Point::new(inner.x0, inner.y1));
        let b = self.pixel_to_world(Point::new(inner.x1, inner.y0));
        Rect::from_points(a, b)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Vec2};

    use super::PlotSpace;
    use crate::{Margins, PlotFrame, Viewport};

    fn space() -> PlotSpace {
        PlotSpace::new(
            Viewport::new(-10.0..10.0, -5.0..5.0),
            PlotFrame::new(400.0, 300.0, Margins::ZERO),
        )
    }

    #[test]
    fn corners_and_center() {
        let s = space();
        assert_eq!(s.world_to_pixel(Point::ORIGIN), Point::new(200.0, 150.0));
        assert_eq!(s.world_to_pixel(Point::new(-10.0, -5.0)), Point::new(0.0, 300.0));
        assert_eq!(s.world_to_pixel(Point::new(10.0, 5.0)), Point::new(400.0, 0.0));
        assert_eq!(s.pixel_to_world(Point::new(200.0, 150.0)), Point::ORIGIN);
    }

    #[test]
    fn vectors_flip_y() {
        let s = space();
        assert_eq!(s.world_vec_to_pixel(Vec2::new(1.0, 1.0)), Vec2::new(20.0, -30.0));
        assert_eq!(s.pixel_vec_to_world(Vec2::new(20.0, -30.0)), Vec2::new(1.0, 1.0));
        assert_eq!(s.pixels_per_unit(), Vec2::new(20.0, 30.0));
    }

    #[test]
    fn affine_matches_point_mapping() {
        let s = space();
        let affine = s.world_to_pixel_affine();
        for pt in [Point::new(3.0, -2.0), Point::new(-7.5, 4.0), Point::ORIGIN] {
            let a = affine * pt;
            let b = s.world_to_pixel(pt);
            assert!((a - b).hypot() < 1e-9, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn margins_offset_the_inner_rect() {
        let s = PlotSpace::new(
            Viewport::new(0.0..10.0, 0.0..10.0),
            PlotFrame::new(120.0, 120.0, Margins::uniform(10.0)),
        );
        assert_eq!(s.world_to_pixel(Point::new(0.0, 0.0)), Point::new(10.0, 110.0));
        assert_eq!(s.world_to_pixel(Point::new(10.0, 10.0)), Point::new(110.0, 10.0));
        assert_eq!(s.visible_world_rect(), Rect::new(0.0, 0.0, 10.0, 10.0));
    }
}
