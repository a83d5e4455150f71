// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{BezPath, Point, Rect, Vec2};

use crate::context::{Mark, PlotContext};
use crate::painter::Painter;
use crate::style::LineStyle;

/// A straight segment between two world points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Start.
    pub from: Point,
    /// End.
    pub to: Point,
    /// Stroke.
    pub style: LineStyle,
}

impl Segment {
    /// A segment from `from` to `to`.
    #[must_use]
    pub fn new(from: impl Into<Point>, to: impl Into<Point>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            style: LineStyle::default(),
        }
    }

    /// Sets the stroke.
    #[must_use]
    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }
}

impl Mark for Segment {
    fn paint(&self, cx: &PlotContext, painter: &mut dyn Painter) {
        let mut path = BezPath::new();
        path.move_to(cx.to_pixel(self.from));
        path.line_to(cx.to_pixel(self.to));
        let (stroke, color) = self.style.resolve(cx.theme());
        painter.stroke(&path, &stroke, color);
    }
}

/// An infinite straight line, drawn edge to edge across the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    /// A point on the line.
    pub origin: Point,
    /// Direction of the line; zero draws nothing.
    pub direction: Vec2,
    /// Stroke.
    pub style: LineStyle,
}

impl Line {
    /// The line through `a` and `b`.
    #[must_use]
    pub fn through(a: impl Into<Point>, b: impl Into<Point>) -> Self {
        let a = a.into();
        Self::new(a, b.into() - a)
    }

    /// The line through `point` with gradient `slope`.
    #[must_use]
    pub fn point_slope(point: impl Into<Point>, slope: f64) -> Self {
        Self::new(point.into(), Vec2::new(1.0, slope))
    }

    /// The line through `point` at `angle` radians from +X.
    #[must_use]
    pub fn point_angle(point: impl Into<Point>, angle: f64) -> Self {
        Self::new(point.into(), Vec2::new(libm::cos(angle), libm::sin(angle)))
    }

    fn new(origin: Point, direction: Vec2) -> Self {
        Self {
            origin,
            direction,
            style: LineStyle::default(),
        }
    }

    /// Sets the stroke.
    #[must_use]
    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }
}

impl Mark for Line {
    fn paint(&self, cx: &PlotContext, painter: &mut dyn Painter) {
        let Some((a, b)) = clip_line(self.origin, self.direction, cx.visible()) else {
            return;
        };
        let mut path = BezPath::new();
        path.move_to(cx.to_pixel(a));
        path.line_to(cx.to_pixel(b));
        let (stroke, color) = self.style.resolve(cx.theme());
        painter.stroke(&path, &stroke, color);
    }
}

/// Clips the infinite line through `origin` along `direction` to `rect`.
///
/// Returns the entry and exit points in the direction of travel, or `None`
/// when the line misses the rectangle or the direction is zero or
/// non‑finite.
#[must_use]
pub fn clip_line(origin: Point, direction: Vec2, rect: Rect) -> Option<(Point, Point)> {
    if !direction.is_finite() || direction == Vec2::ZERO || !origin.is_finite() {
        return None;
    }
    let rect = rect.abs();
    let mut t0 = f64::NEG_INFINITY;
    let mut t1 = f64::INFINITY;
    let edges = [
        (-direction.x, origin.x - rect.x0),
        (direction.x, rect.x1 - origin.x),
        (-direction.y, origin.y - rect.y0),
        (direction.y, rect.y1 - origin.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((origin + direction * t0, origin + direction * t1))
}

#[cfg(test)]
mod tests {
    use canopy_view::{Margins, PlotFrame, PlotSpace, Viewport};
    use kurbo::{PathEl, Point, Rect, Vec2};

    use super::{Line, Segment, clip_line};
    use crate::context::{Mark, PlotContext};
    use crate::painter::Recorder;
    use crate::theme::Theme;

    const R: Rect = Rect::new(-1.0, -1.0, 1.0, 1.0);

    #[test]
    fn clips_diagonal_to_corners() {
        let (a, b) = clip_line(Point::ORIGIN, Vec2::new(1.0, 1.0), R).unwrap();
        assert_eq!(a, Point::new(-1.0, -1.0));
        assert_eq!(b, Point::new(1.0, 1.0));
    }

    #[test]
    fn axis_parallel_lines() {
        let (a, b) = clip_line(Point::new(0.5, 7.0), Vec2::new(0.0, -2.0), R).unwrap();
        assert_eq!(a, Point::new(0.5, 1.0));
        assert_eq!(b, Point::new(0.5, -1.0));
        assert!(clip_line(Point::new(2.0, 0.0), Vec2::new(0.0, 1.0), R).is_none());
    }

    #[test]
    fn misses_and_degenerate() {
        assert!(clip_line(Point::new(0.0, 3.0), Vec2::new(1.0, 1.0), R).is_none());
        assert!(clip_line(Point::ORIGIN, Vec2::ZERO, R).is_none());
    }

    fn cx() -> PlotContext {
        let space = PlotSpace::new(
            Viewport::new(-10.0..10.0, -5.0..5.0),
            PlotFrame::new(400.0, 300.0, Margins::ZERO),
        );
        PlotContext::new(space, Theme::default())
    }

    fn endpoints(r: &Recorder) -> (Point, Point) {
        let (path, _, _) = r.strokes().next().unwrap();
        match path.elements() {
            [PathEl::MoveTo(a), PathEl::LineTo(b)] => (*a, *b),
            other => panic!("unexpected path {other:?}"),
        }
    }

    #[test]
    fn line_spans_the_plot() {
        let mut r = Recorder::new();
        Line::point_slope((0.0, 0.0), 0.0).paint(&cx(), &mut r);
        assert_eq!(endpoints(&r), (Point::new(0.0, 150.0), Point::new(400.0, 150.0)));
    }

    #[test]
    fn line_through_equal_points_draws_nothing() {
        let mut r = Recorder::new();
        Line::through((1.0, 1.0), (1.0, 1.0)).paint(&cx(), &mut r);
        assert!(r.commands().is_empty());
    }

    #[test]
    fn segment_maps_its_endpoints() {
        let mut r = Recorder::new();
        Segment::new((-10.0, -5.0), (10.0, 5.0)).paint(&cx(), &mut r);
        assert_eq!(endpoints(&r), (Point::new(0.0, 300.0), Point::new(400.0, 0.0)));
    }
}
