// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{BezPath, Point, Vec2};

use crate::context::{Mark, PlotContext};
use crate::painter::Painter;
use crate::style::LineStyle;

/// Arrowhead length in pixels.
const HEAD_LENGTH: f64 = 10.0;
/// Arrowhead half‑width in pixels.
const HEAD_HALF_WIDTH: f64 = 4.0;

/// An arrow from `tail` to `tail + vector`, in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector {
    /// Tail position.
    pub tail: Point,
    /// Displacement to the tip.
    pub vector: Vec2,
    /// Stroke for the shaft; the head is filled in the same color.
    pub style: LineStyle,
}

impl Vector {
    /// An arrow from the origin.
    #[must_use]
    pub fn new(vector: impl Into<Vec2>) -> Self {
        Self::from_tail(Point::ORIGIN, vector)
    }

    /// An arrow from `tail`.
    #[must_use]
    pub fn from_tail(tail: impl Into<Point>, vector: impl Into<Vec2>) -> Self {
        Self {
            tail: tail.into(),
            vector: vector.into(),
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

impl Mark for Vector {
    fn paint(&self, cx: &PlotContext, painter: &mut dyn Painter) {
        let tail = cx.to_pixel(self.tail);
        let tip = cx.to_pixel(self.tail + self.vector);
        if !tail.is_finite() || !tip.is_finite() {
            return;
        }
        let (stroke, color) = self.style.resolve(cx.theme());
        let delta = tip - tail;
        let length = delta.hypot();
        let dir = if length > 0.0 {
            delta / length
        } else {
            Vec2::new(1.0, 0.0)
        };

        // The shaft ends at the base of the head.
        if length > HEAD_LENGTH {
            let mut shaft = BezPath::new();
            shaft.move_to(tail);
            shaft.line_to(tip - dir * HEAD_LENGTH);
            painter.stroke(&shaft, &stroke, color);
        }
        painter.fill(&arrowhead(tip, dir), color);
    }
}

/// A triangle with its point at `tip`, facing along the unit vector `dir`.
fn arrowhead(tip: Point, dir: Vec2) -> BezPath {
    let base = tip - dir * HEAD_LENGTH;
    let normal = dir.turn_90() * HEAD_HALF_WIDTH;
    let mut head = BezPath::new();
    head.move_to(tip);
    head.line_to(base + normal);
    head.line_to(base - normal);
    head.close_path();
    head
}

#[cfg(test)]
mod tests {
    use canopy_view::{Margins, PlotFrame, PlotSpace, Viewport};
    use kurbo::{PathEl, Point, Shape, Vec2};

    use super::Vector;
    use crate::context::{Mark, PlotContext};
    use crate::painter::Recorder;
    use crate::theme::Theme;

    fn cx() -> PlotContext {
        let space = PlotSpace::new(
            Viewport::new(-10.0..10.0, -5.0..5.0),
            PlotFrame::new(400.0, 300.0, Margins::ZERO),
        );
        PlotContext::new(space, Theme::default())
    }

    #[test]
    fn head_points_at_the_tip() {
        let mut r = Recorder::new();
        Vector::new((5.0, 0.0)).paint(&cx(), &mut r);
        let (shaft, _, _) = r.strokes().next().unwrap();
        assert_eq!(
            shaft.elements(),
            [
                PathEl::MoveTo(Point::new(200.0, 150.0)),
                PathEl::LineTo(Point::new(290.0, 150.0)),
            ]
        );
        let (head, _) = r.fills().next().unwrap();
        assert_eq!(head.elements()[0], PathEl::MoveTo(Point::new(300.0, 150.0)));
        let bounds = head.bounding_box();
        assert_eq!(bounds.x0, 290.0);
        assert_eq!(bounds.height(), 8.0);
    }

    #[test]
    fn zero_vector_falls_back_to_positive_x() {
        let mut r = Recorder::new();
        Vector::from_tail((1.0, 1.0), Vec2::ZERO).paint(&cx(), &mut r);
        assert_eq!(r.strokes().count(), 0);
        let (head, _) = r.fills().next().unwrap();
        let tip = cx().to_pixel(Point::new(1.0, 1.0));
        assert_eq!(head.elements()[0], PathEl::MoveTo(tip));
        assert_eq!(head.bounding_box().x0, tip.x - 10.0);
    }
}
