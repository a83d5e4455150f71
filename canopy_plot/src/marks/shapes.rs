// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{BezPath, Point, Shape, Vec2};

use crate::context::{Mark, PlotContext};
use crate::painter::Painter;
use crate::style::{LineStyle, ShapeStyle};

/// Flattening tolerance for curved shapes, in pixels.
const TOLERANCE_PX: f64 = 0.1;

/// Fills and outlines a world‑space path.
fn paint_shape(path: BezPath, style: &ShapeStyle, cx: &PlotContext, painter: &mut dyn Painter) {
    let path = cx.path_to_pixel(path);
    let theme = cx.theme();
    if let Some(fill) = style.resolve_fill(theme) {
        painter.fill(&path, fill);
    }
    let (stroke, color) = style.line.resolve(theme);
    painter.stroke(&path, &stroke, color);
}

/// A circle of world radius; it stretches with the viewport's aspect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    /// Center.
    pub center: Point,
    /// Radius in world units.
    pub radius: f64,
    /// Outline and fill.
    pub style: ShapeStyle,
}

impl Circle {
    /// A circle at `center`.
    #[must_use]
    pub fn new(center: impl Into<Point>, radius: f64) -> Self {
        Self {
            center: center.into(),
            radius,
            style: ShapeStyle::default(),
        }
    }

    /// Sets the style.
    #[must_use]
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }
}

impl Mark for Circle {
    fn paint(&self, cx: &PlotContext, painter: &mut dyn Painter) {
        let radius = self.radius.abs();
        if !radius.is_finite() || radius == 0.0 {
            return;
        }
        let circle = kurbo::Circle::new(self.center, radius);
        paint_shape(
            circle.to_path(TOLERANCE_PX * cx.world_per_pixel()),
            &self.style,
            cx,
            painter,
        );
    }
}

/// An ellipse with world radii, rotated about its center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    /// Center.
    pub center: Point,
    /// Radii along the unrotated X and Y axes.
    pub radii: Vec2,
    /// Rotation in radians, counter‑clockwise in world space.
    pub rotation: f64,
    /// Outline and fill.
    pub style: ShapeStyle,
}

impl Ellipse {
    /// An axis‑aligned ellipse.
    #[must_use]
    pub fn new(center: impl Into<Point>, radii: impl Into<Vec2>) -> Self {
        Self {
            center: center.into(),
            radii: radii.into(),
            rotation: 0.0,
            style: ShapeStyle::default(),
        }
    }

    /// Sets the rotation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the style.
    #[must_use]
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }
}

impl Mark for Ellipse {
    fn paint(&self, cx: &PlotContext, painter: &mut dyn Painter) {
        let radii = Vec2::new(self.radii.x.abs(), self.radii.y.abs());
        if !radii.is_finite() || radii.x == 0.0 || radii.y == 0.0 {
            return;
        }
        let ellipse = kurbo::Ellipse::new(self.center, radii, self.rotation);
        paint_shape(
            ellipse.to_path(TOLERANCE_PX * cx.world_per_pixel()),
            &self.style,
            cx,
            painter,
        );
    }
}

/// A closed, filled polygon through world points.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    /// Vertices in order.
    pub points: Vec<Point>,
    /// Outline and fill.
    pub style: ShapeStyle,
}

impl Polygon {
    /// A polygon through `points`.
    #[must_use]
    pub fn new(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            points: points.into_iter().collect(),
            style: ShapeStyle::default(),
        }
    }

    /// Sets the style.
    #[must_use]
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }
}

impl Mark for Polygon {
    fn paint(&self, cx: &PlotContext, painter: &mut dyn Painter) {
        let Some(path) = polyline_path(&self.points, true) else {
            return;
        };
        paint_shape(path, &self.style, cx, painter);
    }
}

/// An open path through world points.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    /// Vertices in order.
    pub points: Vec<Point>,
    /// Stroke.
    pub style: LineStyle,
}

impl Polyline {
    /// A polyline through `points`.
    #[must_use]
    pub fn new(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            points: points.into_iter().collect(),
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

impl Mark for Polyline {
    fn paint(&self, cx: &PlotContext, painter: &mut dyn Painter) {
        let Some(path) = polyline_path(&self.points, false) else {
            return;
        };
        let (stroke, color) = self.style.resolve(cx.theme());
        painter.stroke(&cx.path_to_pixel(path), &stroke, color);
    }
}

/// A path through `points`; `None` for fewer than two.
fn polyline_path(points: &[Point], close: bool) -> Option<BezPath> {
    let (first, rest) = points.split_first()?;
    if rest.is_empty() {
        return None;
    }
    let mut path = BezPath::new();
    path.move_to(*first);
    for p in rest {
        path.line_to(*p);
    }
    if close {
        path.close_path();
    }
    Some(path)
}
