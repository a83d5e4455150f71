// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::fmt;

use kurbo::{BezPath, Point};

use crate::context::{Mark, PlotContext};
use crate::painter::Painter;
use crate::style::LineStyle;

/// Pixels between samples when a graph picks its own sample count.
const PIXELS_PER_SAMPLE: f64 = 2.0;

/// Default sample count for parametric curves.
const PARAMETRIC_SAMPLES: usize = 256;

/// Which axis a [`FunctionGraph`] takes as its input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GraphAxis {
    /// `y = f(x)`.
    #[default]
    X,
    /// `x = f(y)`.
    Y,
}

/// Collects sampled points into polylines, lifting the pen across
/// non‑finite samples.
#[derive(Default)]
struct PenPath {
    path: BezPath,
    down: bool,
}

impl PenPath {
    fn push(&mut self, p: Point) {
        if !p.is_finite() {
            self.down = false;
            return;
        }
        if self.down {
            self.path.line_to(p);
        } else {
            self.path.move_to(p);
            self.down = true;
        }
    }
}

/// The graph of a one‑variable function.
pub struct FunctionGraph {
    f: Box<dyn Fn(f64) -> f64>,
    /// Input axis.
    pub axis: GraphAxis,
    /// Input interval; the visible range when `None`.
    pub domain: Option<(f64, f64)>,
    /// Sample count; one per two pixels of the input axis when `None`.
    pub samples: Option<usize>,
    /// Stroke.
    pub style: LineStyle,
}

impl fmt::Debug for FunctionGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionGraph")
            .field("axis", &self.axis)
            .field("domain", &self.domain)
            .field("samples", &self.samples)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl FunctionGraph {
    /// The graph of `y = f(x)`.
    #[must_use]
    pub fn of_x(f: impl Fn(f64) -> f64 + 'static) -> Self {
        Self::new(GraphAxis::X, f)
    }

    /// The graph of `x = f(y)`.
    #[must_use]
    pub fn of_y(f: impl Fn(f64) -> f64 + 'static) -> Self {
        Self::new(GraphAxis::Y, f)
    }

    fn new(axis: GraphAxis, f: impl Fn(f64) -> f64 + 'static) -> Self {
        Self {
            f: Box::new(f),
            axis,
            domain: None,
            samples: None,
            style: LineStyle::default(),
        }
    }

    /// Restricts the input to `[min, max]`.
    #[must_use]
    pub fn with_domain(mut self, min: f64, max: f64) -> Self {
        self.domain = Some((min, max));
        self
    }

    /// Samples the function `samples` times; fewer than two is raised to two.
    #[must_use]
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Sets the stroke.
    #[must_use]
    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    /// The pixel‑space path under `cx`.
    #[must_use]
    pub fn path(&self, cx: &PlotContext) -> BezPath {
        let visible = cx.visible();
        let inner = cx.space().inner_rect();
        let (visible_range, pixel_extent) = match self.axis {
            GraphAxis::X => ((visible.x0, visible.x1), inner.width()),
            GraphAxis::Y => ((visible.y0, visible.y1), inner.height()),
        };
        let (min, max) = self.domain.unwrap_or(visible_range);
        let samples = self
            .samples
            .unwrap_or_else(|| auto_samples(pixel_extent))
            .max(2);

        let mut pen = PenPath::default();
        for t in sample_points(min, max, samples) {
            let v = (self.f)(t);
            let world = match self.axis {
                GraphAxis::X => Point::new(t, v),
                GraphAxis::Y => Point::new(v, t),
            };
            pen.push(cx.to_pixel(world));
        }
        pen.path
    }
}

impl Mark for FunctionGraph {
    fn paint(&self, cx: &PlotContext, painter: &mut dyn Painter) {
        let path = self.path(cx);
        if path.elements().is_empty() {
            return;
        }
        let (stroke, color) = self.style.resolve(cx.theme());
        painter.stroke(&path, &stroke, color);
    }
}

/// A curve `t ↦ (x(t), y(t))` over a parameter interval.
pub struct Parametric {
    xy: Box<dyn Fn(f64) -> Point>,
    /// Parameter interval.
    pub t_range: (f64, f64),
    /// Sample count, at least two.
    pub samples: usize,
    /// Stroke.
    pub style: LineStyle,
}

impl fmt::Debug for Parametric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parametric")
            .field("t_range", &self.t_range)
            .field("samples", &self.samples)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl Parametric {
    /// The curve traced by `xy` for `t` in `[t0, t1]`.
    #[must_use]
    pub fn new(xy: impl Fn(f64) -> Point + 'static, t0: f64, t1: f64) -> Self {
        Self {
            xy: Box::new(xy),
            t_range: (t0, t1),
            samples: PARAMETRIC_SAMPLES,
            style: LineStyle::default(),
        }
    }

    /// Sets the sample count.
    #[must_use]
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Sets the stroke.
    #[must_use]
    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }
}

impl Mark for Parametric {
    fn paint(&self, cx: &PlotContext, painter: &mut dyn Painter) {
        let (t0, t1) = self.t_range;
        let mut pen = PenPath::default();
        for t in sample_points(t0, t1, self.samples.max(2)) {
            pen.push(cx.to_pixel((self.xy)(t)));
        }
        if pen.path.elements().is_empty() {
            return;
        }
        let (stroke, color) = self.style.resolve(cx.theme());
        painter.stroke(&pen.path, &stroke, color);
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "clamped to a small positive range before the cast"
)]
fn auto_samples(pixels: f64) -> usize {
    libm::ceil(pixels / PIXELS_PER_SAMPLE).clamp(2.0, 8192.0) as usize
}

/// `n` evenly spaced values from `a` to `b` inclusive.
fn sample_points(a: f64, b: f64, n: usize) -> impl Iterator<Item = f64> {
    let last = (n - 1) as f64;
    (0..n).map(move |i| {
        if i + 1 == n {
            b
        } else {
            a + (b - a) * (i as f64 / last)
        }
    })
}

#[cfg(test)]
mod tests {
    use canopy_view::{Margins, PlotFrame, PlotSpace, Viewport};
    use kurbo::{PathEl, Point};

    use super::{FunctionGraph, Parametric};
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

    fn subpaths(path: &kurbo::BezPath) -> usize {
        path.elements()
            .iter()
            .filter(|e| matches!(e, PathEl::MoveTo(_)))
            .count()
    }

    #[test]
    fn samples_across_the_view() {
        let path = FunctionGraph::of_x(|x| x / 2.0).path(&cx());
        let els = path.elements();
        assert_eq!(els.len(), 200);
        assert_eq!(els[0], PathEl::MoveTo(Point::new(0.0, 300.0)));
        assert_eq!(els[199], PathEl::LineTo(Point::new(400.0, 0.0)));
    }

    #[test]
    fn sample_count_is_clamped() {
        let path = FunctionGraph::of_x(|x| x)
            .with_samples(0)
            .with_domain(0.0, 1.0)
            .path(&cx());
        assert_eq!(path.elements().len(), 2);
    }

    #[test]
    fn pen_lifts_at_poles() {
        let path = FunctionGraph::of_x(|x| if x == 0.0 { f64::NAN } else { 1.0 / x })
            .with_domain(-1.0, 1.0)
            .with_samples(5)
            .path(&cx());
        assert_eq!(subpaths(&path), 2);
        assert_eq!(path.elements().len(), 4);
    }

    #[test]
    fn graph_of_y_swaps_axes() {
        let path = FunctionGraph::of_y(|_| 0.0)
            .with_domain(-5.0, 5.0)
            .with_samples(2)
            .path(&cx());
        assert_eq!(
            path.elements(),
            [
                PathEl::MoveTo(Point::new(200.0, 300.0)),
                PathEl::LineTo(Point::new(200.0, 0.0)),
            ]
        );
    }

    #[test]
    fn parametric_traces_the_curve() {
        let circle = Parametric::new(
            |t| Point::new(libm::cos(t), libm::sin(t)),
            0.0,
            core::f64::consts::TAU,
        )
        .with_samples(64);
        let mut r = Recorder::new();
        circle.paint(&cx(), &mut r);
        let (path, _, _) = r.strokes().next().unwrap();
        assert_eq!(path.elements().len(), 64);
        assert_eq!(subpaths(path), 1);
    }
}
