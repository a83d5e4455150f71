// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marks sampled over a lattice: arrows, colored cells and iso‑lines.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use canopy_contour::{ScalarGrid, contour_levels, contour_path};
use canopy_view::{Lattice, SamplingMode};
use kurbo::{Line, Point, Rect, Shape, Vec2};

use crate::context::{Mark, PlotContext};
use crate::marks::Vector;
use crate::painter::Painter;
use crate::ramp::ColorRamp;
use crate::style::LineStyle;

/// Arrows of a vector field at the nodes of a lattice.
pub struct VectorField {
    f: Box<dyn Fn(f64, f64) -> Vec2>,
    /// Lattice layout.
    pub sampling: SamplingMode,
    /// Multiplier applied to every vector before drawing.
    pub scale: f64,
    /// Longest drawn arrow in world units; longer arrows are shortened.
    pub max_length: Option<f64>,
    /// Stroke.
    pub style: LineStyle,
}

impl fmt::Debug for VectorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorField")
            .field("sampling", &self.sampling)
            .field("scale", &self.scale)
            .field("max_length", &self.max_length)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl VectorField {
    /// The field `f`, sampled once per world unit.
    #[must_use]
    pub fn new(f: impl Fn(f64, f64) -> Vec2 + 'static) -> Self {
        Self {
            f: Box::new(f),
            sampling: SamplingMode::World { step: 1.0 },
            scale: 1.0,
            max_length: None,
            style: LineStyle::default(),
        }
    }

    /// Sets the lattice layout.
    #[must_use]
    pub fn with_sampling(mut self, sampling: SamplingMode) -> Self {
        self.sampling = sampling;
        self
    }

    /// Sets the vector multiplier.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Caps the drawn arrow length.
    #[must_use]
    pub fn with_max_length(mut self, max_length: f64) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Sets the stroke.
    #[must_use]
    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    /// The drawn displacement at `at`, or `None` where nothing is drawn.
    fn arrow(&self, at: Point) -> Option<Vec2> {
        let mut v = (self.f)(at.x, at.y) * self.scale;
        if !v.is_finite() || v == Vec2::ZERO {
            return None;
        }
        if let Some(max) = self.max_length {
            let length = v.hypot();
            if length > max {
                v *= max.max(0.0) / length;
            }
        }
        Some(v)
    }
}

impl Mark for VectorField {
    fn paint(&self, cx: &PlotContext, painter: &mut dyn Painter) {
        let lattice = Lattice::for_viewport(self.sampling, &cx.viewport());
        for j in 0..=lattice.count_y {
            for i in 0..=lattice.count_x {
                let tail = lattice.node(i, j);
                if let Some(v) = self.arrow(tail) {
                    Vector::from_tail(tail, v)
                        .with_style(self.style)
                        .paint(cx, painter);
                }
            }
        }
    }
}

/// A scalar field drawn as colored lattice cells.
pub struct Heatmap {
    f: Box<dyn Fn(f64, f64) -> f64>,
    /// Lattice layout.
    pub sampling: SamplingMode,
    /// Values mapped to the ends of the ramp; the sampled extremes when
    /// `None`.
    pub range: Option<(f64, f64)>,
    /// Colors.
    pub ramp: ColorRamp,
    /// Opacity multiplier.
    pub opacity: f32,
}

impl fmt::Debug for Heatmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heatmap")
            .field("sampling", &self.sampling)
            .field("range", &self.range)
            .field("ramp", &self.ramp)
            .field("opacity", &self.opacity)
            .finish_non_exhaustive()
    }
}

impl Heatmap {
    /// The field `f` on the default viewport lattice.
    #[must_use]
    pub fn new(f: impl Fn(f64, f64) -> f64 + 'static) -> Self {
        Self {
            f: Box::new(f),
            sampling: SamplingMode::default(),
            range: None,
            ramp: ColorRamp::default(),
            opacity: 1.0,
        }
    }

    /// Sets the lattice layout.
    #[must_use]
    pub fn with_sampling(mut self, sampling: SamplingMode) -> Self {
        self.sampling = sampling;
        self
    }

    /// Fixes the value range.
    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }

    /// Sets the colors.
    #[must_use]
    pub fn with_ramp(mut self, ramp: ColorRamp) -> Self {
        self.ramp = ramp;
        self
    }

    /// Sets the opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// World cells and their values, row by row from the bottom.
    fn cells(&self, lattice: &Lattice) -> Vec<(Rect, f64)> {
        let mut out = Vec::with_capacity(lattice.count_x * lattice.count_y);
        for j in 0..lattice.count_y {
            for i in 0..lattice.count_x {
                let cell = lattice.cell(i, j);
                let c = cell.center();
                out.push((cell, (self.f)(c.x, c.y)));
            }
        }
        out
    }
}

impl Mark for Heatmap {
    fn paint(&self, cx: &PlotContext, painter: &mut dyn Painter) {
        let lattice = Lattice::for_viewport(self.sampling, &cx.viewport());
        let cells = self.cells(&lattice);
        let (lo, hi) = self.range.or_else(|| finite_extent(&cells)).unwrap_or((0.0, 1.0));
        let span = hi - lo;
        let opacity = self.opacity.clamp(0.0, 1.0);
        for (cell, value) in cells {
            if !value.is_finite() {
                continue;
            }
            #[expect(clippy::cast_possible_truncation, reason = "ramp positions are f32")]
            let t = if span == 0.0 { 0.5 } else { ((value - lo) / span) as f32 };
            let rect = Rect::from_points(
                cx.to_pixel(Point::new(cell.x0, cell.y0)),
                cx.to_pixel(Point::new(cell.x1, cell.y1)),
            );
            painter.fill(&rect.to_path(0.1), self.ramp.sample(t).multiply_alpha(opacity));
        }
    }
}

fn finite_extent(cells: &[(Rect, f64)]) -> Option<(f64, f64)> {
    cells
        .iter()
        .map(|(_, v)| *v)
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Which iso‑levels a [`ContourMark`] draws.
#[derive(Clone, Debug, PartialEq)]
pub enum ContourLevels {
    /// Exactly these levels.
    Values(Vec<f64>),
    /// Every multiple of the interval within the sampled value range.
    Interval(f64),
}

/// Iso‑lines of a scalar field, traced with marching squares.
pub struct ContourMark {
    f: Box<dyn Fn(f64, f64) -> f64>,
    /// Levels to trace.
    pub levels: ContourLevels,
    /// Lattice layout.
    pub sampling: SamplingMode,
    /// Stroke.
    pub style: LineStyle,
}

impl fmt::Debug for ContourMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContourMark")
            .field("levels", &self.levels)
            .field("sampling", &self.sampling)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl ContourMark {
    /// The zero level set of `f`.
    #[must_use]
    pub fn new(f: impl Fn(f64, f64) -> f64 + 'static) -> Self {
        Self {
            f: Box::new(f),
            levels: ContourLevels::Values(alloc::vec![0.0]),
            sampling: SamplingMode::default(),
            style: LineStyle::default(),
        }
    }

    /// Sets the levels.
    #[must_use]
    pub fn with_levels(mut self, levels: ContourLevels) -> Self {
        self.levels = levels;
        self
    }

    /// Sets the lattice layout.
    #[must_use]
    pub fn with_sampling(mut self, sampling: SamplingMode) -> Self {
        self.sampling = sampling;
        self
    }

    /// Sets the stroke.
    #[must_use]
    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    /// Pixel‑space segments for each traced level.
    #[must_use]
    pub fn trace(&self, cx: &PlotContext) -> Vec<(f64, Vec<Line>)> {
        let lattice = Lattice::for_viewport(self.sampling, &cx.viewport());
        let f = |x: f64, y: f64| (self.f)(x, y);
        let sample = |level| {
            ScalarGrid::sample(f, level, lattice.count_x, lattice.count_y, lattice.bounds)
        };
        let levels = match &self.levels {
            ContourLevels::Values(values) => values.clone(),
            ContourLevels::Interval(interval) => {
                let base = sample(0.0);
                match grid_extent(&base) {
                    Some((lo, hi)) => contour_levels(lo, hi, *interval),
                    None => Vec::new(),
                }
            }
        };
        levels
            .into_iter()
            .map(|level| {
                let segments = sample(level)
                    .segments()
                    .into_iter()
                    .map(|l| Line::new(cx.to_pixel(l.p0), cx.to_pixel(l.p1)))
                    .collect();
                (level, segments)
            })
            .collect()
    }
}

impl Mark for ContourMark {
    fn paint(&self, cx: &PlotContext, painter: &mut dyn Painter) {
        let (stroke, color) = self.style.resolve(cx.theme());
        for (_, segments) in self.trace(cx) {
            if segments.is_empty() {
                continue;
            }
            painter.stroke(&contour_path(&segments), &stroke, color);
        }
    }
}

fn grid_extent(grid: &ScalarGrid) -> Option<(f64, f64)> {
    let (cx, cy) = grid.cell_counts();
    let mut extent: Option<(f64, f64)> = None;
    for j in 0..=cy {
        for i in 0..=cx {
            let Some(v) = grid.value(i, j).filter(|v| v.is_finite()) else {
                continue;
            };
            extent = Some(match extent {
                None => (v, v),
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
            });
        }
    }
    extent
}
