// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_axis::{TickSpec, format_tick, generate_ticks, minor_ticks};
use kurbo::{BezPath, Point, Stroke};

use crate::context::{Mark, PlotContext};
use crate::painter::{Painter, TextAlign, TextBaseline, TextStyle};

/// Pixels between an axis and its tick labels.
const LABEL_OFFSET: f64 = 5.0;

/// Room kept left of Y labels when the axis is pinned to the plot edge.
const LABEL_GUTTER: f64 = 40.0;

/// One axis of a [`Coordinates`] mark.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisOptions {
    /// Draw the axis line through zero.
    pub visible: bool,
    /// Where major ticks go.
    pub ticks: TickSpec,
    /// Draw tick labels.
    pub labels: bool,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            visible: true,
            ticks: TickSpec::default(),
            labels: true,
        }
    }
}

impl AxisOptions {
    /// Ticks from `spec`.
    #[must_use]
    pub fn with_ticks(mut self, ticks: TickSpec) -> Self {
        self.ticks = ticks;
        self
    }

    /// Shows or hides tick labels.
    #[must_use]
    pub fn with_labels(mut self, labels: bool) -> Self {
        self.labels = labels;
        self
    }

    /// Shows or hides the axis line.
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// Grid lines behind the axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridStyle {
    /// Lines at the major ticks.
    pub major: bool,
    /// Lines between the major ticks.
    pub minor: bool,
    /// Minor intervals per major interval.
    pub minor_subdivisions: usize,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            major: true,
            minor: false,
            minor_subdivisions: 4,
        }
    }
}

/// Cartesian axes through the origin with a tick grid and labels.
///
/// Ticks are regenerated from the visible viewport on every draw.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coordinates {
    /// Horizontal axis.
    pub x: AxisOptions,
    /// Vertical axis.
    pub y: AxisOptions,
    /// Grid.
    pub grid: GridStyle,
}

impl Coordinates {
    /// Axes with default ticks and a major grid.
    #[must_use]
    pub fn cartesian() -> Self {
        Self::default()
    }

    /// Sets the horizontal axis options.
    #[must_use]
    pub fn with_x(mut self, x: AxisOptions) -> Self {
        self.x = x;
        self
    }

    /// Sets the vertical axis options.
    #[must_use]
    pub fn with_y(mut self, y: AxisOptions) -> Self {
        self.y = y;
        self
    }

    /// Sets the grid.
    #[must_use]
    pub fn with_grid(mut self, grid: GridStyle) -> Self {
        self.grid = grid;
        self
    }
}

impl Mark for Coordinates {
    fn paint(&self, cx: &PlotContext, painter: &mut dyn Painter) {
        let visible = cx.visible();
        let rect = cx.space().inner_rect();
        let theme = cx.theme();
        let xs = generate_ticks(visible.x0, visible.x1, &self.x.ticks);
        let ys = generate_ticks(visible.y0, visible.y1, &self.y.ticks);

        let vertical = |x: f64, path: &mut BezPath| {
            let px = cx.to_pixel(Point::new(x, 0.0)).x;
            path.move_to((px, rect.y0));
            path.line_to((px, rect.y1));
        };
        let horizontal = |y: f64, path: &mut BezPath| {
            let py = cx.to_pixel(Point::new(0.0, y)).y;
            path.move_to((rect.x0, py));
            path.line_to((rect.x1, py));
        };

        let hairline = Stroke::new(1.0);
        if self.grid.minor {
            let n = self.grid.minor_subdivisions;
            let mut path = BezPath::new();
            for x in minor_ticks(&xs, n, visible.x0, visible.x1) {
                vertical(x, &mut path);
            }
            for y in minor_ticks(&ys, n, visible.y0, visible.y1) {
                horizontal(y, &mut path);
            }
            if !path.elements().is_empty() {
                painter.stroke(&path, &hairline, theme.grid_minor);
            }
        }
        if self.grid.major {
            let mut path = BezPath::new();
            for &x in &xs {
                vertical(x, &mut path);
            }
            for &y in &ys {
                horizontal(y, &mut path);
            }
            if !path.elements().is_empty() {
                painter.stroke(&path, &hairline, theme.grid);
            }
        }

        let axis_stroke = Stroke::new(theme.line_width.max(1.0));
        let origin = cx.to_pixel(Point::ORIGIN);
        if self.x.visible && visible.y0 <= 0.0 && 0.0 <= visible.y1 {
            let mut path = BezPath::new();
            path.move_to((rect.x0, origin.y));
            path.line_to((rect.x1, origin.y));
            painter.stroke(&path, &axis_stroke, theme.foreground);
        }
        if self.y.visible && visible.x0 <= 0.0 && 0.0 <= visible.x1 {
            let mut path = BezPath::new();
            path.move_to((origin.x, rect.y0));
            path.line_to((origin.x, rect.y1));
            painter.stroke(&path, &axis_stroke, theme.foreground);
        }

        let text = TextStyle::new(theme.foreground, theme.text_size).with_halo(theme.background);
        // Labels hug the axis, or the plot edge when the axis is off screen.
        let label_y = origin
            .y
            .min(rect.y1 - theme.text_size - LABEL_OFFSET)
            .max(rect.y0);
        let label_x = origin.x.min(rect.x1).max(rect.x0 + LABEL_GUTTER);
        if self.x.labels {
            let style = text.aligned(TextAlign::Middle, TextBaseline::Top);
            let step = tick_step(&xs);
            for &x in xs.iter().filter(|x| **x != 0.0) {
                let px = cx.to_pixel(Point::new(x, 0.0)).x;
                let label = format_tick(x, step);
                painter.text(&label, Point::new(px, label_y + LABEL_OFFSET), &style);
            }
        }
        if self.y.labels {
            let style = text.aligned(TextAlign::End, TextBaseline::Middle);
            let step = tick_step(&ys);
            for &y in ys.iter().filter(|y| **y != 0.0) {
                let py = cx.to_pixel(Point::new(0.0, y)).y;
                let label = format_tick(y, step);
                painter.text(&label, Point::new(label_x - LABEL_OFFSET, py), &style);
            }
        }
    }
}

/// Spacing of a tick set, used to pick label precision.
fn tick_step(ticks: &[f64]) -> f64 {
    ticks
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|s| *s > 0.0)
        .reduce(f64::min)
        .unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use canopy_axis::TickSpec;
    use canopy_view::{Margins, PlotFrame, PlotSpace, Viewport};
    use kurbo::Point;

    use super::{AxisOptions, Coordinates, GridStyle};
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
    fn labels_every_nonzero_tick() {
        let coords = Coordinates::cartesian()
            .with_x(AxisOptions::default().with_ticks(TickSpec::delta(5.0)))
            .with_y(AxisOptions::default().with_labels(false));
        let mut r = Recorder::new();
        coords.paint(&cx(), &mut r);
        let labels: Vec<_> = r.texts().map(|(t, _)| t).collect();
        assert_eq!(labels, ["-10", "-5", "5", "10"]);
        let (_, at) = r.texts().nth(2).unwrap();
        assert_eq!(at.x, cx().to_pixel(Point::new(5.0, 0.0)).x);
    }

    #[test]
    fn grid_and_axes_are_separate_strokes() {
        let coords = Coordinates::cartesian().with_grid(GridStyle {
            minor: true,
            ..GridStyle::default()
        });
        let mut r = Recorder::new();
        coords.paint(&cx(), &mut r);
        let theme = Theme::default();
        let colors: Vec<_> = r.strokes().map(|(_, _, c)| c).collect();
        assert_eq!(
            colors,
            [theme.grid_minor, theme.grid, theme.foreground, theme.foreground]
        );
    }

    #[test]
    fn axes_off_screen_are_not_drawn() {
        let space = PlotSpace::new(
            Viewport::new(5.0..10.0, 5.0..10.0),
            PlotFrame::new(400.0, 300.0, Margins::ZERO),
        );
        let cx = PlotContext::new(space, Theme::default());
        let coords = Coordinates::cartesian().with_grid(GridStyle {
            major: false,
            ..GridStyle::default()
        });
        let mut r = Recorder::new();
        coords.paint(&cx, &mut r);
        assert_eq!(r.strokes().count(), 0);
        assert!(r.texts().count() > 0);
    }
}
