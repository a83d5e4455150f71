// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use kurbo::{Circle, Point, Shape, Vec2};
use peniko::Color;

use crate::context::{Mark, PlotContext};
use crate::painter::{Painter, TextAlign, TextBaseline, TextStyle};

/// Default point radius in pixels.
const POINT_RADIUS: f64 = 6.0;

/// A filled dot of constant pixel size at a world position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointMark {
    /// Center.
    pub at: Point,
    /// Radius in pixels.
    pub radius: f64,
    /// Fill; the theme foreground when `None`.
    pub color: Option<Color>,
}

impl PointMark {
    /// A point at `at`.
    #[must_use]
    pub fn new(at: impl Into<Point>) -> Self {
        Self {
            at: at.into(),
            radius: POINT_RADIUS,
            color: None,
        }
    }

    /// Sets the fill.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the radius in pixels.
    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }
}

impl Mark for PointMark {
    fn paint(&self, cx: &PlotContext, painter: &mut dyn Painter) {
        if self.radius.is_nan() || self.radius <= 0.0 || !self.at.is_finite() {
            return;
        }
        let dot = Circle::new(cx.to_pixel(self.at), self.radius);
        let color = self.color.unwrap_or(cx.theme().foreground);
        painter.fill(&dot.to_path(0.1), color);
    }
}

/// Text anchored at a world position.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    /// The text.
    pub text: String,
    /// Anchor.
    pub at: Point,
    /// Pixel offset from the anchor, Y down.
    pub offset: Vec2,
    /// Text color; the theme foreground when `None`.
    pub color: Option<Color>,
    /// Font size; the theme text size when `None`.
    pub size: Option<f64>,
    /// Horizontal alignment.
    pub align: TextAlign,
    /// Vertical alignment.
    pub baseline: TextBaseline,
}

impl Label {
    /// `text` at `at`, centered.
    #[must_use]
    pub fn new(text: impl Into<String>, at: impl Into<Point>) -> Self {
        Self {
            text: text.into(),
            at: at.into(),
            offset: Vec2::ZERO,
            color: None,
            size: None,
            align: TextAlign::Middle,
            baseline: TextBaseline::Middle,
        }
    }

    /// Shifts the text by `offset` pixels.
    #[must_use]
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the font size.
    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets both alignments.
    #[must_use]
    pub fn aligned(mut self, align: TextAlign, baseline: TextBaseline) -> Self {
        self.align = align;
        self.baseline = baseline;
        self
    }
}

impl Mark for Label {
    fn paint(&self, cx: &PlotContext, painter: &mut dyn Painter) {
        let theme = cx.theme();
        let style = TextStyle::new(
            self.color.unwrap_or(theme.foreground),
            self.size.unwrap_or(theme.text_size),
        )
        .aligned(self.align, self.baseline)
        .with_halo(theme.background);
        painter.text(&self.text, cx.to_pixel(self.at) + self.offset, &style);
    }
}
