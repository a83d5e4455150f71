// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stroke and fill options shared by the marks.

use kurbo::{Cap, Join, Stroke};
use peniko::Color;

use crate::theme::Theme;

/// How a mark's outline is stroked.
///
/// Unset fields fall back to the plot's [`Theme`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    /// Stroke color; the theme foreground when `None`.
    pub color: Option<Color>,
    /// Width in pixels; the theme line width when `None`.
    pub width: Option<f64>,
    /// Opacity multiplier in `[0, 1]`.
    pub opacity: f32,
    /// Dash and gap lengths in pixels.
    pub dash: Option<(f64, f64)>,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: None,
            width: None,
            opacity: 1.0,
            dash: None,
        }
    }
}

impl LineStyle {
    /// A solid line in `color`.
    #[must_use]
    pub fn color(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    /// Sets the width in pixels.
    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Dashes the line.
    #[must_use]
    pub fn dashed(mut self, dash: f64, gap: f64) -> Self {
        self.dash = Some((dash, gap));
        self
    }

    /// The stroke and color to draw with under `theme`.
    #[must_use]
    pub fn resolve(&self, theme: &Theme) -> (Stroke, Color) {
        let mut stroke = Stroke::new(self.width.unwrap_or(theme.line_width).max(0.0));
        stroke.join = Join::Round;
        stroke.start_cap = Cap::Round;
        stroke.end_cap = Cap::Round;
        if let Some((dash, gap)) = self.dash {
            stroke.dash_pattern.push(dash);
            stroke.dash_pattern.push(gap);
        }
        let color = self
            .color
            .unwrap_or(theme.foreground)
            .multiply_alpha(self.opacity.clamp(0.0, 1.0));
        (stroke, color)
    }
}

/// Outline and translucent fill of a closed shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeStyle {
    /// Outline.
    pub line: LineStyle,
    /// Fill color; the outline color when `None`.
    pub fill: Option<Color>,
    /// Fill opacity multiplier; `0` disables the fill.
    pub fill_opacity: f32,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            line: LineStyle::default(),
            fill: None,
            fill_opacity: 0.15,
        }
    }
}

impl ShapeStyle {
    /// Outline and fill in `color`.
    #[must_use]
    pub fn color(color: Color) -> Self {
        Self {
            line: LineStyle::color(color),
            ..Self::default()
        }
    }

    /// Sets the fill opacity.
    #[must_use]
    pub fn with_fill_opacity(mut self, opacity: f32) -> Self {
        self.fill_opacity = opacity;
        self
    }

    /// The fill color under `theme`, or `None` when the fill is invisible.
    #[must_use]
    pub fn resolve_fill(&self, theme: &Theme) -> Option<Color> {
        let opacity = self.fill_opacity.clamp(0.0, 1.0) * self.line.opacity.clamp(0.0, 1.0);
        if opacity <= 0.0 {
            return None;
        }
        let base = self
            .fill
            .or(self.line.color)
            .unwrap_or(theme.foreground);
        Some(base.multiply_alpha(opacity))
    }
}
