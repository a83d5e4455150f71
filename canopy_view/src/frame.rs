// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Size};

/// Pixel insets around the plotting area.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margins {
    /// Inset from the top edge.
    pub top: f64,
    /// Inset from the right edge.
    pub right: f64,
    /// Inset from the bottom edge.
    pub bottom: f64,
    /// Inset from the left edge.
    pub left: f64,
}

impl Margins {
    /// No insets.
    pub const ZERO: Self = Self::uniform(0.0);

    /// The same inset on every side.
    #[must_use]
    pub const fn uniform(inset: f64) -> Self {
        Self {
            top: inset,
            right: inset,
            bottom: inset,
            left: inset,
        }
    }

    /// `vertical` on top and bottom, `horizontal` on left and right.
    #[must_use]
    pub const fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }
}

/// The drawing surface of a plot: container size plus margins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotFrame {
    /// Container size in pixels.
    pub size: Size,
    /// Insets defining the plotting sub‑rectangle.
    pub margins: Margins,
}

impl PlotFrame {
    /// Creates a frame for a `width × height` container.
    #[must_use]
    pub fn new(width: f64, height: f64, margins: Margins) -> Self {
        Self {
            size: Size::new(width, height),
            margins,
        }
    }

    /// Width of the plotting area, never negative.
    #[must_use]
    pub fn inner_width(&self) -> f64 {
        (self.size.width - self.margins.left - self.margins.right).max(0.0)
    }

    /// Height of the plotting area, never negative.
    #[must_use]
    pub fn inner_height(&self) -> f64 {
        (self.size.height - self.margins.top - self.margins.bottom).max(0.0)
    }

    /// The plotting area in container pixel coordinates.
    #[must_use]
    pub fn inner_rect(&self) -> Rect {
        let x0 = self.margins.left;
        let y0 = self.margins.top;
        Rect::new(x0, y0, x0 + self.inner_width(), y0 + self.inner_height())
    }
}
