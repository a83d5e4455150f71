// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;

/// Colors and sizes shared by every mark in a plot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    /// Fill behind the plot.
    pub background: Color,
    /// Default color for marks, axes and labels.
    pub foreground: Color,
    /// Major grid lines.
    pub grid: Color,
    /// Minor grid lines.
    pub grid_minor: Color,
    /// Series colors, cycled by [`Theme::series`].
    pub accents: [Color; 6],
    /// Label font size in pixels.
    pub text_size: f64,
    /// Default line width in pixels.
    pub line_width: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Light foreground on a near‑black background.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            background: Color::from_rgb8(0x1a, 0x1b, 0x1f),
            foreground: Color::from_rgb8(0xe8, 0xe8, 0xea),
            grid: Color::from_rgba8(0xff, 0xff, 0xff, 0x33),
            grid_minor: Color::from_rgba8(0xff, 0xff, 0xff, 0x12),
            accents: ACCENTS,
            text_size: 12.0,
            line_width: 2.0,
        }
    }

    /// Dark foreground on white.
    #[must_use]
    pub fn light() -> Self {
        Self {
            background: Color::WHITE,
            foreground: Color::from_rgb8(0x20, 0x21, 0x24),
            grid: Color::from_rgba8(0x00, 0x00, 0x00, 0x33),
            grid_minor: Color::from_rgba8(0x00, 0x00, 0x00, 0x12),
            ..Self::dark()
        }
    }

    /// Accent color `index`, wrapping around.
    #[must_use]
    pub fn series(&self, index: usize) -> Color {
        self.accents[index % self.accents.len()]
    }

    /// The first accent.
    #[must_use]
    pub fn accent(&self) -> Color {
        self.accents[0]
    }
}

const ACCENTS: [Color; 6] = [
    Color::from_rgb8(0x58, 0xa6, 0xff),
    Color::from_rgb8(0xf7, 0x6b, 0x6b),
    Color::from_rgb8(0x4c, 0xd1, 0x8a),
    Color::from_rgb8(0xf5, 0xb9, 0x42),
    Color::from_rgb8(0xb1, 0x85, 0xf2),
    Color::from_rgb8(0x4f, 0xd2, 0xd8),
];
