// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Piecewise‑linear color ramps for scalar fields.

use alloc::vec::Vec;

use peniko::Color;

/// Colors placed at positions in `[0, 1]`, interpolated in sRGB.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorRamp {
    stops: Vec<(f32, Color)>,
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self::viridis()
    }
}

impl ColorRamp {
    /// A ramp through `stops`. Stops are sorted by position; positions are
    /// clamped to `[0, 1]`.
    #[must_use]
    pub fn new(stops: impl IntoIterator<Item = (f32, Color)>) -> Self {
        let mut stops: Vec<(f32, Color)> = stops
            .into_iter()
            .filter(|(t, _)| t.is_finite())
            .map(|(t, c)| (t.clamp(0.0, 1.0), c))
            .collect();
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { stops }
    }

    /// Evenly spaced stops from `low` to `high`.
    #[must_use]
    pub fn two_color(low: Color, high: Color) -> Self {
        Self::new([(0.0, low), (1.0, high)])
    }

    /// A five‑stop approximation of the viridis map.
    #[must_use]
    pub fn viridis() -> Self {
        Self::new([
            (0.0, Color::from_rgb8(0x44, 0x01, 0x54)),
            (0.25, Color::from_rgb8(0x3b, 0x52, 0x8b)),
            (0.5, Color::from_rgb8(0x21, 0x91, 0x8c)),
            (0.75, Color::from_rgb8(0x5e, 0xc9, 0x62)),
            (1.0, Color::from_rgb8(0xfd, 0xe7, 0x25)),
        ])
    }

    /// The stops, sorted.
    #[must_use]
    pub fn stops(&self) -> &[(f32, Color)] {
        &self.stops
    }

    /// The color at `t`, clamped to the end stops.
    ///
    /// An empty ramp is transparent; NaN samples the first stop.
    #[must_use]
    pub fn sample(&self, t: f32) -> Color {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Color::TRANSPARENT;
        };
        if t.is_nan() || t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }
        let upper = self.stops.partition_point(|(pos, _)| *pos <= t);
        let (t0, c0) = self.stops[upper - 1];
        let (t1, c1) = self.stops[upper];
        let span = t1 - t0;
        if span <= 0.0 {
            return c1;
        }
        lerp(c0, c1, (t - t0) / span)
    }
}

fn lerp(a: Color, b: Color, t: f32) -> Color {
    let mut components = a.components;
    for (c, target) in components.iter_mut().zip(b.components) {
        *c += (target - *c) * t;
    }
    Color::new(components)
}
