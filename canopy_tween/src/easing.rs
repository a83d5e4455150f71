// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::f64::consts::PI;

/// An easing curve mapping linear progress `t ∈ [0, 1]` to eased progress.
///
/// Every preset satisfies `ease(0) == 0` and `ease(1) == 1`.
#[derive(Clone, Copy, Debug, Default)]
pub enum Easing {
    /// `t`
    #[default]
    Linear,
    /// `t²`
    QuadIn,
    /// `t(2 - t)`
    QuadOut,
    /// Quadratic ease in, then out.
    QuadInOut,
    /// `t³`
    CubicIn,
    /// `1 - (1 - t)³`
    CubicOut,
    /// `4t³` below one half, `1 - (-2t + 2)³ / 2` above.
    CubicInOut,
    /// `1 - cos(πt / 2)`
    SineIn,
    /// `sin(πt / 2)`
    SineOut,
    /// `0.5 - 0.5 cos(πt)`
    SineInOut,
    /// A caller‑supplied curve.
    Custom(fn(f64) -> f64),
}

impl Easing {
    /// Applies the curve to `t`, clamped to `[0, 1]` first.
    #[must_use]
    pub fn ease(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::QuadIn => t * t,
            Self::QuadOut => t * (2.0 - t),
            Self::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u / 2.0
                }
            }
            Self::CubicIn => t * t * t,
            Self::CubicOut => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
            // cos(π/2) rounds to 6e-17, not 0.
            Self::SineIn if t >= 1.0 => 1.0,
            Self::SineIn => 1.0 - libm::cos(t * PI / 2.0),
            Self::SineOut => libm::sin(t * PI / 2.0),
            Self::SineInOut => 0.5 - 0.5 * libm::cos(PI * t),
            Self::Custom(f) => f(t),
        }
    }
}

/// Preset names, in kebab‑case and camelCase.
const EASINGS: &[(&str, Easing)] = &[
    ("linear", Easing::Linear),
    ("quad-in", Easing::QuadIn),
    ("quadIn", Easing::QuadIn),
    ("quad-out", Easing::QuadOut),
    ("quadOut", Easing::QuadOut),
    ("quad-in-out", Easing::QuadInOut),
    ("quadInOut", Easing::QuadInOut),
    ("cubic-in", Easing::CubicIn),
    ("cubicIn", Easing::CubicIn),
    ("cubic-out", Easing::CubicOut),
    ("cubicOut", Easing::CubicOut),
    ("cubic-in-out", Easing::CubicInOut),
    ("cubicInOut", Easing::CubicInOut),
    ("sine-in", Easing::SineIn),
    ("sineIn", Easing::SineIn),
    ("sine-out", Easing::SineOut),
    ("sineOut", Easing::SineOut),
    ("sine-in-out", Easing::SineInOut),
    ("sineInOut", Easing::SineInOut),
];

/// Looks up a preset by name, e.g. `"cubic-in-out"` or `"cubicInOut"`.
#[must_use]
pub fn easing_by_name(name: &str) -> Option<Easing> {
    EASINGS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, easing)| *easing)
}

/// All preset names.
pub fn easing_names() -> impl Iterator<Item = &'static str> {
    EASINGS.iter().map(|(n, _)| *n)
}
