// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::string::String;

const MAX_DECIMALS: usize = 12;

/// Formats a tick value for an axis label.
///
/// The number of decimals is the smallest that represents both `value` and
/// the tick `step` exactly (up to 12), so labels on a `0.25` lattice read
/// `0.25`, `0.50`, `0.75` rather than a rounded or overlong form. Negative
/// zero prints as `0`.
#[must_use]
pub fn format_tick(value: f64, step: f64) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let decimals = decimals_of(step).max(decimals_of(value));
    let mut text = format!("{value:.decimals$}");
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text.remove(0);
    }
    text
}

fn decimals_of(v: f64) -> usize {
    if !v.is_finite() {
        return 0;
    }
    let v = v.abs();
    let mut scale = 1.0_f64;
    for d in 0..MAX_DECIMALS {
        let scaled = v * scale;
        if (scaled - libm::round(scaled)).abs() < 1e-9 * scaled.max(1.0) {
            return d;
        }
        scale *= 10.0;
    }
    MAX_DECIMALS
}

#[cfg(test)]
mod tests {
    use super::format_tick;

    #[test]
    fn integers_have_no_decimals() {
        assert_eq!(format_tick(20.0, 20.0), "20");
        assert_eq!(format_tick(-40.0, 20.0), "-40");
    }

    #[test]
    fn decimals_follow_step_and_value() {
        assert_eq!(format_tick(0.5, 0.1), "0.5");
        assert_eq!(format_tick(0.3, 0.1), "0.3");
        assert_eq!(format_tick(0.5, 0.25), "0.50");
        assert_eq!(format_tick(1.5, 1.0), "1.5");
    }

    #[test]
    fn negative_zero_prints_as_zero() {
        assert_eq!(format_tick(-0.0, 1.0), "0");
        assert_eq!(format_tick(-0.000_000_000_000_1, 0.1), "0.0");
    }
}
