// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick generation: nice steps, fixed deltas, and minor subdivisions.

use alloc::vec;
use alloc::vec::Vec;

/// Slack allowed when deciding whether a walked value lies inside the range.
const TOLERANCE: f64 = 1e-12;

/// Candidate mantissas for a nice step, tried in descending order.
const NICE_BASES: [f64; 6] = [10.0, 5.0, 2.0, 1.0, 0.5, 0.2];

/// Upper bound on the number of ticks a single walk may produce.
///
/// A delta that would exceed this yields no ticks, which sends
/// [`generate_ticks`] down its nice‑tick fallback.
const MAX_TICKS: usize = 10_000;

/// Approximate count used when a fixed delta produces too few ticks.
const FALLBACK_COUNT: usize = 8;

/// How ticks for one axis are chosen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickSpec {
    /// Nice ticks with roughly this many intervals.
    Count(usize),
    /// Fixed spacing, anchored at `anchor`.
    Delta {
        /// Distance between consecutive ticks in world units.
        delta: f64,
        /// A world value guaranteed to be on the tick lattice.
        anchor: f64,
    },
}

impl Default for TickSpec {
    fn default() -> Self {
        Self::Count(FALLBACK_COUNT)
    }
}

impl TickSpec {
    /// Fixed spacing anchored at zero.
    #[must_use]
    pub const fn delta(delta: f64) -> Self {
        Self::Delta { delta, anchor: 0.0 }
    }
}

/// Returns human‑friendly tick positions covering `[min, max]`.
///
/// The step is `span / approx_count` snapped down to `10`, `5`, `2`, `1`,
/// `0.5` or `0.2` times a power of ten. When the range contains zero, ticks
/// are anchored exactly at zero; otherwise they start at the first multiple
/// of the step not below `min`.
///
/// - `min == max` yields that single value.
/// - A non‑finite bound yields no ticks.
/// - Reversed bounds are treated as the same interval.
///
/// Values are rounded to 12 decimal places, sorted ascending and
/// deduplicated, so `-0.0` and float near‑duplicates never appear.
#[must_use]
pub fn nice_ticks(min: f64, max: f64, approx_count: usize) -> Vec<f64> {
    if min == max {
        return vec![min];
    }
    if !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    let (lo, hi) = ordered(min, max);
    let step = nice_step(hi - lo, approx_count);
    if !step.is_finite() || step <= 0.0 {
        return Vec::new();
    }
    walk(lo, hi, step, 0.0)
}

/// Returns ticks spaced exactly `delta` apart on the lattice through `anchor`.
///
/// When `anchor` lies inside the range the walk starts there and proceeds in
/// both directions; otherwise it starts at the first lattice value not below
/// `min`. The sign of `delta` is ignored and a zero or non‑finite delta
/// yields no ticks.
///
/// Callers usually want [`generate_ticks`], which falls back to
/// [`nice_ticks`] when a coarse delta leaves at most one tick in view.
#[must_use]
pub fn ticks_from_delta(min: f64, max: f64, delta: f64, anchor: f64) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || !anchor.is_finite() {
        return Vec::new();
    }
    let step = delta.abs();
    if !step.is_finite() || step == 0.0 {
        return Vec::new();
    }
    let (lo, hi) = ordered(min, max);
    walk(lo, hi, step, anchor)
}

/// Generates ticks for `[min, max]` according to `spec`.
///
/// A [`TickSpec::Delta`] that produces one tick or fewer falls back to
/// [`nice_ticks`] so an axis never ends up unlabeled.
#[must_use]
pub fn generate_ticks(min: f64, max: f64, spec: &TickSpec) -> Vec<f64> {
    match *spec {
        TickSpec::Count(count) => nice_ticks(min, max, count),
        TickSpec::Delta { delta, anchor } => {
            let ticks = ticks_from_delta(min, max, delta, anchor);
            if ticks.len() <= 1 {
                nice_ticks(min, max, FALLBACK_COUNT)
            } else {
                ticks
            }
        }
    }
}

/// Subdivides each interval between consecutive `major` ticks into
/// `subdivisions` parts and returns the interior positions within
/// `[min, max]`.
///
/// The partial intervals before the first and after the last major tick are
/// filled using the spacing of their neighbor, so a minor grid reaches the
/// edges of the view.
#[must_use]
pub fn minor_ticks(major: &[f64], subdivisions: usize, min: f64, max: f64) -> Vec<f64> {
    if major.len() < 2 || subdivisions < 2 {
        return Vec::new();
    }
    let (lo, hi) = ordered(min, max);
    let first_step = major[1] - major[0];
    let last_step = major[major.len() - 1] - major[major.len() - 2];

    let mut bounds = Vec::with_capacity(major.len() + 2);
    bounds.push(major[0] - first_step);
    bounds.extend_from_slice(major);
    bounds.push(major[major.len() - 1] + last_step);

    let mut out = Vec::new();
    for pair in bounds.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        for k in 1..subdivisions {
            let v = a + (b - a) * (k as f64) / (subdivisions as f64);
            if v >= lo - TOLERANCE && v <= hi + TOLERANCE {
                out.push(v);
            }
        }
    }
    finish(out)
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

fn nice_step(span: f64, approx_count: usize) -> f64 {
    let raw = span / approx_count.max(1) as f64;
    let pow10 = libm::pow(10.0, libm::floor(libm::log10(raw.abs())));
    let base = raw / pow10;
    let snapped = NICE_BASES
        .iter()
        .copied()
        .find(|&b| b <= base)
        .unwrap_or(base);
    snapped * pow10
}

fn walk(lo: f64, hi: f64, step: f64, anchor: f64) -> Vec<f64> {
    if (hi - lo) / step > MAX_TICKS as f64 {
        return Vec::new();
    }

    let mut out = Vec::new();
    if anchor >= lo - TOLERANCE && anchor <= hi + TOLERANCE {
        let mut i = 0.0_f64;
        loop {
            let v = anchor + i * step;
            if v > hi + TOLERANCE {
                break;
            }
            out.push(v);
            i += 1.0;
        }
        let mut i = 1.0_f64;
        loop {
            let v = anchor - i * step;
            if v < lo - TOLERANCE {
                break;
            }
            out.push(v);
            i += 1.0;
        }
    } else {
        let mut i = libm::ceil((lo - TOLERANCE - anchor) / step);
        loop {
            let v = anchor + i * step;
            if v > hi + TOLERANCE {
                break;
            }
            if v >= lo - TOLERANCE {
                out.push(v);
            }
            i += 1.0;
        }
    }
    finish(out)
}

fn finish(mut values: Vec<f64>) -> Vec<f64> {
    for v in &mut values {
        *v = round12(*v);
    }
    values.sort_by(f64::total_cmp);
    values.dedup();
    values
}

/// Rounds to 12 decimal places and folds `-0.0` into `0.0`.
fn round12(v: f64) -> f64 {
    let scaled = v * 1e12;
    if !scaled.is_finite() {
        return v;
    }
    libm::round(scaled) / 1e12 + 0.0
}
