// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

/// Smallest span a mapper divides by.
///
/// A domain (or pixel range) that collapses to a point is widened to this
/// span so the mapping stays finite.
pub const MIN_SPAN: f64 = 1e-9;

/// Affine mapping between a world‑space interval and a pixel‑space interval.
///
/// `forward(x) = range.start + (x - domain.start) * k` with
/// `k = (range.end - range.start) / (domain.end - domain.start)`.
///
/// The mapper is stateless and cheap to rebuild; plots derive a fresh pair
/// of mappers every time the viewport changes. Inverting an axis (world Y up,
/// pixel Y down) is done by passing a reversed pixel range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearMapper {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
    k: f64,
    inv_k: f64,
}

impl LinearMapper {
    /// Creates a mapper from `domain` (world units) onto `range` (pixels).
    ///
    /// A zero‑width domain is treated as [`MIN_SPAN`] wide.
    #[must_use]
    pub fn new(domain: Range<f64>, range: Range<f64>) -> Self {
        let span = guard_span(domain.end - domain.start);
        let pixels = range.end - range.start;
        Self {
            domain_min: domain.start,
            domain_max: domain.end,
            range_min: range.start,
            range_max: range.end,
            k: pixels / span,
            inv_k: span / guard_span(pixels),
        }
    }

    /// Maps a world value to a pixel offset.
    #[must_use]
    pub fn forward(&self, x: f64) -> f64 {
        self.range_min + (x - self.domain_min) * self.k
    }

    /// Maps a pixel offset back to a world value.
    ///
    /// A collapsed pixel range is treated as [`MIN_SPAN`] wide.
    #[must_use]
    pub fn inverse(&self, px: f64) -> f64 {
        self.domain_min + (px - self.range_min) * self.inv_k
    }

    /// Signed pixels per world unit.
    ///
    /// Negative for inverted axes.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.k
    }

    /// Maps a world‑space length (not a position) to a pixel length.
    #[must_use]
    pub fn forward_len(&self, len: f64) -> f64 {
        len * self.k
    }

    /// Maps a pixel length back to a world‑space length.
    #[must_use]
    pub fn inverse_len(&self, len: f64) -> f64 {
        len * self.inv_k
    }

    /// The world interval this mapper was built from.
    #[must_use]
    pub fn domain(&self) -> Range<f64> {
        self.domain_min..self.domain_max
    }

    /// The pixel interval this mapper was built from.
    #[must_use]
    pub fn range(&self) -> Range<f64> {
        self.range_min..self.range_max
    }
}

fn guard_span(span: f64) -> f64 {
    if span.abs() < MIN_SPAN {
        if span.is_sign_negative() {
            -MIN_SPAN
        } else {
            MIN_SPAN
        }
    } else {
        span
    }
}
