// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan and pinch session snapshots.

use canopy_view::{PlotFrame, PlotSpace, Viewport};
use kurbo::{Point, Vec2};

use crate::PointerId;

/// Smallest pixel distance or zoom ratio used as a divisor.
pub(crate) const PIXEL_EPSILON: f64 = 1e-9;

/// Snapshot taken when a pan starts.
///
/// Offsets are always measured from the origin rather than accumulated, so
/// a pan that returns to its start restores the original viewport exactly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PanSession {
    pub(crate) pointer: PointerId,
    pub(crate) origin_viewport: Viewport,
    pub(crate) origin_local: Point,
}

impl PanSession {
    pub(crate) fn start(pointer: PointerId, viewport: Viewport, local: Point) -> Self {
        Self {
            pointer,
            origin_viewport: viewport,
            origin_local: local,
        }
    }

    /// Pixel offset of `local` from the start position.
    pub(crate) fn total_offset(&self, local: Point) -> Vec2 {
        local - self.origin_local
    }

    /// The viewport that keeps the grabbed world point under `local`.
    pub(crate) fn viewport_at(&self, frame: PlotFrame, local: Point) -> Viewport {
        let delta = self.total_offset(local);
        let world = PlotSpace::new(self.origin_viewport, frame).pixel_vec_to_world(delta);
        self.origin_viewport.translated(-world)
    }
}

/// Incremental pinch state: the last inter‑pointer distance and the world
/// point that stays under the pointers' midpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PinchSession {
    pub(crate) distance: f64,
    pub(crate) anchor: Point,
}

impl PinchSession {
    pub(crate) fn start(space: &PlotSpace, a: Point, b: Point) -> Self {
        Self {
            distance: (b - a).hypot(),
            anchor: space.pixel_to_world(a.midpoint(b)),
        }
    }

    /// Applies one pinch step and returns the new viewport.
    ///
    /// The viewport is scaled about the stored anchor by the inverse distance
    /// ratio, then shifted so the anchor sits under the new midpoint. The
    /// session then rebases on the current distance and anchor.
    pub(crate) fn step(&mut self, viewport: Viewport, frame: PlotFrame, a: Point, b: Point) -> Viewport {
        let distance = (b - a).hypot();
        let scale = distance / self.distance.max(PIXEL_EPSILON);
        let inv = 1.0 / scale.max(PIXEL_EPSILON);
        let scaled = viewport.scaled_about(self.anchor, inv, inv);
        let mid = a.midpoint(b);
        let under = PlotSpace::new(scaled, frame).pixel_to_world(mid);
        let next = scaled.translated(self.anchor - under);
        self.distance = distance;
        self.anchor = PlotSpace::new(next, frame).pixel_to_world(mid);
        next
    }
}
