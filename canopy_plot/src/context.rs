// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, BezPath, Point, Rect, Vec2};

use canopy_view::{PlotSpace, Viewport};

use crate::painter::Painter;
use crate::theme::Theme;

/// Everything a mark needs to draw: the coordinate space and the theme.
///
/// Marks receive it explicitly from [`Plot::render`](crate::Plot::render),
/// so a mark can never be drawn without a coordinate space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotContext {
    space: PlotSpace,
    theme: Theme,
}

impl PlotContext {
    /// A context for `space` drawn with `theme`.
    #[must_use]
    pub fn new(space: PlotSpace, theme: Theme) -> Self {
        Self { space, theme }
    }

    /// The world/pixel mapping.
    #[must_use]
    pub fn space(&self) -> &PlotSpace {
        &self.space
    }

    /// The theme.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// The visible viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.space.viewport()
    }

    /// World point to pixel.
    #[must_use]
    pub fn to_pixel(&self, pt: Point) -> Point {
        self.space.world_to_pixel(pt)
    }

    /// World displacement to pixel displacement.
    #[must_use]
    pub fn to_pixel_vec(&self, v: Vec2) -> Vec2 {
        self.space.world_vec_to_pixel(v)
    }

    /// Pixel point to world.
    #[must_use]
    pub fn to_world(&self, pt: Point) -> Point {
        self.space.pixel_to_world(pt)
    }

    /// World rectangle currently visible, normalized.
    #[must_use]
    pub fn visible(&self) -> Rect {
        self.space.viewport().to_rect().abs()
    }

    /// The affine taking world coordinates to pixels.
    #[must_use]
    pub fn world_to_pixel(&self) -> Affine {
        self.space.world_to_pixel_affine()
    }

    /// A world‑space path mapped to pixels.
    #[must_use]
    pub fn path_to_pixel(&self, mut path: BezPath) -> BezPath {
        path.apply_affine(self.world_to_pixel());
        path
    }

    /// World units per pixel, the finer of the two axes.
    #[must_use]
    pub fn world_per_pixel(&self) -> f64 {
        let ppu = self.space.pixels_per_unit();
        let finest = ppu.x.max(ppu.y);
        if finest > 0.0 { 1.0 / finest } else { 1.0 }
    }
}

/// Something drawn into a plot.
pub trait Mark {
    /// Draws this mark in pixel space.
    fn paint(&self, cx: &PlotContext, painter: &mut dyn Painter);
}

impl<F> Mark for F
where
    F: Fn(&PlotContext, &mut dyn Painter),
{
    fn paint(&self, cx: &PlotContext, painter: &mut dyn Painter) {
        self(cx, painter);
    }
}
