// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animated 2D properties of a plot element.

use alloc::rc::Rc;
use core::cell::Cell;

use canopy_timing::Scheduler;
use canopy_view::PlotSpace;
use kurbo::{Affine, Point, Vec2};

use crate::{Tween, TweenConfig};

/// Transform and opacity of an element, in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose2D {
    /// Offset from the element's rest position, in world units.
    pub position: Vec2,
    /// Uniform scale about the element's origin.
    pub scale: f64,
    /// Counter‑clockwise rotation about the element's origin, in radians.
    pub rotation: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for Pose2D {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: 1.0,
            rotation: 0.0,
            opacity: 1.0,
        }
    }
}

impl Pose2D {
    /// Component‑wise linear interpolation.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self {
            position: self.position.lerp(other.position, t),
            scale: mix(self.scale, other.scale),
            rotation: mix(self.rotation, other.rotation),
            opacity: mix(self.opacity, other.opacity),
        }
    }

    /// Pixel‑space transform and opacity for this pose.
    ///
    /// `origin` is the world point the element rotates and scales about.
    /// The world offset goes through the current `space`, so a pan or zoom
    /// mid‑animation keeps the element attached to its world position.
    #[must_use]
    pub fn to_frame(&self, origin: Point, space: &PlotSpace) -> AnimatedFrame {
        let offset = space.world_vec_to_pixel(self.position);
        let pivot = space.world_to_pixel(origin);
        // Pixel Y points down, so a counter-clockwise world rotation is
        // clockwise in pixels.
        let transform = Affine::translate(offset)
            * Affine::rotate_about(-self.rotation, pivot)
            * Affine::scale_about(self.scale, pivot);
        AnimatedFrame {
            transform,
            opacity: self.opacity.clamp(0.0, 1.0),
        }
    }
}

/// What a renderer applies to an animated element on one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatedFrame {
    /// Pixel‑space transform.
    pub transform: Affine,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for AnimatedFrame {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            opacity: 1.0,
        }
    }
}

/// Tweens a [`Pose2D`] between two states.
#[derive(Debug)]
pub struct PropertyTween {
    from: Pose2D,
    to: Pose2D,
    origin: Point,
    tween: Tween,
}

impl PropertyTween {
    /// Starts tweening from `from` to `to` about world point `origin`.
    ///
    /// `config.from` and `config.to` are overridden to run over `[0, 1]`.
    #[must_use]
    pub fn start(
        from: Pose2D,
        to: Pose2D,
        origin: Point,
        config: TweenConfig,
        scheduler: &mut Scheduler,
        now: f64,
    ) -> Self {
        Self {
            from,
            to,
            origin,
            tween: Tween::start(config.with_range(0.0, 1.0), scheduler, now),
        }
    }

    /// The driving tween.
    #[must_use]
    pub fn tween(&self) -> &Tween {
        &self.tween
    }

    /// Mutable access to the driving tween, for play/pause/reverse.
    pub fn tween_mut(&mut self) -> &mut Tween {
        &mut self.tween
    }

    /// The current interpolated pose.
    #[must_use]
    pub fn pose(&self) -> Pose2D {
        self.from.lerp(&self.to, self.tween.value())
    }

    /// The current frame in `space`.
    #[must_use]
    pub fn frame(&self, space: &PlotSpace) -> AnimatedFrame {
        self.pose().to_frame(self.origin, space)
    }

    /// Calls `f` with a fresh frame on every tick.
    ///
    /// `space` is read on each tick, so hosts update it when the viewport
    /// changes.
    pub fn on_frame(
        &mut self,
        space: Rc<Cell<PlotSpace>>,
        mut f: impl FnMut(AnimatedFrame) + 'static,
    ) {
        let (from, to, origin) = (self.from, self.to, self.origin);
        self.tween.on_update(move |t| {
            f(from.lerp(&to, t).to_frame(origin, &space.get()));
        });
    }
}
