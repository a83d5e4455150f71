// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fades and transform tweens for mounted groups.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;

use canopy_timing::{Cadence, CallbackId, Scheduler, TickControl};
use canopy_tween::{Tween, TweenConfig};

use crate::adapter::SceneAdapter;
use crate::backend::SceneBackend;
use crate::element::{NodeKey, Transform3D};
use crate::host::SharedAdapter;

/// How often an appearing group looks for meshes mounted after it started.
pub const APPEAR_POLL_MS: f64 = 50.0;

/// Which way a group fades.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeDirection {
    /// From transparent to each mesh's own opacity.
    Appear,
    /// From each mesh's own opacity to hidden.
    Disappear,
}

#[derive(Debug)]
struct FadeState {
    group: NodeKey,
    direction: FadeDirection,
    prepared: Vec<NodeKey>,
    opacity: f32,
    done: bool,
}

impl FadeState {
    /// Prepares meshes under the group that this fade has not touched yet.
    fn adopt<B: SceneBackend>(&mut self, adapter: &SharedAdapter<B>) {
        let mut a = adapter.borrow_mut();
        for key in a.mesh_keys_under(&self.group) {
            if self.prepared.contains(&key) {
                continue;
            }
            if a.prepare_fade(&key) {
                a.set_fade_opacity(&key, self.opacity);
                self.prepared.push(key);
            }
        }
    }

    fn apply<B: SceneBackend>(&mut self, adapter: &SharedAdapter<B>, progress: f64) {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "opacity only needs f32 precision"
        )]
        let p = progress.clamp(0.0, 1.0) as f32;
        self.opacity = match self.direction {
            FadeDirection::Appear => p,
            FadeDirection::Disappear => 1.0 - p,
        };
        let mut a = adapter.borrow_mut();
        let opacity = self.opacity;
        // Meshes unmounted mid-fade drop out of the set.
        self.prepared.retain(|key| a.set_fade_opacity(key, opacity));
        if progress >= 1.0 {
            self.finish(&mut a);
        }
    }

    fn finish<B: SceneBackend>(&mut self, a: &mut SceneAdapter<B>) {
        if self.done {
            return;
        }
        for key in self.prepared.drain(..) {
            a.restore_material(&key);
        }
        if self.direction == FadeDirection::Disappear {
            a.set_visible(&self.group, false);
        }
        self.done = true;
    }
}

/// Fades every mesh under a group in or out.
///
/// Each mesh is moved onto a private copy of its material the first time
/// the fade touches it, so the declared material is never modified. When the
/// fade completes the originals are restored and the copies released; a
/// disappearing group is then hidden.
///
/// While appearing, meshes mounted under the group after the fade started
/// are picked up every [`APPEAR_POLL_MS`].
#[derive(Debug)]
pub struct GroupAnimation {
    state: Rc<RefCell<FadeState>>,
    tween: Tween,
    poller: Option<CallbackId>,
}

impl GroupAnimation {
    /// Starts fading `group` at `now`.
    ///
    /// The tween runs over `[0, 1]`; `config.from`, `config.to` and looping
    /// are ignored.
    pub fn fade<B: SceneBackend + 'static>(
        adapter: &SharedAdapter<B>,
        group: NodeKey,
        direction: FadeDirection,
        config: TweenConfig,
        scheduler: &mut Scheduler,
        now: f64,
    ) -> Self {
        let state = Rc::new(RefCell::new(FadeState {
            group: group.clone(),
            direction,
            prepared: Vec::new(),
            opacity: match direction {
                FadeDirection::Appear => 0.0,
                FadeDirection::Disappear => 1.0,
            },
            done: false,
        }));
        if direction == FadeDirection::Appear {
            adapter.borrow_mut().set_visible(&group, true);
        }
        state.borrow_mut().adopt(adapter);

        let config = config
            .with_range(0.0, 1.0)
            .with_looping(false)
            .with_autoplay(true);
        let mut tween = Tween::new(config);
        {
            let state = Rc::downgrade(&state);
            let adapter = Rc::downgrade(adapter);
            tween.on_update(move |t| {
                if let (Some(state), Some(adapter)) = (state.upgrade(), adapter.upgrade()) {
                    state.borrow_mut().apply(&adapter, t);
                }
            });
        }
        tween.play(scheduler, now);

        let poller = (direction == FadeDirection::Appear).then(|| {
            let state = Rc::downgrade(&state);
            let adapter = Rc::downgrade(adapter);
            scheduler.register(Cadence::Interval(APPEAR_POLL_MS), now, move |_| {
                poll(&state, &adapter)
            })
        });

        Self {
            state,
            tween,
            poller,
        }
    }

    /// The driving tween.
    pub fn tween(&self) -> &Tween {
        &self.tween
    }

    /// Whether the fade has completed and restored its materials.
    pub fn is_done(&self) -> bool {
        self.state.borrow().done
    }

    /// Stops the fade where it is and restores every material.
    ///
    /// A cancelled disappear still hides its group.
    pub fn cancel<B: SceneBackend>(
        &mut self,
        adapter: &SharedAdapter<B>,
        scheduler: &mut Scheduler,
    ) {
        self.tween.stop(scheduler);
        if let Some(id) = self.poller.take() {
            scheduler.cancel(id);
        }
        self.state.borrow_mut().finish(&mut adapter.borrow_mut());
    }
}

fn poll<B: SceneBackend>(
    state: &Weak<RefCell<FadeState>>,
    adapter: &Weak<RefCell<SceneAdapter<B>>>,
) -> TickControl {
    let (Some(state), Some(adapter)) = (state.upgrade(), adapter.upgrade()) else {
        return TickControl::Stop;
    };
    let mut state = state.borrow_mut();
    if state.done {
        return TickControl::Stop;
    }
    state.adopt(&adapter);
    TickControl::Continue
}

/// `from.lerp(to, t)` with the Y rotation negated, as applied to a group.
pub fn group_transform_at(from: &Transform3D, to: &Transform3D, t: f32) -> Transform3D {
    let mut out = from.lerp(to, t);
    out.rotation.y = -out.rotation.y;
    out
}

/// Tweens a group's transform.
#[derive(Debug)]
pub struct GroupTween {
    tween: Tween,
}

impl GroupTween {
    /// Starts moving `group` from `from` to `to` at `now`.
    pub fn start<B: SceneBackend + 'static>(
        adapter: &SharedAdapter<B>,
        group: NodeKey,
        from: Transform3D,
        to: Transform3D,
        config: TweenConfig,
        scheduler: &mut Scheduler,
        now: f64,
    ) -> Self {
        let mut tween = Tween::new(config.with_range(0.0, 1.0));
        let weak = Rc::downgrade(adapter);
        tween.on_update(move |t| {
            let Some(adapter) = weak.upgrade() else {
                return;
            };
            #[expect(
                clippy::cast_possible_truncation,
                reason = "transforms are single precision"
            )]
            let t = t as f32;
            adapter
                .borrow_mut()
                .set_animated_transform(&group, &group_transform_at(&from, &to, t));
        });
        if config.autoplay {
            tween.play(scheduler, now);
        }
        Self { tween }
    }

    /// The driving tween.
    pub fn tween(&self) -> &Tween {
        &self.tween
    }

    /// Mutable access to the driving tween.
    pub fn tween_mut(&mut self) -> &mut Tween {
        &mut self.tween
    }
}
