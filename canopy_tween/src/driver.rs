// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use core::fmt;

use canopy_timing::{Cadence, CallbackId, Scheduler, TickControl};
use tracing::trace;

use crate::Easing;

/// Period of the time‑based fallback tick, in milliseconds.
///
/// Keeps tweens progressing when the host throttles frame callbacks.
pub const FALLBACK_POLL_MS: f64 = 100.0;

/// Minimum time between two replay‑key resets, in milliseconds.
pub const REPLAY_DEBOUNCE_MS: f64 = 250.0;

const MIN_DURATION_MS: f64 = 1e-9;

/// Timing and shape of a [`Tween`].
#[derive(Clone, Copy, Debug)]
pub struct TweenConfig {
    /// Value at progress zero.
    pub from: f64,
    /// Value at progress one.
    pub to: f64,
    /// Length of one iteration.
    pub duration_ms: f64,
    /// Time the value stays at `from` before the first iteration.
    pub delay_ms: f64,
    /// Curve applied to linear progress.
    pub easing: Easing,
    /// Restart after each iteration instead of finishing.
    pub looping: bool,
    /// When looping, run every other iteration backwards.
    pub yoyo: bool,
    /// Start playing as soon as the tween is started.
    pub autoplay: bool,
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self {
            from: 0.0,
            to: 1.0,
            duration_ms: 1000.0,
            delay_ms: 0.0,
            easing: Easing::Linear,
            looping: false,
            yoyo: false,
            autoplay: true,
        }
    }
}

impl TweenConfig {
    /// Sets the start and end values.
    #[must_use]
    pub fn with_range(mut self, from: f64, to: f64) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Sets the iteration length.
    #[must_use]
    pub fn with_duration(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Sets the initial delay.
    #[must_use]
    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Sets the easing curve.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Enables or disables looping.
    #[must_use]
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Enables or disables yoyo when looping.
    #[must_use]
    pub fn with_yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    /// Enables or disables autoplay.
    #[must_use]
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Idle,
    Playing,
    Paused { at: f64 },
    Finished,
}

type Observer = Rc<RefCell<dyn FnMut(f64)>>;

struct State {
    config: TweenConfig,
    phase: Phase,
    direction: f64,
    start: f64,
    linear: f64,
    value: f64,
    last_tick: Option<f64>,
    observer: Option<Observer>,
}

impl State {
    /// Recomputes progress from elapsed time. Returns `true` once a
    /// non‑looping tween has run its full duration.
    fn sample(&mut self, now: f64) -> bool {
        let cfg = self.config;
        let elapsed = now - self.start;
        let duration = cfg.duration_ms.max(MIN_DURATION_MS);
        let (raw, done) = if elapsed < cfg.delay_ms {
            (0.0, false)
        } else {
            let local = (elapsed - cfg.delay_ms) / duration;
            if cfg.looping {
                let iteration = libm::floor(local);
                let frac = local - iteration;
                if cfg.yoyo && iteration % 2.0 == 1.0 {
                    (1.0 - frac, false)
                } else {
                    (frac, false)
                }
            } else if local >= 1.0 {
                (1.0, true)
            } else {
                (local, false)
            }
        };
        self.linear = if self.direction < 0.0 { 1.0 - raw } else { raw };
        self.value = cfg.from + (cfg.to - cfg.from) * cfg.easing.ease(self.linear);
        done
    }
}

/// One scheduled tick. Holds only a weak reference, so a dropped tween
/// unregisters itself on its next tick.
fn tick(state: &Weak<RefCell<State>>, now: f64) -> TickControl {
    let Some(state) = state.upgrade() else {
        return TickControl::Stop;
    };
    let (control, value, observer) = {
        let mut s = state.borrow_mut();
        if s.phase != Phase::Playing {
            return TickControl::Stop;
        }
        if s.last_tick == Some(now) {
            return TickControl::Continue;
        }
        s.last_tick = Some(now);
        let control = if s.sample(now) {
            s.phase = Phase::Finished;
            TickControl::Stop
        } else {
            TickControl::Continue
        };
        (control, s.value, s.observer.clone())
    };
    if let Some(observer) = observer {
        (observer.borrow_mut())(value);
    }
    control
}

/// A time‑based scalar animation.
///
/// Progress is always recomputed from `now - start`, never accumulated, so
/// irregular tick spacing does not drift. While playing, the tween keeps two
/// callbacks registered on the [`Scheduler`]: one per frame and a
/// [`FALLBACK_POLL_MS`] interval. Both sample the same state, and a time
/// already sampled is skipped.
///
/// Control methods take the scheduler explicitly. Dropping a tween without
/// stopping it is fine: its callbacks unregister on their next run.
pub struct Tween {
    state: Rc<RefCell<State>>,
    frame: Option<CallbackId>,
    poll: Option<CallbackId>,
    replay_key: Option<u64>,
    last_reset: Option<f64>,
}

impl fmt::Debug for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.state.borrow();
        f.debug_struct("Tween")
            .field("config", &s.config)
            .field("phase", &s.phase)
            .field("direction", &s.direction)
            .field("value", &s.value)
            .field("frame", &self.frame)
            .field("poll", &self.poll)
            .field("replay_key", &self.replay_key)
            .field("last_reset", &self.last_reset)
            .finish_non_exhaustive()
    }
}

impl Tween {
    /// Creates an idle tween sitting at `config.from`.
    #[must_use]
    pub fn new(config: TweenConfig) -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                config,
                phase: Phase::Idle,
                direction: 1.0,
                start: 0.0,
                linear: 0.0,
                value: config.from + (config.to - config.from) * config.easing.ease(0.0),
                last_tick: None,
                observer: None,
            })),
            frame: None,
            poll: None,
            replay_key: None,
            last_reset: None,
        }
    }

    /// Creates a tween and, if `config.autoplay` is set, starts it at `now`.
    #[must_use]
    pub fn start(config: TweenConfig, scheduler: &mut Scheduler, now: f64) -> Self {
        let mut tween = Self::new(config);
        if config.autoplay {
            tween.play(scheduler, now);
        }
        tween
    }

    /// Current animated value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.state.borrow().value
    }

    /// Current linear progress in `[0, 1]`, after direction is applied.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.state.borrow().linear
    }

    /// Whether the tween is playing.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state.borrow().phase == Phase::Playing
    }

    /// Whether a non‑looping tween has completed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state.borrow().phase == Phase::Finished
    }

    /// The tween's configuration.
    #[must_use]
    pub fn config(&self) -> TweenConfig {
        self.state.borrow().config
    }

    /// Sets the observer called with the value after every tick.
    pub fn on_update(&mut self, observer: impl FnMut(f64) + 'static) {
        let observer: Observer = Rc::new(RefCell::new(observer));
        self.state.borrow_mut().observer = Some(observer);
    }

    /// Starts or resumes playback.
    ///
    /// From idle or finished this starts a new run at `now`; from paused it
    /// continues where it left off.
    pub fn play(&mut self, scheduler: &mut Scheduler, now: f64) {
        {
            let mut s = self.state.borrow_mut();
            match s.phase {
                Phase::Playing => return,
                Phase::Paused { at } => s.start += now - at,
                Phase::Idle | Phase::Finished => s.start = now,
            }
        }
        self.resume(scheduler, now);
    }

    /// Pauses playback, keeping the current value.
    pub fn pause(&mut self, scheduler: &mut Scheduler, now: f64) {
        {
            let mut s = self.state.borrow_mut();
            if s.phase != Phase::Playing {
                return;
            }
            s.sample(now);
            s.phase = Phase::Paused { at: now };
        }
        self.unschedule(scheduler);
    }

    /// Stops playback. The value stays where it is; the next
    /// [`play`](Self::play) starts over.
    pub fn stop(&mut self, scheduler: &mut Scheduler) {
        self.state.borrow_mut().phase = Phase::Idle;
        self.unschedule(scheduler);
    }

    /// Returns to the start, running forward. Keeps playing if it was.
    pub fn reset(&mut self, scheduler: &mut Scheduler, now: f64) {
        let playing = {
            let mut s = self.state.borrow_mut();
            s.direction = 1.0;
            s.start = now;
            s.last_tick = None;
            s.sample(now);
            if s.phase != Phase::Playing {
                s.phase = Phase::Idle;
            }
            s.phase == Phase::Playing
        };
        if !playing {
            self.unschedule(scheduler);
        }
    }

    /// Flips the direction of travel from the current position and plays.
    pub fn reverse(&mut self, scheduler: &mut Scheduler, now: f64) {
        {
            let mut s = self.state.borrow_mut();
            if s.phase == Phase::Playing {
                s.sample(now);
            }
            let cfg = s.config;
            s.direction = -s.direction;
            let raw = if s.direction < 0.0 { 1.0 - s.linear } else { s.linear };
            s.start = now - cfg.delay_ms - raw * cfg.duration_ms.max(MIN_DURATION_MS);
            s.last_tick = None;
        }
        self.resume(scheduler, now);
    }

    /// Sets the replay key. A key different from the current one resets and
    /// restarts the tween, unless the previous reset was less than
    /// [`REPLAY_DEBOUNCE_MS`] ago. The first key ever set is only recorded.
    ///
    /// Returns `true` if the tween restarted.
    pub fn set_replay_key(&mut self, key: u64, scheduler: &mut Scheduler, now: f64) -> bool {
        let previous = self.replay_key.replace(key);
        if previous.is_none() || previous == Some(key) {
            return false;
        }
        if self
            .last_reset
            .is_some_and(|at| now - at < REPLAY_DEBOUNCE_MS)
        {
            trace!(key, "replay reset debounced");
            return false;
        }
        self.last_reset = Some(now);
        self.stop(scheduler);
        self.reset(scheduler, now);
        self.play(scheduler, now);
        true
    }

    fn resume(&mut self, scheduler: &mut Scheduler, now: f64) {
        {
            let mut s = self.state.borrow_mut();
            s.phase = Phase::Playing;
            s.last_tick = None;
            if s.sample(now) {
                s.phase = Phase::Finished;
            }
        }
        self.unschedule(scheduler);
        if !self.is_playing() {
            return;
        }
        let frame = Rc::downgrade(&self.state);
        let poll = frame.clone();
        self.frame = Some(scheduler.register(Cadence::Frame, now, move |t| tick(&frame, t)));
        self.poll = Some(scheduler.register(
            Cadence::Interval(FALLBACK_POLL_MS),
            now,
            move |t| tick(&poll, t),
        ));
    }

    fn unschedule(&mut self, scheduler: &mut Scheduler) {
        if let Some(id) = self.frame.take() {
            scheduler.cancel(id);
        }
        if let Some(id) = self.poll.take() {
            scheduler.cancel(id);
        }
    }
}
