// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// Handle to a registered callback.
///
/// A slot index plus a generation counter: cancelling frees the slot, and a
/// later registration reusing it bumps the generation, so a stale handle
/// never cancels someone else's callback.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct CallbackId(u32, u32);

impl CallbackId {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// When a callback runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cadence {
    /// Once per [`Scheduler::run_frame`].
    Frame,
    /// From [`Scheduler::run_due`], at most once per call, whenever at least
    /// this many milliseconds have passed since it was last due.
    Interval(f64),
}

/// Returned by a callback to keep or drop its registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickControl {
    /// Keep the callback registered.
    Continue,
    /// Unregister the callback.
    Stop,
}

/// A repeating callback, receiving the current time in milliseconds.
pub type Callback = Box<dyn FnMut(f64) -> TickControl>;

struct Entry {
    cadence: Cadence,
    next_due: f64,
    callback: Callback,
}

struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

/// Registry of repeating callbacks driven by an external clock.
///
/// The scheduler never reads time itself; hosts call
/// [`run_frame`](Self::run_frame) from their frame loop and
/// [`run_due`](Self::run_due) from a coarse timer, passing the current time.
/// Tests drive it from a [`ManualClock`](crate::ManualClock).
#[derive(Default)]
pub struct Scheduler {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("slots", &self.slots.len())
            .field("free", &self.free.len())
            .field("live", &self.live)
            .finish()
    }
}

impl Scheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a repeating callback at `now`.
    ///
    /// Interval callbacks first become due one interval after `now`.
    pub fn register(
        &mut self,
        cadence: Cadence,
        now: f64,
        callback: impl FnMut(f64) -> TickControl + 'static,
    ) -> CallbackId {
        let next_due = match cadence {
            Cadence::Frame => now,
            Cadence::Interval(ms) => now + ms.max(0.0),
        };
        let entry = Entry {
            cadence,
            next_due,
            callback: Box::new(callback),
        };
        self.live += 1;
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.entry = Some(entry);
            CallbackId(idx, slot.generation)
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "more than u32::MAX live callbacks is not supported"
            )]
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 1,
                entry: Some(entry),
            });
            CallbackId(idx, 1)
        }
    }

    /// Cancels a callback. Returns `false` if `id` was already gone.
    pub fn cancel(&mut self, id: CallbackId) -> bool {
        if !self.is_registered(id) {
            return false;
        }
        self.vacate(id.idx());
        true
    }

    /// Whether `id` still refers to a registered callback.
    #[must_use]
    pub fn is_registered(&self, id: CallbackId) -> bool {
        self.slots
            .get(id.idx())
            .is_some_and(|slot| slot.generation == id.1 && slot.entry.is_some())
    }

    /// Number of registered callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether no callbacks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Runs every frame callback once. Returns how many ran.
    pub fn run_frame(&mut self, now: f64) -> usize {
        self.run(now, |entry, _| matches!(entry.cadence, Cadence::Frame))
    }

    /// Runs every interval callback that is due at `now`. Returns how many ran.
    ///
    /// A callback that missed several intervals runs once and is rescheduled
    /// past `now`.
    pub fn run_due(&mut self, now: f64) -> usize {
        self.run(now, |entry, now| match entry.cadence {
            Cadence::Frame => false,
            Cadence::Interval(_) => entry.next_due <= now,
        })
    }

    fn run(&mut self, now: f64, select: impl Fn(&Entry, f64) -> bool) -> usize {
        let mut ran = 0;
        for idx in 0..self.slots.len() {
            let Some(entry) = self.slots[idx].entry.as_mut() else {
                continue;
            };
            if !select(entry, now) {
                continue;
            }
            if let Cadence::Interval(ms) = entry.cadence {
                entry.next_due = reschedule(entry.next_due, ms, now);
            }
            ran += 1;
            if (entry.callback)(now) == TickControl::Stop {
                self.vacate(idx);
            }
        }
        ran
    }

    fn vacate(&mut self, idx: usize) {
        if self.slots[idx].entry.take().is_some() {
            self.live -= 1;
            #[expect(
                clippy::cast_possible_truncation,
                reason = "slot indices are created from u32"
            )]
            let idx = idx as u32;
            self.free.push(idx);
        }
    }
}

fn reschedule(due: f64, interval: f64, now: f64) -> f64 {
    if interval <= 0.0 {
        return now;
    }
    let mut next = due + interval;
    if next <= now {
        let behind = libm::floor((now - next) / interval) + 1.0;
        next += behind * interval;
    }
    next
}
