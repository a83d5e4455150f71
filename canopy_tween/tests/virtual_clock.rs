// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tween timing driven by a virtual clock.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use canopy_timing::{Clock, ManualClock, Scheduler, pump};
use canopy_tween::{
    AnimatedFrame, Easing, Pose2D, PropertyTween, REPLAY_DEBOUNCE_MS, Tween, TweenConfig,
};
use canopy_view::{Margins, PlotFrame, PlotSpace, Viewport};
use kurbo::{Point, Vec2};

fn counting(tween: &mut Tween) -> Rc<RefCell<Vec<f64>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    tween.on_update(move |v| log.borrow_mut().push(v));
    seen
}

#[test]
fn half_duration_gives_eased_half() {
    for easing in [Easing::QuadIn, Easing::CubicInOut, Easing::SineInOut, Easing::QuadOut] {
        let clock = ManualClock::default();
        let mut s = Scheduler::new();
        let t = Tween::start(
            TweenConfig::default().with_duration(800.0).with_easing(easing),
            &mut s,
            clock.now(),
        );
        clock.advance(400.0);
        pump(&mut s, &clock);
        assert!((t.value() - easing.ease(0.5)).abs() < 1e-12, "{easing:?}");
    }
}

#[test]
fn finished_tween_freezes_and_stops_calling_back() {
    let clock = ManualClock::default();
    let mut s = Scheduler::new();
    let mut t = Tween::start(
        TweenConfig::default()
            .with_duration(1000.0)
            .with_easing(Easing::CubicInOut)
            .with_range(10.0, 20.0),
        &mut s,
        clock.now(),
    );
    let seen = counting(&mut t);

    clock.advance(500.0);
    pump(&mut s, &clock);
    assert_eq!(seen.borrow().len(), 1, "frame and poll at one time notify once");

    clock.advance(700.0);
    pump(&mut s, &clock);
    assert_eq!(t.value(), 20.0);
    assert!(t.is_finished());
    assert!(s.is_empty());

    let calls = seen.borrow().len();
    for _ in 0..5 {
        clock.advance(100.0);
        pump(&mut s, &clock);
    }
    assert_eq!(seen.borrow().len(), calls);
    assert_eq!(t.value(), 20.0);
}

#[test]
fn fallback_poll_advances_without_frames() {
    let clock = ManualClock::default();
    let mut s = Scheduler::new();
    let t = Tween::start(TweenConfig::default().with_duration(1000.0), &mut s, 0.0);
    clock.set(250.0);
    s.run_due(clock.now());
    assert_eq!(t.value(), 0.25);
}

#[test]
fn delay_holds_the_start_value() {
    let clock = ManualClock::default();
    let mut s = Scheduler::new();
    let t = Tween::start(
        TweenConfig::default()
            .with_duration(100.0)
            .with_delay(200.0)
            .with_looping(true),
        &mut s,
        0.0,
    );
    clock.set(150.0);
    pump(&mut s, &clock);
    assert_eq!(t.value(), 0.0);
    clock.set(250.0);
    pump(&mut s, &clock);
    assert_eq!(t.value(), 0.5);
    // The delay applies only before the first iteration.
    clock.set(350.0);
    pump(&mut s, &clock);
    assert_eq!(t.value(), 0.5);
}

#[test]
fn looping_and_yoyo() {
    let clock = ManualClock::default();
    let mut s = Scheduler::new();
    let looping = Tween::start(
        TweenConfig::default().with_duration(100.0).with_looping(true),
        &mut s,
        0.0,
    );
    let yoyo = Tween::start(
        TweenConfig::default()
            .with_duration(100.0)
            .with_looping(true)
            .with_yoyo(true),
        &mut s,
        0.0,
    );
    clock.set(125.0);
    pump(&mut s, &clock);
    assert_eq!(looping.value(), 0.25);
    assert_eq!(yoyo.value(), 0.75);
    clock.set(225.0);
    pump(&mut s, &clock);
    assert_eq!(looping.value(), 0.25);
    assert_eq!(yoyo.value(), 0.25);
    assert!(looping.is_playing() && yoyo.is_playing());
}

#[test]
fn replay_key_resets_with_debounce() {
    let mut s = Scheduler::new();
    let mut t = Tween::start(TweenConfig::default().with_duration(1000.0), &mut s, 0.0);
    assert!(!t.set_replay_key(1, &mut s, 0.0), "first key is only recorded");
    s.run_frame(500.0);
    assert!(t.set_replay_key(2, &mut s, 500.0));
    assert_eq!(t.value(), 0.0);
    assert!(!t.set_replay_key(2, &mut s, 600.0), "same key");
    assert!(
        !t.set_replay_key(3, &mut s, 500.0 + REPLAY_DEBOUNCE_MS - 1.0),
        "within debounce window"
    );
    s.run_frame(900.0);
    assert!(t.set_replay_key(4, &mut s, 900.0));
    assert_eq!(t.value(), 0.0);
    assert!(t.is_playing());
}

#[test]
fn dropped_tween_unregisters_itself() {
    let mut s = Scheduler::new();
    let t = Tween::start(TweenConfig::default(), &mut s, 0.0);
    assert_eq!(s.len(), 2);
    drop(t);
    s.run_frame(10.0);
    s.run_due(200.0);
    assert!(s.is_empty());
}

#[test]
fn property_tween_tracks_the_current_space() {
    let clock = ManualClock::default();
    let mut s = Scheduler::new();
    let frame = PlotFrame::new(400.0, 300.0, Margins::ZERO);
    let space = Rc::new(Cell::new(PlotSpace::new(
        Viewport::new(-10.0..10.0, -5.0..5.0),
        frame,
    )));
    let to = Pose2D {
        position: Vec2::new(2.0, 0.0),
        opacity: 0.0,
        ..Pose2D::default()
    };
    let mut tween = PropertyTween::start(
        Pose2D::default(),
        to,
        Point::ORIGIN,
        TweenConfig::default().with_duration(1000.0),
        &mut s,
        clock.now(),
    );
    let last = Rc::new(Cell::new(AnimatedFrame::default()));
    let sink = last.clone();
    tween.on_frame(space.clone(), move |f| sink.set(f));

    clock.set(500.0);
    pump(&mut s, &clock);
    // One world unit at 20 px per unit.
    assert!((last.get().transform.translation() - Vec2::new(20.0, 0.0)).hypot() < 1e-9);
    assert_eq!(last.get().opacity, 0.5);

    // Zoom in 2x mid-animation: the same world offset is now twice as many pixels.
    space.set(PlotSpace::new(Viewport::new(-5.0..5.0, -2.5..2.5), frame));
    clock.set(1000.0);
    pump(&mut s, &clock);
    assert!((last.get().transform.translation() - Vec2::new(80.0, 0.0)).hypot() < 1e-9);
    assert_eq!(tween.pose().position, Vec2::new(2.0, 0.0));
}
