// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Group fades and transform tweens on a virtual clock.

use std::cell::RefCell;
use std::rc::Rc;

use canopy_scene::{
    FadeDirection, GroupAnimation, GroupTween, Material, NodeKey, RecordingBackend, SceneAdapter,
    SceneNode, Shape, SharedAdapter, Transform3D,
};
use canopy_timing::{ManualClock, Scheduler, pump};
use canopy_tween::{Easing, TweenConfig};
use glam::Vec3;

fn ball(key: &str) -> SceneNode {
    SceneNode::mesh(
        key,
        Shape::Sphere {
            radius: 1.0,
            width_segments: 8,
            height_segments: 6,
        },
        Material::default(),
    )
}

fn shared() -> SharedAdapter<RecordingBackend> {
    Rc::new(RefCell::new(SceneAdapter::new(RecordingBackend::new())))
}

fn linear(ms: f64) -> TweenConfig {
    TweenConfig::default()
        .with_duration(ms)
        .with_easing(Easing::Linear)
}

fn opacity(adapter: &SharedAdapter<RecordingBackend>, key: &str) -> f32 {
    let a = adapter.borrow();
    let handle = a.handle(&NodeKey::from(key)).unwrap();
    a.backend().node_material(handle).unwrap().opacity
}

#[test]
fn appear_clones_fades_and_restores() {
    let adapter = shared();
    let clock = ManualClock::default();
    let mut s = Scheduler::new();
    let tree = SceneNode::group("g").with_child(ball("a")).with_child(ball("b"));
    adapter.borrow_mut().reconcile(&[tree.clone()]).unwrap();

    let anim = GroupAnimation::fade(
        &adapter,
        NodeKey::from("g"),
        FadeDirection::Appear,
        linear(1000.0),
        &mut s,
        0.0,
    );
    {
        let a = adapter.borrow();
        assert_eq!(a.backend().materials_created(), 4);
        let h = a.handle(&NodeKey::from("a")).unwrap();
        let fade = a.backend().node_material(h).unwrap();
        assert_eq!(fade.opacity, 0.0);
        assert!(fade.transparent);
        assert!(!fade.depth_write);
    }

    clock.set(500.0);
    pump(&mut s, &clock);
    assert!((opacity(&adapter, "a") - 0.5).abs() < 1e-6);

    // A mesh mounted mid-fade is picked up by the poller.
    let late = tree.clone().with_child(ball("c"));
    adapter.borrow_mut().reconcile(&[late.clone()]).unwrap();
    assert!(!adapter.borrow().is_prepared(&NodeKey::from("c")));
    clock.set(550.0);
    pump(&mut s, &clock);
    assert!(adapter.borrow().is_prepared(&NodeKey::from("c")));
    assert!((opacity(&adapter, "c") - 0.55).abs() < 1e-6);
    let created = adapter.borrow().backend().materials_created();
    clock.set(600.0);
    pump(&mut s, &clock);
    assert_eq!(
        adapter.borrow().backend().materials_created(),
        created,
        "prepared meshes are not cloned twice"
    );

    clock.set(1000.0);
    pump(&mut s, &clock);
    assert!(anim.is_done());
    let a = adapter.borrow();
    let b = a.backend();
    assert_eq!(b.live_materials(), 3);
    assert_eq!(b.in_use_disposals(), 0);
    for key in ["a", "b", "c"] {
        let desc = b.node_material(a.handle(&NodeKey::from(key)).unwrap()).unwrap();
        assert_eq!(desc.opacity, 1.0);
        assert!(!desc.transparent);
        assert!(desc.depth_write);
    }
    drop(a);
    pump(&mut s, &clock);
    assert!(s.is_empty());
}

#[test]
fn disappear_hides_the_group_when_done() {
    let adapter = shared();
    let clock = ManualClock::default();
    let mut s = Scheduler::new();
    adapter
        .borrow_mut()
        .reconcile(&[SceneNode::group("g").with_child(ball("a"))])
        .unwrap();
    let anim = GroupAnimation::fade(
        &adapter,
        NodeKey::from("g"),
        FadeDirection::Disappear,
        linear(200.0),
        &mut s,
        0.0,
    );
    clock.set(100.0);
    pump(&mut s, &clock);
    assert!((opacity(&adapter, "a") - 0.5).abs() < 1e-6);
    clock.set(200.0);
    pump(&mut s, &clock);
    assert!(anim.is_done());
    let a = adapter.borrow();
    let g = a.handle(&NodeKey::from("g")).unwrap();
    assert!(!a.backend().node(g).unwrap().visible);
    assert_eq!(opacity(&adapter, "a"), 1.0);
}

#[test]
fn unmount_during_fade_releases_the_copy() {
    let adapter = shared();
    let clock = ManualClock::default();
    let mut s = Scheduler::new();
    adapter
        .borrow_mut()
        .reconcile(&[SceneNode::group("g").with_child(ball("a")).with_child(ball("b"))])
        .unwrap();
    let mut anim = GroupAnimation::fade(
        &adapter,
        NodeKey::from("g"),
        FadeDirection::Appear,
        linear(1000.0),
        &mut s,
        0.0,
    );
    adapter
        .borrow_mut()
        .reconcile(&[SceneNode::group("g").with_child(ball("a"))])
        .unwrap();
    clock.set(300.0);
    pump(&mut s, &clock);
    anim.cancel(&adapter, &mut s);
    let a = adapter.borrow();
    assert_eq!(a.backend().live_materials(), 1);
    assert_eq!(a.backend().in_use_disposals(), 0);
    assert!(!a.is_prepared(&NodeKey::from("a")));
}

#[test]
fn group_tween_flips_y_rotation() {
    let adapter = shared();
    let clock = ManualClock::default();
    let mut s = Scheduler::new();
    adapter
        .borrow_mut()
        .reconcile(&[SceneNode::group("g")])
        .unwrap();
    let to = Transform3D::from_position(Vec3::new(2.0, 0.0, 0.0))
        .with_rotation(Vec3::new(0.0, 1.0, 0.5));
    let _tween = GroupTween::start(
        &adapter,
        NodeKey::from("g"),
        Transform3D::IDENTITY,
        to,
        linear(100.0),
        &mut s,
        0.0,
    );
    clock.set(50.0);
    pump(&mut s, &clock);
    let a = adapter.borrow();
    let g = a.handle(&NodeKey::from("g")).unwrap();
    let t = a.backend().node(g).unwrap().transform;
    assert!((t.position - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
    assert!((t.rotation - Vec3::new(0.0, -0.5, 0.25)).length() < 1e-6);
}
