// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_scene::{Material, RecordingBackend, SceneAdapter, SceneNode, Shape, Transform3D};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use glam::Vec3;
use peniko::Color;

/// A root group holding `n` spheres laid out on a line.
fn tree(n: usize, segments: u32, shift: f32) -> SceneNode {
    let mut root = SceneNode::group("root");
    for i in 0..n {
        let key = format!("ball-{i}");
        let ball = SceneNode::mesh(
            key.as_str(),
            Shape::Sphere {
                radius: 0.5,
                width_segments: segments,
                height_segments: 8,
            },
            Material::solid(Color::from_rgb8(0x58, 0xa6, 0xff)),
        )
        .with_transform(Transform3D::from_position(Vec3::new(i as f32 + shift, 0.0, 0.0)));
        root = root.with_child(ball);
    }
    root
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");

    group.bench_function("mount_256", |b| {
        let scene = [tree(256, 12, 0.0)];
        b.iter_batched(
            || SceneAdapter::new(RecordingBackend::new()),
            |mut adapter| adapter.reconcile(&scene).map(|s| s.created),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("noop_256", |b| {
        let scene = [tree(256, 12, 0.0)];
        let mut adapter = SceneAdapter::new(RecordingBackend::new());
        assert!(adapter.reconcile(&scene).is_ok(), "initial mount");
        b.iter(|| adapter.reconcile(&scene).map(|s| s.updated));
    });

    group.bench_function("move_256", |b| {
        let frames = [[tree(256, 12, 0.0)], [tree(256, 12, 1.0)]];
        let mut adapter = SceneAdapter::new(RecordingBackend::new());
        let mut i = 0;
        b.iter(|| {
            i ^= 1;
            adapter.reconcile(&frames[i]).map(|s| s.updated)
        });
    });

    group.bench_function("replace_shapes_64", |b| {
        let frames = [[tree(64, 12, 0.0)], [tree(64, 16, 0.0)]];
        let mut adapter = SceneAdapter::new(RecordingBackend::new());
        let mut i = 0;
        b.iter(|| {
            i ^= 1;
            adapter.reconcile(&frames[i]).map(|s| s.replaced)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_reconcile);
criterion_main!(benches);
