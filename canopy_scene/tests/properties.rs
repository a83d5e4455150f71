// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resource accounting over arbitrary render sequences.

use canopy_scene::{Material, RecordingBackend, SceneAdapter, SceneNode, Shape};
use peniko::Color;
use proptest::prelude::*;

/// One slot of a frame: absent, or a mesh with a shape and an opacity.
type Slot = Option<(bool, u32, u8)>;

fn frame(slots: &[Slot]) -> SceneNode {
    let mut root = SceneNode::group("root");
    for (i, slot) in slots.iter().enumerate() {
        let Some((boxed, segments, alpha)) = *slot else {
            continue;
        };
        let shape = if boxed {
            Shape::Box {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            }
        } else {
            Shape::Sphere {
                radius: 1.0,
                width_segments: segments,
                height_segments: 4,
            }
        };
        let material = Material::solid(Color::WHITE).with_opacity(f32::from(alpha) / 255.0);
        root = root.with_child(SceneNode::mesh(format!("m{i}").as_str(), shape, material));
    }
    root
}

fn slot() -> impl Strategy<Value = Slot> {
    proptest::option::of((any::<bool>(), 3_u32..6, any::<u8>()))
}

proptest! {
    #[test]
    fn live_resources_track_mounted_meshes(
        frames in proptest::collection::vec(proptest::collection::vec(slot(), 4), 1..12),
    ) {
        let mut adapter = SceneAdapter::new(RecordingBackend::new());
        for slots in &frames {
            adapter.reconcile(&[frame(slots)]).unwrap();
            let meshes = slots.iter().filter(|s| s.is_some()).count();
            let b = adapter.backend();
            prop_assert_eq!(b.live_geometries(), meshes);
            prop_assert_eq!(b.live_materials(), meshes);
            prop_assert_eq!(b.live_nodes(), meshes + 1);
            prop_assert_eq!(b.geometries_created() - b.geometries_disposed(), meshes);
            prop_assert_eq!(b.in_use_disposals(), 0);
        }
        adapter.reconcile(&[]).unwrap();
        let b = adapter.backend();
        prop_assert_eq!(b.live_geometries(), 0);
        prop_assert_eq!(b.live_materials(), 0);
        prop_assert_eq!(b.live_nodes(), 0);
        prop_assert_eq!(b.geometries_created(), b.geometries_disposed());
        prop_assert_eq!(b.materials_created(), b.materials_disposed());
    }
}
