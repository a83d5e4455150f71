// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Scene: declarative 3D scene trees on a retained‑mode backend.
//!
//! This crate keeps an imperative 3D scene in step with a declarative tree
//! of [`SceneNode`]s that is rebuilt on every render.
//!
//! - [`SceneBackend`] is the port to the engine: geometries, materials and
//!   nodes behind opaque handles. [`RecordingBackend`] implements it in
//!   memory for tests.
//! - [`SceneAdapter::reconcile`] diffs a new tree against what is mounted,
//!   keyed by [`NodeKey`]. Non‑shape changes (material, transform, light)
//!   are applied in place. A changed [`Shape`] builds new geometry, swaps it
//!   in and releases the old geometry exactly once. Unmounted nodes release
//!   everything they own.
//! - [`SceneHost`] waits for the engine to load, queueing renders, and
//!   records a load failure instead of panicking.
//! - [`GroupAnimation`] and [`GroupTween`] fade and move mounted groups on
//!   a [`canopy_timing::Scheduler`].
//!
//! ## Example
//!
//! ```rust
//! use canopy_scene::{Material, RecordingBackend, SceneAdapter, SceneNode, Shape};
//!
//! let mut adapter = SceneAdapter::new(RecordingBackend::new());
//! let sphere = |segments| {
//!     SceneNode::group("root").with_child(SceneNode::mesh(
//!         "ball",
//!         Shape::Sphere { radius: 1.0, width_segments: segments, height_segments: 8 },
//!         Material::default(),
//!     ))
//! };
//!
//! adapter.reconcile(&[sphere(8)]).unwrap();
//! let stats = adapter.reconcile(&[sphere(16)]).unwrap();
//! assert_eq!(stats.replaced, 1);
//! assert_eq!(adapter.backend().geometries_disposed(), 1);
//! ```

#![no_std]

extern crate alloc;

mod adapter;
mod animate;
mod backend;
mod element;
mod geometry;
mod host;
mod recording;

pub use adapter::{ReconcileStats, SceneAdapter, SceneError};
pub use animate::{APPEAR_POLL_MS, FadeDirection, GroupAnimation, GroupTween, group_transform_at};
pub use backend::{
    DisposeError, GeometryId, MaterialDesc, MaterialId, NodeHandle, NodeKind, SceneBackend,
};
pub use element::{
    Element, Light, LightKind, Material, NodeKey, SceneNode, Shape, SurfaceFn, Transform3D,
};
pub use geometry::{
    MeshData, Topology, axes, box_mesh, cylinder, grid, parametric, point_cloud, sphere, torus,
};
pub use host::{EngineLoadError, EngineState, SceneHost, SharedAdapter};
pub use recording::{RecordedNode, RecordingBackend, SceneEvent};
