// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The retained‑mode scene port.

use core::fmt;

use peniko::Color;

use crate::element::{Light, Material, Transform3D};
use crate::geometry::MeshData;

/// Identifier for a geometry resource.
///
/// Stable until passed to [`SceneBackend::dispose_geometry`].
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GeometryId(pub u32);

/// Identifier for a material resource.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u32);

/// Identifier for a scene node.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle(pub u32);

/// Full state of a material as the backend sees it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialDesc {
    /// Base color.
    pub color: Color,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Render edges only.
    pub wireframe: bool,
    /// Blend with what is behind.
    pub transparent: bool,
    /// Write to the depth buffer.
    pub depth_write: bool,
}

impl From<&Material> for MaterialDesc {
    fn from(m: &Material) -> Self {
        Self {
            color: m.color,
            opacity: m.opacity,
            wireframe: m.wireframe,
            transparent: m.opacity < 1.0,
            depth_write: true,
        }
    }
}

/// What a new node is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeKind {
    /// A transform‑only container.
    Group,
    /// A drawable mesh.
    Mesh {
        /// Geometry to draw.
        geometry: GeometryId,
        /// Material to draw it with.
        material: MaterialId,
    },
    /// A light source.
    Light(Light),
}

/// A backend refused to release a resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisposeError {
    /// The geometry was already released or never existed.
    UnknownGeometry(GeometryId),
    /// The material was already released or never existed.
    UnknownMaterial(MaterialId),
}

impl fmt::Display for DisposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownGeometry(id) => write!(f, "geometry {} is not live", id.0),
            Self::UnknownMaterial(id) => write!(f, "material {} is not live", id.0),
        }
    }
}

impl core::error::Error for DisposeError {}

/// A retained‑mode 3D scene.
///
/// Implementations own the actual GPU or engine objects. The reconciler in
/// [`SceneAdapter`](crate::SceneAdapter) is the only caller and guarantees:
/// - every created geometry and material is disposed at most once,
/// - nodes are detached before they are destroyed,
/// - a geometry or material is never disposed while a node still uses it.
pub trait SceneBackend {
    /// Uploads mesh data.
    fn create_geometry(&mut self, mesh: &MeshData) -> GeometryId;
    /// Releases a geometry.
    fn dispose_geometry(&mut self, id: GeometryId) -> Result<(), DisposeError>;

    /// Creates a material.
    fn create_material(&mut self, desc: &MaterialDesc) -> MaterialId;
    /// Creates an independent copy of a material.
    fn clone_material(&mut self, id: MaterialId) -> MaterialId;
    /// Overwrites a material's state in place.
    fn update_material(&mut self, id: MaterialId, desc: &MaterialDesc);
    /// Reads a material's state.
    fn material(&self, id: MaterialId) -> Option<MaterialDesc>;
    /// Releases a material.
    fn dispose_material(&mut self, id: MaterialId) -> Result<(), DisposeError>;

    /// Creates a detached node.
    fn create_node(&mut self, kind: NodeKind) -> NodeHandle;
    /// Attaches `child` under `parent`, or under the scene root for `None`.
    fn attach(&mut self, parent: Option<NodeHandle>, child: NodeHandle);
    /// Detaches `node` from its parent.
    fn detach(&mut self, node: NodeHandle);
    /// Sets a node's local transform.
    fn set_transform(&mut self, node: NodeHandle, transform: &Transform3D);
    /// Swaps a mesh node's geometry.
    fn set_geometry(&mut self, node: NodeHandle, geometry: GeometryId);
    /// Swaps a mesh node's material.
    fn set_material(&mut self, node: NodeHandle, material: MaterialId);
    /// Updates a light node.
    fn set_light(&mut self, node: NodeHandle, light: &Light);
    /// Shows or hides a node and its subtree.
    fn set_visible(&mut self, node: NodeHandle, visible: bool);
    /// Destroys a detached node. Does not release its geometry or material.
    fn destroy_node(&mut self, node: NodeHandle);
}
