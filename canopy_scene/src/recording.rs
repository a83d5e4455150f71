// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in‑memory [`SceneBackend`] that records what it is asked to do.

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::backend::{
    DisposeError, GeometryId, MaterialDesc, MaterialId, NodeHandle, NodeKind, SceneBackend,
};
use crate::element::{Light, Material, Transform3D};
use crate::geometry::MeshData;

/// One call made on a [`RecordingBackend`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneEvent {
    /// `create_geometry`.
    CreateGeometry(GeometryId),
    /// `dispose_geometry` of a live geometry.
    DisposeGeometry(GeometryId),
    /// `create_material`.
    CreateMaterial(MaterialId),
    /// `clone_material`.
    CloneMaterial {
        /// Copied material.
        source: MaterialId,
        /// The copy.
        clone: MaterialId,
    },
    /// `update_material`.
    UpdateMaterial(MaterialId),
    /// `dispose_material` of a live material.
    DisposeMaterial(MaterialId),
    /// `create_node`.
    CreateNode(NodeHandle),
    /// `attach`.
    Attach {
        /// New parent, `None` for the scene root.
        parent: Option<NodeHandle>,
        /// Attached node.
        child: NodeHandle,
    },
    /// `detach`.
    Detach(NodeHandle),
    /// `set_transform`.
    SetTransform(NodeHandle),
    /// `set_geometry`.
    SetGeometry(NodeHandle, GeometryId),
    /// `set_material`.
    SetMaterial(NodeHandle, MaterialId),
    /// `set_light`.
    SetLight(NodeHandle),
    /// `set_visible`.
    SetVisible(NodeHandle, bool),
    /// `destroy_node`.
    DestroyNode(NodeHandle),
}

/// State of a node in a [`RecordingBackend`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecordedNode {
    /// What the node currently is.
    pub kind: NodeKind,
    /// `Some(parent)` while attached; the inner `None` is the scene root.
    pub parent: Option<Option<NodeHandle>>,
    /// Local transform.
    pub transform: Transform3D,
    /// Visibility flag.
    pub visible: bool,
}

/// Keeps every resource in hash maps and logs each call.
///
/// Disposing a resource that is not live returns a [`DisposeError`].
/// Disposing one that a live node still references is counted in
/// [`in_use_disposals`](Self::in_use_disposals).
#[derive(Debug, Default)]
pub struct RecordingBackend {
    next_id: u32,
    geometries: HashMap<GeometryId, MeshData>,
    materials: HashMap<MaterialId, MaterialDesc>,
    nodes: HashMap<NodeHandle, RecordedNode>,
    events: Vec<SceneEvent>,
    geometries_created: usize,
    geometries_disposed: usize,
    materials_created: usize,
    materials_disposed: usize,
    in_use_disposals: usize,
}

impl RecordingBackend {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    /// Every call so far, in order.
    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    /// Forgets recorded events; counters are kept.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Geometries created so far.
    pub fn geometries_created(&self) -> usize {
        self.geometries_created
    }

    /// Live geometries successfully disposed so far.
    pub fn geometries_disposed(&self) -> usize {
        self.geometries_disposed
    }

    /// Materials created or cloned so far.
    pub fn materials_created(&self) -> usize {
        self.materials_created
    }

    /// Live materials successfully disposed so far.
    pub fn materials_disposed(&self) -> usize {
        self.materials_disposed
    }

    /// Disposals of a resource a live node still referenced.
    pub fn in_use_disposals(&self) -> usize {
        self.in_use_disposals
    }

    /// Number of live geometries.
    pub fn live_geometries(&self) -> usize {
        self.geometries.len()
    }

    /// Number of live materials.
    pub fn live_materials(&self) -> usize {
        self.materials.len()
    }

    /// Number of live nodes.
    pub fn live_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// A live geometry's mesh.
    pub fn geometry(&self, id: GeometryId) -> Option<&MeshData> {
        self.geometries.get(&id)
    }

    /// A live node.
    pub fn node(&self, handle: NodeHandle) -> Option<&RecordedNode> {
        self.nodes.get(&handle)
    }

    /// Nodes attached directly under `parent` (`None` for the root), sorted.
    pub fn children(&self, parent: Option<NodeHandle>) -> Vec<NodeHandle> {
        let mut out: Vec<NodeHandle> = self
            .nodes
            .iter()
            .filter(|(_, n)| n.parent == Some(parent))
            .map(|(h, _)| *h)
            .collect();
        out.sort_by_key(|h| h.0);
        out
    }

    /// The material a mesh node currently draws with.
    pub fn node_material(&self, handle: NodeHandle) -> Option<MaterialDesc> {
        match self.nodes.get(&handle)?.kind {
            NodeKind::Mesh { material, .. } => self.materials.get(&material).copied(),
            _ => None,
        }
    }

    fn uses_geometry(&self, id: GeometryId) -> bool {
        self.nodes
            .values()
            .any(|n| matches!(n.kind, NodeKind::Mesh { geometry, .. } if geometry == id))
    }

    fn uses_material(&self, id: MaterialId) -> bool {
        self.nodes
            .values()
            .any(|n| matches!(n.kind, NodeKind::Mesh { material, .. } if material == id))
    }

    fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut RecordedNode> {
        self.nodes.get_mut(&handle)
    }
}

impl SceneBackend for RecordingBackend {
    fn create_geometry(&mut self, mesh: &MeshData) -> GeometryId {
        let id = GeometryId(self.next());
        self.geometries.insert(id, mesh.clone());
        self.geometries_created += 1;
        self.events.push(SceneEvent::CreateGeometry(id));
        id
    }

    fn dispose_geometry(&mut self, id: GeometryId) -> Result<(), DisposeError> {
        if self.geometries.remove(&id).is_none() {
            return Err(DisposeError::UnknownGeometry(id));
        }
        if self.uses_geometry(id) {
            self.in_use_disposals += 1;
        }
        self.geometries_disposed += 1;
        self.events.push(SceneEvent::DisposeGeometry(id));
        Ok(())
    }

    fn create_material(&mut self, desc: &MaterialDesc) -> MaterialId {
        let id = MaterialId(self.next());
        self.materials.insert(id, *desc);
        self.materials_created += 1;
        self.events.push(SceneEvent::CreateMaterial(id));
        id
    }

    fn clone_material(&mut self, source: MaterialId) -> MaterialId {
        let desc = self
            .materials
            .get(&source)
            .copied()
            .unwrap_or_else(|| MaterialDesc::from(&Material::default()));
        let clone = MaterialId(self.next());
        self.materials.insert(clone, desc);
        self.materials_created += 1;
        self.events.push(SceneEvent::CloneMaterial { source, clone });
        clone
    }

    fn update_material(&mut self, id: MaterialId, desc: &MaterialDesc) {
        if let Some(m) = self.materials.get_mut(&id) {
            *m = *desc;
        }
        self.events.push(SceneEvent::UpdateMaterial(id));
    }

    fn material(&self, id: MaterialId) -> Option<MaterialDesc> {
        self.materials.get(&id).copied()
    }

    fn dispose_material(&mut self, id: MaterialId) -> Result<(), DisposeError> {
        if self.materials.remove(&id).is_none() {
            return Err(DisposeError::UnknownMaterial(id));
        }
        if self.uses_material(id) {
            self.in_use_disposals += 1;
        }
        self.materials_disposed += 1;
        self.events.push(SceneEvent::DisposeMaterial(id));
        Ok(())
    }

    fn create_node(&mut self, kind: NodeKind) -> NodeHandle {
        let handle = NodeHandle(self.next());
        self.nodes.insert(
            handle,
            RecordedNode {
                kind,
                parent: None,
                transform: Transform3D::IDENTITY,
                visible: true,
            },
        );
        self.events.push(SceneEvent::CreateNode(handle));
        handle
    }

    fn attach(&mut self, parent: Option<NodeHandle>, child: NodeHandle) {
        if let Some(n) = self.node_mut(child) {
            n.parent = Some(parent);
        }
        self.events.push(SceneEvent::Attach { parent, child });
    }

    fn detach(&mut self, node: NodeHandle) {
        if let Some(n) = self.node_mut(node) {
            n.parent = None;
        }
        self.events.push(SceneEvent::Detach(node));
    }

    fn set_transform(&mut self, node: NodeHandle, transform: &Transform3D) {
        if let Some(n) = self.node_mut(node) {
            n.transform = *transform;
        }
        self.events.push(SceneEvent::SetTransform(node));
    }

    fn set_geometry(&mut self, node: NodeHandle, geometry: GeometryId) {
        if let Some(RecordedNode {
            kind: NodeKind::Mesh { geometry: g, .. },
            ..
        }) = self.node_mut(node)
        {
            *g = geometry;
        }
        self.events.push(SceneEvent::SetGeometry(node, geometry));
    }

    fn set_material(&mut self, node: NodeHandle, material: MaterialId) {
        if let Some(RecordedNode {
            kind: NodeKind::Mesh { material: m, .. },
            ..
        }) = self.node_mut(node)
        {
            *m = material;
        }
        self.events.push(SceneEvent::SetMaterial(node, material));
    }

    fn set_light(&mut self, node: NodeHandle, light: &Light) {
        if let Some(n) = self.node_mut(node) {
            n.kind = NodeKind::Light(*light);
        }
        self.events.push(SceneEvent::SetLight(node));
    }

    fn set_visible(&mut self, node: NodeHandle, visible: bool) {
        if let Some(n) = self.node_mut(node) {
            n.visible = visible;
        }
        self.events.push(SceneEvent::SetVisible(node, visible));
    }

    fn destroy_node(&mut self, node: NodeHandle) {
        self.nodes.remove(&node);
        self.events.push(SceneEvent::DestroyNode(node));
    }
}
