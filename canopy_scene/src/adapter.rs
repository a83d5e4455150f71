// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reconciles declarative [`SceneNode`] trees onto a [`SceneBackend`].

use alloc::vec::Vec;
use core::fmt;

use hashbrown::{HashMap, HashSet};
use tracing::{debug, trace};

use crate::backend::{GeometryId, MaterialDesc, MaterialId, NodeHandle, NodeKind, SceneBackend};
use crate::element::{Element, Light, Material, NodeKey, SceneNode, Shape, Transform3D};
use crate::geometry::MeshData;

/// Misuse detected before a reconcile touches the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneError {
    /// The same key appears twice in one tree.
    DuplicateKey(NodeKey),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey(key) => write!(f, "scene key `{key}` appears more than once"),
        }
    }
}

impl core::error::Error for SceneError {}

/// What one [`SceneAdapter::reconcile`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Nodes mounted.
    pub created: usize,
    /// Nodes whose transform, material or light changed in place.
    pub updated: usize,
    /// Meshes whose geometry was rebuilt.
    pub replaced: usize,
    /// Nodes moved under a different parent.
    pub reparented: usize,
    /// Nodes unmounted.
    pub removed: usize,
}

/// A material swapped in for a fade.
#[derive(Clone, Copy, Debug)]
struct Fade {
    clone: MaterialId,
    base: MaterialDesc,
}

#[derive(Debug)]
struct LiveMesh {
    shape: Shape,
    props: Material,
    geometry: GeometryId,
    material: MaterialId,
    fade: Option<Fade>,
}

#[derive(Debug)]
enum LiveKind {
    Group,
    Mesh(LiveMesh),
    Light(Light),
}

#[derive(Debug)]
struct LiveNode {
    handle: NodeHandle,
    parent: Option<NodeHandle>,
    transform: Transform3D,
    kind: LiveKind,
    seen: u64,
}

/// Owns the backend objects mirroring the last rendered scene tree.
///
/// Nodes are matched across renders by [`NodeKey`]. Each geometry and
/// material the adapter creates is released exactly once: when it is
/// replaced, or when its node is unmounted.
#[derive(Debug)]
pub struct SceneAdapter<B> {
    backend: B,
    nodes: HashMap<NodeKey, LiveNode>,
    keys: HashMap<NodeHandle, NodeKey>,
    generation: u64,
}

impl<B: SceneBackend> SceneAdapter<B> {
    /// Wraps an empty backend scene.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            nodes: HashMap::new(),
            keys: HashMap::new(),
            generation: 0,
        }
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the backend, for work the adapter does not track.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Number of mounted nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing is mounted.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Backend node of a mounted key.
    pub fn handle(&self, key: &NodeKey) -> Option<NodeHandle> {
        self.nodes.get(key).map(|n| n.handle)
    }

    /// Makes the backend mirror `roots`.
    ///
    /// Returns [`SceneError::DuplicateKey`] without touching the backend if
    /// a key repeats anywhere in the tree.
    pub fn reconcile(&mut self, roots: &[SceneNode]) -> Result<ReconcileStats, SceneError> {
        check_keys(roots)?;
        self.generation += 1;
        let mut stats = ReconcileStats::default();
        let mut retired = Vec::new();
        for root in roots {
            self.visit(root, None, &mut stats, &mut retired);
        }
        let stale: Vec<NodeKey> = self
            .nodes
            .iter()
            .filter(|(_, n)| n.seen != self.generation)
            .map(|(k, _)| k.clone())
            .collect();
        for key in stale {
            if let Some(node) = self.nodes.remove(&key) {
                self.keys.remove(&node.handle);
                retired.push(node);
            }
        }
        stats.removed += retired.len();
        self.retire(retired);
        trace!(
            created = stats.created,
            updated = stats.updated,
            replaced = stats.replaced,
            reparented = stats.reparented,
            removed = stats.removed,
            "scene reconciled"
        );
        Ok(stats)
    }

    /// Unmounts everything.
    pub fn clear(&mut self) {
        let retired: Vec<LiveNode> = self.nodes.drain().map(|(_, n)| n).collect();
        self.keys.clear();
        self.retire(retired);
    }

    fn visit(
        &mut self,
        node: &SceneNode,
        parent: Option<NodeHandle>,
        stats: &mut ReconcileStats,
        retired: &mut Vec<LiveNode>,
    ) {
        let reused = match self.nodes.get_mut(&node.key) {
            Some(live) if live.kind.matches(&node.element) => {
                live.seen = self.generation;
                Some(update(&mut self.backend, live, node, parent, stats))
            }
            _ => None,
        };
        let handle = match reused {
            Some(handle) => handle,
            None => {
                if let Some(old) = self.nodes.remove(&node.key) {
                    self.keys.remove(&old.handle);
                    retired.push(old);
                }
                let live = self.mount(node, parent);
                stats.created += 1;
                let handle = live.handle;
                self.keys.insert(handle, node.key.clone());
                self.nodes.insert(node.key.clone(), live);
                handle
            }
        };
        // Only groups publish themselves as a parent.
        let child_parent = match node.element {
            Element::Group => Some(handle),
            _ => parent,
        };
        for child in &node.children {
            self.visit(child, child_parent, stats, retired);
        }
    }

    fn mount(&mut self, node: &SceneNode, parent: Option<NodeHandle>) -> LiveNode {
        let (kind, live) = match &node.element {
            Element::Group => (NodeKind::Group, LiveKind::Group),
            Element::Mesh { shape, material } => {
                let geometry = self.backend.create_geometry(&MeshData::from_shape(shape));
                let mat = self.backend.create_material(&MaterialDesc::from(material));
                (
                    NodeKind::Mesh {
                        geometry,
                        material: mat,
                    },
                    LiveKind::Mesh(LiveMesh {
                        shape: shape.clone(),
                        props: *material,
                        geometry,
                        material: mat,
                        fade: None,
                    }),
                )
            }
            Element::Light(light) => (NodeKind::Light(*light), LiveKind::Light(*light)),
        };
        let handle = self.backend.create_node(kind);
        self.backend.set_transform(handle, &node.transform);
        self.backend.attach(parent, handle);
        LiveNode {
            handle,
            parent,
            transform: node.transform,
            kind: live,
            seen: self.generation,
        }
    }

    /// Detaches every node first so no parent is destroyed while a child
    /// still hangs from it, then destroys them and releases their resources.
    fn retire(&mut self, nodes: Vec<LiveNode>) {
        for node in &nodes {
            self.backend.detach(node.handle);
        }
        for node in nodes {
            self.backend.destroy_node(node.handle);
            if let LiveKind::Mesh(mesh) = node.kind {
                dispose_geometry(&mut self.backend, mesh.geometry);
                dispose_material(&mut self.backend, mesh.material);
                if let Some(fade) = mesh.fade {
                    dispose_material(&mut self.backend, fade.clone);
                }
            }
        }
    }

    /// Keys of every mounted mesh below `group`, at any depth.
    pub fn mesh_keys_under(&self, group: &NodeKey) -> Vec<NodeKey> {
        let Some(root) = self.handle(group) else {
            return Vec::new();
        };
        let mut out: Vec<NodeKey> = self
            .nodes
            .iter()
            .filter(|(_, n)| matches!(n.kind, LiveKind::Mesh(_)))
            .filter(|(_, n)| self.descends_from(n, root))
            .map(|(k, _)| k.clone())
            .collect();
        out.sort();
        out
    }

    fn descends_from(&self, node: &LiveNode, ancestor: NodeHandle) -> bool {
        let mut parent = node.parent;
        while let Some(p) = parent {
            if p == ancestor {
                return true;
            }
            parent = self
                .keys
                .get(&p)
                .and_then(|k| self.nodes.get(k))
                .and_then(|n| n.parent);
        }
        false
    }

    /// Swaps a mesh onto a private copy of its material for fading.
    ///
    /// Returns `false` if `key` is not a mesh or is already prepared.
    pub fn prepare_fade(&mut self, key: &NodeKey) -> bool {
        let Some(live) = self.nodes.get_mut(key) else {
            return false;
        };
        let LiveKind::Mesh(mesh) = &mut live.kind else {
            return false;
        };
        if mesh.fade.is_some() {
            return false;
        }
        let base = self
            .backend
            .material(mesh.material)
            .unwrap_or_else(|| MaterialDesc::from(&mesh.props));
        let clone = self.backend.clone_material(mesh.material);
        self.backend.set_material(live.handle, clone);
        mesh.fade = Some(Fade { clone, base });
        true
    }

    /// Whether `key` is a mesh currently on a fade material.
    pub fn is_prepared(&self, key: &NodeKey) -> bool {
        self.nodes
            .get(key)
            .is_some_and(|n| matches!(&n.kind, LiveKind::Mesh(m) if m.fade.is_some()))
    }

    /// Scales a prepared mesh's opacity by `factor`.
    ///
    /// The fade material blends and stops writing depth while the fade runs.
    /// Returns `false` if `key` is not prepared.
    pub fn set_fade_opacity(&mut self, key: &NodeKey, factor: f32) -> bool {
        let Some(LiveNode {
            kind: LiveKind::Mesh(LiveMesh {
                fade: Some(fade), ..
            }),
            ..
        }) = self.nodes.get(key)
        else {
            return false;
        };
        let desc = MaterialDesc {
            opacity: fade.base.opacity * factor.clamp(0.0, 1.0),
            transparent: true,
            depth_write: false,
            ..fade.base
        };
        self.backend.update_material(fade.clone, &desc);
        true
    }

    /// Puts a prepared mesh back on its own material and releases the copy.
    pub fn restore_material(&mut self, key: &NodeKey) -> bool {
        let Some(live) = self.nodes.get_mut(key) else {
            return false;
        };
        let LiveKind::Mesh(mesh) = &mut live.kind else {
            return false;
        };
        let Some(fade) = mesh.fade.take() else {
            return false;
        };
        self.backend.set_material(live.handle, mesh.material);
        dispose_material(&mut self.backend, fade.clone);
        true
    }

    /// Shows or hides a mounted node.
    pub fn set_visible(&mut self, key: &NodeKey, visible: bool) -> bool {
        let Some(handle) = self.handle(key) else {
            return false;
        };
        self.backend.set_visible(handle, visible);
        true
    }

    /// Overrides a node's backend transform without changing its declared one.
    ///
    /// The next reconcile that declares a different transform wins.
    pub fn set_animated_transform(&mut self, key: &NodeKey, transform: &Transform3D) -> bool {
        let Some(handle) = self.handle(key) else {
            return false;
        };
        self.backend.set_transform(handle, transform);
        true
    }
}

impl LiveKind {
    fn matches(&self, element: &Element) -> bool {
        matches!(
            (self, element),
            (Self::Group, Element::Group)
                | (Self::Mesh(_), Element::Mesh { .. })
                | (Self::Light(_), Element::Light(_))
        )
    }
}

fn update<B: SceneBackend>(
    backend: &mut B,
    live: &mut LiveNode,
    node: &SceneNode,
    parent: Option<NodeHandle>,
    stats: &mut ReconcileStats,
) -> NodeHandle {
    let handle = live.handle;
    let mut changed = false;

    if live.parent != parent {
        backend.detach(handle);
        backend.attach(parent, handle);
        live.parent = parent;
        stats.reparented += 1;
    }
    if live.transform != node.transform {
        backend.set_transform(handle, &node.transform);
        live.transform = node.transform;
        changed = true;
    }
    match (&mut live.kind, &node.element) {
        (LiveKind::Mesh(mesh), Element::Mesh { shape, material }) => {
            if mesh.shape != *shape {
                let fresh = backend.create_geometry(&MeshData::from_shape(shape));
                backend.set_geometry(handle, fresh);
                let old = core::mem::replace(&mut mesh.geometry, fresh);
                dispose_geometry(backend, old);
                mesh.shape = shape.clone();
                stats.replaced += 1;
            }
            if mesh.props != *material {
                let desc = MaterialDesc::from(material);
                backend.update_material(mesh.material, &desc);
                if let Some(fade) = &mut mesh.fade {
                    fade.base = desc;
                }
                mesh.props = *material;
                changed = true;
            }
        }
        (LiveKind::Light(current), Element::Light(light)) => {
            if current != light {
                backend.set_light(handle, light);
                *current = *light;
                changed = true;
            }
        }
        _ => {}
    }
    if changed {
        stats.updated += 1;
    }
    handle
}

fn check_keys(roots: &[SceneNode]) -> Result<(), SceneError> {
    let mut seen = HashSet::new();
    let mut stack: Vec<&SceneNode> = roots.iter().collect();
    while let Some(node) = stack.pop() {
        if !seen.insert(&node.key) {
            return Err(SceneError::DuplicateKey(node.key.clone()));
        }
        stack.extend(node.children.iter());
    }
    Ok(())
}

fn dispose_geometry<B: SceneBackend>(backend: &mut B, id: GeometryId) {
    if let Err(err) = backend.dispose_geometry(id) {
        debug!(%err, "ignoring geometry disposal failure");
    }
}

fn dispose_material<B: SceneBackend>(backend: &mut B, id: MaterialId) {
    if let Err(err) = backend.dispose_material(id) {
        debug!(%err, "ignoring material disposal failure");
    }
}
