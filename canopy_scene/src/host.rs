// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine lifecycle around a [`SceneAdapter`].

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use tracing::{debug, error};

use crate::adapter::{ReconcileStats, SceneAdapter, SceneError};
use crate::backend::SceneBackend;
use crate::element::SceneNode;

/// A reconciler shared between its host and running animations.
pub type SharedAdapter<B> = Rc<RefCell<SceneAdapter<B>>>;

/// The 3D engine could not be loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineLoadError {
    message: String,
}

impl EngineLoadError {
    /// An error carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// What went wrong.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for EngineLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "3D engine failed to load: {}", self.message)
    }
}

impl core::error::Error for EngineLoadError {}

/// Where a [`SceneHost`] is in its lifecycle.
#[derive(Debug)]
pub enum EngineState<B> {
    /// Waiting for the engine; renders are queued.
    Loading,
    /// The engine is up.
    Ready(SharedAdapter<B>),
    /// The engine never came up; renders are dropped.
    Failed(EngineLoadError),
}

/// Mounts a scene once its engine arrives.
///
/// The host starts in [`EngineState::Loading`]. The latest tree rendered
/// while loading is kept and reconciled as soon as [`resolve`](Self::resolve)
/// supplies a backend.
#[derive(Debug)]
pub struct SceneHost<B> {
    state: EngineState<B>,
    pending: Option<Vec<SceneNode>>,
}

impl<B: SceneBackend> Default for SceneHost<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: SceneBackend> SceneHost<B> {
    /// A host waiting for its engine.
    pub fn new() -> Self {
        Self {
            state: EngineState::Loading,
            pending: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &EngineState<B> {
        &self.state
    }

    /// Whether the engine is still loading.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, EngineState::Loading)
    }

    /// Whether the engine is up.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, EngineState::Ready(_))
    }

    /// Why the engine failed, if it did.
    pub fn load_error(&self) -> Option<&EngineLoadError> {
        match &self.state {
            EngineState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// The reconciler, once ready.
    pub fn adapter(&self) -> Option<&SharedAdapter<B>> {
        match &self.state {
            EngineState::Ready(adapter) => Some(adapter),
            _ => None,
        }
    }

    /// Finishes loading.
    ///
    /// Only the first call has an effect. A failure is logged and kept
    /// for [`load_error`](Self::load_error); nothing is retried.
    pub fn resolve(
        &mut self,
        engine: Result<B, EngineLoadError>,
    ) -> Result<Option<ReconcileStats>, SceneError> {
        if !self.is_loading() {
            debug!("engine already resolved; ignoring");
            return Ok(None);
        }
        match engine {
            Ok(backend) => {
                let mut adapter = SceneAdapter::new(backend);
                let stats = match self.pending.take() {
                    Some(roots) => Some(adapter.reconcile(&roots)?),
                    None => None,
                };
                self.state = EngineState::Ready(Rc::new(RefCell::new(adapter)));
                Ok(stats)
            }
            Err(err) => {
                error!(error = %err, "3D engine failed to load");
                self.pending = None;
                self.state = EngineState::Failed(err);
                Ok(None)
            }
        }
    }

    /// Renders `roots`.
    ///
    /// While loading, the tree is queued and `Ok(None)` is returned. After a
    /// load failure nothing is rendered.
    pub fn render(&mut self, roots: &[SceneNode]) -> Result<Option<ReconcileStats>, SceneError> {
        match &self.state {
            EngineState::Loading => {
                self.pending = Some(roots.to_vec());
                Ok(None)
            }
            EngineState::Ready(adapter) => adapter.borrow_mut().reconcile(roots).map(Some),
            EngineState::Failed(_) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EngineLoadError, SceneHost};
    use crate::element::{Material, SceneNode, Shape};
    use crate::recording::RecordingBackend;

    fn tree() -> [SceneNode; 1] {
        [SceneNode::group("root").with_child(SceneNode::mesh(
            "box",
            Shape::Box {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
            Material::default(),
        ))]
    }

    #[test]
    fn queued_render_mounts_on_resolve() {
        let mut host = SceneHost::new();
        assert_eq!(host.render(&tree()), Ok(None));
        let stats = host.resolve(Ok(RecordingBackend::new())).unwrap().unwrap();
        assert_eq!(stats.created, 2);
        let adapter = host.adapter().unwrap().borrow();
        assert_eq!(adapter.backend().live_nodes(), 2);
    }

    #[test]
    fn failure_is_kept_and_renders_are_dropped() {
        let mut host = SceneHost::<RecordingBackend>::new();
        host.render(&tree()).unwrap();
        host.resolve(Err(EngineLoadError::new("no WebGL"))).unwrap();
        assert_eq!(host.load_error().unwrap().message(), "no WebGL");
        assert!(host.adapter().is_none());
        assert_eq!(host.render(&tree()), Ok(None));
        // A late success does not revive the host.
        assert_eq!(host.resolve(Ok(RecordingBackend::new())), Ok(None));
        assert!(!host.is_ready());
    }
}
