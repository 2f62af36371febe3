//! Transactional tree view interface
//!
//! A view is one session's working copy of the shared content tree. Reads see
//! the session's base snapshot plus its own staged changes; nothing becomes
//! visible to other sessions until [`TreeView::commit`] succeeds. A commit
//! fails with [`CugError::Conflict`](cug_core::CugError::Conflict) instead of
//! overwriting a concurrent change.

use crate::PropertyValue;
use cug_core::{CugError, CugResult, NodePath};
use std::fmt;

/// Handle to a node that existed in the view when the handle was obtained
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    path: NodePath,
}

impl NodeHandle {
    /// Create a handle; intended for [`TreeView`] implementations
    pub fn new(path: NodePath) -> Self {
        Self { path }
    }

    /// Path of the node
    pub fn path(&self) -> &NodePath {
        &self.path
    }

    /// Name of the node
    pub fn name(&self) -> &str {
        self.path.name()
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.path.fmt(f)
    }
}

/// Transactional view over the content tree
pub trait TreeView {
    /// Whether a node exists at `path`
    fn exists(&self, path: &NodePath) -> bool;

    /// Resolve a path, failing with `PathNotFound`
    fn resolve(&self, path: &NodePath) -> CugResult<NodeHandle> {
        if self.exists(path) {
            Ok(NodeHandle::new(path.clone()))
        } else {
            Err(CugError::path_not_found(path))
        }
    }

    /// Named child of `node`
    fn child(&self, node: &NodeHandle, name: &str) -> Option<NodeHandle>;

    /// Children of `node` ordered by name
    fn children(&self, node: &NodeHandle) -> Vec<NodeHandle>;

    /// Primary type name of `node`
    fn primary_type(&self, node: &NodeHandle) -> Option<String>;

    /// Add a child node of the given primary type
    fn add_child(
        &mut self,
        node: &NodeHandle,
        name: &str,
        primary_type: &str,
    ) -> CugResult<NodeHandle>;

    /// Remove a child and its subtree; `false` if there was no such child
    fn remove_child(&mut self, node: &NodeHandle, name: &str) -> CugResult<bool>;

    /// Property value
    fn property(&self, node: &NodeHandle, name: &str) -> Option<PropertyValue>;

    /// Set or replace a property
    fn set_property(&mut self, node: &NodeHandle, name: &str, value: PropertyValue)
        -> CugResult<()>;

    /// Remove a property; `false` if it was not set
    fn remove_property(&mut self, node: &NodeHandle, name: &str) -> CugResult<bool>;

    /// Whether `node` carries the mixin trait
    fn has_trait(&self, node: &NodeHandle, trait_name: &str) -> bool;

    /// Add a mixin trait; `false` if already present
    fn add_trait(&mut self, node: &NodeHandle, trait_name: &str) -> CugResult<bool>;

    /// Remove a mixin trait; `false` if it was not present
    fn remove_trait(&mut self, node: &NodeHandle, trait_name: &str) -> CugResult<bool>;

    /// Persist staged changes, failing with `Conflict` on concurrent changes
    fn commit(&mut self) -> CugResult<()>;

    /// Discard staged changes and rebase onto the latest committed state
    fn refresh(&mut self);

    /// Whether there are staged, uncommitted changes
    fn has_pending_changes(&self) -> bool;
}
