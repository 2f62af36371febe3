//! In-memory content tree with snapshot sessions
//!
//! [`MemoryTreeStore`] holds the committed tree behind an `Arc<RwLock<>>` so any
//! number of [`MemorySession`]s can share it. Each session works on a private
//! copy taken at login (or at its last commit/refresh) and only takes the write
//! lock while committing.
//!
//! Conflict detection is per node: every committed node records the store
//! revision that last wrote it. A commit is rejected if any node it touches has
//! a different revision (or presence) in the store than in the session's base
//! snapshot, if it adds a node below a concurrently removed parent, or if it
//! removes a subtree another session has since added nodes to.

use crate::{NodeHandle, PropertyValue, TreeView};
use cug_core::path::validate_name;
use cug_core::{constants, CugError, CugResult, NodePath};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

const NT_REP_SYSTEM: &str = "rep:system";
const NT_REP_NODE_TYPES: &str = "rep:nodeTypes";

/// Committed or staged state of a single node
#[derive(Debug, Clone, PartialEq, Eq)]
struct NodeRecord {
    primary_type: String,
    mixins: BTreeSet<String>,
    properties: BTreeMap<String, PropertyValue>,
    /// Store revision that last committed this node
    revision: u64,
}

impl NodeRecord {
    fn new(primary_type: &str) -> Self {
        Self {
            primary_type: primary_type.to_string(),
            mixins: BTreeSet::new(),
            properties: BTreeMap::new(),
            revision: 0,
        }
    }

    fn same_content(&self, other: &NodeRecord) -> bool {
        self.primary_type == other.primary_type
            && self.mixins == other.mixins
            && self.properties == other.properties
    }
}

type NodeMap = BTreeMap<NodePath, NodeRecord>;

#[derive(Debug)]
struct StoreState {
    nodes: NodeMap,
    revision: u64,
}

/// Shared, committed content tree
#[derive(Debug, Clone)]
pub struct MemoryTreeStore {
    state: Arc<RwLock<StoreState>>,
}

impl Default for MemoryTreeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTreeStore {
    /// Create a store containing the root node and the system subtree
    pub fn new() -> Self {
        let mut nodes = NodeMap::new();
        nodes.insert(NodePath::root(), NodeRecord::new(constants::NT_REP_ROOT));
        if let (Ok(system), Ok(node_types)) = (
            NodePath::parse(constants::JCR_SYSTEM_PATH),
            NodePath::parse(constants::NODE_TYPES_PATH),
        ) {
            nodes.insert(system, NodeRecord::new(NT_REP_SYSTEM));
            nodes.insert(node_types, NodeRecord::new(NT_REP_NODE_TYPES));
        }

        Self {
            state: Arc::new(RwLock::new(StoreState { nodes, revision: 0 })),
        }
    }

    /// Open a session on the latest committed state
    pub fn session(&self) -> MemorySession {
        let (base, revision) = {
            let state = self.state.read();
            (state.nodes.clone(), state.revision)
        };
        tracing::debug!(revision, "Opened tree session");

        MemorySession {
            store: Arc::clone(&self.state),
            working: base.clone(),
            base,
            base_revision: revision,
        }
    }

    /// Latest committed revision
    pub fn revision(&self) -> u64 {
        self.state.read().revision
    }

    /// Number of committed nodes
    pub fn node_count(&self) -> usize {
        self.state.read().nodes.len()
    }
}

/// One session's transactional view over a [`MemoryTreeStore`]
#[derive(Debug)]
pub struct MemorySession {
    store: Arc<RwLock<StoreState>>,
    base: NodeMap,
    working: NodeMap,
    base_revision: u64,
}

impl MemorySession {
    /// Store revision this session's base snapshot was taken at
    pub fn base_revision(&self) -> u64 {
        self.base_revision
    }

    fn record(&self, node: &NodeHandle) -> Option<&NodeRecord> {
        self.working.get(node.path())
    }

    fn record_mut(&mut self, node: &NodeHandle) -> CugResult<&mut NodeRecord> {
        self.working
            .get_mut(node.path())
            .ok_or_else(|| CugError::path_not_found(node.path()))
    }

    /// Paths whose presence or content differs between base and working copy
    fn changed_paths(&self) -> Vec<NodePath> {
        let mut changed: Vec<NodePath> = self
            .working
            .iter()
            .filter(|(path, record)| match self.base.get(*path) {
                Some(base) => !base.same_content(record),
                None => true,
            })
            .map(|(path, _)| path.clone())
            .collect();
        changed.extend(
            self.base
                .keys()
                .filter(|path| !self.working.contains_key(*path))
                .cloned(),
        );
        changed
    }

    fn rebase(&mut self, nodes: NodeMap, revision: u64) {
        self.working = nodes.clone();
        self.base = nodes;
        self.base_revision = revision;
    }
}

impl TreeView for MemorySession {
    fn exists(&self, path: &NodePath) -> bool {
        self.working.contains_key(path)
    }

    fn child(&self, node: &NodeHandle, name: &str) -> Option<NodeHandle> {
        let path = node.path().child(name).ok()?;
        self.working
            .contains_key(&path)
            .then(|| NodeHandle::new(path))
    }

    fn children(&self, node: &NodeHandle) -> Vec<NodeHandle> {
        self.working
            .keys()
            .filter(|path| path.parent().as_ref() == Some(node.path()))
            .cloned()
            .map(NodeHandle::new)
            .collect()
    }

    fn primary_type(&self, node: &NodeHandle) -> Option<String> {
        self.record(node).map(|r| r.primary_type.clone())
    }

    fn add_child(
        &mut self,
        node: &NodeHandle,
        name: &str,
        primary_type: &str,
    ) -> CugResult<NodeHandle> {
        validate_name(name)?;
        if !self.exists(node.path()) {
            return Err(CugError::path_not_found(node.path()));
        }
        let path = node.path().child(name)?;
        if self.working.contains_key(&path) {
            return Err(CugError::storage(format!("Node already exists: {path}")));
        }
        self.working.insert(path.clone(), NodeRecord::new(primary_type));
        Ok(NodeHandle::new(path))
    }

    fn remove_child(&mut self, node: &NodeHandle, name: &str) -> CugResult<bool> {
        if !self.exists(node.path()) {
            return Err(CugError::path_not_found(node.path()));
        }
        let path = node.path().child(name)?;
        if !self.working.contains_key(&path) {
            return Ok(false);
        }
        self.working
            .retain(|candidate, _| !candidate.is_same_or_descendant_of(&path));
        Ok(true)
    }

    fn property(&self, node: &NodeHandle, name: &str) -> Option<PropertyValue> {
        self.record(node)?.properties.get(name).cloned()
    }

    fn set_property(
        &mut self,
        node: &NodeHandle,
        name: &str,
        value: PropertyValue,
    ) -> CugResult<()> {
        validate_name(name)?;
        self.record_mut(node)?
            .properties
            .insert(name.to_string(), value);
        Ok(())
    }

    fn remove_property(&mut self, node: &NodeHandle, name: &str) -> CugResult<bool> {
        Ok(self.record_mut(node)?.properties.remove(name).is_some())
    }

    fn has_trait(&self, node: &NodeHandle, trait_name: &str) -> bool {
        self.record(node)
            .is_some_and(|r| r.mixins.contains(trait_name))
    }

    fn add_trait(&mut self, node: &NodeHandle, trait_name: &str) -> CugResult<bool> {
        Ok(self
            .record_mut(node)?
            .mixins
            .insert(trait_name.to_string()))
    }

    fn remove_trait(&mut self, node: &NodeHandle, trait_name: &str) -> CugResult<bool> {
        Ok(self.record_mut(node)?.mixins.remove(trait_name))
    }

    fn commit(&mut self) -> CugResult<()> {
        let changed = self.changed_paths();
        if changed.is_empty() {
            return Ok(());
        }

        let mut state = self.store.write();

        for path in &changed {
            let committed = state.nodes.get(path).map(|r| r.revision);
            let seen = self.base.get(path).map(|r| r.revision);
            if committed != seen {
                tracing::warn!(
                    path = %path,
                    base_revision = self.base_revision,
                    store_revision = state.revision,
                    "Commit rejected: node changed by a concurrent session"
                );
                return Err(CugError::conflict(format!(
                    "{path} was modified concurrently"
                )));
            }
        }

        // An added node must not end up below a parent another session removed.
        for path in &changed {
            if !self.working.contains_key(path) {
                continue;
            }
            if let Some(parent) = path.parent() {
                let parent_survives = state.nodes.contains_key(&parent)
                    || (self.working.contains_key(&parent) && changed.contains(&parent));
                if !parent_survives {
                    return Err(CugError::conflict(format!(
                        "parent of {path} was removed concurrently"
                    )));
                }
            }
        }

        // A removed subtree must not drop nodes another session added below it.
        for path in changed.iter().filter(|p| !self.working.contains_key(*p)) {
            let added = state
                .nodes
                .keys()
                .find(|candidate| {
                    candidate.is_same_or_descendant_of(path) && !self.base.contains_key(*candidate)
                });
            if let Some(added) = added {
                tracing::warn!(
                    path = %path,
                    added = %added,
                    "Commit rejected: removed subtree gained a node concurrently"
                );
                return Err(CugError::conflict(format!(
                    "{added} was added below removed node {path} concurrently"
                )));
            }
        }

        state.revision += 1;
        let revision = state.revision;
        for path in &changed {
            match self.working.get(path) {
                Some(record) => {
                    let mut record = record.clone();
                    record.revision = revision;
                    state.nodes.insert(path.clone(), record);
                }
                None => {
                    state.nodes.remove(path);
                }
            }
        }

        let nodes = state.nodes.clone();
        drop(state);
        self.rebase(nodes, revision);

        tracing::info!(revision, changed = changed.len(), "Committed tree changes");
        Ok(())
    }

    fn refresh(&mut self) {
        let (nodes, revision) = {
            let state = self.store.read();
            (state.nodes.clone(), state.revision)
        };
        self.rebase(nodes, revision);
    }

    fn has_pending_changes(&self) -> bool {
        !self.changed_paths().is_empty()
    }
}
