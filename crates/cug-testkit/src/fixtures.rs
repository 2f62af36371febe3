//! Content tree and manager fixtures

use cug_authorization::{CugAccessControlManager, ImportBehavior, StaticPrincipalResolver};
use cug_core::constants::NT_OAK_UNSTRUCTURED;
use cug_core::{CugConfig, NodePath};
use cug_tree::{MemorySession, MemoryTreeStore, TreeView};
use std::sync::Arc;

/// Configured CUG prefix
pub const SUPPORTED_PATH: &str = "/content";
/// Descendant of the supported prefix
pub const SUPPORTED_SUBTREE_PATH: &str = "/content/subtree";
/// Existing node outside every supported prefix
pub const UNSUPPORTED_PATH: &str = "/testNode";
/// Path that does not resolve
pub const INVALID_PATH: &str = "/path/to/non/existing/tree";

/// Users known to [`test_resolver`]
pub const TEST_USERS: &[&str] = &["alice", "bob"];
/// Groups known to [`test_resolver`]
pub const TEST_GROUPS: &[&str] = &["editors"];

/// Parse a path literal
pub fn path(raw: &str) -> NodePath {
    NodePath::parse(raw).unwrap()
}

/// Store with `/content`, `/content/subtree` and `/testNode` committed
pub fn content_store() -> MemoryTreeStore {
    let store = MemoryTreeStore::new();
    let mut session = store.session();
    let root = session.resolve(&NodePath::root()).unwrap();
    let content = session
        .add_child(&root, "content", NT_OAK_UNSTRUCTURED)
        .unwrap();
    session
        .add_child(&content, "subtree", NT_OAK_UNSTRUCTURED)
        .unwrap();
    session
        .add_child(&root, "testNode", NT_OAK_UNSTRUCTURED)
        .unwrap();
    session.commit().unwrap();
    store
}

/// Enabled configuration supporting [`SUPPORTED_PATH`]
pub fn cug_config() -> CugConfig {
    CugConfig::with_supported_paths([SUPPORTED_PATH]).unwrap()
}

/// Principal directory with [`TEST_USERS`] and [`TEST_GROUPS`]
pub fn test_resolver() -> Arc<StaticPrincipalResolver> {
    let mut resolver = StaticPrincipalResolver::new();
    for user in TEST_USERS {
        resolver = resolver.with_user(user).unwrap();
    }
    for group in TEST_GROUPS {
        resolver = resolver.with_group(group).unwrap();
    }
    Arc::new(resolver)
}

/// Shared store plus a manager over one session of it
pub struct CugFixture {
    /// Committed tree shared by all sessions
    pub store: MemoryTreeStore,
    /// Manager over the first session
    pub manager: CugAccessControlManager<MemorySession>,
    config: CugConfig,
}

impl Default for CugFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl CugFixture {
    /// Fixture with [`cug_config`]
    pub fn new() -> Self {
        Self::with_config(cug_config())
    }

    /// Fixture with [`cug_config`] and the given import behavior
    pub fn with_import_behavior(behavior: ImportBehavior) -> Self {
        Self::with_config(cug_config().with_import_behavior(behavior))
    }

    /// Fixture with an explicit configuration
    pub fn with_config(config: CugConfig) -> Self {
        crate::init_test_tracing();
        let store = content_store();
        let manager = CugAccessControlManager::new(store.session(), &config, test_resolver());
        Self {
            store,
            manager,
            config,
        }
    }

    /// Another manager over a fresh session of the same store
    pub fn new_manager(&self) -> CugAccessControlManager<MemorySession> {
        CugAccessControlManager::new(self.store.session(), &self.config, test_resolver())
    }

    /// Commit the fixture manager's session
    pub fn commit(&mut self) {
        self.manager.view_mut().commit().unwrap();
    }
}
