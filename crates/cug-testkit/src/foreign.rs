//! Policies the engine must reject

use cug_authorization::{AccessControlPolicy, AccessPolicy};
use cug_core::{NodePath, PrincipalName};

/// Policy with no properties at all
#[derive(Debug, Default)]
pub struct GenericPolicy;

impl AccessControlPolicy for GenericPolicy {}

/// Policy that only carries a name
#[derive(Debug)]
pub struct NamedPolicy {
    name: String,
}

impl NamedPolicy {
    /// Named policy
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl AccessControlPolicy for NamedPolicy {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

/// Independent implementation with the same shape as a CUG policy
#[derive(Debug)]
pub struct LookalikeCug {
    /// Bound path
    pub path: Option<NodePath>,
    /// Principal names
    pub principals: Vec<PrincipalName>,
}

impl LookalikeCug {
    /// Lookalike bound to `path` granting `everyone`
    pub fn at(path: NodePath) -> Self {
        Self {
            path: Some(path),
            principals: vec![PrincipalName::everyone()],
        }
    }

    /// Bound path
    pub fn path(&self) -> Option<&NodePath> {
        self.path.as_ref()
    }

    /// Principal names
    pub fn principals(&self) -> &[PrincipalName] {
        &self.principals
    }
}

impl AccessControlPolicy for LookalikeCug {}

/// One instance of every kind of foreign policy, bound to `path` where the
/// kind has a path
pub fn foreign_policies(path: &NodePath) -> Vec<AccessPolicy> {
    vec![
        AccessPolicy::foreign(GenericPolicy),
        AccessPolicy::foreign(NamedPolicy::new("name")),
        AccessPolicy::foreign(LookalikeCug {
            path: None,
            principals: Vec::new(),
        }),
        AccessPolicy::foreign(LookalikeCug::at(path.clone())),
    ]
}
