//! CUG policy values and the policy argument accepted by the manager

use cug_core::{NodePath, PrincipalName};
use indexmap::IndexSet;
use std::fmt;
use std::sync::Arc;

/// Closed user group policy bound to one node
///
/// Only the engine constructs instances: callers obtain them from
/// [`CugAccessControlManager::get_applicable_policies`] or
/// [`CugAccessControlManager::get_policies`] and edit the principal set before
/// handing them back.
///
/// [`CugAccessControlManager::get_applicable_policies`]: crate::CugAccessControlManager::get_applicable_policies
/// [`CugAccessControlManager::get_policies`]: crate::CugAccessControlManager::get_policies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CugPolicy {
    path: NodePath,
    principals: IndexSet<PrincipalName>,
}

impl CugPolicy {
    pub(crate) fn new(path: NodePath) -> Self {
        Self {
            path,
            principals: IndexSet::new(),
        }
    }

    pub(crate) fn with_principals<I>(path: NodePath, principals: I) -> Self
    where
        I: IntoIterator<Item = PrincipalName>,
    {
        Self {
            path,
            principals: principals.into_iter().collect(),
        }
    }

    /// Path the policy is bound to
    pub fn path(&self) -> &NodePath {
        &self.path
    }

    /// Snapshot of the principal set in insertion order
    pub fn principals(&self) -> IndexSet<PrincipalName> {
        self.principals.clone()
    }

    /// Borrowing iterator over the principal names
    pub fn principal_names(&self) -> impl Iterator<Item = &PrincipalName> {
        self.principals.iter()
    }

    /// Whether `name` is a member
    pub fn contains(&self, name: &PrincipalName) -> bool {
        self.principals.contains(name)
    }

    /// Add principals; true if the set grew
    pub fn add_principals<I>(&mut self, names: I) -> bool
    where
        I: IntoIterator<Item = PrincipalName>,
    {
        let before = self.principals.len();
        self.principals.extend(names);
        self.principals.len() != before
    }

    /// Remove principals; true if the set shrank
    pub fn remove_principals<'a, I>(&mut self, names: I) -> bool
    where
        I: IntoIterator<Item = &'a PrincipalName>,
    {
        let before = self.principals.len();
        for name in names {
            self.principals.shift_remove(name);
        }
        self.principals.len() != before
    }
}

/// Access control policy not managed by this engine
pub trait AccessControlPolicy: fmt::Debug + Send + Sync {
    /// Optional policy name
    fn name(&self) -> Option<&str> {
        None
    }
}

/// Policy argument for the manager's mutating operations
#[derive(Debug, Clone)]
pub enum AccessPolicy {
    /// Freshly offered, not yet persisted CUG policy
    Staged(CugPolicy),
    /// CUG policy read back from the tree
    Persisted(CugPolicy),
    /// Any other policy; always rejected
    Other(Arc<dyn AccessControlPolicy>),
}

impl AccessPolicy {
    /// Wrap a foreign policy
    pub fn foreign(policy: impl AccessControlPolicy + 'static) -> Self {
        AccessPolicy::Other(Arc::new(policy))
    }

    /// The CUG policy, if this is one
    pub fn as_cug(&self) -> Option<&CugPolicy> {
        match self {
            AccessPolicy::Staged(cug) | AccessPolicy::Persisted(cug) => Some(cug),
            AccessPolicy::Other(_) => None,
        }
    }

    /// Mutable access to the CUG policy, if this is one
    pub fn as_cug_mut(&mut self) -> Option<&mut CugPolicy> {
        match self {
            AccessPolicy::Staged(cug) | AccessPolicy::Persisted(cug) => Some(cug),
            AccessPolicy::Other(_) => None,
        }
    }

    /// Unwrap the CUG policy, if this is one
    pub fn into_cug(self) -> Option<CugPolicy> {
        match self {
            AccessPolicy::Staged(cug) | AccessPolicy::Persisted(cug) => Some(cug),
            AccessPolicy::Other(_) => None,
        }
    }

    /// Whether the policy was read from the tree
    pub fn is_persisted(&self) -> bool {
        matches!(self, AccessPolicy::Persisted(_))
    }
}

/// Iterator over the policies applicable at a path; yields at most one policy
#[derive(Debug)]
pub struct ApplicablePolicies {
    inner: std::option::IntoIter<AccessPolicy>,
}

impl ApplicablePolicies {
    pub(crate) fn empty() -> Self {
        Self { inner: None.into_iter() }
    }

    pub(crate) fn single(policy: AccessPolicy) -> Self {
        Self {
            inner: Some(policy).into_iter(),
        }
    }
}

impl Iterator for ApplicablePolicies {
    type Item = AccessPolicy;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ApplicablePolicies {}
