//! CUG access control manager
//!
//! The manager is the only component that decides when the tree is mutated.
//! For every path it derives one of the states in [`PolicyState`] from the
//! supported path configuration and the persisted policy node, and it validates
//! mutating requests in a fixed order:
//!
//! 1. the path resolves (`PathNotFound`)
//! 2. the policy is a CUG policy produced by this engine (`InvalidPolicy`)
//! 3. the path is supported (`NotApplicable`)
//! 4. the policy is bound to the path (`PathMismatch`)
//!
//! Changes are staged in the owned [`TreeView`]; the caller commits them.
//! Persisted state is re-read on every call and never cached.

use crate::principal::{filter_resolvable, PrincipalNameResolver};
use crate::{AccessPolicy, ApplicablePolicies, CugPolicy, CugPolicyStore, SupportedPathSet};
use cug_core::{CugConfig, CugError, CugResult, ImportBehavior, NodePath, PrivilegeSet};
use cug_tree::{NodeHandle, TreeView};
use std::sync::Arc;

/// Policy state of a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyState {
    /// CUG policies cannot exist at the path
    Unsupported,
    /// Supported path without a persisted policy; a fresh policy is applicable
    NoPolicy,
    /// A policy is persisted at the path
    PolicySet,
}

/// Orchestrates reading and writing CUG policies through a tree view
pub struct CugAccessControlManager<V: TreeView> {
    view: V,
    supported_paths: SupportedPathSet,
    import_behavior: ImportBehavior,
    resolver: Arc<dyn PrincipalNameResolver>,
    store: CugPolicyStore,
}

impl<V: TreeView> CugAccessControlManager<V> {
    /// Create a manager over `view`
    pub fn new(view: V, config: &CugConfig, resolver: Arc<dyn PrincipalNameResolver>) -> Self {
        Self {
            view,
            supported_paths: SupportedPathSet::from_config(config),
            import_behavior: config.import_behavior,
            resolver,
            store: CugPolicyStore::new(),
        }
    }

    /// The tree view
    pub fn view(&self) -> &V {
        &self.view
    }

    /// The tree view, e.g. to commit staged changes
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Consume the manager, returning the tree view
    pub fn into_view(self) -> V {
        self.view
    }

    /// Configured supported paths
    pub fn supported_paths(&self) -> &SupportedPathSet {
        &self.supported_paths
    }

    /// Configured handling of unresolvable principals
    pub fn import_behavior(&self) -> ImportBehavior {
        self.import_behavior
    }

    /// Whether CUG policies may exist at `path`; does not consult the tree
    pub fn is_supported_path(&self, path: &NodePath) -> bool {
        self.supported_paths.is_supported(path)
    }

    /// Privileges a CUG policy at `path` restricts: `{read}` for supported
    /// paths, empty otherwise
    pub fn get_supported_privileges(&self, path: &NodePath) -> CugResult<PrivilegeSet> {
        self.view.resolve(path)?;
        if self.is_supported_path(path) {
            Ok(PrivilegeSet::read_only())
        } else {
            Ok(PrivilegeSet::empty())
        }
    }

    /// Policies that could be set at `path`
    ///
    /// Yields one fresh, empty policy if the path is supported and has no
    /// persisted policy; yields nothing otherwise.
    pub fn get_applicable_policies(&self, path: &NodePath) -> CugResult<ApplicablePolicies> {
        let node = self.view.resolve(path)?;
        if !self.is_supported_path(path) {
            tracing::debug!(path = %path, "No applicable CUG policy: unsupported path");
            return Ok(ApplicablePolicies::empty());
        }
        if self.store.exists(&self.view, &node) {
            return Ok(ApplicablePolicies::empty());
        }
        Ok(ApplicablePolicies::single(AccessPolicy::Staged(
            CugPolicy::new(path.clone()),
        )))
    }

    /// The policy persisted at `path`, if any
    pub fn get_policies(&self, path: &NodePath) -> CugResult<Vec<AccessPolicy>> {
        let node = self.view.resolve(path)?;
        if !self.is_supported_path(path) {
            return Ok(Vec::new());
        }
        Ok(self
            .store
            .load(&self.view, &node)
            .map(AccessPolicy::Persisted)
            .into_iter()
            .collect())
    }

    /// Current state of `path`
    pub fn policy_state(&self, path: &NodePath) -> CugResult<PolicyState> {
        let node = self.view.resolve(path)?;
        if !self.is_supported_path(path) {
            Ok(PolicyState::Unsupported)
        } else if self.store.exists(&self.view, &node) {
            Ok(PolicyState::PolicySet)
        } else {
            Ok(PolicyState::NoPolicy)
        }
    }

    /// Stage `policy` at `path`, creating or replacing the persisted policy
    pub fn set_policy(&mut self, path: &NodePath, policy: &AccessPolicy) -> CugResult<()> {
        let node = self.view.resolve(path)?;
        let cug = self.check_valid_policy(path, policy)?;

        let principals =
            filter_resolvable(self.resolver.as_ref(), self.import_behavior, cug.principal_names())?;
        let persisted = CugPolicy::with_principals(path.clone(), principals);

        self.store.save(&mut self.view, &node, &persisted)?;
        tracing::info!(
            path = %path,
            principals = persisted.principals().len(),
            "Staged CUG policy"
        );
        Ok(())
    }

    /// Stage removal of the policy persisted at `path`
    pub fn remove_policy(&mut self, path: &NodePath, policy: &AccessPolicy) -> CugResult<()> {
        let node = self.view.resolve(path)?;
        self.check_valid_policy(path, policy)?;
        self.check_persisted(path, &node)?;

        self.store.delete(&mut self.view, &node)?;
        tracing::info!(path = %path, "Staged CUG policy removal");
        Ok(())
    }

    fn check_valid_policy<'p>(
        &self,
        path: &NodePath,
        policy: &'p AccessPolicy,
    ) -> CugResult<&'p CugPolicy> {
        let cug = policy.as_cug().ok_or_else(|| {
            CugError::invalid_policy(format!("Not a CUG policy: {policy:?}"))
        })?;
        if !self.is_supported_path(path) {
            return Err(CugError::not_applicable(path));
        }
        if cug.path() != path {
            return Err(CugError::path_mismatch(path, cug.path()));
        }
        Ok(cug)
    }

    fn check_persisted(&self, path: &NodePath, node: &NodeHandle) -> CugResult<()> {
        if self.store.exists(&self.view, node) {
            Ok(())
        } else {
            Err(CugError::invalid_policy(format!(
                "No CUG policy persisted at {path}"
            )))
        }
    }
}
