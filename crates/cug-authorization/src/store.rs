//! Persistence adapter between [`CugPolicy`] and the tree
//!
//! Layout of a persisted policy on the node at `path`:
//!
//! ```text
//! path                      mixin rep:CugMixin
//! └── rep:cugPolicy         primary type rep:CugPolicy
//!       rep:principalNames  Strings, ordered
//! ```

use crate::CugPolicy;
use cug_core::constants::{
    MIX_REP_CUG_MIXIN, NT_REP_CUG_POLICY, REP_CUG_POLICY, REP_PRINCIPAL_NAMES,
};
use cug_core::{CugResult, PrincipalName};
use cug_tree::{NodeHandle, PropertyValue, TreeView};

/// Reads and writes the persisted CUG layout
#[derive(Debug, Clone, Copy, Default)]
pub struct CugPolicyStore;

impl CugPolicyStore {
    /// Create a store
    pub fn new() -> Self {
        Self
    }

    /// Load the policy persisted at `node`
    ///
    /// Returns `None` unless the reserved child exists with the reserved
    /// primary type and a string-array principal property. Stored names that
    /// are not valid principal names are skipped.
    pub fn load<V>(&self, view: &V, node: &NodeHandle) -> Option<CugPolicy>
    where
        V: TreeView + ?Sized,
    {
        let policy_node = view.child(node, REP_CUG_POLICY)?;

        let primary_type = view.primary_type(&policy_node);
        if primary_type.as_deref() != Some(NT_REP_CUG_POLICY) {
            tracing::debug!(
                path = %node,
                primary_type = ?primary_type,
                "Ignoring reserved policy node with unexpected primary type"
            );
            return None;
        }

        let names = match view.property(&policy_node, REP_PRINCIPAL_NAMES) {
            Some(PropertyValue::Strings(names)) => names,
            other => {
                tracing::debug!(
                    path = %node,
                    property_type = ?other.as_ref().map(PropertyValue::type_name),
                    "Ignoring policy node without a principal name array"
                );
                return None;
            }
        };

        let principals = names
            .into_iter()
            .filter_map(|name| PrincipalName::new(name).ok());
        Some(CugPolicy::with_principals(node.path().clone(), principals))
    }

    /// Whether a well-formed policy is persisted at `node`
    pub fn exists<V>(&self, view: &V, node: &NodeHandle) -> bool
    where
        V: TreeView + ?Sized,
    {
        self.load(view, node).is_some()
    }

    /// Write `policy` at `node`, creating or replacing the policy node
    pub fn save<V>(&self, view: &mut V, node: &NodeHandle, policy: &CugPolicy) -> CugResult<()>
    where
        V: TreeView + ?Sized,
    {
        let policy_node = match view.child(node, REP_CUG_POLICY) {
            Some(existing)
                if view.primary_type(&existing).as_deref() == Some(NT_REP_CUG_POLICY) =>
            {
                existing
            }
            Some(_) => {
                view.remove_child(node, REP_CUG_POLICY)?;
                view.add_child(node, REP_CUG_POLICY, NT_REP_CUG_POLICY)?
            }
            None => view.add_child(node, REP_CUG_POLICY, NT_REP_CUG_POLICY)?,
        };

        let names = policy.principal_names().map(|name| name.as_str().to_string());
        view.set_property(&policy_node, REP_PRINCIPAL_NAMES, PropertyValue::strings(names))?;
        view.add_trait(node, MIX_REP_CUG_MIXIN)?;
        Ok(())
    }

    /// Remove the policy node and the marker trait; `false` if there was no
    /// policy node
    pub fn delete<V>(&self, view: &mut V, node: &NodeHandle) -> CugResult<bool>
    where
        V: TreeView + ?Sized,
    {
        let removed = view.remove_child(node, REP_CUG_POLICY)?;
        view.remove_trait(node, MIX_REP_CUG_MIXIN)?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cug_core::NodePath;
    use cug_tree::{MemorySession, MemoryTreeStore};

    fn session_with_content() -> (MemorySession, NodeHandle) {
        let mut session = MemoryTreeStore::new().session();
        let root = session.resolve(&NodePath::root()).unwrap();
        let content = session
            .add_child(&root, "content", "oak:Unstructured")
            .unwrap();
        (session, content)
    }

    fn everyone_policy(node: &NodeHandle) -> CugPolicy {
        CugPolicy::with_principals(node.path().clone(), [PrincipalName::everyone()])
    }

    #[test]
    fn test_save_then_load() {
        let (mut session, content) = session_with_content();
        let store = CugPolicyStore::new();
        assert!(store.load(&session, &content).is_none());

        store
            .save(&mut session, &content, &everyone_policy(&content))
            .unwrap();

        assert!(session.has_trait(&content, MIX_REP_CUG_MIXIN));
        let policy_node = session.child(&content, REP_CUG_POLICY).unwrap();
        assert_eq!(
            session.primary_type(&policy_node).as_deref(),
            Some(NT_REP_CUG_POLICY)
        );
        let loaded = store.load(&session, &content).unwrap();
        assert_eq!(loaded, everyone_policy(&content));
    }

    #[test]
    fn test_save_replaces_principals() {
        let (mut session, content) = session_with_content();
        let store = CugPolicyStore::new();
        store
            .save(&mut session, &content, &everyone_policy(&content))
            .unwrap();

        let replacement = CugPolicy::with_principals(
            content.path().clone(),
            [PrincipalName::new("alice").unwrap()],
        );
        store.save(&mut session, &content, &replacement).unwrap();

        let loaded = store.load(&session, &content).unwrap();
        let names: Vec<_> = loaded.principal_names().map(|p| p.as_str()).collect();
        assert_eq!(names, vec!["alice"]);
    }

    #[test]
    fn test_malformed_shapes_read_as_absent() {
        let (mut session, content) = session_with_content();
        let store = CugPolicyStore::new();

        let wrong_type = session
            .add_child(&content, REP_CUG_POLICY, "nt:unstructured")
            .unwrap();
        session
            .set_property(&wrong_type, REP_PRINCIPAL_NAMES, PropertyValue::strings(["everyone"]))
            .unwrap();
        assert!(store.load(&session, &content).is_none());

        session.remove_child(&content, REP_CUG_POLICY).unwrap();
        let single_valued = session
            .add_child(&content, REP_CUG_POLICY, NT_REP_CUG_POLICY)
            .unwrap();
        session
            .set_property(
                &single_valued,
                REP_PRINCIPAL_NAMES,
                PropertyValue::String("everyone".into()),
            )
            .unwrap();
        assert!(store.load(&session, &content).is_none());

        session
            .remove_property(&single_valued, REP_PRINCIPAL_NAMES)
            .unwrap();
        assert!(!store.exists(&session, &content));
    }

    #[test]
    fn test_save_replaces_malformed_node() {
        let (mut session, content) = session_with_content();
        let store = CugPolicyStore::new();
        session
            .add_child(&content, REP_CUG_POLICY, "nt:unstructured")
            .unwrap();

        store
            .save(&mut session, &content, &everyone_policy(&content))
            .unwrap();
        assert!(store.exists(&session, &content));
    }

    #[test]
    fn test_empty_principal_list_is_a_policy() {
        let (mut session, content) = session_with_content();
        let store = CugPolicyStore::new();
        store
            .save(&mut session, &content, &CugPolicy::new(content.path().clone()))
            .unwrap();
        let loaded = store.load(&session, &content).unwrap();
        assert!(loaded.principals().is_empty());
    }

    #[test]
    fn test_delete() {
        let (mut session, content) = session_with_content();
        let store = CugPolicyStore::new();
        assert!(!store.delete(&mut session, &content).unwrap());

        store
            .save(&mut session, &content, &everyone_policy(&content))
            .unwrap();
        assert!(store.delete(&mut session, &content).unwrap());
        assert!(session.child(&content, REP_CUG_POLICY).is_none());
        assert!(!session.has_trait(&content, MIX_REP_CUG_MIXIN));
    }
}
