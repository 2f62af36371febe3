//! Principal resolution
//!
//! Identity management is external; the engine only asks whether a principal
//! name resolves. What happens to names that do not resolve is decided by the
//! configured [`ImportBehavior`].

use cug_core::{CugError, CugResult, PrincipalName};
use std::collections::HashMap;

pub use cug_core::ImportBehavior;

/// Kind of a resolved principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrincipalKind {
    /// The built-in principal every subject belongs to
    Everyone,
    /// Individual user
    User,
    /// Group of users
    Group,
}

/// Resolved identity token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Principal {
    name: PrincipalName,
    kind: PrincipalKind,
}

impl Principal {
    /// Create a principal
    pub fn new(name: PrincipalName, kind: PrincipalKind) -> Self {
        Self { name, kind }
    }

    /// The `everyone` principal
    pub fn everyone() -> Self {
        Self::new(PrincipalName::everyone(), PrincipalKind::Everyone)
    }

    /// Principal name
    pub fn name(&self) -> &PrincipalName {
        &self.name
    }

    /// Principal kind
    pub fn kind(&self) -> PrincipalKind {
        self.kind
    }
}

/// Resolves principal names to identities
pub trait PrincipalNameResolver: Send + Sync {
    /// Resolve a name, `None` if no such principal exists
    fn resolve(&self, name: &PrincipalName) -> Option<Principal>;
}

/// Fixed in-memory principal directory; always resolves `everyone`
#[derive(Debug, Clone, Default)]
pub struct StaticPrincipalResolver {
    principals: HashMap<PrincipalName, Principal>,
}

impl StaticPrincipalResolver {
    /// Directory containing only `everyone`
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user
    pub fn with_user(mut self, name: &str) -> CugResult<Self> {
        self.insert(name, PrincipalKind::User)?;
        Ok(self)
    }

    /// Register a group
    pub fn with_group(mut self, name: &str) -> CugResult<Self> {
        self.insert(name, PrincipalKind::Group)?;
        Ok(self)
    }

    fn insert(&mut self, name: &str, kind: PrincipalKind) -> CugResult<()> {
        let name = PrincipalName::new(name)?;
        if name.is_everyone() {
            return Err(CugError::invalid_principal(name.as_str()));
        }
        self.principals
            .insert(name.clone(), Principal::new(name, kind));
        Ok(())
    }
}

impl PrincipalNameResolver for StaticPrincipalResolver {
    fn resolve(&self, name: &PrincipalName) -> Option<Principal> {
        if name.is_everyone() {
            return Some(Principal::everyone());
        }
        self.principals.get(name).cloned()
    }
}

/// Apply `behavior` to `names`, returning the names to persist in order
pub fn filter_resolvable<'a, I>(
    resolver: &dyn PrincipalNameResolver,
    behavior: ImportBehavior,
    names: I,
) -> CugResult<Vec<PrincipalName>>
where
    I: IntoIterator<Item = &'a PrincipalName>,
{
    let mut accepted = Vec::new();
    for name in names {
        if resolver.resolve(name).is_some() {
            accepted.push(name.clone());
            continue;
        }
        match behavior {
            ImportBehavior::Abort => return Err(CugError::invalid_principal(name.as_str())),
            ImportBehavior::Ignore => {
                tracing::debug!(principal = %name, "Ignoring unknown principal");
            }
            ImportBehavior::BestEffort => {
                tracing::debug!(principal = %name, "Keeping unknown principal");
                accepted.push(name.clone());
            }
        }
    }
    Ok(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn names(raw: &[&str]) -> Vec<PrincipalName> {
        raw.iter().map(|n| PrincipalName::new(*n).unwrap()).collect()
    }

    fn directory() -> StaticPrincipalResolver {
        StaticPrincipalResolver::new()
            .with_user("alice")
            .unwrap()
            .with_group("editors")
            .unwrap()
    }

    #[test]
    fn test_static_resolver() {
        let resolver = directory();
        let everyone = resolver.resolve(&PrincipalName::everyone()).unwrap();
        assert_eq!(everyone.kind(), PrincipalKind::Everyone);
        let editors = resolver
            .resolve(&PrincipalName::new("editors").unwrap())
            .unwrap();
        assert_eq!(editors.kind(), PrincipalKind::Group);
        assert!(resolver.resolve(&PrincipalName::new("mallory").unwrap()).is_none());
        assert!(StaticPrincipalResolver::new().with_user("everyone").is_err());
    }

    #[test]
    fn test_abort_rejects_unknown() {
        let input = names(&["alice", "mallory"]);
        assert_matches!(
            filter_resolvable(&directory(), ImportBehavior::Abort, &input),
            Err(CugError::InvalidPrincipal { name }) if name == "mallory"
        );
    }

    #[test]
    fn test_ignore_drops_unknown() {
        let input = names(&["mallory", "alice", "everyone"]);
        let kept = filter_resolvable(&directory(), ImportBehavior::Ignore, &input).unwrap();
        assert_eq!(kept, names(&["alice", "everyone"]));
    }

    #[test]
    fn test_best_effort_keeps_unknown() {
        let input = names(&["mallory", "alice"]);
        let kept = filter_resolvable(&directory(), ImportBehavior::BestEffort, &input).unwrap();
        assert_eq!(kept, input);
    }
}
