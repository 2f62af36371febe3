//! Privileges a CUG policy can restrict

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Privileges known to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Privilege {
    /// Read access to nodes and properties
    #[serde(rename = "jcr:read")]
    Read,
}

impl Privilege {
    /// Qualified privilege name
    pub fn name(&self) -> &'static str {
        match self {
            Privilege::Read => "jcr:read",
        }
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered set of privileges
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivilegeSet(BTreeSet<Privilege>);

impl PrivilegeSet {
    /// The empty set
    pub fn empty() -> Self {
        Self::default()
    }

    /// `{read}`, the privileges a CUG policy restricts
    pub fn read_only() -> Self {
        Self(BTreeSet::from([Privilege::Read]))
    }

    /// Membership test
    pub fn contains(&self, privilege: Privilege) -> bool {
        self.0.contains(&privilege)
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of privileges
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate in order
    pub fn iter(&self) -> impl Iterator<Item = Privilege> + '_ {
        self.0.iter().copied()
    }

    /// Qualified names in order
    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(|p| p.name()).collect()
    }
}

impl FromIterator<Privilege> for PrivilegeSet {
    fn from_iter<I: IntoIterator<Item = Privilege>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_only() {
        let set = PrivilegeSet::read_only();
        assert!(set.contains(Privilege::Read));
        assert_eq!(set.len(), 1);
        assert_eq!(set.names(), vec!["jcr:read"]);
        assert!(PrivilegeSet::empty().is_empty());
    }
}
