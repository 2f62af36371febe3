//! Path prefixes eligible for CUG policies

use cug_core::{constants, CugConfig, NodePath};
use std::collections::BTreeSet;

/// Immutable set of path prefixes below which CUG policies may exist
///
/// A path is supported if it equals or lies below one of the configured
/// entries and is not inside a reserved system subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportedPathSet {
    paths: BTreeSet<NodePath>,
    reserved: Vec<NodePath>,
}

impl SupportedPathSet {
    /// Build from explicit prefixes
    pub fn new<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = NodePath>,
    {
        let reserved = constants::RESERVED_PATHS
            .iter()
            .filter_map(|raw| NodePath::parse(raw).ok())
            .collect();
        Self {
            paths: paths.into_iter().collect(),
            reserved,
        }
    }

    /// Build from configuration; a disabled configuration supports nothing
    pub fn from_config(config: &CugConfig) -> Self {
        if config.enabled {
            Self::new(config.supported_paths.iter().cloned())
        } else {
            Self::new(std::iter::empty())
        }
    }

    /// Whether CUG policies may exist at `path`
    pub fn is_supported(&self, path: &NodePath) -> bool {
        !self.is_reserved(path)
            && self
                .paths
                .iter()
                .any(|prefix| path.is_same_or_descendant_of(prefix))
    }

    /// Whether `path` is supported or is an ancestor of a supported prefix,
    /// i.e. whether its subtree may contain CUG policies
    pub fn may_contain_supported(&self, path: &NodePath) -> bool {
        self.is_supported(path)
            || self
                .paths
                .iter()
                .any(|prefix| path.is_ancestor_of(prefix) && !self.is_reserved(prefix))
    }

    fn is_reserved(&self, path: &NodePath) -> bool {
        self.reserved
            .iter()
            .any(|reserved| path.is_same_or_descendant_of(reserved))
    }

    /// Configured prefixes in order
    pub fn iter(&self) -> impl Iterator<Item = &NodePath> {
        self.paths.iter()
    }

    /// Number of configured prefixes
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether nothing is supported
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn path(raw: &str) -> NodePath {
        NodePath::parse(raw).unwrap()
    }

    fn content_only() -> SupportedPathSet {
        SupportedPathSet::new([path("/content")])
    }

    #[test]
    fn test_prefix_containment() {
        let set = content_only();
        assert!(set.is_supported(&path("/content")));
        assert!(set.is_supported(&path("/content/subtree")));
        assert!(!set.is_supported(&path("/testNode")));
        assert!(!set.is_supported(&path("/contentX")));
        assert!(!set.is_supported(&NodePath::root()));
    }

    #[test]
    fn test_reserved_paths_never_supported() {
        let set = SupportedPathSet::new([NodePath::root()]);
        assert!(set.is_supported(&path("/content")));
        assert!(!set.is_supported(&path(constants::JCR_SYSTEM_PATH)));
        assert!(!set.is_supported(&path(constants::NODE_TYPES_PATH)));
    }

    #[test]
    fn test_disabled_config_supports_nothing() {
        let config = CugConfig {
            enabled: false,
            supported_paths: vec![path("/content")],
            ..CugConfig::default()
        };
        let set = SupportedPathSet::from_config(&config);
        assert!(set.is_empty());
        assert!(!set.is_supported(&path("/content")));
    }

    #[test]
    fn test_may_contain_supported() {
        let set = SupportedPathSet::new([path("/content/site")]);
        assert!(set.may_contain_supported(&NodePath::root()));
        assert!(set.may_contain_supported(&path("/content")));
        assert!(set.may_contain_supported(&path("/content/site/page")));
        assert!(!set.may_contain_supported(&path("/content/other")));
    }

    proptest! {
        #[test]
        fn empty_set_supports_nothing(segments in prop::collection::vec("[a-z]{1,6}", 0..4)) {
            let mut p = NodePath::root();
            for segment in &segments {
                p = p.child(segment).unwrap();
            }
            let set = SupportedPathSet::new(std::iter::empty());
            prop_assert!(!set.is_supported(&p));
            prop_assert!(!set.may_contain_supported(&p));
        }

        #[test]
        fn descendants_inherit_support(segments in prop::collection::vec("[a-z]{1,6}", 0..4)) {
            let mut p = path("/content");
            for segment in &segments {
                p = p.child(segment).unwrap();
            }
            prop_assert!(content_only().is_supported(&p));
        }
    }
}
