//! Absolute, normalized node paths
//!
//! Every path handled by the engine is absolute and normalized: it starts with
//! `/`, has no empty, `.` or `..` segments and no trailing separator (except
//! the root path itself). Containment checks work on whole segments, so
//! `/contentX` is never treated as a descendant of `/content`.

use crate::{CugError, CugResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Path separator
pub const SEPARATOR: char = '/';

/// Absolute, normalized path of a node in the content tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodePath(String);

impl NodePath {
    /// The root path `/`
    pub fn root() -> Self {
        Self(SEPARATOR.to_string())
    }

    /// Parse and normalize an absolute path
    pub fn parse(raw: &str) -> CugResult<Self> {
        if raw.is_empty() {
            return Err(CugError::invalid_path("path is empty"));
        }
        if !raw.starts_with(SEPARATOR) {
            return Err(CugError::invalid_path(format!("{raw} is not absolute")));
        }

        let trimmed = raw.strip_suffix(SEPARATOR).unwrap_or(raw);
        if trimmed.is_empty() {
            return Ok(Self::root());
        }

        for segment in trimmed[1..].split(SEPARATOR) {
            validate_name(segment).map_err(|_| {
                CugError::invalid_path(format!("{raw} contains an invalid segment '{segment}'"))
            })?;
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Whether this is the root path
    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    /// Path string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parent path, `None` for the root
    pub fn parent(&self) -> Option<NodePath> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind(SEPARATOR) {
            Some(0) => Some(Self::root()),
            Some(idx) => Some(Self(self.0[..idx].to_string())),
            None => None,
        }
    }

    /// Last segment, empty for the root
    pub fn name(&self) -> &str {
        match self.0.rfind(SEPARATOR) {
            Some(idx) => &self.0[idx + 1..],
            None => "",
        }
    }

    /// Path of the named child
    pub fn child(&self, name: &str) -> CugResult<NodePath> {
        validate_name(name)?;
        if self.is_root() {
            Ok(Self(format!("/{name}")))
        } else {
            Ok(Self(format!("{}/{name}", self.0)))
        }
    }

    /// Segments from the root down
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR).filter(|s| !s.is_empty())
    }

    /// Number of segments, 0 for the root
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// True if `self` equals `other` or lies below it
    pub fn is_same_or_descendant_of(&self, other: &NodePath) -> bool {
        if other.is_root() || self == other {
            return true;
        }
        self.0.starts_with(other.as_str())
            && self.0.as_bytes().get(other.0.len()) == Some(&(SEPARATOR as u8))
    }

    /// True if `other` lies strictly below `self`
    pub fn is_ancestor_of(&self, other: &NodePath) -> bool {
        self != other && other.is_same_or_descendant_of(self)
    }
}

/// Validate a single path segment (node name)
pub fn validate_name(name: &str) -> CugResult<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(SEPARATOR) {
        return Err(CugError::invalid_path(format!("invalid node name '{name}'")));
    }
    Ok(())
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NodePath {
    type Err = CugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for NodePath {
    type Error = CugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NodePath> for String {
    fn from(path: NodePath) -> Self {
        path.0
    }
}

impl AsRef<str> for NodePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
