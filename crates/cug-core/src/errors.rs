//! Unified error system for the CUG engine
//!
//! A single error type is shared by the tree collaborator, the policy store and
//! the access control manager, so callers match on one enum regardless of which
//! layer rejected the request.

use serde::{Deserialize, Serialize};

/// Unified error type for all CUG operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum CugError {
    /// The path does not resolve to a node in the current view
    #[error("Path not found: {path}")]
    PathNotFound {
        /// The unresolvable path
        path: String,
    },

    /// The policy argument is not a CUG policy produced by this engine,
    /// or the policy to remove does not exist
    #[error("Invalid policy: {message}")]
    InvalidPolicy {
        /// Error message describing why the policy was rejected
        message: String,
    },

    /// CUG policies cannot be applied at this path
    #[error("Policy not applicable at {path}")]
    NotApplicable {
        /// The unsupported path
        path: String,
    },

    /// The policy is bound to a different path than the target
    #[error("Policy path mismatch: expected {expected}, got {actual}")]
    PathMismatch {
        /// Target path of the operation
        expected: String,
        /// Path the policy is bound to
        actual: String,
    },

    /// A principal name could not be resolved
    #[error("Unknown principal: {name}")]
    InvalidPrincipal {
        /// The unresolvable principal name
        name: String,
    },

    /// Commit failed because a concurrent session changed the same nodes
    #[error("Commit conflict: {message}")]
    Conflict {
        /// Error message describing the conflicting change
        message: String,
    },

    /// Malformed path
    #[error("Invalid path: {message}")]
    InvalidPath {
        /// Error message describing the malformed path
        message: String,
    },

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration problem
        message: String,
    },

    /// Illegal tree operation
    #[error("Storage error: {message}")]
    Storage {
        /// Error message describing the storage failure
        message: String,
    },
}

impl CugError {
    /// Create a path not found error
    pub fn path_not_found(path: impl ToString) -> Self {
        Self::PathNotFound {
            path: path.to_string(),
        }
    }

    /// Create an invalid policy error
    pub fn invalid_policy(message: impl Into<String>) -> Self {
        Self::InvalidPolicy {
            message: message.into(),
        }
    }

    /// Create a not applicable error
    pub fn not_applicable(path: impl ToString) -> Self {
        Self::NotApplicable {
            path: path.to_string(),
        }
    }

    /// Create a path mismatch error
    pub fn path_mismatch(expected: impl ToString, actual: impl ToString) -> Self {
        Self::PathMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create an invalid principal error
    pub fn invalid_principal(name: impl Into<String>) -> Self {
        Self::InvalidPrincipal { name: name.into() }
    }

    /// Create a commit conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::InvalidPath {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Whether the caller violated an access control precondition
    pub fn is_access_control_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidPolicy { .. }
                | Self::NotApplicable { .. }
                | Self::PathMismatch { .. }
                | Self::InvalidPrincipal { .. }
        )
    }
}

/// Standard Result type for CUG operations
pub type CugResult<T> = std::result::Result<T, CugError>;

impl From<std::io::Error> for CugError {
    fn from(err: std::io::Error) -> Self {
        Self::config(err.to_string())
    }
}

impl From<serde_json::Error> for CugError {
    fn from(err: serde_json::Error) -> Self {
        Self::config(format!("Invalid JSON: {err}"))
    }
}

impl From<toml::de::Error> for CugError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("Invalid TOML: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = CugError::not_applicable("/testNode");
        assert!(matches!(err, CugError::NotApplicable { .. }));
        assert_eq!(err.to_string(), "Policy not applicable at /testNode");
    }

    #[test]
    fn test_access_control_classification() {
        assert!(CugError::invalid_policy("x").is_access_control_violation());
        assert!(CugError::path_mismatch("/a", "/a/b").is_access_control_violation());
        assert!(CugError::invalid_principal("nobody").is_access_control_violation());
        assert!(!CugError::path_not_found("/missing").is_access_control_violation());
        assert!(!CugError::conflict("x").is_access_control_violation());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = CugError::from(io_err);
        assert!(matches!(err, CugError::Config { .. }));
    }
}
