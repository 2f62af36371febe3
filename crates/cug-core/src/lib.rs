//! # CUG Core - Foundation Types
//!
//! Shared vocabulary of the closed user group (CUG) policy engine: the unified
//! error type, normalized node paths, principal names, privileges, the reserved
//! names of the persisted policy layout, and engine configuration.
//!
//! This crate has no knowledge of trees or policies. It is depended on by
//! `cug-tree` (the transactional tree collaborator) and `cug-authorization`
//! (the policy engine).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Engine configuration
pub mod config;

/// Reserved names of the persisted CUG layout
pub mod constants;

/// Unified error handling
pub mod errors;

/// Absolute node paths
pub mod path;

/// Principal names
pub mod principal;

/// Privileges
pub mod privilege;

pub use config::{ConfigLayer, CugConfig, ImportBehavior};
pub use errors::{CugError, CugResult};
pub use path::NodePath;
pub use principal::PrincipalName;
pub use privilege::{Privilege, PrivilegeSet};
