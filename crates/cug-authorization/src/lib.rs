//! # CUG Authorization - Closed User Group Policies
//!
//! A closed user group (CUG) policy restricts read access to a subtree of the
//! content tree to a named set of principals. This crate decides where such
//! policies may exist, reads and writes them through a transactional tree view,
//! and validates every change before staging it.
//!
//! ## Components
//!
//! - [`SupportedPathSet`]: configured path prefixes eligible for policies
//! - [`PrincipalNameResolver`]: external principal lookup, applied according
//!   to the configured [`ImportBehavior`]
//! - [`CugPolicy`]: policy value bound to one path
//! - [`CugPolicyStore`]: persisted node layout
//! - [`CugAccessControlManager`]: get/set/remove lifecycle
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use cug_authorization::{CugAccessControlManager, StaticPrincipalResolver};
//! use cug_core::{CugConfig, NodePath, PrincipalName};
//! use cug_tree::{MemoryTreeStore, TreeView};
//!
//! # fn main() -> Result<(), cug_core::CugError> {
//! let store = MemoryTreeStore::new();
//! let mut session = store.session();
//! let root = session.resolve(&NodePath::root())?;
//! session.add_child(&root, "content", "oak:Unstructured")?;
//! session.commit()?;
//!
//! let config = CugConfig::with_supported_paths(["/content"])?;
//! let mut manager =
//!     CugAccessControlManager::new(session, &config, Arc::new(StaticPrincipalResolver::new()));
//!
//! let content = NodePath::parse("/content")?;
//! if let Some(mut policy) = manager.get_applicable_policies(&content)?.next() {
//!     if let Some(cug) = policy.as_cug_mut() {
//!         cug.add_principals([PrincipalName::everyone()]);
//!     }
//!     manager.set_policy(&content, &policy)?;
//! }
//! manager.view_mut().commit()?;
//! assert_eq!(manager.get_policies(&content)?.len(), 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Access control manager
pub mod manager;

/// Policy values
pub mod policy;

/// Principal resolution
pub mod principal;

/// Persisted policy layout
pub mod store;

/// Supported path configuration
pub mod supported_paths;

pub use manager::{CugAccessControlManager, PolicyState};
pub use policy::{AccessControlPolicy, AccessPolicy, ApplicablePolicies, CugPolicy};
pub use principal::{
    ImportBehavior, Principal, PrincipalKind, PrincipalNameResolver, StaticPrincipalResolver,
};
pub use store::CugPolicyStore;
pub use supported_paths::SupportedPathSet;
