//! # CUG Tree - Transactional Content Tree
//!
//! The policy engine never owns durability. It reads and stages changes through
//! the [`TreeView`] interface and leaves committing, and detecting conflicting
//! concurrent commits, to the view.
//!
//! [`MemoryTreeStore`] is the in-process implementation: a shared committed
//! tree plus per-session snapshot views ([`MemorySession`]) with per-node
//! conflict detection on commit.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// In-memory store and sessions
pub mod memory;

/// Property values
pub mod property;

/// Tree view interface
pub mod view;

pub use memory::{MemorySession, MemoryTreeStore};
pub use property::PropertyValue;
pub use view::{NodeHandle, TreeView};
