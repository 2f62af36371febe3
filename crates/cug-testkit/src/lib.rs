//! CUG Testing Infrastructure
//!
//! Shared fixtures for integration tests: a content tree with a supported and
//! an unsupported subtree, a principal directory, stand-ins for policies the
//! engine does not manage, and one-time tracing setup.
//!
//! # Usage
//!
//! ```rust,no_run
//! use cug_testkit::*;
//!
//! let fixture = CugFixture::new();
//! let policies = fixture.manager.get_policies(&path(SUPPORTED_PATH)).unwrap();
//! assert!(policies.is_empty());
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod fixtures;
pub mod foreign;
pub mod tracing_setup;

pub use fixtures::*;
pub use foreign::*;
pub use tracing_setup::init_test_tracing;
