//! Configuration for the CUG engine
//!
//! Configuration is loaded from a TOML or JSON file, then overridden by
//! `CUG_*` environment variables, then validated:
//!
//! ```toml
//! enabled = true
//! supported_paths = ["/content"]
//! import_behavior = "abort"
//! ```

mod cug;
mod traits;

pub use cug::{CugConfig, ImportBehavior};
pub use traits::{read_config_file, ConfigLayer};
