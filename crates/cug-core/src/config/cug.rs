//! CUG engine configuration

use super::traits::{read_config_file, ConfigLayer};
use crate::{CugError, CugResult, NodePath};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// How principal names that cannot be resolved are handled when a policy is
/// written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportBehavior {
    /// Reject the write
    #[default]
    Abort,
    /// Drop unresolvable names from the persisted list
    Ignore,
    /// Persist unresolvable names unchanged
    BestEffort,
}

impl ImportBehavior {
    /// Configuration name of the behavior
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportBehavior::Abort => "abort",
            ImportBehavior::Ignore => "ignore",
            ImportBehavior::BestEffort => "besteffort",
        }
    }
}

impl fmt::Display for ImportBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImportBehavior {
    type Err = CugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(ImportBehavior::Abort),
            "ignore" => Ok(ImportBehavior::Ignore),
            "besteffort" | "best_effort" | "best-effort" => Ok(ImportBehavior::BestEffort),
            other => Err(CugError::config(format!("Unknown import behavior: {other}"))),
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CugConfig {
    /// Whether CUG policies are evaluated and may be written at all
    pub enabled: bool,
    /// Path prefixes below which CUG policies may exist
    pub supported_paths: Vec<NodePath>,
    /// Handling of unresolvable principal names
    pub import_behavior: ImportBehavior,
}

impl CugConfig {
    /// Enabled configuration supporting the given paths
    pub fn with_supported_paths<I, P>(paths: I) -> CugResult<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let supported_paths = paths
            .into_iter()
            .map(|p| NodePath::parse(p.as_ref()))
            .collect::<CugResult<Vec<_>>>()?;
        let config = Self {
            enabled: true,
            supported_paths,
            import_behavior: ImportBehavior::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Replace the import behavior
    pub fn with_import_behavior(mut self, behavior: ImportBehavior) -> Self {
        self.import_behavior = behavior;
        self
    }

    /// Load a file, apply environment overrides and validate
    pub fn load(path: &Path) -> CugResult<Self> {
        let mut config = Self::load_from_file(path)?;
        config.merge_with_env()?;
        config.validate()?;
        tracing::debug!(
            enabled = config.enabled,
            supported_paths = config.supported_paths.len(),
            import_behavior = %config.import_behavior,
            "Loaded CUG configuration"
        );
        Ok(config)
    }

    fn parse_paths(value: &str) -> CugResult<Vec<NodePath>> {
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(NodePath::parse)
            .collect()
    }

    fn parse_bool(key: &str, value: &str) -> CugResult<bool> {
        value
            .trim()
            .parse()
            .map_err(|_| CugError::config(format!("Invalid boolean for {key}: {value}")))
    }
}

impl ConfigLayer for CugConfig {
    fn load_from_file(path: &Path) -> Result<Self, CugError> {
        read_config_file(path)
    }

    fn merge_with_env(&mut self) -> Result<(), CugError> {
        if let Ok(enabled) = std::env::var("CUG_ENABLED") {
            self.enabled = Self::parse_bool("CUG_ENABLED", &enabled)?;
        }
        if let Ok(paths) = std::env::var("CUG_SUPPORTED_PATHS") {
            self.supported_paths = Self::parse_paths(&paths)?;
        }
        if let Ok(behavior) = std::env::var("CUG_IMPORT_BEHAVIOR") {
            self.import_behavior = behavior.parse()?;
        }
        Ok(())
    }

    /// Overlay fields of `other` that differ from the defaults
    ///
    /// A field equal to its default counts as unset, so an overlay cannot turn
    /// `enabled` back off, clear `supported_paths` or reset `import_behavior`
    /// to `abort`. Use [`ConfigLayer::set_from_string`] or `CUG_*` variables
    /// for that.
    fn merge_with(&mut self, other: &Self) -> Result<(), CugError> {
        let defaults = Self::default();
        if other.enabled != defaults.enabled {
            self.enabled = other.enabled;
        }
        if other.supported_paths != defaults.supported_paths {
            self.supported_paths = other.supported_paths.clone();
        }
        if other.import_behavior != defaults.import_behavior {
            self.import_behavior = other.import_behavior;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), CugError> {
        if self.enabled && self.supported_paths.is_empty() {
            return Err(CugError::config(
                "CUG support is enabled but no supported paths are configured",
            ));
        }
        Ok(())
    }

    fn set_from_string(&mut self, key: &str, value: &str) -> Result<(), CugError> {
        match key {
            "enabled" => self.enabled = Self::parse_bool(key, value)?,
            "supported-paths" | "supported_paths" => {
                self.supported_paths = Self::parse_paths(value)?;
            }
            "import-behavior" | "import_behavior" => self.import_behavior = value.parse()?,
            _ => {
                return Err(CugError::config(format!(
                    "Unknown configuration key: {key}"
                )))
            }
        }
        Ok(())
    }
}
