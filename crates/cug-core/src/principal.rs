//! Principal names

use crate::{CugError, CugResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of the principal every subject is a member of
pub const EVERYONE: &str = "everyone";

/// Non-empty name of a user or group principal
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PrincipalName(String);

impl PrincipalName {
    /// Create a principal name, rejecting empty or blank names
    pub fn new(name: impl Into<String>) -> CugResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CugError::invalid_principal(name));
        }
        Ok(Self(name))
    }

    /// The `everyone` principal
    pub fn everyone() -> Self {
        Self(EVERYONE.to_string())
    }

    /// Whether this is the `everyone` principal
    pub fn is_everyone(&self) -> bool {
        self.0 == EVERYONE
    }

    /// Name string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrincipalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PrincipalName {
    type Err = CugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PrincipalName {
    type Error = CugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PrincipalName> for String {
    fn from(name: PrincipalName) -> Self {
        name.0
    }
}
