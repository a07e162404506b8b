//! Core type definitions with strong typing and validation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Name of the virtual machine instance managed by `limactl`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(try_from = "String", into = "String")]
pub struct InstanceName(pub(crate) String);

impl InstanceName {
    /// Maximum length for instance names
    pub const MAX_LENGTH: usize = 64;

    /// Create a new `InstanceName` with validation
    ///
    /// # Errors
    /// Returns error if the name is empty, too long, or contains invalid characters
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidConfig {
                message: "Instance name cannot be empty".to_string(),
            });
        }

        if name.len() > Self::MAX_LENGTH {
            return Err(Error::InvalidConfig {
                message: format!("Instance name too long (max {} chars)", Self::MAX_LENGTH),
            });
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(Error::InvalidConfig {
                message: "Instance name can only contain alphanumeric, dash, underscore, and dot"
                    .to_string(),
            });
        }

        Ok(())
    }

    /// Get the instance name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for InstanceName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for InstanceName {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}

impl From<InstanceName> for String {
    fn from(name: InstanceName) -> Self {
        name.0
    }
}

/// Virtual machine state as reported by the status probe
///
/// Always derived from a fresh probe; never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VmStatus {
    /// The VM is up
    Running,
    /// The VM exists but is not running
    Stopped,
    /// No instance with that name
    NonExistent,
    /// The probe printed something we do not know
    Unrecognized,
}

impl VmStatus {
    /// Classify the raw probe output.
    ///
    /// Matching is exact and case-sensitive against the literal words
    /// `limactl` prints. The caller is expected to have trimmed the output.
    #[must_use]
    pub fn from_probe_output(raw: &str) -> Self {
        match raw {
            "Running" => Self::Running,
            "Stopped" => Self::Stopped,
            "" => Self::NonExistent,
            _ => Self::Unrecognized,
        }
    }
}

impl fmt::Display for VmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Running => "Running",
            Self::Stopped => "Stopped",
            Self::NonExistent => "Nonexistent",
            Self::Unrecognized => "Unrecognized",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_name_validation() {
        assert!(InstanceName::new("nimbus").is_ok());
        assert!(InstanceName::new("nimbus-dev_2.0").is_ok());
        assert!(InstanceName::new("").is_err());
        assert!(InstanceName::new("a".repeat(65)).is_err());
        assert!(InstanceName::new("bad name").is_err());
        assert!(InstanceName::new("bad/name").is_err());
    }

    #[test]
    fn test_status_exact_match() {
        assert_eq!(VmStatus::from_probe_output("Running"), VmStatus::Running);
        assert_eq!(VmStatus::from_probe_output("Stopped"), VmStatus::Stopped);
        assert_eq!(VmStatus::from_probe_output(""), VmStatus::NonExistent);
        assert_eq!(VmStatus::from_probe_output("Broken"), VmStatus::Unrecognized);
    }

    #[test]
    fn test_status_is_case_sensitive() {
        assert_eq!(VmStatus::from_probe_output("running"), VmStatus::Unrecognized);
        assert_eq!(VmStatus::from_probe_output("STOPPED"), VmStatus::Unrecognized);
        assert_eq!(VmStatus::from_probe_output("Running!"), VmStatus::Unrecognized);
    }
}
