//! VM controller configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{InstanceName, Result};

/// Default instance and user data disk name
pub const DEFAULT_INSTANCE: &str = "nimbus";

/// Default `limactl` binary, resolved through `PATH`
pub const DEFAULT_LIMACTL: &str = "limactl";

/// Environment variable overriding the instance name
pub const ENV_INSTANCE: &str = "NIMBUS_INSTANCE";
/// Environment variable overriding the `limactl` binary
pub const ENV_LIMACTL: &str = "NIMBUS_LIMACTL";
/// Environment variable pointing `limactl` at its state directory
pub const ENV_LIMA_HOME: &str = "LIMA_HOME";
/// Environment variable overriding the user data disk name
pub const ENV_USER_DATA_DISK: &str = "NIMBUS_USER_DATA_DISK";

/// Configuration for the VM controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmConfig {
    /// Instance to operate on
    pub instance: InstanceName,

    /// `limactl` binary used for every external command
    pub limactl: PathBuf,

    /// `LIMA_HOME` exported to child processes, if set
    pub lima_home: Option<PathBuf>,

    /// Name of the persistent user data disk
    pub user_data_disk: String,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            instance: InstanceName(DEFAULT_INSTANCE.to_string()),
            limactl: PathBuf::from(DEFAULT_LIMACTL),
            lima_home: None,
            user_data_disk: DEFAULT_INSTANCE.to_string(),
        }
    }
}

impl VmConfig {
    /// Create a configuration with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the process environment
    ///
    /// # Errors
    /// Returns error if `NIMBUS_INSTANCE` is not a valid instance name
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; empty values are ignored
    ///
    /// # Errors
    /// Returns error if the instance name is invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(instance) = get(ENV_INSTANCE) {
            config = config.with_instance(InstanceName::new(instance)?);
        }
        if let Some(limactl) = get(ENV_LIMACTL) {
            config = config.with_limactl(limactl);
        }
        if let Some(home) = get(ENV_LIMA_HOME) {
            config = config.with_lima_home(home);
        }
        if let Some(disk) = get(ENV_USER_DATA_DISK) {
            config = config.with_user_data_disk(disk);
        }

        tracing::debug!(
            instance = %config.instance,
            limactl = %config.limactl.display(),
            "Loaded VM configuration"
        );

        Ok(config)
    }

    /// Set the instance name
    #[must_use]
    pub fn with_instance(mut self, instance: InstanceName) -> Self {
        self.instance = instance;
        self
    }

    /// Set the `limactl` binary
    #[must_use]
    pub fn with_limactl(mut self, limactl: impl Into<PathBuf>) -> Self {
        self.limactl = limactl.into();
        self
    }

    /// Set `LIMA_HOME`
    #[must_use]
    pub fn with_lima_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.lima_home = Some(home.into());
        self
    }

    /// Set the user data disk name
    #[must_use]
    pub fn with_user_data_disk(mut self, disk: impl Into<String>) -> Self {
        self.user_data_disk = disk.into();
        self
    }
}
