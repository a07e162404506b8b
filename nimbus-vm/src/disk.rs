//! User data disk management

use async_trait::async_trait;
use nimbus_core::{Error, Result};
use nimbus_exec::CommandCreator;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Detaches the persistent user data disk from the VM
///
/// Called before every stop so the disk is never left locked to an instance
/// that is going away.
#[async_trait]
pub trait UserDataDiskManager: Send + Sync {
    /// Release the disk from its instance
    ///
    /// # Errors
    /// Returns error if the disk cannot be inspected or unlocked
    async fn detach_user_data_disk(&self) -> Result<()>;
}

/// One entry of `limactl disk ls --json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LimaDisk {
    /// Disk name
    pub name: String,
    /// Instance currently holding the disk, empty if unlocked
    pub instance: String,
    /// Mount point inside the VM
    pub mount_point: String,
}

/// Disk manager that drives `limactl disk`
#[derive(Clone)]
pub struct LimaDiskManager {
    creator: Arc<dyn CommandCreator>,
    disk: String,
}

impl LimaDiskManager {
    /// Create a manager for the named disk
    #[must_use]
    pub fn new(creator: Arc<dyn CommandCreator>, disk: impl Into<String>) -> Self {
        Self {
            creator,
            disk: disk.into(),
        }
    }

    /// Look the disk up; `None` if `limactl` does not list it
    async fn find_disk(&self) -> Result<Option<LimaDisk>> {
        let mut cmd = self
            .creator
            .create_without_stdio(&["disk", "ls", self.disk.as_str(), "--json"]);
        let output = cmd.output().await?;

        parse_disk_listing(&output, &self.disk)
    }
}

#[async_trait]
impl UserDataDiskManager for LimaDiskManager {
    async fn detach_user_data_disk(&self) -> Result<()> {
        let Some(disk) = self.find_disk().await? else {
            debug!(disk = %self.disk, "User data disk not found, nothing to detach");
            return Ok(());
        };

        if disk.instance.is_empty() {
            debug!(disk = %disk.name, "User data disk is not attached");
            return Ok(());
        }

        info!(disk = %disk.name, instance = %disk.instance, "Detaching user data disk");

        let mut cmd = self
            .creator
            .create_without_stdio(&["disk", "unlock", self.disk.as_str()]);
        let result = cmd.combined_output().await;
        let output = result.output_string();

        if let Err(e) = result.status {
            return Err(Error::Disk {
                message: format!("failed to detach {}: {}: {}", self.disk, e, output.trim()),
            });
        }

        Ok(())
    }
}

impl std::fmt::Debug for LimaDiskManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LimaDiskManager")
            .field("disk", &self.disk)
            .finish_non_exhaustive()
    }
}

/// Parse newline-delimited JSON from `disk ls --json`
fn parse_disk_listing(output: &[u8], name: &str) -> Result<Option<LimaDisk>> {
    let text = String::from_utf8_lossy(output);

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let disk: LimaDisk = serde_json::from_str(line)?;
        if disk.name == name {
            return Ok(Some(disk));
        }
    }

    Ok(None)
}

/// Mock disk manager for testing
#[derive(Clone, Default)]
pub struct MockDiskManager {
    state: Arc<Mutex<MockDiskState>>,
}

#[derive(Default)]
struct MockDiskState {
    detach_calls: usize,
    failure: Option<String>,
}

impl MockDiskManager {
    /// Create a mock that always detaches successfully
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose detach fails with a `Disk` error
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockDiskState {
                detach_calls: 0,
                failure: Some(message.into()),
            })),
        }
    }

    /// Number of detach requests received
    pub async fn detach_calls(&self) -> usize {
        self.state.lock().await.detach_calls
    }
}

impl std::fmt::Debug for MockDiskManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockDiskManager").finish_non_exhaustive()
    }
}

#[async_trait]
impl UserDataDiskManager for MockDiskManager {
    async fn detach_user_data_disk(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        state.detach_calls += 1;

        tracing::debug!(calls = state.detach_calls, "Mock: Detach user data disk");

        match &state.failure {
            Some(message) => Err(Error::Disk {
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}
