//! Stop orchestration for the Nimbus virtual machine

use nimbus_core::{Error, InstanceName, Result, VmStatus};
use nimbus_exec::{CombinedOutput, CommandCreator};
use std::sync::Arc;
use tracing::{error, info};

use crate::disk::UserDataDiskManager;
use crate::status::StatusProber;

/// Stops the VM, gracefully or by force
///
/// A `stop` command only reaches `limactl` when force is requested or the
/// instance was probed as [`VmStatus::Running`]. The user data disk is
/// always detached first.
pub struct StopAction {
    creator: Arc<dyn CommandCreator>,
    disk_manager: Arc<dyn UserDataDiskManager>,
    prober: StatusProber,
}

impl StopAction {
    /// Create a stop action for the given instance
    #[must_use]
    pub fn new(
        creator: Arc<dyn CommandCreator>,
        disk_manager: Arc<dyn UserDataDiskManager>,
        instance: InstanceName,
    ) -> Self {
        let prober = StatusProber::new(Arc::clone(&creator), instance);
        Self {
            creator,
            disk_manager,
            prober,
        }
    }

    /// Instance this action stops
    #[must_use]
    pub fn instance(&self) -> &InstanceName {
        self.prober.instance()
    }

    /// Stop the VM.
    ///
    /// With `force`, the status probe is skipped entirely. Otherwise the VM
    /// must be running; any other state returns an error before the disk or
    /// the VM is touched. Errors from `limactl` and the disk manager are
    /// returned unchanged.
    pub async fn run(&self, force: bool) -> Result<()> {
        if force {
            return self.force_stop().await;
        }

        let instance = self.instance().to_string();
        match self.prober.probe().await? {
            VmStatus::Running => {}
            VmStatus::Stopped => return Err(Error::AlreadyStopped { instance }),
            VmStatus::NonExistent => return Err(Error::NotExist { instance }),
            VmStatus::Unrecognized => return Err(Error::UnrecognizedStatus),
        }

        self.disk_manager.detach_user_data_disk().await?;

        info!("Stopping existing Nimbus virtual machine...");
        self.issue_stop(&["stop", self.instance().as_str()]).await?;

        info!("Nimbus virtual machine stopped successfully");
        Ok(())
    }

    async fn force_stop(&self) -> Result<()> {
        self.disk_manager.detach_user_data_disk().await?;

        info!("Forcibly stopping Nimbus virtual machine...");
        self.issue_stop(&["stop", "--force", self.instance().as_str()])
            .await?;

        info!("Nimbus virtual machine stopped successfully");
        Ok(())
    }

    /// Run the stop command; on failure dump the tool's output once at error
    /// level and hand back its error as is.
    async fn issue_stop(&self, args: &[&str]) -> Result<()> {
        let mut cmd = self.creator.create_without_stdio(args);
        let CombinedOutput { output, status } = cmd.combined_output().await;

        if let Err(e) = status {
            error!(
                "Nimbus virtual machine failed to stop, debug logs:\n{}",
                String::from_utf8_lossy(&output)
            );
            return Err(e);
        }

        Ok(())
    }
}

impl std::fmt::Debug for StopAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopAction")
            .field("instance", self.instance())
            .finish_non_exhaustive()
    }
}
