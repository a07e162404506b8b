//! Virtual machine status probe

use nimbus_core::{InstanceName, Result, VmStatus};
use nimbus_exec::CommandCreator;
use std::sync::Arc;
use tracing::debug;

/// Go template asking `limactl ls` for the status column only
pub const STATUS_FORMAT: &str = "{{.Status}}";

/// Queries `limactl` for the state of one instance
#[derive(Clone)]
pub struct StatusProber {
    creator: Arc<dyn CommandCreator>,
    instance: InstanceName,
}

impl StatusProber {
    /// Create a prober for the given instance
    #[must_use]
    pub fn new(creator: Arc<dyn CommandCreator>, instance: InstanceName) -> Self {
        Self { creator, instance }
    }

    /// Instance being probed
    #[must_use]
    pub fn instance(&self) -> &InstanceName {
        &self.instance
    }

    /// Run `ls -f {{.Status}} <instance>` and classify the result.
    ///
    /// The status is never cached; every call runs the command again.
    /// Gateway errors are returned unchanged.
    pub async fn probe(&self) -> Result<VmStatus> {
        let mut cmd =
            self.creator
                .create_without_stdio(&["ls", "-f", STATUS_FORMAT, self.instance.as_str()]);
        let output = cmd.output().await?;

        let raw = String::from_utf8_lossy(&output);
        let raw = raw.trim();
        debug!("Status of virtual machine: {}", raw);

        Ok(VmStatus::from_probe_output(raw))
    }
}

impl std::fmt::Debug for StatusProber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusProber")
            .field("instance", &self.instance)
            .finish_non_exhaustive()
    }
}
