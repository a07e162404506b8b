//! Stop command implementation

use anyhow::Result;
use nimbus_core::VmConfig;
use nimbus_vm::{LimaDiskManager, StopAction};
use std::sync::Arc;

pub async fn execute(config: &VmConfig, force: bool) -> Result<()> {
    tracing::debug!(instance = %config.instance, force, "Stopping virtual machine");

    let creator = super::command_creator(config);
    let disk_manager = Arc::new(LimaDiskManager::new(
        Arc::clone(&creator),
        config.user_data_disk.clone(),
    ));

    StopAction::new(creator, disk_manager, config.instance.clone())
        .run(force)
        .await?;

    Ok(())
}
