//! Status command implementation

use anyhow::Result;
use nimbus_core::{Error, VmConfig, VmStatus};
use nimbus_vm::StatusProber;

pub async fn execute(config: &VmConfig) -> Result<()> {
    let prober = StatusProber::new(super::command_creator(config), config.instance.clone());

    match prober.probe().await? {
        VmStatus::Unrecognized => Err(Error::UnrecognizedStatus.into()),
        status => {
            println!("{status}");
            Ok(())
        }
    }
}
