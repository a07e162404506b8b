use crate::cli::Commands;
use anyhow::Result;
use nimbus_core::VmConfig;
use nimbus_exec::{CommandCreator, LimaCommandCreator};
use std::sync::Arc;

pub mod status;
pub mod stop;

/// Dispatch command to appropriate handler
pub async fn dispatch(command: Commands) -> Result<()> {
    let config = VmConfig::from_env()?;

    match command {
        Commands::Stop { force } => stop::execute(&config, force).await,
        Commands::Status => status::execute(&config).await,
    }
}

/// Gateway that runs the configured `limactl`
fn command_creator(config: &VmConfig) -> Arc<dyn CommandCreator> {
    Arc::new(LimaCommandCreator::from_config(config))
}
