//! CLI argument definitions

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nimbus")]
#[command(about = "Nimbus virtual machine lifecycle controller", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Stop the virtual machine
    Stop {
        /// Forcibly stop the virtual machine
        #[arg(short, long)]
        force: bool,
    },

    /// Show the status of the virtual machine
    Status,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_defaults_to_graceful() {
        let cli = Cli::try_parse_from(["nimbus", "stop"]).unwrap();
        assert!(matches!(cli.command, Commands::Stop { force: false }));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_stop_force_flag() {
        let cli = Cli::try_parse_from(["nimbus", "stop", "--force"]).unwrap();
        assert!(matches!(cli.command, Commands::Stop { force: true }));

        let cli = Cli::try_parse_from(["nimbus", "-v", "stop", "-f"]).unwrap();
        assert!(matches!(cli.command, Commands::Stop { force: true }));
        assert!(cli.verbose);
    }

    #[test]
    fn test_stop_rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["nimbus", "stop", "--now"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
