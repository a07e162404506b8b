//! Gateway traits for building and running external commands

use async_trait::async_trait;
use nimbus_core::Result;

/// Merged stdout and stderr of a finished command, plus its outcome.
///
/// The bytes are kept even when `status` is an error so callers can surface
/// the tool's own diagnostics.
#[derive(Debug)]
pub struct CombinedOutput {
    /// Interleaved stdout and stderr, in the order they were written
    pub output: Vec<u8>,
    /// `Ok(())` if the command ran and exited successfully
    pub status: Result<()>,
}

impl CombinedOutput {
    /// Successful run with the given output
    #[must_use]
    pub fn success(output: impl Into<Vec<u8>>) -> Self {
        Self {
            output: output.into(),
            status: Ok(()),
        }
    }

    /// Failed run with the given output
    #[must_use]
    pub fn failure(output: impl Into<Vec<u8>>, error: nimbus_core::Error) -> Self {
        Self {
            output: output.into(),
            status: Err(error),
        }
    }

    /// Output as lossy UTF-8
    #[must_use]
    pub fn output_string(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

/// A prepared external command
///
/// Each command is meant to be run once, with either [`Command::output`] or
/// [`Command::combined_output`].
#[async_trait]
pub trait Command: Send {
    /// Run the command and capture standard output only
    ///
    /// # Errors
    /// Returns error if the process cannot be spawned or exits unsuccessfully
    async fn output(&mut self) -> Result<Vec<u8>>;

    /// Run the command and capture standard output and error together
    async fn combined_output(&mut self) -> CombinedOutput;
}

/// Factory for commands against the VM tool
///
/// This allows for different implementations:
/// - [`LimaCommandCreator`](crate::LimaCommandCreator) - Spawns `limactl`
/// - [`MockCommandCreator`](crate::MockCommandCreator) - Scripted responses for tests
///
/// # Thread Safety
/// All implementations must be `Send + Sync` so they can be shared behind an `Arc`.
pub trait CommandCreator: Send + Sync {
    /// Create a command with stdin closed and no terminal passthrough
    fn create_without_stdio(&self, args: &[&str]) -> Box<dyn Command>;
}
