//! `limactl` command adapter

use async_trait::async_trait;
use nimbus_core::{Error, Result, VmConfig};
use std::io::Read;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use tracing::{debug, trace};

use crate::gateway::{CombinedOutput, Command, CommandCreator};

/// Creates commands that run the configured `limactl` binary
///
/// Every argument list handed to [`CommandCreator::create_without_stdio`] is
/// prefixed with the binary, and `LIMA_HOME` is exported when configured.
#[derive(Debug, Clone)]
pub struct LimaCommandCreator {
    /// Binary to execute
    pub(crate) program: PathBuf,

    /// Exported as `LIMA_HOME` to every child
    pub(crate) lima_home: Option<PathBuf>,
}

impl LimaCommandCreator {
    /// Create a creator for the given binary
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            lima_home: None,
        }
    }

    /// Create a creator from the controller configuration
    #[must_use]
    pub fn from_config(config: &VmConfig) -> Self {
        Self {
            program: config.limactl.clone(),
            lima_home: config.lima_home.clone(),
        }
    }

    /// Set `LIMA_HOME` for spawned commands
    #[must_use]
    pub fn with_lima_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.lima_home = Some(home.into());
        self
    }
}

impl CommandCreator for LimaCommandCreator {
    fn create_without_stdio(&self, args: &[&str]) -> Box<dyn Command> {
        Box::new(LimaCommand {
            program: self.program.clone(),
            args: args.iter().map(ToString::to_string).collect(),
            lima_home: self.lima_home.clone(),
        })
    }
}

/// A single `limactl` invocation
#[derive(Debug, Clone)]
pub struct LimaCommand {
    program: PathBuf,
    args: Vec<String>,
    lima_home: Option<PathBuf>,
}

impl LimaCommand {
    /// Command line for logs and errors
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    fn build(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        if let Some(home) = &self.lima_home {
            cmd.env("LIMA_HOME", home);
        }

        cmd
    }

    fn check(&self, status: ExitStatus) -> Result<()> {
        if status.success() {
            return Ok(());
        }

        Err(Error::CommandFailed {
            command: self.command_line(),
            reason: exit_reason(status),
        })
    }

    /// Spawn with stdout and stderr sharing one pipe so the output keeps
    /// the order the tool wrote it in.
    async fn run_combined(&self) -> Result<(Vec<u8>, ExitStatus)> {
        let (mut reader, writer) = std::io::pipe()?;
        let writer_clone = writer.try_clone()?;

        // The builder holds the write ends; it must be dropped before reading
        // or the pipe never reaches EOF.
        let mut child = {
            let mut cmd = self.build();
            cmd.stdout(writer).stderr(writer_clone);
            cmd.spawn()?
        };

        let reader_task = tokio::task::spawn_blocking(move || {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf).map(|_| buf)
        });

        let status = child.wait().await?;
        let output = reader_task.await??;

        Ok((output, status))
    }
}

#[async_trait]
impl Command for LimaCommand {
    async fn output(&mut self) -> Result<Vec<u8>> {
        debug!(command = %self.command_line(), "Running command");

        let output = self.build().output().await?;

        if !output.stderr.is_empty() {
            trace!(
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "Command stderr"
            );
        }

        self.check(output.status)?;
        Ok(output.stdout)
    }

    async fn combined_output(&mut self) -> CombinedOutput {
        debug!(command = %self.command_line(), "Running command (combined output)");

        match self.run_combined().await {
            Ok((output, status)) => CombinedOutput {
                output,
                status: self.check(status),
            },
            Err(e) => CombinedOutput::failure(Vec::new(), e),
        }
    }
}

/// Describe why a process did not succeed
fn exit_reason(status: ExitStatus) -> String {
    status.code().map_or_else(
        || "terminated by signal".to_string(),
        |code| format!("exit status {code}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        let creator = LimaCommandCreator::new("limactl");
        let cmd = LimaCommand {
            program: creator.program.clone(),
            args: vec!["stop".to_string(), "--force".to_string(), "nimbus".to_string()],
            lima_home: None,
        };

        assert_eq!(cmd.command_line(), "limactl stop --force nimbus");
    }

    #[test]
    fn test_from_config() {
        let config = VmConfig::new()
            .with_limactl("/opt/lima/bin/limactl")
            .with_lima_home("/tmp/lima");
        let creator = LimaCommandCreator::from_config(&config);

        assert_eq!(creator.program, PathBuf::from("/opt/lima/bin/limactl"));
        assert_eq!(creator.lima_home, Some(PathBuf::from("/tmp/lima")));
    }

    #[tokio::test]
    async fn test_output_passes_args_in_order() {
        let creator = LimaCommandCreator::new("echo");
        let mut cmd = creator.create_without_stdio(&["ls", "-f", "{{.Status}}", "nimbus"]);

        let out = cmd.output().await.unwrap();
        assert_eq!(String::from_utf8_lossy(&out), "ls -f {{.Status}} nimbus\n");
    }

    #[tokio::test]
    async fn test_output_nonzero_exit() {
        let creator = LimaCommandCreator::new("false");
        let mut cmd = creator.create_without_stdio(&[]);

        let err = cmd.output().await.unwrap_err();
        assert!(matches!(err, Error::CommandFailed { ref reason, .. } if reason == "exit status 1"));
    }

    #[tokio::test]
    async fn test_output_missing_binary() {
        let creator = LimaCommandCreator::new("/nonexistent/limactl");
        let mut cmd = creator.create_without_stdio(&["ls"]);

        assert!(matches!(cmd.output().await, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn test_combined_output_merges_streams() {
        let creator = LimaCommandCreator::new("sh");
        let mut cmd = creator.create_without_stdio(&["-c", "echo out; echo err >&2; exit 3"]);

        let result = cmd.combined_output().await;
        let text = result.output_string();
        assert!(text.contains("out\n"));
        assert!(text.contains("err\n"));
        assert!(matches!(
            result.status,
            Err(Error::CommandFailed { ref reason, .. }) if reason == "exit status 3"
        ));
    }

    #[tokio::test]
    async fn test_lima_home_exported() {
        let creator = LimaCommandCreator::new("sh").with_lima_home("/tmp/nimbus-lima");
        let mut cmd = creator.create_without_stdio(&["-c", "printf %s \"$LIMA_HOME\""]);

        let out = cmd.output().await.unwrap();
        assert_eq!(out, b"/tmp/nimbus-lima");
    }
}
