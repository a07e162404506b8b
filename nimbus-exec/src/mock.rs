//! Scripted gateway for testing (never spawns a process)

use async_trait::async_trait;
use nimbus_core::{Error, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::gateway::{CombinedOutput, Command, CommandCreator};

/// Canned result for one expected command
#[derive(Debug)]
pub enum MockResponse {
    /// Result returned from [`Command::output`]
    Output(Result<Vec<u8>>),
    /// Result returned from [`Command::combined_output`]
    Combined(CombinedOutput),
}

impl MockResponse {
    /// `output()` succeeds with the given stdout
    #[must_use]
    pub fn stdout(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Output(Ok(bytes.into()))
    }

    /// `output()` fails with the given error
    #[must_use]
    pub fn output_error(error: Error) -> Self {
        Self::Output(Err(error))
    }

    /// `combined_output()` succeeds with the given bytes
    #[must_use]
    pub fn combined(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Combined(CombinedOutput::success(bytes))
    }

    /// `combined_output()` fails with the given bytes and error
    #[must_use]
    pub fn combined_error(bytes: impl Into<Vec<u8>>, error: Error) -> Self {
        Self::Combined(CombinedOutput::failure(bytes, error))
    }
}

/// Mock command creator
///
/// Expectations are consumed in order. Every created argument list is
/// recorded, including ones that matched no expectation; those commands fail
/// when run.
///
/// # Example
/// ```
/// use nimbus_exec::{CommandCreator, MockCommandCreator, MockResponse};
///
/// # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// # rt.block_on(async {
/// let creator = MockCommandCreator::new();
/// creator.expect(&["ls", "-f", "{{.Status}}", "nimbus"], MockResponse::stdout("Running"));
///
/// let mut cmd = creator.create_without_stdio(&["ls", "-f", "{{.Status}}", "nimbus"]);
/// assert_eq!(cmd.output().await.unwrap(), b"Running");
/// assert!(creator.is_satisfied());
/// # });
/// ```
#[derive(Clone)]
pub struct MockCommandCreator {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<(Vec<String>, MockResponse)>,
    invocations: Vec<Vec<String>>,
}

impl MockCommandCreator {
    /// Create a mock with no expectations
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue the response for the next command with exactly these args
    pub fn expect(&self, args: &[&str], response: MockResponse) -> &Self {
        self.lock()
            .expectations
            .push_back((to_owned_args(args), response));
        self
    }

    /// Every argument list passed to `create_without_stdio`, in call order
    #[must_use]
    pub fn invocations(&self) -> Vec<Vec<String>> {
        self.lock().invocations.clone()
    }

    /// Number of commands created
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.lock().invocations.len()
    }

    /// Whether every queued expectation was consumed
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.lock().expectations.is_empty()
    }
}

impl Default for MockCommandCreator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MockCommandCreator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockCommandCreator").finish_non_exhaustive()
    }
}

impl CommandCreator for MockCommandCreator {
    fn create_without_stdio(&self, args: &[&str]) -> Box<dyn Command> {
        let args = to_owned_args(args);
        let mut state = self.lock();
        state.invocations.push(args.clone());

        let matches_next = state
            .expectations
            .front()
            .is_some_and(|(expected, _)| *expected == args);
        let response = if matches_next {
            state.expectations.pop_front().map(|(_, response)| response)
        } else {
            None
        };

        tracing::debug!(
            args = ?args,
            matched = response.is_some(),
            "Mock: Created command"
        );

        Box::new(MockCommand { args, response })
    }
}

/// Command produced by [`MockCommandCreator`]
#[derive(Debug)]
pub struct MockCommand {
    args: Vec<String>,
    response: Option<MockResponse>,
}

impl MockCommand {
    fn unexpected(&self, what: &str) -> Error {
        Error::CommandFailed {
            command: self.args.join(" "),
            reason: format!("mock: unexpected {what}"),
        }
    }
}

#[async_trait]
impl Command for MockCommand {
    async fn output(&mut self) -> Result<Vec<u8>> {
        match self.response.take() {
            Some(MockResponse::Output(result)) => result,
            Some(other) => {
                self.response = Some(other);
                Err(self.unexpected("call to output()"))
            }
            None => Err(self.unexpected("command")),
        }
    }

    async fn combined_output(&mut self) -> CombinedOutput {
        match self.response.take() {
            Some(MockResponse::Combined(result)) => result,
            Some(other) => {
                self.response = Some(other);
                CombinedOutput::failure(Vec::new(), self.unexpected("call to combined_output()"))
            }
            None => CombinedOutput::failure(Vec::new(), self.unexpected("command")),
        }
    }
}

fn to_owned_args(args: &[&str]) -> Vec<String> {
    args.iter().map(ToString::to_string).collect()
}
