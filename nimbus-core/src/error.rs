//! Error types for Nimbus

use thiserror::Error;

/// Nimbus error types
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// External command ran but did not succeed
    #[error("command `{command}` failed: {reason}")]
    CommandFailed {
        /// Command line that was executed
        command: String,
        /// Exit status or termination reason
        reason: String,
    },

    /// The instance is already stopped
    #[error("the instance {instance:?} is already stopped")]
    AlreadyStopped {
        /// Instance name
        instance: String,
    },

    /// The instance does not exist
    #[error("the instance {instance:?} does not exist")]
    NotExist {
        /// Instance name
        instance: String,
    },

    /// Status probe returned something we cannot classify
    #[error("unrecognized system status")]
    UnrecognizedStatus,

    /// User data disk operation failed
    #[error("Disk error: {message}")]
    Disk {
        /// Error message
        message: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Error message
        message: String,
    },

    /// Malformed JSON from an external tool
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Task join error
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Result type alias for Nimbus operations
pub type Result<T> = std::result::Result<T, Error>;
