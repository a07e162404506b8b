//! Command execution gateway with pluggable implementations
//!
//! Everything the VM controller runs goes through [`CommandCreator`], so the
//! orchestration logic never spawns processes directly and can be tested
//! against [`MockCommandCreator`].

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod gateway;
pub mod lima;
pub mod mock;

pub use gateway::{CombinedOutput, Command, CommandCreator};
pub use lima::LimaCommandCreator;
pub use mock::{MockCommandCreator, MockResponse};

// Re-export commonly used types
pub use nimbus_core::{Error, Result};
