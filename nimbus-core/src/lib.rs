//! Nimbus Core - Foundation types, errors, and configuration
//!
//! This crate provides the core abstractions shared by the Nimbus VM tooling.

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod types;

pub use config::VmConfig;
pub use error::{Error, Result};
pub use types::{InstanceName, VmStatus};
