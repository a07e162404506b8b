//! Lifecycle control for the Nimbus virtual machine
//!
//! This crate decides whether and how to stop the VM:
//! - [`StatusProber`] - Reads the instance state from `limactl ls`
//! - [`StopAction`] - Validates state, detaches the user data disk, stops the VM
//! - [`UserDataDiskManager`] - Detaches the persistent disk before shutdown

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod disk;
pub mod status;
pub mod stop;

pub use disk::{LimaDiskManager, MockDiskManager, UserDataDiskManager};
pub use status::StatusProber;
pub use stop::StopAction;
