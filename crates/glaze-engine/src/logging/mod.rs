//! Logging utilities.
//!
//! Logger setup plus the bridge that turns driver debug messages into `log`
//! records. Everything else in the crate logs through the `log` facade only.

mod driver;
mod init;

pub use driver::{forward_driver_message, DebugSeverity, DRIVER_TARGET};
pub use init::{init_logging, LoggingConfig};
