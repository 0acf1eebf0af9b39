//! GPU driver access.
//!
//! This module is responsible for:
//! - the `Driver` seam every resource issues its commands through
//! - the shared `GpuContext` handle resources keep for teardown
//! - the `glow`-backed production driver
//! - backend-neutral enums and the crate error type

mod context;
mod driver;
mod error;
#[cfg(not(target_arch = "wasm32"))]
mod glow_driver;
mod init;
mod types;

pub use context::GpuContext;
pub use driver::Driver;
pub use error::{GfxError, Result};
#[cfg(not(target_arch = "wasm32"))]
pub use glow_driver::GlowDriver;
pub use init::GlInit;
pub use types::*;
