//! Glaze engine crate.
//!
//! Move-only wrappers over OpenGL objects plus a small offscreen
//! post-processing pass built on top of them.

pub mod device;
pub mod logging;
pub mod pass;
pub mod resource;

#[cfg(test)]
mod testing;

pub use device::{GfxError, GlInit, GpuContext, Result};
pub use pass::{OffscreenConfig, OffscreenPass, ShaderProgram};
