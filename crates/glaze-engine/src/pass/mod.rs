//! Multi-pass composition.
//!
//! A frame renders into an offscreen target, then samples the result through
//! a full-screen quad onto the default target.

mod offscreen;
mod shader;

pub use offscreen::{OffscreenConfig, OffscreenPass};
pub use shader::ShaderProgram;
