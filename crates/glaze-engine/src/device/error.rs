use std::fmt;

use super::types::{FramebufferStatus, ResourceKind};

/// Errors raised by the resource layer.
///
/// Setup failures are fatal at the call site that detects them; precondition
/// violations are reported before any GPU command is issued. Errors the driver
/// itself detects never show up here, they go through the debug-message log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GfxError {
    /// The driver refused to allocate a resource id.
    ResourceCreation { kind: ResourceKind, message: String },
    /// A buffer slot index past the configured attribute groups.
    SlotOutOfRange { slot: usize, len: usize },
    /// Framebuffer completeness check failed after wiring attachments.
    FramebufferIncomplete(FramebufferStatus),
    /// Decoded pixel data with a channel count outside 1..=4.
    UnsupportedChannels(u8),
    /// Pixel bytes do not cover `width * height * channels`.
    PixelDataSize { expected: u64, actual: usize },
    /// The context does not meet the minimum GL version.
    ContextVersion { major: u32, minor: u32 },
}

impl fmt::Display for GfxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceCreation { kind, message } => {
                write!(f, "failed to create {kind:?}: {message}")
            }
            Self::SlotOutOfRange { slot, len } => {
                write!(f, "buffer slot {slot} out of range (array has {len} slots)")
            }
            Self::FramebufferIncomplete(status) => {
                write!(f, "framebuffer is not complete: {status:?}")
            }
            Self::UnsupportedChannels(n) => {
                write!(f, "unsupported channel count {n} (expected 1..=4)")
            }
            Self::PixelDataSize { expected, actual } => {
                write!(f, "pixel data is {actual} bytes, image needs {expected}")
            }
            Self::ContextVersion { major, minor } => {
                write!(f, "OpenGL {major}.{minor} context is too old")
            }
        }
    }
}

impl std::error::Error for GfxError {}

/// Result alias used across the crate.
pub type Result<T> = anyhow::Result<T>;
