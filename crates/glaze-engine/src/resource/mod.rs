//! Move-only GPU resource wrappers.
//!
//! Every type here owns its GPU objects through `GpuHandle` and releases them
//! on drop. Nothing tracks or restores binding state: each operation binds
//! what it needs and leaves it bound.

mod array;
mod attribute;
mod buffer;
mod handle;
mod quad;
mod target;
mod texture;

pub use array::BufferArray;
pub use attribute::AttributeDescriptor;
pub use buffer::{AttributedBuffer, Buffer};
pub use handle::GpuHandle;
pub use quad::Quad;
pub use target::{
    Attachable, AttachedSurface, DefaultTarget, FrameBuffer, RenderBuffer, RenderTarget, SurfaceKind,
};
pub use texture::{PixelData, Texture, TextureDesc, TextureOptions};
