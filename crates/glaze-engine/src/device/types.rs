//! Plain enums describing GPU objects and commands.
//!
//! These are backend-neutral; `GlowDriver` maps them onto GL enums.

use std::num::NonZeroU32;

/// Raw id of a live GPU resource. Zero is never a valid id.
pub type RawId = NonZeroU32;

/// Binding point of a buffer object.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

/// What kind of GPU object a handle names.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Buffer(BufferTarget),
    VertexArray,
    Framebuffer,
    Renderbuffer,
    Texture,
}

/// Upload usage hint.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum BufferUsage {
    #[default]
    StaticDraw,
    DynamicDraw,
    StreamDraw,
}

/// Component type of a vertex attribute.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AttribType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    HalfFloat,
    Float,
}

impl AttribType {
    /// Size of one component in bytes.
    pub const fn size(self) -> usize {
        match self {
            Self::Byte | Self::UnsignedByte => 1,
            Self::Short | Self::UnsignedShort | Self::HalfFloat => 2,
            Self::Int | Self::UnsignedInt | Self::Float => 4,
        }
    }
}

/// Primitive assembly mode for draw calls.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawMode {
    Points,
    Lines,
    LineStrip,
    LineLoop,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

/// Element type of an index buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IndexType {
    U8,
    U16,
    U32,
}

impl IndexType {
    pub const fn size(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
        }
    }
}

/// Pixel channel layout, used for both internal and external texture formats.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PixelFormat {
    R,
    Rg,
    Rgb,
    Rgba,
}

impl PixelFormat {
    /// Layout matching a decoded image's channel count.
    pub const fn from_channels(channels: u8) -> Option<Self> {
        match channels {
            1 => Some(Self::R),
            2 => Some(Self::Rg),
            3 => Some(Self::Rgb),
            4 => Some(Self::Rgba),
            _ => None,
        }
    }

    pub const fn channels(self) -> u8 {
        match self {
            Self::R => 1,
            Self::Rg => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// Component type of texture pixel data.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PixelType {
    UnsignedByte,
    Float,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    Nearest,
    #[default]
    Linear,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Wrap {
    #[default]
    Clamp,
    ClampToBorder,
    Repeat,
    MirroredRepeat,
}

/// Sampler state applied to a bound texture.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SamplerParams {
    pub min_filter: Filter,
    pub mag_filter: Filter,
    pub wrap: Wrap,
    /// Minification samples between mip levels.
    pub mipmapped: bool,
}

/// Storage format of a renderbuffer.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum RenderBufferFormat {
    #[default]
    Depth24Stencil8,
    Depth32FStencil8,
    Depth24,
    Depth32F,
    Stencil8,
}

/// Named slot on a framebuffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attachment {
    Color(u32),
    Depth,
    Stencil,
    DepthStencil,
}

/// Result of a framebuffer completeness query.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FramebufferStatus {
    Complete,
    Undefined,
    IncompleteAttachment,
    MissingAttachment,
    IncompleteDrawBuffer,
    IncompleteReadBuffer,
    Unsupported,
    IncompleteMultisample,
    Unknown(u32),
}

impl FramebufferStatus {
    pub fn is_complete(self) -> bool {
        self == Self::Complete
    }
}

/// Buffers affected by a clear.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ClearFlags(u32);

impl ClearFlags {
    pub const COLOR: Self = Self(1 << 0);
    pub const DEPTH: Self = Self(1 << 1);
    pub const STENCIL: Self = Self(1 << 2);

    pub fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for ClearFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// Converts a size or offset to the `GLint`/`GLsizei` the driver takes.
///
/// GL cannot express values above `i32::MAX`; those saturate, and trip an
/// assertion in debug builds.
pub(crate) fn gl_int(value: u64) -> i32 {
    debug_assert!(
        value <= i32::MAX as u64,
        "{value} does not fit in a GL integer"
    );
    i32::try_from(value).unwrap_or(i32::MAX)
}
