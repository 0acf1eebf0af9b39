use std::path::Path;

use anyhow::Context as _;

use crate::device::{
    Filter, GfxError, GpuContext, PixelFormat, PixelType, RawId, ResourceKind, Result,
    SamplerParams, Wrap,
};

use super::handle::GpuHandle;

/// Decoded image pixels, tightly packed rows, top row first.
#[derive(Debug, Clone)]
pub struct PixelData {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub bytes: Vec<u8>,
}

impl PixelData {
    /// Bytes an image of this size and channel count occupies.
    pub fn byte_len(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height) * u64::from(self.channels)
    }
}

/// Sampling options for textures created from images.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TextureOptions {
    pub min_filter: Filter,
    pub mag_filter: Filter,
    pub wrap: Wrap,
    pub mipmaps: bool,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            min_filter: Filter::Linear,
            mag_filter: Filter::Linear,
            wrap: Wrap::Repeat,
            mipmaps: true,
        }
    }
}

/// Full description of a texture's storage and sampling.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TextureDesc {
    pub width: u32,
    pub height: u32,
    pub internal_format: PixelFormat,
    pub format: PixelFormat,
    pub pixel_type: PixelType,
    pub min_filter: Filter,
    pub mag_filter: Filter,
    pub wrap: Wrap,
    pub mipmaps: bool,
}

impl TextureDesc {
    /// Linear, clamped, no mipmaps: the usual render-target color surface.
    pub fn render_target(width: u32, height: u32, format: PixelFormat, pixel_type: PixelType) -> Self {
        Self {
            width,
            height,
            internal_format: format,
            format,
            pixel_type,
            min_filter: Filter::Linear,
            mag_filter: Filter::Linear,
            wrap: Wrap::Clamp,
            mipmaps: false,
        }
    }

    fn sampler(&self) -> SamplerParams {
        SamplerParams {
            min_filter: self.min_filter,
            mag_filter: self.mag_filter,
            wrap: self.wrap,
            mipmapped: self.mipmaps,
        }
    }
}

/// A sampleable 2-D texture.
///
/// Content and size are fixed at creation; a resized surface means a new
/// texture.
#[derive(Debug)]
pub struct Texture {
    handle: GpuHandle,
    desc: TextureDesc,
}

impl Texture {
    /// Allocates storage with no initial pixels, for use as an attachment.
    pub fn empty(ctx: &GpuContext, desc: TextureDesc) -> Result<Self> {
        Self::create(ctx, desc, None)
    }

    /// Uploads already-decoded 8-bit pixels.
    ///
    /// `bytes` must hold exactly `width * height * channels` bytes.
    pub fn from_pixels(ctx: &GpuContext, pixels: &PixelData, options: &TextureOptions) -> Result<Self> {
        let format = PixelFormat::from_channels(pixels.channels)
            .ok_or(GfxError::UnsupportedChannels(pixels.channels))?;
        let expected = pixels.byte_len();
        if expected != pixels.bytes.len() as u64 {
            return Err(GfxError::PixelDataSize {
                expected,
                actual: pixels.bytes.len(),
            }
            .into());
        }
        let desc = TextureDesc {
            width: pixels.width,
            height: pixels.height,
            internal_format: format,
            format,
            pixel_type: PixelType::UnsignedByte,
            min_filter: options.min_filter,
            mag_filter: options.mag_filter,
            wrap: options.wrap,
            mipmaps: options.mipmaps,
        };
        Self::create(ctx, desc, Some(&pixels.bytes))
    }

    /// Decodes an encoded image (PNG, JPEG, ...) into RGBA8 and uploads it.
    pub fn from_image_bytes(ctx: &GpuContext, bytes: &[u8], options: &TextureOptions) -> Result<Self> {
        let pixels = decode_rgba8(bytes)?;
        Self::from_pixels(ctx, &pixels, options)
    }

    pub fn from_path(ctx: &GpuContext, path: impl AsRef<Path>, options: &TextureOptions) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("failed to read texture {}", path.display()))?;
        Self::from_image_bytes(ctx, &bytes, options)
            .with_context(|| format!("failed to load texture {}", path.display()))
    }

    fn create(ctx: &GpuContext, desc: TextureDesc, pixels: Option<&[u8]>) -> Result<Self> {
        let handle = GpuHandle::create(ctx, ResourceKind::Texture)?;
        handle.bind();

        let driver = ctx.driver();
        driver.tex_image_2d(
            desc.width,
            desc.height,
            desc.internal_format,
            desc.format,
            desc.pixel_type,
            pixels,
        );
        driver.tex_parameters(desc.sampler());
        if desc.mipmaps {
            driver.generate_mipmap();
        }

        log::debug!(
            "texture #{} {}x{} {:?}{}",
            handle.id(),
            desc.width,
            desc.height,
            desc.internal_format,
            if pixels.is_some() { "" } else { " (empty)" }
        );
        Ok(Self { handle, desc })
    }

    #[inline]
    pub fn raw_id(&self) -> RawId {
        self.handle.id()
    }

    pub fn desc(&self) -> &TextureDesc {
        &self.desc
    }

    pub fn size(&self) -> (u32, u32) {
        (self.desc.width, self.desc.height)
    }

    /// Binds on sampler `unit`. The shader must sample from the same unit.
    pub fn bind(&self, unit: u32) {
        self.handle.context().driver().active_texture(unit);
        self.handle.bind();
    }
}

fn decode_rgba8(bytes: &[u8]) -> Result<PixelData> {
    let image = image::load_from_memory(bytes).context("failed to decode image")?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(PixelData {
        width,
        height,
        channels: 4,
        bytes: rgba.into_raw(),
    })
}
