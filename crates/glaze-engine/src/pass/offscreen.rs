use anyhow::Context as _;

use crate::device::{
    Attachment, ClearFlags, Filter, GpuContext, PixelFormat, PixelType, RenderBufferFormat, Result,
};
use crate::resource::{
    DefaultTarget, FrameBuffer, Quad, RenderBuffer, RenderTarget, Texture, TextureDesc,
};

use super::shader::ShaderProgram;

/// Configuration for an `OffscreenPass`.
#[derive(Debug, Clone)]
pub struct OffscreenConfig {
    pub width: u32,
    pub height: u32,

    /// Layout of the color attachment; also used as its internal format.
    pub color_format: PixelFormat,
    pub color_pixel_type: PixelType,

    pub depth_format: RenderBufferFormat,

    /// Filtering used when the second pass samples the color attachment.
    pub filter: Filter,

    /// Clear color for both the offscreen and the default target.
    pub clear_color: [f32; 4],

    /// Name of the scalar time uniform pushed in `present`, if any.
    pub time_uniform: Option<String>,
}

impl Default for OffscreenConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            color_format: PixelFormat::Rgb,
            color_pixel_type: PixelType::Float,
            depth_format: RenderBufferFormat::Depth24Stencil8,
            filter: Filter::Linear,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            time_uniform: Some("t".to_owned()),
        }
    }
}

/// Render-to-texture followed by a full-screen post-process draw.
///
/// ```ignore
/// pass.begin();
/// scene_shader.bind();
/// scene_texture.bind(0);
/// scene.draw_elements(DrawMode::Triangles, 3, IndexType::U32, 0);
/// pass.present(&screen_shader, elapsed);
/// ```
#[derive(Debug)]
pub struct OffscreenPass {
    // Declared first so it drops before the surfaces it references.
    framebuffer: FrameBuffer,
    color: Texture,
    depth: RenderBuffer,
    quad: Quad,
    screen: DefaultTarget,
    ctx: GpuContext,
    config: OffscreenConfig,
}

impl OffscreenPass {
    /// Builds and validates the offscreen target, then rebinds the default target.
    pub fn new(ctx: &GpuContext, config: OffscreenConfig) -> Result<Self> {
        let (width, height) = (config.width, config.height);

        let mut color_desc =
            TextureDesc::render_target(width, height, config.color_format, config.color_pixel_type);
        color_desc.min_filter = config.filter;
        color_desc.mag_filter = config.filter;
        let color = Texture::empty(ctx, color_desc).context("failed to create color attachment")?;
        let depth = RenderBuffer::new(ctx, width, height, config.depth_format)
            .context("failed to create depth-stencil attachment")?;

        let mut framebuffer = FrameBuffer::new(ctx, width, height)?;
        framebuffer.attach(&color, Attachment::Color(0));
        framebuffer.attach(&depth, depth_attachment(config.depth_format));
        framebuffer
            .ensure_complete()
            .with_context(|| format!("offscreen target {width}x{height} is unusable"))?;

        let quad = Quad::new(ctx)?;
        let screen = ctx.default_target();
        screen.bind();

        log::debug!("offscreen pass ready ({width}x{height})");
        Ok(Self {
            framebuffer,
            color,
            depth,
            quad,
            screen,
            ctx: ctx.clone(),
            config,
        })
    }

    /// Redirects drawing into the offscreen target and clears it.
    pub fn begin(&self) {
        let ctx = &self.ctx;
        self.framebuffer.bind();
        ctx.viewport(0, 0, self.config.width, self.config.height);
        ctx.clear_color(self.config.clear_color);
        ctx.clear(ClearFlags::COLOR | ClearFlags::DEPTH);
    }

    /// Draws the offscreen color buffer onto the default target through `shader`.
    ///
    /// The color texture is bound on unit 0; `shader` must sample unit 0.
    pub fn present(&self, shader: &dyn ShaderProgram, time: f32) {
        let ctx = &self.ctx;
        self.screen.bind();
        ctx.clear_color(self.config.clear_color);
        ctx.clear(ClearFlags::COLOR);

        shader.bind();
        if let Some(name) = &self.config.time_uniform {
            shader.set_uniform_f32(name, time);
        }
        self.color.bind(0);
        self.quad.draw();
    }

    /// Recreates every attachment at the new size.
    ///
    /// On failure the current resources are kept.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if (width, height) == self.size() {
            return Ok(());
        }
        let config = OffscreenConfig {
            width,
            height,
            ..self.config.clone()
        };
        *self = Self::new(&self.ctx, config)?;
        Ok(())
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn color_texture(&self) -> &Texture {
        &self.color
    }

    pub fn depth_buffer(&self) -> &RenderBuffer {
        &self.depth
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn config(&self) -> &OffscreenConfig {
        &self.config
    }
}

fn depth_attachment(format: RenderBufferFormat) -> Attachment {
    match format {
        RenderBufferFormat::Depth24Stencil8 | RenderBufferFormat::Depth32FStencil8 => {
            Attachment::DepthStencil
        }
        RenderBufferFormat::Depth24 | RenderBufferFormat::Depth32F => Attachment::Depth,
        RenderBufferFormat::Stencil8 => Attachment::Stencil,
    }
}
