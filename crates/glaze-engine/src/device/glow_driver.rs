use std::ffi::c_void;

use anyhow::ensure;
use glow::HasContext;

use super::driver::Driver;
use super::error::{GfxError, Result};
use super::init::GlInit;
use super::types::*;
use crate::logging::{forward_driver_message, DebugSeverity};

/// `Driver` backed by a current OpenGL context through `glow`.
///
/// The context must stay current on the calling thread for the lifetime of
/// this value and of every resource created from it.
pub struct GlowDriver {
    gl: glow::Context,
}

impl GlowDriver {
    /// Wraps an existing context.
    ///
    /// Fails if the context is older than `init.min_version`.
    pub fn new(mut gl: glow::Context, init: &GlInit) -> Result<Self> {
        let version = gl.version();
        let (major, minor) = (version.major, version.minor);
        let (min_major, min_minor) = init.min_version;
        ensure!(
            (major, minor) >= (min_major, min_minor),
            GfxError::ContextVersion { major, minor }
        );
        log::info!(
            "OpenGL {major}.{minor}{} ({})",
            if version.is_embedded { " ES" } else { "" },
            version.vendor_info
        );

        if init.debug_output {
            if gl.supports_debug() {
                // SAFETY: the caller guarantees the context is current.
                unsafe {
                    gl.enable(glow::DEBUG_OUTPUT);
                    if init.synchronous_debug {
                        gl.enable(glow::DEBUG_OUTPUT_SYNCHRONOUS);
                    }
                    gl.debug_message_callback(|source, kind, id, severity, message| {
                        forward_driver_message(source, kind, id, map_severity(severity), message);
                    });
                }
                log::debug!("driver debug output enabled");
            } else {
                log::warn!("debug output requested but not supported by this context");
            }
        }

        Ok(Self { gl })
    }

    /// Loads GL entry points and wraps the resulting context.
    ///
    /// # Safety
    /// A context must be current on this thread and `loader` must return
    /// valid function pointers for it.
    pub unsafe fn from_loader_function<F>(loader: F, init: &GlInit) -> Result<Self>
    where
        F: FnMut(&str) -> *const c_void,
    {
        let gl = unsafe { glow::Context::from_loader_function(loader) };
        Self::new(gl, init)
    }

    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }
}

impl Driver for GlowDriver {
    fn create(&self, kind: ResourceKind) -> std::result::Result<RawId, String> {
        unsafe {
            match kind {
                ResourceKind::Buffer(_) => self.gl.create_buffer().map(|b| b.0),
                ResourceKind::VertexArray => self.gl.create_vertex_array().map(|a| a.0),
                ResourceKind::Framebuffer => self.gl.create_framebuffer().map(|f| f.0),
                ResourceKind::Renderbuffer => self.gl.create_renderbuffer().map(|r| r.0),
                ResourceKind::Texture => self.gl.create_texture().map(|t| t.0),
            }
        }
    }

    fn delete(&self, kind: ResourceKind, id: RawId) {
        unsafe {
            match kind {
                ResourceKind::Buffer(_) => self.gl.delete_buffer(glow::NativeBuffer(id)),
                ResourceKind::VertexArray => self.gl.delete_vertex_array(glow::NativeVertexArray(id)),
                ResourceKind::Framebuffer => self.gl.delete_framebuffer(glow::NativeFramebuffer(id)),
                ResourceKind::Renderbuffer => {
                    self.gl.delete_renderbuffer(glow::NativeRenderbuffer(id))
                }
                ResourceKind::Texture => self.gl.delete_texture(glow::NativeTexture(id)),
            }
        }
    }

    fn bind_buffer(&self, target: BufferTarget, id: Option<RawId>) {
        unsafe { self.gl.bind_buffer(buffer_target(target), id.map(glow::NativeBuffer)) }
    }

    fn bind_vertex_array(&self, id: Option<RawId>) {
        unsafe { self.gl.bind_vertex_array(id.map(glow::NativeVertexArray)) }
    }

    fn bind_framebuffer(&self, id: Option<RawId>) {
        unsafe {
            self.gl
                .bind_framebuffer(glow::FRAMEBUFFER, id.map(glow::NativeFramebuffer))
        }
    }

    fn bind_renderbuffer(&self, id: Option<RawId>) {
        unsafe {
            self.gl
                .bind_renderbuffer(glow::RENDERBUFFER, id.map(glow::NativeRenderbuffer))
        }
    }

    fn active_texture(&self, unit: u32) {
        unsafe { self.gl.active_texture(glow::TEXTURE0 + unit) }
    }

    fn bind_texture(&self, id: Option<RawId>) {
        unsafe { self.gl.bind_texture(glow::TEXTURE_2D, id.map(glow::NativeTexture)) }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(buffer_target(target), data, buffer_usage(usage))
        }
    }

    fn buffer_sub_data(&self, target: BufferTarget, offset: usize, data: &[u8]) {
        unsafe {
            self.gl
                .buffer_sub_data_u8_slice(buffer_target(target), gl_int(offset as u64), data)
        }
    }

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        ty: AttribType,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        // glVertexAttribPointer: integer types are converted to float in the shader.
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(index, size, attrib_type(ty), normalized, stride, offset)
        }
    }

    fn vertex_attrib_divisor(&self, index: u32, divisor: u32) {
        unsafe { self.gl.vertex_attrib_divisor(index, divisor) }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn disable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.disable_vertex_attrib_array(index) }
    }

    fn draw_arrays(&self, mode: DrawMode, first: i32, count: i32) {
        unsafe { self.gl.draw_arrays(draw_mode(mode), first, count) }
    }

    fn draw_arrays_instanced(&self, mode: DrawMode, first: i32, count: i32, instances: i32) {
        unsafe {
            self.gl
                .draw_arrays_instanced(draw_mode(mode), first, count, instances)
        }
    }

    fn draw_elements(&self, mode: DrawMode, count: i32, ty: IndexType, offset: i32) {
        unsafe {
            self.gl
                .draw_elements(draw_mode(mode), count, index_type(ty), offset)
        }
    }

    fn draw_elements_instanced(
        &self,
        mode: DrawMode,
        count: i32,
        ty: IndexType,
        offset: i32,
        instances: i32,
    ) {
        unsafe {
            self.gl.draw_elements_instanced(
                draw_mode(mode),
                count,
                index_type(ty),
                offset,
                instances,
            )
        }
    }

    fn tex_image_2d(
        &self,
        width: u32,
        height: u32,
        internal_format: PixelFormat,
        format: PixelFormat,
        ty: PixelType,
        pixels: Option<&[u8]>,
    ) {
        unsafe {
            // Tightly packed rows; RGB data is rarely 4-byte aligned.
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                pixel_format(internal_format) as i32,
                gl_int(width.into()),
                gl_int(height.into()),
                0,
                pixel_format(format),
                pixel_type(ty),
                pixels,
            );
        }
    }

    fn tex_parameters(&self, params: SamplerParams) {
        let min = min_filter(params.min_filter, params.mipmapped);
        let mag = match params.mag_filter {
            Filter::Nearest => glow::NEAREST,
            Filter::Linear => glow::LINEAR,
        };
        let wrap = wrap_mode(params.wrap);
        unsafe {
            let t = glow::TEXTURE_2D;
            self.gl.tex_parameter_i32(t, glow::TEXTURE_MIN_FILTER, min as i32);
            self.gl.tex_parameter_i32(t, glow::TEXTURE_MAG_FILTER, mag as i32);
            self.gl.tex_parameter_i32(t, glow::TEXTURE_WRAP_S, wrap as i32);
            self.gl.tex_parameter_i32(t, glow::TEXTURE_WRAP_T, wrap as i32);
        }
    }

    fn generate_mipmap(&self) {
        unsafe { self.gl.generate_mipmap(glow::TEXTURE_2D) }
    }

    fn renderbuffer_storage(&self, format: RenderBufferFormat, width: u32, height: u32) {
        let internal = match format {
            RenderBufferFormat::Depth24Stencil8 => glow::DEPTH24_STENCIL8,
            RenderBufferFormat::Depth32FStencil8 => glow::DEPTH32F_STENCIL8,
            RenderBufferFormat::Depth24 => glow::DEPTH_COMPONENT24,
            RenderBufferFormat::Depth32F => glow::DEPTH_COMPONENT32F,
            RenderBufferFormat::Stencil8 => glow::STENCIL_INDEX8,
        };
        unsafe {
            self.gl
                .renderbuffer_storage(
                    glow::RENDERBUFFER,
                    internal,
                    gl_int(width.into()),
                    gl_int(height.into()),
                )
        }
    }

    fn framebuffer_texture_2d(&self, attachment: Attachment, id: Option<RawId>) {
        unsafe {
            self.gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                attachment_point(attachment),
                glow::TEXTURE_2D,
                id.map(glow::NativeTexture),
                0,
            )
        }
    }

    fn framebuffer_renderbuffer(&self, attachment: Attachment, id: Option<RawId>) {
        unsafe {
            self.gl.framebuffer_renderbuffer(
                glow::FRAMEBUFFER,
                attachment_point(attachment),
                glow::RENDERBUFFER,
                id.map(glow::NativeRenderbuffer),
            )
        }
    }

    fn check_framebuffer_status(&self) -> FramebufferStatus {
        let raw = unsafe { self.gl.check_framebuffer_status(glow::FRAMEBUFFER) };
        match raw {
            glow::FRAMEBUFFER_COMPLETE => FramebufferStatus::Complete,
            glow::FRAMEBUFFER_UNDEFINED => FramebufferStatus::Undefined,
            glow::FRAMEBUFFER_INCOMPLETE_ATTACHMENT => FramebufferStatus::IncompleteAttachment,
            glow::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => FramebufferStatus::MissingAttachment,
            glow::FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER => FramebufferStatus::IncompleteDrawBuffer,
            glow::FRAMEBUFFER_INCOMPLETE_READ_BUFFER => FramebufferStatus::IncompleteReadBuffer,
            glow::FRAMEBUFFER_UNSUPPORTED => FramebufferStatus::Unsupported,
            glow::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE => FramebufferStatus::IncompleteMultisample,
            other => FramebufferStatus::Unknown(other),
        }
    }

    fn clear(&self, flags: ClearFlags) {
        let mut mask = 0;
        if flags.contains(ClearFlags::COLOR) {
            mask |= glow::COLOR_BUFFER_BIT;
        }
        if flags.contains(ClearFlags::DEPTH) {
            mask |= glow::DEPTH_BUFFER_BIT;
        }
        if flags.contains(ClearFlags::STENCIL) {
            mask |= glow::STENCIL_BUFFER_BIT;
        }
        unsafe { self.gl.clear(mask) }
    }

    fn clear_color(&self, [r, g, b, a]: [f32; 4]) {
        unsafe { self.gl.clear_color(r, g, b, a) }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }
}

// ── enum mapping ──────────────────────────────────────────────────────────

fn buffer_target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => glow::ARRAY_BUFFER,
        BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
    }
}

fn buffer_usage(usage: BufferUsage) -> u32 {
    match usage {
        BufferUsage::StaticDraw => glow::STATIC_DRAW,
        BufferUsage::DynamicDraw => glow::DYNAMIC_DRAW,
        BufferUsage::StreamDraw => glow::STREAM_DRAW,
    }
}

fn attrib_type(ty: AttribType) -> u32 {
    match ty {
        AttribType::Byte => glow::BYTE,
        AttribType::UnsignedByte => glow::UNSIGNED_BYTE,
        AttribType::Short => glow::SHORT,
        AttribType::UnsignedShort => glow::UNSIGNED_SHORT,
        AttribType::Int => glow::INT,
        AttribType::UnsignedInt => glow::UNSIGNED_INT,
        AttribType::HalfFloat => glow::HALF_FLOAT,
        AttribType::Float => glow::FLOAT,
    }
}

fn min_filter(filter: Filter, mipmapped: bool) -> u32 {
    match (filter, mipmapped) {
        (Filter::Nearest, false) => glow::NEAREST,
        (Filter::Linear, false) => glow::LINEAR,
        (Filter::Nearest, true) => glow::NEAREST_MIPMAP_LINEAR,
        (Filter::Linear, true) => glow::LINEAR_MIPMAP_LINEAR,
    }
}

fn wrap_mode(wrap: Wrap) -> u32 {
    match wrap {
        Wrap::Clamp => glow::CLAMP_TO_EDGE,
        Wrap::ClampToBorder => glow::CLAMP_TO_BORDER,
        Wrap::Repeat => glow::REPEAT,
        Wrap::MirroredRepeat => glow::MIRRORED_REPEAT,
    }
}

fn draw_mode(mode: DrawMode) -> u32 {
    match mode {
        DrawMode::Points => glow::POINTS,
        DrawMode::Lines => glow::LINES,
        DrawMode::LineStrip => glow::LINE_STRIP,
        DrawMode::LineLoop => glow::LINE_LOOP,
        DrawMode::Triangles => glow::TRIANGLES,
        DrawMode::TriangleStrip => glow::TRIANGLE_STRIP,
        DrawMode::TriangleFan => glow::TRIANGLE_FAN,
    }
}

fn index_type(ty: IndexType) -> u32 {
    match ty {
        IndexType::U8 => glow::UNSIGNED_BYTE,
        IndexType::U16 => glow::UNSIGNED_SHORT,
        IndexType::U32 => glow::UNSIGNED_INT,
    }
}

fn pixel_format(format: PixelFormat) -> u32 {
    match format {
        PixelFormat::R => glow::RED,
        PixelFormat::Rg => glow::RG,
        PixelFormat::Rgb => glow::RGB,
        PixelFormat::Rgba => glow::RGBA,
    }
}

fn pixel_type(ty: PixelType) -> u32 {
    match ty {
        PixelType::UnsignedByte => glow::UNSIGNED_BYTE,
        PixelType::Float => glow::FLOAT,
    }
}

fn attachment_point(attachment: Attachment) -> u32 {
    match attachment {
        Attachment::Color(n) => glow::COLOR_ATTACHMENT0 + n,
        Attachment::Depth => glow::DEPTH_ATTACHMENT,
        Attachment::Stencil => glow::STENCIL_ATTACHMENT,
        Attachment::DepthStencil => glow::DEPTH_STENCIL_ATTACHMENT,
    }
}

fn map_severity(severity: u32) -> DebugSeverity {
    match severity {
        glow::DEBUG_SEVERITY_HIGH => DebugSeverity::High,
        glow::DEBUG_SEVERITY_MEDIUM => DebugSeverity::Medium,
        glow::DEBUG_SEVERITY_LOW => DebugSeverity::Low,
        _ => DebugSeverity::Notification,
    }
}
