use std::collections::BTreeMap;

use crate::device::{
    Attachment, FramebufferStatus, GfxError, GpuContext, RawId, RenderBufferFormat, ResourceKind,
    Result,
};

use super::handle::GpuHandle;
use super::texture::Texture;

/// A destination for draw commands.
///
/// Binding a target changes only the framebuffer binding. Textures, programs
/// and vertex arrays stay bound across a switch; callers re-bind what they
/// need before drawing.
pub trait RenderTarget {
    fn bind(&self);
}

/// The visible surface. Owns nothing and is never destroyed.
#[derive(Debug, Clone)]
pub struct DefaultTarget {
    ctx: GpuContext,
}

impl DefaultTarget {
    pub(crate) fn new(ctx: GpuContext) -> Self {
        Self { ctx }
    }
}

impl RenderTarget for DefaultTarget {
    fn bind(&self) {
        self.ctx.driver().bind_framebuffer(None);
    }
}

/// Kind of surface recorded in a framebuffer's attachment table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SurfaceKind {
    Texture,
    RenderBuffer,
}

/// Non-owning record of what sits on an attachment point.
///
/// The framebuffer does not keep the surface alive. The caller must keep the
/// texture or renderbuffer around for as long as the framebuffer is drawn to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AttachedSurface {
    pub kind: SurfaceKind,
    pub id: RawId,
}

/// Something that can be wired onto a framebuffer attachment point.
pub trait Attachable {
    fn surface(&self) -> AttachedSurface;
}

impl Attachable for Texture {
    fn surface(&self) -> AttachedSurface {
        AttachedSurface {
            kind: SurfaceKind::Texture,
            id: self.raw_id(),
        }
    }
}

/// Depth/stencil storage for a framebuffer.
#[derive(Debug)]
pub struct RenderBuffer {
    handle: GpuHandle,
    format: RenderBufferFormat,
    width: u32,
    height: u32,
}

impl RenderBuffer {
    pub fn new(ctx: &GpuContext, width: u32, height: u32, format: RenderBufferFormat) -> Result<Self> {
        let handle = GpuHandle::create(ctx, ResourceKind::Renderbuffer)?;
        handle.bind();
        ctx.driver().renderbuffer_storage(format, width, height);
        Ok(Self {
            handle,
            format,
            width,
            height,
        })
    }

    #[inline]
    pub fn raw_id(&self) -> RawId {
        self.handle.id()
    }

    pub fn format(&self) -> RenderBufferFormat {
        self.format
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn bind(&self) {
        self.handle.bind();
    }
}

impl Attachable for RenderBuffer {
    fn surface(&self) -> AttachedSurface {
        AttachedSurface {
            kind: SurfaceKind::RenderBuffer,
            id: self.raw_id(),
        }
    }
}

/// An offscreen render target.
///
/// Completeness is not checked while attaching; call `ensure_complete` once
/// every attachment is wired.
#[derive(Debug)]
pub struct FrameBuffer {
    handle: GpuHandle,
    width: u32,
    height: u32,
    attachments: BTreeMap<Attachment, AttachedSurface>,
}

impl FrameBuffer {
    pub fn new(ctx: &GpuContext, width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            handle: GpuHandle::create(ctx, ResourceKind::Framebuffer)?,
            width,
            height,
            attachments: BTreeMap::new(),
        })
    }

    #[inline]
    pub fn raw_id(&self) -> RawId {
        self.handle.id()
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Binds this framebuffer and wires `surface` onto `point`.
    ///
    /// Replaces whatever was recorded on `point` before.
    pub fn attach(&mut self, surface: &impl Attachable, point: Attachment) {
        let surface = surface.surface();
        self.wire(point, surface.kind, Some(surface.id));
        self.attachments.insert(point, surface);
    }

    /// Clears `point`, returning what was recorded there.
    pub fn detach(&mut self, point: Attachment) -> Option<AttachedSurface> {
        let previous = self.attachments.remove(&point)?;
        self.wire(point, previous.kind, None);
        Some(previous)
    }

    fn wire(&self, point: Attachment, kind: SurfaceKind, id: Option<RawId>) {
        self.handle.bind();
        let driver = self.handle.context().driver();
        match kind {
            SurfaceKind::Texture => driver.framebuffer_texture_2d(point, id),
            SurfaceKind::RenderBuffer => driver.framebuffer_renderbuffer(point, id),
        }
    }

    pub fn attachment(&self, point: Attachment) -> Option<AttachedSurface> {
        self.attachments.get(&point).copied()
    }

    pub fn attachments(&self) -> impl Iterator<Item = (Attachment, AttachedSurface)> + '_ {
        self.attachments.iter().map(|(p, s)| (*p, *s))
    }

    /// Binds and queries completeness.
    pub fn status(&self) -> FramebufferStatus {
        self.handle.bind();
        self.handle.context().driver().check_framebuffer_status()
    }

    /// Fails with `FramebufferIncomplete` unless the driver reports complete.
    pub fn ensure_complete(&self) -> Result<()> {
        let status = self.status();
        if !status.is_complete() {
            log::error!("framebuffer #{} is not complete: {status:?}", self.handle.id());
            return Err(GfxError::FramebufferIncomplete(status).into());
        }
        Ok(())
    }
}

impl RenderTarget for FrameBuffer {
    fn bind(&self) {
        self.handle.bind();
    }
}
