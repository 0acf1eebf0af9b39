use std::fmt;

use crate::device::{GfxError, GpuContext, RawId, ResourceKind, Result};

/// Exclusive owner of one GPU object.
///
/// The id is allocated in `create` and released exactly once in `Drop`.
/// Handles move but never copy: two owners of one id would mean two deletes.
pub struct GpuHandle {
    ctx: GpuContext,
    kind: ResourceKind,
    id: RawId,
}

impl GpuHandle {
    /// Allocates a new object of `kind`.
    pub fn create(ctx: &GpuContext, kind: ResourceKind) -> Result<Self> {
        let id = ctx
            .driver()
            .create(kind)
            .map_err(|message| GfxError::ResourceCreation { kind, message })?;
        log::trace!("created {kind:?} #{id}");
        Ok(Self {
            ctx: ctx.clone(),
            kind,
            id,
        })
    }

    #[inline]
    pub fn id(&self) -> RawId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    #[inline]
    pub fn context(&self) -> &GpuContext {
        &self.ctx
    }

    /// Binds the object on its kind's binding point.
    ///
    /// Textures bind on whichever sampler unit is active.
    pub fn bind(&self) {
        bind_raw(&self.ctx, self.kind, Some(self.id));
    }

    /// Binds 0 on this handle's binding point.
    pub fn unbind(&self) {
        bind_raw(&self.ctx, self.kind, None);
    }
}

fn bind_raw(ctx: &GpuContext, kind: ResourceKind, id: Option<RawId>) {
    let driver = ctx.driver();
    match kind {
        ResourceKind::Buffer(target) => driver.bind_buffer(target, id),
        ResourceKind::VertexArray => driver.bind_vertex_array(id),
        ResourceKind::Framebuffer => driver.bind_framebuffer(id),
        ResourceKind::Renderbuffer => driver.bind_renderbuffer(id),
        ResourceKind::Texture => driver.bind_texture(id),
    }
}

impl Drop for GpuHandle {
    fn drop(&mut self) {
        log::trace!("deleting {:?} #{}", self.kind, self.id);
        self.ctx.driver().delete(self.kind, self.id);
    }
}

impl fmt::Debug for GpuHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GpuHandle")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .finish()
    }
}
