use bytemuck::Pod;

use crate::device::{BufferTarget, BufferUsage, GpuContext, RawId, ResourceKind, Result};

use super::attribute::AttributeDescriptor;
use super::handle::GpuHandle;

/// A GPU buffer object bound to one target.
#[derive(Debug)]
pub struct Buffer {
    handle: GpuHandle,
    target: BufferTarget,
}

impl Buffer {
    pub fn new(ctx: &GpuContext, target: BufferTarget) -> Result<Self> {
        let handle = GpuHandle::create(ctx, ResourceKind::Buffer(target))?;
        Ok(Self { handle, target })
    }

    #[inline]
    pub fn target(&self) -> BufferTarget {
        self.target
    }

    #[inline]
    pub fn raw_id(&self) -> RawId {
        self.handle.id()
    }

    pub fn bind(&self) {
        self.handle.bind();
    }

    pub fn unbind(&self) {
        self.handle.unbind();
    }

    /// Binds and replaces the whole content.
    ///
    /// Lengths are not validated; an empty slice is passed through to the driver.
    pub fn buffer_data<T: Pod>(&self, data: &[T], usage: BufferUsage) {
        self.bind();
        self.handle
            .context()
            .driver()
            .buffer_data(self.target, bytemuck::cast_slice(data), usage);
    }

    /// Binds and overwrites `data.len()` elements' worth of bytes at `offset` (in bytes).
    pub fn buffer_sub_data<T: Pod>(&self, offset: usize, data: &[T]) {
        self.bind();
        self.handle
            .context()
            .driver()
            .buffer_sub_data(self.target, offset, bytemuck::cast_slice(data));
    }
}

/// A vertex buffer together with the attribute layout its bytes follow.
///
/// Attribute-to-buffer association is captured by the vertex array when an
/// attribute is enabled, not when bytes are uploaded. Every full upload
/// therefore re-enables the layout, so the bound vertex array reads from this
/// buffer afterwards. The owning vertex array must be bound before uploading.
#[derive(Debug)]
pub struct AttributedBuffer {
    attributes: Vec<AttributeDescriptor>,
    buffer: Buffer,
}

impl AttributedBuffer {
    pub fn new(attributes: Vec<AttributeDescriptor>, buffer: Buffer) -> Self {
        Self { attributes, buffer }
    }

    pub fn attributes(&self) -> &[AttributeDescriptor] {
        &self.attributes
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Uploads `data` and re-applies every attribute descriptor.
    pub fn buffer_data<T: Pod>(&self, data: &[T], usage: BufferUsage) {
        self.buffer.buffer_data(data, usage);
        let ctx = self.buffer.handle.context();
        for attribute in &self.attributes {
            attribute.enable(ctx);
        }
    }

    /// Content-only update; attribute bindings are unaffected.
    pub fn buffer_sub_data<T: Pod>(&self, offset: usize, data: &[T]) {
        self.buffer.buffer_sub_data(offset, data);
    }

    /// Disables every attribute slot this buffer feeds.
    pub fn disable(&self) {
        let ctx = self.buffer.handle.context();
        for attribute in &self.attributes {
            attribute.disable(ctx);
        }
    }
}
