use bytemuck::Pod;

use crate::device::{
    BufferTarget, BufferUsage, DrawMode, GfxError, GpuContext, IndexType, RawId, ResourceKind,
    Result,
};

use super::attribute::AttributeDescriptor;
use super::buffer::{AttributedBuffer, Buffer};
use super::handle::GpuHandle;

/// A vertex array with its attribute buffers and optional index buffer.
///
/// Slot `i` is the `i`-th attribute group given at construction (or appended
/// with `add_buffer`). Uploads require this array to be bound; draws bind it
/// themselves.
///
/// Fields drop in declaration order: attribute buffers, then the element
/// buffer, then the vertex array.
#[derive(Debug)]
pub struct BufferArray {
    buffers: Vec<AttributedBuffer>,
    elements: Option<Buffer>,
    array: GpuHandle,
}

impl BufferArray {
    /// Creates a vertex array and one attribute buffer per group, in order.
    pub fn new<I>(ctx: &GpuContext, groups: I) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<AttributeDescriptor>>,
    {
        let array = GpuHandle::create(ctx, ResourceKind::VertexArray)?;
        let mut this = Self {
            buffers: Vec::new(),
            elements: None,
            array,
        };
        for attributes in groups {
            this.add_buffer(attributes)?;
        }
        Ok(this)
    }

    /// Appends a new attribute buffer as the next slot.
    pub fn add_buffer(&mut self, attributes: Vec<AttributeDescriptor>) -> Result<usize> {
        let buffer = Buffer::new(self.array.context(), BufferTarget::Array)?;
        self.buffers.push(AttributedBuffer::new(attributes, buffer));
        Ok(self.buffers.len() - 1)
    }

    #[inline]
    pub fn raw_id(&self) -> RawId {
        self.array.id()
    }

    /// Number of attribute buffer slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn buffers(&self) -> &[AttributedBuffer] {
        &self.buffers
    }

    pub fn buffers_mut(&mut self) -> &mut [AttributedBuffer] {
        &mut self.buffers
    }

    pub fn has_elements(&self) -> bool {
        self.elements.is_some()
    }

    pub fn element_buffer(&self) -> Option<&Buffer> {
        self.elements.as_ref()
    }

    pub fn bind(&self) {
        self.array.bind();
    }

    pub fn unbind(&self) {
        self.array.unbind();
    }

    fn slot(&self, slot: usize) -> Result<&AttributedBuffer> {
        self.buffers.get(slot).ok_or_else(|| {
            GfxError::SlotOutOfRange {
                slot,
                len: self.buffers.len(),
            }
            .into()
        })
    }

    /// Uploads to the buffer at `slot` and re-applies its layout.
    pub fn buffer_data<T: Pod>(&self, slot: usize, data: &[T], usage: BufferUsage) -> Result<()> {
        self.slot(slot)?.buffer_data(data, usage);
        Ok(())
    }

    pub fn buffer_sub_data<T: Pod>(&self, slot: usize, offset: usize, data: &[T]) -> Result<()> {
        self.slot(slot)?.buffer_sub_data(offset, data);
        Ok(())
    }

    /// Uploads index data, creating the element buffer on first use.
    ///
    /// Later calls reuse the same buffer and replace its content.
    pub fn buffer_elements<T: Pod>(&mut self, data: &[T], usage: BufferUsage) -> Result<()> {
        let elements = match &mut self.elements {
            Some(buffer) => buffer,
            none => none.insert(Buffer::new(self.array.context(), BufferTarget::ElementArray)?),
        };
        elements.buffer_data(data, usage);
        Ok(())
    }

    pub fn draw_arrays(&self, mode: DrawMode, first: i32, count: i32) {
        self.bind();
        self.array.context().driver().draw_arrays(mode, first, count);
    }

    pub fn draw_arrays_instanced(&self, mode: DrawMode, first: i32, count: i32, instances: i32) {
        self.bind();
        self.array
            .context()
            .driver()
            .draw_arrays_instanced(mode, first, count, instances);
    }

    /// Indexed draw; `offset` is in bytes into the element buffer.
    ///
    /// Skipped with a warning if no indices were ever uploaded.
    pub fn draw_elements(&self, mode: DrawMode, count: i32, ty: IndexType, offset: i32) {
        if !self.ensure_elements() {
            return;
        }
        self.bind();
        self.array
            .context()
            .driver()
            .draw_elements(mode, count, ty, offset);
    }

    pub fn draw_elements_instanced(
        &self,
        mode: DrawMode,
        count: i32,
        ty: IndexType,
        offset: i32,
        instances: i32,
    ) {
        if !self.ensure_elements() {
            return;
        }
        self.bind();
        self.array
            .context()
            .driver()
            .draw_elements_instanced(mode, count, ty, offset, instances);
    }

    fn ensure_elements(&self) -> bool {
        if self.elements.is_none() {
            log::warn!(
                "indexed draw on vertex array #{} without an element buffer; skipped",
                self.array.id()
            );
            return false;
        }
        true
    }
}
