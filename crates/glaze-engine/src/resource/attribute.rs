use crate::device::{AttribType, GpuContext};

/// How to read one vertex attribute out of a buffer's bytes.
///
/// Pure data; it owns nothing and is applied against whichever buffer is bound
/// on `Array` at the time `enable` runs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AttributeDescriptor {
    /// Shader input location.
    pub index: u32,
    /// Components per vertex (1..=4).
    pub size: i32,
    pub ty: AttribType,
    pub normalized: bool,
    /// Byte distance between consecutive vertices; 0 means tightly packed.
    pub stride: i32,
    /// Byte offset of the first component.
    pub offset: i32,
    /// Instances per attribute advance; 0 advances per vertex.
    pub divisor: u32,
}

impl AttributeDescriptor {
    pub const fn new(index: u32, size: i32, ty: AttribType) -> Self {
        Self {
            index,
            size,
            ty,
            normalized: false,
            stride: size * ty.size() as i32,
            offset: 0,
            divisor: 0,
        }
    }

    /// Tightly packed `f32` components.
    pub const fn floats(index: u32, size: i32) -> Self {
        Self::new(index, size, AttribType::Float)
    }

    pub const fn normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }

    pub const fn stride(mut self, stride: i32) -> Self {
        self.stride = stride;
        self
    }

    pub const fn offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }

    pub const fn divisor(mut self, divisor: u32) -> Self {
        self.divisor = divisor;
        self
    }

    /// Records this layout in the bound vertex array, reading from the bound
    /// `Array` buffer, and enables the slot.
    pub fn enable(&self, ctx: &GpuContext) {
        let driver = ctx.driver();
        driver.vertex_attrib_pointer(
            self.index,
            self.size,
            self.ty,
            self.normalized,
            self.stride,
            self.offset,
        );
        driver.vertex_attrib_divisor(self.index, self.divisor);
        driver.enable_vertex_attrib_array(self.index);
    }

    pub fn disable(&self, ctx: &GpuContext) {
        ctx.driver().disable_vertex_attrib_array(self.index);
    }
}
