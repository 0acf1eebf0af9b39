use crate::device::{BufferUsage, DrawMode, GpuContext, IndexType, Result};

use super::array::BufferArray;
use super::attribute::AttributeDescriptor;

const POSITION_SLOT: usize = 0;
const TEX_COORD_SLOT: usize = 1;

// Corner order: (x, y+h), (x, y), (x+w, y), (x+w, y+h).
const TEX_COORDS: [f32; 8] = [
    0.0, 1.0, //
    0.0, 0.0, //
    1.0, 0.0, //
    1.0, 1.0, //
];

const INDICES: [u32; 6] = [
    0, 1, 2, //
    0, 2, 3, //
];

/// An axis-aligned textured quad, by default covering the whole viewport in NDC.
///
/// Attribute 0 is the 2-D corner position, attribute 1 the texture coordinate.
/// Moving or resizing rewrites the corner positions in place with a partial
/// buffer update, so the uploaded vertices always match the current rect.
#[derive(Debug)]
pub struct Quad {
    array: BufferArray,
    vertices: [f32; 8],
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Quad {
    /// Full-screen quad: `(-1, -1)` to `(1, 1)`.
    pub fn new(ctx: &GpuContext) -> Result<Self> {
        Self::with_rect(ctx, -1.0, -1.0, 2.0, 2.0)
    }

    pub fn with_rect(ctx: &GpuContext, x: f32, y: f32, width: f32, height: f32) -> Result<Self> {
        let mut array = BufferArray::new(
            ctx,
            [
                vec![AttributeDescriptor::floats(0, 2)],
                vec![AttributeDescriptor::floats(1, 2)],
            ],
        )?;
        let vertices = corners(x, y, width, height);

        array.bind();
        array.buffer_data(POSITION_SLOT, &vertices, BufferUsage::StaticDraw)?;
        array.buffer_data(TEX_COORD_SLOT, &TEX_COORDS, BufferUsage::StaticDraw)?;
        array.buffer_elements(&INDICES, BufferUsage::StaticDraw)?;
        array.unbind();

        Ok(Self {
            array,
            vertices,
            x,
            y,
            width,
            height,
        })
    }

    pub fn set_pos(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.sync();
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.sync();
    }

    fn sync(&mut self) {
        self.vertices = corners(self.x, self.y, self.width, self.height);
        // Slot 0 always exists; it was created in `with_rect`.
        self.array.buffers()[POSITION_SLOT].buffer_sub_data(0, &self.vertices);
    }

    pub fn pos(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Corner positions as last uploaded, `[x0, y0, x1, y1, ...]`.
    pub fn vertices(&self) -> &[f32; 8] {
        &self.vertices
    }

    pub fn array(&self) -> &BufferArray {
        &self.array
    }

    pub fn draw(&self) {
        self.array
            .draw_elements(DrawMode::Triangles, INDICES.len() as i32, IndexType::U32, 0);
    }
}

fn corners(x: f32, y: f32, w: f32, h: f32) -> [f32; 8] {
    [x, y + h, x, y, x + w, y, x + w, y + h]
}
