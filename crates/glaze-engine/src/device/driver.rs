use super::types::*;

/// Command stream into the graphics driver.
///
/// Every resource wrapper issues its GPU work through this trait. Calls are
/// synchronous and recorded in program order; bind calls mutate process-wide
/// binding state that is never restored behind the caller's back.
///
/// `None` for an id means "bind 0" on that binding point.
pub trait Driver {
    /// Allocates a new object of `kind`.
    fn create(&self, kind: ResourceKind) -> Result<RawId, String>;

    /// Releases an object previously returned by `create`.
    fn delete(&self, kind: ResourceKind, id: RawId);

    fn bind_buffer(&self, target: BufferTarget, id: Option<RawId>);
    fn bind_vertex_array(&self, id: Option<RawId>);
    fn bind_framebuffer(&self, id: Option<RawId>);
    fn bind_renderbuffer(&self, id: Option<RawId>);

    /// Selects the sampler unit subsequent texture binds apply to.
    fn active_texture(&self, unit: u32);
    fn bind_texture(&self, id: Option<RawId>);

    /// Replaces the contents of the buffer bound on `target`.
    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage);

    /// Overwrites a byte range of the buffer bound on `target`.
    fn buffer_sub_data(&self, target: BufferTarget, offset: usize, data: &[u8]);

    /// Points attribute `index` at the buffer currently bound on `Array`.
    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        ty: AttribType,
        normalized: bool,
        stride: i32,
        offset: i32,
    );
    fn vertex_attrib_divisor(&self, index: u32, divisor: u32);
    fn enable_vertex_attrib_array(&self, index: u32);
    fn disable_vertex_attrib_array(&self, index: u32);

    fn draw_arrays(&self, mode: DrawMode, first: i32, count: i32);
    fn draw_arrays_instanced(&self, mode: DrawMode, first: i32, count: i32, instances: i32);
    fn draw_elements(&self, mode: DrawMode, count: i32, ty: IndexType, offset: i32);
    fn draw_elements_instanced(
        &self,
        mode: DrawMode,
        count: i32,
        ty: IndexType,
        offset: i32,
        instances: i32,
    );

    /// Specifies level 0 of the bound texture. `pixels: None` allocates only.
    ///
    /// The driver reads `width * height * channels * component size` bytes
    /// from `pixels` without looking at the slice length; callers must pass
    /// a slice at least that long.
    fn tex_image_2d(
        &self,
        width: u32,
        height: u32,
        internal_format: PixelFormat,
        format: PixelFormat,
        ty: PixelType,
        pixels: Option<&[u8]>,
    );
    fn tex_parameters(&self, params: SamplerParams);
    fn generate_mipmap(&self);

    fn renderbuffer_storage(&self, format: RenderBufferFormat, width: u32, height: u32);

    /// Attaches a texture (or detaches with `None`) on the bound framebuffer.
    fn framebuffer_texture_2d(&self, attachment: Attachment, id: Option<RawId>);
    fn framebuffer_renderbuffer(&self, attachment: Attachment, id: Option<RawId>);
    fn check_framebuffer_status(&self) -> FramebufferStatus;

    fn clear(&self, flags: ClearFlags);
    fn clear_color(&self, rgba: [f32; 4]);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
}
