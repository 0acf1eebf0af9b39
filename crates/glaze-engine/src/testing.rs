//! Software stand-in for the GL driver, used by unit tests.
//!
//! `RecordingDriver` logs every call and keeps just enough state to answer
//! questions a real context would: which ids are live, what bytes each buffer
//! holds, what each vertex array's attribute slots point at, and what a draw
//! call would have fetched. Only `Float` attributes are decoded.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::num::NonZeroU32;
use std::rc::Rc;

use crate::device::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(ResourceKind, RawId),
    Delete(ResourceKind, RawId),
    BindBuffer(BufferTarget, Option<RawId>),
    BindVertexArray(Option<RawId>),
    BindFramebuffer(Option<RawId>),
    BindRenderbuffer(Option<RawId>),
    ActiveTexture(u32),
    BindTexture(Option<RawId>),
    BufferData {
        target: BufferTarget,
        len: usize,
        usage: BufferUsage,
    },
    BufferSubData {
        target: BufferTarget,
        offset: usize,
        len: usize,
    },
    AttribPointer {
        index: u32,
        size: i32,
        ty: AttribType,
        normalized: bool,
        stride: i32,
        offset: i32,
    },
    AttribDivisor(u32, u32),
    EnableAttrib(u32),
    DisableAttrib(u32),
    DrawArrays {
        mode: DrawMode,
        first: i32,
        count: i32,
        instances: i32,
    },
    DrawElements {
        mode: DrawMode,
        count: i32,
        ty: IndexType,
        offset: i32,
        instances: i32,
    },
    TexImage {
        width: u32,
        height: u32,
        internal_format: PixelFormat,
        format: PixelFormat,
        ty: PixelType,
        pixel_bytes: Option<usize>,
    },
    TexParameters(SamplerParams),
    GenerateMipmap,
    RenderbufferStorage(RenderBufferFormat, u32, u32),
    FramebufferTexture(Attachment, Option<RawId>),
    FramebufferRenderbuffer(Attachment, Option<RawId>),
    CheckStatus,
    Clear(ClearFlags),
    ClearColor([f32; 4]),
    Viewport(i32, i32, i32, i32),
}

/// What one draw call saw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub mode: DrawMode,
    pub instances: i32,
    /// Framebuffer bound at draw time; `None` is the default target.
    pub framebuffer: Option<RawId>,
    /// Texture bound on sampler unit 0 at draw time.
    pub texture_unit0: Option<RawId>,
    /// Fetched attribute values per vertex, keyed by attribute index.
    pub vertices: Vec<BTreeMap<u32, Vec<f32>>>,
}

#[derive(Debug, Clone, Copy)]
struct AttribState {
    buffer: Option<RawId>,
    size: i32,
    ty: AttribType,
    stride: i32,
    offset: i32,
    divisor: u32,
    enabled: bool,
}

#[derive(Debug, Default, Clone)]
struct VaoState {
    element_buffer: Option<RawId>,
    attribs: BTreeMap<u32, AttribState>,
}

#[derive(Debug, Default)]
struct State {
    next_id: u32,
    live: HashMap<RawId, ResourceKind>,
    calls: Vec<Call>,
    fail_next_create: Option<String>,
    forced_status: Option<FramebufferStatus>,

    buffers: HashMap<RawId, Vec<u8>>,
    bound_buffers: HashMap<BufferTarget, RawId>,
    // Keyed by bound vertex array; `None` is the state with no array bound.
    vaos: HashMap<Option<RawId>, VaoState>,
    bound_vao: Option<RawId>,

    bound_framebuffer: Option<RawId>,
    framebuffers: HashMap<RawId, BTreeMap<Attachment, RawId>>,
    bound_renderbuffer: Option<RawId>,
    active_unit: u32,
    units: HashMap<u32, RawId>,

    draws: Vec<DrawRecord>,
}

impl State {
    fn vao(&mut self) -> &mut VaoState {
        self.vaos.entry(self.bound_vao).or_default()
    }

    fn bound(&self, target: BufferTarget) -> Option<RawId> {
        match target {
            BufferTarget::ElementArray => self
                .vaos
                .get(&self.bound_vao)
                .and_then(|v| v.element_buffer),
            other => self.bound_buffers.get(&other).copied(),
        }
    }

    fn fetch_vertex(&self, vertex: usize) -> BTreeMap<u32, Vec<f32>> {
        let mut out = BTreeMap::new();
        let Some(vao) = self.vaos.get(&self.bound_vao) else { return out };
        for (&index, attrib) in &vao.attribs {
            if !attrib.enabled || attrib.divisor != 0 || attrib.ty != AttribType::Float {
                continue;
            }
            let Some(bytes) = attrib.buffer.and_then(|b| self.buffers.get(&b)) else {
                continue;
            };
            let elem = attrib.size as usize * attrib.ty.size();
            let stride = if attrib.stride == 0 { elem } else { attrib.stride as usize };
            let start = attrib.offset as usize + vertex * stride;
            let Some(raw) = bytes.get(start..start + elem) else { continue };
            let values = raw
                .chunks_exact(4)
                .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect();
            out.insert(index, values);
        }
        out
    }

    fn record_draw(&mut self, mode: DrawMode, instances: i32, indices: Vec<usize>) {
        let vertices = indices.into_iter().map(|i| self.fetch_vertex(i)).collect();
        let record = DrawRecord {
            mode,
            instances,
            framebuffer: self.bound_framebuffer,
            texture_unit0: self.units.get(&0).copied(),
            vertices,
        };
        self.draws.push(record);
    }

    fn element_indices(&self, count: i32, ty: IndexType, offset: i32) -> Vec<usize> {
        let Some(bytes) = self.bound(BufferTarget::ElementArray).and_then(|b| self.buffers.get(&b))
        else {
            return Vec::new();
        };
        let size = ty.size();
        let start = offset as usize;
        (0..count as usize)
            .filter_map(|i| bytes.get(start + i * size..start + (i + 1) * size))
            .map(|raw| match ty {
                IndexType::U8 => raw[0] as usize,
                IndexType::U16 => u16::from_le_bytes([raw[0], raw[1]]) as usize,
                IndexType::U32 => u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize,
            })
            .collect()
    }
}

/// Recording `Driver` with a small software model of GL binding state.
#[derive(Debug, Default)]
pub struct RecordingDriver {
    state: RefCell<State>,
}

impl RecordingDriver {
    /// A fresh driver plus a context that issues commands into it.
    pub fn context() -> (GpuContext, Rc<RecordingDriver>) {
        let driver = Rc::new(RecordingDriver::default());
        let ctx = GpuContext::from_shared(driver.clone());
        (ctx, driver)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|c| pred(c)).count()
    }

    pub fn is_live(&self, kind: ResourceKind, id: RawId) -> bool {
        self.state.borrow().live.get(&id) == Some(&kind)
    }

    pub fn live_count(&self) -> usize {
        self.state.borrow().live.len()
    }

    pub fn creates_of(&self, kind: ResourceKind) -> usize {
        self.count(|c| matches!(c, Call::Create(k, _) if *k == kind))
    }

    pub fn deletes_of(&self, id: RawId) -> usize {
        self.count(|c| matches!(c, Call::Delete(_, i) if *i == id))
    }

    pub fn buffer_contents(&self, id: RawId) -> Option<Vec<u8>> {
        self.state.borrow().buffers.get(&id).cloned()
    }

    pub fn draws(&self) -> Vec<DrawRecord> {
        self.state.borrow().draws.clone()
    }

    pub fn bound_framebuffer(&self) -> Option<RawId> {
        self.state.borrow().bound_framebuffer
    }

    pub fn bound_renderbuffer(&self) -> Option<RawId> {
        self.state.borrow().bound_renderbuffer
    }

    pub fn bound_vertex_array(&self) -> Option<RawId> {
        self.state.borrow().bound_vao
    }

    pub fn fail_next_create(&self, message: &str) {
        self.state.borrow_mut().fail_next_create = Some(message.to_owned());
    }

    /// Makes every following status query return `status`.
    pub fn force_status(&self, status: FramebufferStatus) {
        self.state.borrow_mut().forced_status = Some(status);
    }

    fn push(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl Driver for RecordingDriver {
    fn create(&self, kind: ResourceKind) -> std::result::Result<RawId, String> {
        let mut s = self.state.borrow_mut();
        if let Some(message) = s.fail_next_create.take() {
            return Err(message);
        }
        s.next_id += 1;
        let id = NonZeroU32::new(s.next_id).ok_or("id space exhausted")?;
        s.live.insert(id, kind);
        if kind == ResourceKind::Framebuffer {
            s.framebuffers.insert(id, BTreeMap::new());
        }
        s.calls.push(Call::Create(kind, id));
        Ok(id)
    }

    fn delete(&self, kind: ResourceKind, id: RawId) {
        let mut s = self.state.borrow_mut();
        s.live.remove(&id);
        s.buffers.remove(&id);
        s.framebuffers.remove(&id);
        s.calls.push(Call::Delete(kind, id));
    }

    fn bind_buffer(&self, target: BufferTarget, id: Option<RawId>) {
        let mut s = self.state.borrow_mut();
        match target {
            BufferTarget::ElementArray => s.vao().element_buffer = id,
            other => match id {
                Some(id) => {
                    s.bound_buffers.insert(other, id);
                }
                None => {
                    s.bound_buffers.remove(&other);
                }
            },
        }
        s.calls.push(Call::BindBuffer(target, id));
    }

    fn bind_vertex_array(&self, id: Option<RawId>) {
        let mut s = self.state.borrow_mut();
        s.bound_vao = id;
        s.calls.push(Call::BindVertexArray(id));
    }

    fn bind_framebuffer(&self, id: Option<RawId>) {
        let mut s = self.state.borrow_mut();
        s.bound_framebuffer = id;
        s.calls.push(Call::BindFramebuffer(id));
    }

    fn bind_renderbuffer(&self, id: Option<RawId>) {
        let mut s = self.state.borrow_mut();
        s.bound_renderbuffer = id;
        s.calls.push(Call::BindRenderbuffer(id));
    }

    fn active_texture(&self, unit: u32) {
        let mut s = self.state.borrow_mut();
        s.active_unit = unit;
        s.calls.push(Call::ActiveTexture(unit));
    }

    fn bind_texture(&self, id: Option<RawId>) {
        let mut s = self.state.borrow_mut();
        let unit = s.active_unit;
        match id {
            Some(id) => {
                s.units.insert(unit, id);
            }
            None => {
                s.units.remove(&unit);
            }
        }
        s.calls.push(Call::BindTexture(id));
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        let mut s = self.state.borrow_mut();
        if let Some(id) = s.bound(target) {
            s.buffers.insert(id, data.to_vec());
        }
        s.calls.push(Call::BufferData {
            target,
            len: data.len(),
            usage,
        });
    }

    fn buffer_sub_data(&self, target: BufferTarget, offset: usize, data: &[u8]) {
        let mut s = self.state.borrow_mut();
        if let Some(id) = s.bound(target) {
            if let Some(dst) = s
                .buffers
                .get_mut(&id)
                .and_then(|b| b.get_mut(offset..offset + data.len()))
            {
                dst.copy_from_slice(data);
            }
        }
        s.calls.push(Call::BufferSubData {
            target,
            offset,
            len: data.len(),
        });
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
        let mut s = self.state.borrow_mut();
        let buffer = s.bound_buffers.get(&BufferTarget::Array).copied();
        let vao = s.vao();
        let prev = vao.attribs.get(&index).copied();
        vao.attribs.insert(
            index,
            AttribState {
                buffer,
                size,
                ty,
                stride,
                offset,
                divisor: prev.map_or(0, |a| a.divisor),
                enabled: prev.is_some_and(|a| a.enabled),
            },
        );
        s.calls.push(Call::AttribPointer {
            index,
            size,
            ty,
            normalized,
            stride,
            offset,
        });
    }

    fn vertex_attrib_divisor(&self, index: u32, divisor: u32) {
        let mut s = self.state.borrow_mut();
        if let Some(a) = s.vao().attribs.get_mut(&index) {
            a.divisor = divisor;
        }
        s.calls.push(Call::AttribDivisor(index, divisor));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        let mut s = self.state.borrow_mut();
        if let Some(a) = s.vao().attribs.get_mut(&index) {
            a.enabled = true;
        }
        s.calls.push(Call::EnableAttrib(index));
    }

    fn disable_vertex_attrib_array(&self, index: u32) {
        let mut s = self.state.borrow_mut();
        if let Some(a) = s.vao().attribs.get_mut(&index) {
            a.enabled = false;
        }
        s.calls.push(Call::DisableAttrib(index));
    }

    fn draw_arrays(&self, mode: DrawMode, first: i32, count: i32) {
        self.draw_arrays_instanced(mode, first, count, 1);
    }

    fn draw_arrays_instanced(&self, mode: DrawMode, first: i32, count: i32, instances: i32) {
        let mut s = self.state.borrow_mut();
        let indices = (first as usize..(first + count) as usize).collect();
        s.record_draw(mode, instances, indices);
        s.calls.push(Call::DrawArrays {
            mode,
            first,
            count,
            instances,
        });
    }

    fn draw_elements(&self, mode: DrawMode, count: i32, ty: IndexType, offset: i32) {
        self.draw_elements_instanced(mode, count, ty, offset, 1);
    }

    fn draw_elements_instanced(
        &self,
        mode: DrawMode,
        count: i32,
        ty: IndexType,
        offset: i32,
        instances: i32,
    ) {
        let mut s = self.state.borrow_mut();
        let indices = s.element_indices(count, ty, offset);
        s.record_draw(mode, instances, indices);
        s.calls.push(Call::DrawElements {
            mode,
            count,
            ty,
            offset,
            instances,
        });
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
        self.push(Call::TexImage {
            width,
            height,
            internal_format,
            format,
            ty,
            pixel_bytes: pixels.map(<[u8]>::len),
        });
    }

    fn tex_parameters(&self, params: SamplerParams) {
        self.push(Call::TexParameters(params));
    }

    fn generate_mipmap(&self) {
        self.push(Call::GenerateMipmap);
    }

    fn renderbuffer_storage(&self, format: RenderBufferFormat, width: u32, height: u32) {
        self.push(Call::RenderbufferStorage(format, width, height));
    }

    fn framebuffer_texture_2d(&self, attachment: Attachment, id: Option<RawId>) {
        let mut s = self.state.borrow_mut();
        if let Some(fb) = s.bound_framebuffer {
            let table = s.framebuffers.entry(fb).or_default();
            match id {
                Some(id) => {
                    table.insert(attachment, id);
                }
                None => {
                    table.remove(&attachment);
                }
            }
        }
        s.calls.push(Call::FramebufferTexture(attachment, id));
    }

    fn framebuffer_renderbuffer(&self, attachment: Attachment, id: Option<RawId>) {
        let mut s = self.state.borrow_mut();
        if let Some(fb) = s.bound_framebuffer {
            let table = s.framebuffers.entry(fb).or_default();
            match id {
                Some(id) => {
                    table.insert(attachment, id);
                }
                None => {
                    table.remove(&attachment);
                }
            }
        }
        s.calls.push(Call::FramebufferRenderbuffer(attachment, id));
    }

    fn check_framebuffer_status(&self) -> FramebufferStatus {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::CheckStatus);
        if let Some(forced) = s.forced_status {
            return forced;
        }
        match s.bound_framebuffer {
            None => FramebufferStatus::Complete,
            Some(fb) => match s.framebuffers.get(&fb) {
                Some(table) if !table.is_empty() => FramebufferStatus::Complete,
                _ => FramebufferStatus::MissingAttachment,
            },
        }
    }

    fn clear(&self, flags: ClearFlags) {
        self.push(Call::Clear(flags));
    }

    fn clear_color(&self, rgba: [f32; 4]) {
        self.push(Call::ClearColor(rgba));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.push(Call::Viewport(x, y, width, height));
    }
}
