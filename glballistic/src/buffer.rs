use crate::api::gl;
use crate::api::gl::types::*;
use crate::backend::Backend;
use crate::context::Context;
use crate::flags::{BufferStorageFlags, MapAccess};
use bytemuck::Pod;
use std::ops::{Deref, DerefMut};
use std::os::raw::c_void;
use std::rc::Rc;
use std::slice;

impl_handle_type!(
    /// Buffer object.
    ///
    /// The buffer remembers a target, used when it has to be bound to be edited (without
    /// direct state access) and by [`Buffer::bind`]. Index buffers are the exception: the
    /// element array binding belongs to the current vertex array, so they are edited through
    /// `GL_COPY_WRITE_BUFFER` instead.
    pub struct Buffer {
        target: GLenum,
        size: usize
    }
);

impl<B: Backend> Drop for Buffer<B> {
    fn drop(&mut self) {
        unsafe { self.ctx.backend().delete_buffer(self.obj) }
        self.ctx.bindings_mut().forget_buffer(self.obj);
    }
}

impl<B: Backend> Buffer<B> {
    /// Creates a buffer with no storage.
    pub fn new(ctx: &Rc<Context<B>>, target: GLenum) -> Buffer<B> {
        let obj = unsafe {
            if ctx.direct_state_access() {
                ctx.backend().create_buffer()
            } else {
                ctx.backend().gen_buffer()
            }
        };
        Buffer {
            ctx: ctx.clone(),
            obj,
            target,
            size: 0,
        }
    }

    /// Size of the data store in bytes, as last specified.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn target(&self) -> GLenum {
        self.target
    }

    /// Binds the buffer to its target.
    pub fn bind(&self) {
        self.ctx.bind_buffer(self.target, self.obj);
    }

    /// Binds the buffer to `target`, which becomes the buffer's target.
    pub fn bind_to(&mut self, target: GLenum) {
        self.target = target;
        self.bind();
    }

    /// Unbinds whatever is bound to the buffer's target.
    pub fn unbind(&self) {
        self.ctx.bind_buffer(self.target, 0);
    }

    /// Binds the whole buffer to slot `index` of an indexed target.
    pub fn bind_base(&self, target: GLenum, index: GLuint) {
        self.ctx.bind_buffer_base(target, index, self.obj);
    }

    /// Binds `size` bytes starting at `offset` to slot `index` of an indexed target.
    pub fn bind_range(&self, target: GLenum, index: GLuint, offset: usize, size: usize) {
        self.ctx.bind_buffer_range(
            target,
            index,
            self.obj,
            offset as GLintptr,
            size as GLsizeiptr,
        );
    }

    /// Binds the buffer to the target its edits go through, and returns that target.
    fn bind_for_edit(&self) -> GLenum {
        let target = match self.target {
            gl::ELEMENT_ARRAY_BUFFER => gl::COPY_WRITE_BUFFER,
            target => target,
        };
        self.ctx.bind_buffer(target, self.obj);
        target
    }

    /// Creates a mutable data store initialized with `data`.
    pub fn data<T: Pod>(&mut self, data: &[T], usage: GLenum) {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        self.data_raw(bytes.len(), Some(bytes), usage);
    }

    /// Creates an uninitialized mutable data store of `size` bytes.
    pub fn allocate(&mut self, size: usize, usage: GLenum) {
        self.data_raw(size, None, usage);
    }

    fn data_raw(&mut self, size: usize, data: Option<&[u8]>, usage: GLenum) {
        self.size = size;
        let gl = self.ctx.backend();
        unsafe {
            if self.ctx.direct_state_access() {
                gl.named_buffer_data(self.obj, size as GLsizeiptr, data, usage);
            } else {
                let target = self.bind_for_edit();
                gl.buffer_data(target, size as GLsizeiptr, data, usage);
            }
        }
    }

    /// Overwrites part of the data store, starting at byte `offset`.
    pub fn update<T: Pod>(&self, offset: usize, data: &[T]) {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        assert!(
            offset + bytes.len() <= self.size,
            "update out of buffer bounds"
        );
        let gl = self.ctx.backend();
        unsafe {
            if self.ctx.direct_state_access() {
                gl.named_buffer_sub_data(self.obj, offset as GLintptr, bytes);
            } else {
                let target = self.bind_for_edit();
                gl.buffer_sub_data(target, offset as GLintptr, bytes);
            }
        }
    }

    /// Creates an immutable data store of `size` bytes, optionally initialized with `data`.
    pub fn storage(&mut self, size: usize, data: Option<&[u8]>, flags: BufferStorageFlags) {
        if let Some(data) = data {
            assert_eq!(data.len(), size, "initial data does not match storage size");
        }
        self.size = size;
        let gl = self.ctx.backend();
        unsafe {
            if self.ctx.direct_state_access() {
                gl.named_buffer_storage(self.obj, size as GLsizeiptr, data, flags.bits());
            } else {
                let target = self.bind_for_edit();
                gl.buffer_storage(target, size as GLsizeiptr, data, flags.bits());
            }
        }
    }

    /// Maps `length` bytes starting at `offset`. The range is unmapped when the returned guard
    /// is dropped.
    ///
    /// Returns `None` if the driver could not map the range.
    pub fn map_range(&self, offset: usize, length: usize, access: MapAccess) -> Option<MappedRange<'_, B>> {
        assert!(offset + length <= self.size, "mapping out of buffer bounds");
        let gl = self.ctx.backend();
        let ptr = unsafe {
            if self.ctx.direct_state_access() {
                gl.map_named_buffer_range(
                    self.obj,
                    offset as GLintptr,
                    length as GLsizeiptr,
                    access.bits(),
                )
            } else {
                let target = self.bind_for_edit();
                gl.map_buffer_range(
                    target,
                    offset as GLintptr,
                    length as GLsizeiptr,
                    access.bits(),
                )
            }
        };
        MappedRange::new(self, ptr, length)
    }

    /// Maps the whole data store with `access` (`GL_READ_ONLY`, `GL_WRITE_ONLY` or
    /// `GL_READ_WRITE`).
    ///
    /// Returns `None` if the driver could not map the buffer.
    pub fn map(&self, access: GLenum) -> Option<MappedRange<'_, B>> {
        let gl = self.ctx.backend();
        let ptr = unsafe {
            if self.ctx.direct_state_access() {
                gl.map_named_buffer(self.obj, access)
            } else {
                let target = self.bind_for_edit();
                gl.map_buffer(target, access)
            }
        };
        MappedRange::new(self, ptr, self.size)
    }

    /// Fills the data store with the element `data` of `format`/`ty`, converted to
    /// `internal_format`. `None` fills with zeros.
    pub fn clear(&self, internal_format: GLenum, format: GLenum, ty: GLenum, data: Option<&[u8]>) {
        let gl = self.ctx.backend();
        unsafe {
            if self.ctx.direct_state_access() {
                gl.clear_named_buffer_data(self.obj, internal_format, format, ty, data);
            } else {
                let target = self.bind_for_edit();
                gl.clear_buffer_data(target, internal_format, format, ty, data);
            }
        }
    }

    /// Same as [`Buffer::clear`], restricted to `size` bytes starting at `offset`.
    pub fn clear_range(
        &self,
        internal_format: GLenum,
        offset: usize,
        size: usize,
        format: GLenum,
        ty: GLenum,
        data: Option<&[u8]>,
    ) {
        assert!(offset + size <= self.size, "clear out of buffer bounds");
        let gl = self.ctx.backend();
        let (offset, size) = (offset as GLintptr, size as GLsizeiptr);
        unsafe {
            if self.ctx.direct_state_access() {
                gl.clear_named_buffer_sub_data(self.obj, internal_format, offset, size, format, ty, data);
            } else {
                let target = self.bind_for_edit();
                gl.clear_buffer_sub_data(target, internal_format, offset, size, format, ty, data);
            }
        }
    }

    /// Queries a buffer parameter (`GL_BUFFER_SIZE`, `GL_BUFFER_USAGE`, `GL_BUFFER_MAPPED`...).
    pub fn parameter(&self, pname: GLenum) -> GLint {
        let gl = self.ctx.backend();
        unsafe {
            if self.ctx.direct_state_access() {
                gl.get_named_buffer_parameter_iv(self.obj, pname)
            } else {
                let target = self.bind_for_edit();
                gl.get_buffer_parameter_iv(target, pname)
            }
        }
    }

    /// Copies `size` bytes from `src` at `read_offset` into this buffer at `write_offset`.
    pub fn copy_from(&self, src: &Buffer<B>, read_offset: usize, write_offset: usize, size: usize) {
        assert!(read_offset + size <= src.size, "copy source out of bounds");
        assert!(write_offset + size <= self.size, "copy destination out of bounds");
        let gl = self.ctx.backend();
        unsafe {
            if self.ctx.direct_state_access() {
                gl.copy_named_buffer_sub_data(
                    src.obj,
                    self.obj,
                    read_offset as GLintptr,
                    write_offset as GLintptr,
                    size as GLsizeiptr,
                );
            } else {
                self.ctx.bind_buffer(gl::COPY_READ_BUFFER, src.obj);
                self.ctx.bind_buffer(gl::COPY_WRITE_BUFFER, self.obj);
                gl.copy_buffer_sub_data(
                    gl::COPY_READ_BUFFER,
                    gl::COPY_WRITE_BUFFER,
                    read_offset as GLintptr,
                    write_offset as GLintptr,
                    size as GLsizeiptr,
                );
            }
        }
    }

    pub fn label(&self, label: &str) {
        self.ctx.object_label(gl::BUFFER, self.obj, label);
    }
}

/// A mapped range of a [`Buffer`]. Unmaps the buffer when dropped.
pub struct MappedRange<'a, B: Backend = crate::api::Gl> {
    buffer: &'a Buffer<B>,
    ptr: *mut u8,
    len: usize,
}

impl<'a, B: Backend> MappedRange<'a, B> {
    fn new(buffer: &'a Buffer<B>, ptr: *mut c_void, len: usize) -> Option<MappedRange<'a, B>> {
        if ptr.is_null() {
            return None;
        }
        Some(MappedRange {
            buffer,
            ptr: ptr as *mut u8,
            len,
        })
    }

    /// Flushes `length` bytes starting at `offset` (relative to the mapped range). Only
    /// meaningful for ranges mapped with [`MapAccess::FLUSH_EXPLICIT`].
    pub fn flush(&self, offset: usize, length: usize) {
        assert!(offset + length <= self.len, "flush out of mapped range");
        let buffer = self.buffer;
        let gl = buffer.ctx.backend();
        unsafe {
            if buffer.ctx.direct_state_access() {
                gl.flush_mapped_named_buffer_range(buffer.obj, offset as GLintptr, length as GLsizeiptr);
            } else {
                let target = buffer.bind_for_edit();
                gl.flush_mapped_buffer_range(target, offset as GLintptr, length as GLsizeiptr);
            }
        }
    }
}

impl<'a, B: Backend> Deref for MappedRange<'a, B> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        unsafe { slice::from_raw_parts(self.ptr, self.len) }
    }
}

impl<'a, B: Backend> DerefMut for MappedRange<'a, B> {
    fn deref_mut(&mut self) -> &mut [u8] {
        unsafe { slice::from_raw_parts_mut(self.ptr, self.len) }
    }
}

impl<'a, B: Backend> Drop for MappedRange<'a, B> {
    fn drop(&mut self) {
        let buffer = self.buffer;
        let gl = buffer.ctx.backend();
        let ok = unsafe {
            if buffer.ctx.direct_state_access() {
                gl.unmap_named_buffer(buffer.obj)
            } else {
                let target = buffer.bind_for_edit();
                gl.unmap_buffer(target)
            }
        };
        if !ok {
            tracing::warn!(buffer = buffer.obj, "buffer contents corrupted while mapped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Capabilities;
    use crate::recording::{Call, RecordingBackend};

    fn legacy() -> Rc<Context<RecordingBackend>> {
        unsafe { Context::with_capabilities(RecordingBackend::new(), Capabilities::LEGACY) }
    }

    fn dsa() -> Rc<Context<RecordingBackend>> {
        unsafe { Context::new(RecordingBackend::new()) }
    }

    #[test]
    fn dsa_edits_without_binding() {
        let ctx = dsa();
        let mut buffer = Buffer::new(&ctx, gl::ARRAY_BUFFER);
        buffer.data(&[1.0f32, 2.0, 3.0], gl::STATIC_DRAW);
        buffer.update(4, &[5.0f32]);
        assert_eq!(buffer.size(), 12);
        assert_eq!(ctx.backend().count("glBindBuffer"), 0);
        assert_eq!(ctx.backend().count("glNamedBufferData"), 1);
        assert_eq!(ctx.backend().count("glNamedBufferSubData"), 1);
    }

    #[test]
    fn legacy_edits_bind_once() {
        let ctx = legacy();
        let mut buffer = Buffer::new(&ctx, gl::UNIFORM_BUFFER);
        buffer.allocate(256, gl::DYNAMIC_DRAW);
        buffer.update(0, &[0u32; 4]);
        buffer.update(16, &[0u32; 4]);
        assert_eq!(
            ctx.backend().calls(),
            vec![
                Call::Other("glGenBuffers"),
                Call::BindBuffer {
                    target: gl::UNIFORM_BUFFER,
                    buffer: buffer.id()
                },
                Call::Other("glBufferData"),
                Call::Other("glBufferSubData"),
                Call::Other("glBufferSubData"),
            ]
        );
    }

    #[test]
    fn bind_to_changes_target() {
        let ctx = dsa();
        let mut buffer = Buffer::new(&ctx, gl::ARRAY_BUFFER);
        buffer.bind_to(gl::SHADER_STORAGE_BUFFER);
        assert_eq!(buffer.target(), gl::SHADER_STORAGE_BUFFER);
        assert_eq!(ctx.bindings().buffer(gl::SHADER_STORAGE_BUFFER), buffer.id());
        buffer.unbind();
        assert_eq!(ctx.bindings().buffer(gl::SHADER_STORAGE_BUFFER), 0);
    }

    #[test]
    fn drop_forgets_bindings() {
        let ctx = dsa();
        let buffer = Buffer::new(&ctx, gl::ARRAY_BUFFER);
        let id = buffer.id();
        buffer.bind();
        buffer.bind_base(gl::UNIFORM_BUFFER, 1);
        drop(buffer);
        assert_eq!(ctx.backend().count("glDeleteBuffers"), 1);
        assert_eq!(ctx.bindings().buffer(gl::ARRAY_BUFFER), 0);
        assert_eq!(ctx.bindings().indexed_buffer(gl::UNIFORM_BUFFER, 1).buffer, 0);
        // the name may be handed out again: binding it must reach the driver
        ctx.bind_buffer(gl::ARRAY_BUFFER, id);
        assert_eq!(ctx.backend().count("glBindBuffer"), 2);
    }

    #[test]
    fn map_write_and_unmap() {
        let ctx = dsa();
        let mut buffer = Buffer::new(&ctx, gl::ARRAY_BUFFER);
        buffer.storage(64, None, BufferStorageFlags::MAP_WRITE);
        {
            let mut mapped = buffer
                .map_range(16, 32, MapAccess::WRITE | MapAccess::FLUSH_EXPLICIT)
                .unwrap();
            assert_eq!(mapped.len(), 32);
            mapped[..4].copy_from_slice(&[1, 2, 3, 4]);
            mapped.flush(0, 4);
        }
        assert_eq!(ctx.backend().count("glMapNamedBufferRange"), 1);
        assert_eq!(ctx.backend().count("glFlushMappedNamedBufferRange"), 1);
        assert_eq!(ctx.backend().count("glUnmapNamedBuffer"), 1);
    }

    #[test]
    fn legacy_copy_uses_copy_targets() {
        let ctx = legacy();
        let mut src = Buffer::new(&ctx, gl::ARRAY_BUFFER);
        let mut dst = Buffer::new(&ctx, gl::ARRAY_BUFFER);
        src.allocate(32, gl::STATIC_DRAW);
        dst.allocate(32, gl::STATIC_DRAW);
        dst.copy_from(&src, 0, 16, 16);
        assert_eq!(ctx.bindings().buffer(gl::COPY_READ_BUFFER), src.id());
        assert_eq!(ctx.bindings().buffer(gl::COPY_WRITE_BUFFER), dst.id());
        assert_eq!(ctx.backend().count("glCopyBufferSubData"), 1);
    }

    #[test]
    fn clear_whole_and_range() {
        let ctx = dsa();
        let mut buffer = Buffer::new(&ctx, gl::SHADER_STORAGE_BUFFER);
        buffer.allocate(64, gl::DYNAMIC_DRAW);
        buffer.clear(gl::R32UI, gl::RED_INTEGER, gl::UNSIGNED_INT, None);
        buffer.clear_range(
            gl::R32UI,
            16,
            16,
            gl::RED_INTEGER,
            gl::UNSIGNED_INT,
            Some(bytemuck::bytes_of(&7u32)),
        );
        assert_eq!(ctx.backend().count("glClearNamedBufferData"), 1);
        assert_eq!(ctx.backend().count("glClearNamedBufferSubData"), 1);
        assert_eq!(ctx.backend().count("glBindBuffer"), 0);

        let ctx = legacy();
        let mut buffer = Buffer::new(&ctx, gl::SHADER_STORAGE_BUFFER);
        buffer.allocate(64, gl::DYNAMIC_DRAW);
        ctx.backend().clear_calls();
        buffer.clear(gl::R32UI, gl::RED_INTEGER, gl::UNSIGNED_INT, None);
        buffer.clear_range(gl::R32UI, 0, 64, gl::RED_INTEGER, gl::UNSIGNED_INT, None);
        assert_eq!(
            ctx.backend().calls(),
            vec![
                Call::Other("glClearBufferData"),
                Call::Other("glClearBufferSubData")
            ]
        );
    }

    #[test]
    fn map_whole_buffer() {
        for ctx in [dsa(), legacy()] {
            let mut buffer = Buffer::new(&ctx, gl::ARRAY_BUFFER);
            buffer.data(&[0u32; 8], gl::DYNAMIC_DRAW);
            {
                let mut mapped = buffer.map(gl::WRITE_ONLY).unwrap();
                assert_eq!(mapped.len(), 32);
                mapped[0] = 1;
            }
            assert_eq!(buffer.parameter(gl::BUFFER_SIZE), 32);
        }
        let ctx = legacy();
        let mut buffer = Buffer::new(&ctx, gl::ARRAY_BUFFER);
        buffer.allocate(16, gl::STATIC_DRAW);
        drop(buffer.map(gl::READ_ONLY));
        assert_eq!(ctx.backend().count("glMapBuffer"), 1);
        assert_eq!(ctx.backend().count("glUnmapBuffer"), 1);
        assert_eq!(ctx.backend().count("glBindBuffer"), 1);
    }

    #[test]
    fn legacy_index_buffer_edits_avoid_element_target() {
        let ctx = legacy();
        ctx.bind_vertex_array(3);
        let mut indices = Buffer::new(&ctx, gl::ELEMENT_ARRAY_BUFFER);
        indices.data(&[0u16, 1, 2], gl::STATIC_DRAW);
        indices.update(2, &[5u16]);
        assert_eq!(ctx.bindings().buffer(gl::ELEMENT_ARRAY_BUFFER), 0);
        assert_eq!(ctx.bindings().buffer(gl::COPY_WRITE_BUFFER), indices.id());
        assert!(!ctx.backend().calls().contains(&Call::BindBuffer {
            target: gl::ELEMENT_ARRAY_BUFFER,
            buffer: indices.id()
        }));
        assert_eq!(indices.parameter(gl::BUFFER_SIZE), 6);
    }

    #[test]
    #[should_panic]
    fn update_past_the_end_panics() {
        let ctx = dsa();
        let mut buffer = Buffer::new(&ctx, gl::ARRAY_BUFFER);
        buffer.allocate(8, gl::STATIC_DRAW);
        buffer.update(4, &[0u32; 2]);
    }
}
