use crate::api::gl;
use crate::api::gl::types::*;
use crate::backend::Backend;
use crate::buffer::Buffer;
use crate::context::Context;
use std::rc::Rc;

/// Layout of one vertex attribute within a vertex buffer binding.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct AttribFormat {
    /// Number of components (1 to 4).
    pub size: GLint,
    /// Component type (`GL_FLOAT`, `GL_UNSIGNED_BYTE`...).
    pub ty: GLenum,
    pub normalized: bool,
    /// Byte offset of the attribute relative to the start of the vertex.
    pub relative_offset: GLuint,
}

impl AttribFormat {
    pub const fn float(size: GLint, relative_offset: GLuint) -> AttribFormat {
        AttribFormat {
            size,
            ty: gl::FLOAT,
            normalized: false,
            relative_offset,
        }
    }
}

impl_handle_type!(
    /// Vertex array object.
    pub struct VertexArray {
        index_type: GLenum
    }
);

impl<B: Backend> Drop for VertexArray<B> {
    fn drop(&mut self) {
        unsafe { self.ctx.backend().delete_vertex_array(self.obj) }
        self.ctx.bindings_mut().forget_vertex_array(self.obj);
    }
}

impl<B: Backend> VertexArray<B> {
    pub fn new(ctx: &Rc<Context<B>>) -> VertexArray<B> {
        let obj = unsafe {
            if ctx.direct_state_access() {
                ctx.backend().create_vertex_array()
            } else {
                ctx.backend().gen_vertex_array()
            }
        };
        VertexArray {
            ctx: ctx.clone(),
            obj,
            index_type: gl::UNSIGNED_INT,
        }
    }

    pub fn bind(&self) {
        self.ctx.bind_vertex_array(self.obj);
    }

    pub fn unbind(&self) {
        self.ctx.bind_vertex_array(0);
    }

    /// Type of the indices used by [`VertexArray::draw_elements`].
    pub fn index_type(&self) -> GLenum {
        self.index_type
    }

    /// Attaches `buffer` to vertex buffer binding `binding`.
    pub fn vertex_buffer(&self, binding: GLuint, buffer: &Buffer<B>, offset: usize, stride: usize) {
        let gl = self.ctx.backend();
        unsafe {
            if self.ctx.direct_state_access() {
                gl.vertex_array_vertex_buffer(
                    self.obj,
                    binding,
                    buffer.id(),
                    offset as GLintptr,
                    stride as GLsizei,
                );
            } else {
                self.bind();
                gl.bind_vertex_buffer(binding, buffer.id(), offset as GLintptr, stride as GLsizei);
            }
        }
    }

    /// Sets the element array buffer, holding indices of type `index_type`.
    pub fn index_buffer(&mut self, buffer: &Buffer<B>, index_type: GLenum) {
        self.index_type = index_type;
        let gl = self.ctx.backend();
        unsafe {
            if self.ctx.direct_state_access() {
                gl.vertex_array_element_buffer(self.obj, buffer.id());
            } else {
                // recorded for this vertex array only; binding another one drops the record
                self.bind();
                self.ctx.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, buffer.id());
            }
        }
    }

    /// Enables attribute `index` and sets its format and source binding.
    pub fn attrib(&self, index: GLuint, format: AttribFormat, binding: GLuint) {
        let gl = self.ctx.backend();
        let AttribFormat {
            size,
            ty,
            normalized,
            relative_offset,
        } = format;
        unsafe {
            if self.ctx.direct_state_access() {
                gl.enable_vertex_array_attrib(self.obj, index);
                gl.vertex_array_attrib_format(self.obj, index, size, ty, normalized, relative_offset);
                gl.vertex_array_attrib_binding(self.obj, index, binding);
            } else {
                self.bind();
                gl.enable_vertex_attrib_array(index);
                gl.vertex_attrib_format(index, size, ty, normalized, relative_offset);
                gl.vertex_attrib_binding(index, binding);
            }
        }
    }

    pub fn enable_attrib(&self, index: GLuint) {
        let gl = self.ctx.backend();
        unsafe {
            if self.ctx.direct_state_access() {
                gl.enable_vertex_array_attrib(self.obj, index);
            } else {
                self.bind();
                gl.enable_vertex_attrib_array(index);
            }
        }
    }

    pub fn disable_attrib(&self, index: GLuint) {
        let gl = self.ctx.backend();
        unsafe {
            if self.ctx.direct_state_access() {
                gl.disable_vertex_array_attrib(self.obj, index);
            } else {
                self.bind();
                gl.disable_vertex_attrib_array(index);
            }
        }
    }

    /// Sets the instance divisor of vertex buffer binding `binding`.
    pub fn binding_divisor(&self, binding: GLuint, divisor: GLuint) {
        let gl = self.ctx.backend();
        unsafe {
            if self.ctx.direct_state_access() {
                gl.vertex_array_binding_divisor(self.obj, binding, divisor);
            } else {
                self.bind();
                gl.vertex_binding_divisor(binding, divisor);
            }
        }
    }

    /// Binds the vertex array and draws `count` vertices starting at `first`. Draws
    /// instanced if `instances > 1`.
    pub fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei, instances: GLsizei) {
        self.bind();
        let gl = self.ctx.backend();
        unsafe {
            if instances > 1 {
                gl.draw_arrays_instanced(mode, first, count, instances);
            } else {
                gl.draw_arrays(mode, first, count);
            }
        }
    }

    /// Binds the vertex array and draws `count` indexed vertices, reading indices from byte
    /// `offset` of the element array buffer. Draws instanced if `instances > 1`.
    pub fn draw_elements(&self, mode: GLenum, count: GLsizei, offset: usize, instances: GLsizei) {
        self.bind();
        let gl = self.ctx.backend();
        unsafe {
            if instances > 1 {
                gl.draw_elements_instanced(mode, count, self.index_type, offset, instances);
            } else {
                gl.draw_elements(mode, count, self.index_type, offset);
            }
        }
    }

    pub fn label(&self, label: &str) {
        self.ctx.object_label(gl::VERTEX_ARRAY, self.obj, label);
    }
}
