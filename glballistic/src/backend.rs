//! The native entry points used by this crate.
//!
//! [`Backend`] is implemented for the generated [`Gl`](crate::api::Gl) function table, and
//! for [`RecordingBackend`](crate::recording::RecordingBackend), which logs calls instead of
//! issuing them.
//!
//! # Safety
//!
//! All methods are `unsafe`: the caller must ensure that the GL context the backend was
//! loaded from is current on the calling thread, and that the names passed in are valid
//! for the call (same rules as the corresponding GL entry point).
use crate::api::gl::types::*;
use crate::uniform::UniformValue;
use std::os::raw::c_void;

pub trait Backend {
    // --- queries ---
    unsafe fn get_integer(&self, pname: GLenum) -> GLint;
    unsafe fn get_string(&self, name: GLenum) -> Option<String>;
    unsafe fn get_string_i(&self, name: GLenum, index: GLuint) -> Option<String>;
    unsafe fn get_error(&self) -> GLenum;

    // --- binding ---
    unsafe fn bind_buffer(&self, target: GLenum, buffer: GLuint);
    unsafe fn bind_buffer_base(&self, target: GLenum, index: GLuint, buffer: GLuint);
    unsafe fn bind_buffer_range(
        &self,
        target: GLenum,
        index: GLuint,
        buffer: GLuint,
        offset: GLintptr,
        size: GLsizeiptr,
    );
    unsafe fn bind_vertex_array(&self, array: GLuint);
    unsafe fn use_program(&self, program: GLuint);
    unsafe fn bind_renderbuffer(&self, renderbuffer: GLuint);
    unsafe fn bind_framebuffer(&self, target: GLenum, framebuffer: GLuint);
    /// Selects texture unit `GL_TEXTURE0 + unit`.
    unsafe fn active_texture(&self, unit: GLuint);
    unsafe fn bind_texture(&self, target: GLenum, texture: GLuint);
    unsafe fn bind_texture_unit(&self, unit: GLuint, texture: GLuint);
    unsafe fn bind_image_texture(
        &self,
        unit: GLuint,
        texture: GLuint,
        level: GLint,
        layered: bool,
        layer: GLint,
        access: GLenum,
        format: GLenum,
    );

    // --- object names ---
    // `create_*` are the DSA entry points (the object exists immediately), `gen_*` only
    // reserve a name that becomes an object on first bind.
    unsafe fn create_buffer(&self) -> GLuint;
    unsafe fn gen_buffer(&self) -> GLuint;
    unsafe fn delete_buffer(&self, buffer: GLuint);
    unsafe fn create_vertex_array(&self) -> GLuint;
    unsafe fn gen_vertex_array(&self) -> GLuint;
    unsafe fn delete_vertex_array(&self, array: GLuint);
    unsafe fn create_texture(&self, target: GLenum) -> GLuint;
    unsafe fn gen_texture(&self) -> GLuint;
    unsafe fn delete_texture(&self, texture: GLuint);
    unsafe fn create_renderbuffer(&self) -> GLuint;
    unsafe fn gen_renderbuffer(&self) -> GLuint;
    unsafe fn delete_renderbuffer(&self, renderbuffer: GLuint);
    unsafe fn create_framebuffer(&self) -> GLuint;
    unsafe fn gen_framebuffer(&self) -> GLuint;
    unsafe fn delete_framebuffer(&self, framebuffer: GLuint);
    unsafe fn create_program(&self) -> GLuint;
    unsafe fn delete_program(&self, program: GLuint);
    unsafe fn create_shader(&self, stage: GLenum) -> GLuint;
    unsafe fn delete_shader(&self, shader: GLuint);

    // --- buffers ---
    unsafe fn buffer_data(
        &self,
        target: GLenum,
        size: GLsizeiptr,
        data: Option<&[u8]>,
        usage: GLenum,
    );
    unsafe fn named_buffer_data(
        &self,
        buffer: GLuint,
        size: GLsizeiptr,
        data: Option<&[u8]>,
        usage: GLenum,
    );
    unsafe fn buffer_sub_data(&self, target: GLenum, offset: GLintptr, data: &[u8]);
    unsafe fn named_buffer_sub_data(&self, buffer: GLuint, offset: GLintptr, data: &[u8]);
    unsafe fn buffer_storage(
        &self,
        target: GLenum,
        size: GLsizeiptr,
        data: Option<&[u8]>,
        flags: GLbitfield,
    );
    unsafe fn named_buffer_storage(
        &self,
        buffer: GLuint,
        size: GLsizeiptr,
        data: Option<&[u8]>,
        flags: GLbitfield,
    );
    unsafe fn map_buffer_range(
        &self,
        target: GLenum,
        offset: GLintptr,
        length: GLsizeiptr,
        access: GLbitfield,
    ) -> *mut c_void;
    unsafe fn map_named_buffer_range(
        &self,
        buffer: GLuint,
        offset: GLintptr,
        length: GLsizeiptr,
        access: GLbitfield,
    ) -> *mut c_void;
    unsafe fn flush_mapped_buffer_range(&self, target: GLenum, offset: GLintptr, length: GLsizeiptr);
    unsafe fn flush_mapped_named_buffer_range(
        &self,
        buffer: GLuint,
        offset: GLintptr,
        length: GLsizeiptr,
    );
    unsafe fn unmap_buffer(&self, target: GLenum) -> bool;
    unsafe fn unmap_named_buffer(&self, buffer: GLuint) -> bool;
    unsafe fn copy_buffer_sub_data(
        &self,
        read_target: GLenum,
        write_target: GLenum,
        read_offset: GLintptr,
        write_offset: GLintptr,
        size: GLsizeiptr,
    );
    unsafe fn copy_named_buffer_sub_data(
        &self,
        read_buffer: GLuint,
        write_buffer: GLuint,
        read_offset: GLintptr,
        write_offset: GLintptr,
        size: GLsizeiptr,
    );
    /// `data` holds one element of `format`/`ty`; `None` fills with zeros.
    unsafe fn clear_buffer_data(
        &self,
        target: GLenum,
        internal_format: GLenum,
        format: GLenum,
        ty: GLenum,
        data: Option<&[u8]>,
    );
    unsafe fn clear_named_buffer_data(
        &self,
        buffer: GLuint,
        internal_format: GLenum,
        format: GLenum,
        ty: GLenum,
        data: Option<&[u8]>,
    );
    #[allow(clippy::too_many_arguments)]
    unsafe fn clear_buffer_sub_data(
        &self,
        target: GLenum,
        internal_format: GLenum,
        offset: GLintptr,
        size: GLsizeiptr,
        format: GLenum,
        ty: GLenum,
        data: Option<&[u8]>,
    );
    #[allow(clippy::too_many_arguments)]
    unsafe fn clear_named_buffer_sub_data(
        &self,
        buffer: GLuint,
        internal_format: GLenum,
        offset: GLintptr,
        size: GLsizeiptr,
        format: GLenum,
        ty: GLenum,
        data: Option<&[u8]>,
    );
    unsafe fn map_buffer(&self, target: GLenum, access: GLenum) -> *mut c_void;
    unsafe fn map_named_buffer(&self, buffer: GLuint, access: GLenum) -> *mut c_void;
    unsafe fn get_buffer_parameter_iv(&self, target: GLenum, pname: GLenum) -> GLint;
    unsafe fn get_named_buffer_parameter_iv(&self, buffer: GLuint, pname: GLenum) -> GLint;

    // --- vertex arrays ---
    unsafe fn vertex_array_vertex_buffer(
        &self,
        array: GLuint,
        binding: GLuint,
        buffer: GLuint,
        offset: GLintptr,
        stride: GLsizei,
    );
    unsafe fn bind_vertex_buffer(&self, binding: GLuint, buffer: GLuint, offset: GLintptr, stride: GLsizei);
    unsafe fn vertex_array_element_buffer(&self, array: GLuint, buffer: GLuint);
    unsafe fn enable_vertex_array_attrib(&self, array: GLuint, index: GLuint);
    unsafe fn enable_vertex_attrib_array(&self, index: GLuint);
    unsafe fn disable_vertex_array_attrib(&self, array: GLuint, index: GLuint);
    unsafe fn disable_vertex_attrib_array(&self, index: GLuint);
    unsafe fn vertex_array_attrib_format(
        &self,
        array: GLuint,
        index: GLuint,
        size: GLint,
        ty: GLenum,
        normalized: bool,
        relative_offset: GLuint,
    );
    unsafe fn vertex_attrib_format(
        &self,
        index: GLuint,
        size: GLint,
        ty: GLenum,
        normalized: bool,
        relative_offset: GLuint,
    );
    unsafe fn vertex_array_attrib_binding(&self, array: GLuint, index: GLuint, binding: GLuint);
    unsafe fn vertex_attrib_binding(&self, index: GLuint, binding: GLuint);
    unsafe fn vertex_array_binding_divisor(&self, array: GLuint, binding: GLuint, divisor: GLuint);
    unsafe fn vertex_binding_divisor(&self, binding: GLuint, divisor: GLuint);
    unsafe fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei);
    unsafe fn draw_arrays_instanced(&self, mode: GLenum, first: GLint, count: GLsizei, instances: GLsizei);
    /// `offset` is a byte offset into the bound element array buffer.
    unsafe fn draw_elements(&self, mode: GLenum, count: GLsizei, ty: GLenum, offset: usize);
    unsafe fn draw_elements_instanced(
        &self,
        mode: GLenum,
        count: GLsizei,
        ty: GLenum,
        offset: usize,
        instances: GLsizei,
    );

    // --- textures ---
    unsafe fn tex_storage_2d(
        &self,
        target: GLenum,
        levels: GLsizei,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
    );
    unsafe fn tex_sub_image_2d(
        &self,
        target: GLenum,
        level: GLint,
        x: GLint,
        y: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        ty: GLenum,
        data: &[u8],
    );
    unsafe fn get_tex_image(
        &self,
        target: GLenum,
        level: GLint,
        format: GLenum,
        ty: GLenum,
        data: &mut [u8],
    );
    unsafe fn generate_mipmap(&self, target: GLenum);
    unsafe fn tex_parameter_i(&self, target: GLenum, pname: GLenum, param: GLint);
    unsafe fn pixel_store_i(&self, pname: GLenum, param: GLint);

    // --- renderbuffers ---
    unsafe fn renderbuffer_storage(&self, internal_format: GLenum, width: GLsizei, height: GLsizei);
    unsafe fn named_renderbuffer_storage(
        &self,
        renderbuffer: GLuint,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
    );
    unsafe fn renderbuffer_storage_multisample(
        &self,
        samples: GLsizei,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
    );
    unsafe fn named_renderbuffer_storage_multisample(
        &self,
        renderbuffer: GLuint,
        samples: GLsizei,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
    );

    // --- framebuffers ---
    unsafe fn framebuffer_texture_2d(
        &self,
        target: GLenum,
        attachment: GLenum,
        texture_target: GLenum,
        texture: GLuint,
        level: GLint,
    );
    unsafe fn named_framebuffer_texture(
        &self,
        framebuffer: GLuint,
        attachment: GLenum,
        texture: GLuint,
        level: GLint,
    );
    unsafe fn framebuffer_renderbuffer(&self, target: GLenum, attachment: GLenum, renderbuffer: GLuint);
    unsafe fn named_framebuffer_renderbuffer(
        &self,
        framebuffer: GLuint,
        attachment: GLenum,
        renderbuffer: GLuint,
    );
    unsafe fn draw_buffers(&self, buffers: &[GLenum]);
    unsafe fn named_framebuffer_draw_buffers(&self, framebuffer: GLuint, buffers: &[GLenum]);
    unsafe fn check_framebuffer_status(&self, target: GLenum) -> GLenum;
    unsafe fn check_named_framebuffer_status(&self, framebuffer: GLuint, target: GLenum) -> GLenum;

    // --- programs ---
    unsafe fn shader_source(&self, shader: GLuint, source: &str);
    unsafe fn compile_shader(&self, shader: GLuint);
    unsafe fn get_shader_iv(&self, shader: GLuint, pname: GLenum) -> GLint;
    unsafe fn get_shader_info_log(&self, shader: GLuint) -> String;
    unsafe fn attach_shader(&self, program: GLuint, shader: GLuint);
    unsafe fn detach_shader(&self, program: GLuint, shader: GLuint);
    unsafe fn link_program(&self, program: GLuint);
    unsafe fn validate_program(&self, program: GLuint);
    unsafe fn get_program_iv(&self, program: GLuint, pname: GLenum) -> GLint;
    unsafe fn get_program_info_log(&self, program: GLuint) -> String;
    unsafe fn get_uniform_location(&self, program: GLuint, name: &str) -> GLint;
    unsafe fn get_attrib_location(&self, program: GLuint, name: &str) -> GLint;
    unsafe fn get_active_uniform_name(&self, program: GLuint, index: GLuint) -> String;
    /// Sets a uniform of the program currently in use.
    unsafe fn uniform(&self, location: GLint, value: &UniformValue);
    unsafe fn dispatch_compute(&self, x: GLuint, y: GLuint, z: GLuint);
    unsafe fn memory_barrier(&self, barriers: GLbitfield);

    // --- misc state ---
    unsafe fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    unsafe fn clear(&self, mask: GLbitfield);
    unsafe fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei);
    unsafe fn scissor(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei);
    unsafe fn color_mask(&self, r: bool, g: bool, b: bool, a: bool);
    unsafe fn object_label(&self, identifier: GLenum, name: GLuint, label: &str);
}
