//! Generated OpenGL bindings and their [`Backend`] implementation.
use crate::backend::Backend;
use crate::uniform::UniformValue;
use self::gl::types::*;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_void};
use std::ptr;

#[allow(clippy::all, non_upper_case_globals, non_snake_case, non_camel_case_types, unused)]
pub mod gl {
    include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
}

pub use self::gl::Gl;

fn data_ptr(data: Option<&[u8]>) -> *const c_void {
    data.map_or(ptr::null(), |d| d.as_ptr() as *const c_void)
}

unsafe fn string_from_ptr(s: *const GLubyte) -> Option<String> {
    if s.is_null() {
        None
    } else {
        Some(CStr::from_ptr(s as *const c_char).to_string_lossy().into_owned())
    }
}

fn log_from_buffer(mut buf: Vec<u8>, written: GLsizei) -> String {
    buf.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buf).into_owned()
}

fn gl_bool(b: bool) -> GLboolean {
    if b {
        gl::TRUE
    } else {
        gl::FALSE
    }
}

impl Backend for Gl {
    unsafe fn get_integer(&self, pname: GLenum) -> GLint {
        let mut v = 0;
        self.GetIntegerv(pname, &mut v);
        v
    }

    unsafe fn get_string(&self, name: GLenum) -> Option<String> {
        string_from_ptr(self.GetString(name))
    }

    unsafe fn get_string_i(&self, name: GLenum, index: GLuint) -> Option<String> {
        string_from_ptr(self.GetStringi(name, index))
    }

    unsafe fn get_error(&self) -> GLenum {
        self.GetError()
    }

    unsafe fn bind_buffer(&self, target: GLenum, buffer: GLuint) {
        self.BindBuffer(target, buffer)
    }

    unsafe fn bind_buffer_base(&self, target: GLenum, index: GLuint, buffer: GLuint) {
        self.BindBufferBase(target, index, buffer)
    }

    unsafe fn bind_buffer_range(
        &self,
        target: GLenum,
        index: GLuint,
        buffer: GLuint,
        offset: GLintptr,
        size: GLsizeiptr,
    ) {
        self.BindBufferRange(target, index, buffer, offset, size)
    }

    unsafe fn bind_vertex_array(&self, array: GLuint) {
        self.BindVertexArray(array)
    }

    unsafe fn use_program(&self, program: GLuint) {
        self.UseProgram(program)
    }

    unsafe fn bind_renderbuffer(&self, renderbuffer: GLuint) {
        self.BindRenderbuffer(gl::RENDERBUFFER, renderbuffer)
    }

    unsafe fn bind_framebuffer(&self, target: GLenum, framebuffer: GLuint) {
        self.BindFramebuffer(target, framebuffer)
    }

    unsafe fn active_texture(&self, unit: GLuint) {
        self.ActiveTexture(gl::TEXTURE0 + unit)
    }

    unsafe fn bind_texture(&self, target: GLenum, texture: GLuint) {
        self.BindTexture(target, texture)
    }

    unsafe fn bind_texture_unit(&self, unit: GLuint, texture: GLuint) {
        self.BindTextureUnit(unit, texture)
    }

    unsafe fn bind_image_texture(
        &self,
        unit: GLuint,
        texture: GLuint,
        level: GLint,
        layered: bool,
        layer: GLint,
        access: GLenum,
        format: GLenum,
    ) {
        self.BindImageTexture(unit, texture, level, gl_bool(layered), layer, access, format)
    }

    unsafe fn create_buffer(&self) -> GLuint {
        let mut obj = 0;
        self.CreateBuffers(1, &mut obj);
        obj
    }

    unsafe fn gen_buffer(&self) -> GLuint {
        let mut obj = 0;
        self.GenBuffers(1, &mut obj);
        obj
    }

    unsafe fn delete_buffer(&self, buffer: GLuint) {
        self.DeleteBuffers(1, &buffer)
    }

    unsafe fn create_vertex_array(&self) -> GLuint {
        let mut obj = 0;
        self.CreateVertexArrays(1, &mut obj);
        obj
    }

    unsafe fn gen_vertex_array(&self) -> GLuint {
        let mut obj = 0;
        self.GenVertexArrays(1, &mut obj);
        obj
    }

    unsafe fn delete_vertex_array(&self, array: GLuint) {
        self.DeleteVertexArrays(1, &array)
    }

    unsafe fn create_texture(&self, target: GLenum) -> GLuint {
        let mut obj = 0;
        self.CreateTextures(target, 1, &mut obj);
        obj
    }

    unsafe fn gen_texture(&self) -> GLuint {
        let mut obj = 0;
        self.GenTextures(1, &mut obj);
        obj
    }

    unsafe fn delete_texture(&self, texture: GLuint) {
        self.DeleteTextures(1, &texture)
    }

    unsafe fn create_renderbuffer(&self) -> GLuint {
        let mut obj = 0;
        self.CreateRenderbuffers(1, &mut obj);
        obj
    }

    unsafe fn gen_renderbuffer(&self) -> GLuint {
        let mut obj = 0;
        self.GenRenderbuffers(1, &mut obj);
        obj
    }

    unsafe fn delete_renderbuffer(&self, renderbuffer: GLuint) {
        self.DeleteRenderbuffers(1, &renderbuffer)
    }

    unsafe fn create_framebuffer(&self) -> GLuint {
        let mut obj = 0;
        self.CreateFramebuffers(1, &mut obj);
        obj
    }

    unsafe fn gen_framebuffer(&self) -> GLuint {
        let mut obj = 0;
        self.GenFramebuffers(1, &mut obj);
        obj
    }

    unsafe fn delete_framebuffer(&self, framebuffer: GLuint) {
        self.DeleteFramebuffers(1, &framebuffer)
    }

    unsafe fn create_program(&self) -> GLuint {
        self.CreateProgram()
    }

    unsafe fn delete_program(&self, program: GLuint) {
        self.DeleteProgram(program)
    }

    unsafe fn create_shader(&self, stage: GLenum) -> GLuint {
        self.CreateShader(stage)
    }

    unsafe fn delete_shader(&self, shader: GLuint) {
        self.DeleteShader(shader)
    }

    unsafe fn buffer_data(
        &self,
        target: GLenum,
        size: GLsizeiptr,
        data: Option<&[u8]>,
        usage: GLenum,
    ) {
        self.BufferData(target, size, data_ptr(data), usage)
    }

    unsafe fn named_buffer_data(
        &self,
        buffer: GLuint,
        size: GLsizeiptr,
        data: Option<&[u8]>,
        usage: GLenum,
    ) {
        self.NamedBufferData(buffer, size, data_ptr(data), usage)
    }

    unsafe fn buffer_sub_data(&self, target: GLenum, offset: GLintptr, data: &[u8]) {
        self.BufferSubData(
            target,
            offset,
            data.len() as GLsizeiptr,
            data.as_ptr() as *const c_void,
        )
    }

    unsafe fn named_buffer_sub_data(&self, buffer: GLuint, offset: GLintptr, data: &[u8]) {
        self.NamedBufferSubData(
            buffer,
            offset,
            data.len() as GLsizeiptr,
            data.as_ptr() as *const c_void,
        )
    }

    unsafe fn buffer_storage(
        &self,
        target: GLenum,
        size: GLsizeiptr,
        data: Option<&[u8]>,
        flags: GLbitfield,
    ) {
        self.BufferStorage(target, size, data_ptr(data), flags)
    }

    unsafe fn named_buffer_storage(
        &self,
        buffer: GLuint,
        size: GLsizeiptr,
        data: Option<&[u8]>,
        flags: GLbitfield,
    ) {
        self.NamedBufferStorage(buffer, size, data_ptr(data), flags)
    }

    unsafe fn map_buffer_range(
        &self,
        target: GLenum,
        offset: GLintptr,
        length: GLsizeiptr,
        access: GLbitfield,
    ) -> *mut c_void {
        self.MapBufferRange(target, offset, length, access)
    }

    unsafe fn map_named_buffer_range(
        &self,
        buffer: GLuint,
        offset: GLintptr,
        length: GLsizeiptr,
        access: GLbitfield,
    ) -> *mut c_void {
        self.MapNamedBufferRange(buffer, offset, length, access)
    }

    unsafe fn flush_mapped_buffer_range(&self, target: GLenum, offset: GLintptr, length: GLsizeiptr) {
        self.FlushMappedBufferRange(target, offset, length)
    }

    unsafe fn flush_mapped_named_buffer_range(
        &self,
        buffer: GLuint,
        offset: GLintptr,
        length: GLsizeiptr,
    ) {
        self.FlushMappedNamedBufferRange(buffer, offset, length)
    }

    unsafe fn unmap_buffer(&self, target: GLenum) -> bool {
        self.UnmapBuffer(target) == gl::TRUE
    }

    unsafe fn unmap_named_buffer(&self, buffer: GLuint) -> bool {
        self.UnmapNamedBuffer(buffer) == gl::TRUE
    }

    unsafe fn copy_buffer_sub_data(
        &self,
        read_target: GLenum,
        write_target: GLenum,
        read_offset: GLintptr,
        write_offset: GLintptr,
        size: GLsizeiptr,
    ) {
        self.CopyBufferSubData(read_target, write_target, read_offset, write_offset, size)
    }

    unsafe fn copy_named_buffer_sub_data(
        &self,
        read_buffer: GLuint,
        write_buffer: GLuint,
        read_offset: GLintptr,
        write_offset: GLintptr,
        size: GLsizeiptr,
    ) {
        self.CopyNamedBufferSubData(read_buffer, write_buffer, read_offset, write_offset, size)
    }

    unsafe fn clear_buffer_data(
        &self,
        target: GLenum,
        internal_format: GLenum,
        format: GLenum,
        ty: GLenum,
        data: Option<&[u8]>,
    ) {
        self.ClearBufferData(target, internal_format, format, ty, data_ptr(data))
    }

    unsafe fn clear_named_buffer_data(
        &self,
        buffer: GLuint,
        internal_format: GLenum,
        format: GLenum,
        ty: GLenum,
        data: Option<&[u8]>,
    ) {
        self.ClearNamedBufferData(buffer, internal_format, format, ty, data_ptr(data))
    }

    unsafe fn clear_buffer_sub_data(
        &self,
        target: GLenum,
        internal_format: GLenum,
        offset: GLintptr,
        size: GLsizeiptr,
        format: GLenum,
        ty: GLenum,
        data: Option<&[u8]>,
    ) {
        self.ClearBufferSubData(
            target,
            internal_format,
            offset,
            size,
            format,
            ty,
            data_ptr(data),
        )
    }

    unsafe fn clear_named_buffer_sub_data(
        &self,
        buffer: GLuint,
        internal_format: GLenum,
        offset: GLintptr,
        size: GLsizeiptr,
        format: GLenum,
        ty: GLenum,
        data: Option<&[u8]>,
    ) {
        self.ClearNamedBufferSubData(
            buffer,
            internal_format,
            offset,
            size,
            format,
            ty,
            data_ptr(data),
        )
    }

    unsafe fn map_buffer(&self, target: GLenum, access: GLenum) -> *mut c_void {
        self.MapBuffer(target, access)
    }

    unsafe fn map_named_buffer(&self, buffer: GLuint, access: GLenum) -> *mut c_void {
        self.MapNamedBuffer(buffer, access)
    }

    unsafe fn get_buffer_parameter_iv(&self, target: GLenum, pname: GLenum) -> GLint {
        let mut v = 0;
        self.GetBufferParameteriv(target, pname, &mut v);
        v
    }

    unsafe fn get_named_buffer_parameter_iv(&self, buffer: GLuint, pname: GLenum) -> GLint {
        let mut v = 0;
        self.GetNamedBufferParameteriv(buffer, pname, &mut v);
        v
    }

    unsafe fn vertex_array_vertex_buffer(
        &self,
        array: GLuint,
        binding: GLuint,
        buffer: GLuint,
        offset: GLintptr,
        stride: GLsizei,
    ) {
        self.VertexArrayVertexBuffer(array, binding, buffer, offset, stride)
    }

    unsafe fn bind_vertex_buffer(&self, binding: GLuint, buffer: GLuint, offset: GLintptr, stride: GLsizei) {
        self.BindVertexBuffer(binding, buffer, offset, stride)
    }

    unsafe fn vertex_array_element_buffer(&self, array: GLuint, buffer: GLuint) {
        self.VertexArrayElementBuffer(array, buffer)
    }

    unsafe fn enable_vertex_array_attrib(&self, array: GLuint, index: GLuint) {
        self.EnableVertexArrayAttrib(array, index)
    }

    unsafe fn enable_vertex_attrib_array(&self, index: GLuint) {
        self.EnableVertexAttribArray(index)
    }

    unsafe fn disable_vertex_array_attrib(&self, array: GLuint, index: GLuint) {
        self.DisableVertexArrayAttrib(array, index)
    }

    unsafe fn disable_vertex_attrib_array(&self, index: GLuint) {
        self.DisableVertexAttribArray(index)
    }

    unsafe fn vertex_array_attrib_format(
        &self,
        array: GLuint,
        index: GLuint,
        size: GLint,
        ty: GLenum,
        normalized: bool,
        relative_offset: GLuint,
    ) {
        self.VertexArrayAttribFormat(array, index, size, ty, gl_bool(normalized), relative_offset)
    }

    unsafe fn vertex_attrib_format(
        &self,
        index: GLuint,
        size: GLint,
        ty: GLenum,
        normalized: bool,
        relative_offset: GLuint,
    ) {
        self.VertexAttribFormat(index, size, ty, gl_bool(normalized), relative_offset)
    }

    unsafe fn vertex_array_attrib_binding(&self, array: GLuint, index: GLuint, binding: GLuint) {
        self.VertexArrayAttribBinding(array, index, binding)
    }

    unsafe fn vertex_attrib_binding(&self, index: GLuint, binding: GLuint) {
        self.VertexAttribBinding(index, binding)
    }

    unsafe fn vertex_array_binding_divisor(&self, array: GLuint, binding: GLuint, divisor: GLuint) {
        self.VertexArrayBindingDivisor(array, binding, divisor)
    }

    unsafe fn vertex_binding_divisor(&self, binding: GLuint, divisor: GLuint) {
        self.VertexBindingDivisor(binding, divisor)
    }

    unsafe fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei) {
        self.DrawArrays(mode, first, count)
    }

    unsafe fn draw_arrays_instanced(&self, mode: GLenum, first: GLint, count: GLsizei, instances: GLsizei) {
        self.DrawArraysInstanced(mode, first, count, instances)
    }

    unsafe fn draw_elements(&self, mode: GLenum, count: GLsizei, ty: GLenum, offset: usize) {
        self.DrawElements(mode, count, ty, offset as *const c_void)
    }

    unsafe fn draw_elements_instanced(
        &self,
        mode: GLenum,
        count: GLsizei,
        ty: GLenum,
        offset: usize,
        instances: GLsizei,
    ) {
        self.DrawElementsInstanced(mode, count, ty, offset as *const c_void, instances)
    }

    unsafe fn tex_storage_2d(
        &self,
        target: GLenum,
        levels: GLsizei,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
    ) {
        self.TexStorage2D(target, levels, internal_format, width, height)
    }

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
    ) {
        self.TexSubImage2D(
            target,
            level,
            x,
            y,
            width,
            height,
            format,
            ty,
            data.as_ptr() as *const c_void,
        )
    }

    unsafe fn get_tex_image(
        &self,
        target: GLenum,
        level: GLint,
        format: GLenum,
        ty: GLenum,
        data: &mut [u8],
    ) {
        self.GetTexImage(target, level, format, ty, data.as_mut_ptr() as *mut c_void)
    }

    unsafe fn generate_mipmap(&self, target: GLenum) {
        self.GenerateMipmap(target)
    }

    unsafe fn tex_parameter_i(&self, target: GLenum, pname: GLenum, param: GLint) {
        self.TexParameteri(target, pname, param)
    }

    unsafe fn pixel_store_i(&self, pname: GLenum, param: GLint) {
        self.PixelStorei(pname, param)
    }

    unsafe fn renderbuffer_storage(&self, internal_format: GLenum, width: GLsizei, height: GLsizei) {
        self.RenderbufferStorage(gl::RENDERBUFFER, internal_format, width, height)
    }

    unsafe fn named_renderbuffer_storage(
        &self,
        renderbuffer: GLuint,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
    ) {
        self.NamedRenderbufferStorage(renderbuffer, internal_format, width, height)
    }

    unsafe fn renderbuffer_storage_multisample(
        &self,
        samples: GLsizei,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
    ) {
        self.RenderbufferStorageMultisample(gl::RENDERBUFFER, samples, internal_format, width, height)
    }

    unsafe fn named_renderbuffer_storage_multisample(
        &self,
        renderbuffer: GLuint,
        samples: GLsizei,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
    ) {
        self.NamedRenderbufferStorageMultisample(renderbuffer, samples, internal_format, width, height)
    }

    unsafe fn framebuffer_texture_2d(
        &self,
        target: GLenum,
        attachment: GLenum,
        texture_target: GLenum,
        texture: GLuint,
        level: GLint,
    ) {
        self.FramebufferTexture2D(target, attachment, texture_target, texture, level)
    }

    unsafe fn named_framebuffer_texture(
        &self,
        framebuffer: GLuint,
        attachment: GLenum,
        texture: GLuint,
        level: GLint,
    ) {
        self.NamedFramebufferTexture(framebuffer, attachment, texture, level)
    }

    unsafe fn framebuffer_renderbuffer(&self, target: GLenum, attachment: GLenum, renderbuffer: GLuint) {
        self.FramebufferRenderbuffer(target, attachment, gl::RENDERBUFFER, renderbuffer)
    }

    unsafe fn named_framebuffer_renderbuffer(
        &self,
        framebuffer: GLuint,
        attachment: GLenum,
        renderbuffer: GLuint,
    ) {
        self.NamedFramebufferRenderbuffer(framebuffer, attachment, gl::RENDERBUFFER, renderbuffer)
    }

    unsafe fn draw_buffers(&self, buffers: &[GLenum]) {
        self.DrawBuffers(buffers.len() as GLsizei, buffers.as_ptr())
    }

    unsafe fn named_framebuffer_draw_buffers(&self, framebuffer: GLuint, buffers: &[GLenum]) {
        self.NamedFramebufferDrawBuffers(framebuffer, buffers.len() as GLsizei, buffers.as_ptr())
    }

    unsafe fn check_framebuffer_status(&self, target: GLenum) -> GLenum {
        self.CheckFramebufferStatus(target)
    }

    unsafe fn check_named_framebuffer_status(&self, framebuffer: GLuint, target: GLenum) -> GLenum {
        self.CheckNamedFramebufferStatus(framebuffer, target)
    }

    unsafe fn shader_source(&self, shader: GLuint, source: &str) {
        let srcs = [source.as_ptr() as *const GLchar];
        let lens = [source.len() as GLint];
        self.ShaderSource(shader, 1, srcs.as_ptr(), lens.as_ptr())
    }

    unsafe fn compile_shader(&self, shader: GLuint) {
        self.CompileShader(shader)
    }

    unsafe fn get_shader_iv(&self, shader: GLuint, pname: GLenum) -> GLint {
        let mut v = 0;
        self.GetShaderiv(shader, pname, &mut v);
        v
    }

    unsafe fn get_shader_info_log(&self, shader: GLuint) -> String {
        let len = Backend::get_shader_iv(self, shader, gl::INFO_LOG_LENGTH);
        if len <= 0 {
            return String::new();
        }
        let mut buf = vec![0u8; len as usize];
        let mut written = 0;
        self.GetShaderInfoLog(shader, len, &mut written, buf.as_mut_ptr() as *mut GLchar);
        log_from_buffer(buf, written)
    }

    unsafe fn attach_shader(&self, program: GLuint, shader: GLuint) {
        self.AttachShader(program, shader)
    }

    unsafe fn detach_shader(&self, program: GLuint, shader: GLuint) {
        self.DetachShader(program, shader)
    }

    unsafe fn link_program(&self, program: GLuint) {
        self.LinkProgram(program)
    }

    unsafe fn validate_program(&self, program: GLuint) {
        self.ValidateProgram(program)
    }

    unsafe fn get_program_iv(&self, program: GLuint, pname: GLenum) -> GLint {
        let mut v = 0;
        self.GetProgramiv(program, pname, &mut v);
        v
    }

    unsafe fn get_program_info_log(&self, program: GLuint) -> String {
        let len = Backend::get_program_iv(self, program, gl::INFO_LOG_LENGTH);
        if len <= 0 {
            return String::new();
        }
        let mut buf = vec![0u8; len as usize];
        let mut written = 0;
        self.GetProgramInfoLog(program, len, &mut written, buf.as_mut_ptr() as *mut GLchar);
        log_from_buffer(buf, written)
    }

    unsafe fn get_uniform_location(&self, program: GLuint, name: &str) -> GLint {
        match CString::new(name) {
            Ok(name) => self.GetUniformLocation(program, name.as_ptr()),
            Err(_) => -1,
        }
    }

    unsafe fn get_attrib_location(&self, program: GLuint, name: &str) -> GLint {
        match CString::new(name) {
            Ok(name) => self.GetAttribLocation(program, name.as_ptr()),
            Err(_) => -1,
        }
    }

    unsafe fn get_active_uniform_name(&self, program: GLuint, index: GLuint) -> String {
        let max_len = Backend::get_program_iv(self, program, gl::ACTIVE_UNIFORM_MAX_LENGTH);
        if max_len <= 0 {
            return String::new();
        }
        let mut buf = vec![0u8; max_len as usize];
        let mut written = 0;
        let mut size = 0;
        let mut ty = 0;
        self.GetActiveUniform(
            program,
            index,
            max_len,
            &mut written,
            &mut size,
            &mut ty,
            buf.as_mut_ptr() as *mut GLchar,
        );
        log_from_buffer(buf, written)
    }

    unsafe fn uniform(&self, location: GLint, value: &UniformValue) {
        match value {
            UniformValue::Int(v) => self.Uniform1i(location, *v),
            UniformValue::IVec2(v) => self.Uniform2iv(location, 1, v.as_ptr()),
            UniformValue::IVec3(v) => self.Uniform3iv(location, 1, v.as_ptr()),
            UniformValue::IVec4(v) => self.Uniform4iv(location, 1, v.as_ptr()),
            UniformValue::Float(v) => self.Uniform1f(location, *v),
            UniformValue::Vec2(v) => self.Uniform2fv(location, 1, v.as_ptr()),
            UniformValue::Vec3(v) => self.Uniform3fv(location, 1, v.as_ptr()),
            UniformValue::Vec4(v) => self.Uniform4fv(location, 1, v.as_ptr()),
            UniformValue::Mat3(m) => {
                self.UniformMatrix3fv(location, 1, gl::FALSE, m.as_ptr() as *const GLfloat)
            }
            UniformValue::Mat4(m) => {
                self.UniformMatrix4fv(location, 1, gl::FALSE, m.as_ptr() as *const GLfloat)
            }
        }
    }

    unsafe fn dispatch_compute(&self, x: GLuint, y: GLuint, z: GLuint) {
        self.DispatchCompute(x, y, z)
    }

    unsafe fn memory_barrier(&self, barriers: GLbitfield) {
        self.MemoryBarrier(barriers)
    }

    unsafe fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.ClearColor(r, g, b, a)
    }

    unsafe fn clear(&self, mask: GLbitfield) {
        self.Clear(mask)
    }

    unsafe fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        self.Viewport(x, y, width, height)
    }

    unsafe fn scissor(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        self.Scissor(x, y, width, height)
    }

    unsafe fn color_mask(&self, r: bool, g: bool, b: bool, a: bool) {
        self.ColorMask(gl_bool(r), gl_bool(g), gl_bool(b), gl_bool(a))
    }

    unsafe fn object_label(&self, identifier: GLenum, name: GLuint, label: &str) {
        self.ObjectLabel(
            identifier,
            name,
            label.len() as GLsizei,
            label.as_ptr() as *const GLchar,
        )
    }
}

/// Forwards `KHR_debug` messages to `tracing`.
pub(crate) extern "system" fn debug_callback(
    source: GLenum,
    gltype: GLenum,
    id: GLuint,
    severity: GLenum,
    _length: GLsizei,
    message: *const GLchar,
    _user_param: *mut c_void,
) {
    let message = if message.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(message).to_string_lossy().into_owned() }
    };

    let source = match source {
        gl::DEBUG_SOURCE_API => "API",
        gl::DEBUG_SOURCE_WINDOW_SYSTEM => "window system",
        gl::DEBUG_SOURCE_SHADER_COMPILER => "shader compiler",
        gl::DEBUG_SOURCE_THIRD_PARTY => "third party",
        gl::DEBUG_SOURCE_APPLICATION => "application",
        _ => "other",
    };

    let gltype = match gltype {
        gl::DEBUG_TYPE_ERROR => "error",
        gl::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "deprecated behaviour",
        gl::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "undefined behaviour",
        gl::DEBUG_TYPE_PORTABILITY => "portability",
        gl::DEBUG_TYPE_PERFORMANCE => "performance",
        gl::DEBUG_TYPE_MARKER => "marker",
        gl::DEBUG_TYPE_PUSH_GROUP => "push group",
        gl::DEBUG_TYPE_POP_GROUP => "pop group",
        _ => "other",
    };

    match severity {
        gl::DEBUG_SEVERITY_HIGH => tracing::error!(source, gltype, id, "{}", message),
        gl::DEBUG_SEVERITY_MEDIUM => tracing::warn!(source, gltype, id, "{}", message),
        gl::DEBUG_SEVERITY_LOW => tracing::info!(source, gltype, id, "{}", message),
        _ => tracing::trace!(source, gltype, id, "{}", message),
    }
}
