//! A backend that records calls instead of issuing them.
//!
//! [`RecordingBackend`] needs no GL context, which makes it possible to check how many driver
//! calls a sequence of operations results in. Binding calls are recorded with their
//! arguments; everything else is recorded by GL function name only. State queries
//! (`glGetIntegerv`, `glGetError`...) are answered but not recorded.
use crate::api::gl;
use crate::api::gl::types::*;
use crate::backend::Backend;
use crate::uniform::UniformValue;
use fxhash::FxHashMap;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::os::raw::c_void;

/// A recorded backend call.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    BindBuffer {
        target: GLenum,
        buffer: GLuint,
    },
    BindBufferBase {
        target: GLenum,
        index: GLuint,
        buffer: GLuint,
    },
    BindBufferRange {
        target: GLenum,
        index: GLuint,
        buffer: GLuint,
        offset: GLintptr,
        size: GLsizeiptr,
    },
    BindVertexArray(GLuint),
    UseProgram(GLuint),
    BindRenderbuffer(GLuint),
    BindFramebuffer {
        target: GLenum,
        framebuffer: GLuint,
    },
    /// Unit index, without the `GL_TEXTURE0` offset.
    ActiveTexture(GLuint),
    BindTexture {
        target: GLenum,
        texture: GLuint,
    },
    BindTextureUnit {
        unit: GLuint,
        texture: GLuint,
    },
    Uniform {
        location: GLint,
        value: UniformValue,
    },
    /// Any other call, by GL function name.
    Other(&'static str),
}

impl Call {
    /// Name of the GL function.
    pub fn name(&self) -> &'static str {
        match self {
            Call::BindBuffer { .. } => "glBindBuffer",
            Call::BindBufferBase { .. } => "glBindBufferBase",
            Call::BindBufferRange { .. } => "glBindBufferRange",
            Call::BindVertexArray(_) => "glBindVertexArray",
            Call::UseProgram(_) => "glUseProgram",
            Call::BindRenderbuffer(_) => "glBindRenderbuffer",
            Call::BindFramebuffer { .. } => "glBindFramebuffer",
            Call::ActiveTexture(_) => "glActiveTexture",
            Call::BindTexture { .. } => "glBindTexture",
            Call::BindTextureUnit { .. } => "glBindTextureUnit",
            Call::Uniform { .. } => "glUniform",
            Call::Other(name) => name,
        }
    }
}

/// Backend that logs calls. See the [module documentation](self).
///
/// Object names are handed out in increasing order starting at 1, shared by all object types.
/// Shader compilation, program linking and framebuffer completeness succeed unless told
/// otherwise.
#[derive(Debug)]
pub struct RecordingBackend {
    calls: RefCell<Vec<Call>>,
    next_name: Cell<GLuint>,
    integers: RefCell<FxHashMap<GLenum, GLint>>,
    extensions: Vec<String>,
    errors: RefCell<VecDeque<GLenum>>,
    compile_error: RefCell<Option<String>>,
    link_error: RefCell<Option<String>>,
    framebuffer_status: Cell<GLenum>,
    uniforms: RefCell<Vec<String>>,
    attributes: RefCell<Vec<String>>,
    // Buffer bound to each target, and size of each buffer's data store, so that whole-buffer
    // maps and `GL_BUFFER_SIZE` queries can be answered.
    buffer_targets: RefCell<FxHashMap<GLenum, GLuint>>,
    buffer_sizes: RefCell<FxHashMap<GLuint, GLsizeiptr>>,
    // Backing memory for buffer mappings. Kept until the backend is dropped, so that pointers
    // handed out stay valid even if the caller forgets to unmap.
    mappings: RefCell<Vec<Box<[u8]>>>,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        RecordingBackend::new()
    }
}

macro_rules! record_other {
    ($($method:ident => $gl_name:literal ($($arg:ident : $ty:ty),*);)*) => {
        $(
            unsafe fn $method(&self, $($arg: $ty),*) {
                self.record(Call::Other($gl_name));
            }
        )*
    };
}

impl RecordingBackend {
    /// A backend reporting a GL 4.6 context.
    pub fn new() -> RecordingBackend {
        RecordingBackend::with_version(4, 6)
    }

    /// A backend reporting a GL `major.minor` context with no extensions.
    pub fn with_version(major: u32, minor: u32) -> RecordingBackend {
        let backend = RecordingBackend {
            calls: RefCell::new(Vec::new()),
            next_name: Cell::new(1),
            integers: RefCell::new(FxHashMap::default()),
            extensions: Vec::new(),
            errors: RefCell::new(VecDeque::new()),
            compile_error: RefCell::new(None),
            link_error: RefCell::new(None),
            framebuffer_status: Cell::new(gl::FRAMEBUFFER_COMPLETE),
            uniforms: RefCell::new(Vec::new()),
            attributes: RefCell::new(Vec::new()),
            buffer_targets: RefCell::new(FxHashMap::default()),
            buffer_sizes: RefCell::new(FxHashMap::default()),
            mappings: RefCell::new(Vec::new()),
        };
        backend.set_version(major, minor);
        backend
    }

    /// Adds an extension to the reported extension list.
    pub fn extension(mut self, name: &str) -> RecordingBackend {
        self.extensions.push(name.to_owned());
        self
    }

    pub fn set_version(&self, major: u32, minor: u32) {
        self.set_integer(gl::MAJOR_VERSION, major as GLint);
        self.set_integer(gl::MINOR_VERSION, minor as GLint);
    }

    /// Sets the value returned by `glGetIntegerv(pname)`.
    pub fn set_integer(&self, pname: GLenum, value: GLint) {
        self.integers.borrow_mut().insert(pname, value);
    }

    /// Queues an error code for `glGetError`.
    pub fn push_error(&self, error: GLenum) {
        self.errors.borrow_mut().push_back(error);
    }

    /// Makes the following shader compilations fail with `log`.
    pub fn fail_compilation(&self, log: &str) {
        *self.compile_error.borrow_mut() = Some(log.to_owned());
    }

    /// Makes the following program links fail with `log`.
    pub fn fail_link(&self, log: &str) {
        *self.link_error.borrow_mut() = Some(log.to_owned());
    }

    /// Sets the status returned by framebuffer completeness checks.
    pub fn set_framebuffer_status(&self, status: GLenum) {
        self.framebuffer_status.set(status);
    }

    /// Sets the active uniforms of every program. A uniform's location is its index.
    pub fn set_uniforms(&self, names: &[&str]) {
        *self.uniforms.borrow_mut() = names.iter().map(|s| s.to_string()).collect();
    }

    /// Sets the active attributes of every program. An attribute's location is its index.
    pub fn set_attributes(&self, names: &[&str]) {
        *self.attributes.borrow_mut() = names.iter().map(|s| s.to_string()).collect();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Returns the recorded calls and clears the log.
    pub fn take_calls(&self) -> Vec<Call> {
        self.calls.take()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Number of recorded calls to the GL function `name`.
    pub fn count(&self, name: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.name() == name).count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn new_name(&self, gl_name: &'static str) -> GLuint {
        self.record(Call::Other(gl_name));
        let name = self.next_name.get();
        self.next_name.set(name + 1);
        name
    }

    fn map(&self, gl_name: &'static str, length: GLsizeiptr) -> *mut c_void {
        self.record(Call::Other(gl_name));
        let mut memory = vec![0u8; length.max(0) as usize].into_boxed_slice();
        let ptr = memory.as_mut_ptr() as *mut c_void;
        self.mappings.borrow_mut().push(memory);
        ptr
    }

    fn bound_buffer(&self, target: GLenum) -> GLuint {
        self.buffer_targets.borrow().get(&target).copied().unwrap_or(0)
    }

    fn buffer_size(&self, buffer: GLuint) -> GLsizeiptr {
        self.buffer_sizes.borrow().get(&buffer).copied().unwrap_or(0)
    }

    fn set_buffer_size(&self, gl_name: &'static str, buffer: GLuint, size: GLsizeiptr) {
        self.record(Call::Other(gl_name));
        self.buffer_sizes.borrow_mut().insert(buffer, size);
    }

    fn location(names: &RefCell<Vec<String>>, name: &str) -> GLint {
        names
            .borrow()
            .iter()
            .position(|n| n == name)
            .map_or(-1, |i| i as GLint)
    }
}

impl Backend for RecordingBackend {
    unsafe fn get_integer(&self, pname: GLenum) -> GLint {
        if pname == gl::NUM_EXTENSIONS {
            return self.extensions.len() as GLint;
        }
        self.integers.borrow().get(&pname).copied().unwrap_or(0)
    }

    unsafe fn get_string(&self, name: GLenum) -> Option<String> {
        match name {
            gl::VENDOR => Some("glballistic".to_owned()),
            gl::RENDERER => Some("recording".to_owned()),
            _ => None,
        }
    }

    unsafe fn get_string_i(&self, name: GLenum, index: GLuint) -> Option<String> {
        if name == gl::EXTENSIONS {
            self.extensions.get(index as usize).cloned()
        } else {
            None
        }
    }

    unsafe fn get_error(&self) -> GLenum {
        self.errors.borrow_mut().pop_front().unwrap_or(gl::NO_ERROR)
    }

    unsafe fn bind_buffer(&self, target: GLenum, buffer: GLuint) {
        self.buffer_targets.borrow_mut().insert(target, buffer);
        self.record(Call::BindBuffer { target, buffer })
    }

    unsafe fn bind_buffer_base(&self, target: GLenum, index: GLuint, buffer: GLuint) {
        self.record(Call::BindBufferBase {
            target,
            index,
            buffer,
        })
    }

    unsafe fn bind_buffer_range(
        &self,
        target: GLenum,
        index: GLuint,
        buffer: GLuint,
        offset: GLintptr,
        size: GLsizeiptr,
    ) {
        self.record(Call::BindBufferRange {
            target,
            index,
            buffer,
            offset,
            size,
        })
    }

    unsafe fn bind_vertex_array(&self, array: GLuint) {
        self.record(Call::BindVertexArray(array))
    }

    unsafe fn use_program(&self, program: GLuint) {
        self.record(Call::UseProgram(program))
    }

    unsafe fn bind_renderbuffer(&self, renderbuffer: GLuint) {
        self.record(Call::BindRenderbuffer(renderbuffer))
    }

    unsafe fn bind_framebuffer(&self, target: GLenum, framebuffer: GLuint) {
        self.record(Call::BindFramebuffer {
            target,
            framebuffer,
        })
    }

    unsafe fn active_texture(&self, unit: GLuint) {
        self.record(Call::ActiveTexture(unit))
    }

    unsafe fn bind_texture(&self, target: GLenum, texture: GLuint) {
        self.record(Call::BindTexture { target, texture })
    }

    unsafe fn bind_texture_unit(&self, unit: GLuint, texture: GLuint) {
        self.record(Call::BindTextureUnit { unit, texture })
    }

    record_other! {
        bind_image_texture => "glBindImageTexture"(
            _unit: GLuint, _texture: GLuint, _level: GLint, _layered: bool, _layer: GLint,
            _access: GLenum, _format: GLenum
        );
    }

    unsafe fn create_buffer(&self) -> GLuint {
        self.new_name("glCreateBuffers")
    }

    unsafe fn gen_buffer(&self) -> GLuint {
        self.new_name("glGenBuffers")
    }

    unsafe fn create_vertex_array(&self) -> GLuint {
        self.new_name("glCreateVertexArrays")
    }

    unsafe fn gen_vertex_array(&self) -> GLuint {
        self.new_name("glGenVertexArrays")
    }

    unsafe fn create_texture(&self, _target: GLenum) -> GLuint {
        self.new_name("glCreateTextures")
    }

    unsafe fn gen_texture(&self) -> GLuint {
        self.new_name("glGenTextures")
    }

    unsafe fn create_renderbuffer(&self) -> GLuint {
        self.new_name("glCreateRenderbuffers")
    }

    unsafe fn gen_renderbuffer(&self) -> GLuint {
        self.new_name("glGenRenderbuffers")
    }

    unsafe fn create_framebuffer(&self) -> GLuint {
        self.new_name("glCreateFramebuffers")
    }

    unsafe fn gen_framebuffer(&self) -> GLuint {
        self.new_name("glGenFramebuffers")
    }

    unsafe fn create_program(&self) -> GLuint {
        self.new_name("glCreateProgram")
    }

    unsafe fn create_shader(&self, _stage: GLenum) -> GLuint {
        self.new_name("glCreateShader")
    }

    record_other! {
        delete_buffer => "glDeleteBuffers"(_buffer: GLuint);
        delete_vertex_array => "glDeleteVertexArrays"(_array: GLuint);
        delete_texture => "glDeleteTextures"(_texture: GLuint);
        delete_renderbuffer => "glDeleteRenderbuffers"(_renderbuffer: GLuint);
        delete_framebuffer => "glDeleteFramebuffers"(_framebuffer: GLuint);
        delete_program => "glDeleteProgram"(_program: GLuint);
        delete_shader => "glDeleteShader"(_shader: GLuint);

        buffer_sub_data => "glBufferSubData"(_target: GLenum, _offset: GLintptr, _data: &[u8]);
        named_buffer_sub_data => "glNamedBufferSubData"(
            _buffer: GLuint, _offset: GLintptr, _data: &[u8]
        );
        flush_mapped_buffer_range => "glFlushMappedBufferRange"(
            _target: GLenum, _offset: GLintptr, _length: GLsizeiptr
        );
        flush_mapped_named_buffer_range => "glFlushMappedNamedBufferRange"(
            _buffer: GLuint, _offset: GLintptr, _length: GLsizeiptr
        );
        copy_buffer_sub_data => "glCopyBufferSubData"(
            _read_target: GLenum, _write_target: GLenum, _read_offset: GLintptr,
            _write_offset: GLintptr, _size: GLsizeiptr
        );
        copy_named_buffer_sub_data => "glCopyNamedBufferSubData"(
            _read_buffer: GLuint, _write_buffer: GLuint, _read_offset: GLintptr,
            _write_offset: GLintptr, _size: GLsizeiptr
        );
        clear_buffer_data => "glClearBufferData"(
            _target: GLenum, _internal_format: GLenum, _format: GLenum, _ty: GLenum,
            _data: Option<&[u8]>
        );
        clear_named_buffer_data => "glClearNamedBufferData"(
            _buffer: GLuint, _internal_format: GLenum, _format: GLenum, _ty: GLenum,
            _data: Option<&[u8]>
        );
        clear_buffer_sub_data => "glClearBufferSubData"(
            _target: GLenum, _internal_format: GLenum, _offset: GLintptr, _size: GLsizeiptr,
            _format: GLenum, _ty: GLenum, _data: Option<&[u8]>
        );
        clear_named_buffer_sub_data => "glClearNamedBufferSubData"(
            _buffer: GLuint, _internal_format: GLenum, _offset: GLintptr, _size: GLsizeiptr,
            _format: GLenum, _ty: GLenum, _data: Option<&[u8]>
        );
    }

    unsafe fn buffer_data(
        &self,
        target: GLenum,
        size: GLsizeiptr,
        _data: Option<&[u8]>,
        _usage: GLenum,
    ) {
        self.set_buffer_size("glBufferData", self.bound_buffer(target), size)
    }

    unsafe fn named_buffer_data(
        &self,
        buffer: GLuint,
        size: GLsizeiptr,
        _data: Option<&[u8]>,
        _usage: GLenum,
    ) {
        self.set_buffer_size("glNamedBufferData", buffer, size)
    }

    unsafe fn buffer_storage(
        &self,
        target: GLenum,
        size: GLsizeiptr,
        _data: Option<&[u8]>,
        _flags: GLbitfield,
    ) {
        self.set_buffer_size("glBufferStorage", self.bound_buffer(target), size)
    }

    unsafe fn named_buffer_storage(
        &self,
        buffer: GLuint,
        size: GLsizeiptr,
        _data: Option<&[u8]>,
        _flags: GLbitfield,
    ) {
        self.set_buffer_size("glNamedBufferStorage", buffer, size)
    }

    unsafe fn map_buffer(&self, target: GLenum, _access: GLenum) -> *mut c_void {
        self.map("glMapBuffer", self.buffer_size(self.bound_buffer(target)))
    }

    unsafe fn map_named_buffer(&self, buffer: GLuint, _access: GLenum) -> *mut c_void {
        self.map("glMapNamedBuffer", self.buffer_size(buffer))
    }

    unsafe fn get_buffer_parameter_iv(&self, target: GLenum, pname: GLenum) -> GLint {
        self.get_named_buffer_parameter_iv(self.bound_buffer(target), pname)
    }

    unsafe fn get_named_buffer_parameter_iv(&self, buffer: GLuint, pname: GLenum) -> GLint {
        match pname {
            gl::BUFFER_SIZE => self.buffer_size(buffer) as GLint,
            _ => 0,
        }
    }

    unsafe fn map_buffer_range(
        &self,
        _target: GLenum,
        _offset: GLintptr,
        length: GLsizeiptr,
        _access: GLbitfield,
    ) -> *mut c_void {
        self.map("glMapBufferRange", length)
    }

    unsafe fn map_named_buffer_range(
        &self,
        _buffer: GLuint,
        _offset: GLintptr,
        length: GLsizeiptr,
        _access: GLbitfield,
    ) -> *mut c_void {
        self.map("glMapNamedBufferRange", length)
    }

    unsafe fn unmap_buffer(&self, _target: GLenum) -> bool {
        self.record(Call::Other("glUnmapBuffer"));
        true
    }

    unsafe fn unmap_named_buffer(&self, _buffer: GLuint) -> bool {
        self.record(Call::Other("glUnmapNamedBuffer"));
        true
    }

    record_other! {
        vertex_array_vertex_buffer => "glVertexArrayVertexBuffer"(
            _array: GLuint, _binding: GLuint, _buffer: GLuint, _offset: GLintptr, _stride: GLsizei
        );
        bind_vertex_buffer => "glBindVertexBuffer"(
            _binding: GLuint, _buffer: GLuint, _offset: GLintptr, _stride: GLsizei
        );
        vertex_array_element_buffer => "glVertexArrayElementBuffer"(_array: GLuint, _buffer: GLuint);
        enable_vertex_array_attrib => "glEnableVertexArrayAttrib"(_array: GLuint, _index: GLuint);
        enable_vertex_attrib_array => "glEnableVertexAttribArray"(_index: GLuint);
        disable_vertex_array_attrib => "glDisableVertexArrayAttrib"(_array: GLuint, _index: GLuint);
        disable_vertex_attrib_array => "glDisableVertexAttribArray"(_index: GLuint);
        vertex_array_attrib_format => "glVertexArrayAttribFormat"(
            _array: GLuint, _index: GLuint, _size: GLint, _ty: GLenum, _normalized: bool,
            _relative_offset: GLuint
        );
        vertex_attrib_format => "glVertexAttribFormat"(
            _index: GLuint, _size: GLint, _ty: GLenum, _normalized: bool, _relative_offset: GLuint
        );
        vertex_array_attrib_binding => "glVertexArrayAttribBinding"(
            _array: GLuint, _index: GLuint, _binding: GLuint
        );
        vertex_attrib_binding => "glVertexAttribBinding"(_index: GLuint, _binding: GLuint);
        vertex_array_binding_divisor => "glVertexArrayBindingDivisor"(
            _array: GLuint, _binding: GLuint, _divisor: GLuint
        );
        vertex_binding_divisor => "glVertexBindingDivisor"(_binding: GLuint, _divisor: GLuint);
        draw_arrays => "glDrawArrays"(_mode: GLenum, _first: GLint, _count: GLsizei);
        draw_arrays_instanced => "glDrawArraysInstanced"(
            _mode: GLenum, _first: GLint, _count: GLsizei, _instances: GLsizei
        );
        draw_elements => "glDrawElements"(
            _mode: GLenum, _count: GLsizei, _ty: GLenum, _offset: usize
        );
        draw_elements_instanced => "glDrawElementsInstanced"(
            _mode: GLenum, _count: GLsizei, _ty: GLenum, _offset: usize, _instances: GLsizei
        );

        tex_storage_2d => "glTexStorage2D"(
            _target: GLenum, _levels: GLsizei, _internal_format: GLenum, _width: GLsizei,
            _height: GLsizei
        );
        tex_sub_image_2d => "glTexSubImage2D"(
            _target: GLenum, _level: GLint, _x: GLint, _y: GLint, _width: GLsizei,
            _height: GLsizei, _format: GLenum, _ty: GLenum, _data: &[u8]
        );
        generate_mipmap => "glGenerateMipmap"(_target: GLenum);
        tex_parameter_i => "glTexParameteri"(_target: GLenum, _pname: GLenum, _param: GLint);
        pixel_store_i => "glPixelStorei"(_pname: GLenum, _param: GLint);

        renderbuffer_storage => "glRenderbufferStorage"(
            _internal_format: GLenum, _width: GLsizei, _height: GLsizei
        );
        named_renderbuffer_storage => "glNamedRenderbufferStorage"(
            _renderbuffer: GLuint, _internal_format: GLenum, _width: GLsizei, _height: GLsizei
        );
        renderbuffer_storage_multisample => "glRenderbufferStorageMultisample"(
            _samples: GLsizei, _internal_format: GLenum, _width: GLsizei, _height: GLsizei
        );
        named_renderbuffer_storage_multisample => "glNamedRenderbufferStorageMultisample"(
            _renderbuffer: GLuint, _samples: GLsizei, _internal_format: GLenum, _width: GLsizei,
            _height: GLsizei
        );

        framebuffer_texture_2d => "glFramebufferTexture2D"(
            _target: GLenum, _attachment: GLenum, _texture_target: GLenum, _texture: GLuint,
            _level: GLint
        );
        named_framebuffer_texture => "glNamedFramebufferTexture"(
            _framebuffer: GLuint, _attachment: GLenum, _texture: GLuint, _level: GLint
        );
        framebuffer_renderbuffer => "glFramebufferRenderbuffer"(
            _target: GLenum, _attachment: GLenum, _renderbuffer: GLuint
        );
        named_framebuffer_renderbuffer => "glNamedFramebufferRenderbuffer"(
            _framebuffer: GLuint, _attachment: GLenum, _renderbuffer: GLuint
        );
        draw_buffers => "glDrawBuffers"(_buffers: &[GLenum]);
        named_framebuffer_draw_buffers => "glNamedFramebufferDrawBuffers"(
            _framebuffer: GLuint, _buffers: &[GLenum]
        );

        shader_source => "glShaderSource"(_shader: GLuint, _source: &str);
        compile_shader => "glCompileShader"(_shader: GLuint);
        attach_shader => "glAttachShader"(_program: GLuint, _shader: GLuint);
        detach_shader => "glDetachShader"(_program: GLuint, _shader: GLuint);
        link_program => "glLinkProgram"(_program: GLuint);
        validate_program => "glValidateProgram"(_program: GLuint);
        dispatch_compute => "glDispatchCompute"(_x: GLuint, _y: GLuint, _z: GLuint);
        memory_barrier => "glMemoryBarrier"(_barriers: GLbitfield);

        clear_color => "glClearColor"(_r: f32, _g: f32, _b: f32, _a: f32);
        clear => "glClear"(_mask: GLbitfield);
        viewport => "glViewport"(_x: GLint, _y: GLint, _width: GLsizei, _height: GLsizei);
        scissor => "glScissor"(_x: GLint, _y: GLint, _width: GLsizei, _height: GLsizei);
        color_mask => "glColorMask"(_r: bool, _g: bool, _b: bool, _a: bool);
        object_label => "glObjectLabel"(_identifier: GLenum, _name: GLuint, _label: &str);
    }

    unsafe fn get_tex_image(
        &self,
        _target: GLenum,
        _level: GLint,
        _format: GLenum,
        _ty: GLenum,
        data: &mut [u8],
    ) {
        self.record(Call::Other("glGetTexImage"));
        data.fill(0);
    }

    unsafe fn check_framebuffer_status(&self, _target: GLenum) -> GLenum {
        self.record(Call::Other("glCheckFramebufferStatus"));
        self.framebuffer_status.get()
    }

    unsafe fn check_named_framebuffer_status(&self, _framebuffer: GLuint, _target: GLenum) -> GLenum {
        self.record(Call::Other("glCheckNamedFramebufferStatus"));
        self.framebuffer_status.get()
    }

    unsafe fn get_shader_iv(&self, _shader: GLuint, pname: GLenum) -> GLint {
        match pname {
            gl::COMPILE_STATUS => self.compile_error.borrow().is_none() as GLint,
            _ => 0,
        }
    }

    unsafe fn get_shader_info_log(&self, _shader: GLuint) -> String {
        self.compile_error.borrow().clone().unwrap_or_default()
    }

    unsafe fn get_program_iv(&self, _program: GLuint, pname: GLenum) -> GLint {
        match pname {
            gl::LINK_STATUS => self.link_error.borrow().is_none() as GLint,
            gl::VALIDATE_STATUS => gl::TRUE as GLint,
            gl::ACTIVE_UNIFORMS => self.uniforms.borrow().len() as GLint,
            gl::ACTIVE_ATTRIBUTES => self.attributes.borrow().len() as GLint,
            _ => 0,
        }
    }

    unsafe fn get_program_info_log(&self, _program: GLuint) -> String {
        self.link_error.borrow().clone().unwrap_or_default()
    }

    unsafe fn get_uniform_location(&self, _program: GLuint, name: &str) -> GLint {
        self.record(Call::Other("glGetUniformLocation"));
        RecordingBackend::location(&self.uniforms, name)
    }

    unsafe fn get_attrib_location(&self, _program: GLuint, name: &str) -> GLint {
        self.record(Call::Other("glGetAttribLocation"));
        RecordingBackend::location(&self.attributes, name)
    }

    unsafe fn get_active_uniform_name(&self, _program: GLuint, index: GLuint) -> String {
        self.uniforms
            .borrow()
            .get(index as usize)
            .cloned()
            .unwrap_or_default()
    }

    unsafe fn uniform(&self, location: GLint, value: &UniformValue) {
        self.record(Call::Uniform {
            location,
            value: *value,
        })
    }
}
