//! The context: backend, capabilities and binding cache.
use crate::api::{debug_callback, gl, gl::types::*, Gl};
use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::flags::ClearMask;
use crate::state::{BindingState, FramebufferRole, IndexedBinding};
use std::cell::{Cell, Ref, RefCell};
use std::os::raw::c_void;
use std::ptr;
use std::rc::Rc;
use tracing::{debug, trace, warn};

/// Upper bound on the number of codes drained by [`Context::check_error`]. A lost context may
/// report errors forever.
const MAX_DRAINED_ERRORS: usize = 32;

/// Optional features of the driver that change how objects are edited and bound.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Capabilities {
    /// `(major, minor)` context version.
    pub version: (u32, u32),
    /// GL 4.5 or `GL_ARB_direct_state_access`: objects are created and edited by name, and
    /// textures are bound with `glBindTextureUnit`.
    pub direct_state_access: bool,
    /// GL 4.3 or `GL_KHR_debug`: `glObjectLabel` is available.
    pub debug_labels: bool,
}

impl Capabilities {
    /// Capabilities of a plain GL 3.3 core context.
    pub const LEGACY: Capabilities = Capabilities {
        version: (3, 3),
        direct_state_access: false,
        debug_labels: false,
    };

    /// Queries the version and extension list of the current context.
    ///
    /// # Safety
    ///
    /// The context `backend` was loaded from must be current.
    pub unsafe fn detect<B: Backend>(backend: &B) -> Capabilities {
        let major = backend.get_integer(gl::MAJOR_VERSION).max(0) as u32;
        let minor = backend.get_integer(gl::MINOR_VERSION).max(0) as u32;
        let version = (major, minor);

        let mut dsa_extension = false;
        let mut debug_extension = false;
        let num_extensions = backend.get_integer(gl::NUM_EXTENSIONS).max(0) as u32;
        for i in 0..num_extensions {
            match backend.get_string_i(gl::EXTENSIONS, i).as_deref() {
                Some("GL_ARB_direct_state_access") => dsa_extension = true,
                Some("GL_KHR_debug") => debug_extension = true,
                _ => {}
            }
        }

        let caps = Capabilities {
            version,
            direct_state_access: version >= (4, 5) || dsa_extension,
            debug_labels: version >= (4, 3) || debug_extension,
        };
        let vendor = backend.get_string(gl::VENDOR).unwrap_or_default();
        let renderer = backend.get_string(gl::RENDERER).unwrap_or_default();
        debug!(?caps, %vendor, %renderer, "detected GL capabilities");
        caps
    }
}

/// Owns the GL function table, the capabilities resolved for it, and the binding cache.
///
/// All bind operations go through the context so that redundant calls can be skipped:
/// each compares the request with the last binding made through the same context, and
/// only calls the driver if they differ.
///
/// A context is shared through `Rc` and is bound to the thread its GL context is current on.
pub struct Context<B: Backend = Gl> {
    backend: B,
    caps: Cell<Capabilities>,
    bindings: RefCell<BindingState>,
}

impl<B: Backend> Context<B> {
    /// Creates a context over `backend`, detecting its capabilities.
    ///
    /// # Safety
    ///
    /// The GL context `backend` was loaded from must be current on this thread, and must stay
    /// current whenever the returned context (or any object created from it) is used.
    pub unsafe fn new(backend: B) -> Rc<Context<B>> {
        let caps = Capabilities::detect(&backend);
        Context::with_capabilities(backend, caps)
    }

    /// Creates a context with explicit capabilities, e.g. to force the non-DSA code paths.
    ///
    /// # Safety
    ///
    /// Same as [`Context::new`]. In addition, `caps` must not claim features the driver lacks.
    pub unsafe fn with_capabilities(backend: B, caps: Capabilities) -> Rc<Context<B>> {
        Rc::new(Context {
            backend,
            caps: Cell::new(caps),
            bindings: RefCell::new(BindingState::new()),
        })
    }

    pub fn capabilities(&self) -> Capabilities {
        self.caps.get()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the current contents of the binding cache.
    pub fn bindings(&self) -> Ref<'_, BindingState> {
        self.bindings.borrow()
    }

    pub(crate) fn direct_state_access(&self) -> bool {
        self.caps.get().direct_state_access
    }

    /// Re-detects capabilities (e.g. after the GL context was re-created) and resets the
    /// binding cache.
    ///
    /// # Safety
    ///
    /// Same as [`Context::new`]: the GL context the backend was loaded from must be current.
    pub unsafe fn refresh_capabilities(&self) {
        let caps = Capabilities::detect(&self.backend);
        self.caps.set(caps);
        self.reset_bindings();
    }

    /// Forgets every recorded binding. The next bind of each bind point reaches the driver.
    ///
    /// Call this after anything touched GL binding state without going through this context.
    pub fn reset_bindings(&self) {
        debug!("binding cache reset");
        self.bindings.borrow_mut().reset();
    }

    /// Runs `f` with the raw backend, then resets the binding cache since `f` may have
    /// changed bindings behind its back.
    pub fn with_raw<R>(&self, f: impl FnOnce(&B) -> R) -> R {
        let result = f(&self.backend);
        self.reset_bindings();
        result
    }

    pub(crate) fn bindings_mut(&self) -> std::cell::RefMut<'_, BindingState> {
        self.bindings.borrow_mut()
    }

    //----------------------------------------------------------------------------------------------
    // Bind operations

    pub fn bind_buffer(&self, target: GLenum, buffer: GLuint) {
        if self.bindings.borrow_mut().update_buffer(target, buffer) {
            trace!(bind_point = target, buffer, "glBindBuffer");
            unsafe { self.backend.bind_buffer(target, buffer) }
        }
    }

    /// Binds the whole of `buffer` to slot `index` of an indexed bind point.
    pub fn bind_buffer_base(&self, target: GLenum, index: GLuint, buffer: GLuint) {
        let binding = IndexedBinding::whole(buffer);
        if self
            .bindings
            .borrow_mut()
            .update_indexed_buffer(target, index, binding)
        {
            trace!(bind_point = target, index, buffer, "glBindBufferBase");
            unsafe { self.backend.bind_buffer_base(target, index, buffer) }
        }
    }

    /// Binds `size` bytes of `buffer` starting at `offset` to slot `index` of an indexed
    /// bind point. The call is skipped only if the same buffer *and* range are bound there.
    pub fn bind_buffer_range(
        &self,
        target: GLenum,
        index: GLuint,
        buffer: GLuint,
        offset: GLintptr,
        size: GLsizeiptr,
    ) {
        let binding = IndexedBinding::range(buffer, offset, size);
        if self
            .bindings
            .borrow_mut()
            .update_indexed_buffer(target, index, binding)
        {
            trace!(bind_point = target, index, buffer, offset, size, "glBindBufferRange");
            unsafe {
                self.backend
                    .bind_buffer_range(target, index, buffer, offset, size)
            }
        }
    }

    pub fn bind_vertex_array(&self, array: GLuint) {
        if self.bindings.borrow_mut().update_vertex_array(array) {
            trace!(array, "glBindVertexArray");
            unsafe { self.backend.bind_vertex_array(array) }
        }
    }

    pub fn bind_program(&self, program: GLuint) {
        if self.bindings.borrow_mut().update_program(program) {
            trace!(program, "glUseProgram");
            unsafe { self.backend.use_program(program) }
        }
    }

    pub fn bind_renderbuffer(&self, renderbuffer: GLuint) {
        if self.bindings.borrow_mut().update_renderbuffer(renderbuffer) {
            trace!(renderbuffer, "glBindRenderbuffer");
            unsafe { self.backend.bind_renderbuffer(renderbuffer) }
        }
    }

    /// Binds a framebuffer to `target`.
    ///
    /// `GL_FRAMEBUFFER`, `GL_DRAW_FRAMEBUFFER` and `GL_READ_FRAMEBUFFER` are tracked in three
    /// separate slots. Binding to `GL_FRAMEBUFFER` does not update the draw and read slots,
    /// although the driver binds both. The slots can therefore disagree with the driver: after
    /// binding `a` to `GL_FRAMEBUFFER` then `b` to `GL_DRAW_FRAMEBUFFER`, binding `a` to
    /// `GL_FRAMEBUFFER` again is skipped while `b` is still the draw framebuffer. Use
    /// distinct targets consistently, or [`Context::reset_bindings`] when mixing them. Other
    /// targets are not tracked and always issue the call.
    pub fn bind_framebuffer(&self, framebuffer: GLuint, target: GLenum) {
        let needed = match FramebufferRole::from_target(target) {
            Some(role) => self
                .bindings
                .borrow_mut()
                .update_framebuffer(role, framebuffer),
            None => true,
        };
        if needed {
            trace!(bind_point = target, framebuffer, "glBindFramebuffer");
            unsafe { self.backend.bind_framebuffer(target, framebuffer) }
        }
    }

    /// Binds `framebuffer` to `GL_FRAMEBUFFER` so that it can be edited through
    /// `GL_FRAMEBUFFER`-targeted calls. Skipped only if it is recorded in all three slots.
    pub(crate) fn bind_framebuffer_for_edit(&self, framebuffer: GLuint) {
        if self
            .bindings
            .borrow_mut()
            .update_framebuffer_all_roles(framebuffer)
        {
            trace!(bind_point = gl::FRAMEBUFFER, framebuffer, "glBindFramebuffer (edit)");
            unsafe { self.backend.bind_framebuffer(gl::FRAMEBUFFER, framebuffer) }
        }
    }

    /// Makes texture unit `unit` (0-based) active.
    pub fn active_texture(&self, unit: GLuint) {
        if self.bindings.borrow_mut().update_active_texture_unit(unit) {
            trace!(unit, "glActiveTexture");
            unsafe { self.backend.active_texture(unit) }
        }
    }

    /// Binds `texture` to `target` on texture unit `unit`.
    ///
    /// The unit is made active first. With direct state access, the binding is recorded per
    /// unit and made with `glBindTextureUnit` (`target` is implied by the texture); without,
    /// it is recorded per `(target, unit)` and made with `glBindTexture`.
    pub fn bind_texture(&self, unit: GLuint, target: GLenum, texture: GLuint) {
        self.active_texture(unit);
        if self.direct_state_access() {
            if self.bindings.borrow_mut().update_texture_unit(unit, texture) {
                trace!(unit, texture, "glBindTextureUnit");
                unsafe { self.backend.bind_texture_unit(unit, texture) }
            }
        } else if self
            .bindings
            .borrow_mut()
            .update_texture(target, unit, texture)
        {
            trace!(unit, bind_point = target, texture, "glBindTexture");
            unsafe { self.backend.bind_texture(target, texture) }
        }
    }

    //----------------------------------------------------------------------------------------------
    // Misc state

    pub fn clear_color(&self, color: [f32; 4]) {
        let [r, g, b, a] = color;
        unsafe { self.backend.clear_color(r, g, b, a) }
    }

    pub fn clear(&self, mask: ClearMask) {
        unsafe { self.backend.clear(mask.bits()) }
    }

    pub fn viewport(&self, x: i32, y: i32, width: u32, height: u32) {
        unsafe {
            self.backend
                .viewport(x, y, width as GLsizei, height as GLsizei)
        }
    }

    pub fn scissor(&self, x: i32, y: i32, width: u32, height: u32) {
        unsafe {
            self.backend
                .scissor(x, y, width as GLsizei, height as GLsizei)
        }
    }

    pub fn color_mask(&self, r: bool, g: bool, b: bool, a: bool) {
        unsafe { self.backend.color_mask(r, g, b, a) }
    }

    /// Drains the driver error flag. Returns every pending error code, in order.
    pub fn check_error(&self) -> Result<()> {
        let mut errors = Vec::new();
        while errors.len() < MAX_DRAINED_ERRORS {
            let err = unsafe { self.backend.get_error() };
            if err == gl::NO_ERROR {
                break;
            }
            errors.push(err);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            warn!(?errors, "GL errors");
            Err(Error::Gl(errors))
        }
    }

    /// Attaches a debug label to an object, if the driver supports labels.
    pub(crate) fn object_label(&self, identifier: GLenum, name: GLuint, label: &str) {
        if self.caps.get().debug_labels {
            unsafe { self.backend.object_label(identifier, name, label) }
        } else {
            trace!(label, "object labels not supported");
        }
    }
}

impl Context<Gl> {
    /// Loads the GL function table with `loader` and creates a context over it.
    ///
    /// # Safety
    ///
    /// Same as [`Context::new`]. `loader` must return entry points of the current context.
    pub unsafe fn load_with<F>(loader: F) -> Rc<Context<Gl>>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        Context::new(Gl::load_with(loader))
    }

    /// Forwards driver debug messages to `tracing`. Returns `false` if `KHR_debug` isn't
    /// available.
    pub fn enable_debug_output(&self) -> bool {
        if !self.backend.DebugMessageCallback.is_loaded() {
            warn!("glDebugMessageCallback not available, debug output disabled");
            return false;
        }
        unsafe {
            self.backend.Enable(gl::DEBUG_OUTPUT);
            self.backend.Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
            self.backend
                .DebugMessageCallback(Some(debug_callback), ptr::null());
        }
        true
    }
}
