use crate::api::gl;
use crate::api::gl::types::*;
use crate::backend::Backend;
use crate::context::Context;
use std::rc::Rc;

impl_handle_type!(
    /// Renderbuffer object.
    pub struct Renderbuffer {
        internal_format: GLenum,
        width: u32,
        height: u32,
        samples: u32
    }
);

impl<B: Backend> Drop for Renderbuffer<B> {
    fn drop(&mut self) {
        unsafe { self.ctx.backend().delete_renderbuffer(self.obj) }
        self.ctx.bindings_mut().forget_renderbuffer(self.obj);
    }
}

impl<B: Backend> Renderbuffer<B> {
    /// Creates a renderbuffer without storage.
    pub fn new(ctx: &Rc<Context<B>>) -> Renderbuffer<B> {
        let obj = unsafe {
            if ctx.direct_state_access() {
                ctx.backend().create_renderbuffer()
            } else {
                ctx.backend().gen_renderbuffer()
            }
        };
        Renderbuffer {
            ctx: ctx.clone(),
            obj,
            internal_format: 0,
            width: 0,
            height: 0,
            samples: 0,
        }
    }

    pub fn internal_format(&self) -> GLenum {
        self.internal_format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of samples, 0 if the storage is not multisampled.
    pub fn samples(&self) -> u32 {
        self.samples
    }

    pub fn bind(&self) {
        self.ctx.bind_renderbuffer(self.obj);
    }

    pub fn unbind(&self) {
        self.ctx.bind_renderbuffer(0);
    }

    /// (Re)allocates single-sample storage.
    pub fn storage(&mut self, internal_format: GLenum, width: u32, height: u32) {
        self.internal_format = internal_format;
        self.width = width;
        self.height = height;
        self.samples = 0;
        let gl = self.ctx.backend();
        unsafe {
            if self.ctx.direct_state_access() {
                gl.named_renderbuffer_storage(self.obj, internal_format, width as GLsizei, height as GLsizei);
            } else {
                self.bind();
                gl.renderbuffer_storage(internal_format, width as GLsizei, height as GLsizei);
            }
        }
    }

    /// (Re)allocates multisample storage.
    pub fn storage_multisample(&mut self, samples: u32, internal_format: GLenum, width: u32, height: u32) {
        self.internal_format = internal_format;
        self.width = width;
        self.height = height;
        self.samples = samples;
        let gl = self.ctx.backend();
        unsafe {
            if self.ctx.direct_state_access() {
                gl.named_renderbuffer_storage_multisample(
                    self.obj,
                    samples as GLsizei,
                    internal_format,
                    width as GLsizei,
                    height as GLsizei,
                );
            } else {
                self.bind();
                gl.renderbuffer_storage_multisample(
                    samples as GLsizei,
                    internal_format,
                    width as GLsizei,
                    height as GLsizei,
                );
            }
        }
    }

    /// Reallocates storage with the same format and sample count but new dimensions.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.samples > 0 {
            self.storage_multisample(self.samples, self.internal_format, width, height);
        } else {
            self.storage(self.internal_format, width, height);
        }
    }

    pub fn label(&self, label: &str) {
        self.ctx.object_label(gl::RENDERBUFFER, self.obj, label);
    }
}
