use crate::api::gl;
use crate::api::gl::types::*;
use crate::backend::Backend;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::renderbuffer::Renderbuffer;
use crate::texture::Texture2D;
use std::rc::Rc;

/// Depth (or depth-stencil) attachment, owned by the framebuffer.
pub enum Attachment<B: Backend = crate::api::Gl> {
    Texture(Texture2D<B>),
    Renderbuffer(Renderbuffer<B>),
}

impl<B: Backend> Attachment<B> {
    fn internal_format(&self) -> GLenum {
        match self {
            Attachment::Texture(t) => t.descriptor().internal_format,
            Attachment::Renderbuffer(r) => r.internal_format(),
        }
    }

    fn attachment_point(&self) -> GLenum {
        match self.internal_format() {
            gl::DEPTH24_STENCIL8 | gl::DEPTH32F_STENCIL8 => gl::DEPTH_STENCIL_ATTACHMENT,
            _ => gl::DEPTH_ATTACHMENT,
        }
    }
}

/// Builds a framebuffer from owned attachments. Color textures are attached to consecutive
/// slots in the order they are added.
pub struct FramebufferBuilder<B: Backend = crate::api::Gl> {
    ctx: Rc<Context<B>>,
    color: Vec<Texture2D<B>>,
    depth: Option<Attachment<B>>,
}

impl<B: Backend> FramebufferBuilder<B> {
    pub fn color_texture(mut self, texture: Texture2D<B>) -> Self {
        self.color.push(texture);
        self
    }

    pub fn depth_texture(mut self, texture: Texture2D<B>) -> Self {
        self.depth = Some(Attachment::Texture(texture));
        self
    }

    pub fn depth_renderbuffer(mut self, renderbuffer: Renderbuffer<B>) -> Self {
        self.depth = Some(Attachment::Renderbuffer(renderbuffer));
        self
    }

    /// Creates the framebuffer and checks that it is complete.
    pub fn build(self) -> Result<Framebuffer<B>> {
        let mut fb = Framebuffer::new(&self.ctx);
        for (slot, texture) in self.color.into_iter().enumerate() {
            fb.attach_color(slot as u32, texture);
        }
        if let Some(depth) = self.depth {
            fb.attach_depth(depth);
        }
        let status = fb.status();
        if status != gl::FRAMEBUFFER_COMPLETE {
            return Err(Error::FramebufferIncomplete(status));
        }
        Ok(fb)
    }
}

impl_handle_type!(
    /// Framebuffer object. Owns its attachments.
    pub struct Framebuffer {
        color: Vec<Option<Texture2D<B>>>,
        depth: Option<Attachment<B>>
    }
);

impl<B: Backend> Drop for Framebuffer<B> {
    fn drop(&mut self) {
        unsafe { self.ctx.backend().delete_framebuffer(self.obj) }
        self.ctx.bindings_mut().forget_framebuffer(self.obj);
    }
}

impl<B: Backend> Framebuffer<B> {
    /// Creates a framebuffer with no attachments.
    pub fn new(ctx: &Rc<Context<B>>) -> Framebuffer<B> {
        let obj = unsafe {
            if ctx.direct_state_access() {
                ctx.backend().create_framebuffer()
            } else {
                ctx.backend().gen_framebuffer()
            }
        };
        Framebuffer {
            ctx: ctx.clone(),
            obj,
            color: Vec::new(),
            depth: None,
        }
    }

    pub fn builder(ctx: &Rc<Context<B>>) -> FramebufferBuilder<B> {
        FramebufferBuilder {
            ctx: ctx.clone(),
            color: Vec::new(),
            depth: None,
        }
    }

    /// Binds the framebuffer to `target` (`GL_FRAMEBUFFER`, `GL_DRAW_FRAMEBUFFER` or
    /// `GL_READ_FRAMEBUFFER`).
    pub fn bind(&self, target: GLenum) {
        self.ctx.bind_framebuffer(self.obj, target);
    }

    /// Binds the default framebuffer to `target`.
    pub fn unbind(&self, target: GLenum) {
        self.ctx.bind_framebuffer(0, target);
    }

    /// Attaches `texture` to color attachment `slot` and enables it as a draw buffer.
    /// Returns the texture previously attached there.
    pub fn attach_color(&mut self, slot: u32, texture: Texture2D<B>) -> Option<Texture2D<B>> {
        self.attach_texture(gl::COLOR_ATTACHMENT0 + slot, texture.id());
        let slot = slot as usize;
        if self.color.len() <= slot {
            self.color.resize_with(slot + 1, || None);
        }
        let previous = self.color[slot].replace(texture);
        self.update_draw_buffers();
        previous
    }

    /// Sets the depth attachment. Depth-stencil formats are attached to the depth-stencil
    /// attachment point. Returns the previous depth attachment.
    pub fn attach_depth(&mut self, attachment: Attachment<B>) -> Option<Attachment<B>> {
        self.attach_depth_object(&attachment);
        self.depth.replace(attachment)
    }

    pub fn color_attachment(&self, slot: u32) -> Option<&Texture2D<B>> {
        self.color.get(slot as usize).and_then(|t| t.as_ref())
    }

    pub fn depth_attachment(&self) -> Option<&Attachment<B>> {
        self.depth.as_ref()
    }

    /// Completeness status (`GL_FRAMEBUFFER_COMPLETE` if complete).
    pub fn status(&self) -> GLenum {
        let gl = self.ctx.backend();
        unsafe {
            if self.ctx.direct_state_access() {
                gl.check_named_framebuffer_status(self.obj, gl::FRAMEBUFFER)
            } else {
                self.ctx.bind_framebuffer_for_edit(self.obj);
                gl.check_framebuffer_status(gl::FRAMEBUFFER)
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status() == gl::FRAMEBUFFER_COMPLETE
    }

    /// Resizes every attachment and attaches them again.
    pub fn resize(&mut self, width: u32, height: u32) {
        for slot in 0..self.color.len() {
            let id = match &mut self.color[slot] {
                Some(texture) => {
                    texture.resize(width, height);
                    texture.id()
                }
                None => continue,
            };
            self.attach_texture(gl::COLOR_ATTACHMENT0 + slot as u32, id);
        }
        if let Some(mut depth) = self.depth.take() {
            match &mut depth {
                Attachment::Texture(t) => t.resize(width, height),
                Attachment::Renderbuffer(r) => r.resize(width, height),
            }
            self.attach_depth_object(&depth);
            self.depth = Some(depth);
        }
    }

    pub fn label(&self, label: &str) {
        self.ctx.object_label(gl::FRAMEBUFFER, self.obj, label);
    }

    fn attach_texture(&self, attachment: GLenum, texture: GLuint) {
        let gl = self.ctx.backend();
        unsafe {
            if self.ctx.direct_state_access() {
                gl.named_framebuffer_texture(self.obj, attachment, texture, 0);
            } else {
                self.ctx.bind_framebuffer_for_edit(self.obj);
                gl.framebuffer_texture_2d(gl::FRAMEBUFFER, attachment, gl::TEXTURE_2D, texture, 0);
            }
        }
    }

    fn attach_depth_object(&self, attachment: &Attachment<B>) {
        let point = attachment.attachment_point();
        match attachment {
            Attachment::Texture(t) => self.attach_texture(point, t.id()),
            Attachment::Renderbuffer(r) => {
                let gl = self.ctx.backend();
                unsafe {
                    if self.ctx.direct_state_access() {
                        gl.named_framebuffer_renderbuffer(self.obj, point, r.id());
                    } else {
                        self.ctx.bind_framebuffer_for_edit(self.obj);
                        gl.framebuffer_renderbuffer(gl::FRAMEBUFFER, point, r.id());
                    }
                }
            }
        }
    }

    fn update_draw_buffers(&self) {
        let buffers: Vec<GLenum> = self
            .color
            .iter()
            .enumerate()
            .map(|(i, t)| match t {
                Some(_) => gl::COLOR_ATTACHMENT0 + i as u32,
                None => gl::NONE,
            })
            .collect();
        let gl = self.ctx.backend();
        unsafe {
            if self.ctx.direct_state_access() {
                gl.named_framebuffer_draw_buffers(self.obj, &buffers);
            } else {
                self.ctx.bind_framebuffer_for_edit(self.obj);
                gl.draw_buffers(&buffers);
            }
        }
    }
}
