use crate::api::gl;
use crate::api::gl::types::*;
use crate::backend::Backend;
use crate::context::Context;
use crate::format::pixel_size;
use bytemuck::Pod;
use std::rc::Rc;

/// Dimensions and formats of a 2D texture.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TextureDescriptor {
    pub width: u32,
    pub height: u32,
    /// Sized internal format (`GL_RGBA8`, `GL_DEPTH24_STENCIL8`...).
    pub internal_format: GLenum,
    /// Client-side pixel format used for uploads and readbacks.
    pub format: GLenum,
    /// Client-side component type used for uploads and readbacks.
    pub ty: GLenum,
    /// Number of mip levels.
    pub levels: u32,
}

impl TextureDescriptor {
    /// An RGBA8 texture with one mip level.
    pub fn rgba8(width: u32, height: u32) -> TextureDescriptor {
        TextureDescriptor {
            width,
            height,
            internal_format: gl::RGBA8,
            format: gl::RGBA,
            ty: gl::UNSIGNED_BYTE,
            levels: 1,
        }
    }

    /// A 24-bit depth + 8-bit stencil texture with one mip level.
    pub fn depth24_stencil8(width: u32, height: u32) -> TextureDescriptor {
        TextureDescriptor {
            width,
            height,
            internal_format: gl::DEPTH24_STENCIL8,
            format: gl::DEPTH_STENCIL,
            ty: gl::UNSIGNED_INT_24_8,
            levels: 1,
        }
    }

    /// Size in bytes of the base level in client memory, if the format is known.
    pub fn byte_size(&self) -> Option<usize> {
        Some(pixel_size(self.format, self.ty)? * self.width as usize * self.height as usize)
    }
}

/// Sampling parameters.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TextureParameters {
    pub min_filter: GLenum,
    pub mag_filter: GLenum,
    pub wrap_s: GLenum,
    pub wrap_t: GLenum,
}

impl Default for TextureParameters {
    fn default() -> Self {
        TextureParameters {
            min_filter: gl::LINEAR,
            mag_filter: gl::LINEAR,
            wrap_s: gl::CLAMP_TO_EDGE,
            wrap_t: gl::CLAMP_TO_EDGE,
        }
    }
}

impl_handle_type!(
    /// 2D texture with immutable storage.
    pub struct Texture2D {
        desc: TextureDescriptor
    }
);

impl<B: Backend> Drop for Texture2D<B> {
    fn drop(&mut self) {
        unsafe { self.ctx.backend().delete_texture(self.obj) }
        self.ctx.bindings_mut().forget_texture(self.obj);
    }
}

unsafe fn create_storage<B: Backend>(ctx: &Context<B>, desc: &TextureDescriptor) -> GLuint {
    let gl = ctx.backend();
    let obj = if ctx.direct_state_access() {
        gl.create_texture(gl::TEXTURE_2D)
    } else {
        gl.gen_texture()
    };
    let unit = ctx.bindings().active_texture_unit();
    ctx.bind_texture(unit, gl::TEXTURE_2D, obj);
    gl.tex_storage_2d(
        gl::TEXTURE_2D,
        desc.levels.max(1) as GLsizei,
        desc.internal_format,
        desc.width as GLsizei,
        desc.height as GLsizei,
    );
    obj
}

impl<B: Backend> Texture2D<B> {
    pub fn new(ctx: &Rc<Context<B>>, desc: TextureDescriptor) -> Texture2D<B> {
        let obj = unsafe { create_storage(ctx, &desc) };
        Texture2D {
            ctx: ctx.clone(),
            obj,
            desc,
        }
    }

    pub fn width(&self) -> u32 {
        self.desc.width
    }

    pub fn height(&self) -> u32 {
        self.desc.height
    }

    pub fn descriptor(&self) -> &TextureDescriptor {
        &self.desc
    }

    /// Binds the texture to texture unit `unit`.
    pub fn bind(&self, unit: GLuint) {
        self.ctx.bind_texture(unit, gl::TEXTURE_2D, self.obj);
    }

    /// Unbinds any 2D texture from texture unit `unit`.
    pub fn unbind(&self, unit: GLuint) {
        self.ctx.bind_texture(unit, gl::TEXTURE_2D, 0);
    }

    // Edits go through the texture bound to the active unit, so that editing does not
    // change the active unit.
    fn bind_for_edit(&self) {
        let unit = self.ctx.bindings().active_texture_unit();
        self.bind(unit);
    }

    /// Binds mip `level` to image unit `unit`, using the texture's internal format.
    pub fn bind_image(&self, unit: GLuint, access: GLenum, level: GLint) {
        unsafe {
            self.ctx.backend().bind_image_texture(
                unit,
                self.obj,
                level,
                false,
                0,
                access,
                self.desc.internal_format,
            )
        }
    }

    /// Uploads the whole base level.
    ///
    /// # Panics
    ///
    /// If the size of `data` doesn't match the dimensions and client format of the texture.
    pub fn set_data<T: Pod>(&self, data: &[T]) {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        if let Some(expected) = self.desc.byte_size() {
            assert_eq!(bytes.len(), expected, "texture data size mismatch");
        }
        self.bind_for_edit();
        let gl = self.ctx.backend();
        unsafe {
            gl.pixel_store_i(gl::UNPACK_ALIGNMENT, 1);
            gl.tex_sub_image_2d(
                gl::TEXTURE_2D,
                0,
                0,
                0,
                self.desc.width as GLsizei,
                self.desc.height as GLsizei,
                self.desc.format,
                self.desc.ty,
                bytes,
            );
            gl.pixel_store_i(gl::UNPACK_ALIGNMENT, 4);
        }
    }

    /// Reads back the whole base level into `data`.
    ///
    /// # Panics
    ///
    /// If the size of `data` doesn't match the dimensions and client format of the texture.
    pub fn get_data<T: Pod>(&self, data: &mut [T]) {
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(data);
        if let Some(expected) = self.desc.byte_size() {
            assert_eq!(bytes.len(), expected, "texture data size mismatch");
        }
        self.bind_for_edit();
        let gl = self.ctx.backend();
        unsafe {
            gl.pixel_store_i(gl::PACK_ALIGNMENT, 1);
            gl.get_tex_image(gl::TEXTURE_2D, 0, self.desc.format, self.desc.ty, bytes);
            gl.pixel_store_i(gl::PACK_ALIGNMENT, 4);
        }
    }

    pub fn generate_mipmaps(&self) {
        self.bind_for_edit();
        unsafe { self.ctx.backend().generate_mipmap(gl::TEXTURE_2D) }
    }

    pub fn set_parameters(&self, params: TextureParameters) {
        self.bind_for_edit();
        let gl = self.ctx.backend();
        unsafe {
            gl.tex_parameter_i(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, params.min_filter as GLint);
            gl.tex_parameter_i(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, params.mag_filter as GLint);
            gl.tex_parameter_i(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, params.wrap_s as GLint);
            gl.tex_parameter_i(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, params.wrap_t as GLint);
        }
    }

    /// Reallocates the texture with new dimensions. Contents and sampling parameters are lost.
    ///
    /// Storage is immutable, so this replaces the GL object: the texture gets a new name and
    /// must be re-attached wherever it was attached.
    pub fn resize(&mut self, width: u32, height: u32) {
        unsafe { self.ctx.backend().delete_texture(self.obj) }
        self.ctx.bindings_mut().forget_texture(self.obj);
        self.desc.width = width;
        self.desc.height = height;
        self.obj = unsafe { create_storage(&self.ctx, &self.desc) };
    }

    pub fn label(&self, label: &str) {
        self.ctx.object_label(gl::TEXTURE, self.obj, label);
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

    #[test]
    fn creation_binds_on_active_unit() {
        let ctx = legacy();
        ctx.active_texture(3);
        let texture = Texture2D::new(&ctx, TextureDescriptor::rgba8(4, 4));
        assert_eq!(ctx.bindings().texture(gl::TEXTURE_2D, 3), texture.id());
        assert_eq!(ctx.backend().count("glActiveTexture"), 1);
        assert_eq!(ctx.backend().count("glTexStorage2D"), 1);
    }

    #[test]
    fn upload_sets_unpack_alignment() {
        let ctx = legacy();
        let texture = Texture2D::new(&ctx, TextureDescriptor::rgba8(2, 2));
        ctx.backend().clear_calls();
        texture.set_data(&[0u8; 16]);
        assert_eq!(
            ctx.backend().calls(),
            vec![
                Call::Other("glPixelStorei"),
                Call::Other("glTexSubImage2D"),
                Call::Other("glPixelStorei"),
            ]
        );
    }

    #[test]
    #[should_panic(expected = "texture data size mismatch")]
    fn upload_checks_size() {
        let ctx = legacy();
        let texture = Texture2D::new(&ctx, TextureDescriptor::rgba8(2, 2));
        texture.set_data(&[0u8; 15]);
    }

    #[test]
    fn readback_fills_buffer() {
        let ctx = legacy();
        let texture = Texture2D::new(&ctx, TextureDescriptor::rgba8(2, 1));
        let mut pixels = [0xffu32; 2];
        texture.get_data(&mut pixels);
        assert_eq!(pixels, [0, 0]);
    }

    #[test]
    fn dsa_binding_is_per_unit() {
        let ctx = unsafe { Context::new(RecordingBackend::new()) };
        let texture = Texture2D::new(&ctx, TextureDescriptor::rgba8(8, 8));
        texture.bind(0);
        texture.bind(1);
        texture.bind(1);
        let units: Vec<Call> = ctx
            .backend()
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::BindTextureUnit { .. }))
            .collect();
        assert_eq!(
            units,
            vec![
                Call::BindTextureUnit {
                    unit: 0,
                    texture: texture.id()
                },
                Call::BindTextureUnit {
                    unit: 1,
                    texture: texture.id()
                },
            ]
        );
        assert_eq!(ctx.backend().count("glBindTexture"), 0);
    }

    #[test]
    fn resize_replaces_object() {
        let ctx = legacy();
        let mut texture = Texture2D::new(&ctx, TextureDescriptor::rgba8(8, 8));
        let old = texture.id();
        texture.resize(16, 4);
        assert_ne!(texture.id(), old);
        assert_eq!((texture.width(), texture.height()), (16, 4));
        assert_eq!(ctx.backend().count("glDeleteTextures"), 1);
        assert_eq!(ctx.backend().count("glTexStorage2D"), 2);
        assert_eq!(ctx.bindings().texture(gl::TEXTURE_2D, 0), texture.id());
    }

    #[test]
    fn drop_forgets_bindings() {
        let ctx = legacy();
        let texture = Texture2D::new(&ctx, TextureDescriptor::rgba8(1, 1));
        texture.bind(2);
        drop(texture);
        assert_eq!(ctx.bindings().texture(gl::TEXTURE_2D, 0), 0);
        assert_eq!(ctx.bindings().texture(gl::TEXTURE_2D, 2), 0);
    }
}
