//! Client-side pixel layout helpers.
use crate::api::gl;
use crate::api::gl::types::*;

/// Number of components of a pixel transfer format (`GL_RGBA`, `GL_RED_INTEGER`, ...).
pub fn component_count(format: GLenum) -> Option<usize> {
    match format {
        gl::RED | gl::GREEN | gl::BLUE | gl::RED_INTEGER | gl::DEPTH_COMPONENT | gl::STENCIL_INDEX => {
            Some(1)
        }
        gl::RG | gl::RG_INTEGER | gl::DEPTH_STENCIL => Some(2),
        gl::RGB | gl::BGR | gl::RGB_INTEGER | gl::BGR_INTEGER => Some(3),
        gl::RGBA | gl::BGRA | gl::RGBA_INTEGER | gl::BGRA_INTEGER => Some(4),
        _ => None,
    }
}

/// Size in bytes of one component of a pixel transfer type.
///
/// Returns `None` for packed types, see [`pixel_size`].
pub fn component_size(ty: GLenum) -> Option<usize> {
    match ty {
        gl::UNSIGNED_BYTE | gl::BYTE => Some(1),
        gl::UNSIGNED_SHORT | gl::SHORT | gl::HALF_FLOAT => Some(2),
        gl::UNSIGNED_INT | gl::INT | gl::FLOAT => Some(4),
        _ => None,
    }
}

/// Size in bytes of one pixel in client memory, or `None` if the combination is not known.
pub fn pixel_size(format: GLenum, ty: GLenum) -> Option<usize> {
    match ty {
        // packed types: the whole pixel fits in the type
        gl::UNSIGNED_INT_24_8 | gl::UNSIGNED_INT_10F_11F_11F_REV | gl::UNSIGNED_INT_2_10_10_10_REV => {
            Some(4)
        }
        gl::UNSIGNED_SHORT_5_6_5 | gl::UNSIGNED_SHORT_4_4_4_4 | gl::UNSIGNED_SHORT_5_5_5_1 => Some(2),
        gl::FLOAT_32_UNSIGNED_INT_24_8_REV => Some(8),
        _ => Some(component_count(format)? * component_size(ty)?),
    }
}
