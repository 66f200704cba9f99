use crate::api::gl;
use bitflags::bitflags;

bitflags! {
    /// Buffers cleared by [`Context::clear`](crate::Context::clear).
    pub struct ClearMask: u32 {
        const COLOR = gl::COLOR_BUFFER_BIT;
        const DEPTH = gl::DEPTH_BUFFER_BIT;
        const STENCIL = gl::STENCIL_BUFFER_BIT;
    }
}

impl Default for ClearMask {
    fn default() -> Self {
        ClearMask::COLOR | ClearMask::DEPTH
    }
}

bitflags! {
    /// Flags for immutable buffer storage (`glBufferStorage`).
    #[derive(Default)]
    pub struct BufferStorageFlags: u32 {
        const DYNAMIC_STORAGE = gl::DYNAMIC_STORAGE_BIT;
        const MAP_READ = gl::MAP_READ_BIT;
        const MAP_WRITE = gl::MAP_WRITE_BIT;
        const MAP_PERSISTENT = gl::MAP_PERSISTENT_BIT;
        const MAP_COHERENT = gl::MAP_COHERENT_BIT;
        const CLIENT_STORAGE = gl::CLIENT_STORAGE_BIT;
    }
}

bitflags! {
    /// Access flags for buffer mappings (`glMapBufferRange`).
    pub struct MapAccess: u32 {
        const READ = gl::MAP_READ_BIT;
        const WRITE = gl::MAP_WRITE_BIT;
        const PERSISTENT = gl::MAP_PERSISTENT_BIT;
        const COHERENT = gl::MAP_COHERENT_BIT;
        const INVALIDATE_RANGE = gl::MAP_INVALIDATE_RANGE_BIT;
        const INVALIDATE_BUFFER = gl::MAP_INVALIDATE_BUFFER_BIT;
        const FLUSH_EXPLICIT = gl::MAP_FLUSH_EXPLICIT_BIT;
        const UNSYNCHRONIZED = gl::MAP_UNSYNCHRONIZED_BIT;
    }
}

bitflags! {
    /// Barriers issued after a compute dispatch (`glMemoryBarrier`).
    #[derive(Default)]
    pub struct MemoryBarrier: u32 {
        const VERTEX_ATTRIB_ARRAY = gl::VERTEX_ATTRIB_ARRAY_BARRIER_BIT;
        const ELEMENT_ARRAY = gl::ELEMENT_ARRAY_BARRIER_BIT;
        const UNIFORM = gl::UNIFORM_BARRIER_BIT;
        const TEXTURE_FETCH = gl::TEXTURE_FETCH_BARRIER_BIT;
        const SHADER_IMAGE_ACCESS = gl::SHADER_IMAGE_ACCESS_BARRIER_BIT;
        const COMMAND = gl::COMMAND_BARRIER_BIT;
        const PIXEL_BUFFER = gl::PIXEL_BUFFER_BARRIER_BIT;
        const TEXTURE_UPDATE = gl::TEXTURE_UPDATE_BARRIER_BIT;
        const BUFFER_UPDATE = gl::BUFFER_UPDATE_BARRIER_BIT;
        const FRAMEBUFFER = gl::FRAMEBUFFER_BARRIER_BIT;
        const SHADER_STORAGE = gl::SHADER_STORAGE_BARRIER_BIT;
        const ALL = gl::ALL_BARRIER_BITS;
    }
}
