//! # glballistic
//!
//! Owning wrappers around OpenGL objects (buffers, textures, framebuffers, renderbuffers,
//! vertex arrays and shader programs) on top of a [`Context`] that filters redundant
//! binding calls.
//!
//! Every bind-type call made by the wrappers goes through the context's [`BindingState`]:
//! when the requested object is already bound at the requested bind point, the driver
//! call is skipped. The cache only knows about calls that went through it; code that
//! talks to the driver directly must call [`Context::reset_bindings`] afterwards (or use
//! [`Context::with_raw`], which does it for you).
//!
//! The context is shared through `Rc` and is neither `Send` nor `Sync`: like the GL
//! context it fronts, it must only be used from the thread that made that context current.
//!
//! Window and GL context creation are left to the application.

#[macro_use]
mod handle;

pub mod api;
pub mod backend;
pub mod buffer;
pub mod context;
pub mod error;
pub mod flags;
pub mod format;
pub mod framebuffer;
pub mod recording;
pub mod renderbuffer;
pub mod shader;
pub mod state;
pub mod texture;
pub mod uniform;
pub mod vertex_array;

pub use crate::backend::Backend;
pub use crate::buffer::{Buffer, MappedRange};
pub use crate::context::{Capabilities, Context};
pub use crate::error::{Error, Result};
pub use crate::flags::{BufferStorageFlags, ClearMask, MapAccess, MemoryBarrier};
pub use crate::framebuffer::{Attachment, Framebuffer, FramebufferBuilder};
pub use crate::renderbuffer::Renderbuffer;
pub use crate::shader::{Program, ShaderStage};
pub use crate::state::{BindingState, FramebufferRole, IndexedBinding};
pub use crate::texture::{Texture2D, TextureDescriptor, TextureParameters};
pub use crate::uniform::UniformValue;
pub use crate::vertex_array::{AttribFormat, VertexArray};
