use crate::api::gl::types::GLenum;
use crate::shader::ShaderStage;

/// Errors reported by the object wrappers and by [`Context::check_error`](crate::Context::check_error).
///
/// Binding calls never fail at this level: they are forwarded to the driver, which reports
/// problems through its own error flag.
#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    #[error("framebuffer incomplete (status {0:#06x})")]
    FramebufferIncomplete(GLenum),
    #[error("{stage} shader compilation failed: {log}")]
    ShaderCompilation { stage: ShaderStage, log: String },
    #[error("program link failed: {0}")]
    ProgramLink(String),
    #[error("program validation failed: {0}")]
    ProgramValidation(String),
    #[error("GL error(s): {0:x?}")]
    Gl(Vec<GLenum>),
}

pub type Result<T> = std::result::Result<T, Error>;
