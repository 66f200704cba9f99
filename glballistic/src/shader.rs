use crate::api::gl;
use crate::api::gl::types::*;
use crate::backend::Backend;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::flags::MemoryBarrier;
use crate::uniform::UniformValue;
use fxhash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::{trace, warn};

/// Programmable pipeline stage of a shader object.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    TessControl,
    TessEvaluation,
    Geometry,
    Fragment,
    Compute,
}

impl ShaderStage {
    pub fn to_gl(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::TessControl => gl::TESS_CONTROL_SHADER,
            ShaderStage::TessEvaluation => gl::TESS_EVALUATION_SHADER,
            ShaderStage::Geometry => gl::GEOMETRY_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
            ShaderStage::Compute => gl::COMPUTE_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::TessControl => "tessellation control",
            ShaderStage::TessEvaluation => "tessellation evaluation",
            ShaderStage::Geometry => "geometry",
            ShaderStage::Fragment => "fragment",
            ShaderStage::Compute => "compute",
        };
        f.write_str(name)
    }
}

impl_handle_type!(
    /// Shader program.
    ///
    /// Shader objects are compiled and attached with [`Program::attach_shader`], and deleted
    /// once the program is linked.
    pub struct Program {
        attached: Vec<GLuint>,
        uniform_locations: RefCell<FxHashMap<String, GLint>>
    }
);

impl<B: Backend> Drop for Program<B> {
    fn drop(&mut self) {
        let gl = self.ctx.backend();
        unsafe {
            for &shader in &self.attached {
                gl.delete_shader(shader);
            }
            // a deleted program stays in use until another one is bound, so the
            // cached program binding is still accurate
            gl.delete_program(self.obj);
        }
    }
}

impl<B: Backend> Program<B> {
    /// Creates an empty program.
    pub fn new(ctx: &Rc<Context<B>>) -> Program<B> {
        let obj = unsafe { ctx.backend().create_program() };
        Program {
            ctx: ctx.clone(),
            obj,
            attached: Vec::new(),
            uniform_locations: RefCell::new(FxHashMap::default()),
        }
    }

    /// Compiles and links a vertex + fragment shader program.
    pub fn from_glsl(ctx: &Rc<Context<B>>, vertex: &str, fragment: &str) -> Result<Program<B>> {
        let mut program = Program::new(ctx);
        program.attach_shader(ShaderStage::Vertex, vertex)?;
        program.attach_shader(ShaderStage::Fragment, fragment)?;
        program.link()?;
        Ok(program)
    }

    /// Compiles and links a compute shader program.
    pub fn compute(ctx: &Rc<Context<B>>, source: &str) -> Result<Program<B>> {
        let mut program = Program::new(ctx);
        program.attach_shader(ShaderStage::Compute, source)?;
        program.link()?;
        Ok(program)
    }

    /// Compiles `source` and attaches the resulting shader object.
    ///
    /// On failure the shader object is deleted and the info log is returned.
    pub fn attach_shader(&mut self, stage: ShaderStage, source: &str) -> Result<GLuint> {
        let gl = self.ctx.backend();
        unsafe {
            let shader = gl.create_shader(stage.to_gl());
            gl.shader_source(shader, source);
            gl.compile_shader(shader);
            if gl.get_shader_iv(shader, gl::COMPILE_STATUS) != gl::TRUE as GLint {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                warn!(%stage, "shader compilation failed: {}", log);
                return Err(Error::ShaderCompilation { stage, log });
            }
            gl.attach_shader(self.obj, shader);
            self.attached.push(shader);
            Ok(shader)
        }
    }

    /// Detaches a shader object returned by [`Program::attach_shader`] and deletes it.
    pub fn detach_shader(&mut self, shader: GLuint) {
        if let Some(pos) = self.attached.iter().position(|&s| s == shader) {
            self.attached.remove(pos);
            let gl = self.ctx.backend();
            unsafe {
                gl.detach_shader(self.obj, shader);
                gl.delete_shader(shader);
            }
        }
    }

    /// Links the program. The attached shader objects are deleted whether linking succeeds
    /// or not.
    pub fn link(&mut self) -> Result<()> {
        let gl = self.ctx.backend();
        self.uniform_locations.borrow_mut().clear();
        unsafe {
            gl.link_program(self.obj);
            for shader in self.attached.drain(..) {
                gl.delete_shader(shader);
            }
            if gl.get_program_iv(self.obj, gl::LINK_STATUS) != gl::TRUE as GLint {
                let log = gl.get_program_info_log(self.obj);
                warn!(program = self.obj, "program link failed: {}", log);
                return Err(Error::ProgramLink(log));
            }
        }
        Ok(())
    }

    /// Checks whether the program can execute in the current GL state.
    pub fn validate(&self) -> Result<()> {
        let gl = self.ctx.backend();
        unsafe {
            gl.validate_program(self.obj);
            if gl.get_program_iv(self.obj, gl::VALIDATE_STATUS) != gl::TRUE as GLint {
                let log = gl.get_program_info_log(self.obj);
                warn!(program = self.obj, "program validation failed: {}", log);
                return Err(Error::ProgramValidation(log));
            }
        }
        Ok(())
    }

    pub fn bind(&self) {
        self.ctx.bind_program(self.obj);
    }

    pub fn unbind(&self) {
        self.ctx.bind_program(0);
    }

    /// Location of uniform `name`, or `None` if the program has no such active uniform.
    ///
    /// Locations are queried once per name and remembered until the program is re-linked.
    pub fn uniform_location(&self, name: &str) -> Option<GLint> {
        if let Some(&loc) = self.uniform_locations.borrow().get(name) {
            return (loc >= 0).then(|| loc);
        }
        let loc = unsafe { self.ctx.backend().get_uniform_location(self.obj, name) };
        self.uniform_locations
            .borrow_mut()
            .insert(name.to_owned(), loc);
        (loc >= 0).then(|| loc)
    }

    /// Binds the program and sets uniform `name`. Unknown names are ignored, as GL does.
    pub fn set_uniform(&self, name: &str, value: impl Into<UniformValue>) {
        self.bind();
        match self.uniform_location(name) {
            Some(location) => unsafe { self.ctx.backend().uniform(location, &value.into()) },
            None => trace!(name, "no such uniform"),
        }
    }

    pub fn attrib_location(&self, name: &str) -> Option<GLuint> {
        let loc = unsafe { self.ctx.backend().get_attrib_location(self.obj, name) };
        (loc >= 0).then(|| loc as GLuint)
    }

    /// Names of the active uniforms.
    pub fn active_uniforms(&self) -> Vec<String> {
        let gl = self.ctx.backend();
        unsafe {
            let count = gl.get_program_iv(self.obj, gl::ACTIVE_UNIFORMS).max(0) as GLuint;
            (0..count)
                .map(|i| gl.get_active_uniform_name(self.obj, i))
                .collect()
        }
    }

    /// Binds the program, dispatches a compute grid, then issues `barriers` if not empty.
    pub fn dispatch_compute(&self, x: u32, y: u32, z: u32, barriers: MemoryBarrier) {
        self.bind();
        let gl = self.ctx.backend();
        unsafe {
            gl.dispatch_compute(x, y, z);
            if !barriers.is_empty() {
                gl.memory_barrier(barriers.bits());
            }
        }
    }

    pub fn label(&self, label: &str) {
        self.ctx.object_label(gl::PROGRAM, self.obj, label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{Call, RecordingBackend};

    fn context() -> Rc<Context<RecordingBackend>> {
        unsafe { Context::new(RecordingBackend::new()) }
    }

    const VS: &str = "void main() { gl_Position = vec4(0.0); }";
    const FS: &str = "out vec4 color; void main() { color = vec4(1.0); }";

    #[test]
    fn link_deletes_shader_objects() {
        let ctx = context();
        let program = Program::from_glsl(&ctx, VS, FS).unwrap();
        assert_eq!(ctx.backend().count("glCompileShader"), 2);
        assert_eq!(ctx.backend().count("glAttachShader"), 2);
        assert_eq!(ctx.backend().count("glDeleteShader"), 2);
        drop(program);
        assert_eq!(ctx.backend().count("glDeleteShader"), 2);
        assert_eq!(ctx.backend().count("glDeleteProgram"), 1);
    }

    #[test]
    fn compilation_error_carries_log() {
        let ctx = context();
        ctx.backend().fail_compilation("0:1: syntax error");
        let err = Program::from_glsl(&ctx, VS, "garbage").unwrap_err();
        assert_eq!(
            err,
            Error::ShaderCompilation {
                stage: ShaderStage::Vertex,
                log: "0:1: syntax error".to_owned()
            }
        );
        assert_eq!(
            err.to_string(),
            "vertex shader compilation failed: 0:1: syntax error"
        );
        // the failed shader and the program are both deleted
        assert_eq!(ctx.backend().count("glDeleteShader"), 1);
        assert_eq!(ctx.backend().count("glDeleteProgram"), 1);
    }

    #[test]
    fn link_error_carries_log() {
        let ctx = context();
        ctx.backend().fail_link("missing main");
        let err = Program::compute(&ctx, "void main() {}").unwrap_err();
        assert_eq!(err, Error::ProgramLink("missing main".to_owned()));
    }

    #[test]
    fn uniform_locations_are_memoised() {
        let ctx = context();
        ctx.backend().set_uniforms(&["u_time", "u_color"]);
        let program = Program::from_glsl(&ctx, VS, FS).unwrap();
        assert_eq!(program.uniform_location("u_color"), Some(1));
        assert_eq!(program.uniform_location("u_color"), Some(1));
        assert_eq!(program.uniform_location("u_missing"), None);
        assert_eq!(program.uniform_location("u_missing"), None);
        assert_eq!(ctx.backend().count("glGetUniformLocation"), 2);
        assert_eq!(program.active_uniforms(), vec!["u_time", "u_color"]);
    }

    #[test]
    fn attribute_locations() {
        let ctx = context();
        ctx.backend().set_attributes(&["position", "normal"]);
        let program = Program::from_glsl(&ctx, VS, FS).unwrap();
        assert_eq!(program.attrib_location("position"), Some(0));
        assert_eq!(program.attrib_location("normal"), Some(1));
        assert_eq!(program.attrib_location("uv"), None);
        assert_eq!(ctx.backend().count("glGetAttribLocation"), 3);
    }

    #[test]
    fn set_uniform_binds_once() {
        let ctx = context();
        ctx.backend().set_uniforms(&["u_time"]);
        let program = Program::from_glsl(&ctx, VS, FS).unwrap();
        ctx.backend().clear_calls();
        program.set_uniform("u_time", 1.5f32);
        program.set_uniform("u_time", 2.5f32);
        program.set_uniform("u_unknown", 0i32);
        let calls: Vec<Call> = ctx
            .backend()
            .take_calls()
            .into_iter()
            .filter(|c| c.name() != "glGetUniformLocation")
            .collect();
        assert_eq!(
            calls,
            vec![
                Call::UseProgram(program.id()),
                Call::Uniform {
                    location: 0,
                    value: UniformValue::Float(1.5)
                },
                Call::Uniform {
                    location: 0,
                    value: UniformValue::Float(2.5)
                },
            ]
        );
    }

    #[test]
    fn dispatch_issues_barrier_only_when_requested() {
        let ctx = context();
        let program = Program::compute(&ctx, "void main() {}").unwrap();
        program.dispatch_compute(8, 8, 1, MemoryBarrier::empty());
        program.dispatch_compute(8, 8, 1, MemoryBarrier::SHADER_STORAGE);
        assert_eq!(ctx.backend().count("glDispatchCompute"), 2);
        assert_eq!(ctx.backend().count("glMemoryBarrier"), 1);
        assert_eq!(ctx.backend().count("glUseProgram"), 1);
    }

    #[test]
    fn detach_deletes_shader() {
        let ctx = context();
        let mut program = Program::new(&ctx);
        let vs = program.attach_shader(ShaderStage::Vertex, VS).unwrap();
        program.detach_shader(vs);
        program.detach_shader(vs);
        assert_eq!(ctx.backend().count("glDetachShader"), 1);
        assert_eq!(ctx.backend().count("glDeleteShader"), 1);
    }
}
