use glballistic::api::gl;
use glballistic::recording::{Call, RecordingBackend};
use glballistic::{
    AttribFormat, Buffer, Capabilities, ClearMask, Context, Framebuffer, MemoryBarrier, Program,
    Renderbuffer, Texture2D, TextureDescriptor, TextureParameters, VertexArray,
};
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

const VERTEX: &str = r#"
#version 450
layout(location=0) in vec3 position;
void main() { gl_Position = vec4(position, 1.0); }
"#;

const FRAGMENT: &str = r#"
#version 450
uniform vec4 u_color;
out vec4 color;
void main() { color = u_color; }
"#;

fn setup(caps: Option<Capabilities>) -> Rc<Context<RecordingBackend>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    let backend = RecordingBackend::new();
    backend.set_uniforms(&["u_color", "u_texture"]);
    unsafe {
        match caps {
            Some(caps) => Context::with_capabilities(backend, caps),
            None => Context::new(backend),
        }
    }
}

struct Scene {
    program: Program<RecordingBackend>,
    vao: VertexArray<RecordingBackend>,
    _vertices: Buffer<RecordingBackend>,
    texture: Texture2D<RecordingBackend>,
}

fn scene(ctx: &Rc<Context<RecordingBackend>>) -> Scene {
    let program = Program::from_glsl(ctx, VERTEX, FRAGMENT).unwrap();
    let mut vertices = Buffer::new(ctx, gl::ARRAY_BUFFER);
    vertices.data(&[0.0f32; 9], gl::STATIC_DRAW);
    let vao = VertexArray::new(ctx);
    vao.vertex_buffer(0, &vertices, 0, 12);
    vao.attrib(0, AttribFormat::float(3, 0), 0);
    let texture = Texture2D::new(ctx, TextureDescriptor::rgba8(4, 4));
    texture.set_parameters(TextureParameters::default());
    Scene {
        program,
        vao,
        _vertices: vertices,
        texture,
    }
}

fn draw(ctx: &Context<RecordingBackend>, scene: &Scene) {
    ctx.clear(ClearMask::default());
    scene.program.set_uniform("u_color", [1.0f32, 0.0, 0.0, 1.0]);
    scene.program.set_uniform("u_texture", 0i32);
    scene.texture.bind(0);
    scene.vao.draw_arrays(gl::TRIANGLES, 0, 3, 1);
}

#[test]
fn second_frame_issues_no_binds() {
    for caps in [None, Some(Capabilities::LEGACY)] {
        let ctx = setup(caps);
        let scene = scene(&ctx);

        draw(&ctx, &scene);
        let first = ctx.backend().take_calls();
        assert_eq!(first.iter().filter(|c| c.name() == "glUseProgram").count(), 1);

        draw(&ctx, &scene);
        let second = ctx.backend().take_calls();
        let binds = second
            .iter()
            .filter(|c| !matches!(c, Call::Other(_) | Call::Uniform { .. }))
            .count();
        assert_eq!(binds, 0, "{:?}", second);
        assert_eq!(second.iter().filter(|c| c.name() == "glDrawArrays").count(), 1);
        assert_eq!(second.iter().filter(|c| c.name() == "glUniform").count(), 2);
    }
}

#[test]
fn offscreen_pass() {
    let ctx = setup(None);
    let mut depth = Renderbuffer::new(&ctx);
    depth.storage(gl::DEPTH_COMPONENT24, 128, 128);
    let mut target = Framebuffer::builder(&ctx)
        .color_texture(Texture2D::new(&ctx, TextureDescriptor::rgba8(128, 128)))
        .depth_renderbuffer(depth)
        .build()
        .unwrap();
    target.label("offscreen");

    target.bind(gl::FRAMEBUFFER);
    ctx.viewport(0, 0, 128, 128);
    ctx.clear(ClearMask::COLOR | ClearMask::DEPTH);
    target.unbind(gl::FRAMEBUFFER);

    target.resize(256, 256);
    let color = target.color_attachment(0).unwrap();
    assert_eq!(color.width(), 256);
    assert!(target.is_complete());
    assert_eq!(ctx.check_error(), Ok(()));
    assert_eq!(ctx.backend().count("glObjectLabel"), 1);
}

#[test]
fn compute_dispatch_with_storage_buffer() {
    let ctx = setup(None);
    let program = Program::compute(&ctx, "#version 450\nvoid main() {}").unwrap();
    let mut particles = Buffer::new(&ctx, gl::SHADER_STORAGE_BUFFER);
    particles.allocate(1024, gl::DYNAMIC_COPY);
    particles.bind_base(gl::SHADER_STORAGE_BUFFER, 0);
    particles.bind_base(gl::SHADER_STORAGE_BUFFER, 0);
    program.dispatch_compute(16, 1, 1, MemoryBarrier::SHADER_STORAGE);
    program.dispatch_compute(16, 1, 1, MemoryBarrier::SHADER_STORAGE);
    assert_eq!(ctx.backend().count("glBindBufferBase"), 1);
    assert_eq!(ctx.backend().count("glUseProgram"), 1);
    assert_eq!(ctx.backend().count("glMemoryBarrier"), 2);
}

#[test]
fn dropping_wrappers_deletes_each_name_once() {
    let ctx = setup(None);
    {
        let scene = scene(&ctx);
        draw(&ctx, &scene);
    }
    let backend = ctx.backend();
    assert_eq!(backend.count("glDeleteBuffers"), 1);
    assert_eq!(backend.count("glDeleteVertexArrays"), 1);
    assert_eq!(backend.count("glDeleteTextures"), 1);
    assert_eq!(backend.count("glDeleteProgram"), 1);
    assert_eq!(ctx.bindings().texture_unit(0), 0);
    // programs stay current after deletion
    assert_ne!(ctx.bindings().program(), 0);
}
