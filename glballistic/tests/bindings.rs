use glballistic::api::gl;
use glballistic::recording::{Call, RecordingBackend};
use glballistic::{Capabilities, Context, FramebufferRole, IndexedBinding};
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn direct() -> Rc<Context<RecordingBackend>> {
    init_logging();
    unsafe { Context::new(RecordingBackend::new()) }
}

fn legacy() -> Rc<Context<RecordingBackend>> {
    init_logging();
    unsafe { Context::with_capabilities(RecordingBackend::new(), Capabilities::LEGACY) }
}

#[test]
fn rebinding_same_buffer_is_elided() {
    let ctx = direct();
    ctx.bind_buffer(gl::ARRAY_BUFFER, 7);
    ctx.bind_buffer(gl::ARRAY_BUFFER, 7);
    ctx.bind_buffer(gl::ARRAY_BUFFER, 9);
    assert_eq!(
        ctx.backend().calls(),
        vec![
            Call::BindBuffer {
                target: gl::ARRAY_BUFFER,
                buffer: 7
            },
            Call::BindBuffer {
                target: gl::ARRAY_BUFFER,
                buffer: 9
            },
        ]
    );
}

#[test]
fn texture_units_are_independent() {
    let ctx = direct();
    ctx.bind_texture(0, gl::TEXTURE_2D, 3);
    ctx.bind_texture(1, gl::TEXTURE_2D, 3);
    assert_eq!(
        ctx.backend().calls(),
        vec![
            Call::BindTextureUnit { unit: 0, texture: 3 },
            Call::ActiveTexture(1),
            Call::BindTextureUnit { unit: 1, texture: 3 },
        ]
    );
}

#[test]
fn legacy_texture_binding_is_per_target_and_unit() {
    let ctx = legacy();
    ctx.bind_texture(0, gl::TEXTURE_2D, 3);
    ctx.bind_texture(0, gl::TEXTURE_CUBE_MAP, 3);
    ctx.bind_texture(0, gl::TEXTURE_2D, 3);
    assert_eq!(
        ctx.backend().calls(),
        vec![
            Call::BindTexture {
                target: gl::TEXTURE_2D,
                texture: 3
            },
            Call::BindTexture {
                target: gl::TEXTURE_CUBE_MAP,
                texture: 3
            },
        ]
    );
    assert_eq!(ctx.bindings().texture(gl::TEXTURE_CUBE_MAP, 0), 3);
    assert_eq!(ctx.bindings().texture_unit(0), 0);
}

#[test]
fn combined_and_draw_framebuffer_slots_are_separate() {
    let ctx = direct();
    ctx.reset_bindings();
    ctx.bind_framebuffer(5, gl::FRAMEBUFFER);
    ctx.bind_framebuffer(5, gl::DRAW_FRAMEBUFFER);
    assert_eq!(
        ctx.backend().calls(),
        vec![
            Call::BindFramebuffer {
                target: gl::FRAMEBUFFER,
                framebuffer: 5
            },
            Call::BindFramebuffer {
                target: gl::DRAW_FRAMEBUFFER,
                framebuffer: 5
            },
        ]
    );
    assert_eq!(ctx.bindings().framebuffer(FramebufferRole::Read), 0);
}

#[test]
fn reset_makes_every_bind_reach_the_driver() {
    let ctx = direct();
    let bind_all = || {
        ctx.bind_buffer(gl::ARRAY_BUFFER, 1);
        ctx.bind_buffer_base(gl::UNIFORM_BUFFER, 0, 2);
        ctx.bind_buffer_range(gl::SHADER_STORAGE_BUFFER, 1, 3, 0, 64);
        ctx.bind_vertex_array(4);
        ctx.bind_program(5);
        ctx.bind_renderbuffer(6);
        ctx.bind_framebuffer(7, gl::READ_FRAMEBUFFER);
        ctx.bind_texture(2, gl::TEXTURE_2D, 8);
    };

    bind_all();
    let first = ctx.backend().take_calls();
    assert_eq!(first.len(), 9);

    bind_all();
    assert!(ctx.backend().take_calls().is_empty());

    ctx.reset_bindings();
    bind_all();
    assert_eq!(ctx.backend().take_calls(), first);
}

#[test]
fn unbinding_an_untouched_bind_point_is_elided() {
    let ctx = direct();
    ctx.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, 0);
    ctx.bind_vertex_array(0);
    ctx.bind_program(0);
    ctx.bind_renderbuffer(0);
    ctx.bind_framebuffer(0, gl::FRAMEBUFFER);
    ctx.bind_texture(0, gl::TEXTURE_2D, 0);
    ctx.bind_buffer_base(gl::UNIFORM_BUFFER, 4, 0);
    assert!(ctx.backend().calls().is_empty());
}

#[test]
fn ranged_binds_are_keyed_on_the_range() {
    let ctx = direct();
    ctx.bind_buffer_range(gl::UNIFORM_BUFFER, 0, 1, 0, 256);
    ctx.bind_buffer_range(gl::UNIFORM_BUFFER, 0, 1, 0, 256);
    ctx.bind_buffer_range(gl::UNIFORM_BUFFER, 0, 1, 256, 256);
    ctx.bind_buffer_base(gl::UNIFORM_BUFFER, 0, 1);
    ctx.bind_buffer_base(gl::UNIFORM_BUFFER, 0, 1);
    assert_eq!(ctx.backend().count("glBindBufferRange"), 2);
    assert_eq!(ctx.backend().count("glBindBufferBase"), 1);
    assert_eq!(
        ctx.bindings().indexed_buffer(gl::UNIFORM_BUFFER, 0),
        IndexedBinding::whole(1)
    );
}

#[test]
fn indexed_and_plain_buffer_bindings_are_distinct() {
    let ctx = direct();
    ctx.bind_buffer_base(gl::UNIFORM_BUFFER, 0, 1);
    ctx.bind_buffer(gl::UNIFORM_BUFFER, 1);
    assert_eq!(ctx.backend().count("glBindBufferBase"), 1);
    assert_eq!(ctx.backend().count("glBindBuffer"), 1);
}

#[test]
fn contexts_do_not_share_state() {
    let a = direct();
    let b = direct();
    a.bind_program(1);
    b.bind_program(1);
    assert_eq!(a.backend().count("glUseProgram"), 1);
    assert_eq!(b.backend().count("glUseProgram"), 1);
}

#[test]
fn capabilities_from_extensions_select_the_direct_path() {
    init_logging();
    let backend = RecordingBackend::with_version(4, 1).extension("GL_ARB_direct_state_access");
    let ctx = unsafe { Context::new(backend) };
    assert!(ctx.capabilities().direct_state_access);
    assert!(!ctx.capabilities().debug_labels);
    ctx.bind_texture(0, gl::TEXTURE_2D, 1);
    assert_eq!(ctx.backend().count("glBindTextureUnit"), 1);
    assert_eq!(ctx.backend().count("glBindTexture"), 0);
}
