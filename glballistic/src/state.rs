//! Binding state cache.
//!
//! [`BindingState`] remembers, for every bind point, the last object that was bound through
//! it. Each `update_*` method compares the requested binding against the recorded one,
//! records it, and returns `true` if it differs, i.e. if the caller has to issue the driver
//! call. [`Context`](crate::Context) wraps these into the actual bind operations.
//!
//! The records are never read back from the driver. Name `0` means "nothing bound", and a
//! bind point that was never touched reads as `0`.
use crate::api::gl;
use crate::api::gl::types::*;
use fxhash::FxHashMap;
use std::hash::Hash;

/// The role a framebuffer is bound for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FramebufferRole {
    /// `GL_FRAMEBUFFER`: drawing and reading.
    Combined,
    /// `GL_DRAW_FRAMEBUFFER`
    Draw,
    /// `GL_READ_FRAMEBUFFER`
    Read,
}

impl FramebufferRole {
    /// Maps a framebuffer target to the role tracked for it, or `None` for targets the
    /// cache does not track.
    pub fn from_target(target: GLenum) -> Option<FramebufferRole> {
        match target {
            gl::FRAMEBUFFER => Some(FramebufferRole::Combined),
            gl::DRAW_FRAMEBUFFER => Some(FramebufferRole::Draw),
            gl::READ_FRAMEBUFFER => Some(FramebufferRole::Read),
            _ => None,
        }
    }

    pub fn target(self) -> GLenum {
        match self {
            FramebufferRole::Combined => gl::FRAMEBUFFER,
            FramebufferRole::Draw => gl::DRAW_FRAMEBUFFER,
            FramebufferRole::Read => gl::READ_FRAMEBUFFER,
        }
    }

    fn index(self) -> usize {
        match self {
            FramebufferRole::Combined => 0,
            FramebufferRole::Draw => 1,
            FramebufferRole::Read => 2,
        }
    }
}

/// Buffer bound to an indexed binding point (uniform blocks, shader storage blocks...).
///
/// Ranged bindings are part of the key: binding the same buffer with a different range, or
/// as a whole after a ranged binding, is not redundant.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct IndexedBinding {
    pub buffer: GLuint,
    /// `(offset, size)` in bytes, or `None` for the whole buffer (`glBindBufferBase`).
    pub range: Option<(GLintptr, GLsizeiptr)>,
}

impl IndexedBinding {
    /// Nothing bound.
    pub const NONE: IndexedBinding = IndexedBinding {
        buffer: 0,
        range: None,
    };

    pub fn whole(buffer: GLuint) -> IndexedBinding {
        IndexedBinding {
            buffer,
            range: None,
        }
    }

    pub fn range(buffer: GLuint, offset: GLintptr, size: GLsizeiptr) -> IndexedBinding {
        IndexedBinding {
            buffer,
            range: Some((offset, size)),
        }
    }
}

/// Last-known bindings, per bind point.
#[derive(Clone, Debug, Default)]
pub struct BindingState {
    buffers: FxHashMap<GLenum, GLuint>,
    indexed_buffers: FxHashMap<(GLenum, GLuint), IndexedBinding>,
    vertex_array: GLuint,
    program: GLuint,
    renderbuffer: GLuint,
    framebuffers: [GLuint; 3],
    /// Per-unit bindings made with `glBindTextureUnit`.
    texture_units: FxHashMap<GLuint, GLuint>,
    /// Per-(target, unit) bindings made with `glBindTexture`.
    textures: FxHashMap<(GLenum, GLuint), GLuint>,
    active_texture_unit: GLuint,
}

fn compare_and_update_entry<K, V>(map: &mut FxHashMap<K, V>, key: K, value: V) -> bool
where
    K: Eq + Hash,
    V: Copy + Default + PartialEq,
{
    if map.get(&key).copied().unwrap_or_default() == value {
        return false;
    }
    map.insert(key, value);
    true
}

fn compare_and_update(slot: &mut GLuint, value: GLuint) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

fn forget_name(slot: &mut GLuint, name: GLuint) {
    if *slot == name {
        *slot = 0;
    }
}

impl BindingState {
    pub fn new() -> BindingState {
        BindingState::default()
    }

    /// Returns to the initial state: nothing bound anywhere, texture unit 0 active.
    pub fn reset(&mut self) {
        *self = BindingState::default();
    }

    pub fn update_buffer(&mut self, target: GLenum, buffer: GLuint) -> bool {
        compare_and_update_entry(&mut self.buffers, target, buffer)
    }

    pub fn update_indexed_buffer(&mut self, target: GLenum, index: GLuint, binding: IndexedBinding) -> bool {
        compare_and_update_entry(&mut self.indexed_buffers, (target, index), binding)
    }

    /// The element array buffer binding is vertex array state: changing the vertex array
    /// drops the recorded `GL_ELEMENT_ARRAY_BUFFER` binding.
    pub fn update_vertex_array(&mut self, array: GLuint) -> bool {
        let changed = compare_and_update(&mut self.vertex_array, array);
        if changed {
            self.buffers.remove(&gl::ELEMENT_ARRAY_BUFFER);
        }
        changed
    }

    pub fn update_program(&mut self, program: GLuint) -> bool {
        compare_and_update(&mut self.program, program)
    }

    pub fn update_renderbuffer(&mut self, renderbuffer: GLuint) -> bool {
        compare_and_update(&mut self.renderbuffer, renderbuffer)
    }

    /// Only the slot of `role` is compared and updated. In particular, a combined binding
    /// does not update the draw and read slots, even though the driver binds both.
    pub fn update_framebuffer(&mut self, role: FramebufferRole, framebuffer: GLuint) -> bool {
        compare_and_update(&mut self.framebuffers[role.index()], framebuffer)
    }

    /// Records a `GL_FRAMEBUFFER` binding in all three slots, as the driver does. Returns
    /// `false` only if every slot already holds `framebuffer`.
    ///
    /// Used before editing a framebuffer through `GL_FRAMEBUFFER`-targeted calls, which act
    /// on the draw framebuffer: the combined slot alone says nothing about the draw binding.
    pub fn update_framebuffer_all_roles(&mut self, framebuffer: GLuint) -> bool {
        if self.framebuffers.iter().all(|&fb| fb == framebuffer) {
            return false;
        }
        self.framebuffers = [framebuffer; 3];
        true
    }

    pub fn update_texture_unit(&mut self, unit: GLuint, texture: GLuint) -> bool {
        compare_and_update_entry(&mut self.texture_units, unit, texture)
    }

    pub fn update_texture(&mut self, target: GLenum, unit: GLuint, texture: GLuint) -> bool {
        compare_and_update_entry(&mut self.textures, (target, unit), texture)
    }

    pub fn update_active_texture_unit(&mut self, unit: GLuint) -> bool {
        compare_and_update(&mut self.active_texture_unit, unit)
    }

    // Deleting an object makes the driver revert every binding of it to 0; the `forget_*`
    // methods mirror that so that a recycled name is not mistaken for a live binding.

    pub fn forget_buffer(&mut self, buffer: GLuint) {
        if buffer == 0 {
            return;
        }
        self.buffers.values_mut().for_each(|b| forget_name(b, buffer));
        for binding in self.indexed_buffers.values_mut() {
            if binding.buffer == buffer {
                *binding = IndexedBinding::NONE;
            }
        }
    }

    pub fn forget_vertex_array(&mut self, array: GLuint) {
        if array != 0 && self.vertex_array == array {
            self.vertex_array = 0;
            self.buffers.remove(&gl::ELEMENT_ARRAY_BUFFER);
        }
    }

    pub fn forget_renderbuffer(&mut self, renderbuffer: GLuint) {
        forget_name(&mut self.renderbuffer, renderbuffer);
    }

    pub fn forget_framebuffer(&mut self, framebuffer: GLuint) {
        self.framebuffers
            .iter_mut()
            .for_each(|fb| forget_name(fb, framebuffer));
    }

    pub fn forget_texture(&mut self, texture: GLuint) {
        self.texture_units
            .values_mut()
            .for_each(|t| forget_name(t, texture));
        self.textures.values_mut().for_each(|t| forget_name(t, texture));
    }

    pub fn buffer(&self, target: GLenum) -> GLuint {
        self.buffers.get(&target).copied().unwrap_or(0)
    }

    pub fn indexed_buffer(&self, target: GLenum, index: GLuint) -> IndexedBinding {
        self.indexed_buffers
            .get(&(target, index))
            .copied()
            .unwrap_or(IndexedBinding::NONE)
    }

    pub fn vertex_array(&self) -> GLuint {
        self.vertex_array
    }

    pub fn program(&self) -> GLuint {
        self.program
    }

    pub fn renderbuffer(&self) -> GLuint {
        self.renderbuffer
    }

    pub fn framebuffer(&self, role: FramebufferRole) -> GLuint {
        self.framebuffers[role.index()]
    }

    pub fn texture_unit(&self, unit: GLuint) -> GLuint {
        self.texture_units.get(&unit).copied().unwrap_or(0)
    }

    pub fn texture(&self, target: GLenum, unit: GLuint) -> GLuint {
        self.textures.get(&(target, unit)).copied().unwrap_or(0)
    }

    pub fn active_texture_unit(&self) -> GLuint {
        self.active_texture_unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_binding_is_redundant() {
        let mut state = BindingState::new();
        assert!(state.update_buffer(gl::ARRAY_BUFFER, 7));
        assert!(!state.update_buffer(gl::ARRAY_BUFFER, 7));
        assert!(state.update_buffer(gl::ARRAY_BUFFER, 9));
        assert_eq!(state.buffer(gl::ARRAY_BUFFER), 9);
    }

    #[test]
    fn unseen_keys_read_as_unbound() {
        let mut state = BindingState::new();
        assert_eq!(state.buffer(gl::UNIFORM_BUFFER), 0);
        assert_eq!(state.indexed_buffer(gl::UNIFORM_BUFFER, 3), IndexedBinding::NONE);
        assert_eq!(state.texture(gl::TEXTURE_2D, 5), 0);
        assert!(!state.update_buffer(gl::UNIFORM_BUFFER, 0));
        assert!(!state.update_indexed_buffer(gl::UNIFORM_BUFFER, 3, IndexedBinding::NONE));
        assert!(!state.update_texture_unit(4, 0));
        assert!(!state.update_texture(gl::TEXTURE_2D, 4, 0));
        assert!(!state.update_vertex_array(0));
        assert!(!state.update_program(0));
        assert!(!state.update_renderbuffer(0));
        assert!(!state.update_framebuffer(FramebufferRole::Read, 0));
        assert!(!state.update_active_texture_unit(0));
    }

    #[test]
    fn keys_are_independent() {
        let mut state = BindingState::new();
        assert!(state.update_buffer(gl::ARRAY_BUFFER, 1));
        assert!(state.update_buffer(gl::ELEMENT_ARRAY_BUFFER, 1));
        assert!(state.update_indexed_buffer(gl::UNIFORM_BUFFER, 0, IndexedBinding::whole(1)));
        assert!(state.update_indexed_buffer(gl::UNIFORM_BUFFER, 1, IndexedBinding::whole(1)));
        assert!(state.update_indexed_buffer(gl::SHADER_STORAGE_BUFFER, 0, IndexedBinding::whole(1)));
        assert!(state.update_texture(gl::TEXTURE_2D, 0, 1));
        assert!(state.update_texture(gl::TEXTURE_3D, 0, 1));
        assert!(state.update_texture(gl::TEXTURE_2D, 1, 1));
    }

    #[test]
    fn ranged_bindings_compare_offset_and_size() {
        let mut state = BindingState::new();
        let target = gl::UNIFORM_BUFFER;
        assert!(state.update_indexed_buffer(target, 0, IndexedBinding::range(4, 0, 256)));
        assert!(!state.update_indexed_buffer(target, 0, IndexedBinding::range(4, 0, 256)));
        assert!(state.update_indexed_buffer(target, 0, IndexedBinding::range(4, 256, 256)));
        assert!(state.update_indexed_buffer(target, 0, IndexedBinding::whole(4)));
        assert!(!state.update_indexed_buffer(target, 0, IndexedBinding::whole(4)));
    }

    #[test]
    fn framebuffer_roles_are_separate_slots() {
        let mut state = BindingState::new();
        assert!(state.update_framebuffer(FramebufferRole::Combined, 5));
        assert_eq!(state.framebuffer(FramebufferRole::Draw), 0);
        assert_eq!(state.framebuffer(FramebufferRole::Read), 0);
        assert!(state.update_framebuffer(FramebufferRole::Draw, 5));
        assert!(state.update_framebuffer(FramebufferRole::Read, 5));
        assert!(!state.update_framebuffer(FramebufferRole::Combined, 5));
    }

    #[test]
    fn editing_binding_covers_every_role() {
        let mut state = BindingState::new();
        assert!(state.update_framebuffer(FramebufferRole::Combined, 1));
        // the combined slot matches, but the draw slot does not
        assert!(state.update_framebuffer_all_roles(1));
        assert!(!state.update_framebuffer_all_roles(1));
        assert!(!state.update_framebuffer(FramebufferRole::Draw, 1));
        assert!(state.update_framebuffer(FramebufferRole::Draw, 2));
        assert!(state.update_framebuffer_all_roles(1));
        assert_eq!(state.framebuffer(FramebufferRole::Draw), 1);
    }

    #[test]
    fn vertex_array_change_drops_element_buffer() {
        let mut state = BindingState::new();
        state.update_vertex_array(1);
        state.update_buffer(gl::ELEMENT_ARRAY_BUFFER, 4);
        state.update_buffer(gl::ARRAY_BUFFER, 5);
        assert!(!state.update_vertex_array(1));
        assert_eq!(state.buffer(gl::ELEMENT_ARRAY_BUFFER), 4);

        assert!(state.update_vertex_array(2));
        assert_eq!(state.buffer(gl::ELEMENT_ARRAY_BUFFER), 0);
        assert_eq!(state.buffer(gl::ARRAY_BUFFER), 5);
        assert!(state.update_buffer(gl::ELEMENT_ARRAY_BUFFER, 4));

        state.forget_vertex_array(2);
        assert_eq!(state.vertex_array(), 0);
        assert_eq!(state.buffer(gl::ELEMENT_ARRAY_BUFFER), 0);
    }

    #[test]
    fn framebuffer_role_targets() {
        for role in [FramebufferRole::Combined, FramebufferRole::Draw, FramebufferRole::Read] {
            assert_eq!(FramebufferRole::from_target(role.target()), Some(role));
        }
        assert_eq!(FramebufferRole::from_target(gl::TEXTURE_2D), None);
    }

    #[test]
    fn reset_forgets_everything() {
        let mut state = BindingState::new();
        state.update_buffer(gl::ARRAY_BUFFER, 1);
        state.update_indexed_buffer(gl::UNIFORM_BUFFER, 2, IndexedBinding::whole(3));
        state.update_vertex_array(4);
        state.update_program(5);
        state.update_renderbuffer(6);
        state.update_framebuffer(FramebufferRole::Draw, 7);
        state.update_texture_unit(1, 8);
        state.update_texture(gl::TEXTURE_2D, 1, 9);
        state.update_active_texture_unit(3);

        state.reset();

        assert_eq!(state.buffer(gl::ARRAY_BUFFER), 0);
        assert_eq!(state.indexed_buffer(gl::UNIFORM_BUFFER, 2), IndexedBinding::NONE);
        assert_eq!(state.vertex_array(), 0);
        assert_eq!(state.program(), 0);
        assert_eq!(state.renderbuffer(), 0);
        assert_eq!(state.framebuffer(FramebufferRole::Draw), 0);
        assert_eq!(state.texture_unit(1), 0);
        assert_eq!(state.texture(gl::TEXTURE_2D, 1), 0);
        assert_eq!(state.active_texture_unit(), 0);
    }

    #[test]
    fn forgetting_a_name_only_touches_its_entries() {
        let mut state = BindingState::new();
        state.update_buffer(gl::ARRAY_BUFFER, 1);
        state.update_buffer(gl::COPY_READ_BUFFER, 2);
        state.update_indexed_buffer(gl::UNIFORM_BUFFER, 0, IndexedBinding::range(1, 0, 16));
        state.update_texture_unit(0, 1);
        state.update_texture(gl::TEXTURE_2D, 3, 1);
        state.update_framebuffer(FramebufferRole::Combined, 1);
        state.update_framebuffer(FramebufferRole::Read, 2);

        state.forget_buffer(1);
        assert_eq!(state.buffer(gl::ARRAY_BUFFER), 0);
        assert_eq!(state.buffer(gl::COPY_READ_BUFFER), 2);
        assert_eq!(state.indexed_buffer(gl::UNIFORM_BUFFER, 0), IndexedBinding::NONE);
        // other object types are unaffected
        assert_eq!(state.texture_unit(0), 1);

        state.forget_texture(1);
        assert_eq!(state.texture_unit(0), 0);
        assert_eq!(state.texture(gl::TEXTURE_2D, 3), 0);

        state.forget_framebuffer(1);
        assert_eq!(state.framebuffer(FramebufferRole::Combined), 0);
        assert_eq!(state.framebuffer(FramebufferRole::Read), 2);

        // a recycled name is bound again
        assert!(state.update_buffer(gl::ARRAY_BUFFER, 1));
    }
}
