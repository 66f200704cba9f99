// Owning wrappers share the same skeleton: a reference to the context and the GL name.
// Deletion differs per object type, so `Drop` is implemented next to each wrapper.
macro_rules! impl_handle_type {
    ($(#[$meta:meta])* $v:vis struct $name:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        $(#[$meta])*
        $v struct $name<B: $crate::backend::Backend = $crate::api::Gl> {
            ctx: ::std::rc::Rc<$crate::context::Context<B>>,
            obj: $crate::api::gl::types::GLuint,
            $($field: $ty,)*
        }

        impl<B: $crate::backend::Backend> $name<B> {
            /// Returns the GL name of the object.
            pub fn id(&self) -> $crate::api::gl::types::GLuint {
                self.obj
            }

            /// Returns the context that owns the object.
            pub fn context(&self) -> &::std::rc::Rc<$crate::context::Context<B>> {
                &self.ctx
            }
        }

        impl<B: $crate::backend::Backend> ::std::fmt::Debug for $name<B> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("id", &self.obj)
                    .finish_non_exhaustive()
            }
        }
    };
}
