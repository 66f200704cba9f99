/// Value of a uniform variable. Matrices are column-major.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum UniformValue {
    Int(i32),
    IVec2([i32; 2]),
    IVec3([i32; 3]),
    IVec4([i32; 4]),
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat3([[f32; 3]; 3]),
    Mat4([[f32; 4]; 4]),
}

macro_rules! impl_from_uniform {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(impl From<$t> for UniformValue {
            fn from(v: $t) -> Self {
                UniformValue::$variant(v)
            }
        })*
    };
}

impl_from_uniform! {
    i32 => Int,
    [i32; 2] => IVec2,
    [i32; 3] => IVec3,
    [i32; 4] => IVec4,
    f32 => Float,
    [f32; 2] => Vec2,
    [f32; 3] => Vec3,
    [f32; 4] => Vec4,
    [[f32; 3]; 3] => Mat3,
    [[f32; 4]; 4] => Mat4,
}

impl From<bool> for UniformValue {
    fn from(v: bool) -> Self {
        UniformValue::Int(v as i32)
    }
}

#[cfg(feature = "glam")]
mod glam_impls {
    use super::UniformValue;

    impl From<glam::Vec2> for UniformValue {
        fn from(v: glam::Vec2) -> Self {
            UniformValue::Vec2(v.to_array())
        }
    }

    impl From<glam::Vec3> for UniformValue {
        fn from(v: glam::Vec3) -> Self {
            UniformValue::Vec3(v.to_array())
        }
    }

    impl From<glam::Vec4> for UniformValue {
        fn from(v: glam::Vec4) -> Self {
            UniformValue::Vec4(v.to_array())
        }
    }

    impl From<glam::IVec2> for UniformValue {
        fn from(v: glam::IVec2) -> Self {
            UniformValue::IVec2(v.to_array())
        }
    }

    impl From<glam::IVec3> for UniformValue {
        fn from(v: glam::IVec3) -> Self {
            UniformValue::IVec3(v.to_array())
        }
    }

    impl From<glam::IVec4> for UniformValue {
        fn from(v: glam::IVec4) -> Self {
            UniformValue::IVec4(v.to_array())
        }
    }

    impl From<glam::Mat3> for UniformValue {
        fn from(m: glam::Mat3) -> Self {
            UniformValue::Mat3(m.to_cols_array_2d())
        }
    }

    impl From<glam::Mat4> for UniformValue {
        fn from(m: glam::Mat4) -> Self {
            UniformValue::Mat4(m.to_cols_array_2d())
        }
    }
}
