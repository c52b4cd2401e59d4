//! # xform-math
//!
//! Small-object linear algebra for transform pipelines.
//!
//! - [`Vec2`], [`Vec3`], [`Vec4`] - packed `f32` vectors
//! - [`Mat3`], [`Mat4`] - column-major matrices
//! - [`Quat`] - rotation quaternions
//! - [`trig`] - Taylor sine/cosine with compile-time input domains
//! - [`scalar`] - rounding, lerp, fast inverse square root
//! - [`color`] - 8-bit channel packing and sRGB curves
//! - [`batch`] - slice transforms, optionally split across threads
//!
//! # Backends
//!
//! Every 4-wide kernel is generic over a [`Backend`] marker from `xform-core`.
//! Operators and plain methods use [`DefaultBackend`]; the free functions in
//! [`vec4`], [`mat4`] and [`quat`] take the marker explicitly, which is how
//! benches and tests pin a backend:
//!
//! ```rust
//! use xform_math::{vec4, Avx, Scalar, Sse2, Vec4};
//!
//! let a = Vec4::new(1.0, 2.0, 3.0, 4.0);
//! let b = Vec4::splat(0.5);
//!
//! assert_eq!(vec4::add::<Scalar>(a, b), vec4::add::<Avx>(a, b));
//! assert_eq!(vec4::dot::<Sse2>(a, b), 5.0);
//! assert_eq!(a + b, vec4::add::<Scalar>(a, b));
//! ```
//!
//! # Conventions
//!
//! Matrices are column-major (`elements[row + col * N]`) and multiply column
//! vectors on the right:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! ```rust
//! use xform_math::{Mat4, Vec4};
//!
//! let m = Mat4::translation(1.0, 2.0, 3.0);
//! assert_eq!(m * Vec4::new(0.0, 0.0, 0.0, 1.0), Vec4::new(1.0, 2.0, 3.0, 1.0));
//! ```
//!
//! # Dependencies
//!
//! - [`wide`] - portable 4- and 8-lane registers for the SIMD backends
//! - [`bytemuck`] - zero-copy array views of vectors and matrices
//! - [`approx`] - tolerance comparisons for every type
//! - [`glam`] - interop conversions
//! - `rayon` - parallel batch transforms (`parallel` feature)
//!
//! # Feature Flags
//!
//! - `parallel` (default) - split large batches across rayon
//! - `sse2`, `sse4`, `avx`, `force-scalar` - forwarded to `xform-core`

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

#[macro_use]
mod macros;

mod cmp;
mod simd;

pub mod batch;
pub mod color;
pub mod mat3;
pub mod mat4;
pub mod quat;
pub mod scalar;
pub mod trig;
pub mod vec2;
pub mod vec3;
pub mod vec4;

pub use mat3::Mat3;
pub use mat4::Mat4;
pub use quat::Quat;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;

pub use scalar::{fast_inverse_sqrt, lerp, round_positive_to_u32, square};
pub use trig::{taylor_cosine, taylor_cosine_in, taylor_sine, taylor_sine_in};

pub use xform_core::{
    Angle, Avx, Backend, DefaultBackend, Degrees, Error, HALF_PI, PI, Radians, Result, Scalar,
    SimdLevel, Sse2, Sse4, TAU,
};

/// Prelude module for convenient imports.
///
/// ```
/// use xform_math::prelude::*;
///
/// let q = Quat::from_axis(Degrees::new(90.0), Vec3::Z);
/// let v = q * Vec3::X;
/// assert!((v.y() - 1.0).abs() < 1e-6);
/// ```
pub mod prelude {
    pub use crate::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};
    pub use xform_core::prelude::*;
}

/// Re-export glam types for interop.
pub mod glam {
    pub use ::glam::{
        Mat3 as GlamMat3, Mat4 as GlamMat4, Quat as GlamQuat, Vec2 as GlamVec2, Vec3 as GlamVec3,
        Vec4 as GlamVec4,
    };
}
