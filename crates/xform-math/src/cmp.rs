//! `approx` comparisons for every vector, matrix and quaternion type.
//!
//! `==` is exact float equality; these traits give the tolerance-based
//! comparisons tests and callers actually want:
//!
//! ```rust
//! use approx::assert_relative_eq;
//! use xform_math::{Mat4, Vec3, Radians, HALF_PI};
//!
//! let r = Mat4::rotation(Radians::new(HALF_PI), Vec3::Z);
//! assert_relative_eq!(r * Vec3::X, Vec3::Y, epsilon = 1e-6);
//! ```

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

macro_rules! impl_approx {
    ($($ty:ty),* $(,)?) => {$(
        impl AbsDiffEq for $ty {
            type Epsilon = f32;

            fn default_epsilon() -> f32 {
                <f32 as AbsDiffEq>::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
                self.as_array()
                    .iter()
                    .zip(other.as_array())
                    .all(|(a, b)| a.abs_diff_eq(b, epsilon))
            }
        }

        impl RelativeEq for $ty {
            fn default_max_relative() -> f32 {
                <f32 as RelativeEq>::default_max_relative()
            }

            fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
                self.as_array()
                    .iter()
                    .zip(other.as_array())
                    .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
            }
        }

        impl UlpsEq for $ty {
            fn default_max_ulps() -> u32 {
                <f32 as UlpsEq>::default_max_ulps()
            }

            fn ulps_eq(&self, other: &Self, epsilon: f32, max_ulps: u32) -> bool {
                self.as_array()
                    .iter()
                    .zip(other.as_array())
                    .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
            }
        }
    )*};
}

impl_approx!(Vec2, Vec3, Vec4, Mat3, Mat4, Quat);
