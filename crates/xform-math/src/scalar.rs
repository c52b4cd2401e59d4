//! Scalar utility kernels.
//!
//! Rounding, squaring, interpolation and the bit-level inverse square root
//! used by the fast normalize paths.
//!
//! # Example
//!
//! ```rust
//! use xform_math::scalar::{fast_inverse_sqrt, lerp, square};
//!
//! assert_eq!(square(3.0), 9.0);
//! assert_eq!(lerp(0.0, 10.0, 0.25), 2.5);
//! assert!((fast_inverse_sqrt(4.0) - 0.5).abs() < 1e-3);
//! ```

use std::ops::{Add, Mul};

use xform_core::PI;

/// Magic constant for the inverse square root initial guess.
const INV_SQRT_MAGIC: u32 = 0x5F37_59DF;

/// Rounds a non-negative float to the nearest integer, halves up.
///
/// Computed as `(f + 0.5) as u32`; negative input saturates to zero.
///
/// ```rust
/// use xform_math::round_positive_to_u32;
///
/// assert_eq!(round_positive_to_u32(254.5), 255);
/// assert_eq!(round_positive_to_u32(254.49), 254);
/// ```
#[inline]
pub fn round_positive_to_u32(f: f32) -> u32 {
    (f + 0.5) as u32
}

/// Returns `x * x`.
#[inline]
pub fn square(x: f32) -> f32 {
    x * x
}

/// Linear interpolation: `a * (1 - t) + b * t`.
///
/// Works for any type that can be added and scaled, so vectors interpolate
/// component-wise.
///
/// ```rust
/// use xform_math::{lerp, Vec3};
///
/// assert_eq!(lerp(Vec3::ZERO, Vec3::splat(2.0), 0.5), Vec3::ONE);
/// ```
#[inline]
pub fn lerp<T>(a: T, b: T, t: f32) -> T
where
    T: Add<Output = T> + Mul<f32, Output = T>,
{
    a * (1.0 - t) + b * t
}

/// Converts degrees to radians.
#[inline]
pub fn to_radians(degrees: f32) -> f32 {
    degrees * (PI / 180.0)
}

/// Converts radians to degrees.
#[inline]
pub fn to_degrees(radians: f32) -> f32 {
    radians * (180.0 / PI)
}

/// Approximate `1 / sqrt(x)`.
///
/// Reinterprets the float as an integer for the initial guess, then applies
/// one Newton-Raphson step. Relative error stays below 0.2% for positive,
/// non-zero, finite input; anything else is a contract violation.
///
/// ```rust
/// use xform_math::fast_inverse_sqrt;
///
/// let approx = fast_inverse_sqrt(2.0);
/// let exact = 1.0 / 2.0_f32.sqrt();
/// assert!((approx - exact).abs() / exact < 0.002);
/// ```
#[inline]
pub fn fast_inverse_sqrt(x: f32) -> f32 {
    debug_assert!(
        x > 0.0 && x.is_finite(),
        "fast_inverse_sqrt requires a positive finite input, got {x}"
    );
    let y = f32::from_bits(INV_SQRT_MAGIC.wrapping_sub(x.to_bits() >> 1));
    0.5 * y * (3.0 - x * y * y)
}

/// `n!` as a float, usable in constant expressions.
///
/// ```rust
/// use xform_math::scalar::factorial;
///
/// const F5: f32 = factorial(5);
/// assert_eq!(F5, 120.0);
/// ```
pub const fn factorial(n: u32) -> f32 {
    let mut acc = 1.0;
    let mut i = 2;
    while i <= n {
        acc *= i as f32;
        i += 1;
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round_positive() {
        assert_eq!(round_positive_to_u32(0.0), 0);
        assert_eq!(round_positive_to_u32(0.5), 1);
        assert_eq!(round_positive_to_u32(127.4), 127);
        assert_eq!(round_positive_to_u32(-3.0), 0);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
        assert_eq!(lerp(-2.0, 2.0, 0.75), 1.0);
    }

    #[test]
    fn test_angle_conversion() {
        assert_relative_eq!(to_radians(180.0), PI);
        assert_relative_eq!(to_degrees(PI / 2.0), 90.0);
    }

    #[test]
    fn test_fast_inverse_sqrt_error() {
        for &x in &[1e-6_f32, 0.01, 0.5, 1.0, 2.0, 3.0, 100.0, 12345.0, 1e9] {
            let exact = 1.0 / x.sqrt();
            let rel = (fast_inverse_sqrt(x) - exact).abs() / exact;
            assert!(rel < 0.002, "x = {x}: relative error {rel}");
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "positive finite")]
    fn test_fast_inverse_sqrt_zero() {
        fast_inverse_sqrt(0.0);
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0), 1.0);
        assert_eq!(factorial(1), 1.0);
        assert_eq!(factorial(3), 6.0);
        assert_eq!(factorial(5), 120.0);
        assert_eq!(factorial(10), 3_628_800.0);
    }
}
