//! Taylor-polynomial sine and cosine.
//!
//! Both functions evaluate a 5th-order polynomial: sine around 0, cosine
//! around `pi/2`. The polynomial is only accurate near its center, so input
//! is first folded in two stages:
//!
//! 1. **Wrap** onto one full turn (`[-pi, pi)` for sine, `[0, 2pi)` for cosine).
//! 2. **Reflect** onto a half turn (`[-pi/2, pi/2]` for sine, `[0, pi]` for
//!    cosine), fixing the sign where the reflection requires it.
//!
//! Callers that already know their input range pick a domain marker that
//! skips one or both stages. The marker is a type parameter, so a skipped
//! stage costs nothing at runtime. A domain claim that does not hold is not
//! detected; the result just loses accuracy.
//!
//! | Marker | Sine | Cosine |
//! |---|---|---|
//! | [`Unbounded`] | wrap + reflect | wrap + reflect |
//! | [`SymmetricPi`] | reflect | - |
//! | [`SymmetricHalfPi`] | none | - |
//! | [`ZeroTau`] | - | reflect |
//! | [`ZeroPi`] | - | none |
//!
//! Accuracy is within 0.01 of `f32::sin`/`f32::cos` across the whole range.
//!
//! ```rust
//! use xform_math::trig::{taylor_sine_in, SymmetricHalfPi};
//! use xform_math::{taylor_cosine, taylor_sine, Degrees, Radians};
//!
//! assert!((taylor_sine(Degrees::new(30.0)) - 0.5).abs() < 0.01);
//! assert!((taylor_cosine(Radians::new(7.0)) - 7.0_f32.cos()).abs() < 0.01);
//! assert!((taylor_sine_in::<SymmetricHalfPi>(Radians::new(0.1)) - 0.1_f32.sin()).abs() < 1e-6);
//! ```

use xform_core::{Angle, HALF_PI, PI, TAU};

use crate::scalar::factorial;

const INV_FACT3: f32 = 1.0 / factorial(3);
const INV_FACT5: f32 = 1.0 / factorial(5);

mod sealed {
    pub trait Sealed {}
}

/// Input range the caller guarantees for [`taylor_sine_in`].
pub trait SineDomain: sealed::Sealed {
    /// Input may lie outside `[-pi, pi]`.
    const WRAP: bool;
    /// Input may lie outside `[-pi/2, pi/2]`.
    const REFLECT: bool;
}

/// Input range the caller guarantees for [`taylor_cosine_in`].
pub trait CosineDomain: sealed::Sealed {
    /// Input may lie outside `[0, 2pi]`.
    const WRAP: bool;
    /// Input may lie outside `[0, pi]`.
    const REFLECT: bool;
}

/// Any finite angle.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

/// Angle in `[-pi, pi]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymmetricPi;

/// Angle in `[-pi/2, pi/2]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymmetricHalfPi;

/// Angle in `[0, 2pi]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroTau;

/// Angle in `[0, pi]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroPi;

impl sealed::Sealed for Unbounded {}
impl sealed::Sealed for SymmetricPi {}
impl sealed::Sealed for SymmetricHalfPi {}
impl sealed::Sealed for ZeroTau {}
impl sealed::Sealed for ZeroPi {}

impl SineDomain for Unbounded {
    const WRAP: bool = true;
    const REFLECT: bool = true;
}

impl SineDomain for SymmetricPi {
    const WRAP: bool = false;
    const REFLECT: bool = true;
}

impl SineDomain for SymmetricHalfPi {
    const WRAP: bool = false;
    const REFLECT: bool = false;
}

impl CosineDomain for Unbounded {
    const WRAP: bool = true;
    const REFLECT: bool = true;
}

impl CosineDomain for ZeroTau {
    const WRAP: bool = false;
    const REFLECT: bool = true;
}

impl CosineDomain for ZeroPi {
    const WRAP: bool = false;
    const REFLECT: bool = false;
}

/// `x - x^3/3! + x^5/5!`
#[inline]
fn sine_poly(x: f32) -> f32 {
    let x2 = x * x;
    let x3 = x2 * x;
    x - x3 * INV_FACT3 + x3 * x2 * INV_FACT5
}

/// Cosine expanded around `pi/2`: `-(a - pi/2) + (a - pi/2)^3/3! - (a - pi/2)^5/5!`.
#[inline]
fn cosine_poly(a: f32) -> f32 {
    -sine_poly(a - HALF_PI)
}

/// Sine of an arbitrary angle.
#[inline]
pub fn taylor_sine(angle: impl Angle) -> f32 {
    taylor_sine_in::<Unbounded>(angle)
}

/// Cosine of an arbitrary angle.
#[inline]
pub fn taylor_cosine(angle: impl Angle) -> f32 {
    taylor_cosine_in::<Unbounded>(angle)
}

/// Sine of an angle the caller guarantees to lie in `D`.
#[inline]
pub fn taylor_sine_in<D: SineDomain>(angle: impl Angle) -> f32 {
    let mut a = angle.to_radians().get();
    if D::WRAP {
        a -= TAU * ((a + PI) / TAU).floor();
    }
    if D::REFLECT {
        if a > HALF_PI {
            return sine_poly(PI - a);
        }
        if a < -HALF_PI {
            return -sine_poly(PI + a);
        }
    }
    sine_poly(a)
}

/// Cosine of an angle the caller guarantees to lie in `D`.
#[inline]
pub fn taylor_cosine_in<D: CosineDomain>(angle: impl Angle) -> f32 {
    let mut a = angle.to_radians().get();
    if D::WRAP {
        a -= TAU * (a / TAU).floor();
    }
    if D::REFLECT && a > PI {
        return -cosine_poly(a - PI);
    }
    cosine_poly(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xform_core::{Degrees, Radians};

    #[test]
    fn test_exact_points() {
        assert_eq!(taylor_sine_in::<SymmetricHalfPi>(Radians::new(0.0)), 0.0);
        assert!(taylor_cosine_in::<ZeroPi>(Radians::new(HALF_PI)).abs() < 1e-6);
    }

    #[test]
    fn test_degrees_input() {
        assert!((taylor_sine(Degrees::new(90.0)) - 1.0).abs() < 0.01);
        assert!((taylor_cosine(Degrees::new(180.0)) + 1.0).abs() < 0.01);
        assert!((taylor_cosine(Degrees::new(-60.0)) - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_sine_is_odd() {
        for i in 0..32 {
            let a = i as f32 * 0.2;
            let pos = taylor_sine(Radians::new(a));
            let neg = taylor_sine(Radians::new(-a));
            assert!((pos + neg).abs() < 1e-5, "a = {a}");
        }
    }

    #[test]
    fn test_reflection_signs() {
        // Second and third quadrants go through the reflection branch
        assert!(taylor_sine_in::<SymmetricPi>(Radians::new(2.5)) > 0.0);
        assert!(taylor_sine_in::<SymmetricPi>(Radians::new(-2.5)) < 0.0);
        assert!(taylor_cosine_in::<ZeroTau>(Radians::new(4.0)) < 0.0);
        assert!(taylor_cosine_in::<ZeroTau>(Radians::new(5.5)) > 0.0);
    }

    #[test]
    fn test_wrap_far_angles() {
        for &a in &[10.0_f32, -10.0, 25.0, -40.0] {
            assert!((taylor_sine(Radians::new(a)) - a.sin()).abs() < 0.01, "sin {a}");
            assert!((taylor_cosine(Radians::new(a)) - a.cos()).abs() < 0.01, "cos {a}");
        }
    }
}
