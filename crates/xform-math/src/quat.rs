//! Rotation quaternions.
//!
//! [`Quat`] stores `(x, y, z, w)` with `w` as the scalar part. Rotation use
//! needs unit length; nothing in the storage enforces it, and
//! [`from_axis`](Quat::from_axis), [`multiply`] and [`transform`] assume the
//! caller supplies unit inputs.
//!
//! ```rust
//! use approx::assert_abs_diff_eq;
//! use xform_math::{quat, Quat, Radians, Vec3, HALF_PI};
//!
//! let q = Quat::from_axis(Radians::new(HALF_PI), Vec3::Z);
//! assert_abs_diff_eq!(quat::transform(Vec3::X, q), Vec3::Y, epsilon = 1e-6);
//!
//! let (angle, axis) = q.to_axis();
//! assert_abs_diff_eq!(angle.get(), HALF_PI, epsilon = 1e-5);
//! assert_abs_diff_eq!(axis, Vec3::Z, epsilon = 1e-5);
//! ```

use std::fmt;
use std::ops::{Mul, MulAssign};

use bytemuck::{Pod, Zeroable};
use wide::f32x4;
use xform_core::{Angle, Backend, DefaultBackend, Error, Radians, Result, SimdLevel};

use crate::simd;
use crate::vec3::{self, Vec3};

/// Below this `sin(angle / 2)` the rotation axis is numerically undefined.
const DEGENERATE_SIN: f32 = 1e-6;

/// A quaternion `(x, y, z, w)`, 16-byte aligned.
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
#[repr(C, align(16))]
pub struct Quat {
    elements: [f32; 4],
}

assert_layout!(Quat, 16, 16);

impl Quat {
    /// The identity rotation `(0, 0, 0, 1)`.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a quaternion from its components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self {
            elements: [x, y, z, w],
        }
    }

    /// The identity rotation.
    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Creates from a vector part and a scalar part.
    #[inline]
    pub const fn from_vector(v: Vec3, w: f32) -> Self {
        Self::new(v.x(), v.y(), v.z(), w)
    }

    /// Creates from `[x, y, z, w]`.
    #[inline]
    pub const fn from_array(a: [f32; 4]) -> Self {
        Self { elements: a }
    }

    /// Converts to `[x, y, z, w]`.
    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        self.elements
    }

    /// Borrows the components as `[x, y, z, w]`.
    #[inline]
    pub const fn as_array(&self) -> &[f32; 4] {
        &self.elements
    }

    /// Mutably borrows the components.
    #[inline]
    pub fn as_array_mut(&mut self) -> &mut [f32; 4] {
        &mut self.elements
    }

    /// Rotation of `angle` counter-clockwise about a unit `axis`.
    ///
    /// The axis is used as given; a non-unit axis yields a non-unit
    /// quaternion.
    pub fn from_axis(angle: impl Angle, axis: Vec3) -> Self {
        let (s, c) = (angle.to_radians().get() * 0.5).sin_cos();
        Self::from_vector(axis * s, c)
    }

    /// Angle and unit axis of the rotation.
    ///
    /// Undefined for the zero rotation (`w = +/-1`), where every axis is
    /// valid: debug builds assert, release builds return a NaN axis. Use
    /// [`try_to_axis`](Self::try_to_axis) when the input may be degenerate.
    pub fn to_axis(self) -> (Radians, Vec3) {
        let w = self.w();
        let s = (1.0 - w * w).sqrt();
        debug_assert!(s != 0.0, "rotation axis is undefined for w = {w}");
        (Radians::new(w.acos() * 2.0), self.vector() / s)
    }

    /// Angle and unit axis, or [`Error::DegenerateRotation`] when the angle
    /// is too close to zero for the axis to be meaningful.
    ///
    /// `w` is clamped to `[-1, 1]` first so rounding just past 1 does not
    /// produce NaN.
    pub fn try_to_axis(self) -> Result<(Radians, Vec3)> {
        let w = self.w().clamp(-1.0, 1.0);
        let s = (1.0 - w * w).sqrt();
        if s < DEGENERATE_SIN {
            tracing::trace!(w = self.w(), "rejected axis extraction of degenerate rotation");
            return Err(Error::DegenerateRotation { w: self.w() });
        }
        Ok((Radians::new(w.acos() * 2.0), self.vector() / s))
    }

    /// X component.
    #[inline]
    pub const fn x(self) -> f32 {
        self.elements[0]
    }

    /// Y component.
    #[inline]
    pub const fn y(self) -> f32 {
        self.elements[1]
    }

    /// Z component.
    #[inline]
    pub const fn z(self) -> f32 {
        self.elements[2]
    }

    /// Scalar part.
    #[inline]
    pub const fn w(self) -> f32 {
        self.elements[3]
    }

    /// Vector part `(x, y, z)`.
    #[inline]
    pub const fn vector(self) -> Vec3 {
        Vec3::new(self.x(), self.y(), self.z())
    }

    /// Conjugate `(-x, -y, -z, w)`; the inverse rotation for unit input.
    #[inline]
    pub fn conjugate(self) -> Self {
        self.conjugate_with::<DefaultBackend>()
    }

    /// [`conjugate`](Self::conjugate) on an explicit backend.
    ///
    /// SIMD backends flip the three vector sign bits with one XOR.
    #[inline]
    pub fn conjugate_with<B: Backend>(self) -> Self {
        match B::LEVEL {
            SimdLevel::Scalar => Self::new(-self.x(), -self.y(), -self.z(), self.w()),
            _ => {
                let v = f32x4::from(self.elements) ^ f32x4::from(simd::XYZ_SIGN_MASK);
                Self::from_array(v.to_array())
            }
        }
    }

    /// Squared norm.
    #[inline]
    pub fn square_magnitude(self) -> f32 {
        dot(self, self)
    }

    /// Norm.
    #[inline]
    pub fn magnitude(self) -> f32 {
        self.square_magnitude().sqrt()
    }

    /// Unit quaternion; a zero quaternion is a contract violation.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.magnitude();
        debug_assert!(len != 0.0, "cannot normalize a zero quaternion");
        Self::from_array(self.elements.map(|e| e / len))
    }

    /// Unit quaternion, or [`Error::ZeroLength`].
    pub fn try_normalize(self) -> Result<Self> {
        if self.square_magnitude() == 0.0 {
            tracing::trace!("rejected normalize of zero quaternion");
            return Err(Error::ZeroLength);
        }
        Ok(self.normalize())
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Four-component dot product.
#[inline]
pub fn dot(lhs: Quat, rhs: Quat) -> f32 {
    let (a, b) = (lhs.elements, rhs.elements);
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

/// Hamilton product `lhs * rhs`: apply `rhs`, then `lhs`.
pub fn multiply(lhs: Quat, rhs: Quat) -> Quat {
    let (lv, rv) = (lhs.vector(), rhs.vector());
    let w = lhs.w() * rhs.w() - vec3::dot(lv, rv);
    let v = vec3::cross(lv, rv) + rv * lhs.w() + lv * rhs.w();
    Quat::from_vector(v, w)
}

/// Rotates `v` by the unit quaternion `q`: vector part of `q * (v, 0) * q*`.
pub fn transform(v: Vec3, q: Quat) -> Vec3 {
    multiply(multiply(q, Quat::from_vector(v, 0.0)), q.conjugate()).vector()
}

/// Exact equality of all four components.
#[inline]
pub fn compare(lhs: Quat, rhs: Quat) -> bool {
    lhs.elements == rhs.elements
}

impl Mul for Quat {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        multiply(self, rhs)
    }
}

impl MulAssign for Quat {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = multiply(*self, rhs);
    }
}

impl Mul<Vec3> for Quat {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        transform(rhs, self)
    }
}

impl PartialEq for Quat {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        compare(*self, *other)
    }
}

impl fmt::Display for Quat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        fmt::Display::fmt(&self.vector(), f)?;
        f.write_str(", ")?;
        fmt::Display::fmt(&self.w(), f)?;
        f.write_str(")")
    }
}

impl From<glam::Quat> for Quat {
    #[inline]
    fn from(q: glam::Quat) -> Self {
        Self::from_array(q.to_array())
    }
}

impl From<Quat> for glam::Quat {
    #[inline]
    fn from(q: Quat) -> glam::Quat {
        glam::Quat::from_array(q.to_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use xform_core::{Avx, Degrees, HALF_PI, PI, Scalar, Sse2};

    #[test]
    fn test_identity_law() {
        let q = Quat::from_axis(Radians::new(0.7), Vec3::new(0.6, 0.0, 0.8));
        assert_eq!(multiply(q, Quat::identity()), q);
        assert_eq!(multiply(Quat::identity(), q), q);
    }

    #[test]
    fn test_conjugate_backends() {
        let q = Quat::new(1.0, -2.0, 3.0, 4.0);
        let expected = Quat::new(-1.0, 2.0, -3.0, 4.0);
        assert_eq!(q.conjugate_with::<Scalar>(), expected);
        assert_eq!(q.conjugate_with::<Sse2>(), expected);
        assert_eq!(q.conjugate_with::<Avx>(), expected);
        // w keeps its sign bit
        assert_eq!(Quat::new(0.0, 0.0, 0.0, -0.0).conjugate_with::<Avx>().w().to_bits(), (-0.0_f32).to_bits());
    }

    #[test]
    fn test_transform() {
        let q = Quat::from_axis(Degrees::new(90.0), Vec3::Z);
        assert_abs_diff_eq!(transform(Vec3::X, q), Vec3::Y, epsilon = 1e-6);
        assert_abs_diff_eq!(q * Vec3::Y, -Vec3::X, epsilon = 1e-6);
        assert_abs_diff_eq!(q * Vec3::Z, Vec3::Z, epsilon = 1e-6);
    }

    #[test]
    fn test_composition_order() {
        let yaw = Quat::from_axis(Radians::new(HALF_PI), Vec3::Y);
        let roll = Quat::from_axis(Radians::new(HALF_PI), Vec3::Z);
        // roll first, then yaw: X -> Y -> Y
        assert_abs_diff_eq!((yaw * roll) * Vec3::X, Vec3::Y, epsilon = 1e-6);
        // yaw first, then roll: X -> -Z -> -Z
        assert_abs_diff_eq!((roll * yaw) * Vec3::X, -Vec3::Z, epsilon = 1e-6);

        let mut q = roll;
        q *= yaw;
        assert_eq!(q, roll * yaw);
    }

    #[test]
    fn test_axis_roundtrip() {
        let axis = Vec3::new(-0.3, 0.5, 0.8).normalize();
        for i in 1..16 {
            let angle = i as f32 * PI / 16.0;
            let (a, v) = Quat::from_axis(Radians::new(angle), axis).to_axis();
            assert_abs_diff_eq!(a.get(), angle, epsilon = 1e-4);
            assert_abs_diff_eq!(v, axis, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_try_to_axis_degenerate() {
        assert_eq!(Quat::IDENTITY.try_to_axis(), Err(Error::DegenerateRotation { w: 1.0 }));
        assert!(matches!(
            Quat::new(0.0, 0.0, 0.0, -1.0).try_to_axis(),
            Err(Error::DegenerateRotation { .. })
        ));
        // Rounding just past 1 is clamped rather than producing NaN
        assert!(Quat::new(0.0, 0.0, 0.0, 1.000_000_1).try_to_axis().is_err());

        let (angle, axis) = Quat::from_axis(Radians::new(1.0), Vec3::X).try_to_axis().unwrap();
        assert_abs_diff_eq!(angle.get(), 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(axis, Vec3::X, epsilon = 1e-5);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "rotation axis is undefined")]
    fn test_to_axis_identity_asserts() {
        let _ = Quat::IDENTITY.to_axis();
    }

    #[test]
    fn test_normalize() {
        let q = Quat::new(0.0, 3.0, 0.0, 4.0).normalize();
        assert_eq!(q, Quat::new(0.0, 0.6, 0.0, 0.8));
        assert_eq!(Quat::new(0.0, 0.0, 0.0, 0.0).try_normalize(), Err(Error::ZeroLength));
    }

    #[test]
    fn test_glam_agrees() {
        let q = Quat::from_axis(Radians::new(0.4), Vec3::new(0.0, 0.6, 0.8));
        let g = glam::Quat::from_axis_angle(glam::Vec3::new(0.0, 0.6, 0.8), 0.4);
        assert_abs_diff_eq!(q, Quat::from(g), epsilon = 1e-6);
        let v = Vec3::new(1.0, -2.0, 0.5);
        assert_abs_diff_eq!(q * v, Vec3::from(g * glam::Vec3::from(v)), epsilon = 1e-5);
    }

    #[test]
    fn test_display() {
        assert_eq!(Quat::IDENTITY.to_string(), "([0, 0, 0], 1)");
    }
}
