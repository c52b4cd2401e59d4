//! Three-component vector kernels.
//!
//! [`Vec3`] is 12 bytes with no padding so it packs tightly into vertex
//! buffers and [`Mat3`](crate::Mat3) columns. Like [`Vec2`](crate::Vec2) it
//! only has the portable implementation; code that wants the SIMD backends
//! widens to [`Vec4`](crate::Vec4).
//!
//! # Usage
//!
//! ```rust
//! use xform_math::{vec3, Vec3};
//!
//! assert_eq!(vec3::cross(Vec3::X, Vec3::Y), Vec3::Z);
//! assert_eq!(vec3::dot(Vec3::new(1.0, 2.0, 2.0), Vec3::new(1.0, 2.0, 2.0)), 9.0);
//! ```

use bytemuck::{Pod, Zeroable};
use xform_core::{Error, Result};

use crate::scalar::fast_inverse_sqrt;

/// A 3D vector: positions, directions, RGB triplets.
///
/// # Components
///
/// Access via `x()`/`y()`/`z()`, the color aliases `r()`/`g()`/`b()`, or
/// index `[0]`, `[1]`, `[2]`. Aliases read the same storage.
///
/// ```rust
/// use xform_math::Vec3;
///
/// let mut c = Vec3::new(0.25, 0.5, 1.0);
/// c.set_g(0.75);
/// assert_eq!(c.y(), 0.75);
/// assert_eq!(c[2], c.b());
/// ```
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Vec3 {
    elements: [f32; 3],
}

assert_layout!(Vec3, 12, 4);

impl Vec3 {
    /// Zero vector (0, 0, 0).
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// One vector (1, 1, 1).
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    /// Unit X vector (1, 0, 0).
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// Unit Y vector (0, 1, 0).
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// Unit Z vector (0, 0, 1).
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { elements: [x, y, z] }
    }

    /// Creates a vector with all components set to `v`.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Creates from an array.
    #[inline]
    pub const fn from_array(a: [f32; 3]) -> Self {
        Self { elements: a }
    }

    /// Converts to an array.
    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        self.elements
    }

    /// Borrows the components as an array.
    #[inline]
    pub const fn as_array(&self) -> &[f32; 3] {
        &self.elements
    }

    /// Mutably borrows the components as an array.
    #[inline]
    pub fn as_array_mut(&mut self) -> &mut [f32; 3] {
        &mut self.elements
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

    /// Red channel (alias of X).
    #[inline]
    pub const fn r(self) -> f32 {
        self.elements[0]
    }

    /// Green channel (alias of Y).
    #[inline]
    pub const fn g(self) -> f32 {
        self.elements[1]
    }

    /// Blue channel (alias of Z).
    #[inline]
    pub const fn b(self) -> f32 {
        self.elements[2]
    }

    /// Sets the X component.
    #[inline]
    pub fn set_x(&mut self, x: f32) {
        self.elements[0] = x;
    }

    /// Sets the Y component.
    #[inline]
    pub fn set_y(&mut self, y: f32) {
        self.elements[1] = y;
    }

    /// Sets the Z component.
    #[inline]
    pub fn set_z(&mut self, z: f32) {
        self.elements[2] = z;
    }

    /// Sets the red channel.
    #[inline]
    pub fn set_r(&mut self, r: f32) {
        self.elements[0] = r;
    }

    /// Sets the green channel.
    #[inline]
    pub fn set_g(&mut self, g: f32) {
        self.elements[1] = g;
    }

    /// Sets the blue channel.
    #[inline]
    pub fn set_b(&mut self, b: f32) {
        self.elements[2] = b;
    }

    /// Negated vector.
    #[inline]
    pub fn inverse(self) -> Self {
        Self::new(-self.x(), -self.y(), -self.z())
    }

    /// Squared length (avoids sqrt).
    #[inline]
    pub fn square_magnitude(self) -> f32 {
        dot(self, self)
    }

    /// Length.
    #[inline]
    pub fn magnitude(self) -> f32 {
        self.square_magnitude().sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// A zero vector is a contract violation: debug builds panic, release
    /// builds return NaN components.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.magnitude();
        debug_assert!(len != 0.0, "cannot normalize a zero-length Vec3");
        Self::new(self.x() / len, self.y() / len, self.z() / len)
    }

    /// Approximate unit vector, about 0.2% off.
    #[inline]
    pub fn normalize_fast(self) -> Self {
        let sq = self.square_magnitude();
        debug_assert!(sq != 0.0, "cannot normalize a zero-length Vec3");
        multiply(self, fast_inverse_sqrt(sq))
    }

    /// Unit vector, or [`Error::ZeroLength`].
    pub fn try_normalize(self) -> Result<Self> {
        if self.square_magnitude() == 0.0 {
            tracing::trace!("rejected normalize of zero-length Vec3");
            return Err(Error::ZeroLength);
        }
        Ok(self.normalize())
    }
}

/// Component-wise sum.
#[inline]
pub fn add(lhs: Vec3, rhs: Vec3) -> Vec3 {
    Vec3::new(lhs.x() + rhs.x(), lhs.y() + rhs.y(), lhs.z() + rhs.z())
}

/// Component-wise difference.
#[inline]
pub fn subtract(lhs: Vec3, rhs: Vec3) -> Vec3 {
    Vec3::new(lhs.x() - rhs.x(), lhs.y() - rhs.y(), lhs.z() - rhs.z())
}

/// Scales by `s`.
#[inline]
pub fn multiply(v: Vec3, s: f32) -> Vec3 {
    Vec3::new(v.x() * s, v.y() * s, v.z() * s)
}

/// Divides by `s`; `s == 0` is a contract violation.
#[inline]
pub fn divide(v: Vec3, s: f32) -> Vec3 {
    debug_assert!(s != 0.0, "division by zero");
    Vec3::new(v.x() / s, v.y() / s, v.z() / s)
}

/// Divides by `s`, or returns [`Error::DivisionByZero`].
pub fn try_divide(v: Vec3, s: f32) -> Result<Vec3> {
    if s == 0.0 {
        tracing::trace!("rejected Vec3 division by zero");
        return Err(Error::DivisionByZero);
    }
    Ok(divide(v, s))
}

/// Component-wise product.
#[inline]
pub fn element_wise(lhs: Vec3, rhs: Vec3) -> Vec3 {
    Vec3::new(lhs.x() * rhs.x(), lhs.y() * rhs.y(), lhs.z() * rhs.z())
}

/// Dot product.
#[inline]
pub fn dot(lhs: Vec3, rhs: Vec3) -> f32 {
    lhs.x() * rhs.x() + lhs.y() * rhs.y() + lhs.z() * rhs.z()
}

/// Cross product (right-handed).
#[inline]
pub fn cross(lhs: Vec3, rhs: Vec3) -> Vec3 {
    Vec3::new(
        lhs.y() * rhs.z() - lhs.z() * rhs.y(),
        lhs.z() * rhs.x() - lhs.x() * rhs.z(),
        lhs.x() * rhs.y() - lhs.y() * rhs.x(),
    )
}

/// Exact equality of all components.
#[inline]
pub fn compare(lhs: Vec3, rhs: Vec3) -> bool {
    lhs.elements == rhs.elements
}

impl_vector_ops!(
    Vec3, 3,
    add: add,
    subtract: subtract,
    multiply: multiply,
    divide: divide,
    inverse: Vec3::inverse,
    compare: compare,
);

impl From<glam::Vec3> for Vec3 {
    #[inline]
    fn from(v: glam::Vec3) -> Self {
        Self::from_array(v.to_array())
    }
}

impl From<Vec3> for glam::Vec3 {
    #[inline]
    fn from(v: Vec3) -> glam::Vec3 {
        glam::Vec3::from_array(v.to_array())
    }
}
