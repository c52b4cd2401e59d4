//! Two-component vector kernels.
//!
//! Two lanes do not fill a SIMD register, so this arity only has the
//! portable implementation.

use bytemuck::{Pod, Zeroable};
use xform_core::{Error, Result};

use crate::scalar::fast_inverse_sqrt;

/// A 2D vector.
///
/// ```rust
/// use xform_math::{vec2, Vec2};
///
/// let v = Vec2::new(3.0, 4.0);
/// assert_eq!(v.magnitude(), 5.0);
/// assert_eq!(vec2::dot(v, Vec2::X), 3.0);
/// assert_eq!(v[1], 4.0);
/// ```
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
#[repr(C, align(8))]
pub struct Vec2 {
    elements: [f32; 2],
}

assert_layout!(Vec2, 8, 8);

impl Vec2 {
    /// Zero vector (0, 0).
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// One vector (1, 1).
    pub const ONE: Self = Self::new(1.0, 1.0);
    /// Unit X vector (1, 0).
    pub const X: Self = Self::new(1.0, 0.0);
    /// Unit Y vector (0, 1).
    pub const Y: Self = Self::new(0.0, 1.0);

    /// Creates a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { elements: [x, y] }
    }

    /// Creates a vector with both components set to `v`.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v)
    }

    /// Creates from an array.
    #[inline]
    pub const fn from_array(a: [f32; 2]) -> Self {
        Self { elements: a }
    }

    /// Converts to an array.
    #[inline]
    pub const fn to_array(self) -> [f32; 2] {
        self.elements
    }

    /// Borrows the components as an array.
    #[inline]
    pub const fn as_array(&self) -> &[f32; 2] {
        &self.elements
    }

    /// Mutably borrows the components as an array.
    #[inline]
    pub fn as_array_mut(&mut self) -> &mut [f32; 2] {
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

    /// Negated vector.
    #[inline]
    pub fn inverse(self) -> Self {
        Self::new(-self.x(), -self.y())
    }

    /// Squared length.
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
    /// A zero vector is a contract violation (debug assertion).
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.magnitude();
        debug_assert!(len != 0.0, "cannot normalize a zero-length Vec2");
        Self::new(self.x() / len, self.y() / len)
    }

    /// Approximate unit vector via [`fast_inverse_sqrt`].
    #[inline]
    pub fn normalize_fast(self) -> Self {
        let sq = self.square_magnitude();
        debug_assert!(sq != 0.0, "cannot normalize a zero-length Vec2");
        multiply(self, fast_inverse_sqrt(sq))
    }

    /// Unit vector, or [`Error::ZeroLength`].
    pub fn try_normalize(self) -> Result<Self> {
        if self.square_magnitude() == 0.0 {
            tracing::trace!("rejected normalize of zero-length Vec2");
            return Err(Error::ZeroLength);
        }
        Ok(self.normalize())
    }
}

/// Component-wise sum.
#[inline]
pub fn add(lhs: Vec2, rhs: Vec2) -> Vec2 {
    Vec2::new(lhs.x() + rhs.x(), lhs.y() + rhs.y())
}

/// Component-wise difference.
#[inline]
pub fn subtract(lhs: Vec2, rhs: Vec2) -> Vec2 {
    Vec2::new(lhs.x() - rhs.x(), lhs.y() - rhs.y())
}

/// Scales by `s`.
#[inline]
pub fn multiply(v: Vec2, s: f32) -> Vec2 {
    Vec2::new(v.x() * s, v.y() * s)
}

/// Divides by `s`; `s == 0` is a contract violation.
#[inline]
pub fn divide(v: Vec2, s: f32) -> Vec2 {
    debug_assert!(s != 0.0, "division by zero");
    Vec2::new(v.x() / s, v.y() / s)
}

/// Divides by `s`, or returns [`Error::DivisionByZero`].
pub fn try_divide(v: Vec2, s: f32) -> Result<Vec2> {
    if s == 0.0 {
        tracing::trace!("rejected Vec2 division by zero");
        return Err(Error::DivisionByZero);
    }
    Ok(divide(v, s))
}

/// Component-wise product.
#[inline]
pub fn element_wise(lhs: Vec2, rhs: Vec2) -> Vec2 {
    Vec2::new(lhs.x() * rhs.x(), lhs.y() * rhs.y())
}

/// Dot product.
#[inline]
pub fn dot(lhs: Vec2, rhs: Vec2) -> f32 {
    lhs.x() * rhs.x() + lhs.y() * rhs.y()
}

/// Exact equality of both components.
#[inline]
pub fn compare(lhs: Vec2, rhs: Vec2) -> bool {
    lhs.elements == rhs.elements
}

impl_vector_ops!(
    Vec2, 2,
    add: add,
    subtract: subtract,
    multiply: multiply,
    divide: divide,
    inverse: Vec2::inverse,
    compare: compare,
);

impl From<glam::Vec2> for Vec2 {
    #[inline]
    fn from(v: glam::Vec2) -> Self {
        Self::from_array(v.to_array())
    }
}

impl From<Vec2> for glam::Vec2 {
    #[inline]
    fn from(v: Vec2) -> glam::Vec2 {
        glam::Vec2::from_array(v.to_array())
    }
}
