//! Four-component vector kernels.
//!
//! [`Vec4`] is the only vector arity with the full backend ladder. Every
//! kernel here takes a [`Backend`] marker:
//!
//! | Backend | Lane arithmetic | Horizontal sum (dot) |
//! |---|---|---|
//! | [`Scalar`](xform_core::Scalar) | per component | `x + y + z + w` |
//! | [`Sse2`](xform_core::Sse2) | `f32x4` | `(x + z) + (y + w)` |
//! | [`Sse4`](xform_core::Sse4) | `f32x4` | full-register reduction |
//! | [`Avx`](xform_core::Avx) | `f32x4` | full-register reduction |
//!
//! Lane-wise operations are bit-identical across backends. Sums differ only
//! in association order, so `dot`, `magnitude` and `normalize` agree to
//! rounding.
//!
//! # Example
//!
//! ```rust
//! use xform_math::{vec4, Scalar, Sse4, Vec4};
//!
//! let v = Vec4::splat(2.0);
//! assert_eq!(v.normalize(), Vec4::splat(0.5));
//! assert_eq!(vec4::magnitude::<Scalar>(v), vec4::magnitude::<Sse4>(v));
//! ```

use bytemuck::{Pod, Zeroable};
use wide::f32x4;
use xform_core::{Backend, DefaultBackend, Error, Result, SimdLevel};

use crate::scalar::fast_inverse_sqrt;
use crate::simd;
use crate::vec3::Vec3;

/// A 4D vector, 16-byte aligned for 4-lane loads.
///
/// Components are `x()`/`y()`/`z()`/`w()` or the color aliases
/// `r()`/`g()`/`b()`/`a()`; both name the same storage.
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
#[repr(C, align(16))]
pub struct Vec4 {
    elements: [f32; 4],
}

assert_layout!(Vec4, 16, 16);

impl Vec4 {
    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// All ones.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Unit X vector.
    pub const X: Self = Self::new(1.0, 0.0, 0.0, 0.0);
    /// Unit Y vector.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0, 0.0);
    /// Unit Z vector.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0, 0.0);
    /// Unit W vector.
    pub const W: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self {
            elements: [x, y, z, w],
        }
    }

    /// Creates a vector with all components set to `v`.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Extends a [`Vec3`] with `w`.
    #[inline]
    pub const fn from_vec3(v: Vec3, w: f32) -> Self {
        Self::new(v.x(), v.y(), v.z(), w)
    }

    /// Creates from an array.
    #[inline]
    pub const fn from_array(a: [f32; 4]) -> Self {
        Self { elements: a }
    }

    /// Converts to an array.
    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        self.elements
    }

    /// Borrows the components as an array.
    #[inline]
    pub const fn as_array(&self) -> &[f32; 4] {
        &self.elements
    }

    /// Mutably borrows the components as an array.
    #[inline]
    pub fn as_array_mut(&mut self) -> &mut [f32; 4] {
        &mut self.elements
    }

    /// Drops `w`.
    #[inline]
    pub const fn xyz(self) -> Vec3 {
        Vec3::new(self.x(), self.y(), self.z())
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

    /// W component.
    #[inline]
    pub const fn w(self) -> f32 {
        self.elements[3]
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

    /// Alpha channel (alias of W).
    #[inline]
    pub const fn a(self) -> f32 {
        self.elements[3]
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

    /// Sets the W component.
    #[inline]
    pub fn set_w(&mut self, w: f32) {
        self.elements[3] = w;
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

    /// Sets the alpha channel.
    #[inline]
    pub fn set_a(&mut self, a: f32) {
        self.elements[3] = a;
    }

    #[inline]
    pub(crate) fn lanes(self) -> f32x4 {
        f32x4::from(self.elements)
    }

    #[inline]
    pub(crate) fn from_lanes(v: f32x4) -> Self {
        Self::from_array(v.to_array())
    }

    /// Negated vector.
    #[inline]
    pub fn inverse(self) -> Self {
        inverse::<DefaultBackend>(self)
    }

    /// Squared length.
    #[inline]
    pub fn square_magnitude(self) -> f32 {
        square_magnitude::<DefaultBackend>(self)
    }

    /// Length.
    #[inline]
    pub fn magnitude(self) -> f32 {
        magnitude::<DefaultBackend>(self)
    }

    /// Unit vector in the same direction; zero input is a contract violation.
    #[inline]
    pub fn normalize(self) -> Self {
        normalize::<DefaultBackend>(self)
    }

    /// Approximate unit vector, within about 1%.
    #[inline]
    pub fn normalize_fast(self) -> Self {
        normalize_fast::<DefaultBackend>(self)
    }

    /// Unit vector, or [`Error::ZeroLength`].
    #[inline]
    pub fn try_normalize(self) -> Result<Self> {
        try_normalize::<DefaultBackend>(self)
    }

    /// [`inverse`](Self::inverse) on an explicit backend.
    #[inline]
    pub fn inverse_with<B: Backend>(self) -> Self {
        inverse::<B>(self)
    }

    /// [`square_magnitude`](Self::square_magnitude) on an explicit backend.
    #[inline]
    pub fn square_magnitude_with<B: Backend>(self) -> f32 {
        square_magnitude::<B>(self)
    }

    /// [`magnitude`](Self::magnitude) on an explicit backend.
    #[inline]
    pub fn magnitude_with<B: Backend>(self) -> f32 {
        magnitude::<B>(self)
    }

    /// [`normalize`](Self::normalize) on an explicit backend.
    #[inline]
    pub fn normalize_with<B: Backend>(self) -> Self {
        normalize::<B>(self)
    }

    /// [`normalize_fast`](Self::normalize_fast) on an explicit backend.
    #[inline]
    pub fn normalize_fast_with<B: Backend>(self) -> Self {
        normalize_fast::<B>(self)
    }
}

#[inline]
fn map(v: Vec4, f: impl Fn(f32) -> f32) -> Vec4 {
    Vec4::from_array(v.elements.map(f))
}

#[inline]
fn zip(lhs: Vec4, rhs: Vec4, f: impl Fn(f32, f32) -> f32) -> Vec4 {
    let (a, b) = (lhs.elements, rhs.elements);
    Vec4::new(f(a[0], b[0]), f(a[1], b[1]), f(a[2], b[2]), f(a[3], b[3]))
}

/// Component-wise sum.
#[inline]
pub fn add<B: Backend>(lhs: Vec4, rhs: Vec4) -> Vec4 {
    match B::LEVEL {
        SimdLevel::Scalar => zip(lhs, rhs, |a, b| a + b),
        _ => Vec4::from_lanes(lhs.lanes() + rhs.lanes()),
    }
}

/// Component-wise difference.
#[inline]
pub fn subtract<B: Backend>(lhs: Vec4, rhs: Vec4) -> Vec4 {
    match B::LEVEL {
        SimdLevel::Scalar => zip(lhs, rhs, |a, b| a - b),
        _ => Vec4::from_lanes(lhs.lanes() - rhs.lanes()),
    }
}

/// Scales by `s`.
#[inline]
pub fn multiply<B: Backend>(v: Vec4, s: f32) -> Vec4 {
    match B::LEVEL {
        SimdLevel::Scalar => map(v, |a| a * s),
        _ => Vec4::from_lanes(v.lanes() * f32x4::splat(s)),
    }
}

/// Divides by `s`; `s == 0` is a contract violation.
#[inline]
pub fn divide<B: Backend>(v: Vec4, s: f32) -> Vec4 {
    debug_assert!(s != 0.0, "division by zero");
    match B::LEVEL {
        SimdLevel::Scalar => map(v, |a| a / s),
        _ => Vec4::from_lanes(v.lanes() / f32x4::splat(s)),
    }
}

/// Divides by `s`, or returns [`Error::DivisionByZero`].
pub fn try_divide<B: Backend>(v: Vec4, s: f32) -> Result<Vec4> {
    if s == 0.0 {
        tracing::trace!(backend = %B::LEVEL, "rejected Vec4 division by zero");
        return Err(Error::DivisionByZero);
    }
    Ok(divide::<B>(v, s))
}

/// Component-wise product.
#[inline]
pub fn element_wise<B: Backend>(lhs: Vec4, rhs: Vec4) -> Vec4 {
    match B::LEVEL {
        SimdLevel::Scalar => zip(lhs, rhs, |a, b| a * b),
        _ => Vec4::from_lanes(lhs.lanes() * rhs.lanes()),
    }
}

/// Dot product.
#[inline]
pub fn dot<B: Backend>(lhs: Vec4, rhs: Vec4) -> f32 {
    match B::LEVEL {
        SimdLevel::Scalar => {
            let (a, b) = (lhs.elements, rhs.elements);
            a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
        }
        level => simd::hsum(level, lhs.lanes() * rhs.lanes()),
    }
}

/// Exact equality over all four lanes.
#[inline]
pub fn compare<B: Backend>(lhs: Vec4, rhs: Vec4) -> bool {
    match B::LEVEL {
        SimdLevel::Scalar => lhs.elements == rhs.elements,
        _ => simd::all_eq_x4(lhs.lanes(), rhs.lanes()),
    }
}

/// Negated vector; the SIMD path flips sign bits.
#[inline]
pub fn inverse<B: Backend>(v: Vec4) -> Vec4 {
    match B::LEVEL {
        SimdLevel::Scalar => map(v, |a| -a),
        _ => Vec4::from_lanes(v.lanes() ^ f32x4::splat(-0.0)),
    }
}

/// Squared length.
#[inline]
pub fn square_magnitude<B: Backend>(v: Vec4) -> f32 {
    dot::<B>(v, v)
}

/// Length.
#[inline]
pub fn magnitude<B: Backend>(v: Vec4) -> f32 {
    square_magnitude::<B>(v).sqrt()
}

/// Unit vector in the same direction.
///
/// A zero vector is a contract violation: debug builds panic, release
/// builds return NaN components.
#[inline]
pub fn normalize<B: Backend>(v: Vec4) -> Vec4 {
    let len = magnitude::<B>(v);
    debug_assert!(len != 0.0, "cannot normalize a zero-length Vec4");
    match B::LEVEL {
        SimdLevel::Scalar => map(v, |a| a / len),
        _ => Vec4::from_lanes(v.lanes() / f32x4::splat(len)),
    }
}

/// Approximate unit vector.
///
/// The scalar path uses [`fast_inverse_sqrt`]; the SIMD paths use the lane
/// reciprocal square root estimate.
#[inline]
pub fn normalize_fast<B: Backend>(v: Vec4) -> Vec4 {
    let sq = square_magnitude::<B>(v);
    debug_assert!(sq != 0.0, "cannot normalize a zero-length Vec4");
    match B::LEVEL {
        SimdLevel::Scalar => {
            let inv = fast_inverse_sqrt(sq);
            map(v, |a| a * inv)
        }
        _ => Vec4::from_lanes(v.lanes() * f32x4::splat(sq).recip_sqrt()),
    }
}

/// Unit vector, or [`Error::ZeroLength`].
pub fn try_normalize<B: Backend>(v: Vec4) -> Result<Vec4> {
    if square_magnitude::<B>(v) == 0.0 {
        tracing::trace!(backend = %B::LEVEL, "rejected normalize of zero-length Vec4");
        return Err(Error::ZeroLength);
    }
    Ok(normalize::<B>(v))
}

impl_vector_ops!(
    Vec4, 4,
    add: add::<DefaultBackend>,
    subtract: subtract::<DefaultBackend>,
    multiply: multiply::<DefaultBackend>,
    divide: divide::<DefaultBackend>,
    inverse: inverse::<DefaultBackend>,
    compare: compare::<DefaultBackend>,
);

impl From<glam::Vec4> for Vec4 {
    #[inline]
    fn from(v: glam::Vec4) -> Self {
        Self::from_array(v.to_array())
    }
}

impl From<Vec4> for glam::Vec4 {
    #[inline]
    fn from(v: Vec4) -> glam::Vec4 {
        glam::Vec4::from_array(v.to_array())
    }
}
