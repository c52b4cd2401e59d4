//! 3x3 matrix kernels.
//!
//! [`Mat3`] stores three [`Vec3`] columns, so element `(row, col)` lives at
//! `elements[row + col * 3]`. It doubles as a 2D homogeneous transform
//! (translation in the third column) and as a general 3x3 linear map.
//!
//! # Usage
//!
//! ```rust
//! use xform_math::{mat3, Mat3, Vec2};
//!
//! let m = Mat3::translation(2.0, 1.0) * Mat3::scale(3.0, 3.0);
//! let p = mat3::transform_point(&m, Vec2::new(1.0, 1.0));
//! assert_eq!(p, Vec2::new(5.0, 4.0));
//! ```

use std::fmt;
use std::ops::{Index, Mul, MulAssign};

use bytemuck::{Pod, Zeroable};
use xform_core::Angle;

use crate::trig::{taylor_cosine, taylor_sine};
use crate::vec2::Vec2;
use crate::vec3::{self, Vec3};

/// A 3x3 column-major matrix.
///
/// # Layout
///
/// ```text
/// | e0 e3 e6 |
/// | e1 e4 e7 |
/// | e2 e5 e8 |
/// ```
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub struct Mat3 {
    columns: [Vec3; 3],
}

assert_layout!(Mat3, 36, 4);

impl Mat3 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self::from_cols(Vec3::X, Vec3::Y, Vec3::Z);

    /// All zeros.
    pub const ZERO: Self = Self::from_cols(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO);

    /// Identity matrix.
    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Creates from three columns.
    #[inline]
    pub const fn from_cols(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self { columns: [c0, c1, c2] }
    }

    /// Creates from nine column-major elements.
    #[inline]
    pub fn from_cols_array(a: &[f32; 9]) -> Self {
        bytemuck::cast(*a)
    }

    /// Copies out the nine column-major elements.
    #[inline]
    pub fn to_cols_array(&self) -> [f32; 9] {
        *self.as_array()
    }

    /// Views the matrix as nine column-major elements.
    #[inline]
    pub fn as_array(&self) -> &[f32; 9] {
        bytemuck::cast_ref(self)
    }

    /// Mutable view of the nine column-major elements.
    #[inline]
    pub fn as_array_mut(&mut self) -> &mut [f32; 9] {
        bytemuck::cast_mut(self)
    }

    /// Diagonal matrix.
    #[inline]
    pub const fn from_diagonal(d: Vec3) -> Self {
        Self::from_cols(
            Vec3::new(d.x(), 0.0, 0.0),
            Vec3::new(0.0, d.y(), 0.0),
            Vec3::new(0.0, 0.0, d.z()),
        )
    }

    /// 2D translation.
    #[inline]
    pub const fn translation(x: f32, y: f32) -> Self {
        Self::from_cols(Vec3::X, Vec3::Y, Vec3::new(x, y, 1.0))
    }

    /// 2D translation from a vector.
    #[inline]
    pub const fn from_translation(t: Vec2) -> Self {
        Self::translation(t.x(), t.y())
    }

    /// Counter-clockwise 2D rotation.
    ///
    /// Built from [`taylor_sine`]/[`taylor_cosine`], so it is accurate to
    /// about 0.01 per element.
    pub fn rotation(angle: impl Angle) -> Self {
        let rad = angle.to_radians();
        let (s, c) = (taylor_sine(rad), taylor_cosine(rad));
        Self::from_cols(Vec3::new(c, s, 0.0), Vec3::new(-s, c, 0.0), Vec3::Z)
    }

    /// 2D scale.
    #[inline]
    pub const fn scale(x: f32, y: f32) -> Self {
        Self::from_diagonal(Vec3::new(x, y, 1.0))
    }

    /// 2D scale from a vector.
    #[inline]
    pub const fn from_scale(s: Vec2) -> Self {
        Self::scale(s.x(), s.y())
    }

    /// Column `i`.
    #[inline]
    pub fn column(&self, i: usize) -> Vec3 {
        self.columns[i]
    }

    /// Row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> Vec3 {
        Vec3::new(self.columns[0][i], self.columns[1][i], self.columns[2][i])
    }

    /// Element at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.columns[col][row]
    }

    /// Transposed matrix.
    pub fn transpose(&self) -> Self {
        Self::from_cols(self.row(0), self.row(1), self.row(2))
    }

    /// Determinant.
    pub fn determinant(&self) -> f32 {
        vec3::dot(self.columns[0], vec3::cross(self.columns[1], self.columns[2]))
    }

    /// Inverse matrix, or `None` when singular.
    ///
    /// Singularity is judged against the Hadamard bound (the product of the
    /// column lengths), so uniformly small matrices still invert.
    ///
    /// ```rust
    /// use xform_math::{Mat3, Vec3};
    ///
    /// let m = Mat3::from_diagonal(Vec3::new(2.0, 4.0, 8.0));
    /// let inv = m.inverse().unwrap();
    /// assert_eq!(m * inv, Mat3::IDENTITY);
    /// assert!(Mat3::ZERO.inverse().is_none());
    /// ```
    pub fn inverse(&self) -> Option<Self> {
        let [c0, c1, c2] = self.columns;
        // Rows of the inverse are the column cross products over det
        let r0 = vec3::cross(c1, c2);
        let r1 = vec3::cross(c2, c0);
        let r2 = vec3::cross(c0, c1);
        let det = vec3::dot(c0, r0);
        let bound = c0.magnitude() * c1.magnitude() * c2.magnitude();
        if det.abs() <= bound * f32::EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        Some(Self::from_cols(r0 * inv_det, r1 * inv_det, r2 * inv_det).transpose())
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Matrix product `lhs * rhs`.
pub fn multiply(lhs: &Mat3, rhs: &Mat3) -> Mat3 {
    let (a, b) = (lhs.as_array(), rhs.as_array());
    let mut out = [0.0; 9];
    for col in 0..3 {
        for row in 0..3 {
            for e in 0..3 {
                out[row + col * 3] += a[row + e * 3] * b[e + col * 3];
            }
        }
    }
    Mat3::from_cols_array(&out)
}

/// Exact equality of all nine elements.
#[inline]
pub fn compare(lhs: &Mat3, rhs: &Mat3) -> bool {
    lhs.as_array() == rhs.as_array()
}

/// `m * v`.
pub fn transform_vec3(m: &Mat3, v: Vec3) -> Vec3 {
    let [c0, c1, c2] = m.columns;
    c0 * v.x() + c1 * v.y() + c2 * v.z()
}

/// Transforms a 2D point: homogenize with `z = 1`, then divide by the
/// resulting `z`.
pub fn transform_point(m: &Mat3, p: Vec2) -> Vec2 {
    let r = transform_vec3(m, Vec3::new(p.x(), p.y(), 1.0));
    Vec2::new(r.x() / r.z(), r.y() / r.z())
}

impl Mul for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        multiply(&self, &rhs)
    }
}

impl MulAssign for Mat3 {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = multiply(self, &rhs);
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        transform_vec3(&self, rhs)
    }
}

impl PartialEq for Mat3 {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        compare(self, other)
    }
}

// Column access: m[col][row]
impl Index<usize> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn index(&self, i: usize) -> &Vec3 {
        &self.columns[i]
    }
}

impl fmt::Display for Mat3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..3 {
            if i > 0 {
                f.write_str("\n")?;
            }
            fmt::Display::fmt(&self.row(i), f)?;
        }
        Ok(())
    }
}

impl From<glam::Mat3> for Mat3 {
    #[inline]
    fn from(m: glam::Mat3) -> Self {
        Self::from_cols_array(&m.to_cols_array())
    }
}

impl From<Mat3> for glam::Mat3 {
    #[inline]
    fn from(m: Mat3) -> glam::Mat3 {
        glam::Mat3::from_cols_array(m.as_array())
    }
}
