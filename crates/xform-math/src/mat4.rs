//! 4x4 matrix kernels.
//!
//! [`Mat4`] stores four [`Vec4`] columns (`elements[row + col * 4]`) and is
//! 32-byte aligned, so the same storage can be viewed without copying as
//! sixteen floats, four 4-lane columns or two 8-lane halves.
//!
//! # Backends
//!
//! [`multiply`], [`compare`], [`transform_vec4`] and [`transform_vec3`] are
//! generic over [`Backend`]:
//!
//! - `Scalar` - triple loop, the reference definition
//! - `Sse2`/`Sse4` - broadcast each rhs element and accumulate lhs columns
//! - `Avx` - two result columns per 8-lane register
//!
//! Every multiply variant accumulates in the same order, so results are
//! bit-identical across backends.
//!
//! # Conventions
//!
//! Right-handed, column vectors, OpenGL-style `[-1, 1]` clip depth.
//! [`Mat4::perspective`] flips Y for Vulkan-style viewports.
//!
//! ```rust
//! use xform_math::{mat4, Mat4, Sse4, Vec3, Vec4};
//!
//! let m = Mat4::translation(1.0, 2.0, 3.0);
//! let p = mat4::transform_vec4::<Sse4>(&m, Vec4::new(0.0, 0.0, 0.0, 1.0));
//! assert_eq!(p, Vec4::new(1.0, 2.0, 3.0, 1.0));
//! assert_eq!(m * Vec3::ONE, Vec3::new(2.0, 3.0, 4.0));
//! ```

use std::fmt;
use std::ops::{Index, Mul, MulAssign};

use bytemuck::{Pod, Zeroable};
use wide::{f32x4, f32x8};
use xform_core::{Angle, Backend, DefaultBackend, SimdLevel};

use crate::quat::Quat;
use crate::simd;
use crate::vec3::{self, Vec3};
use crate::vec4::Vec4;

/// A 4x4 column-major matrix.
///
/// # Layout
///
/// ```text
/// | e0 e4 e8  e12 |
/// | e1 e5 e9  e13 |
/// | e2 e6 e10 e14 |
/// | e3 e7 e11 e15 |
/// ```
///
/// Translation lives in `e12..e14`.
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
#[repr(C, align(32))]
pub struct Mat4 {
    columns: [Vec4; 4],
}

assert_layout!(Mat4, 64, 32);

impl Mat4 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self::from_cols(Vec4::X, Vec4::Y, Vec4::Z, Vec4::W);

    /// All zeros.
    pub const ZERO: Self = Self::from_cols(Vec4::ZERO, Vec4::ZERO, Vec4::ZERO, Vec4::ZERO);

    /// Identity matrix.
    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Creates from four columns.
    #[inline]
    pub const fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self {
            columns: [c0, c1, c2, c3],
        }
    }

    /// Creates from sixteen column-major elements.
    #[inline]
    pub fn from_cols_array(a: &[f32; 16]) -> Self {
        bytemuck::cast(*a)
    }

    /// Copies out the sixteen column-major elements.
    #[inline]
    pub fn to_cols_array(&self) -> [f32; 16] {
        *self.as_array()
    }

    /// Views the matrix as sixteen column-major elements.
    #[inline]
    pub fn as_array(&self) -> &[f32; 16] {
        bytemuck::cast_ref(self)
    }

    /// Mutable view of the sixteen column-major elements.
    #[inline]
    pub fn as_array_mut(&mut self) -> &mut [f32; 16] {
        bytemuck::cast_mut(self)
    }

    /// Views the matrix as four 4-lane columns.
    #[inline]
    pub fn as_lanes4(&self) -> &[[f32; 4]; 4] {
        bytemuck::cast_ref(self)
    }

    /// Views the matrix as two 8-lane halves (columns 0-1 and 2-3).
    #[inline]
    pub fn as_lanes8(&self) -> &[[f32; 8]; 2] {
        bytemuck::cast_ref(self)
    }

    /// Diagonal matrix.
    #[inline]
    pub const fn from_diagonal(d: Vec4) -> Self {
        Self::from_cols(
            Vec4::new(d.x(), 0.0, 0.0, 0.0),
            Vec4::new(0.0, d.y(), 0.0, 0.0),
            Vec4::new(0.0, 0.0, d.z(), 0.0),
            Vec4::new(0.0, 0.0, 0.0, d.w()),
        )
    }

    /// Translation by `(x, y, z)`.
    #[inline]
    pub const fn translation(x: f32, y: f32, z: f32) -> Self {
        Self::from_cols(Vec4::X, Vec4::Y, Vec4::Z, Vec4::new(x, y, z, 1.0))
    }

    /// Translation by a vector.
    #[inline]
    pub const fn from_translation(t: Vec3) -> Self {
        Self::translation(t.x(), t.y(), t.z())
    }

    /// Non-uniform scale.
    #[inline]
    pub const fn scale(x: f32, y: f32, z: f32) -> Self {
        Self::from_diagonal(Vec4::new(x, y, z, 1.0))
    }

    /// Non-uniform scale from a vector.
    #[inline]
    pub const fn from_scale(s: Vec3) -> Self {
        Self::scale(s.x(), s.y(), s.z())
    }

    /// Counter-clockwise rotation about a unit `axis` (Rodrigues' formula).
    ///
    /// The axis is not normalized here.
    pub fn rotation(angle: impl Angle, axis: Vec3) -> Self {
        let (s, c) = angle.to_radians().get().sin_cos();
        let omc = 1.0 - c;
        let (x, y, z) = (axis.x(), axis.y(), axis.z());

        Self::from_cols(
            Vec4::new(x * x * omc + c, y * x * omc + z * s, x * z * omc - y * s, 0.0),
            Vec4::new(x * y * omc - z * s, y * y * omc + c, y * z * omc + x * s, 0.0),
            Vec4::new(x * z * omc + y * s, y * z * omc - x * s, z * z * omc + c, 0.0),
            Vec4::W,
        )
    }

    /// Rotation about +X.
    pub fn rotation_x(angle: impl Angle) -> Self {
        let (s, c) = angle.to_radians().get().sin_cos();
        Self::from_cols(
            Vec4::X,
            Vec4::new(0.0, c, s, 0.0),
            Vec4::new(0.0, -s, c, 0.0),
            Vec4::W,
        )
    }

    /// Rotation about +Y.
    pub fn rotation_y(angle: impl Angle) -> Self {
        let (s, c) = angle.to_radians().get().sin_cos();
        Self::from_cols(
            Vec4::new(c, 0.0, -s, 0.0),
            Vec4::Y,
            Vec4::new(s, 0.0, c, 0.0),
            Vec4::W,
        )
    }

    /// Rotation about +Z.
    pub fn rotation_z(angle: impl Angle) -> Self {
        let (s, c) = angle.to_radians().get().sin_cos();
        Self::from_cols(
            Vec4::new(c, s, 0.0, 0.0),
            Vec4::new(-s, c, 0.0, 0.0),
            Vec4::Z,
            Vec4::W,
        )
    }

    /// Orthographic projection mapping the box to `[-1, 1]^3`.
    ///
    /// The camera looks down -Z; `near` maps to -1 and `far` to +1.
    pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let rl = 1.0 / (right - left);
        let tb = 1.0 / (top - bottom);
        let fl = 1.0 / (far - near);

        Self::from_cols(
            Vec4::new(2.0 * rl, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 * tb, 0.0, 0.0),
            Vec4::new(0.0, 0.0, -2.0 * fl, 0.0),
            Vec4::new(-(right + left) * rl, -(top + bottom) * tb, -(far + near) * fl, 1.0),
        )
    }

    /// Perspective projection with a vertical field of view.
    ///
    /// Y is flipped (`[1][1]` negative) for viewports whose Y axis points
    /// down; depth maps to `[-1, 1]`.
    pub fn perspective(fov_y: impl Angle, aspect: f32, near: f32, far: f32) -> Self {
        let top = (fov_y.to_radians().get() / 2.0).tan() * near;
        let depth = far - near;

        Self::from_cols(
            Vec4::new(near / (aspect * top), 0.0, 0.0, 0.0),
            Vec4::new(0.0, -(near / top), 0.0, 0.0),
            Vec4::new(0.0, 0.0, -(far + near) / depth, -1.0),
            Vec4::new(0.0, 0.0, -(2.0 * far * near) / depth, 0.0),
        )
    }

    /// View matrix looking from `eye` towards `target`.
    ///
    /// Rows are the side, corrected up and negated forward axes; the last
    /// column moves `eye` to the origin.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - eye).normalize();
        let side = vec3::cross(forward, up).normalize();
        let up = vec3::cross(side, forward);

        Self::from_cols(
            Vec4::new(side.x(), up.x(), -forward.x(), 0.0),
            Vec4::new(side.y(), up.y(), -forward.y(), 0.0),
            Vec4::new(side.z(), up.z(), -forward.z(), 0.0),
            Vec4::new(
                -vec3::dot(side, eye),
                -vec3::dot(up, eye),
                vec3::dot(forward, eye),
                1.0,
            ),
        )
    }

    /// Rotation matrix of a quaternion.
    ///
    /// Divides through the squared norm, so non-unit input yields the same
    /// rotation. A zero quaternion is a contract violation.
    pub fn from_quaternion(q: Quat) -> Self {
        let (x, y, z, w) = (q.x(), q.y(), q.z(), q.w());
        let norm = q.square_magnitude();
        debug_assert!(norm != 0.0, "cannot build a rotation from a zero quaternion");
        let s = 2.0 / norm;

        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (xw, yw, zw) = (x * w, y * w, z * w);

        Self::from_cols(
            Vec4::new(1.0 - s * (yy + zz), s * (xy + zw), s * (xz - yw), 0.0),
            Vec4::new(s * (xy - zw), 1.0 - s * (xx + zz), s * (yz + xw), 0.0),
            Vec4::new(s * (xz + yw), s * (yz - xw), 1.0 - s * (xx + yy), 0.0),
            Vec4::W,
        )
    }

    /// Rotation quaternion of the upper 3x3 block.
    ///
    /// Picks the largest of the four candidate components as the pivot, so
    /// no division is by a near-zero term. On exact ties the earlier of
    /// x, y, z, w wins. The result is normalized.
    pub fn to_quaternion(&self) -> Quat {
        let m = |row: usize, col: usize| self.get(row, col);
        let (m00, m11, m22) = (m(0, 0), m(1, 1), m(2, 2));

        let tx = 1.0 + m00 - m11 - m22;
        let ty = 1.0 - m00 + m11 - m22;
        let tz = 1.0 - m00 - m11 + m22;
        let tw = 1.0 + m00 + m11 + m22;

        let q = if tx >= ty && tx >= tz && tx >= tw {
            let x = tx.sqrt() * 0.5;
            let k = 0.25 / x;
            Quat::new(
                x,
                (m(0, 1) + m(1, 0)) * k,
                (m(0, 2) + m(2, 0)) * k,
                (m(2, 1) - m(1, 2)) * k,
            )
        } else if ty >= tx && ty >= tz && ty >= tw {
            let y = ty.sqrt() * 0.5;
            let k = 0.25 / y;
            Quat::new(
                (m(0, 1) + m(1, 0)) * k,
                y,
                (m(1, 2) + m(2, 1)) * k,
                (m(0, 2) - m(2, 0)) * k,
            )
        } else if tz >= tx && tz >= ty && tz >= tw {
            let z = tz.sqrt() * 0.5;
            let k = 0.25 / z;
            Quat::new(
                (m(0, 2) + m(2, 0)) * k,
                (m(1, 2) + m(2, 1)) * k,
                z,
                (m(1, 0) - m(0, 1)) * k,
            )
        } else {
            let w = tw.sqrt() * 0.5;
            let k = 0.25 / w;
            Quat::new(
                (m(2, 1) - m(1, 2)) * k,
                (m(0, 2) - m(2, 0)) * k,
                (m(1, 0) - m(0, 1)) * k,
                w,
            )
        };

        q.normalize()
    }

    /// Column `i`.
    #[inline]
    pub fn column(&self, i: usize) -> Vec4 {
        self.columns[i]
    }

    /// Row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> Vec4 {
        let [c0, c1, c2, c3] = self.columns;
        Vec4::new(c0[i], c1[i], c2[i], c3[i])
    }

    /// Element at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.columns[col][row]
    }

    /// Transposed matrix.
    pub fn transpose(&self) -> Self {
        Self::from_cols(self.row(0), self.row(1), self.row(2), self.row(3))
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Matrix product `lhs * rhs`.
///
/// Element `(r, c)` is `sum(lhs[r, e] * rhs[e, c])` accumulated from zero in
/// ascending `e` on every backend.
pub fn multiply<B: Backend>(lhs: &Mat4, rhs: &Mat4) -> Mat4 {
    let b = rhs.as_array();
    match B::LEVEL {
        SimdLevel::Scalar => {
            let a = lhs.as_array();
            let mut out = [0.0; 16];
            for col in 0..4 {
                for row in 0..4 {
                    for e in 0..4 {
                        out[row + col * 4] += a[row + e * 4] * b[e + col * 4];
                    }
                }
            }
            Mat4::from_cols_array(&out)
        }
        SimdLevel::Sse2 | SimdLevel::Sse4 => {
            let cols = lhs.columns.map(Vec4::lanes);
            let mut out = Mat4::ZERO;
            for (col, dst) in out.columns.iter_mut().enumerate() {
                let mut acc = f32x4::splat(0.0);
                for (e, lane) in cols.iter().enumerate() {
                    acc += *lane * f32x4::splat(b[e + col * 4]);
                }
                *dst = Vec4::from_lanes(acc);
            }
            out
        }
        SimdLevel::Avx => {
            // Each lhs column duplicated across both halves
            let cols = (*lhs.as_lanes4()).map(|c| simd::join(c, c));
            let mut out = [[0.0; 8]; 2];
            for (half, dst) in out.iter_mut().enumerate() {
                let (c0, c1) = (half * 2, half * 2 + 1);
                let mut acc = f32x8::splat(0.0);
                for (e, lane) in cols.iter().enumerate() {
                    acc += *lane * simd::broadcast_pair(b[e + c0 * 4], b[e + c1 * 4]);
                }
                *dst = acc.to_array();
            }
            bytemuck::cast(out)
        }
    }
}

/// Exact equality of all sixteen elements.
pub fn compare<B: Backend>(lhs: &Mat4, rhs: &Mat4) -> bool {
    match B::LEVEL {
        SimdLevel::Scalar => lhs.as_array() == rhs.as_array(),
        SimdLevel::Sse2 | SimdLevel::Sse4 => lhs
            .columns
            .iter()
            .zip(&rhs.columns)
            .all(|(a, b)| simd::all_eq_x4(a.lanes(), b.lanes())),
        SimdLevel::Avx => lhs
            .as_lanes8()
            .iter()
            .zip(rhs.as_lanes8())
            .all(|(a, b)| simd::all_eq_x8(f32x8::from(*a), f32x8::from(*b))),
    }
}

/// `m * v`.
///
/// Scalar and 4-lane backends accumulate columns in order and agree
/// exactly; `Avx` sums column pairs and agrees to rounding.
pub fn transform_vec4<B: Backend>(m: &Mat4, v: Vec4) -> Vec4 {
    let [v0, v1, v2, v3] = v.to_array();
    match B::LEVEL {
        SimdLevel::Scalar => {
            let a = m.as_array();
            let mut out = [0.0; 4];
            for (row, dst) in out.iter_mut().enumerate() {
                for (col, s) in [v0, v1, v2, v3].into_iter().enumerate() {
                    *dst += a[row + col * 4] * s;
                }
            }
            Vec4::from_array(out)
        }
        SimdLevel::Sse2 | SimdLevel::Sse4 => {
            let mut acc = f32x4::splat(0.0);
            for (col, s) in m.columns.iter().zip([v0, v1, v2, v3]) {
                acc += col.lanes() * f32x4::splat(s);
            }
            Vec4::from_lanes(acc)
        }
        SimdLevel::Avx => {
            let [lo, hi] = (*m.as_lanes8()).map(f32x8::from);
            let acc = lo * simd::broadcast_pair(v0, v1) + hi * simd::broadcast_pair(v2, v3);
            let (a, b) = simd::split(acc);
            Vec4::from_lanes(f32x4::from(a) + f32x4::from(b))
        }
    }
}

/// Transforms a point: homogenize with `w = 1`, divide xyz by the resulting
/// `w`, drop `w`.
pub fn transform_vec3<B: Backend>(m: &Mat4, v: Vec3) -> Vec3 {
    let r = transform_vec4::<B>(m, Vec4::from_vec3(v, 1.0));
    let w = r.w();
    Vec3::new(r.x() / w, r.y() / w, r.z() / w)
}

impl Mul for Mat4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        multiply::<DefaultBackend>(&self, &rhs)
    }
}

impl MulAssign for Mat4 {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = multiply::<DefaultBackend>(self, &rhs);
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    #[inline]
    fn mul(self, rhs: Vec4) -> Vec4 {
        transform_vec4::<DefaultBackend>(&self, rhs)
    }
}

impl Mul<Vec3> for Mat4 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        transform_vec3::<DefaultBackend>(&self, rhs)
    }
}

impl PartialEq for Mat4 {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        compare::<DefaultBackend>(self, other)
    }
}

// Column access: m[col][row]
impl Index<usize> for Mat4 {
    type Output = Vec4;

    #[inline]
    fn index(&self, i: usize) -> &Vec4 {
        &self.columns[i]
    }
}

impl fmt::Display for Mat4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..4 {
            if i > 0 {
                f.write_str("\n")?;
            }
            fmt::Display::fmt(&self.row(i), f)?;
        }
        Ok(())
    }
}

impl From<glam::Mat4> for Mat4 {
    #[inline]
    fn from(m: glam::Mat4) -> Self {
        Self::from_cols_array(&m.to_cols_array())
    }
}

impl From<Mat4> for glam::Mat4 {
    #[inline]
    fn from(m: Mat4) -> glam::Mat4 {
        glam::Mat4::from_cols_array(m.as_array())
    }
}
