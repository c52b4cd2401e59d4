//! In-place slice transforms.
//!
//! Pipeline helpers that apply one matrix or quaternion to many vectors.
//! With the `parallel` feature, slices longer than [`PARALLEL_THRESHOLD`]
//! are split across the rayon pool. Every element goes through the same
//! kernel either way, so the output does not depend on the split.
//!
//! ```rust
//! use xform_math::{batch, Mat4, Scalar, Vec3};
//!
//! let mut points = vec![Vec3::ZERO, Vec3::ONE];
//! batch::transform_points::<Scalar>(&Mat4::translation(1.0, 0.0, 0.0), &mut points);
//! assert_eq!(points, [Vec3::X, Vec3::new(2.0, 1.0, 1.0)]);
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::trace;
use xform_core::Backend;

use crate::mat4::{self, Mat4};
use crate::quat::{self, Quat};
use crate::vec3::Vec3;
use crate::vec4::Vec4;

/// Slices longer than this are processed in parallel.
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Runs `f` over every element, in parallel for large slices.
#[cfg(feature = "parallel")]
fn for_each_mut<T, F>(items: &mut [T], f: F)
where
    T: Send,
    F: Fn(&mut T) + Sync + Send,
{
    if items.len() > PARALLEL_THRESHOLD {
        items.par_iter_mut().for_each(f);
    } else {
        items.iter_mut().for_each(f);
    }
}

/// Runs `f` over every element.
#[cfg(not(feature = "parallel"))]
fn for_each_mut<T, F>(items: &mut [T], f: F)
where
    F: Fn(&mut T),
{
    items.iter_mut().for_each(f);
}

/// Transforms points in place (`w = 1`, divided by the resulting `w`).
pub fn transform_points<B: Backend>(m: &Mat4, points: &mut [Vec3]) {
    trace!(count = points.len(), backend = %B::LEVEL, "transform_points");
    for_each_mut(points, |p| *p = mat4::transform_vec3::<B>(m, *p));
}

/// Transforms 4-component vectors in place.
pub fn transform_vec4s<B: Backend>(m: &Mat4, vectors: &mut [Vec4]) {
    trace!(count = vectors.len(), backend = %B::LEVEL, "transform_vec4s");
    for_each_mut(vectors, |v| *v = mat4::transform_vec4::<B>(m, *v));
}

/// Rotates vectors in place by a unit quaternion.
pub fn rotate_vectors(q: &Quat, vectors: &mut [Vec3]) {
    trace!(count = vectors.len(), "rotate_vectors");
    for_each_mut(vectors, |v| *v = quat::transform(*v, *q));
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use xform_core::{Avx, HALF_PI, Radians, Scalar, Sse4};

    fn cloud(n: usize) -> Vec<Vec3> {
        (0..n)
            .map(|i| {
                let t = i as f32 * 0.01;
                Vec3::new(t.sin(), t.cos(), t * 0.1)
            })
            .collect()
    }

    #[test]
    fn test_batch_matches_single() {
        let m = Mat4::perspective(Radians::new(1.0), 1.5, 0.1, 50.0)
            * Mat4::translation(0.0, 0.0, -5.0);
        let original = cloud(PARALLEL_THRESHOLD + 123);
        let mut points = original.clone();
        transform_points::<Sse4>(&m, &mut points);
        for (out, p) in points.iter().zip(&original) {
            assert_eq!(*out, mat4::transform_vec3::<Sse4>(&m, *p));
        }
    }

    #[test]
    fn test_vec4s_across_backends() {
        let m = Mat4::rotation(Radians::new(0.5), Vec3::Y) * Mat4::scale(2.0, 3.0, 4.0);
        let original: Vec<Vec4> = cloud(64).into_iter().map(|v| Vec4::from_vec3(v, 1.0)).collect();
        let mut a = original.clone();
        let mut b = original;
        transform_vec4s::<Scalar>(&m, &mut a);
        transform_vec4s::<Avx>(&m, &mut b);
        for (x, y) in a.iter().zip(&b) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_rotate_vectors() {
        let q = Quat::from_axis(Radians::new(HALF_PI), Vec3::Z);
        let mut v = vec![Vec3::X, Vec3::Y, Vec3::Z];
        rotate_vectors(&q, &mut v);
        assert_abs_diff_eq!(v[0], Vec3::Y, epsilon = 1e-6);
        assert_abs_diff_eq!(v[1], -Vec3::X, epsilon = 1e-6);
        assert_abs_diff_eq!(v[2], Vec3::Z, epsilon = 1e-6);
    }

    #[test]
    fn test_empty_slice() {
        let mut none: [Vec3; 0] = [];
        transform_points::<Scalar>(&Mat4::IDENTITY, &mut none);
        rotate_vectors(&Quat::IDENTITY, &mut none);
    }
}
