//! Cross-checks of xform-rs kernels against glam.
//!
//! glam is an independent, widely used implementation of the same
//! column-major conventions, so agreement within rounding is a strong check
//! on construction formulas and the quaternion conversions.

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use glam::{Mat3 as GMat3, Mat4 as GMat4, Quat as GQuat, Vec3 as GVec3, Vec4 as GVec4};
    use xform_core::{Avx, Radians, Scalar, Sse2, Sse4};
    use xform_math::{Mat3, Mat4, Quat, Vec3, Vec4, mat4, quat};

    fn samples() -> Vec<(f32, Vec3)> {
        let axes = [
            Vec3::X,
            Vec3::Y,
            Vec3::Z,
            Vec3::new(1.0, 2.0, 3.0).normalize(),
            Vec3::new(-0.7, 0.1, 0.4).normalize(),
        ];
        let angles = [0.2, 0.9, 1.6, 2.5, 3.0, -1.1];
        axes.iter()
            .flat_map(|axis| angles.iter().map(move |a| (*a, *axis)))
            .collect()
    }

    fn glam_mat(m: &Mat4) -> GMat4 {
        GMat4::from(*m)
    }

    #[test]
    fn test_multiply_matches_glam() {
        let a = Mat4::rotation(Radians::new(0.6), Vec3::new(0.0, 0.8, 0.6))
            * Mat4::translation(1.0, -2.0, 3.0);
        let b = Mat4::perspective(Radians::new(1.2), 1.5, 0.5, 20.0);
        let expected = Mat4::from(glam_mat(&a) * glam_mat(&b));

        assert_abs_diff_eq!(mat4::multiply::<Scalar>(&a, &b), expected, epsilon = 1e-5);
        assert_abs_diff_eq!(mat4::multiply::<Sse2>(&a, &b), expected, epsilon = 1e-5);
        assert_abs_diff_eq!(mat4::multiply::<Sse4>(&a, &b), expected, epsilon = 1e-5);
        assert_abs_diff_eq!(mat4::multiply::<Avx>(&a, &b), expected, epsilon = 1e-5);
    }

    #[test]
    fn test_transform_matches_glam() {
        let m = Mat4::look_at(Vec3::new(4.0, 1.0, -2.0), Vec3::new(0.0, 0.5, 0.0), Vec3::Y);
        let v = Vec4::new(0.3, -1.0, 2.0, 1.0);
        let expected = Vec4::from(glam_mat(&m) * GVec4::from(v));
        assert_abs_diff_eq!(mat4::transform_vec4::<Scalar>(&m, v), expected, epsilon = 1e-5);
        assert_abs_diff_eq!(mat4::transform_vec4::<Avx>(&m, v), expected, epsilon = 1e-5);
    }

    #[test]
    fn test_rotation_matches_glam() {
        for (angle, axis) in samples() {
            let expected = GMat4::from_axis_angle(GVec3::from(axis), angle);
            assert_abs_diff_eq!(
                Mat4::rotation(Radians::new(angle), axis),
                Mat4::from(expected),
                epsilon = 1e-5
            );
        }
        assert_abs_diff_eq!(
            Mat4::rotation_x(Radians::new(0.4)),
            Mat4::from(GMat4::from_rotation_x(0.4)),
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            Mat4::rotation_y(Radians::new(0.4)),
            Mat4::from(GMat4::from_rotation_y(0.4)),
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            Mat4::rotation_z(Radians::new(0.4)),
            Mat4::from(GMat4::from_rotation_z(0.4)),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_ortho_matches_glam() {
        let ours = Mat4::ortho(-4.0, 2.0, -1.0, 3.0, 0.1, 50.0);
        let theirs = GMat4::orthographic_rh_gl(-4.0, 2.0, -1.0, 3.0, 0.1, 50.0);
        assert_abs_diff_eq!(ours, Mat4::from(theirs), epsilon = 1e-6);
    }

    #[test]
    fn test_perspective_matches_glam_with_flipped_y() {
        let ours = Mat4::perspective(Radians::new(1.0), 16.0 / 9.0, 0.1, 100.0);
        let mut theirs = GMat4::perspective_rh_gl(1.0, 16.0 / 9.0, 0.1, 100.0);
        theirs.y_axis.y = -theirs.y_axis.y;
        assert_abs_diff_eq!(ours, Mat4::from(theirs), epsilon = 1e-4);
    }

    #[test]
    fn test_look_at_matches_glam() {
        let eye = Vec3::new(3.0, 4.0, 5.0);
        let target = Vec3::new(-1.0, 0.5, 0.0);
        let ours = Mat4::look_at(eye, target, Vec3::Y);
        let theirs = GMat4::look_at_rh(eye.into(), target.into(), GVec3::Y);
        assert_abs_diff_eq!(ours, Mat4::from(theirs), epsilon = 1e-5);
    }

    #[test]
    fn test_quaternion_conversions_match_glam() {
        for (angle, axis) in samples() {
            let q = Quat::from_axis(Radians::new(angle), axis);
            let gq = GQuat::from_axis_angle(axis.into(), angle);
            assert_abs_diff_eq!(q, Quat::from(gq), epsilon = 1e-6);

            let m = Mat4::rotation(Radians::new(angle), axis);
            assert_abs_diff_eq!(
                Mat4::from_quaternion(q),
                Mat4::from(GMat4::from_quat(gq)),
                epsilon = 1e-5
            );

            let ours = m.to_quaternion();
            let theirs = Quat::from(GQuat::from_mat4(&glam_mat(&m)));
            // q and -q are the same rotation
            let theirs = if quat::dot(ours, theirs) < 0.0 {
                Quat::new(-theirs.x(), -theirs.y(), -theirs.z(), -theirs.w())
            } else {
                theirs
            };
            assert_abs_diff_eq!(ours, theirs, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_quaternion_product_matches_glam() {
        let a = Quat::from_axis(Radians::new(0.7), Vec3::Z);
        let b = Quat::from_axis(Radians::new(-1.3), Vec3::new(0.6, 0.8, 0.0));
        let expected = Quat::from(GQuat::from(a) * GQuat::from(b));
        assert_abs_diff_eq!(a * b, expected, epsilon = 1e-6);

        let v = Vec3::new(1.0, -2.0, 0.5);
        let rotated = Vec3::from(GQuat::from(a) * GVec3::from(v));
        assert_abs_diff_eq!(a * v, rotated, epsilon = 1e-5);
    }

    #[test]
    fn test_mat3_matches_glam() {
        let m = Mat3::rotation(Radians::new(0.8)) * Mat3::scale(2.0, 0.5);
        let g = GMat3::from(m);

        let inv = m.inverse().expect("invertible");
        assert_abs_diff_eq!(inv, Mat3::from(g.inverse()), epsilon = 1e-3);
        assert_abs_diff_eq!(m.determinant(), g.determinant(), epsilon = 1e-3);
        assert!(Mat3::ZERO.inverse().is_none());

        let t = Mat3::translation(3.0, -1.0);
        let gt = GMat3::from_translation(glam::Vec2::new(3.0, -1.0));
        assert_abs_diff_eq!(t, Mat3::from(gt), epsilon = 0.0);
    }
}
