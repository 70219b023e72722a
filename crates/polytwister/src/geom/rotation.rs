//! 3D affine maps as homogeneous `Matrix4`, and the Rodrigues alignment
//! used to orient soft generator sets.
//!
//! The symmetry axis of every cross-section is `+y`.

use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

/// Right-handed rotation by `angle` radians about `+x`.
#[inline]
pub fn rotation_x(angle: f64) -> Matrix4<f64> {
    Matrix4::new_rotation(Vector3::x() * angle)
}

/// Right-handed rotation by `angle` radians about the symmetry axis `+y`.
#[inline]
pub fn rotation_y(angle: f64) -> Matrix4<f64> {
    Matrix4::new_rotation(Vector3::y() * angle)
}

#[inline]
pub fn translation(offset: Vector3<f64>) -> Matrix4<f64> {
    Matrix4::new_translation(&offset)
}

#[inline]
pub fn scaling(factors: Vector3<f64>) -> Matrix4<f64> {
    Matrix4::new_nonuniform_scaling(&factors)
}

/// Apply a homogeneous affine map to a point.
#[inline]
pub fn apply_affine(m: &Matrix4<f64>, p: &Vector3<f64>) -> Vector3<f64> {
    m.transform_point(&Point3::from(*p)).coords
}

/// Rotation taking the direction of `reference` onto `+x` (Rodrigues' formula).
///
/// Returns the identity when `reference` already points along `+x`, and `None`
/// when it is zero or points along `−x` (axis undefined).
pub fn align_with_x(reference: &Vector3<f64>) -> Option<Matrix3<f64>> {
    let norm = reference.norm();
    if norm == 0.0 || !norm.is_finite() {
        return None;
    }
    let n = reference / norm;
    let axis = n.cross(&Vector3::x());
    let sin_angle = axis.norm();
    let cos_angle = n.dot(&Vector3::x());
    if sin_angle < 1e-12 {
        return (cos_angle > 0.0).then(Matrix3::identity);
    }
    let k = axis / sin_angle;
    let cross = Matrix3::new(
        0.0, -k.z, k.y, //
        k.z, 0.0, -k.x, //
        -k.y, k.x, 0.0,
    );
    Some(Matrix3::identity() + cross * sin_angle + cross * cross * (1.0 - cos_angle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn quarter_turn_about_x_takes_z_to_minus_y() {
        let p = apply_affine(&rotation_x(FRAC_PI_2), &Vector3::z());
        assert_relative_eq!(p, -Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn rotation_y_fixes_symmetry_axis() {
        let p = apply_affine(&rotation_y(1.234), &Vector3::new(0.0, 2.0, 0.0));
        assert_relative_eq!(p, Vector3::new(0.0, 2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn alignment_maps_reference_onto_x() {
        for r in [
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(0.0, 1.0, 1.618),
            Vector3::new(-0.3, 0.2, -0.9),
            Vector3::new(2.0, 0.0, 0.0),
        ] {
            let m = align_with_x(&r).unwrap();
            assert_relative_eq!(m * r.normalize(), Vector3::x(), epsilon = 1e-12);
            assert_relative_eq!(m.transpose() * m, Matrix3::identity(), epsilon = 1e-12);
        }
        assert!(align_with_x(&Vector3::new(-1.0, 0.0, 0.0)).is_none());
        assert!(align_with_x(&Vector3::zeros()).is_none());
    }
}
