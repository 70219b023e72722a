//! Quaternions as 4D rotations, and the Hopf fiber of a point on the 2-sphere.
//!
//! Conventions
//! - A quaternion `a + bi + cj + dk` is stored as `Vector4::new(a, b, c, d)`.
//! - R⁴ coordinates are `(x, y, z, w)`; the slicing coordinate is the last one.
//! - The reference fiber is the unit circle in the `xy`-plane, the fiber over
//!   the reference axis `+x` of the 2-sphere.

use nalgebra::{Matrix4, Vector3, Vector4};

use super::util::is_close;

/// Matrix of the left-isoclinic rotation `v ↦ q·v` for a unit quaternion `q`.
#[inline]
pub fn quat_left_matrix(q: &Vector4<f64>) -> Matrix4<f64> {
    let (a, b, c, d) = (q[0], q[1], q[2], q[3]);
    Matrix4::new(
        a, -b, -c, -d, //
        b, a, -d, c, //
        c, d, a, -b, //
        d, -c, b, a,
    )
}

/// Unit quaternion carrying the reference fiber onto the fiber over `p`.
///
/// `p` must have unit length. The general formula `(1 + x, 0, −z, y) /
/// √(2(1 + x))` is `0/0` at the antipode `x = −1`; that point gets the explicit
/// quaternion `k = (0, 0, 0, 1)`.
pub fn fiber_quaternion(p: &Vector3<f64>) -> Vector4<f64> {
    let (x, y, z) = (p[0], p[1], p[2]);
    if is_close(x, -1.0) {
        return Vector4::new(0.0, 0.0, 0.0, 1.0);
    }
    let normalizer = 1.0 / (2.0 * (1.0 + x)).sqrt();
    Vector4::new(1.0 + x, 0.0, -z, y) * normalizer
}

/// 4D rotation taking the unit circle in the `xy`-plane to the Hopf fiber over `p`.
#[inline]
pub fn fiber_rotation(p: &Vector3<f64>) -> Matrix4<f64> {
    quat_left_matrix(&fiber_quaternion(p))
}

/// `n` evenly spaced points of the reference fiber (endpoint excluded), scaled
/// by `radius`.
pub fn reference_fiber(n: usize, radius: f64) -> Vec<Vector4<f64>> {
    let step = std::f64::consts::TAU / n as f64;
    (0..n)
        .map(|k| {
            let t = step * k as f64;
            Vector4::new(t.cos() * radius, t.sin() * radius, 0.0, 0.0)
        })
        .collect()
}
