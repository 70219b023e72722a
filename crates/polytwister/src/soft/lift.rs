use nalgebra::{Vector3, Vector4};

use crate::error::HullError;
use crate::geom::{fiber_rotation, reference_fiber};
use crate::hull::{hull4, Hull4D};

/// `resolution` points on the Hopf fiber over each generator, scaled by the
/// generator's length, concatenated in generator order.
pub fn lift(generators: &[Vector3<f64>], resolution: usize) -> Vec<Vector4<f64>> {
    let mut out = Vec::with_capacity(generators.len() * resolution);
    for p in generators {
        let radius = p.norm();
        let m = fiber_rotation(&(p / radius));
        out.extend(reference_fiber(resolution, radius).iter().map(|v| m * v));
    }
    out
}

/// 4D convex hull of the lifted generators.
pub fn hopf_hull(generators: &[Vector3<f64>], resolution: usize) -> Result<Hull4D, HullError> {
    hull4(&lift(generators, resolution))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fibers_keep_generator_length() {
        let gens = [Vector3::new(0.0, 2.0, 0.0), Vector3::new(-0.5, 0.0, 0.0)];
        let pts = lift(&gens, 10);
        assert_eq!(pts.len(), 20);
        for v in &pts[..10] {
            assert_relative_eq!(v.norm(), 2.0, epsilon = 1e-12);
        }
        for v in &pts[10..] {
            assert_relative_eq!(v.norm(), 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn antipodal_generators_give_orthogonal_planes() {
        // The fibers over ±x span orthogonal 2-planes of R⁴.
        let pts = lift(&[Vector3::x(), -Vector3::x()], 8);
        for a in &pts[..8] {
            for b in &pts[8..] {
                assert_relative_eq!(a.dot(b), 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn duospindle_hull_is_full_rank() {
        let hull = hopf_hull(&[Vector3::y(), -Vector3::y()], 12).unwrap();
        assert!(hull.simplices.len() >= 5);
        assert!(hull.points.iter().all(|p| (p.norm() - 1.0).abs() < 1e-12));
    }
}
