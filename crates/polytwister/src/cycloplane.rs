//! Closed-form cross-section of one cycloplane at slicing coordinate `w`.
//!
//! The cross-section is either nothing, a slab `|y| ≤ √(1−w²)` (the south
//! pole), or a unit cylinder whose placement is
//!
//! ```text
//! Ry(φ) · Rx(−θ) · T(w·tanθ, 0, 0) · S(1/cosθ, 1, 1) · Rx(π/2)
//! ```
//!
//! applied to the canonical cylinder along `+z` (radius 1, height [`LARGE`],
//! centered), with `θ = zenith / 2` and `φ = azimuth`. Both infinite shapes are
//! capped at [`LARGE`].
//!
//! Nothing here knows about a solid kernel; [`Cylinder`] is plain data the
//! kernel turns into a solid.

use std::f64::consts::FRAC_PI_2;

use nalgebra::{Matrix4, Vector3};

use crate::cfg::{LARGE, POLE_EPS};
use crate::geom::{apply_affine, rotation_x, rotation_y, scaling, translation};

/// A finite cylinder: the canonical one along `+z` (radius, height, centered at
/// the origin) mapped by `placement`.
#[derive(Clone, Debug, PartialEq)]
pub struct Cylinder {
    pub radius: f64,
    pub height: f64,
    pub placement: Matrix4<f64>,
}

impl Cylinder {
    /// Exact point membership (boundary included).
    pub fn contains(&self, p: &Vector3<f64>) -> bool {
        let Some(inverse) = self.placement.try_inverse() else {
            return false;
        };
        let local = apply_affine(&inverse, p);
        local.x * local.x + local.y * local.y <= self.radius * self.radius
            && local.z.abs() <= self.height / 2.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CycloplaneSection {
    Empty,
    Slab { half_thickness: f64 },
    Cylinder { placement: Matrix4<f64> },
}

/// Cross-section of the cycloplane `(zenith, azimuth)` at `w`.
pub fn section(w: f64, zenith: f64, azimuth: f64) -> CycloplaneSection {
    let theta = zenith / 2.0;
    if (theta - FRAC_PI_2).abs() < POLE_EPS {
        if w.abs() >= 1.0 {
            return CycloplaneSection::Empty;
        }
        return CycloplaneSection::Slab {
            half_thickness: (1.0 - w * w).sqrt(),
        };
    }
    let placement = rotation_y(azimuth)
        * rotation_x(-theta)
        * translation(Vector3::new(w * theta.tan(), 0.0, 0.0))
        * scaling(Vector3::new(1.0 / theta.cos(), 1.0, 1.0))
        * rotation_x(FRAC_PI_2);
    CycloplaneSection::Cylinder { placement }
}

impl CycloplaneSection {
    pub fn is_empty(&self) -> bool {
        matches!(self, CycloplaneSection::Empty)
    }

    /// The capped primitive, or `None` when empty.
    ///
    /// The slab is a disk of radius [`LARGE`] around the `y` axis.
    pub fn as_cylinder(&self) -> Option<Cylinder> {
        match self {
            CycloplaneSection::Empty => None,
            CycloplaneSection::Slab { half_thickness } => Some(Cylinder {
                radius: LARGE,
                height: 2.0 * half_thickness,
                placement: rotation_x(FRAC_PI_2),
            }),
            CycloplaneSection::Cylinder { placement } => Some(Cylinder {
                radius: 1.0,
                height: LARGE,
                placement: *placement,
            }),
        }
    }

    pub fn contains(&self, p: &Vector3<f64>) -> bool {
        self.as_cylinder().is_some_and(|c| c.contains(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::PI;

    #[test]
    fn north_pole_at_zero_is_unit_cylinder_about_y() {
        let s = section(0.0, 0.0, 0.0);
        assert!(s.contains(&Vector3::new(0.99, 40.0, 0.0)));
        assert!(s.contains(&Vector3::new(0.0, -40.0, -0.99)));
        assert!(!s.contains(&Vector3::new(1.01, 0.0, 0.0)));
        assert!(!s.contains(&Vector3::new(0.0, 0.0, 1.01)));
        assert!(!s.contains(&Vector3::new(0.0, 51.0, 0.0)));
    }

    #[test]
    fn south_pole_slab_and_its_emptiness() {
        match section(0.6, PI, 0.0) {
            CycloplaneSection::Slab { half_thickness } => {
                assert_relative_eq!(half_thickness, 0.8, epsilon = 1e-12)
            }
            other => panic!("expected slab, got {other:?}"),
        }
        assert!(section(1.0, PI, 0.0).is_empty());
        assert!(section(-1.5, PI, 0.0).is_empty());
        assert!(section(0.0, PI, 0.0).contains(&Vector3::new(80.0, 0.99, 0.0)));
    }

    #[test]
    fn azimuth_rotates_about_y() {
        let a = section(0.3, 1.0, 0.0);
        let b = section(0.3, 1.0, 0.7);
        let r = rotation_y(0.7);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let p = Vector3::new(
                rng.gen_range(-3.0f64..3.0),
                rng.gen_range(-3.0f64..3.0),
                rng.gen_range(-3.0f64..3.0),
            );
            assert_eq!(a.contains(&p), b.contains(&apply_affine(&r, &p)));
        }
    }

    #[test]
    fn cylinder_approaches_slab_near_south_pole() {
        // Just outside the pole window the cylinder is a very flat, very wide
        // ellipse swept along its axis; away from the boundary it agrees with
        // the slab.
        let w = 0.5;
        let near = section(w, PI - 4.0 * POLE_EPS, 0.0);
        let slab = section(w, PI, 0.0);
        assert!(matches!(near, CycloplaneSection::Cylinder { .. }));
        let h = (1.0 - w * w).sqrt();
        let mut rng = StdRng::seed_from_u64(42);
        let mut checked = 0;
        for _ in 0..2000 {
            let p = Vector3::new(
                rng.gen_range(-5.0f64..5.0),
                rng.gen_range(-1.5f64..1.5),
                rng.gen_range(-5.0f64..5.0),
            );
            if (p.y.abs() - h).abs() < 0.05 {
                continue;
            }
            checked += 1;
            assert_eq!(near.contains(&p), slab.contains(&p), "disagree at {p:?}");
        }
        assert!(checked > 1000);
    }

    proptest::proptest! {
        #[test]
        fn placement_matches_closed_form(
            zenith in 0.0..(PI - 0.01),
            azimuth in 0.0..(2.0 * PI),
            w in -2.0..2.0f64,
            x in -3.0..3.0f64,
            y in -3.0..3.0f64,
            z in -3.0..3.0f64,
        ) {
            let theta = zenith / 2.0;
            let p = apply_affine(&rotation_y(-azimuth), &Vector3::new(x, y, z));
            let (s, c) = theta.sin_cos();
            let f = (p.x * c - w * s).powi(2) + (p.y * s + p.z * c).powi(2);
            proptest::prop_assume!((f - 1.0).abs() > 1e-6);
            let cut = section(w, zenith, azimuth);
            proptest::prop_assert_eq!(cut.contains(&Vector3::new(x, y, z)), f < 1.0);
        }
    }
}
