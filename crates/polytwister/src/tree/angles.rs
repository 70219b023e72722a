//! Zenith angles of the Platonic solids and the cycloplane rings built on them.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use nalgebra::Vector3;

use super::Node;

/// Golden ratio.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Angle `a–center–b` in radians, by the law of cosines.
pub fn vertex_angle(a: &Vector3<f64>, center: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let opposite_a = (b - center).norm_squared();
    let opposite_b = (a - center).norm_squared();
    let opposite_c = (a - b).norm_squared();
    let cos = (opposite_a + opposite_b - opposite_c) / (2.0 * (opposite_a * opposite_b).sqrt());
    cos.clamp(-1.0, 1.0).acos()
}

/// Zenith angles, each measured at the center of a Platonic solid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlatonicAngles {
    /// Between two vertices of a tetrahedron (vertex-center-vertex angle).
    pub tetrahedron: f64,
    /// Between a vertex of an octahedron and the center of an adjacent face.
    pub octahedron: f64,
    /// Between the centers of two adjacent faces of a dodecahedron.
    pub dodecahedron: f64,
    /// Between an icosahedron face center and one of its three nearest vertices.
    pub icosahedron_1: f64,
    /// Same face center and one of the three second-nearest vertices.
    pub icosahedron_2: f64,
}

impl PlatonicAngles {
    pub fn new() -> Self {
        let o = Vector3::zeros();
        let v = Vector3::new;
        Self {
            tetrahedron: vertex_angle(&v(1.0, 1.0, 1.0), &o, &v(1.0, -1.0, -1.0)),
            octahedron: vertex_angle(&v(1.0, 0.0, 0.0), &o, &v(1.0, 1.0, 1.0)),
            dodecahedron: vertex_angle(&v(0.0, 1.0, PHI), &o, &v(0.0, -1.0, PHI)),
            icosahedron_1: vertex_angle(&v(1.0, 1.0, 1.0), &o, &v(0.0, 1.0, PHI)),
            icosahedron_2: vertex_angle(&v(1.0, 1.0, 1.0), &o, &v(0.0, -1.0, PHI)),
        }
    }
}

impl Default for PlatonicAngles {
    fn default() -> Self {
        Self::new()
    }
}

/// The rings of cycloplanes shared by the hard catalog.
///
/// Indexing follows azimuth: entry `i` of a north ring sits at `i·2π/n`, entry
/// `i` of a dodecahedral/icosahedral south ring at `(i + ½)·2π/5`.
#[derive(Clone, Debug)]
pub struct Rings {
    pub tetrahedron_north: Vec<Node>,
    pub cube_equator: Vec<Node>,
    pub octahedron_north: Vec<Node>,
    pub octahedron_south: Vec<Node>,
    pub dodecahedron_north: Vec<Node>,
    pub dodecahedron_south: Vec<Node>,
    pub icosahedron_north_1: Vec<Node>,
    pub icosahedron_north_2: Vec<Node>,
    pub icosahedron_south_1: Vec<Node>,
    pub icosahedron_south_2: Vec<Node>,
}

impl Rings {
    pub fn new(angles: &PlatonicAngles) -> Self {
        let ring = |n: usize, zenith: f64, offset: f64| -> Vec<Node> {
            (0..n)
                .map(|i| Node::cycloplane(zenith, (i as f64 + offset) * TAU / n as f64))
                .collect()
        };
        Self {
            tetrahedron_north: ring(3, PI - angles.tetrahedron, 0.0),
            cube_equator: ring(4, FRAC_PI_2, 0.0),
            octahedron_north: ring(4, angles.octahedron, 0.0),
            octahedron_south: ring(4, PI - angles.octahedron, 0.0),
            dodecahedron_north: ring(5, angles.dodecahedron, 0.0),
            dodecahedron_south: ring(5, PI - angles.dodecahedron, 0.5),
            icosahedron_north_1: ring(5, angles.icosahedron_1, 0.0),
            icosahedron_north_2: ring(5, angles.icosahedron_2, 0.0),
            icosahedron_south_1: ring(5, PI - angles.icosahedron_1, 0.5),
            icosahedron_south_2: ring(5, PI - angles.icosahedron_2, 0.5),
        }
    }
}
