//! Soft catalog: generator point sets on the unit 2-sphere.

use std::f64::consts::TAU;

use nalgebra::Vector3;

use super::{PolytwisterSpec, PHI};
use crate::geom::align_with_x;

const PHI1: f64 = PHI + 1.0;

fn tetrahedron() -> Vec<Vector3<f64>> {
    vec![
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(-1.0, -1.0, 1.0),
        Vector3::new(1.0, -1.0, -1.0),
        Vector3::new(-1.0, 1.0, -1.0),
    ]
}

/// The tetrahedron inscribed in the cube opposite to [`tetrahedron`].
fn dual_tetrahedron() -> Vec<Vector3<f64>> {
    tetrahedron().into_iter().map(|v| -v).collect()
}

fn cube() -> Vec<Vector3<f64>> {
    let mut out = Vec::with_capacity(8);
    for x in [1.0, -1.0] {
        for y in [1.0, -1.0] {
            for z in [1.0, -1.0] {
                out.push(Vector3::new(x, y, z));
            }
        }
    }
    out
}

fn octahedron() -> Vec<Vector3<f64>> {
    vec![
        Vector3::x(),
        -Vector3::x(),
        Vector3::y(),
        -Vector3::y(),
        Vector3::z(),
        -Vector3::z(),
    ]
}

/// Cyclic permutations of `(0, ±a, ±b)`, ordered as `(0,a,b), (0,a,−b), ...`.
fn cyclic_golden(a: f64, b: f64) -> Vec<Vector3<f64>> {
    let signs = [(1.0, 1.0), (1.0, -1.0), (-1.0, 1.0), (-1.0, -1.0)];
    let mut out = Vec::with_capacity(12);
    out.extend(signs.iter().map(|(s, t)| Vector3::new(0.0, s * a, t * b)));
    out.extend(signs.iter().map(|(s, t)| Vector3::new(s * a, t * b, 0.0)));
    out.extend(signs.iter().map(|(s, t)| Vector3::new(s * b, 0.0, t * a)));
    out
}

fn dodecahedron() -> Vec<Vector3<f64>> {
    let mut out = cube();
    out.extend(cyclic_golden(1.0, PHI1));
    out
}

/// Center of one dodecahedron face: the mean of its five vertices.
fn dodecahedron_face_center() -> Vector3<f64> {
    let face = [
        Vector3::new(0.0, 1.0, PHI1),
        Vector3::new(0.0, -1.0, PHI1),
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(1.0, -1.0, 1.0),
        Vector3::new(PHI1, 0.0, 1.0),
    ];
    face.iter().sum::<Vector3<f64>>() / face.len() as f64
}

fn icosahedron() -> Vec<Vector3<f64>> {
    cyclic_golden(1.0, PHI)
}

fn normalized(points: Vec<Vector3<f64>>) -> Vec<Vector3<f64>> {
    points.into_iter().map(|p| p.normalize()).collect()
}

/// Rotate `points` so that `reference` lands on `+x`.
fn oriented(reference: &Vector3<f64>, points: Vec<Vector3<f64>>) -> Vec<Vector3<f64>> {
    match align_with_x(reference) {
        Some(m) => points.into_iter().map(|p| m * p).collect(),
        None => points,
    }
}

pub(super) fn soft_dyadic_twister(n: usize, special_names: &[&str]) -> PolytwisterSpec {
    let names = special_names
        .iter()
        .map(|s| s.to_string())
        .chain(std::iter::once(format!("order-{n} soft dyadic twister")));
    let points = (0..n)
        .map(|i| {
            let t = TAU * i as f64 / n as f64;
            Vector3::new(0.0, t.cos(), t.sin())
        })
        .collect();
    PolytwisterSpec::soft(names, points)
}

pub(super) fn soft_tetratwister() -> PolytwisterSpec {
    let points = normalized(tetrahedron());
    let reference = points[0];
    PolytwisterSpec::soft(["soft tetratwister"], oriented(&reference, points))
}

pub(super) fn soft_cubetwister() -> PolytwisterSpec {
    PolytwisterSpec::soft(["soft cubetwister"], normalized(cube()))
}

pub(super) fn soft_octatwister() -> PolytwisterSpec {
    PolytwisterSpec::soft(["soft octatwister"], normalized(octahedron()))
}

pub(super) fn soft_dodecatwister() -> PolytwisterSpec {
    let points = normalized(dodecahedron());
    PolytwisterSpec::soft(
        ["soft dodecatwister"],
        oriented(&dodecahedron_face_center(), points),
    )
}

pub(super) fn soft_icosatwister() -> PolytwisterSpec {
    let points = normalized(icosahedron());
    let reference = points[0];
    PolytwisterSpec::soft(["soft icosatwister"], oriented(&reference, points))
}

/// Two interpenetrating soft tetratwisters, one per tetrahedron of the
/// stella octangula, realized as separate pieces.
pub(super) fn soft_stella_octangula() -> PolytwisterSpec {
    PolytwisterSpec::compound(
        ["soft stella octangula", "compound of two soft tetratwisters"],
        vec![normalized(tetrahedron()), normalized(dual_tetrahedron())],
    )
}
