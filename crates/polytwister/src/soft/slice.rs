use nalgebra::{Vector3, Vector4};

use crate::cfg::WELD_EPS;
use crate::geom::util::{dedup_points_in_place, is_close};
use crate::hull::{hull3, Hull4D};
use crate::mesh::Mesh;

/// The six edges of a tetrahedron, as index pairs.
const EDGES: [(usize, usize); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];

/// Points where the hyperplane `w = const` meets the hull's boundary edges,
/// projected to xyz.
///
/// An edge is hit when `w1 ≤ w < w2` (or the mirror). An edge lying in the
/// hyperplane contributes both endpoints. Edges shared by several simplices
/// are visited once per simplex; points within `WELD_EPS` of an earlier
/// point are dropped afterwards.
pub fn slice_points(hull: &Hull4D, w: f64) -> Vec<Vector3<f64>> {
    let mut out = Vec::new();
    for simplex in &hull.simplices {
        for &(i, j) in &EDGES {
            let (p1, p2) = (&hull.points[simplex[i]], &hull.points[simplex[j]]);
            let (w1, w2) = (p1[3], p2[3]);
            let hit = (w1 <= w && w < w2) || (w2 <= w && w < w1);
            if !hit {
                continue;
            }
            if is_close(w1, w2) {
                out.push(p1.xyz());
                out.push(p2.xyz());
            } else {
                let t = (w - w1) / (w2 - w1);
                let p: Vector4<f64> = p1 + (p2 - p1) * t;
                out.push(p.xyz());
            }
        }
    }
    dedup_points_in_place(&mut out, WELD_EPS);
    out
}

/// Quarter turn in the yz-plane, `(x, y, z) ↦ (x, −z, y)`, so the
/// symmetry axis of the section ends up along `+y`.
#[inline]
pub fn stand_up(p: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(p.x, -p.z, p.y)
}

/// 3D cross-section of `hull` at `w`. Too few points, or points whose hull
/// is flat, give the empty mesh.
pub fn cross_section(hull: &Hull4D, w: f64) -> Mesh {
    let points = slice_points(hull, w);
    if points.len() < 4 {
        return Mesh::empty();
    }
    let standing: Vec<Vector3<f64>> = points.iter().map(stand_up).collect();
    hull3(&standing).unwrap_or_else(|e| {
        tracing::debug!(w, error = %e, "flat cross-section, treating as empty");
        Mesh::empty()
    })
}
