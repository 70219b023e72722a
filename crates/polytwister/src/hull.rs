//! Convex hulls in 3D and 4D.
//!
//! 4D hulls go through Qhull (`qhull`), triangulated so that every facet is a
//! tetrahedron; 3D hulls go through `chull`. Both wrappers return
//! [`HullError::Degenerate`] for inputs whose affine rank is too low, instead
//! of propagating the library's error type.

use chull::ConvexHullWrapper;
use nalgebra::{Vector3, Vector4};
use qhull::Qh;

use crate::error::HullError;
use crate::mesh::Mesh;

/// Boundary of a 4D convex hull: every simplex is a tetrahedron.
#[derive(Clone, Debug, PartialEq)]
pub struct Hull4D {
    pub points: Vec<Vector4<f64>>,
    pub simplices: Vec<[usize; 4]>,
}

fn convex_hull3(points: &[Vector3<f64>]) -> Result<(Vec<Vec<f64>>, Vec<usize>), HullError> {
    let degenerate = HullError::Degenerate {
        dim: 3,
        points: points.len(),
    };
    if points.len() <= 3 {
        return Err(degenerate);
    }
    let input: Vec<Vec<f64>> = points.iter().map(|p| vec![p.x, p.y, p.z]).collect();
    let hull = ConvexHullWrapper::try_new(&input, None).map_err(|_| degenerate.clone())?;
    let (vertices, indices) = hull.vertices_indices();
    if indices.is_empty() || indices.len() % 3 != 0 {
        return Err(degenerate);
    }
    Ok((vertices, indices))
}

/// Hull boundary of `points` as tetrahedra indexing into `points`.
pub fn hull4(points: &[Vector4<f64>]) -> Result<Hull4D, HullError> {
    let degenerate = || HullError::Degenerate {
        dim: 4,
        points: points.len(),
    };
    if points.len() <= 4 || points.iter().any(|p| !p.iter().all(|c| c.is_finite())) {
        return Err(degenerate());
    }
    let qh = Qh::builder()
        .compute(true)
        .triangulate(true)
        .build_from_iter(points.iter().map(|p| [p.x, p.y, p.z, p.w]))
        .map_err(|_| degenerate())?;
    let mut simplices = Vec::new();
    for facet in qh.simplices() {
        let ids = facet
            .vertices()
            .ok_or_else(degenerate)?
            .iter()
            .map(|v| v.index(&qh).ok_or_else(degenerate))
            .collect::<Result<Vec<usize>, HullError>>()?;
        let &[a, b, c, d] = ids.as_slice() else {
            return Err(degenerate());
        };
        simplices.push([a, b, c, d]);
    }
    if simplices.len() < 5 {
        return Err(degenerate());
    }
    Ok(Hull4D {
        points: points.to_vec(),
        simplices,
    })
}

pub fn hull3(points: &[Vector3<f64>]) -> Result<Mesh, HullError> {
    let (vertices, indices) = convex_hull3(points)?;
    Ok(Mesh::new(
        vertices
            .iter()
            .map(|v| Vector3::new(v[0], v[1], v[2]))
            .collect(),
        indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect(),
    ))
}
