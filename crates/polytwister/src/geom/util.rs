//! Small utilities: float closeness and point welding.

use std::collections::HashMap;

use nalgebra::Vector3;

use crate::cfg::{CLOSE_ABS, CLOSE_REL};

/// `|a − b| <= CLOSE_ABS + CLOSE_REL·|b|` (asymmetric, like the usual
/// "allclose" convention).
#[inline]
pub(crate) fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= CLOSE_ABS + CLOSE_REL * b.abs()
}

fn quantize3(v: &Vector3<f64>, tol: f64) -> (i64, i64, i64) {
    let s = 1.0 / tol;
    (
        (v[0] * s).floor() as i64,
        (v[1] * s).floor() as i64,
        (v[2] * s).floor() as i64,
    )
}

/// Incremental point welder on a grid of `tol`-sized cells.
///
/// A point within `tol` of an earlier one maps to that earlier index. Such a
/// point always sits in the same or an adjacent cell, so lookups scan the 27
/// neighboring cells and never depend on insertion order beyond "first wins".
#[derive(Debug)]
pub(crate) struct Welder {
    tol: f64,
    cells: HashMap<(i64, i64, i64), Vec<usize>>,
    points: Vec<Vector3<f64>>,
}

impl Welder {
    pub(crate) fn new(tol: f64) -> Self {
        Self {
            tol,
            cells: HashMap::new(),
            points: Vec::new(),
        }
    }

    /// Index of `p` among the welded points, adding it if nothing is close.
    pub(crate) fn insert(&mut self, p: Vector3<f64>) -> usize {
        let (x, y, z) = quantize3(&p, self.tol);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(ids) = self.cells.get(&(x + dx, y + dy, z + dz)) else {
                        continue;
                    };
                    if let Some(&id) = ids
                        .iter()
                        .find(|&&id| (self.points[id] - p).norm() <= self.tol)
                    {
                        return id;
                    }
                }
            }
        }
        let id = self.points.len();
        self.points.push(p);
        self.cells.entry((x, y, z)).or_default().push(id);
        id
    }

    pub(crate) fn into_points(self) -> Vec<Vector3<f64>> {
        self.points
    }
}

/// Drop every point within `tol` of an earlier one, keeping input order.
pub(crate) fn dedup_points_in_place(points: &mut Vec<Vector3<f64>>, tol: f64) {
    if points.len() < 2 {
        return;
    }
    let mut welder = Welder::new(tol);
    for p in points.drain(..) {
        welder.insert(p);
    }
    *points = welder.into_points();
}
