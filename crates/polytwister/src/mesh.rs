//! Triangle mesh: the output of both realizers.

use std::io::{self, Write};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Indexed triangle mesh. Zero vertices means "no geometry at this `w`".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vector3<f64>>,
    pub faces: Vec<[usize; 3]>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vector3<f64>>, faces: Vec<[usize; 3]>) -> Self {
        Self { vertices, faces }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Largest distance of a vertex from the origin; 0 for the empty mesh.
    pub fn max_distance(&self) -> f64 {
        self.vertices.iter().map(|v| v.norm()).fold(0.0, f64::max)
    }

    /// `max_v v·dir`, or `None` for the empty mesh.
    pub fn support(&self, dir: &Vector3<f64>) -> Option<f64> {
        self.vertices.iter().map(|v| v.dot(dir)).reduce(f64::max)
    }

    pub fn scaled(mut self, factor: f64) -> Self {
        for v in &mut self.vertices {
            *v *= factor;
        }
        self
    }

    /// Rescale so the farthest vertex sits at distance 1. Empty stays empty.
    pub fn normalized(self) -> Self {
        let d = self.max_distance();
        if d > 0.0 {
            self.scaled(1.0 / d)
        } else {
            self
        }
    }

    /// Append `other`, offsetting its face indices past our vertices.
    pub fn merge(&mut self, other: Mesh) {
        let offset = self.vertices.len();
        self.vertices.extend(other.vertices);
        self.faces.extend(
            other
                .faces
                .into_iter()
                .map(|[a, b, c]| [a + offset, b + offset, c + offset]),
        );
    }

    /// Wavefront OBJ: `v x y z` lines followed by 1-based `f a b c` lines.
    pub fn write_obj<W: Write>(&self, mut out: W) -> io::Result<()> {
        for v in &self.vertices {
            writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
        }
        for [a, b, c] in &self.faces {
            writeln!(out, "f {} {} {}", a + 1, b + 1, c + 1)?;
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle(offset: f64) -> Mesh {
        Mesh::new(
            vec![
                Vector3::new(offset, 0.0, 0.0),
                Vector3::new(offset, 2.0, 0.0),
                Vector3::new(offset, 0.0, 2.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn merge_offsets_faces() {
        let mut m = triangle(0.0);
        m.merge(triangle(1.0));
        assert_eq!(m.vertices.len(), 6);
        assert_eq!(m.faces, vec![[0, 1, 2], [3, 4, 5]]);
    }

    #[test]
    fn normalized_has_unit_extent() {
        let m = triangle(0.0).normalized();
        assert_relative_eq!(m.max_distance(), 1.0, epsilon = 1e-12);
        assert!(Mesh::empty().normalized().is_empty());
    }

    #[test]
    fn support_of_empty_is_none() {
        assert_eq!(Mesh::empty().support(&Vector3::x()), None);
        assert_relative_eq!(triangle(0.0).support(&Vector3::y()).unwrap(), 2.0);
    }

    #[test]
    fn obj_uses_one_based_faces() {
        let mut buf = Vec::new();
        triangle(0.0).write_obj(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert_eq!(text.lines().last(), Some("f 1 2 3"));
        assert!(text.starts_with("v 0 0 0\n"));
    }
}
