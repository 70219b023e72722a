//! Soft realizer: Hopf lift, 4D hull, hyperplane slice, 3D hull.
//!
//! Purpose
//! - Approximate a soft polytwister by the convex hull of the Hopf fibers
//!   over its generator points, and cut it at `w`.
//!
//! Why this design (short)
//! - The 4D hull depends only on the generators, never on `w`.
//!   [`Realizer::prepare`] builds it once and slices the same hulls at every
//!   `w`; the normalizer and frame rendering query through it.
//! - A compound spec is hulled piece by piece and the sections are merged by
//!   index offset, so the pieces may interpenetrate.
//!
//! Failure
//! - A 4D hull failure is independent of `w` and therefore fatal.
//! - A 3D hull failure on sliced points means the section is flat: empty.

mod lift;
mod slice;


pub use lift::{hopf_hull, lift};
pub use slice::{cross_section, slice_points, stand_up};

use nalgebra::Vector3;
use tracing::debug;

use crate::error::{ConfigurationError, GeometryError, HullError, SectionError};
use crate::hull::Hull4D;
use crate::mesh::Mesh;
use crate::params::SectionParams;
use crate::realize::{Prepared, Realizer};
use crate::tree::{Kind, PolytwisterSpec, Shape};

#[derive(Clone, Debug, Default)]
pub struct SoftRealizer {
    params: SectionParams,
}

impl SoftRealizer {
    pub fn new(params: &SectionParams) -> Self {
        Self { params: *params }
    }

    /// One 4D hull per generator group.
    pub fn hulls(&self, groups: &[&[Vector3<f64>]]) -> Result<Vec<Hull4D>, HullError> {
        groups
            .iter()
            .map(|g| hopf_hull(g, self.params.resolution))
            .collect()
    }

    /// Merge the non-empty sections of each hull at `w`.
    pub fn section_of(&self, hulls: &[Hull4D], w: f64) -> Mesh {
        let mut mesh = Mesh::empty();
        for hull in hulls {
            let piece = cross_section(hull, w);
            if !piece.is_empty() {
                mesh.merge(piece);
            }
        }
        mesh
    }

    /// Validated generators of `spec`, hulled per piece. Errors are reported
    /// at `w`.
    fn spec_hulls(&self, spec: &PolytwisterSpec, w: f64) -> Result<Vec<Hull4D>, SectionError> {
        let Shape::Soft { generators } = &spec.shape else {
            return Err(SectionError::configuration(
                spec.name(),
                w,
                ConfigurationError::WrongKind {
                    name: spec.name().to_string(),
                    expected: Kind::Soft,
                    actual: spec.kind(),
                },
            ));
        };
        generators
            .validate()
            .map_err(|e| SectionError::configuration(spec.name(), w, e))?;
        let hulls = self
            .hulls(&generators.groups())
            .map_err(|e| SectionError::degenerate(spec.name(), w, GeometryError::Hull(e)))?;
        debug!(name = spec.name(), pieces = hulls.len(), "4D hulls built");
        Ok(hulls)
    }
}

impl Realizer for SoftRealizer {
    fn handles(&self, kind: Kind) -> bool {
        kind == Kind::Soft
    }

    fn section(&self, spec: &PolytwisterSpec, w: f64) -> Result<Mesh, SectionError> {
        let hulls = self.spec_hulls(spec, w)?;
        Ok(self.section_of(&hulls, w))
    }

    fn prepare<'a>(&'a self, spec: &'a PolytwisterSpec) -> Prepared<'a>
    where
        Self: Sized + Sync,
    {
        let hulls = self.spec_hulls(spec, 0.0);
        Prepared::new(move |w| match &hulls {
            Ok(hulls) => Ok(self.section_of(hulls, w)),
            Err(e) => Err(e.clone().at(w)),
        })
    }
}
