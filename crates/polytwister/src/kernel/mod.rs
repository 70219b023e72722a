//! Boolean solid kernel.
//!
//! Purpose
//! - Turn cycloplane primitives into solids, combine them with Boolean
//!   operations, and tessellate the result into a [`Mesh`].
//!
//! Why this design (short)
//! - The hard realizer is generic over [`SolidKernel`], so the recursion and
//!   its empty-operand rules are independent of how solids are represented.
//! - [`CsgKernel`] is a thin adapter over `csgrs`: faceted cylinders,
//!   transforms and BSP Booleans come from the crate. This module only picks
//!   facet counts, checks the output stays finite, and welds the polygons
//!   into an indexed triangle [`Mesh`].
//!
//! Failure
//! - Kernel operations return `Err(KernelError)` instead of panicking; the
//!   caller decides whether a failure means "empty" or is fatal.


use csgrs::csg::CSG;
use nalgebra::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};

use crate::cfg::MESH_WELD_EPS;
use crate::cycloplane::Cylinder;
use crate::error::KernelError;
use crate::geom::translation;
use crate::geom::util::Welder;
use crate::mesh::Mesh;
use crate::params::SectionParams;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanOp {
    Intersection,
    Union,
    Difference,
}

/// A solid modeling backend.
pub trait SolidKernel {
    type Solid: Clone;

    fn empty(&self) -> Self::Solid;

    fn is_empty(&self, solid: &Self::Solid) -> bool;

    /// The canonical cylinder along `+z` (centered) mapped by its placement.
    fn cylinder(&self, cylinder: &Cylinder) -> Result<Self::Solid, KernelError>;

    fn transform(&self, solid: &Self::Solid, m: &Matrix4<f64>)
        -> Result<Self::Solid, KernelError>;

    /// `a ∩ b`, `a ∪ b` or `a \ b`. Both operands are non-empty.
    fn boolean(
        &self,
        op: BooleanOp,
        a: &Self::Solid,
        b: &Self::Solid,
    ) -> Result<Self::Solid, KernelError>;

    /// Group solids without merging them. The point set is their union.
    fn compound(&self, parts: Vec<Self::Solid>) -> Self::Solid;

    fn tessellate(&self, solid: &Self::Solid) -> Mesh;
}

/// A solid of [`CsgKernel`]: a `csgrs` polygon soup without metadata.
pub type CsgSolid = CSG<()>;

/// `csgrs`-backed kernel; facet density follows the section tolerances.
#[derive(Clone, Debug)]
pub struct CsgKernel {
    params: SectionParams,
}

impl CsgKernel {
    pub fn new(params: &SectionParams) -> Self {
        Self { params: *params }
    }

    /// Facets around a cylinder of `radius` after `placement`, which may
    /// stretch the cross-section.
    fn segments(&self, radius: f64, placement: &Matrix4<f64>) -> usize {
        let stretch = (0..2)
            .map(|j| placement.fixed_view::<3, 1>(0, j).norm())
            .fold(1.0, f64::max);
        self.params.cylinder_segments(radius * stretch)
    }
}

impl Default for CsgKernel {
    fn default() -> Self {
        Self::new(&SectionParams::default())
    }
}

/// `Err` if any vertex of `solid` left the finite range.
fn check_finite(solid: CsgSolid, op: &'static str) -> Result<CsgSolid, KernelError> {
    let finite = solid
        .polygons
        .iter()
        .flat_map(|p| &p.vertices)
        .all(|v| v.pos.coords.iter().all(|c| c.is_finite()));
    if finite {
        Ok(solid)
    } else {
        Err(KernelError::NonFinite(op))
    }
}

impl SolidKernel for CsgKernel {
    type Solid = CsgSolid;

    fn empty(&self) -> CsgSolid {
        CSG::new()
    }

    fn is_empty(&self, solid: &CsgSolid) -> bool {
        solid.polygons.is_empty()
    }

    fn cylinder(&self, cylinder: &Cylinder) -> Result<CsgSolid, KernelError> {
        if !(cylinder.radius > 0.0 && cylinder.height > 0.0) {
            return Ok(self.empty());
        }
        let n = self.segments(cylinder.radius, &cylinder.placement);
        // `csgrs` cylinders stand on the xy-plane; center them first.
        let standing = CSG::cylinder(cylinder.radius, cylinder.height, n, None);
        let centered =
            cylinder.placement * translation(Vector3::new(0.0, 0.0, -cylinder.height / 2.0));
        self.transform(&standing, &centered)
    }

    fn transform(&self, solid: &CsgSolid, m: &Matrix4<f64>) -> Result<CsgSolid, KernelError> {
        if !m.iter().all(|c| c.is_finite()) {
            return Err(KernelError::NonFinite("transform"));
        }
        let linear = m.fixed_view::<3, 3>(0, 0).determinant();
        if linear.abs() < f64::EPSILON {
            return Err(KernelError::SingularTransform(linear));
        }
        let mut out = solid.transform(m);
        if linear < 0.0 {
            for polygon in &mut out.polygons {
                polygon.flip();
            }
        }
        check_finite(out, "transform")
    }

    fn boolean(
        &self,
        op: BooleanOp,
        a: &CsgSolid,
        b: &CsgSolid,
    ) -> Result<CsgSolid, KernelError> {
        match op {
            BooleanOp::Intersection => check_finite(a.intersection(b), "intersection"),
            BooleanOp::Union => check_finite(a.union(b), "union"),
            BooleanOp::Difference => check_finite(a.difference(b), "difference"),
        }
    }

    fn compound(&self, parts: Vec<CsgSolid>) -> CsgSolid {
        let mut out: CsgSolid = CSG::new();
        for part in parts {
            out.polygons.extend(part.polygons);
        }
        out
    }

    /// Fan triangulation of every polygon, welded into shared vertices.
    /// Cylinder facets are convex and BSP splitting keeps them convex, so the
    /// fan keeps both the area and the outward winding.
    fn tessellate(&self, solid: &CsgSolid) -> Mesh {
        let mut welder = Welder::new(MESH_WELD_EPS);
        let mut faces = Vec::new();
        for polygon in &solid.polygons {
            let ids: Vec<usize> = polygon
                .vertices
                .iter()
                .map(|v| welder.insert(v.pos.coords))
                .collect();
            for pair in ids.windows(2).skip(1) {
                let tri = [ids[0], pair[0], pair[1]];
                if tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2] {
                    faces.push(tri);
                }
            }
        }
        Mesh::new(welder.into_points(), faces)
    }
}
