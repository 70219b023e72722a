//! Hard realizer: exact Boolean evaluation of a cycloplane tree.
//!
//! Evaluation is a post-order walk. Every node yields a *list* of solids:
//! leaves and Boolean nodes yield one, `RotatedCopies` yields `n`, and a
//! parent splices its children's lists into its own operand list before
//! folding.
//!
//! Empty operands never reach the kernel:
//! - intersection: an empty operand makes the result empty;
//! - difference: an empty minuend gives empty, an empty subtrahend is skipped;
//! - union: empty operands are skipped.
//!
//! An intersection or difference stops evaluating its remaining operands as
//! soon as the running result is empty.
//!
//! A kernel failure inside an intersection is read as "the intersection is
//! empty"; inside a union or difference it is fatal.

use std::f64::consts::TAU;

use tracing::debug;

use crate::cycloplane;
use crate::error::{ConfigurationError, GeometryError, SectionError};
use crate::geom::rotation_y;
use crate::kernel::{BooleanOp, CsgKernel, SolidKernel};
use crate::mesh::Mesh;
use crate::params::SectionParams;
use crate::realize::Realizer;
use crate::tree::{Kind, Node, PolytwisterSpec, Shape};

#[derive(Clone, Debug)]
pub struct HardRealizer<K = CsgKernel> {
    kernel: K,
    params: SectionParams,
}

impl HardRealizer<CsgKernel> {
    /// `csgrs` kernel with facet density taken from `params`.
    pub fn with_params(params: &SectionParams) -> Self {
        Self::new(CsgKernel::new(params), params)
    }
}

impl<K: SolidKernel> HardRealizer<K> {
    pub fn new(kernel: K, params: &SectionParams) -> Self {
        Self {
            kernel,
            params: *params,
        }
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Solid cross-section of `tree` at `w`. The tree must be valid.
    pub fn realize(&self, tree: &Node, w: f64) -> Result<K::Solid, GeometryError> {
        debug!(w, leaves = tree.leaf_count(), "realize");
        let mut solids = self.eval(tree, w, true)?;
        if solids.len() == 1 {
            return Ok(solids.remove(0));
        }
        // A bare `RotatedCopies` root reads as the union of its copies.
        self.union(solids, true)
    }

    /// Realize and tessellate.
    pub fn mesh(&self, tree: &Node, w: f64) -> Result<Mesh, GeometryError> {
        let solid = self.realize(tree, w)?;
        Ok(self.kernel.tessellate(&solid))
    }

    fn eval(&self, node: &Node, w: f64, top: bool) -> Result<Vec<K::Solid>, GeometryError> {
        match node {
            Node::Cycloplane { zenith, azimuth } => {
                let solid = match cycloplane::section(w, *zenith, *azimuth).as_cylinder() {
                    Some(c) => self.kernel.cylinder(&c).map_err(GeometryError::Primitive)?,
                    None => self.kernel.empty(),
                };
                Ok(vec![solid])
            }
            Node::RotatedCopies { operand, order } => {
                let base = self.eval(operand, w, false)?;
                let mut out = Vec::with_capacity(base.len() * order);
                for i in 0..*order {
                    let r = rotation_y(i as f64 * TAU / *order as f64);
                    for solid in &base {
                        if i == 0 || self.kernel.is_empty(solid) {
                            out.push(solid.clone());
                        } else {
                            out.push(
                                self.kernel
                                    .transform(solid, &r)
                                    .map_err(GeometryError::Primitive)?,
                            );
                        }
                    }
                }
                Ok(out)
            }
            Node::Intersection { operands } => {
                let mut acc: Option<K::Solid> = None;
                for child in operands {
                    for operand in self.eval(child, w, false)? {
                        let next = match acc.take() {
                            None => operand,
                            Some(a) => self.intersect(a, operand),
                        };
                        if self.kernel.is_empty(&next) {
                            // Nothing can make an empty intersection non-empty.
                            return Ok(vec![next]);
                        }
                        acc = Some(next);
                    }
                }
                Ok(vec![acc.unwrap_or_else(|| self.kernel.empty())])
            }
            Node::Difference { operands } => {
                let mut acc: Option<K::Solid> = None;
                for child in operands {
                    for operand in self.eval(child, w, false)? {
                        let next = match acc.take() {
                            None => operand,
                            Some(a) if self.kernel.is_empty(&operand) => a,
                            Some(a) => self
                                .kernel
                                .boolean(BooleanOp::Difference, &a, &operand)
                                .map_err(|source| GeometryError::Kernel {
                                    op: BooleanOp::Difference,
                                    source,
                                })?,
                        };
                        if self.kernel.is_empty(&next) {
                            return Ok(vec![next]);
                        }
                        acc = Some(next);
                    }
                }
                Ok(vec![acc.unwrap_or_else(|| self.kernel.empty())])
            }
            Node::Union { operands } => {
                let mut all = Vec::new();
                for child in operands {
                    all.extend(self.eval(child, w, false)?);
                }
                Ok(vec![self.union(all, top)?])
            }
        }
    }

    fn intersect(&self, a: K::Solid, b: K::Solid) -> K::Solid {
        if self.kernel.is_empty(&a) || self.kernel.is_empty(&b) {
            return self.kernel.empty();
        }
        match self.kernel.boolean(BooleanOp::Intersection, &a, &b) {
            Ok(solid) => solid,
            Err(e) => {
                debug!(error = %e, "intersection failed, treating as empty");
                self.kernel.empty()
            }
        }
    }

    fn union(&self, operands: Vec<K::Solid>, top: bool) -> Result<K::Solid, GeometryError> {
        let parts: Vec<K::Solid> = operands
            .into_iter()
            .filter(|s| !self.kernel.is_empty(s))
            .collect();
        if parts.len() > 1 && top && self.params.group_top_level_union {
            return Ok(self.kernel.compound(parts));
        }
        let mut iter = parts.into_iter();
        let Some(mut acc) = iter.next() else {
            return Ok(self.kernel.empty());
        };
        for operand in iter {
            acc = self
                .kernel
                .boolean(BooleanOp::Union, &acc, &operand)
                .map_err(|source| GeometryError::Kernel {
                    op: BooleanOp::Union,
                    source,
                })?;
        }
        Ok(acc)
    }
}

impl<K: SolidKernel> Realizer for HardRealizer<K> {
    fn handles(&self, kind: Kind) -> bool {
        kind == Kind::Hard
    }

    fn section(&self, spec: &PolytwisterSpec, w: f64) -> Result<Mesh, SectionError> {
        let Shape::Hard { tree } = &spec.shape else {
            return Err(SectionError::configuration(
                spec.name(),
                w,
                ConfigurationError::WrongKind {
                    name: spec.name().to_string(),
                    expected: Kind::Hard,
                    actual: spec.kind(),
                },
            ));
        };
        tree.validate()
            .map_err(|e| SectionError::configuration(spec.name(), w, e))?;
        self.mesh(tree, w)
            .map_err(|e| SectionError::degenerate(spec.name(), w, e))
    }
}
