//! Polytwister tree model and catalog.
//!
//! Purpose
//! - Describe a polytwister declaratively: either a Boolean tree of
//!   cycloplanes (hard) or a set of generator points on the 2-sphere (soft).
//! - Provide the named catalog built from Platonic-solid symmetry angles.
//!
//! Why this design (short)
//! - `Node` is a closed enum; evaluation matches exhaustively, so an unknown
//!   node kind cannot reach a realizer.
//! - Specs are plain data (serde) so they can be dumped as JSON and reloaded
//!   by other tools.
//! - Structural invariants that the type system does not encode (non-empty
//!   operand lists, `order ≥ 2`, finite angles) are checked by `validate()`.
//!
//! Conventions
//! - Zenith is measured from the north pole `(0, 0)`; the south pole is
//!   `(π, 0)`. Azimuth is the longitude about the symmetry axis `+y` of the
//!   cross-section.
//! - `Difference` subtracts operands 2.. from operand 1, left to right.

mod angles;
mod catalog;
mod hard;
mod soft;

#[cfg(test)]
mod tests;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

pub use angles::{vertex_angle, PlatonicAngles, Rings, PHI};
pub use catalog::{all_specs, get_spec, normalize_name};

/// Node of a hard polytwister tree. Leaves are always `Cycloplane`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Cycloplane { zenith: f64, azimuth: f64 },
    RotatedCopies { operand: Box<Node>, order: usize },
    Intersection { operands: Vec<Node> },
    Union { operands: Vec<Node> },
    Difference { operands: Vec<Node> },
}

impl Node {
    #[inline]
    pub fn cycloplane(zenith: f64, azimuth: f64) -> Self {
        Node::Cycloplane { zenith, azimuth }
    }

    pub fn north_pole() -> Self {
        Node::cycloplane(0.0, 0.0)
    }

    pub fn south_pole() -> Self {
        Node::cycloplane(std::f64::consts::PI, 0.0)
    }

    pub fn rotated_copies(operand: Node, order: usize) -> Self {
        Node::RotatedCopies {
            operand: Box::new(operand),
            order,
        }
    }

    pub fn intersection<I: IntoIterator<Item = Node>>(operands: I) -> Self {
        Node::Intersection {
            operands: operands.into_iter().collect(),
        }
    }

    pub fn union<I: IntoIterator<Item = Node>>(operands: I) -> Self {
        Node::Union {
            operands: operands.into_iter().collect(),
        }
    }

    pub fn difference<I: IntoIterator<Item = Node>>(operands: I) -> Self {
        Node::Difference {
            operands: operands.into_iter().collect(),
        }
    }

    /// Short lowercase tag, as used in the serialized form.
    pub fn tag(&self) -> &'static str {
        match self {
            Node::Cycloplane { .. } => "cycloplane",
            Node::RotatedCopies { .. } => "rotated_copies",
            Node::Intersection { .. } => "intersection",
            Node::Union { .. } => "union",
            Node::Difference { .. } => "difference",
        }
    }

    /// Check the invariants the enum cannot express, recursively.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match self {
            Node::Cycloplane { zenith, azimuth } => {
                if zenith.is_finite() && azimuth.is_finite() {
                    Ok(())
                } else {
                    Err(ConfigurationError::NonFiniteAngle {
                        zenith: *zenith,
                        azimuth: *azimuth,
                    })
                }
            }
            Node::RotatedCopies { operand, order } => {
                if *order < 2 {
                    return Err(ConfigurationError::BadOrder(*order));
                }
                operand.validate()
            }
            Node::Intersection { operands }
            | Node::Union { operands }
            | Node::Difference { operands } => {
                if operands.is_empty() {
                    return Err(ConfigurationError::EmptyOperands { node: self.tag() });
                }
                operands.iter().try_for_each(Node::validate)
            }
        }
    }

    /// Number of cycloplane leaves, counting rotated copies once.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Cycloplane { .. } => 1,
            Node::RotatedCopies { operand, .. } => operand.leaf_count(),
            Node::Intersection { operands }
            | Node::Union { operands }
            | Node::Difference { operands } => operands.iter().map(Node::leaf_count).sum(),
        }
    }
}

/// Which realizer handles a spec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Hard,
    Soft,
}

/// Generator points of a soft polytwister.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Generators {
    /// One point set, hulled as a whole.
    Points(Vec<Vector3<f64>>),
    /// Compound: each group is hulled and sliced on its own, then merged.
    Pieces(Vec<Vec<Vector3<f64>>>),
}

impl Generators {
    /// Point groups in realization order (one group unless compound).
    pub fn groups(&self) -> Vec<&[Vector3<f64>]> {
        match self {
            Generators::Points(points) => vec![points.as_slice()],
            Generators::Pieces(pieces) => pieces.iter().map(Vec::as_slice).collect(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let groups = self.groups();
        if groups.is_empty() || groups.iter().any(|g| g.is_empty()) {
            return Err(ConfigurationError::EmptyGenerators);
        }
        for (index, p) in groups.iter().flat_map(|g| g.iter()).enumerate() {
            let r = p.norm();
            if !(r.is_finite() && r > 0.0) {
                return Err(ConfigurationError::BadGenerator { index });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Hard { tree: Node },
    Soft { generators: Generators },
}

/// A named polytwister. `names[0]` is canonical, the rest are aliases.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolytwisterSpec {
    pub names: Vec<String>,
    #[serde(flatten)]
    pub shape: Shape,
}

impl PolytwisterSpec {
    pub fn hard<S: Into<String>>(names: impl IntoIterator<Item = S>, tree: Node) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            shape: Shape::Hard { tree },
        }
    }

    pub fn soft<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
        points: Vec<Vector3<f64>>,
    ) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            shape: Shape::Soft {
                generators: Generators::Points(points),
            },
        }
    }

    pub fn compound<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
        pieces: Vec<Vec<Vector3<f64>>>,
    ) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            shape: Shape::Soft {
                generators: Generators::Pieces(pieces),
            },
        }
    }

    /// Canonical name (empty string for an unnamed spec).
    pub fn name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or("")
    }

    pub fn kind(&self) -> Kind {
        match self.shape {
            Shape::Hard { .. } => Kind::Hard,
            Shape::Soft { .. } => Kind::Soft,
        }
    }

    /// True if `name` is one of this spec's names (underscores read as spaces).
    pub fn answers_to(&self, name: &str) -> bool {
        let wanted = normalize_name(name);
        self.names.iter().any(|n| *n == wanted)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match &self.shape {
            Shape::Hard { tree } => tree.validate(),
            Shape::Soft { generators } => generators.validate(),
        }
    }
}
