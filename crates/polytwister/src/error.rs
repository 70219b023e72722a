//! Error types.
//!
//! Three classes matter to callers:
//! - [`ConfigurationError`]: a bad name, tree or parameter. Fatal, never retried.
//! - [`SectionError`]: a cross-section query failed. Carries the spec name and
//!   the `w` that triggered it.
//! - [`NormalizationError`]: the scale/extent search could not finish.
//!
//! An empty cross-section is *not* an error; it is an empty [`crate::Mesh`].

use thiserror::Error;

use crate::kernel::BooleanOp;
use crate::tree::Kind;

/// Invalid input, detected before any geometry is computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("unknown polytwister `{0}`")]
    NotFound(String),
    #[error("{node} node has no operands")]
    EmptyOperands { node: &'static str },
    #[error("rotated copies need order >= 2, got {0}")]
    BadOrder(usize),
    #[error("cycloplane angles must be finite (zenith {zenith}, azimuth {azimuth})")]
    NonFiniteAngle { zenith: f64, azimuth: f64 },
    #[error("soft spec has no generator points")]
    EmptyGenerators,
    #[error("generator point {index} has zero or non-finite length")]
    BadGenerator { index: usize },
    #[error("spec `{name}` is {actual:?}, this realizer handles {expected:?}")]
    WrongKind {
        name: String,
        expected: Kind,
        actual: Kind,
    },
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParams { field: &'static str, reason: String },
}

/// Failure inside the Boolean solid kernel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    #[error("transform is singular (linear determinant {0})")]
    SingularTransform(f64),
    #[error("non-finite coordinate produced by {0}")]
    NonFinite(&'static str),
}

/// Failure of the convex hull collaborator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HullError {
    #[error("degenerate input: hull of {points} points in {dim}D")]
    Degenerate { dim: usize, points: usize },
}

/// Geometry that could not be realized on non-empty input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("kernel {op:?} failed: {source}")]
    Kernel {
        op: BooleanOp,
        #[source]
        source: KernelError,
    },
    #[error("kernel could not build a primitive: {0}")]
    Primitive(#[source] KernelError),
    #[error("4D hull failed: {0}")]
    Hull(#[from] HullError),
}

/// A cross-section query failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SectionError {
    #[error("`{name}` at w = {w}: {source}")]
    Configuration {
        name: String,
        w: f64,
        #[source]
        source: ConfigurationError,
    },
    #[error("`{name}` at w = {w}: degenerate geometry: {source}")]
    DegenerateGeometry {
        name: String,
        w: f64,
        #[source]
        source: GeometryError,
    },
}

impl SectionError {
    pub fn configuration(name: &str, w: f64, source: ConfigurationError) -> Self {
        Self::Configuration {
            name: name.to_string(),
            w,
            source,
        }
    }

    pub fn degenerate(name: &str, w: f64, source: GeometryError) -> Self {
        Self::DegenerateGeometry {
            name: name.to_string(),
            w,
            source,
        }
    }

    /// The same failure, reported for the query at `w`.
    pub fn at(mut self, w: f64) -> Self {
        match &mut self {
            Self::Configuration { w: at, .. } | Self::DegenerateGeometry { w: at, .. } => *at = w,
        }
        self
    }
}

/// The scale/max-`w` search failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizationError {
    #[error("`{name}`: cross-section at w = 0 is empty, the base spec is malformed")]
    EmptyBase { name: String },
    #[error("`{name}`: no empty cross-section up to w = {w} after {steps} grid steps")]
    GridSearchExhausted { name: String, w: f64, steps: usize },
    #[error("`{name}` at w = {w}: extent {extent} reaches the validity bound {bound}")]
    UnboundedSection {
        name: String,
        w: f64,
        extent: f64,
        bound: f64,
    },
    #[error(transparent)]
    Section(#[from] SectionError),
}
