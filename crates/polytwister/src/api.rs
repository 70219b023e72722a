//! Curated surface for the CLI and benches (UNSTABLE).
//!
//! Breaking changes are allowed; prefer these re-exports over deep paths.

// Catalog and tree model
pub use crate::tree::{all_specs, get_spec, Generators, Kind, Node, PolytwisterSpec, Shape};
// Queries
pub use crate::frames::{render_frames, Frame, FramePlan};
pub use crate::normalize::{compute_scale_and_extent, Normalization, Normalizer};
pub use crate::realize::{compute_section, Prepared, Realizer, SectionEngine};
// Parameters and results
pub use crate::error::{ConfigurationError, GeometryError, NormalizationError, SectionError};
pub use crate::mesh::Mesh;
pub use crate::params::{NormalizeParams, SectionParams};
