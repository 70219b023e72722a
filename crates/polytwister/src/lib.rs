//! Cross-sections of polytwisters: 4D solids bounded by cycloplanes.
//!
//! Layout
//! - `tree`: declarative node model and the named catalog.
//! - `cycloplane`: closed-form cross-section of one cycloplane at `w`.
//! - `kernel`: `SolidKernel` trait and the `csgrs` adapter behind it.
//! - `hard` / `soft`: the exact Boolean and the Hopf-hull realizers.
//! - `realize`: one `Realizer` capability over both.
//! - `normalize`: scale and non-empty `w` range.
//! - `frames`: animation frame plans and parallel rendering.
//!
//! API Policy
//! - This crate serves the `polytwister` CLI. There is no stable public API;
//!   [`api`] is the curated surface callers should import from.

pub mod api;
pub mod cfg;
pub mod cycloplane;
pub mod error;
pub mod frames;
pub mod geom;
pub mod hard;
pub mod hull;
pub mod kernel;
pub mod mesh;
pub mod normalize;
pub mod params;
pub mod realize;
pub mod soft;
pub mod tree;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use mesh::Mesh;
pub use nalgebra::{Vector3 as Vec3, Vector4 as Vec4};
pub use tree::{Kind, Node, PolytwisterSpec};
