//! Geometry primitives shared by both realizers.
//!
//! Purpose
//! - 3D affine maps (homogeneous `Matrix4`) for placing cycloplane primitives.
//! - Quaternion math for lifting points of the 2-sphere to Hopf fibers in R⁴.
//! - Small numeric helpers (closeness, point welding).
//!
//! Everything is `f64` and built on nalgebra.

pub mod quat;
pub mod rotation;
pub(crate) mod util;

pub use quat::{fiber_quaternion, fiber_rotation, quat_left_matrix, reference_fiber};
pub use rotation::{align_with_x, apply_affine, rotation_x, rotation_y, scaling, translation};
