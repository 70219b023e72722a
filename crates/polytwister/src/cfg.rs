//! Tolerance and extent defaults.
//!
//! Policy
//! - Numerical thresholds are fixed constants so call sites never juggle
//!   tolerances. Knobs that callers legitimately tune (tessellation density,
//!   Hopf fiber resolution, search tolerances) live in [`crate::params`].

/// Finite stand-in for an infinite extent: the length of every cycloplane
/// cylinder and the radius of the south-pole slab.
///
/// Validity bound: every cross-section the catalog produces must stay within
/// [`VALIDITY_BOUND`] of the origin. A section that reaches it has touched the
/// artificial cap, so its extent is meaningless.
pub const LARGE: f64 = 100.0;

/// Half of [`LARGE`]; see the validity bound above.
pub const VALIDITY_BOUND: f64 = LARGE / 2.0;

/// Window in half-zenith `θ` around `π/2` inside which a cycloplane is treated
/// as the south-pole slab.
pub(crate) const POLE_EPS: f64 = 1e-3;

/// Absolute/relative tolerances of the "close to" test used by the Hopf lift
/// (antipode detection) and the slicer (edges lying inside the hyperplane).
pub(crate) const CLOSE_ABS: f64 = 1e-8;
pub(crate) const CLOSE_REL: f64 = 1e-5;

/// Distance below which two emitted points are welded together.
pub(crate) const WELD_EPS: f64 = 1e-9;

/// Distance below which kernel output vertices share one mesh index.
pub(crate) const MESH_WELD_EPS: f64 = 1e-5;

/// Upper bound on animation frames accepted by a frame plan.
pub const MAX_FRAMES: usize = 10_000;
