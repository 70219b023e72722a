//! One cross-section capability over both realization strategies.
//!
//! Callers (the normalizer, frame rendering, the CLI) hold a [`SectionEngine`]
//! and never branch on the spec's kind themselves.

use crate::error::{ConfigurationError, SectionError};
use crate::hard::HardRealizer;
use crate::mesh::Mesh;
use crate::params::SectionParams;
use crate::soft::SoftRealizer;
use crate::tree::{Kind, PolytwisterSpec};

/// Computes the 3D cross-section of a polytwister at `w`.
///
/// An empty [`Mesh`] means "no geometry at this `w`" and is not an error.
pub trait Realizer {
    fn handles(&self, kind: Kind) -> bool;
    fn section(&self, spec: &PolytwisterSpec, w: f64) -> Result<Mesh, SectionError>;

    /// Bind `spec` for repeated queries, doing its `w`-independent work once.
    ///
    /// `prepare(spec).section(w)` equals `section(spec, w)`. The default does
    /// no work up front.
    fn prepare<'a>(&'a self, spec: &'a PolytwisterSpec) -> Prepared<'a>
    where
        Self: Sized + Sync,
    {
        Prepared::new(move |w| self.section(spec, w))
    }
}

type SectionFn<'a> = dyn Fn(f64) -> Result<Mesh, SectionError> + Sync + 'a;

/// A spec bound to its realizer: `w ↦` cross-section.
pub struct Prepared<'a> {
    section: Box<SectionFn<'a>>,
}

impl<'a> Prepared<'a> {
    pub fn new<F>(section: F) -> Self
    where
        F: Fn(f64) -> Result<Mesh, SectionError> + Sync + 'a,
    {
        Self {
            section: Box::new(section),
        }
    }

    pub fn section(&self, w: f64) -> Result<Mesh, SectionError> {
        (self.section)(w)
    }
}

impl std::fmt::Debug for Prepared<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prepared").finish_non_exhaustive()
    }
}

/// Dispatches to the hard or soft realizer by [`PolytwisterSpec::kind`].
#[derive(Clone, Debug)]
pub struct SectionEngine {
    hard: HardRealizer,
    soft: SoftRealizer,
    params: SectionParams,
}

impl SectionEngine {
    pub fn new(params: &SectionParams) -> Result<Self, ConfigurationError> {
        params.validate()?;
        Ok(Self {
            hard: HardRealizer::with_params(params),
            soft: SoftRealizer::new(params),
            params: *params,
        })
    }

    pub fn params(&self) -> &SectionParams {
        &self.params
    }

    pub fn realizer_for(&self, kind: Kind) -> &dyn Realizer {
        match kind {
            Kind::Hard => &self.hard,
            Kind::Soft => &self.soft,
        }
    }
}

impl Realizer for SectionEngine {
    fn handles(&self, _kind: Kind) -> bool {
        true
    }

    fn section(&self, spec: &PolytwisterSpec, w: f64) -> Result<Mesh, SectionError> {
        self.realizer_for(spec.kind()).section(spec, w)
    }

    fn prepare<'a>(&'a self, spec: &'a PolytwisterSpec) -> Prepared<'a>
    where
        Self: Sized + Sync,
    {
        match spec.kind() {
            Kind::Hard => self.hard.prepare(spec),
            Kind::Soft => self.soft.prepare(spec),
        }
    }
}

/// Cross-section of `spec` at `w` with the given parameters.
pub fn compute_section(
    spec: &PolytwisterSpec,
    w: f64,
    params: &SectionParams,
) -> Result<Mesh, SectionError> {
    let engine =
        SectionEngine::new(params).map_err(|e| SectionError::configuration(spec.name(), w, e))?;
    engine.section(spec, w)
}
