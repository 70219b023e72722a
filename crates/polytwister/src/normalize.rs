//! Spatial scale and non-empty `w` range of a polytwister.
//!
//! Algorithm
//! - `D(w)` is the largest vertex distance from the origin of the section at
//!   `w` (0 when empty). `scale = 1 / D(0)`.
//! - Grid search: starting at `w = 2·D(0)`, step by `+1` until `D(w) = 0`.
//! - Bisection between the last non-empty and the first empty `w` until the
//!   bracket is narrower than `bisection_tol`. `max_w` is the empty end.
//!
//! `D` is assumed to vanish for good once it vanishes. The optional dense
//! sampling pass looks beyond `max_w` for sections that contradict this and
//! restarts the bisection past them.
//!
//! All queries of one search go through a single [`Prepared`] spec, so
//! `w`-independent work (the soft 4D hulls) happens once per search.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cfg::VALIDITY_BOUND;
use crate::error::{ConfigurationError, NormalizationError, SectionError};
use crate::params::{NormalizeParams, SectionParams};
use crate::mesh::Mesh;
use crate::realize::{Prepared, Realizer, SectionEngine};
use crate::tree::PolytwisterSpec;

/// Result of normalization: multiply section coordinates by `scale`; sections
/// are empty for `|w| ≥ max_w`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Normalization {
    pub scale: f64,
    pub max_w: f64,
}

#[derive(Clone, Debug)]
pub struct Normalizer<R = SectionEngine> {
    realizer: R,
    params: NormalizeParams,
}

impl Normalizer<SectionEngine> {
    pub fn with_params(
        section: &SectionParams,
        params: &NormalizeParams,
    ) -> Result<Self, ConfigurationError> {
        params.validate()?;
        Ok(Self::new(SectionEngine::new(section)?, params))
    }
}

impl<R: Realizer + Sync> Normalizer<R> {
    pub fn new(realizer: R, params: &NormalizeParams) -> Self {
        Self {
            realizer,
            params: *params,
        }
    }

    pub fn realizer(&self) -> &R {
        &self.realizer
    }

    /// `D(w)`, rejecting sections that reach [`VALIDITY_BOUND`].
    pub fn extent(&self, spec: &PolytwisterSpec, w: f64) -> Result<f64, NormalizationError> {
        measure(spec.name(), &self.realizer.section(spec, w)?, w)
    }

    pub fn normalize(&self, spec: &PolytwisterSpec) -> Result<Normalization, NormalizationError> {
        let search = Search {
            name: spec.name(),
            section: self.realizer.prepare(spec),
            params: &self.params,
        };
        let d0 = search.extent(0.0)?;
        if d0 == 0.0 {
            return Err(NormalizationError::EmptyBase {
                name: spec.name().to_string(),
            });
        }
        let (lo, hi) = search.grid_search(0.0, 2.0 * d0)?;
        let mut max_w = search.bisect(lo, hi)?;
        if self.params.dense_samples > 0 {
            max_w = search.recheck(max_w)?;
        }
        debug!(name = spec.name(), scale = 1.0 / d0, max_w, "normalized");
        Ok(Normalization {
            scale: 1.0 / d0,
            max_w,
        })
    }
}

/// `D(w)` of `mesh`, rejecting sections that reach [`VALIDITY_BOUND`].
fn measure(name: &str, mesh: &Mesh, w: f64) -> Result<f64, NormalizationError> {
    let d = mesh.max_distance();
    debug!(name, w, extent = d, "extent");
    if d >= VALIDITY_BOUND {
        return Err(NormalizationError::UnboundedSection {
            name: name.to_string(),
            w,
            extent: d,
            bound: VALIDITY_BOUND,
        });
    }
    Ok(d)
}

/// One normalization run over a prepared spec.
struct Search<'a> {
    name: &'a str,
    section: Prepared<'a>,
    params: &'a NormalizeParams,
}

impl Search<'_> {
    fn extent(&self, w: f64) -> Result<f64, NormalizationError> {
        measure(self.name, &self.section.section(w)?, w)
    }

    /// First empty grid point from `start` on, with the non-empty point before
    /// it (`lo` if the first one is already empty).
    fn grid_search(&self, mut lo: f64, start: f64) -> Result<(f64, f64), NormalizationError> {
        let mut w = start;
        for step in 0..self.params.max_grid_steps {
            if self.extent(w)? == 0.0 {
                debug!(name = self.name, step, lo, hi = w, "grid search bracketed");
                return Ok((lo, w));
            }
            lo = w;
            w += 1.0;
        }
        Err(NormalizationError::GridSearchExhausted {
            name: self.name.to_string(),
            w: lo,
            steps: self.params.max_grid_steps,
        })
    }

    /// Shrink `[lo, hi]` (non-empty at `lo`, empty at `hi`) and return `hi`.
    fn bisect(&self, mut lo: f64, mut hi: f64) -> Result<f64, NormalizationError> {
        while hi - lo > self.params.bisection_tol {
            let mid = 0.5 * (lo + hi);
            if self.extent(mid)? == 0.0 {
                hi = mid;
            } else {
                lo = mid;
            }
            debug!(name = self.name, lo, hi, "bisection");
        }
        Ok(hi)
    }

    /// Sample `(max_w, 2·max_w]` densely; on a non-empty sample, bisect again
    /// from the farthest one. Repeats until the samples agree.
    fn recheck(&self, mut max_w: f64) -> Result<f64, NormalizationError> {
        let n = self.params.dense_samples;
        for _ in 0..self.params.max_grid_steps {
            let step = max_w / n as f64;
            let mut last_full = None;
            let mut first_empty_after = None;
            for i in 1..=n {
                let w = max_w + step * i as f64;
                if self.extent(w)? > 0.0 {
                    last_full = Some(w);
                    first_empty_after = None;
                } else if last_full.is_some() && first_empty_after.is_none() {
                    first_empty_after = Some(w);
                }
            }
            let Some(lo) = last_full else {
                return Ok(max_w);
            };
            warn!(
                name = self.name,
                max_w,
                w = lo,
                "non-empty section beyond the bisected bound, searching again"
            );
            let (lo, hi) = match first_empty_after {
                Some(hi) => (lo, hi),
                None => self.grid_search(lo, lo + 1.0)?,
            };
            max_w = self.bisect(lo, hi)?;
        }
        Err(NormalizationError::GridSearchExhausted {
            name: self.name.to_string(),
            w: max_w,
            steps: self.params.max_grid_steps,
        })
    }
}

/// Scale and `max_w` of `spec`.
pub fn compute_scale_and_extent(
    spec: &PolytwisterSpec,
    section: &SectionParams,
    params: &NormalizeParams,
) -> Result<Normalization, NormalizationError> {
    let normalizer = Normalizer::with_params(section, params)
        .map_err(|e| SectionError::configuration(spec.name(), 0.0, e))?;
    normalizer.normalize(spec)
}

#[cfg(test)]
mod tests;
