//! Tunable parameters of a cross-section query and of normalization.
//!
//! Both structs are plain serde data with `#[serde(default)]`, so a partial
//! JSON object (`{"resolution": 50}`) overrides only the named fields.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionParams {
    /// Maximum chord sagitta of a tessellated cylinder (hard path).
    pub linear_tol: f64,
    /// Maximum angle subtended by one cylinder facet, radians (hard path).
    pub angular_tol: f64,
    /// Points per Hopf fiber (soft path).
    pub resolution: usize,
    /// Group the spliced operands of a top-level union into one compound
    /// instead of folding them with Boolean unions (hard path).
    pub group_top_level_union: bool,
}

impl Default for SectionParams {
    fn default() -> Self {
        Self {
            linear_tol: 0.1,
            angular_tol: 0.1,
            resolution: 100,
            group_top_level_union: true,
        }
    }
}

impl SectionParams {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        positive("linear_tol", self.linear_tol)?;
        positive("angular_tol", self.angular_tol)?;
        if self.resolution < 3 {
            return Err(ConfigurationError::InvalidParams {
                field: "resolution",
                reason: format!("need at least 3 points per fiber, got {}", self.resolution),
            });
        }
        Ok(())
    }

    /// Number of facets around a cylinder of radius `radius`.
    ///
    /// The smallest `n ≥ 3` meeting both tolerances: `2π/n ≤ angular_tol`
    /// and `radius·(1 − cos(π/n)) ≤ linear_tol`.
    pub fn cylinder_segments(&self, radius: f64) -> usize {
        let angular = (std::f64::consts::TAU / self.angular_tol).ceil();
        let linear = if self.linear_tol >= radius {
            3.0
        } else {
            (std::f64::consts::PI / (1.0 - self.linear_tol / radius).acos()).ceil()
        };
        angular.max(linear).max(3.0) as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeParams {
    /// Stop bisecting once the bracket is narrower than this.
    pub bisection_tol: f64,
    /// Cap on `+1` steps of the grid search.
    pub max_grid_steps: usize,
    /// Number of extra samples beyond `max_w` checked for emptiness (0 = off).
    pub dense_samples: usize,
}

impl Default for NormalizeParams {
    fn default() -> Self {
        Self {
            bisection_tol: 0.01,
            max_grid_steps: 64,
            dense_samples: 0,
        }
    }
}

impl NormalizeParams {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        positive("bisection_tol", self.bisection_tol)?;
        if self.max_grid_steps == 0 {
            return Err(ConfigurationError::InvalidParams {
                field: "max_grid_steps",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidParams {
            field,
            reason: format!("must be finite and positive, got {value}"),
        })
    }
}
