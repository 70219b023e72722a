//! Animation frame planning and batch rendering.
//!
//! Frame `i` of `n` sits at `w_i = −max_w + 2·max_w·(i + 1)/(n + 1)`, so the
//! sequence stays strictly inside the non-empty range and is symmetric about
//! `w = 0`.

use rayon::prelude::*;

use crate::cfg::MAX_FRAMES;
use crate::error::{ConfigurationError, SectionError};
use crate::mesh::Mesh;
use crate::realize::Realizer;
use crate::tree::PolytwisterSpec;

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub index: usize,
    pub w: f64,
    /// File stem, `out_` plus the zero-padded index.
    pub stem: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    max_w: f64,
    frames: Vec<Frame>,
}

impl FramePlan {
    pub fn new(num_frames: usize, max_w: f64) -> Result<Self, ConfigurationError> {
        if num_frames == 0 || num_frames > MAX_FRAMES {
            return Err(ConfigurationError::InvalidParams {
                field: "num_frames",
                reason: format!("must be in 1..={MAX_FRAMES}, got {num_frames}"),
            });
        }
        if !(max_w.is_finite() && max_w > 0.0) {
            return Err(ConfigurationError::InvalidParams {
                field: "max_w",
                reason: format!("must be finite and positive, got {max_w}"),
            });
        }
        let width = stem_width(num_frames);
        let denom = (num_frames + 1) as f64;
        let frames = (0..num_frames)
            .map(|index| Frame {
                index,
                w: -max_w + 2.0 * max_w * (index + 1) as f64 / denom,
                stem: format!("out_{index:0width$}"),
            })
            .collect();
        Ok(Self { max_w, frames })
    }

    pub fn max_w(&self) -> f64 {
        self.max_w
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// `stem.ext` for every frame, in order.
    pub fn file_names(&self, ext: &str) -> Vec<String> {
        self.frames
            .iter()
            .map(|f| format!("{}.{ext}", f.stem))
            .collect()
    }
}

/// `ceil(log10(n))` digits: enough for indices `0..n`.
fn stem_width(n: usize) -> usize {
    if n <= 1 {
        0
    } else {
        (n - 1).to_string().len()
    }
}

/// Sections of every frame, each scaled by `scale`, computed in parallel.
///
/// `spec` is prepared once and shared by all frames. Meshes come back in
/// frame order. If several frames fail, which error is returned is
/// unspecified.
pub fn render_frames<R>(
    realizer: &R,
    spec: &PolytwisterSpec,
    plan: &FramePlan,
    scale: f64,
) -> Result<Vec<Mesh>, SectionError>
where
    R: Realizer + Sync,
{
    let prepared = realizer.prepare(spec);
    plan.frames
        .par_iter()
        .map(|frame| {
            let mesh = prepared.section(frame.w)?;
            tracing::debug!(name = spec.name(), frame = frame.index, w = frame.w, "frame");
            Ok(mesh.scaled(scale))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SectionParams;
    use crate::realize::SectionEngine;
    use crate::tree::get_spec;
    use approx::assert_relative_eq;

    #[test]
    fn frames_are_symmetric_and_inside() {
        let plan = FramePlan::new(5, 2.0).unwrap();
        let ws: Vec<f64> = plan.frames().iter().map(|f| f.w).collect();
        assert_relative_eq!(ws[2], 0.0, epsilon = 1e-12);
        for (a, b) in ws.iter().zip(ws.iter().rev()) {
            assert_relative_eq!(*a, -*b, epsilon = 1e-12);
        }
        assert!(ws.iter().all(|w| w.abs() < 2.0));
        assert!(ws.windows(2).all(|p| p[0] < p[1]));
    }

    #[test]
    fn stems_are_zero_padded() {
        assert_eq!(FramePlan::new(1, 1.0).unwrap().frames()[0].stem, "out_0");
        let ten = FramePlan::new(10, 1.0).unwrap();
        assert_eq!(ten.frames()[9].stem, "out_9");
        let eleven = FramePlan::new(11, 1.0).unwrap();
        assert_eq!(eleven.frames()[3].stem, "out_03");
        let plan = FramePlan::new(1000, 1.0).unwrap();
        assert_eq!(plan.file_names("obj")[7], "out_007.obj");
        assert_eq!(plan.len(), 1000);
    }

    #[test]
    fn frame_count_is_bounded() {
        assert!(FramePlan::new(0, 1.0).is_err());
        assert!(FramePlan::new(MAX_FRAMES + 1, 1.0).is_err());
        assert!(FramePlan::new(MAX_FRAMES, 1.0).is_ok());
        assert!(FramePlan::new(3, f64::NAN).is_err());
    }

    #[test]
    fn parallel_render_matches_serial() {
        let params = SectionParams {
            resolution: 16,
            ..SectionParams::default()
        };
        let engine = SectionEngine::new(&params).unwrap();
        let spec = get_spec("soft octatwister").unwrap();
        let plan = FramePlan::new(4, 0.9).unwrap();
        let meshes = render_frames(&engine, &spec, &plan, 2.0).unwrap();
        assert_eq!(meshes.len(), 4);
        for (frame, mesh) in plan.frames().iter().zip(&meshes) {
            let serial = engine.section(&spec, frame.w).unwrap().scaled(2.0);
            assert_eq!(*mesh, serial);
        }
    }
}
