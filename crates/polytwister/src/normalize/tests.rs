use std::sync::atomic::{AtomicUsize, Ordering};

use nalgebra::Vector3;

use super::*;
use crate::mesh::Mesh;
use crate::tree::{all_specs, get_spec, Kind, Node};

/// Realizer whose section at `w` is a tetrahedron of circumradius `profile(|w|)`.
struct Profile(fn(f64) -> f64);

impl Realizer for Profile {
    fn handles(&self, _kind: Kind) -> bool {
        true
    }

    fn section(&self, _spec: &PolytwisterSpec, w: f64) -> Result<Mesh, SectionError> {
        let r = (self.0)(w.abs());
        if r <= 0.0 {
            return Ok(Mesh::empty());
        }
        let s = 1.0 / 3.0f64.sqrt();
        let vertices = vec![
            Vector3::new(s, s, s),
            Vector3::new(s, -s, -s),
            Vector3::new(-s, s, -s),
            Vector3::new(-s, -s, s),
        ];
        let faces = vec![[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]];
        Ok(Mesh::new(vertices, faces).scaled(r))
    }
}

fn dummy() -> PolytwisterSpec {
    PolytwisterSpec::hard(["dummy"], Node::north_pole())
}

fn coarse() -> SectionParams {
    SectionParams {
        angular_tol: 0.5,
        resolution: 16,
        ..SectionParams::default()
    }
}

#[test]
fn bisection_brackets_the_boundary() {
    // Non-empty exactly for |w| < 5.
    let n = Normalizer::new(Profile(|w| 1.0 - (w / 5.0).powi(2)), &NormalizeParams::default());
    let out = n.normalize(&dummy()).unwrap();
    assert_eq!(out.scale, 1.0);
    assert!(out.max_w >= 5.0 && out.max_w - 5.0 <= 0.01, "{out:?}");
}

#[test]
fn dense_sampling_finds_detached_piece() {
    // Empty gap on [3, 3.5), then a piece up to 4.2.
    fn gap(w: f64) -> f64 {
        if w < 3.0 || (3.5..4.2).contains(&w) {
            1.0
        } else {
            0.0
        }
    }
    let plain = Normalizer::new(Profile(gap), &NormalizeParams::default());
    let max_w = plain.normalize(&dummy()).unwrap().max_w;
    assert!((3.0..3.01).contains(&max_w), "{max_w}");

    let dense = Normalizer::new(
        Profile(gap),
        &NormalizeParams {
            dense_samples: 20,
            ..NormalizeParams::default()
        },
    );
    let max_w = dense.normalize(&dummy()).unwrap().max_w;
    assert!((4.2..4.21).contains(&max_w), "{max_w}");
}

#[test]
fn empty_base_is_fatal() {
    let n = Normalizer::new(Profile(|_| 0.0), &NormalizeParams::default());
    assert!(matches!(
        n.normalize(&dummy()),
        Err(NormalizationError::EmptyBase { .. })
    ));
}

#[test]
fn grid_search_is_capped() {
    let n = Normalizer::new(
        Profile(|_| 1.0),
        &NormalizeParams {
            max_grid_steps: 3,
            ..NormalizeParams::default()
        },
    );
    assert!(matches!(
        n.normalize(&dummy()),
        Err(NormalizationError::GridSearchExhausted { steps: 3, .. })
    ));
}

#[test]
fn lone_cycloplane_is_unbounded() {
    // An uncut cylinder reaches the artificial cap at w = 0.
    let n = Normalizer::with_params(&coarse(), &NormalizeParams::default()).unwrap();
    let err = n.normalize(&dummy()).unwrap_err();
    match err {
        NormalizationError::UnboundedSection { w, extent, .. } => {
            assert_eq!(w, 0.0);
            assert!(extent >= VALIDITY_BOUND);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn tetratwister_is_deterministic_and_sharp() {
    let spec = get_spec("tetratwister").unwrap();
    let params = NormalizeParams::default();
    let a = compute_scale_and_extent(&spec, &coarse(), &params).unwrap();
    let b = compute_scale_and_extent(&spec, &coarse(), &params).unwrap();
    assert_eq!(a, b);

    let engine = SectionEngine::new(&coarse()).unwrap();
    assert!(engine.section(&spec, a.max_w).unwrap().is_empty());
    assert!(engine.section(&spec, -a.max_w).unwrap().is_empty());
    let inside = a.max_w - 2.0 * params.bisection_tol;
    assert!(!engine.section(&spec, inside).unwrap().is_empty());
}

#[test]
fn every_catalog_spec_has_a_base_section() {
    let n = Normalizer::with_params(&coarse(), &NormalizeParams::default()).unwrap();
    for spec in all_specs() {
        let d0 = n.extent(&spec, 0.0).unwrap();
        assert!(d0 > 0.0, "{}", spec.name());
    }
}

#[test]
fn invalid_params_surface_as_configuration() {
    let spec = get_spec("tetratwister").unwrap();
    let bad = NormalizeParams {
        max_grid_steps: 0,
        ..NormalizeParams::default()
    };
    assert!(matches!(
        compute_scale_and_extent(&spec, &coarse(), &bad),
        Err(NormalizationError::Section(SectionError::Configuration { .. }))
    ));
}

/// Counts `prepare` calls and the queries made through prepared specs.
#[derive(Default)]
struct Counting {
    prepared: AtomicUsize,
    queries: AtomicUsize,
}

impl Realizer for Counting {
    fn handles(&self, _kind: Kind) -> bool {
        true
    }

    fn section(&self, spec: &PolytwisterSpec, w: f64) -> Result<Mesh, SectionError> {
        Profile(|w| 2.0 - w).section(spec, w)
    }

    fn prepare<'a>(&'a self, spec: &'a PolytwisterSpec) -> Prepared<'a>
    where
        Self: Sized + Sync,
    {
        self.prepared.fetch_add(1, Ordering::Relaxed);
        Prepared::new(move |w| {
            self.queries.fetch_add(1, Ordering::Relaxed);
            self.section(spec, w)
        })
    }
}

#[test]
fn search_prepares_the_spec_once() {
    let n = Normalizer::new(
        Counting::default(),
        &NormalizeParams {
            dense_samples: 4,
            ..NormalizeParams::default()
        },
    );
    let out = n.normalize(&dummy()).unwrap();
    assert!(out.max_w >= 2.0 && out.max_w - 2.0 <= 0.01, "{out:?}");
    assert_eq!(n.realizer().prepared.load(Ordering::Relaxed), 1);
    assert!(n.realizer().queries.load(Ordering::Relaxed) > 10);
}
