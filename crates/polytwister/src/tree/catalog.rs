//! Named lookup over the hard and soft catalogs.

use super::{hard, soft, PlatonicAngles, PolytwisterSpec, Rings};
use crate::error::ConfigurationError;

/// Map `_` to space so shell-friendly names match catalog names.
pub fn normalize_name(name: &str) -> String {
    name.replace('_', " ")
}

/// Every catalog entry, hard entries first, in a fixed order.
pub fn all_specs() -> Vec<PolytwisterSpec> {
    let rings = Rings::new(&PlatonicAngles::new());
    vec![
        hard::dyadic_twister(3),
        hard::dyadic_twister(4),
        hard::dyadic_twister(5),
        hard::tetratwister(&rings),
        hard::quasitetratwister(&rings),
        hard::bloated_tetratwister(&rings),
        hard::cubetwister(&rings),
        hard::quasicubetwister(&rings),
        hard::bloated_cubetwister(&rings),
        hard::octatwister(&rings),
        hard::quasioctatwister(&rings),
        hard::bloated_octatwister(&rings),
        hard::dodecatwister(&rings),
        hard::quasidodecatwister(&rings),
        hard::bloated_dodecatwister(&rings),
        hard::icosatwister(&rings),
        hard::quasicosatwister(&rings),
        hard::bloated_icosatwister(&rings),
        hard::great_dodecatwister(&rings),
        hard::great_quasidodecatwister(&rings),
        hard::great_bloated_dodecatwister(&rings),
        hard::small_stellated_dodecatwister(&rings),
        hard::small_quasistellated_dodecatwister(&rings),
        hard::great_icosatwister(&rings),
        soft::soft_dyadic_twister(2, &["duospindle"]),
        soft::soft_dyadic_twister(3, &[]),
        soft::soft_dyadic_twister(4, &[]),
        soft::soft_dyadic_twister(5, &[]),
        soft::soft_tetratwister(),
        soft::soft_cubetwister(),
        soft::soft_octatwister(),
        soft::soft_dodecatwister(),
        soft::soft_icosatwister(),
        soft::soft_stella_octangula(),
    ]
}

/// Look up a spec by canonical name or alias.
///
/// Matching is case-sensitive; `_` and space are interchangeable.
pub fn get_spec(name: &str) -> Result<PolytwisterSpec, ConfigurationError> {
    all_specs()
        .into_iter()
        .find(|spec| spec.answers_to(name))
        .ok_or_else(|| ConfigurationError::NotFound(name.to_string()))
}
