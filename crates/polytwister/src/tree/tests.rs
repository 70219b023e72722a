use std::collections::HashSet;
use std::f64::consts::PI;

use approx::assert_relative_eq;
use nalgebra::Vector3;

use super::*;

#[test]
fn catalog_specs_are_valid_and_uniquely_named() {
    let specs = all_specs();
    assert_eq!(specs.len(), 34);
    let mut seen = HashSet::new();
    for spec in &specs {
        spec.validate()
            .unwrap_or_else(|e| panic!("{} is invalid: {e}", spec.name()));
        for name in &spec.names {
            assert!(seen.insert(name.clone()), "duplicate name {name}");
        }
    }
}

#[test]
fn lookup_accepts_underscores_and_aliases() {
    let a = get_spec("bloated_tetratwister").unwrap();
    let b = get_spec("inverted tetratwister").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.name(), "bloated tetratwister");
    assert_eq!(get_spec("duospindle").unwrap().kind(), Kind::Soft);
    assert_eq!(
        get_spec("order-2_soft_dyadic_twister").unwrap().name(),
        "duospindle"
    );
}

#[test]
fn lookup_is_case_sensitive() {
    assert_eq!(
        get_spec("Tetratwister"),
        Err(ConfigurationError::NotFound("Tetratwister".into()))
    );
}

#[test]
fn tetratwister_tree_shape() {
    let spec = get_spec("tetratwister").unwrap();
    let Shape::Hard { tree } = &spec.shape else {
        panic!("tetratwister must be hard");
    };
    let Node::Intersection { operands } = tree else {
        panic!("expected intersection, got {}", tree.tag());
    };
    assert_eq!(operands.len(), 4);
    assert_eq!(operands[0], Node::south_pole());
    let zenith = PI - (-1.0f64 / 3.0).acos();
    for (i, op) in operands[1..].iter().enumerate() {
        match op {
            Node::Cycloplane {
                zenith: z,
                azimuth: a,
            } => {
                assert_relative_eq!(*z, zenith, epsilon = 1e-12);
                assert_relative_eq!(*a, i as f64 * 2.0 * PI / 3.0, epsilon = 1e-12);
            }
            other => panic!("expected cycloplane, got {}", other.tag()),
        }
    }
}

#[test]
fn sector_variants_share_angle_constants() {
    // Every leaf of a family's variants must come from that family's rings.
    let angles = PlatonicAngles::new();
    let zeniths = |node: &Node| {
        fn walk(node: &Node, out: &mut Vec<f64>) {
            match node {
                Node::Cycloplane { zenith, .. } => out.push(*zenith),
                Node::RotatedCopies { operand, .. } => walk(operand, out),
                Node::Intersection { operands }
                | Node::Union { operands }
                | Node::Difference { operands } => operands.iter().for_each(|n| walk(n, out)),
            }
        }
        let mut out = Vec::new();
        walk(node, &mut out);
        out
    };
    let allowed = [0.0, PI, angles.dodecahedron, PI - angles.dodecahedron];
    for name in [
        "quasidodecatwister",
        "bloated dodecatwister",
        "great dodecatwister",
        "small stellated dodecatwister",
    ] {
        let Shape::Hard { tree } = get_spec(name).unwrap().shape else {
            panic!("{name} must be hard");
        };
        for z in zeniths(&tree) {
            assert!(
                allowed.iter().any(|a| (a - z).abs() < 1e-12),
                "{name}: stray zenith {z}"
            );
        }
    }
}

#[test]
fn validate_rejects_malformed_trees() {
    assert_eq!(
        Node::union([]).validate(),
        Err(ConfigurationError::EmptyOperands { node: "union" })
    );
    assert_eq!(
        Node::rotated_copies(Node::north_pole(), 1).validate(),
        Err(ConfigurationError::BadOrder(1))
    );
    let bad = Node::intersection([Node::north_pole(), Node::cycloplane(f64::NAN, 0.0)]);
    assert!(matches!(
        bad.validate(),
        Err(ConfigurationError::NonFiniteAngle { .. })
    ));
}

#[test]
fn soft_generators_are_unit_length() {
    for spec in all_specs().iter().filter(|s| s.kind() == Kind::Soft) {
        let Shape::Soft { generators } = &spec.shape else {
            unreachable!();
        };
        for group in generators.groups() {
            for p in group {
                assert_relative_eq!(p.norm(), 1.0, epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn oriented_soft_sets_put_reference_on_x_axis() {
    for name in ["soft tetratwister", "soft icosatwister"] {
        let Shape::Soft {
            generators: Generators::Points(points),
        } = get_spec(name).unwrap().shape
        else {
            panic!("{name} must be a plain soft spec");
        };
        assert_relative_eq!(points[0], Vector3::x(), epsilon = 1e-12);
    }
}

#[test]
fn compound_spec_has_two_pieces() {
    let spec = get_spec("soft stella octangula").unwrap();
    let Shape::Soft { generators } = &spec.shape else {
        panic!("must be soft");
    };
    assert_eq!(generators.groups().len(), 2);
    assert!(Generators::Pieces(vec![vec![], vec![Vector3::x()]])
        .validate()
        .is_err());
}

#[test]
fn spec_json_roundtrip_preserves_tree() {
    let spec = get_spec("quasicubetwister").unwrap();
    let json = serde_json::to_string(&spec).unwrap();
    assert!(json.contains("\"kind\":\"hard\""));
    assert!(json.contains("\"type\":\"rotated_copies\""));
    let back: PolytwisterSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(back, spec);
}
