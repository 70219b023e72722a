//! Hard catalog: Boolean trees of cycloplane rings.
//!
//! Plain, "quasi", "bloated" and "great" variants share the ring constants of
//! [`Rings`] and differ only in how the rings are combined. Where a family has
//! k-fold symmetry the tree builds one sector and wraps it in
//! `RotatedCopies`, so the kernel evaluates each Boolean once per sector
//! instead of once per copy.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::{Node, PolytwisterSpec, Rings};

type Spike = (Vec<Node>, Node);

fn rot(node: Node, order: usize) -> Node {
    Node::rotated_copies(node, order)
}

fn isect(nodes: &[&Node]) -> Node {
    Node::intersection(nodes.iter().map(|&n| n.clone()))
}

/// Index into a ring with Python-style wraparound for negative offsets.
fn at(ring: &[Node], i: isize) -> &Node {
    let n = ring.len() as isize;
    &ring[i.rem_euclid(n) as usize]
}

pub(super) fn dyadic_twister(n: usize) -> PolytwisterSpec {
    let tree = Node::intersection(
        (0..n).map(|i| Node::cycloplane(FRAC_PI_2, i as f64 * TAU / n as f64)),
    );
    PolytwisterSpec::hard([format!("order-{n} dyadic twister")], tree)
}

pub(super) fn tetratwister(r: &Rings) -> PolytwisterSpec {
    let tree = Node::intersection(
        std::iter::once(Node::south_pole()).chain(r.tetrahedron_north.iter().cloned()),
    );
    PolytwisterSpec::hard(["tetratwister"], tree)
}

pub(super) fn quasitetratwister(r: &Rings) -> PolytwisterSpec {
    let t = &r.tetrahedron_north;
    let south = Node::south_pole();
    let cap = Node::difference([Node::intersection(t.iter().cloned()), south.clone()]);
    let sector = Node::difference([isect(&[&south, &t[0], &t[1]]), t[2].clone()]);
    PolytwisterSpec::hard(["quasitetratwister"], Node::union([cap, rot(sector, 3)]))
}

pub(super) fn bloated_tetratwister(r: &Rings) -> PolytwisterSpec {
    let t = &r.tetrahedron_north;
    let south = Node::south_pole();
    let upper = Node::difference([isect(&[&t[0], &t[1]]), south.clone(), t[2].clone()]);
    let lower = Node::difference([isect(&[&south, &t[0]]), t[1].clone(), t[2].clone()]);
    PolytwisterSpec::hard(
        ["bloated tetratwister", "inverted tetratwister"],
        Node::union([rot(upper, 3), rot(lower, 3)]),
    )
}

pub(super) fn cubetwister(r: &Rings) -> PolytwisterSpec {
    let tree = Node::intersection(
        [Node::north_pole(), Node::south_pole()]
            .into_iter()
            .chain(r.cube_equator.iter().cloned()),
    );
    PolytwisterSpec::hard(["cubetwister"], tree)
}

pub(super) fn quasicubetwister(r: &Rings) -> PolytwisterSpec {
    let e = &r.cube_equator;
    let (north, south) = (Node::north_pole(), Node::south_pole());
    let north_ring = Node::difference([
        isect(&[&north, &e[0], &e[1]]),
        isect(&[&south, &e[2], &e[3]]),
    ]);
    let south_ring = Node::difference([
        isect(&[&south, &e[0], &e[1]]),
        isect(&[&north, &e[2], &e[3]]),
    ]);
    PolytwisterSpec::hard(
        ["quasicubetwister"],
        Node::union([rot(north_ring, 4), rot(south_ring, 4)]),
    )
}

pub(super) fn bloated_cubetwister(r: &Rings) -> PolytwisterSpec {
    let e = &r.cube_equator;
    let (north, south) = (Node::north_pole(), Node::south_pole());
    let rings = [
        isect(&[&north, &e[0]]),
        isect(&[&e[0], &e[1]]),
        isect(&[&e[0], &south]),
    ];
    PolytwisterSpec::hard(
        ["bloated cubetwister", "inverted cubetwister"],
        Node::union(rings.into_iter().map(|x| rot(x, 4))),
    )
}

pub(super) fn octatwister(r: &Rings) -> PolytwisterSpec {
    let tree = Node::intersection(
        r.octahedron_north
            .iter()
            .chain(r.octahedron_south.iter())
            .cloned(),
    );
    PolytwisterSpec::hard(["octatwister"], tree)
}

pub(super) fn quasioctatwister(r: &Rings) -> PolytwisterSpec {
    let (n, s) = (&r.octahedron_north, &r.octahedron_south);
    let tree = Node::union([
        Node::intersection(n.iter().cloned()),
        rot(isect(&[&n[0], &n[1], &s[0], &s[1]]), 4),
        Node::intersection(s.iter().cloned()),
    ]);
    PolytwisterSpec::hard(["quasioctatwister"], tree)
}

pub(super) fn bloated_octatwister(r: &Rings) -> PolytwisterSpec {
    let (n, s) = (&r.octahedron_north, &r.octahedron_south);
    let rings = [
        isect(&[&n[0], &n[1]]),
        isect(&[&n[0], &s[0]]),
        isect(&[&s[0], &s[1]]),
    ];
    PolytwisterSpec::hard(
        ["bloated octatwister", "inverted octatwister"],
        Node::union(rings.into_iter().map(|x| rot(x, 4))),
    )
}

pub(super) fn dodecatwister(r: &Rings) -> PolytwisterSpec {
    let tree = Node::intersection(
        [Node::north_pole(), Node::south_pole()]
            .into_iter()
            .chain(r.dodecahedron_north.iter().cloned())
            .chain(r.dodecahedron_south.iter().cloned()),
    );
    PolytwisterSpec::hard(["dodecatwister"], tree)
}

pub(super) fn quasidodecatwister(r: &Rings) -> PolytwisterSpec {
    let (n, s) = (&r.dodecahedron_north, &r.dodecahedron_south);
    let (north, south) = (Node::north_pole(), Node::south_pole());
    let rings = [
        isect(&[&north, &n[0], &n[1]]),
        isect(&[&n[0], &n[1], &s[0]]),
        isect(&[&n[1], &s[0], &s[1]]),
        isect(&[&south, &s[0], &s[1]]),
    ];
    PolytwisterSpec::hard(
        ["quasidodecatwister"],
        Node::union(rings.into_iter().map(|x| rot(x, 5))),
    )
}

pub(super) fn bloated_dodecatwister(r: &Rings) -> PolytwisterSpec {
    let (n, s) = (&r.dodecahedron_north, &r.dodecahedron_south);
    let (north, south) = (Node::north_pole(), Node::south_pole());
    let rings = [
        isect(&[&north, &n[0]]),
        isect(&[&n[0], &n[1]]),
        isect(&[&n[0], &s[0]]),
        isect(&[&s[0], &n[1]]),
        isect(&[&s[0], &s[1]]),
        isect(&[&south, &s[0]]),
    ];
    PolytwisterSpec::hard(
        ["bloated dodecatwister", "inverted dodecatwister"],
        Node::union(rings.into_iter().map(|x| rot(x, 5))),
    )
}

pub(super) fn icosatwister(r: &Rings) -> PolytwisterSpec {
    let tree = Node::intersection(
        r.icosahedron_north_1
            .iter()
            .chain(&r.icosahedron_north_2)
            .chain(&r.icosahedron_south_1)
            .chain(&r.icosahedron_south_2)
            .cloned(),
    );
    PolytwisterSpec::hard(["icosatwister"], tree)
}

pub(super) fn quasicosatwister(r: &Rings) -> PolytwisterSpec {
    let (n1, n2) = (&r.icosahedron_north_1, &r.icosahedron_north_2);
    let (s1, s2) = (&r.icosahedron_south_1, &r.icosahedron_south_2);
    let tree = Node::union([
        Node::intersection(n1.iter().cloned()),
        rot(isect(&[&n1[0], &n1[1], &n2[0], &n2[1], &s2[0]]), 5),
        rot(isect(&[&s1[0], &s1[1], &s2[0], &s2[1], &n2[1]]), 5),
        Node::intersection(s1.iter().cloned()),
    ]);
    PolytwisterSpec::hard(["quasicosatwister"], tree)
}

pub(super) fn bloated_icosatwister(r: &Rings) -> PolytwisterSpec {
    let (n1, n2) = (&r.icosahedron_north_1, &r.icosahedron_north_2);
    let (s1, s2) = (&r.icosahedron_south_1, &r.icosahedron_south_2);
    let rings = [
        isect(&[&n1[0], &n1[1]]),
        isect(&[&n1[0], &n2[0]]),
        isect(&[&n2[0], &s2[0]]),
        isect(&[&n2[1], &s2[0]]),
        isect(&[&s1[0], &s2[0]]),
        isect(&[&s1[0], &s1[1]]),
    ];
    PolytwisterSpec::hard(
        ["bloated icosatwister", "inverted icosatwister"],
        Node::union(rings.into_iter().map(|x| rot(x, 5))),
    )
}

/// Edge pairs of the great dodecahedron: for each sector ring, the two
/// cycloplanes meeting along the kept edge and the two bounding the removed one.
fn great_dodecahedron_edges(r: &Rings) -> Vec<([Node; 2], [Node; 2])> {
    let (n, s) = (&r.dodecahedron_north, &r.dodecahedron_south);
    let (north, south) = (Node::north_pole(), Node::south_pole());
    vec![
        ([n[0].clone(), n[2].clone()], [north.clone(), n[1].clone()]),
        ([north, s[0].clone()], [n[0].clone(), n[1].clone()]),
        ([n[1].clone(), at(s, -1).clone()], [n[0].clone(), s[0].clone()]),
        ([n[0].clone(), s[1].clone()], [n[1].clone(), s[0].clone()]),
        ([south.clone(), n[1].clone()], [s[0].clone(), s[1].clone()]),
        ([s[0].clone(), s[2].clone()], [south, s[1].clone()]),
    ]
}

pub(super) fn great_dodecatwister(r: &Rings) -> PolytwisterSpec {
    let rings = great_dodecahedron_edges(r)
        .into_iter()
        .map(|(keep, cut)| Node::difference([Node::intersection(keep), Node::union(cut)]));
    PolytwisterSpec::hard(
        ["great dodecatwister"],
        Node::union(rings.map(|x| rot(x, 5))),
    )
}

pub(super) fn great_quasidodecatwister(r: &Rings) -> PolytwisterSpec {
    let rings = great_dodecahedron_edges(r)
        .into_iter()
        .map(|(keep, cut)| Node::difference([Node::intersection(keep), Node::intersection(cut)]));
    PolytwisterSpec::hard(
        ["great quasidodecatwister"],
        Node::union(rings.map(|x| rot(x, 5))),
    )
}

pub(super) fn great_bloated_dodecatwister(r: &Rings) -> PolytwisterSpec {
    let rings = great_dodecahedron_edges(r)
        .into_iter()
        .map(|(keep, _)| Node::intersection(keep));
    PolytwisterSpec::hard(
        ["great bloated dodecatwister"],
        Node::union(rings.map(|x| rot(x, 5))),
    )
}

/// Spikes of the small stellated dodecahedron as (bounding cycloplanes, base
/// cycloplane): the two polar spikes, then the two sector spikes.
fn small_stellated_spikes(r: &Rings) -> ([Spike; 2], [Spike; 2]) {
    let (n, s) = (&r.dodecahedron_north, &r.dodecahedron_south);
    let (north, south) = (Node::north_pole(), Node::south_pole());
    let poles = [(n.clone(), north.clone()), (s.clone(), south.clone())];
    let rest = [
        (
            vec![north, at(n, -1).clone(), n[1].clone(), at(s, -1).clone(), s[0].clone()],
            n[0].clone(),
        ),
        (
            vec![south, at(s, -1).clone(), s[1].clone(), n[0].clone(), n[1].clone()],
            s[0].clone(),
        ),
    ];
    (poles, rest)
}

pub(super) fn small_stellated_dodecatwister(r: &Rings) -> PolytwisterSpec {
    let (poles, rest) = small_stellated_spikes(r);
    let spike = |(sides, base): Spike| Node::difference([Node::intersection(sides), base]);
    let parts = poles
        .into_iter()
        .map(spike)
        .chain(rest.into_iter().map(|s| rot(spike(s), 5)));
    PolytwisterSpec::hard(["small stellated dodecatwister"], Node::union(parts))
}

pub(super) fn small_quasistellated_dodecatwister(r: &Rings) -> PolytwisterSpec {
    let (poles, rest) = small_stellated_spikes(r);
    let parts = poles
        .into_iter()
        .map(|(sides, _)| Node::intersection(sides))
        .chain(rest.into_iter().map(|(sides, _)| rot(Node::intersection(sides), 5)));
    PolytwisterSpec::hard(["small quasistellated dodecatwister"], Node::union(parts))
}

/// Twenty tetrahedra erected on the faces of a core icosahedron: each one is
/// bounded by a face and the three faces bordering the opposite face. Four
/// of them span a sector.
pub(super) fn great_icosatwister(r: &Rings) -> PolytwisterSpec {
    let (n1, n2) = (&r.icosahedron_north_1, &r.icosahedron_north_2);
    let (s1, s2) = (&r.icosahedron_south_1, &r.icosahedron_south_2);
    let rings = [
        isect(&[&n1[0], &s2[2], &s1[1], &s1[3]]),
        isect(&[&n2[0], &n2[2], &n2[3], &s1[2]]),
        isect(&[&s2[0], &s2[2], &s2[3], &n1[3]]),
        isect(&[&s1[0], &n2[3], &n1[2], &n1[4]]),
    ];
    PolytwisterSpec::hard(
        ["great icosatwister"],
        Node::union(rings.into_iter().map(|x| rot(x, 5))),
    )
}
