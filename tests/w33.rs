//! The symplectic generalized quadrangle W(3) ("W33"): 40 points, 40 lines in PG(3, 3).

use rootverify::prelude::*;
use std::collections::{BTreeSet, HashMap};

type Point = [u8; 4];

/// Symplectic form x0·y2 − x2·y0 + x1·y3 − x3·y1 over GF(3).
fn omega(x: &Point, y: &Point) -> u8 {
    let plus = u32::from(x[0]) * u32::from(y[2]) + u32::from(x[1]) * u32::from(y[3]);
    let minus = u32::from(x[2]) * u32::from(y[0]) + u32::from(x[3]) * u32::from(y[1]);
    ((plus + 2 * minus) % 3) as u8
}

/// Scales so the first non-zero coordinate is 1.
fn normalize(v: [u32; 4]) -> Point {
    let v = v.map(|c| (c % 3) as u8);
    let lead = v.iter().copied().find(|&c| c != 0).unwrap();
    let inv = if lead == 1 { 1 } else { 2 };
    v.map(|c| (c * inv) % 3)
}

struct W33 {
    points: Vec<Point>,
    index: HashMap<Point, usize>,
    lines: Vec<Vec<usize>>,
}

fn w33() -> W33 {
    let mut points = Vec::new();
    for a in 0..3u8 {
        for b in 0..3u8 {
            for c in 0..3u8 {
                for d in 0..3u8 {
                    let p = [a, b, c, d];
                    if p.iter().copied().find(|&x| x != 0) == Some(1) {
                        points.push(p);
                    }
                }
            }
        }
    }
    let index: HashMap<Point, usize> = points.iter().enumerate().map(|(i, p)| (*p, i)).collect();

    let mut lines = BTreeSet::new();
    for (i, x) in points.iter().enumerate() {
        for y in &points[i + 1..] {
            if omega(x, y) != 0 {
                continue;
            }
            let mut line = BTreeSet::new();
            for s in 0..3u32 {
                for t in 0..3u32 {
                    if s == 0 && t == 0 {
                        continue;
                    }
                    let v: [u32; 4] =
                        std::array::from_fn(|k| s * u32::from(x[k]) + t * u32::from(y[k]));
                    line.insert(index[&normalize(v)]);
                }
            }
            lines.insert(line.into_iter().collect::<Vec<usize>>());
        }
    }
    W33 {
        points,
        index,
        lines: lines.into_iter().collect(),
    }
}

/// Transvection x ↦ x + ω(x, v)·v on projective points.
fn transvection(w: &W33, v: &Point) -> Permutation {
    let images = w
        .points
        .iter()
        .map(|x| {
            let f = u32::from(omega(x, v));
            let y: [u32; 4] = std::array::from_fn(|k| u32::from(x[k]) + f * u32::from(v[k]));
            w.index[&normalize(y)]
        })
        .collect();
    Permutation::new(images).unwrap()
}

#[test]
fn incidence_counts() {
    let w = w33();
    assert_eq!(w.points.len(), 40);
    assert_eq!(w.lines.len(), 40);
    let gq = IncidenceStructure::new(40, w.lines.clone()).unwrap();
    assert_eq!(gq.line_size(), 4);
    assert!(gq.point_degrees().iter().all(|&d| d == 4));
    assert!(gq.is_generalized_quadrangle());
}

#[test]
fn collinearity_graph_is_srg_40_12_2_4() {
    let w = w33();
    let gq = IncidenceStructure::new(40, w.lines).unwrap();
    let graph = gq.collinearity_graph();
    let params = verify_strongly_regular(&graph, 12).unwrap();
    assert_eq!(params, SrgParameters::new(40, 12, 2, 4));
    assert!(params.is_feasible());
    // Lines are exactly the maximal cliques.
    let mut cliques: Vec<Vec<usize>> = enumerate_cliques(&graph, 4)
        .into_iter()
        .map(|c| c.vertices().to_vec())
        .collect();
    cliques.sort();
    assert_eq!(cliques, gq.lines());
    assert_eq!(CliqueEnumerator::new(&graph, 5).count(), 0);
}

#[test]
fn transvections_generate_psp4_3() {
    let w = w33();
    let gq = IncidenceStructure::new(40, w.lines.clone()).unwrap();
    let generators: Vec<Permutation> = w.points.iter().map(|v| transvection(&w, v)).collect();
    for g in &generators {
        assert!(gq.is_automorphism(g));
        assert_eq!(g.order(), 3);
    }

    let group = PermutationGroup::new(40, generators).unwrap();
    assert!(group.is_transitive());
    assert_eq!(group.orbit(&[0], 100).unwrap(), Bounded::Complete((0..40).collect()));

    let elements = group.close(100_000);
    assert_eq!(elements.as_ref().map(Vec::len), Bounded::Complete(25_920));

    let capped = group.close(1_000);
    assert!(capped.is_capped());
    assert_eq!(capped.value().len(), 1_000);
}

#[test]
fn point_stabilizer_has_index_40() {
    let w = w33();
    let generators: Vec<Permutation> = w.points.iter().map(|v| transvection(&w, v)).collect();
    let elements = PermutationGroup::new(40, generators).unwrap().close(100_000);
    let fixed = stabilizer_subgroup(&elements, |g| g.apply(0) == 0);
    assert_eq!(fixed.as_ref().map(Vec::len), Bounded::Complete(25_920 / 40));
}
