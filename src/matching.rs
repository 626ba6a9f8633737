//! Double-six pairings between disjoint six-sets.
//!
//! For `s ∈ S` a partner candidate is any `t ∈ T` that is non-adjacent to `s` and adjacent
//! to every other member of `S`. The candidates feed a bipartite matching solved by
//! augmenting paths; a perfect matching is the pairing `φ: S → T`.

use crate::clique::Clique;
use crate::error::{Result, ValidationError};
use crate::graph::Graph;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Size of each half of a double-six.
pub const DOUBLE_SIX_SIZE: usize = 6;

/// Two disjoint six-sets with a bijection between them.
///
/// `s` is sorted and `phi[i]` is the partner of `s[i]`; `t` holds the same vertices as
/// `phi`, sorted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct DoubleSix {
    /// First half, ascending.
    pub s: Vec<usize>,
    /// Second half, ascending.
    pub t: Vec<usize>,
    /// `phi[i]` is paired with `s[i]`.
    pub phi: Vec<usize>,
}

impl DoubleSix {
    /// The pairs `(s, φ(s))`.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.s.iter().copied().zip(self.phi.iter().copied())
    }

    /// The same double-six with the halves exchanged (`φ` inverted).
    #[must_use]
    pub fn swapped(&self) -> Self {
        let mut pairs: Vec<(usize, usize)> = self.pairs().map(|(s, t)| (t, s)).collect();
        pairs.sort_unstable();
        Self {
            s: pairs.iter().map(|&(t, _)| t).collect(),
            t: self.s.clone(),
            phi: pairs.iter().map(|&(_, s)| s).collect(),
        }
    }
}

/// Outcome of a pairing attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Pairing {
    /// A valid bijection exists.
    Found(DoubleSix),
    /// No valid bijection; an ordinary negative answer.
    NoMatchFound,
}

impl Pairing {
    /// The double-six, if one was found.
    pub fn found(self) -> Option<DoubleSix> {
        match self {
            Pairing::Found(d) => Some(d),
            Pairing::NoMatchFound => None,
        }
    }
}

/// Attempts to pair `s` with `t` in `graph`.
///
/// # Errors
/// `SubsetSize` if either side does not have six vertices, `VertexOutOfRange` for a vertex
/// outside the graph, `Overlap` if a vertex repeats within or across the sides.
pub fn match_double_six(graph: &Graph, s: &[usize], t: &[usize]) -> Result<Pairing> {
    let n = graph.order();
    for side in [s, t] {
        if side.len() != DOUBLE_SIX_SIZE {
            return Err(ValidationError::SubsetSize {
                expected: DOUBLE_SIX_SIZE,
                found: side.len(),
            }
            .into());
        }
    }
    let mut seen = vec![false; n];
    for &v in s.iter().chain(t) {
        if v >= n {
            return Err(ValidationError::VertexOutOfRange { vertex: v, size: n }.into());
        }
        if std::mem::replace(&mut seen[v], true) {
            return Err(ValidationError::Overlap { vertex: v }.into());
        }
    }

    let mut s = s.to_vec();
    s.sort_unstable();
    let mut t = t.to_vec();
    t.sort_unstable();

    let candidates: Vec<Vec<usize>> = s
        .iter()
        .map(|&a| {
            (0..t.len())
                .filter(|&j| {
                    let b = t[j];
                    !graph.has_edge(a, b) && s.iter().all(|&c| c == a || graph.has_edge(c, b))
                })
                .collect()
        })
        .collect();

    let matched = augmenting_matching(&candidates, t.len());
    let Some(phi_pos) = matched.into_iter().collect::<Option<Vec<usize>>>() else {
        return Ok(Pairing::NoMatchFound);
    };

    // Bijection check: every position of T used exactly once, every pair a candidate.
    let mut used = vec![false; t.len()];
    for (i, &j) in phi_pos.iter().enumerate() {
        if std::mem::replace(&mut used[j], true) || !candidates[i].contains(&j) {
            return Ok(Pairing::NoMatchFound);
        }
    }

    let phi = phi_pos.iter().map(|&j| t[j]).collect();
    Ok(Pairing::Found(DoubleSix { s, t, phi }))
}

/// Runs [`match_double_six`] over every unordered pair of disjoint cliques.
///
/// Pairs are tried as `(cliques[i], cliques[j])` with `i < j`; the output keeps that order
/// regardless of how the work is scheduled.
///
/// # Errors
/// Whatever [`match_double_six`] reports for a malformed clique.
pub fn pair_double_sixes(graph: &Graph, cliques: &[Clique]) -> Result<Vec<DoubleSix>> {
    let per_row: Vec<Vec<DoubleSix>> = (0..cliques.len())
        .into_par_iter()
        .map(|i| -> Result<Vec<DoubleSix>> {
            let mut row = Vec::new();
            for j in (i + 1)..cliques.len() {
                if !cliques[i].is_disjoint(&cliques[j]) {
                    continue;
                }
                let pairing =
                    match_double_six(graph, cliques[i].vertices(), cliques[j].vertices())?;
                if let Pairing::Found(d) = pairing {
                    row.push(d);
                }
            }
            Ok(row)
        })
        .collect::<Result<_>>()?;

    let found: Vec<DoubleSix> = per_row.into_iter().flatten().collect();
    debug!(cliques = cliques.len(), double_sixes = found.len(), "pairing complete");
    Ok(found)
}

/// Maximum bipartite matching by augmenting paths (Kuhn).
///
/// `candidates[i]` lists the right-hand positions left vertex `i` may take. Returns, per left
/// vertex, its matched right position.
fn augmenting_matching(candidates: &[Vec<usize>], right: usize) -> Vec<Option<usize>> {
    fn augment(
        left: usize,
        candidates: &[Vec<usize>],
        owner: &mut [Option<usize>],
        visited: &mut [bool],
    ) -> bool {
        for &r in &candidates[left] {
            if std::mem::replace(&mut visited[r], true) {
                continue;
            }
            let free = match owner[r] {
                None => true,
                Some(other) => augment(other, candidates, owner, visited),
            };
            if free {
                owner[r] = Some(left);
                return true;
            }
        }
        false
    }

    let mut owner: Vec<Option<usize>> = vec![None; right];
    for left in 0..candidates.len() {
        let mut visited = vec![false; right];
        augment(left, candidates, &mut owner, &mut visited);
    }

    let mut matched = vec![None; candidates.len()];
    for (r, o) in owner.iter().enumerate() {
        if let Some(l) = *o {
            matched[l] = Some(r);
        }
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VerifyError;
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    /// `s_i = i`, `t_i = 6 + perm[i]`; `s_i` misses exactly `t_i`.
    fn unique_pairing_graph(perm: [usize; 6]) -> Graph {
        let mut edges = Vec::new();
        for (i, &p) in perm.iter().enumerate() {
            for j in 0..6 {
                if j != p {
                    edges.push((i, 6 + j));
                }
            }
        }
        Graph::from_edges(12, &edges)
    }

    #[test]
    fn finds_the_unique_pairing() {
        let perm = [3, 0, 5, 1, 4, 2];
        let g = unique_pairing_graph(perm);
        let s: Vec<usize> = (0..6).collect();
        let t: Vec<usize> = (6..12).collect();
        let d = match_double_six(&g, &s, &t).unwrap().found().unwrap();
        assert_eq!(d.s, s);
        assert_eq!(d.t, t);
        let expected: Vec<usize> = perm.iter().map(|&p| 6 + p).collect();
        assert_eq!(d.phi, expected);
        for (a, b) in d.pairs() {
            assert!(!g.has_edge(a, b));
        }
    }

    #[test]
    fn flipping_one_edge_breaks_the_pairing() {
        let mut g = unique_pairing_graph([0, 1, 2, 3, 4, 5]);
        // s_0 now also misses t_1, so t_1 is no longer adjacent to all of S \ {s_1}.
        g.flip_edge(0, 7);
        let s: Vec<usize> = (0..6).collect();
        let t: Vec<usize> = (6..12).collect();
        assert_eq!(match_double_six(&g, &s, &t).unwrap(), Pairing::NoMatchFound);
    }

    #[test]
    fn side_order_does_not_matter() {
        let g = unique_pairing_graph([1, 2, 3, 4, 5, 0]);
        let a = match_double_six(&g, &[5, 4, 3, 2, 1, 0], &[11, 6, 7, 10, 9, 8]).unwrap();
        let b = match_double_six(&g, &[0, 1, 2, 3, 4, 5], &[6, 7, 8, 9, 10, 11]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn swapped_inverts_phi() {
        let g = unique_pairing_graph([2, 0, 1, 5, 3, 4]);
        let d = match_double_six(&g, &[0, 1, 2, 3, 4, 5], &[6, 7, 8, 9, 10, 11])
            .unwrap()
            .found()
            .unwrap();
        let back = d.swapped();
        assert_eq!(back.s, d.t);
        assert_eq!(back.t, d.s);
        assert_eq!(back.swapped(), d);
    }

    #[test]
    fn malformed_inputs_are_validation_errors() {
        let g = unique_pairing_graph([0, 1, 2, 3, 4, 5]);
        let err = match_double_six(&g, &[0, 1, 2, 3, 4], &[6, 7, 8, 9, 10, 11]).unwrap_err();
        assert_eq!(
            err,
            VerifyError::Validation(ValidationError::SubsetSize { expected: 6, found: 5 })
        );
        let err = match_double_six(&g, &[0, 1, 2, 3, 4, 5], &[5, 7, 8, 9, 10, 11]).unwrap_err();
        assert_eq!(err, VerifyError::Validation(ValidationError::Overlap { vertex: 5 }));
        let err = match_double_six(&g, &[0, 1, 2, 3, 4, 5], &[6, 7, 8, 9, 10, 12]).unwrap_err();
        assert_eq!(
            err,
            VerifyError::Validation(ValidationError::VertexOutOfRange { vertex: 12, size: 12 })
        );
    }

    #[test]
    fn pairing_all_cliques_keeps_index_order() {
        let g = unique_pairing_graph([0, 1, 2, 3, 4, 5]);
        let sets = [
            vec![0, 1, 2, 3, 4, 5],
            vec![0, 1, 2, 6, 7, 8],
            vec![6, 7, 8, 9, 10, 11],
        ];
        let cliques: Vec<Clique> = sets.iter().map(|vs| Clique::new(vs.clone())).collect();
        let found = pair_double_sixes(&g, &cliques).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].s, sets[0]);
        assert_eq!(found[0].t, sets[2]);
    }

    fn brute_matching_size(candidates: &[Vec<usize>], right: usize) -> usize {
        fn go(i: usize, candidates: &[Vec<usize>], used: &mut Vec<bool>) -> usize {
            if i == candidates.len() {
                return 0;
            }
            let mut best = go(i + 1, candidates, used);
            for &r in &candidates[i] {
                if !used[r] {
                    used[r] = true;
                    best = best.max(1 + go(i + 1, candidates, used));
                    used[r] = false;
                }
            }
            best
        }
        go(0, candidates, &mut vec![false; right])
    }

    #[test]
    fn augmenting_paths_reach_maximum_matching() {
        let mut rng = XorShiftRng::seed_from_u64(0x4A7C4);
        for _ in 0..200 {
            let left = rng.random_range(1..=6);
            let right = rng.random_range(1..=6);
            let candidates: Vec<Vec<usize>> = (0..left)
                .map(|_| (0..right).filter(|_| rng.random_bool(0.35)).collect())
                .collect();
            let matched = augmenting_matching(&candidates, right);
            let size = matched.iter().flatten().count();
            assert_eq!(size, brute_matching_size(&candidates, right));
            let mut used = vec![false; right];
            for (l, m) in matched.iter().enumerate() {
                if let Some(r) = *m {
                    assert!(candidates[l].contains(&r));
                    assert!(!std::mem::replace(&mut used[r], true));
                }
            }
        }
    }
}
