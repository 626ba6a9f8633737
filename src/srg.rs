//! Exhaustive strongly-regular-graph verification.
//!
//! Every pair is checked; nothing is sampled. The graphs handled here are small enough that
//! the `O(v³)` scan (popcounts over bitset rows) is cheap.

use crate::error::{InvariantViolation, Result, ValidationError};
use crate::graph::Graph;
use serde::Serialize;
use tracing::debug;

/// Parameters \((v, k, \lambda, \mu)\) of a strongly regular graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SrgParameters {
    /// Number of vertices.
    pub v: usize,
    /// Valency.
    pub k: usize,
    /// Common neighbours of an adjacent pair.
    pub lambda: usize,
    /// Common neighbours of a non-adjacent pair.
    pub mu: usize,
}

impl SrgParameters {
    /// Creates a parameter tuple.
    pub const fn new(v: usize, k: usize, lambda: usize, mu: usize) -> Self {
        Self { v, k, lambda, mu }
    }

    /// Checks the counting identity \(k(k - \lambda - 1) = (v - k - 1)\mu\).
    pub fn is_feasible(&self) -> bool {
        if self.k >= self.v {
            return false;
        }
        if self.k == 0 {
            return self.lambda == 0 && self.mu == 0;
        }
        if self.lambda + 1 > self.k {
            return false;
        }
        self.k * (self.k - self.lambda - 1) == (self.v - self.k - 1) * self.mu
    }

    /// Parameters of the complement graph:
    /// \((v,\ v-k-1,\ v-2k+\mu-2,\ v-2k+\lambda)\).
    ///
    /// `None` if a formula goes negative (the tuple is not realisable).
    pub fn complement(&self) -> Option<Self> {
        let lambda = (self.v + self.mu).checked_sub(2 * self.k + 2)?;
        Some(Self {
            v: self.v,
            k: self.v.checked_sub(self.k + 1)?,
            lambda,
            mu: (self.v + self.lambda).checked_sub(2 * self.k)?,
        })
    }

    /// Returns `true` if `graph` satisfies these parameters on every pair.
    pub fn holds_for(&self, graph: &Graph) -> bool {
        let n = graph.order();
        if n != self.v || (0..n).any(|u| graph.degree(u) != self.k) {
            return false;
        }
        for u in 0..n {
            for w in (u + 1)..n {
                let expected = if graph.has_edge(u, w) { self.lambda } else { self.mu };
                if graph.common_neighbor_count(u, w) != expected {
                    return false;
                }
            }
        }
        true
    }
}

/// Verifies that `graph` is strongly regular with valency `k`.
///
/// λ and μ are fixed by the first adjacent and first non-adjacent pair in scan order
/// (`u < w`, lexicographic). A graph with no adjacent (or no non-adjacent) pair reports 0 for
/// the missing parameter.
///
/// # Errors
/// - `NonUniformValency` naming the first vertex whose degree is not `k`.
/// - `InvariantViolation` naming the first pair whose common-neighbour count differs.
pub fn verify_strongly_regular(graph: &Graph, k: usize) -> Result<SrgParameters> {
    let n = graph.order();
    for vertex in 0..n {
        let degree = graph.degree(vertex);
        if degree != k {
            return Err(ValidationError::NonUniformValency {
                vertex,
                degree,
                expected: k,
            }
            .into());
        }
    }

    let mut lambda: Option<usize> = None;
    let mut mu: Option<usize> = None;
    for u in 0..n {
        for w in (u + 1)..n {
            let observed = graph.common_neighbor_count(u, w);
            let (slot, relation) = if graph.has_edge(u, w) {
                (&mut lambda, "adjacent")
            } else {
                (&mut mu, "non-adjacent")
            };
            match *slot {
                None => *slot = Some(observed),
                Some(expected) if expected != observed => {
                    return Err(InvariantViolation {
                        u,
                        v: w,
                        relation,
                        observed,
                        expected,
                    }
                    .into());
                }
                Some(_) => {}
            }
        }
    }

    let params = SrgParameters::new(n, k, lambda.unwrap_or(0), mu.unwrap_or(0));
    debug!(?params, "strongly regular");
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VerifyError;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn petersen() -> Graph {
        let mut edges = Vec::new();
        for i in 0..5 {
            edges.push((i, (i + 1) % 5));
            edges.push((i, i + 5));
            edges.push((i + 5, (i + 2) % 5 + 5));
        }
        Graph::from_edges(10, &edges)
    }

    /// Paley graph on `q` vertices (`q` prime, `q ≡ 1 mod 4`).
    fn paley(q: usize) -> Graph {
        let squares: Vec<bool> = {
            let mut s = vec![false; q];
            for x in 1..q {
                s[x * x % q] = true;
            }
            s
        };
        Graph::from_relation(q, |i, j| squares[(j + q - i) % q])
    }

    #[test]
    fn petersen_is_10_3_0_1() {
        let params = verify_strongly_regular(&petersen(), 3).unwrap();
        assert_eq!(params, SrgParameters::new(10, 3, 0, 1));
        assert!(params.is_feasible());
        assert!(params.holds_for(&petersen()));
    }

    #[test]
    fn complement_parameters_match_complement_graph() {
        let g = petersen();
        let params = verify_strongly_regular(&g, 3).unwrap();
        let c = g.complement();
        let cparams = verify_strongly_regular(&c, 6).unwrap();
        assert_eq!(params.complement(), Some(cparams));
        assert_eq!(cparams, SrgParameters::new(10, 6, 3, 4));
    }

    #[test]
    fn paley_graphs() {
        for q in [5usize, 13, 17, 29] {
            let k = (q - 1) / 2;
            let params = verify_strongly_regular(&paley(q), k).unwrap();
            assert_eq!(params, SrgParameters::new(q, k, (q - 5) / 4, (q - 1) / 4), "q={q}");
        }
    }

    #[test]
    fn wrong_valency_is_a_validation_error() {
        let err = verify_strongly_regular(&petersen(), 4).unwrap_err();
        assert_eq!(
            err,
            VerifyError::Validation(ValidationError::NonUniformValency {
                vertex: 0,
                degree: 3,
                expected: 4
            })
        );
    }

    #[test]
    fn regular_but_not_strongly_regular() {
        // 6-cycle: adjacent pairs share 0; (0, 2) shares 1 but opposite (0, 3) shares 0.
        let g = Graph::from_edges(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]);
        let err = verify_strongly_regular(&g, 2).unwrap_err();
        match err {
            VerifyError::InvariantViolation(v) => {
                assert_eq!((v.u, v.v), (0, 3));
                assert_eq!(v.relation, "non-adjacent");
                assert_eq!(v.observed, 0);
                assert_eq!(v.expected, 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn acceptance_survives_full_rescan() {
        let mut rng = XorShiftRng::seed_from_u64(0x5A6);
        for _ in 0..200 {
            let g = Graph::random(&mut rng, 9, 0.5);
            let k = g.degree(0);
            if let Ok(params) = verify_strongly_regular(&g, k) {
                assert!(params.holds_for(&g));
                for u in 0..9 {
                    for w in (u + 1)..9 {
                        let c = g.common_neighbor_count(u, w);
                        if g.has_edge(u, w) {
                            assert_eq!(c, params.lambda);
                        } else {
                            assert_eq!(c, params.mu);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn complete_and_empty_graphs() {
        assert_eq!(
            verify_strongly_regular(&Graph::complete(5), 4).unwrap(),
            SrgParameters::new(5, 4, 3, 0)
        );
        assert_eq!(
            verify_strongly_regular(&Graph::empty(5), 0).unwrap(),
            SrgParameters::new(5, 0, 0, 0)
        );
    }

    #[test]
    fn schlafli_parameters_are_feasible() {
        let p = SrgParameters::new(27, 16, 10, 8);
        assert!(p.is_feasible());
        assert_eq!(p.complement(), Some(SrgParameters::new(27, 10, 1, 5)));
        assert!(SrgParameters::new(40, 12, 2, 4).is_feasible());
        assert!(!SrgParameters::new(27, 16, 10, 7).is_feasible());
    }
}
