//! Gram matrices and the candidate graphs they induce.
//!
//! Every distinct off-diagonal inner product defines one candidate relation. Picking the
//! relation is left to the caller, usually by asking for uniform valency.

use crate::error::{Result, ValidationError};
use crate::graph::Graph;
use crate::lattice::{Rational, VectorSet};
use std::collections::BTreeMap;

/// Exact pairwise inner products of a vector set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GramMatrix {
    n: usize,
    /// Row-major scaled dot products (actual value times `denominator²`).
    scaled: Vec<i64>,
    scale: i64,
}

impl GramMatrix {
    /// Computes all `n²` inner products.
    pub fn new(set: &VectorSet) -> Self {
        let n = set.len();
        let d = set.lattice().denominator();
        let vs = set.vectors();
        let mut scaled = vec![0i64; n * n];
        for i in 0..n {
            for j in i..n {
                let x = vs[i].scaled_dot(&vs[j]);
                scaled[i * n + j] = x;
                scaled[j * n + i] = x;
            }
        }
        Self {
            n,
            scaled,
            scale: d * d,
        }
    }

    /// Number of rows.
    pub fn order(&self) -> usize {
        self.n
    }

    /// \(\langle v_i, v_j \rangle\).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Rational {
        Rational::new(self.scaled[i * self.n + j], self.scale)
    }

    /// Distinct off-diagonal values with their number of unordered pairs, ascending.
    pub fn value_counts(&self) -> BTreeMap<Rational, usize> {
        let mut counts = BTreeMap::new();
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                *counts.entry(self.get(i, j)).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// The relation "inner product equals `inner_product`" as a graph.
#[derive(Clone, Debug)]
pub struct CandidateGraph {
    /// Defining inner-product value.
    pub inner_product: Rational,
    /// The relation.
    pub graph: Graph,
    /// Valency multiset: degree → number of vertices with that degree.
    pub valencies: BTreeMap<usize, usize>,
}

impl CandidateGraph {
    /// The common degree, if every vertex has the same one.
    pub fn uniform_valency(&self) -> Option<usize> {
        match self.valencies.len() {
            1 => self.valencies.keys().next().copied(),
            _ => None,
        }
    }
}

/// One candidate graph per distinct off-diagonal inner product, ascending by value.
pub fn candidate_graphs(set: &VectorSet) -> Vec<CandidateGraph> {
    let gram = GramMatrix::new(set);
    candidate_graphs_from_gram(&gram)
}

/// As [`candidate_graphs`], reusing an existing Gram matrix.
pub fn candidate_graphs_from_gram(gram: &GramMatrix) -> Vec<CandidateGraph> {
    gram.value_counts()
        .into_keys()
        .map(|value| {
            let graph = Graph::from_relation(gram.order(), |i, j| gram.get(i, j) == value);
            let mut valencies = BTreeMap::new();
            for d in graph.degrees() {
                *valencies.entry(d).or_insert(0) += 1;
            }
            CandidateGraph {
                inner_product: value,
                graph,
                valencies,
            }
        })
        .collect()
}

/// The first candidate (by inner product) with uniform valency `k`.
///
/// # Errors
/// `NoRegularCandidate` if none has.
pub fn select_regular(candidates: &[CandidateGraph], k: usize) -> Result<&CandidateGraph> {
    candidates
        .iter()
        .find(|c| c.uniform_valency() == Some(k))
        .ok_or_else(|| ValidationError::NoRegularCandidate { expected: k }.into())
}
