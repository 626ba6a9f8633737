//! Enumeration of all cliques of an exact size.
//!
//! Branch-and-bound with greedy-colouring bounds (Tomita-style). Each level colours its
//! candidate pool once; the branching (pivot) vertex is always taken from the highest
//! remaining colour class, and a level is abandoned as soon as
//! `|clique| + colour bound < k`. Because a vertex is dropped from its level's pool once its
//! branch is exhausted, every k-clique is produced exactly once.
//!
//! The search keeps its own stack, so the enumerator is a plain lazy [`Iterator`]: nothing
//! is computed past the last clique pulled.

use crate::bitset::VertexSet;
use crate::bounded::Bounded;
use crate::graph::Graph;
use serde::Serialize;
use tracing::warn;

// ============================================================================
// Clique
// ============================================================================

/// A set of pairwise-adjacent vertices, sorted ascending.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Clique(Vec<usize>);

impl Clique {
    /// Wraps a vertex set, sorting and deduplicating it. Adjacency is not checked.
    pub fn new(mut vertices: Vec<usize>) -> Self {
        vertices.sort_unstable();
        vertices.dedup();
        Self(vertices)
    }

    /// Vertices, ascending.
    #[inline]
    pub fn vertices(&self) -> &[usize] {
        &self.0
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the empty clique.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if the two cliques share no vertex.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        // Both sorted: merge walk.
        let (mut i, mut j) = (0, 0);
        while i < self.0.len() && j < other.0.len() {
            match self.0[i].cmp(&other.0[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => return false,
            }
        }
        true
    }
}

// ============================================================================
// CliqueEnumerator
// ============================================================================

/// One level of the search: a coloured candidate pool and how far it has been consumed.
#[derive(Clone, Debug)]
struct Frame {
    /// Candidates in colour order.
    order: Vec<usize>,
    /// `colors[i]` is the colour of `order[i]`; non-decreasing.
    colors: Vec<usize>,
    /// `order[..pos]` is still to be branched on.
    pos: usize,
    /// Remaining candidates (exactly `order[..=pos]` while a branch is open).
    candidates: VertexSet,
}

impl Frame {
    fn new(graph: &Graph, candidates: VertexSet) -> Self {
        let (order, colors) = color_sort(graph, &candidates);
        Self {
            pos: order.len(),
            order,
            colors,
            candidates,
        }
    }
}

/// Lazy, non-restartable enumerator of every `k`-clique of a graph.
///
/// ```
/// use rootverify::clique::CliqueEnumerator;
/// use rootverify::graph::Graph;
///
/// let k4 = Graph::complete(4);
/// assert_eq!(CliqueEnumerator::new(&k4, 3).count(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct CliqueEnumerator<'g> {
    graph: &'g Graph,
    k: usize,
    cap: Option<usize>,
    stack: Vec<Frame>,
    current: Vec<usize>,
    produced: usize,
    capped: bool,
}

impl<'g> CliqueEnumerator<'g> {
    /// Enumerates the `k`-cliques of `graph`. `k == 0` and `k > |V|` produce nothing.
    pub fn new(graph: &'g Graph, k: usize) -> Self {
        let n = graph.order();
        let mut stack = Vec::new();
        if k > 0 && k <= n {
            stack.push(Frame::new(graph, VertexSet::full(n)));
        }
        Self {
            graph,
            k,
            cap: None,
            stack,
            current: Vec::with_capacity(k),
            produced: 0,
            capped: false,
        }
    }

    /// Stops after `cap` cliques; if another one exists, [`capped`](Self::capped) turns true.
    #[must_use]
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = Some(cap);
        self
    }

    /// Target clique size.
    pub fn target_size(&self) -> usize {
        self.k
    }

    /// Number of cliques produced so far.
    pub fn produced(&self) -> usize {
        self.produced
    }

    /// Returns `true` once the enumeration stopped at its cap with cliques left unreported.
    pub fn capped(&self) -> bool {
        self.capped
    }

    /// Drains the enumerator, tagging the result with whether the cap was hit.
    pub fn collect_bounded(mut self) -> Bounded<Vec<Clique>> {
        let cliques: Vec<Clique> = self.by_ref().collect();
        if self.capped {
            warn!(cap = ?self.cap, k = self.k, "clique enumeration reached its cap");
        }
        Bounded::new(cliques, self.capped)
    }
}

impl Iterator for CliqueEnumerator<'_> {
    type Item = Clique;

    fn next(&mut self) -> Option<Clique> {
        let graph = self.graph;
        let k = self.k;
        loop {
            let size = self.current.len();
            let frame = self.stack.last_mut()?;

            // Colour bound: no clique in order[..pos] is larger than colors[pos - 1].
            if frame.pos == 0 || size + frame.colors[frame.pos - 1] < k {
                self.stack.pop();
                self.current.pop();
                continue;
            }

            frame.pos -= 1;
            let v = frame.order[frame.pos];
            let next_candidates = frame.candidates.intersection(graph.neighbors(v));
            frame.candidates.remove(v);

            if size + 1 == k {
                if self.cap == Some(self.produced) {
                    self.capped = true;
                    self.stack.clear();
                    self.current.clear();
                    return None;
                }
                self.produced += 1;
                let mut vertices = Vec::with_capacity(k);
                vertices.extend_from_slice(&self.current);
                vertices.push(v);
                vertices.sort_unstable();
                return Some(Clique(vertices));
            }

            if size + 1 + next_candidates.len() < k {
                continue;
            }
            self.current.push(v);
            self.stack.push(Frame::new(graph, next_candidates));
        }
    }
}

/// All `k`-cliques of `graph`, sorted.
pub fn enumerate_cliques(graph: &Graph, k: usize) -> Vec<Clique> {
    let mut cliques: Vec<Clique> = CliqueEnumerator::new(graph, k).collect();
    cliques.sort_unstable();
    cliques
}

// ============================================================================
// Greedy coloring for clique bound
// ============================================================================

/// Greedy sequential colouring of `candidates`; returns vertices in colour order with their
/// colours (1-based, non-decreasing).
fn color_sort(graph: &Graph, candidates: &VertexSet) -> (Vec<usize>, Vec<usize>) {
    let cap = candidates.len();
    let mut order = Vec::with_capacity(cap);
    let mut colors = Vec::with_capacity(cap);
    let mut uncolored = candidates.clone();
    let mut color = 0usize;

    while !uncolored.is_empty() {
        color += 1;
        let mut available = uncolored.clone();
        while let Some(v) = available.first() {
            order.push(v);
            colors.push(color);
            uncolored.remove(v);
            available.remove(v);
            available.difference_with(graph.neighbors(v));
        }
    }
    (order, colors)
}

// ============================================================================
// Tests
// ============================================================================
