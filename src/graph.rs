//! Symmetric adjacency graphs over `0..n` with bitset rows, plus 0/1 matrix parsing.

use crate::bitset::VertexSet;
use rand::Rng;
use std::fmt;
use thiserror::Error;

// ============================================================================
// Graph
// ============================================================================

/// A simple undirected graph.
///
/// Representation:
/// - `rows[v]` is the neighbour bitset of vertex `v`.
/// - The relation is symmetric and has no self-loops; every constructor maintains this.
#[derive(Clone, PartialEq, Eq)]
pub struct Graph {
    n: usize,
    rows: Vec<VertexSet>,
}

impl Graph {
    /// Creates an edgeless graph on `n` vertices.
    pub fn empty(n: usize) -> Self {
        Self {
            n,
            rows: vec![VertexSet::empty(n); n],
        }
    }

    /// Creates the complete graph on `n` vertices.
    pub fn complete(n: usize) -> Self {
        let mut g = Self::empty(n);
        for v in 0..n {
            let mut row = VertexSet::full(n);
            row.remove(v);
            g.rows[v] = row;
        }
        g
    }

    /// Builds a graph from an edge list.
    ///
    /// # Panics
    /// Panics if an endpoint is out of range or an edge is a self-loop.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut g = Self::empty(n);
        for &(u, v) in edges {
            g.add_edge(u, v);
        }
        g
    }

    /// Builds a graph whose edges are the pairs `(i, j)` with `i != j` and `related(i, j)`.
    ///
    /// `related` is evaluated once per unordered pair (with `i < j`).
    pub fn from_relation<F: FnMut(usize, usize) -> bool>(n: usize, mut related: F) -> Self {
        let mut g = Self::empty(n);
        for i in 0..n {
            for j in (i + 1)..n {
                if related(i, j) {
                    g.add_edge(i, j);
                }
            }
        }
        g
    }

    /// Erdős–Rényi random graph with edge probability `p`.
    pub fn random<R: Rng>(rng: &mut R, n: usize, p: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&p), "p must be in [0, 1]");
        Self::from_relation(n, |_, _| rng.random_bool(p))
    }

    /// Number of vertices.
    #[inline(always)]
    pub fn order(&self) -> usize {
        self.n
    }

    /// Adds the edge `(u, v)`.
    ///
    /// # Panics
    /// Panics if `u == v` or either endpoint is out of range.
    #[inline]
    pub fn add_edge(&mut self, u: usize, v: usize) {
        assert!(u < self.n && v < self.n, "edge ({u}, {v}) out of range");
        assert!(u != v, "self-loop at vertex {u}");
        self.rows[u].insert(v);
        self.rows[v].insert(u);
    }

    /// Removes the edge `(u, v)` if present.
    #[inline]
    pub fn remove_edge(&mut self, u: usize, v: usize) {
        debug_assert!(u < self.n && v < self.n);
        self.rows[u].remove(v);
        self.rows[v].remove(u);
    }

    /// Flips the edge `(u, v)`.
    #[inline]
    pub fn flip_edge(&mut self, u: usize, v: usize) {
        if self.has_edge(u, v) {
            self.remove_edge(u, v);
        } else {
            self.add_edge(u, v);
        }
    }

    /// Returns whether the edge `(u, v)` exists.
    #[inline(always)]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        debug_assert!(u < self.n && v < self.n);
        self.rows[u].contains(v)
    }

    /// Neighbour set of `v`.
    #[inline(always)]
    pub fn neighbors(&self, v: usize) -> &VertexSet {
        &self.rows[v]
    }

    /// Degree of `v`.
    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.rows[v].len()
    }

    /// Degrees of every vertex, in vertex order.
    pub fn degrees(&self) -> Vec<usize> {
        (0..self.n).map(|v| self.degree(v)).collect()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.rows.iter().map(VertexSet::len).sum::<usize>() / 2
    }

    /// \(|N(u) \cap N(v)|\).
    #[inline]
    pub fn common_neighbor_count(&self, u: usize, v: usize) -> usize {
        self.rows[u].intersection_len(&self.rows[v])
    }

    /// The complement graph: `u ~ v` iff `u != v` and `u` is not adjacent to `v` here.
    pub fn complement(&self) -> Self {
        let rows = (0..self.n)
            .map(|v| {
                let mut row = self.rows[v].complement();
                row.remove(v);
                row
            })
            .collect();
        Self { n: self.n, rows }
    }

    /// Subgraph induced on `vertices`; vertex `i` of the result is `vertices[i]`.
    pub fn induced(&self, vertices: &[usize]) -> Self {
        Self::from_relation(vertices.len(), |i, j| self.has_edge(vertices[i], vertices[j]))
    }

    /// Returns `true` if `vertices` are pairwise adjacent.
    pub fn is_clique(&self, vertices: &[usize]) -> bool {
        vertices.iter().enumerate().all(|(i, &u)| {
            vertices[i + 1..].iter().all(|&v| u != v && self.has_edge(u, v))
        })
    }

    /// Returns `true` if no two of `vertices` are adjacent.
    pub fn is_independent(&self, vertices: &[usize]) -> bool {
        vertices.iter().enumerate().all(|(i, &u)| {
            vertices[i + 1..].iter().all(|&v| !self.has_edge(u, v))
        })
    }

    /// Parses a `0/1` adjacency matrix (see [`parse_adjacency_matrix`]).
    ///
    /// # Errors
    /// Propagates any parse or validation error.
    pub fn from_matrix_text(text: &str) -> Result<Self, GraphParseError> {
        parse_adjacency_matrix(text)
    }

    /// Writes the graph as a `0/1` adjacency matrix, one row per line.
    pub fn to_matrix_text(&self) -> String {
        let mut out = String::with_capacity(self.n * (self.n + 1));
        for u in 0..self.n {
            for v in 0..self.n {
                out.push(if self.has_edge(u, v) { '1' } else { '0' });
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("order", &self.n)
            .field("edges", &self.edge_count())
            .finish()
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Errors encountered while parsing/validating an adjacency matrix.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphParseError {
    /// No non-empty rows were found.
    #[error("adjacency matrix is empty")]
    Empty,
    /// Matrix is not square.
    #[error("adjacency matrix is not square: row {row} has length {got}, expected {expected}")]
    NonSquare {
        /// The row index with wrong length.
        row: usize,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },
    /// Encountered a non `0/1` character.
    #[error("invalid character at ({row}, {col}): {ch:?} (expected '0' or '1')")]
    InvalidChar {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// The invalid character.
        ch: char,
    },
    /// Diagonal contains a `1`.
    #[error("self-loop detected at vertex {vertex}")]
    SelfLoop {
        /// The vertex with a self-loop.
        vertex: usize,
    },
    /// `A[i][j] != A[j][i]`.
    #[error("matrix is not symmetric at ({i},{j}): A[i][j]={a_ij}, A[j][i]={a_ji}")]
    NotSymmetric {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
        /// Value at A[i][j].
        a_ij: u8,
        /// Value at A[j][i].
        a_ji: u8,
    },
}

/// Parses a `0/1` adjacency matrix from text.
///
/// Rules:
/// - Blank lines are ignored; surrounding whitespace on a row is trimmed.
/// - The matrix must be square, symmetric, and have a zero diagonal.
///
/// # Errors
/// Returns an error if the input is empty, non-square, contains invalid characters,
/// has self-loops, or is not symmetric.
pub fn parse_adjacency_matrix(text: &str) -> Result<Graph, GraphParseError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(GraphParseError::Empty);
    }
    let n = lines.len();

    let mut rows = Vec::with_capacity(n);
    for (i, line) in lines.iter().enumerate() {
        let bytes = line.as_bytes();
        if bytes.len() != n {
            return Err(GraphParseError::NonSquare {
                row: i,
                expected: n,
                got: bytes.len(),
            });
        }
        let mut row = VertexSet::empty(n);
        for (j, &b) in bytes.iter().enumerate() {
            match b {
                b'0' => {}
                b'1' => row.insert(j),
                _ => {
                    return Err(GraphParseError::InvalidChar {
                        row: i,
                        col: j,
                        ch: b as char,
                    })
                }
            }
        }
        rows.push(row);
    }

    // Validate diagonal and symmetry.
    for (i, row) in rows.iter().enumerate() {
        if row.contains(i) {
            return Err(GraphParseError::SelfLoop { vertex: i });
        }
    }
    for i in 0..n {
        for j in (i + 1)..n {
            let a_ij = u8::from(rows[i].contains(j));
            let a_ji = u8::from(rows[j].contains(i));
            if a_ij != a_ji {
                return Err(GraphParseError::NotSymmetric { i, j, a_ij, a_ji });
            }
        }
    }

    Ok(Graph { n, rows })
}

// ============================================================================
// Tests
// ============================================================================
