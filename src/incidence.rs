//! Point/line incidence structures.
//!
//! Tables arrive already loaded (as lists of point indices per line); this module checks
//! they describe a partial linear space and answers the questions automorphism searches
//! need.

use crate::graph::Graph;
use crate::permutation::Permutation;
use std::collections::HashMap;
use thiserror::Error;

/// Malformed incidence tables.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IncidenceError {
    /// The table has no lines.
    #[error("incidence table has no lines")]
    NoLines,

    /// A line has a different size from the first one.
    #[error("line {line} has {found} points, expected {expected}")]
    LineSize {
        /// Offending line.
        line: usize,
        /// Size of line 0.
        expected: usize,
        /// Size found.
        found: usize,
    },

    /// A line names a point outside `0..points`.
    #[error("line {line} names point {point}, but there are only {points} points")]
    PointOutOfRange {
        /// Offending line.
        line: usize,
        /// Offending point.
        point: usize,
        /// Number of points.
        points: usize,
    },

    /// A line lists the same point twice.
    #[error("line {line} lists point {point} twice")]
    RepeatedPoint {
        /// Offending line.
        line: usize,
        /// Repeated point.
        point: usize,
    },

    /// Two lines share two or more points.
    #[error("lines {first} and {second} share more than one point")]
    LinesMeetTwice {
        /// Earlier line.
        first: usize,
        /// Later line.
        second: usize,
    },
}

/// A partial linear space: equal-size lines, any two points on at most one common line.
#[derive(Clone, Debug)]
pub struct IncidenceStructure {
    points: usize,
    lines: Vec<Vec<usize>>,
    line_of: HashMap<Vec<usize>, usize>,
    through: Vec<Vec<usize>>,
}

impl IncidenceStructure {
    /// Validates and indexes an incidence table. Each line's points are sorted.
    ///
    /// # Errors
    /// See [`IncidenceError`].
    pub fn new(points: usize, lines: Vec<Vec<usize>>) -> Result<Self, IncidenceError> {
        let Some(first) = lines.first() else {
            return Err(IncidenceError::NoLines);
        };
        let size = first.len();

        let mut sorted_lines = Vec::with_capacity(lines.len());
        for (line, mut pts) in lines.into_iter().enumerate() {
            if pts.len() != size {
                return Err(IncidenceError::LineSize {
                    line,
                    expected: size,
                    found: pts.len(),
                });
            }
            if let Some(&point) = pts.iter().find(|&&p| p >= points) {
                return Err(IncidenceError::PointOutOfRange { line, point, points });
            }
            pts.sort_unstable();
            if let Some(w) = pts.windows(2).find(|w| w[0] == w[1]) {
                return Err(IncidenceError::RepeatedPoint { line, point: w[0] });
            }
            sorted_lines.push(pts);
        }

        // Partial linear space: each point pair on at most one line.
        let mut pair_line: HashMap<(usize, usize), usize> = HashMap::new();
        let mut through = vec![Vec::new(); points];
        for (line, pts) in sorted_lines.iter().enumerate() {
            for (i, &a) in pts.iter().enumerate() {
                through[a].push(line);
                for &b in &pts[i + 1..] {
                    if let Some(first) = pair_line.insert((a, b), line) {
                        return Err(IncidenceError::LinesMeetTwice {
                            first,
                            second: line,
                        });
                    }
                }
            }
        }

        let line_of = sorted_lines
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), i))
            .collect();
        Ok(Self {
            points,
            lines: sorted_lines,
            line_of,
            through,
        })
    }

    /// Number of points.
    pub fn point_count(&self) -> usize {
        self.points
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Points per line.
    pub fn line_size(&self) -> usize {
        self.lines.first().map_or(0, Vec::len)
    }

    /// The lines, each sorted.
    pub fn lines(&self) -> &[Vec<usize>] {
        &self.lines
    }

    /// Lines through `point`, ascending.
    pub fn lines_through(&self, point: usize) -> &[usize] {
        &self.through[point]
    }

    /// Number of lines through each point.
    pub fn point_degrees(&self) -> Vec<usize> {
        self.through.iter().map(Vec::len).collect()
    }

    /// Distinct points are adjacent iff some line contains both.
    pub fn collinearity_graph(&self) -> Graph {
        let mut graph = Graph::empty(self.points);
        for pts in &self.lines {
            for (i, &a) in pts.iter().enumerate() {
                for &b in &pts[i + 1..] {
                    graph.add_edge(a, b);
                }
            }
        }
        graph
    }

    /// Index of the line `{g(p) : p ∈ line}` for each line, if every image is a line.
    pub fn line_permutation(&self, g: &Permutation) -> Option<Permutation> {
        if g.degree() != self.points {
            return None;
        }
        let images = self
            .lines
            .iter()
            .map(|l| self.line_of.get(&g.apply_set(l)).copied())
            .collect::<Option<Vec<usize>>>()?;
        Permutation::new(images).ok()
    }

    /// Returns `true` if `g` maps every line onto a line.
    pub fn is_automorphism(&self, g: &Permutation) -> bool {
        self.line_permutation(g).is_some()
    }

    /// Checks the generalized-quadrangle axiom: for every point `p` and line `L` with
    /// `p ∉ L`, exactly one point of `L` is collinear with `p`.
    pub fn is_generalized_quadrangle(&self) -> bool {
        let graph = self.collinearity_graph();
        (0..self.points).all(|p| {
            self.lines.iter().all(|l| {
                l.binary_search(&p).is_ok()
                    || l.iter().filter(|&&q| graph.has_edge(p, q)).count() == 1
            })
        })
    }
}
