//! Breadth-first closure of permutation generators, and orbits of points.
//!
//! Everything here is capped: a search that would grow past its cap stops and returns
//! [`Bounded::Capped`] with what it found, so a partial group is never mistaken for the whole
//! one.

use crate::bitset::VertexSet;
use crate::bounded::Bounded;
use crate::error::{Result, ValidationError};
use crate::permutation::Permutation;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, warn};

/// Generators of a permutation group on `0..degree`.
#[derive(Clone, Debug)]
pub struct PermutationGroup {
    degree: usize,
    generators: Vec<Permutation>,
}

impl PermutationGroup {
    /// Wraps `generators`, all acting on `0..degree`.
    ///
    /// # Errors
    /// `DomainMismatch` if a generator has a different degree.
    pub fn new(degree: usize, generators: Vec<Permutation>) -> Result<Self> {
        if let Some(g) = generators.iter().find(|g| g.degree() != degree) {
            return Err(ValidationError::DomainMismatch {
                expected: degree,
                found: g.degree(),
            }
            .into());
        }
        Ok(Self { degree, generators })
    }

    /// Size of the domain.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The generators.
    pub fn generators(&self) -> &[Permutation] {
        &self.generators
    }

    /// All elements reachable from the identity by composing with generators.
    ///
    /// Elements come out in BFS order, identity first. The result never holds more than
    /// `max(cap, 1)` elements; if the closure would grow past that, it is `Capped`.
    pub fn close(&self, cap: usize) -> Bounded<Vec<Permutation>> {
        let cap = cap.max(1);
        let identity = Permutation::identity(self.degree);
        let mut visited: HashSet<Permutation> = HashSet::new();
        let mut elements = vec![identity.clone()];
        let mut queue = VecDeque::from([identity.clone()]);
        visited.insert(identity);

        while let Some(p) = queue.pop_front() {
            for g in &self.generators {
                let next = g.compose(&p);
                if visited.contains(&next) {
                    continue;
                }
                if visited.len() == cap {
                    warn!(cap, found = elements.len(), "group closure reached its cap");
                    return Bounded::Capped(elements);
                }
                visited.insert(next.clone());
                elements.push(next.clone());
                queue.push_back(next);
            }
        }

        debug!(degree = self.degree, order = elements.len(), "group closure complete");
        Bounded::Complete(elements)
    }

    /// Points reachable from `seeds` under the generators, sorted.
    ///
    /// Holds at most `max(cap, seeds)` points; a search that would exceed the cap is
    /// `Capped`.
    ///
    /// # Errors
    /// `VertexOutOfRange` for a seed outside the domain.
    pub fn orbit(&self, seeds: &[usize], cap: usize) -> Result<Bounded<Vec<usize>>> {
        let mut visited = VertexSet::empty(self.degree);
        let mut queue = VecDeque::with_capacity(self.degree);
        for &s in seeds {
            if s >= self.degree {
                return Err(ValidationError::VertexOutOfRange {
                    vertex: s,
                    size: self.degree,
                }
                .into());
            }
            if !visited.contains(s) {
                visited.insert(s);
                queue.push_back(s);
            }
        }
        let cap = cap.max(visited.len());
        let mut count = visited.len();
        let mut capped = false;

        'search: while let Some(p) = queue.pop_front() {
            for g in &self.generators {
                let q = g.apply(p);
                if visited.contains(q) {
                    continue;
                }
                if count == cap {
                    capped = true;
                    break 'search;
                }
                visited.insert(q);
                count += 1;
                queue.push_back(q);
            }
        }

        if capped {
            warn!(cap, found = count, "orbit search reached its cap");
        }
        Ok(Bounded::new(visited.to_vec(), capped))
    }

    /// Partition of the whole domain into orbits, each sorted, ordered by smallest point.
    pub fn orbits(&self) -> Vec<Vec<usize>> {
        let mut assigned = VertexSet::empty(self.degree);
        let mut orbits = Vec::new();
        for start in 0..self.degree {
            if assigned.contains(start) {
                continue;
            }
            let mut orbit = vec![start];
            assigned.insert(start);
            let mut head = 0;
            while head < orbit.len() {
                let p = orbit[head];
                head += 1;
                for g in &self.generators {
                    let q = g.apply(p);
                    if !assigned.contains(q) {
                        assigned.insert(q);
                        orbit.push(q);
                    }
                }
            }
            orbit.sort_unstable();
            orbits.push(orbit);
        }
        orbits
    }

    /// Returns `true` if the group acts transitively on its domain.
    pub fn is_transitive(&self) -> bool {
        self.degree == 0 || self.orbits().len() == 1
    }
}

/// Checks that `elements` form a group: identity present, closed under composition and
/// inversion, and all on one domain.
///
/// This is a full check, `O(|G|²)` compositions.
///
/// # Errors
/// `DomainMismatch` or `NotAGroup` naming the first violated axiom.
pub fn verify_group(elements: &[Permutation]) -> Result<()> {
    let Some(first) = elements.first() else {
        return Err(ValidationError::NotAGroup {
            reason: "no elements".to_string(),
        }
        .into());
    };
    let degree = first.degree();
    if let Some(p) = elements.iter().find(|p| p.degree() != degree) {
        return Err(ValidationError::DomainMismatch {
            expected: degree,
            found: p.degree(),
        }
        .into());
    }

    let set: HashSet<&Permutation> = elements.iter().collect();
    if !set.contains(&Permutation::identity(degree)) {
        return Err(ValidationError::NotAGroup {
            reason: "identity missing".to_string(),
        }
        .into());
    }
    for (i, a) in elements.iter().enumerate() {
        if !set.contains(&a.inverse()) {
            return Err(ValidationError::NotAGroup {
                reason: format!("inverse of element {i} missing"),
            }
            .into());
        }
        for (j, b) in elements.iter().enumerate() {
            if !set.contains(&a.compose(b)) {
                return Err(ValidationError::NotAGroup {
                    reason: format!("product of elements {i} and {j} missing"),
                }
                .into());
            }
        }
    }
    Ok(())
}
