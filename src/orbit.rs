//! Orbits of a vector set under a reflection subgroup.
//!
//! Reflections are applied exactly (see [`Lattice::reflect`](crate::lattice::Lattice::reflect))
//! and resolved to indices through a [`VectorIndex`] built once for the set.

use crate::error::{Result, ValidationError};
use crate::lattice::{Vector, VectorIndex};
use crate::permutation::Permutation;
use serde::Serialize;
use std::collections::VecDeque;
use tracing::debug;

/// A set of vector indices closed under the generating reflections, sorted ascending.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Orbit {
    indices: Vec<usize>,
}

impl Orbit {
    /// Member indices, ascending.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if the orbit is empty (never the case for a computed orbit).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Position of global index `index` inside this orbit.
    #[inline]
    pub fn position(&self, index: usize) -> Option<usize> {
        self.indices.binary_search(&index).ok()
    }
}

/// An exact partition of `0..n` into orbits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrbitPartition {
    orbits: Vec<Orbit>,
    orbit_of: Vec<usize>,
}

impl OrbitPartition {
    /// Orbits ordered by smallest member.
    pub fn orbits(&self) -> &[Orbit] {
        &self.orbits
    }

    /// Orbit number containing vector `index`.
    pub fn orbit_of(&self, index: usize) -> usize {
        self.orbit_of[index]
    }

    /// Orbit sizes, sorted ascending.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self.orbits.iter().map(Orbit::len).collect();
        sizes.sort_unstable();
        sizes
    }

    /// The first orbit (by smallest member) with exactly `size` members.
    pub fn first_of_size(&self, size: usize) -> Option<&Orbit> {
        self.orbits.iter().find(|o| o.len() == size)
    }
}

/// Partitions a vector set into orbits of the group generated by reflections in
/// `generators`, and checks the orbit-size multiset.
#[derive(Clone, Debug)]
pub struct ReflectionOrbitPartitioner {
    generators: Vec<Vector>,
    expected_sizes: Vec<usize>,
}

impl ReflectionOrbitPartitioner {
    /// `expected_sizes` is the known orbit-size multiset (any order).
    pub fn new(generators: Vec<Vector>, expected_sizes: Vec<usize>) -> Self {
        let mut expected_sizes = expected_sizes;
        expected_sizes.sort_unstable();
        Self {
            generators,
            expected_sizes,
        }
    }

    /// The reflecting vectors.
    pub fn generators(&self) -> &[Vector] {
        &self.generators
    }

    /// Runs the BFS partition.
    ///
    /// # Errors
    /// - `ZeroRoot` if a generator has norm zero.
    /// - `ToleranceExceeded` / `OffLattice` if a reflection leaves the lattice.
    /// - `UnknownVector` if a reflected vector is not in the set.
    /// - `Partition` if the orbits fail to cover the set exactly once.
    /// - `OrbitSizes` if the size multiset differs from the expected one.
    pub fn partition(&self, index: &VectorIndex<'_>) -> Result<OrbitPartition> {
        self.check_generators()?;
        let set = index.set();
        let lattice = set.lattice();
        let n = set.len();
        let mut orbit_of = vec![usize::MAX; n];
        let mut orbits = Vec::new();

        for start in 0..n {
            if orbit_of[start] != usize::MAX {
                continue;
            }
            let label = orbits.len();
            let mut members = vec![start];
            orbit_of[start] = label;
            let mut queue = VecDeque::from([start]);
            while let Some(i) = queue.pop_front() {
                let v = &set.vectors()[i];
                for r in &self.generators {
                    let j = index.resolve(&lattice.reflect(v, r)?)?;
                    if orbit_of[j] == usize::MAX {
                        orbit_of[j] = label;
                        members.push(j);
                        queue.push_back(j);
                    }
                }
            }
            members.sort_unstable();
            orbits.push(Orbit { indices: members });
        }

        // Exactness: every index in exactly one orbit.
        let mut hits = vec![0u32; n];
        for orbit in &orbits {
            for &i in orbit.indices() {
                hits[i] += 1;
            }
        }
        if let Some(index) = hits.iter().position(|&h| h != 1) {
            return Err(ValidationError::Partition { index }.into());
        }

        let partition = OrbitPartition { orbits, orbit_of };
        let sizes = partition.sizes();
        debug!(orbits = partition.orbits.len(), ?sizes, "orbit partition");
        if sizes != self.expected_sizes {
            return Err(ValidationError::OrbitSizes {
                expected: self.expected_sizes.clone(),
                found: sizes,
            }
            .into());
        }
        Ok(partition)
    }

    /// Each generator's reflection restricted to `orbit`, as a permutation of the orbit's
    /// positions (`0..orbit.len()`).
    ///
    /// # Errors
    /// Reflection errors as in [`partition`](Self::partition); `Partition` if a reflection
    /// leaves the orbit.
    pub fn generator_action(
        &self,
        index: &VectorIndex<'_>,
        orbit: &Orbit,
    ) -> Result<Vec<Permutation>> {
        self.check_generators()?;
        let set = index.set();
        let lattice = set.lattice();
        self.generators
            .iter()
            .map(|r| {
                let images = orbit
                    .indices()
                    .iter()
                    .map(|&i| -> Result<usize> {
                        let j = index.resolve(&lattice.reflect(&set.vectors()[i], r)?)?;
                        Ok(orbit
                            .position(j)
                            .ok_or(ValidationError::Partition { index: j })?)
                    })
                    .collect::<Result<Vec<usize>>>()?;
                Permutation::new(images)
            })
            .collect()
    }

    fn check_generators(&self) -> Result<()> {
        match self.generators.iter().find(|r| r.scaled_norm() == 0) {
            Some(r) => Err(ValidationError::ZeroRoot {
                coords: r.coords().to_vec(),
            }
            .into()),
            None => Ok(()),
        }
    }
}
