//! Permutations of a finite domain `0..n`.

use crate::error::{Result, ValidationError};
use std::fmt;

/// A bijection of `0..degree`, stored as its image list.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Permutation {
    images: Box<[usize]>,
}

impl Permutation {
    /// The identity on `0..degree`.
    pub fn identity(degree: usize) -> Self {
        Self {
            images: (0..degree).collect(),
        }
    }

    /// Builds a permutation from `images[i] = π(i)`.
    ///
    /// # Errors
    /// `InvalidPermutation` if `images` is not a bijection of `0..images.len()`.
    pub fn new(images: Vec<usize>) -> Result<Self> {
        let n = images.len();
        let mut seen = vec![false; n];
        for &value in &images {
            if value >= n || seen[value] {
                return Err(ValidationError::InvalidPermutation { images }.into());
            }
            seen[value] = true;
        }
        Ok(Self {
            images: images.into_boxed_slice(),
        })
    }

    /// Builds a permutation from disjoint cycles on `0..degree`.
    ///
    /// # Errors
    /// `InvalidPermutation` if a point is out of range or appears twice.
    pub fn from_cycles(degree: usize, cycles: &[&[usize]]) -> Result<Self> {
        let mut images: Vec<usize> = (0..degree).collect();
        let mut touched = vec![false; degree];
        for cycle in cycles {
            for (i, &a) in cycle.iter().enumerate() {
                if a >= degree || touched[a] {
                    return Err(ValidationError::InvalidPermutation { images }.into());
                }
                touched[a] = true;
                images[a] = cycle[(i + 1) % cycle.len()];
            }
        }
        Self::new(images)
    }

    /// Size of the domain.
    #[inline(always)]
    pub fn degree(&self) -> usize {
        self.images.len()
    }

    /// \(\pi(i)\).
    #[inline(always)]
    pub fn apply(&self, i: usize) -> usize {
        self.images[i]
    }

    /// The image list.
    #[inline]
    pub fn images(&self) -> &[usize] {
        &self.images
    }

    /// Function composition `self ∘ other`: first `other`, then `self`.
    ///
    /// # Panics
    /// Panics in debug builds if the degrees differ.
    #[inline]
    pub fn compose(&self, other: &Self) -> Self {
        debug_assert_eq!(self.degree(), other.degree());
        Self {
            images: other.images.iter().map(|&i| self.images[i]).collect(),
        }
    }

    /// The inverse permutation.
    pub fn inverse(&self) -> Self {
        let mut inv = vec![0usize; self.degree()];
        for (i, &j) in self.images.iter().enumerate() {
            inv[j] = i;
        }
        Self {
            images: inv.into_boxed_slice(),
        }
    }

    /// Returns `true` for the identity.
    pub fn is_identity(&self) -> bool {
        self.images.iter().enumerate().all(|(i, &j)| i == j)
    }

    /// Image of a point set, sorted.
    pub fn apply_set(&self, points: &[usize]) -> Vec<usize> {
        let mut out: Vec<usize> = points.iter().map(|&p| self.images[p]).collect();
        out.sort_unstable();
        out
    }

    /// Returns `true` if \(\pi(\text{from}) = \text{to}\) as sets.
    ///
    /// `to` must be sorted and duplicate-free.
    pub fn maps_set_onto(&self, from: &[usize], to: &[usize]) -> bool {
        debug_assert!(to.windows(2).all(|w| w[0] < w[1]));
        from.len() == to.len() && from.iter().all(|&p| to.binary_search(&self.images[p]).is_ok())
    }

    /// Order of the permutation (lcm of its cycle lengths).
    pub fn order(&self) -> usize {
        let mut seen = vec![false; self.degree()];
        let mut order = 1usize;
        for start in 0..self.degree() {
            if seen[start] {
                continue;
            }
            let mut len = 0usize;
            let mut p = start;
            while !seen[p] {
                seen[p] = true;
                p = self.images[p];
                len += 1;
            }
            order = lcm(order, len);
        }
        order
    }
}

fn lcm(a: usize, b: usize) -> usize {
    let (mut x, mut y) = (a, b);
    while y != 0 {
        let t = x % y;
        x = y;
        y = t;
    }
    a / x * b
}

impl fmt::Debug for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Permutation{:?}", &self.images[..])
    }
}
