//! Multi-word vertex bitsets.
//!
//! The single-word tricks (`trailing_zeros`, `t &= t - 1`) are applied word by word, so one
//! representation serves graphs of any order.

use std::fmt;

const WORD_BITS: usize = 64;

#[inline(always)]
const fn words_for(n: usize) -> usize {
    n.div_ceil(WORD_BITS)
}

#[inline(always)]
const fn bit(v: usize) -> u64 {
    1u64 << (v % WORD_BITS)
}

/// A set of vertices drawn from `0..capacity`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct VertexSet {
    words: Vec<u64>,
    capacity: usize,
}

impl VertexSet {
    /// Creates an empty set over `0..capacity`.
    pub fn empty(capacity: usize) -> Self {
        Self {
            words: vec![0u64; words_for(capacity)],
            capacity,
        }
    }

    /// Creates the full set `0..capacity`.
    pub fn full(capacity: usize) -> Self {
        let mut s = Self {
            words: vec![u64::MAX; words_for(capacity)],
            capacity,
        };
        s.clear_tail();
        s
    }

    /// Builds a set from vertex indices.
    ///
    /// # Panics
    /// Panics in debug builds if an index is out of range.
    pub fn from_indices(capacity: usize, indices: &[usize]) -> Self {
        let mut s = Self::empty(capacity);
        for &v in indices {
            s.insert(v);
        }
        s
    }

    /// Zeroes the bits past `capacity` in the last word.
    #[inline]
    fn clear_tail(&mut self) {
        let rem = self.capacity % WORD_BITS;
        if rem != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << rem) - 1;
            }
        }
    }

    /// Size of the universe this set is drawn from.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Adds `v`.
    #[inline(always)]
    pub fn insert(&mut self, v: usize) {
        debug_assert!(v < self.capacity, "vertex {v} out of range");
        self.words[v / WORD_BITS] |= bit(v);
    }

    /// Removes `v`.
    #[inline(always)]
    pub fn remove(&mut self, v: usize) {
        debug_assert!(v < self.capacity, "vertex {v} out of range");
        self.words[v / WORD_BITS] &= !bit(v);
    }

    /// Returns whether `v` is present.
    #[inline(always)]
    pub fn contains(&self, v: usize) -> bool {
        v < self.capacity && (self.words[v / WORD_BITS] & bit(v)) != 0
    }

    /// Number of vertices present.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if no vertex is present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Smallest vertex present.
    #[inline]
    pub fn first(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .find(|(_, w)| **w != 0)
            .map(|(i, &w)| i * WORD_BITS + w.trailing_zeros() as usize)
    }

    /// Returns `self ∩ other` as a new set.
    #[inline]
    pub fn intersection(&self, other: &Self) -> Self {
        debug_assert_eq!(self.capacity, other.capacity);
        Self {
            words: self.words.iter().zip(&other.words).map(|(a, b)| a & b).collect(),
            capacity: self.capacity,
        }
    }

    /// `|self ∩ other|` without allocating.
    #[inline]
    pub fn intersection_len(&self, other: &Self) -> usize {
        debug_assert_eq!(self.capacity, other.capacity);
        self.words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a & b).count_ones() as usize)
            .sum()
    }

    /// Removes every vertex of `other` from `self`.
    #[inline]
    pub fn difference_with(&mut self, other: &Self) {
        debug_assert_eq!(self.capacity, other.capacity);
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a &= !b;
        }
    }

    /// Returns `true` if every vertex of `self` is in `other`.
    #[inline]
    pub fn is_subset(&self, other: &Self) -> bool {
        debug_assert_eq!(self.capacity, other.capacity);
        self.words.iter().zip(&other.words).all(|(a, b)| a & !b == 0)
    }

    /// Complement within `0..capacity`.
    pub fn complement(&self) -> Self {
        let mut s = Self {
            words: self.words.iter().map(|w| !w).collect(),
            capacity: self.capacity,
        };
        s.clear_tail();
        s
    }

    /// Iterates the vertices present in increasing order.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: &self.words,
            word_idx: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }

    /// Collects the vertices present in increasing order.
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl fmt::Debug for VertexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over the members of a [`VertexSet`].
pub struct Iter<'a> {
    words: &'a [u64],
    word_idx: usize,
    current: u64,
}

impl Iterator for Iter<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current != 0 {
                let v = self.word_idx * WORD_BITS + self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some(v);
            }
            self.word_idx += 1;
            self.current = *self.words.get(self.word_idx)?;
        }
    }
}

impl<'a> IntoIterator for &'a VertexSet {
    type Item = usize;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
