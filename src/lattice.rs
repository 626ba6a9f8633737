//! Exact lattice vectors and root-system construction.
//!
//! Coordinates are stored as `i64` numerators over one denominator owned by the [`Lattice`]
//! (2 for E8, so half-integer roots are exact). Dot products and reflections never touch
//! floating point; the only float entry point is [`Lattice::snap`] for coordinate rays
//! supplied from outside.

use crate::error::{Result, ValidationError, VerifyError};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use tracing::debug;

// ============================================================================
// Rational
// ============================================================================

/// Exact reduced fraction with positive denominator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Rational {
    num: i64,
    den: i64,
}

const fn gcd(mut a: i64, mut b: i64) -> i64 {
    a = a.abs();
    b = b.abs();
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Rational {
    /// Builds `num / den` in lowest terms.
    ///
    /// # Panics
    /// Panics if `den == 0`; see [`Rational::checked_new`].
    pub fn new(num: i64, den: i64) -> Self {
        assert!(den != 0, "zero denominator");
        Self::reduced(num, den)
    }

    /// As [`Rational::new`], `None` for a zero denominator.
    pub fn checked_new(num: i64, den: i64) -> Option<Self> {
        (den != 0).then(|| Self::reduced(num, den))
    }

    fn reduced(num: i64, den: i64) -> Self {
        let g = gcd(num, den).max(1);
        let sign = den.signum();
        Self {
            num: sign * num / g,
            den: sign * den / g,
        }
    }

    /// An integer as a fraction.
    pub const fn integer(n: i64) -> Self {
        Self { num: n, den: 1 }
    }

    /// Numerator (lowest terms).
    pub const fn numer(self) -> i64 {
        self.num
    }

    /// Denominator (lowest terms, positive).
    pub const fn denom(self) -> i64 {
        self.den
    }

}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        (i128::from(self.num) * i128::from(other.den))
            .cmp(&(i128::from(other.num) * i128::from(self.den)))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

// ============================================================================
// Vector / Lattice
// ============================================================================

/// An immutable lattice vector, stored as scaled integer numerators.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vector {
    coords: Box<[i64]>,
}

impl Vector {
    /// Wraps scaled numerators (actual coordinate = numerator / lattice denominator).
    pub fn new(coords: impl Into<Box<[i64]>>) -> Self {
        Self {
            coords: coords.into(),
        }
    }

    /// Scaled numerators.
    #[inline(always)]
    pub fn coords(&self) -> &[i64] {
        &self.coords
    }

    /// Number of coordinates.
    #[inline(always)]
    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    /// Dot product of scaled numerators (actual value times `denominator²`).
    #[inline]
    pub fn scaled_dot(&self, other: &Self) -> i64 {
        debug_assert_eq!(self.dimension(), other.dimension());
        self.coords.iter().zip(other.coords.iter()).map(|(a, b)| a * b).sum()
    }

    /// Scaled squared norm.
    #[inline]
    pub fn scaled_norm(&self) -> i64 {
        self.scaled_dot(self)
    }
}

/// Membership rule of the defining lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LatticeRule {
    /// Every rational vector with the lattice denominator.
    Any,
    /// \(\mathbb{Z}^n\).
    Integral,
    /// The E8 lattice: all-integer or all-half-integer coordinates with even coordinate sum.
    E8,
}

/// A lattice: dimension, shared coordinate denominator, and membership rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Lattice {
    dimension: usize,
    denominator: i64,
    rule: LatticeRule,
}

impl Lattice {
    /// Creates a lattice description.
    ///
    /// # Panics
    /// Panics if `denominator <= 0`; see [`Lattice::try_new`].
    pub fn new(dimension: usize, denominator: i64, rule: LatticeRule) -> Self {
        assert!(denominator > 0, "denominator must be positive");
        Self {
            dimension,
            denominator,
            rule,
        }
    }

    /// Creates a lattice description from caller-supplied parameters.
    ///
    /// # Errors
    /// `Denominator` if `denominator <= 0`.
    pub fn try_new(dimension: usize, denominator: i64, rule: LatticeRule) -> Result<Self> {
        if denominator <= 0 {
            return Err(ValidationError::Denominator { found: denominator }.into());
        }
        Ok(Self {
            dimension,
            denominator,
            rule,
        })
    }

    /// Number of coordinates.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Shared coordinate denominator.
    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    /// Membership rule.
    pub fn rule(&self) -> LatticeRule {
        self.rule
    }

    /// Returns whether `v` lies on this lattice.
    pub fn contains(&self, v: &Vector) -> bool {
        if v.dimension() != self.dimension {
            return false;
        }
        let d = self.denominator;
        match self.rule {
            LatticeRule::Any => true,
            LatticeRule::Integral => v.coords().iter().all(|c| c % d == 0),
            LatticeRule::E8 => {
                // Work in doubled coordinates: integers are even, half-integers odd.
                if !v.coords().iter().all(|c| (2 * c) % d == 0) {
                    return false;
                }
                let doubled: Vec<i64> = v.coords().iter().map(|c| 2 * c / d).collect();
                let parity = doubled.first().map_or(0, |h| h.rem_euclid(2));
                doubled.iter().all(|h| h.rem_euclid(2) == parity)
                    && doubled.iter().sum::<i64>().rem_euclid(4) == 0
            }
        }
    }

    /// Exact inner product of two lattice vectors.
    #[inline]
    pub fn dot(&self, a: &Vector, b: &Vector) -> Rational {
        Rational::new(a.scaled_dot(b), self.denominator * self.denominator)
    }

    /// Reflects `v` in the hyperplane orthogonal to `root`:
    /// \(v - \frac{2\langle v, r\rangle}{\langle r, r\rangle} r\), computed exactly.
    ///
    /// # Errors
    /// `ZeroRoot` if `root` has norm zero; `ToleranceExceeded` (with zero tolerance) if the
    /// image is not representable over this lattice's denominator; `OffLattice` if it is
    /// representable but violates the rule.
    pub fn reflect(&self, v: &Vector, root: &Vector) -> Result<Vector> {
        let rr = root.scaled_norm();
        if rr == 0 {
            return Err(ValidationError::ZeroRoot {
                coords: root.coords().to_vec(),
            }
            .into());
        }
        let two_vr = 2 * v.scaled_dot(root);
        let mut out = Vec::with_capacity(v.dimension());
        for (i, (&x, &r)) in v.coords().iter().zip(root.coords().iter()).enumerate() {
            let num = x * rr - two_vr * r;
            if num % rr != 0 {
                let rem = num.rem_euclid(rr);
                let dist = rem.min(rr - rem) as f64 / rr as f64 / self.denominator as f64;
                return Err(VerifyError::ToleranceExceeded {
                    coordinate: i,
                    residual: dist,
                    tolerance: 0.0,
                });
            }
            out.push(num / rr);
        }
        let image = Vector::new(out);
        if !self.contains(&image) {
            return Err(ValidationError::OffLattice {
                coords: image.coords().to_vec(),
                denominator: self.denominator,
            }
            .into());
        }
        Ok(image)
    }

    /// Canonicalizes floating coordinates onto this lattice.
    ///
    /// # Errors
    /// `ToleranceExceeded` if a coordinate lies farther than `tolerance` from the nearest
    /// multiple of `1 / denominator`; `OffLattice` if the snapped vector violates the rule;
    /// `Dimension` on a length mismatch.
    pub fn snap(&self, coords: &[f64], tolerance: f64) -> Result<Vector> {
        if coords.len() != self.dimension {
            return Err(ValidationError::Dimension {
                index: 0,
                expected: self.dimension,
                found: coords.len(),
            }
            .into());
        }
        let d = self.denominator as f64;
        let mut out = Vec::with_capacity(coords.len());
        for (i, &x) in coords.iter().enumerate() {
            let scaled = x * d;
            let nearest = scaled.round();
            let residual = (scaled - nearest).abs() / d;
            if !residual.is_finite() || residual > tolerance {
                return Err(VerifyError::ToleranceExceeded {
                    coordinate: i,
                    residual,
                    tolerance,
                });
            }
            out.push(nearest as i64);
        }
        let v = Vector::new(out);
        if !self.contains(&v) {
            return Err(ValidationError::OffLattice {
                coords: v.coords().to_vec(),
                denominator: self.denominator,
            }
            .into());
        }
        Ok(v)
    }
}

// ============================================================================
// VectorSet / VectorIndex
// ============================================================================

/// Deduplicated, order-indexed vectors sharing one squared norm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorSet {
    lattice: Lattice,
    vectors: Vec<Vector>,
    scaled_norm: i64,
}

impl VectorSet {
    /// Validates and wraps `vectors` in the given order.
    ///
    /// # Errors
    /// `Dimension`, `Norm`, `OffLattice` or `Overlap` (duplicate vector, by index).
    pub fn new(lattice: Lattice, vectors: Vec<Vector>) -> Result<Self> {
        let scaled_norm = vectors.first().map_or(0, Vector::scaled_norm);
        let mut seen = HashSet::with_capacity(vectors.len());
        for (index, v) in vectors.iter().enumerate() {
            if v.dimension() != lattice.dimension() {
                return Err(ValidationError::Dimension {
                    index,
                    expected: lattice.dimension(),
                    found: v.dimension(),
                }
                .into());
            }
            if v.scaled_norm() != scaled_norm {
                return Err(ValidationError::Norm {
                    index,
                    expected: scaled_norm,
                    found: v.scaled_norm(),
                }
                .into());
            }
            if !lattice.contains(v) {
                return Err(ValidationError::OffLattice {
                    coords: v.coords().to_vec(),
                    denominator: lattice.denominator(),
                }
                .into());
            }
            if !seen.insert(v) {
                return Err(ValidationError::Overlap { vertex: index }.into());
            }
        }
        Ok(Self {
            lattice,
            vectors,
            scaled_norm,
        })
    }

    /// The defining lattice.
    #[inline]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Number of vectors.
    #[inline]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Returns `true` if the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Vector at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Vector> {
        self.vectors.get(index)
    }

    /// All vectors in index order.
    #[inline]
    pub fn vectors(&self) -> &[Vector] {
        &self.vectors
    }

    /// Exact common squared norm.
    pub fn norm(&self) -> Rational {
        let d = self.lattice.denominator();
        Rational::new(self.scaled_norm, d * d)
    }

    /// The vectors at `indices`, in that order, as a new set.
    ///
    /// # Panics
    /// Panics if an index is out of range.
    pub fn restrict(&self, indices: &[usize]) -> Self {
        Self {
            lattice: self.lattice,
            vectors: indices.iter().map(|&i| self.vectors[i].clone()).collect(),
            scaled_norm: self.scaled_norm,
        }
    }

    /// Builds the exact-match lookup context for this set.
    pub fn index(&self) -> VectorIndex<'_> {
        VectorIndex::new(self)
    }
}

/// Exact-match lookup from canonical vector to its [`VectorSet`] index.
///
/// Built once per set and passed by reference to whatever needs lookups; two sets never share
/// one.
#[derive(Debug)]
pub struct VectorIndex<'a> {
    set: &'a VectorSet,
    map: HashMap<&'a [i64], usize>,
}

impl<'a> VectorIndex<'a> {
    /// Indexes every vector of `set`.
    pub fn new(set: &'a VectorSet) -> Self {
        let map = set
            .vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (v.coords(), i))
            .collect();
        Self { set, map }
    }

    /// The indexed set.
    pub fn set(&self) -> &'a VectorSet {
        self.set
    }

    /// Index of `v`, if present.
    #[inline]
    pub fn get(&self, v: &Vector) -> Option<usize> {
        self.map.get(v.coords()).copied()
    }

    /// Index of `v`.
    ///
    /// # Errors
    /// `UnknownVector` if `v` is not in the set.
    #[inline]
    pub fn resolve(&self, v: &Vector) -> Result<usize> {
        self.get(v).ok_or_else(|| {
            ValidationError::UnknownVector {
                coords: v.coords().to_vec(),
            }
            .into()
        })
    }
}

// ============================================================================
// Root systems
// ============================================================================

/// How a root system is generated from its simple roots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ClosureRule {
    /// Close under the reflections in the simple roots.
    Reflections,
    /// Close under coordinate permutations and sign changes.
    SignedPermutations {
        /// Allow only an even number of sign changes (counted over all coordinates).
        even_sign_changes: bool,
    },
}

/// A root system given by simple roots, closure rule and known cardinality.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootSystem {
    name: String,
    lattice: Lattice,
    simple_roots: Vec<Vector>,
    closure: ClosureRule,
    expected: usize,
}

impl RootSystem {
    /// A fully specified root system.
    pub fn custom(
        name: impl Into<String>,
        lattice: Lattice,
        simple_roots: Vec<Vector>,
        closure: ClosureRule,
        expected: usize,
    ) -> Self {
        Self {
            name: name.into(),
            lattice,
            simple_roots,
            closure,
            expected,
        }
    }

    /// \(A_n\) in \(\mathbb{R}^{n+1}\): simple roots \(e_i - e_{i+1}\), \(n(n+1)\) roots.
    pub fn a(n: usize) -> Self {
        let dim = n + 1;
        let simple_roots = (0..n).map(|i| unit_difference(dim, i, i + 1)).collect();
        Self::custom(
            format!("A{n}"),
            Lattice::new(dim, 1, LatticeRule::Integral),
            simple_roots,
            ClosureRule::Reflections,
            n * (n + 1),
        )
    }

    /// \(D_n\) in \(\mathbb{R}^n\) (`n >= 2`): simple roots \(e_i - e_{i+1}\) and
    /// \(e_{n-1} + e_n\), \(2n(n-1)\) roots.
    ///
    /// # Panics
    /// Panics if `n < 2`.
    pub fn d(n: usize) -> Self {
        assert!(n >= 2, "D_n needs n >= 2");
        let mut simple_roots: Vec<Vector> =
            (0..n - 1).map(|i| unit_difference(n, i, i + 1)).collect();
        let mut last = vec![0i64; n];
        last[n - 2] = 1;
        last[n - 1] = 1;
        simple_roots.push(Vector::new(last));
        Self::custom(
            format!("D{n}"),
            Lattice::new(n, 1, LatticeRule::Integral),
            simple_roots,
            ClosureRule::Reflections,
            2 * n * (n - 1),
        )
    }

    /// \(E_8\) with Bourbaki simple roots
    /// \(\alpha_1 = \tfrac12(1,-1,-1,-1,-1,-1,-1,1)\), \(\alpha_2 = e_1 + e_2\),
    /// \(\alpha_k = e_{k-2} - e_{k-3}\) for \(k = 3..8\); 240 roots.
    ///
    /// Stored over denominator 2. The sub-diagram \(\alpha_1..\alpha_6\) is \(E_6\).
    pub fn e8() -> Self {
        let mut simple_roots = vec![
            Vector::new(vec![1, -1, -1, -1, -1, -1, -1, 1]),
            Vector::new(vec![2, 2, 0, 0, 0, 0, 0, 0]),
        ];
        for k in 0..6 {
            let mut v = vec![0i64; 8];
            v[k] = -2;
            v[k + 1] = 2;
            simple_roots.push(Vector::new(v));
        }
        Self::custom(
            "E8",
            Lattice::new(8, 2, LatticeRule::E8),
            simple_roots,
            ClosureRule::SignedPermutations {
                even_sign_changes: true,
            },
            240,
        )
    }

    /// Replaces the closure rule.
    #[must_use]
    pub fn with_closure(mut self, closure: ClosureRule) -> Self {
        self.closure = closure;
        self
    }

    /// Replaces the expected cardinality.
    #[must_use]
    pub fn with_expected(mut self, expected: usize) -> Self {
        self.expected = expected;
        self
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The defining lattice.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Simple roots in their fixed order.
    pub fn simple_roots(&self) -> &[Vector] {
        &self.simple_roots
    }

    /// Known number of roots.
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Generates and validates the full root set, sorted lexicographically.
    ///
    /// # Errors
    /// - `NoGenerators`, `ZeroRoot`, `Dimension` or `Norm` for inconsistent simple roots.
    /// - `Cardinality` if the closure does not have exactly the expected size.
    /// - `OffLattice` / `ToleranceExceeded` if a generated vector leaves the lattice.
    pub fn build(&self) -> Result<VectorSet> {
        let first = self.simple_roots.first().ok_or(ValidationError::NoGenerators)?;
        let norm = first.scaled_norm();
        if norm == 0 {
            return Err(ValidationError::ZeroRoot {
                coords: first.coords().to_vec(),
            }
            .into());
        }
        for (index, r) in self.simple_roots.iter().enumerate() {
            if r.dimension() != self.lattice.dimension() {
                return Err(ValidationError::Dimension {
                    index,
                    expected: self.lattice.dimension(),
                    found: r.dimension(),
                }
                .into());
            }
            if r.scaled_norm() != norm {
                return Err(ValidationError::Norm {
                    index,
                    expected: norm,
                    found: r.scaled_norm(),
                }
                .into());
            }
        }

        let closed = match self.closure {
            ClosureRule::Reflections => self.close_under_reflections()?,
            ClosureRule::SignedPermutations { even_sign_changes } => {
                close_under_signed_permutations(&self.simple_roots, even_sign_changes)
            }
        };

        if closed.len() != self.expected {
            return Err(ValidationError::Cardinality {
                expected: self.expected,
                found: closed.len(),
            }
            .into());
        }

        let mut vectors: Vec<Vector> = closed.into_iter().collect();
        vectors.sort_unstable();
        debug!(system = %self.name, roots = vectors.len(), "root system closed");
        VectorSet::new(self.lattice, vectors)
    }

    fn close_under_reflections(&self) -> Result<HashSet<Vector>> {
        let mut seen: HashSet<Vector> = self.simple_roots.iter().cloned().collect();
        let mut queue: VecDeque<Vector> = self.simple_roots.iter().cloned().collect();
        while let Some(v) = queue.pop_front() {
            for r in &self.simple_roots {
                let image = self.lattice.reflect(&v, r)?;
                if !seen.contains(&image) {
                    seen.insert(image.clone());
                    queue.push_back(image);
                }
            }
        }
        Ok(seen)
    }
}

fn unit_difference(dim: usize, i: usize, j: usize) -> Vector {
    let mut v = vec![0i64; dim];
    v[i] = 1;
    v[j] = -1;
    Vector::new(v)
}

/// BFS under adjacent transpositions and sign changes.
///
/// Even sign changes are generated by flipping adjacent coordinate pairs; odd ones by also
/// flipping the first coordinate alone.
fn close_under_signed_permutations(seeds: &[Vector], even_sign_changes: bool) -> HashSet<Vector> {
    let mut seen: HashSet<Vector> = seeds.iter().cloned().collect();
    let mut queue: VecDeque<Vector> = seeds.iter().cloned().collect();
    while let Some(v) = queue.pop_front() {
        let dim = v.dimension();
        let mut images = Vec::with_capacity(2 * dim);
        for i in 0..dim.saturating_sub(1) {
            let mut swapped = v.coords().to_vec();
            swapped.swap(i, i + 1);
            images.push(swapped);
            let mut flipped = v.coords().to_vec();
            flipped[i] = -flipped[i];
            flipped[i + 1] = -flipped[i + 1];
            images.push(flipped);
        }
        if !even_sign_changes && dim > 0 {
            let mut flipped = v.coords().to_vec();
            flipped[0] = -flipped[0];
            images.push(flipped);
        }
        for coords in images {
            let w = Vector::new(coords);
            if !seen.contains(&w) {
                seen.insert(w.clone());
                queue.push_back(w);
            }
        }
    }
    seen
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rational_reduces_and_orders() {
        assert_eq!(Rational::new(4, 8), Rational::new(1, 2));
        assert_eq!(Rational::new(3, -6), Rational::new(-1, 2));
        assert!(Rational::new(-1, 2) < Rational::integer(0));
        assert!(Rational::new(1, 3) < Rational::new(1, 2));
        assert_eq!(Rational::new(-2, 4).to_string(), "-1/2");
        assert_eq!(Rational::new(8, 4).to_string(), "2");
    }

    #[test]
    fn small_presets_have_known_counts() {
        assert_eq!(RootSystem::a(2).build().unwrap().len(), 6);
        assert_eq!(RootSystem::a(4).build().unwrap().len(), 20);
        assert_eq!(RootSystem::d(4).build().unwrap().len(), 24);
        assert_eq!(RootSystem::d(5).build().unwrap().len(), 40);
    }

    #[test]
    fn e8_has_240_roots_of_norm_two() {
        let set = RootSystem::e8().build().unwrap();
        assert_eq!(set.len(), 240);
        assert_eq!(set.norm(), Rational::integer(2));
        let half_integer = set.vectors().iter().filter(|v| v.coords()[0] % 2 != 0).count();
        assert_eq!(half_integer, 128);
    }

    #[test]
    fn e8_closure_rules_agree() {
        let by_pattern = RootSystem::e8().build().unwrap();
        let by_reflection = RootSystem::e8()
            .with_closure(ClosureRule::Reflections)
            .build()
            .unwrap();
        assert_eq!(by_pattern, by_reflection);
    }

    #[test]
    fn wrong_expected_count_is_a_validation_error() {
        let err = RootSystem::d(4).with_expected(25).build().unwrap_err();
        assert_eq!(
            err,
            VerifyError::Validation(ValidationError::Cardinality {
                expected: 25,
                found: 24
            })
        );
    }

    #[test]
    fn odd_sign_changes_leave_the_e8_lattice() {
        let err = RootSystem::e8()
            .with_closure(ClosureRule::SignedPermutations {
                even_sign_changes: false,
            })
            .with_expected(368)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            VerifyError::Validation(ValidationError::OffLattice { .. })
        ));
    }

    #[test]
    fn mixed_norm_generators_are_rejected() {
        let lattice = Lattice::new(2, 1, LatticeRule::Integral);
        let sys = RootSystem::custom(
            "bad",
            lattice,
            vec![Vector::new(vec![1, 0]), Vector::new(vec![1, 1])],
            ClosureRule::Reflections,
            8,
        );
        assert!(matches!(
            sys.build().unwrap_err(),
            VerifyError::Validation(ValidationError::Norm { index: 1, .. })
        ));
    }

    #[test]
    fn reflection_is_exact_and_involutive() {
        let e8 = RootSystem::e8();
        let lattice = *e8.lattice();
        let a1 = &e8.simple_roots()[0];
        let a2 = &e8.simple_roots()[1];
        let image = lattice.reflect(a2, a1).unwrap();
        assert_eq!(lattice.reflect(&image, a1).unwrap(), *a2);
        assert_eq!(lattice.reflect(a1, a1).unwrap().coords(), &[-1, 1, 1, 1, 1, 1, 1, -1]);
    }

    #[test]
    fn zero_norm_roots_are_validation_errors() {
        let lattice = Lattice::new(2, 1, LatticeRule::Integral);
        let zero = Vector::new(vec![0, 0]);
        let zero_root = VerifyError::Validation(ValidationError::ZeroRoot { coords: vec![0, 0] });
        assert_eq!(
            lattice.reflect(&Vector::new(vec![1, -1]), &zero).unwrap_err(),
            zero_root
        );

        let system = RootSystem::custom("zero", lattice, vec![zero], ClosureRule::Reflections, 1);
        assert_eq!(system.build().unwrap_err(), zero_root);
    }

    #[test]
    fn caller_supplied_denominators_are_checked() {
        assert_eq!(
            Lattice::try_new(3, 0, LatticeRule::Any).unwrap_err(),
            VerifyError::Validation(ValidationError::Denominator { found: 0 })
        );
        assert!(Lattice::try_new(3, -2, LatticeRule::Integral).is_err());
        assert_eq!(
            Lattice::try_new(8, 2, LatticeRule::E8).unwrap(),
            *RootSystem::e8().lattice()
        );
        assert_eq!(Rational::checked_new(1, 0), None);
        assert_eq!(Rational::checked_new(6, -4), Some(Rational::new(-3, 2)));
    }

    #[test]
    fn non_crystallographic_reflection_exceeds_tolerance() {
        let lattice = Lattice::new(2, 1, LatticeRule::Any);
        let v = Vector::new(vec![1, 0]);
        let r = Vector::new(vec![1, 1]);
        // 2<v,r>/<r,r> = 1 keeps integrality; a norm-5 root does not.
        assert!(lattice.reflect(&v, &r).is_ok());
        let r5 = Vector::new(vec![1, 2]);
        assert!(matches!(
            lattice.reflect(&v, &r5).unwrap_err(),
            VerifyError::ToleranceExceeded { tolerance, .. } if tolerance == 0.0
        ));
    }

    #[test]
    fn snap_accepts_near_lattice_rays() {
        let lattice = *RootSystem::e8().lattice();
        let v = lattice
            .snap(&[0.5 + 1e-12, -0.5, -0.5, -0.5, -0.5, -0.5, -0.5, 0.5], 1e-9)
            .unwrap();
        assert_eq!(v.coords(), &[1, -1, -1, -1, -1, -1, -1, 1]);
    }

    #[test]
    fn snap_rejects_far_rays() {
        let lattice = *RootSystem::e8().lattice();
        let err = lattice
            .snap(&[0.7, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], 1e-6)
            .unwrap_err();
        assert!(matches!(err, VerifyError::ToleranceExceeded { coordinate: 0, .. }));
    }

    #[test]
    fn snap_rejects_off_lattice_points() {
        let lattice = *RootSystem::e8().lattice();
        // Mixed integer and half-integer coordinates.
        let err = lattice
            .snap(&[0.5, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5], 1e-9)
            .unwrap_err();
        assert!(matches!(
            err,
            VerifyError::Validation(ValidationError::OffLattice { .. })
        ));
    }

    #[test]
    fn vector_index_resolves_every_member() {
        let set = RootSystem::d(4).build().unwrap();
        let index = set.index();
        for (i, v) in set.vectors().iter().enumerate() {
            assert_eq!(index.resolve(v).unwrap(), i);
        }
        let stranger = Vector::new(vec![2, 0, 0, 0]);
        assert!(index.get(&stranger).is_none());
        assert!(matches!(
            index.resolve(&stranger).unwrap_err(),
            VerifyError::Validation(ValidationError::UnknownVector { .. })
        ));
    }

    #[test]
    fn restrict_keeps_requested_order() {
        let set = RootSystem::a(2).build().unwrap();
        let sub = set.restrict(&[3, 0]);
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.get(0), set.get(3));
        assert_eq!(sub.norm(), set.norm());
    }

    #[test]
    fn duplicate_vectors_are_rejected() {
        let lattice = Lattice::new(2, 1, LatticeRule::Integral);
        let v = Vector::new(vec![1, -1]);
        let err = VectorSet::new(lattice, vec![v.clone(), v]).unwrap_err();
        assert_eq!(err, VerifyError::Validation(ValidationError::Overlap { vertex: 1 }));
    }
}
