//! Typed failures of the verification engine.
//!
//! Only structural failures are errors. A search that hits its cap returns
//! [`Bounded::Capped`](crate::bounded::Bounded::Capped), and a failed pairing returns
//! [`Pairing::NoMatchFound`](crate::matching::Pairing::NoMatchFound); neither goes through
//! this module.

use crate::incidence::IncidenceError;
use thiserror::Error;

/// Top-level error returned by every fallible operation in the crate.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum VerifyError {
    /// An unconditional structural invariant failed. Never retried.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Canonicalizing a value onto the defining lattice left a residual above tolerance.
    #[error(
        "lattice snap failed at coordinate {coordinate}: residual {residual} exceeds tolerance {tolerance}"
    )]
    ToleranceExceeded {
        /// Offending coordinate position.
        coordinate: usize,
        /// Distance from the nearest lattice value.
        residual: f64,
        /// Tolerance in force (zero for exact reflections).
        tolerance: f64,
    },

    /// A strongly-regular-graph count differs between two pairs.
    #[error("{0}")]
    InvariantViolation(#[from] InvariantViolation),

    /// An incidence table is malformed.
    #[error("invalid incidence structure: {0}")]
    Incidence(#[from] IncidenceError),
}

/// Structural invariant failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A root system closed to the wrong number of vectors.
    #[error("root system has {found} vectors, expected {expected}")]
    Cardinality {
        /// Known count for the requested system.
        expected: usize,
        /// Count actually produced.
        found: usize,
    },

    /// No generator vectors were supplied.
    #[error("no generator vectors supplied")]
    NoGenerators,

    /// A reflecting vector has squared norm zero.
    #[error("vector {coords:?} has zero norm and defines no reflection")]
    ZeroRoot {
        /// Scaled coordinates.
        coords: Vec<i64>,
    },

    /// A lattice was given a non-positive coordinate denominator.
    #[error("lattice denominator must be positive, got {found}")]
    Denominator {
        /// Denominator supplied.
        found: i64,
    },

    /// A vector has a different number of coordinates from the rest.
    #[error("vector {index} has dimension {found}, expected {expected}")]
    Dimension {
        /// Position of the vector in its input.
        index: usize,
        /// Dimension of the first vector.
        expected: usize,
        /// Dimension found.
        found: usize,
    },

    /// A vector has a different squared norm from the rest.
    #[error("vector {index} has scaled squared norm {found}, expected {expected}")]
    Norm {
        /// Position of the vector in its input.
        index: usize,
        /// Common scaled squared norm.
        expected: i64,
        /// Scaled squared norm found.
        found: i64,
    },

    /// A vector does not lie on the defining lattice.
    #[error("vector {coords:?} (denominator {denominator}) is not on the lattice")]
    OffLattice {
        /// Scaled coordinates.
        coords: Vec<i64>,
        /// Shared coordinate denominator.
        denominator: i64,
    },

    /// A canonical vector has no index in the vector set it should belong to.
    #[error("vector {coords:?} is not a member of the vector set")]
    UnknownVector {
        /// Scaled coordinates.
        coords: Vec<i64>,
    },

    /// Orbit sizes do not match the expected multiset.
    #[error("orbit sizes {found:?} do not match expected {expected:?}")]
    OrbitSizes {
        /// Expected sizes, sorted.
        expected: Vec<usize>,
        /// Observed sizes, sorted.
        found: Vec<usize>,
    },

    /// Orbits overlap or fail to cover the index range.
    #[error("orbit partition is not exact at index {index}")]
    Partition {
        /// First index covered zero or several times.
        index: usize,
    },

    /// A vertex has a degree different from the required valency.
    #[error("vertex {vertex} has degree {degree}, expected uniform valency {expected}")]
    NonUniformValency {
        /// Offending vertex.
        vertex: usize,
        /// Its degree.
        degree: usize,
        /// Required valency.
        expected: usize,
    },

    /// A vertex index is outside the graph or permutation domain.
    #[error("vertex {vertex} is out of range for domain of size {size}")]
    VertexOutOfRange {
        /// Offending vertex.
        vertex: usize,
        /// Domain size.
        size: usize,
    },

    /// A vertex subset has the wrong size.
    #[error("vertex subset has {found} elements, expected {expected}")]
    SubsetSize {
        /// Required size.
        expected: usize,
        /// Size supplied.
        found: usize,
    },

    /// A vertex appears twice, or in both halves of a pairing.
    #[error("vertex {vertex} appears more than once")]
    Overlap {
        /// Repeated vertex.
        vertex: usize,
    },

    /// The images supplied for a permutation do not form a bijection.
    #[error("images {images:?} do not form a permutation")]
    InvalidPermutation {
        /// Offending image list.
        images: Vec<usize>,
    },

    /// Permutations over different domains were combined.
    #[error("permutation domain has size {found}, expected {expected}")]
    DomainMismatch {
        /// Domain size in force.
        expected: usize,
        /// Domain size supplied.
        found: usize,
    },

    /// An element list claimed to be a group is not one.
    #[error("element list is not a group: {reason}")]
    NotAGroup {
        /// First violated group axiom.
        reason: String,
    },

    /// A derived count differs from its known value.
    #[error("{what}: found {found}, expected {expected}")]
    CountMismatch {
        /// Which quantity.
        what: &'static str,
        /// Known value.
        expected: usize,
        /// Value produced.
        found: usize,
    },

    /// No candidate graph has the required uniform valency.
    #[error("no inner-product value yields uniform valency {expected}")]
    NoRegularCandidate {
        /// Required valency.
        expected: usize,
    },
}

/// First offending pair found by the strongly-regular verifier.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error(
    "SRG invariant violated at pair ({u}, {v}) ({relation}): observed {observed} common neighbours, expected {expected}"
)]
pub struct InvariantViolation {
    /// First vertex of the pair.
    pub u: usize,
    /// Second vertex of the pair.
    pub v: usize,
    /// `"adjacent"` (lambda) or `"non-adjacent"` (mu).
    pub relation: &'static str,
    /// Common-neighbour count observed.
    pub observed: usize,
    /// Count fixed by the first pair of the same relation.
    pub expected: usize,
}

/// Crate-wide result alias.
pub type Result<T, E = VerifyError> = std::result::Result<T, E>;
