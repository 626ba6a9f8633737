//! # Root-system and double-six verification engine
//!
//! Exact combinatorial verification for finite reflection groups and the structures they
//! act on.
//!
//! This crate provides:
//! - Root systems built by **exact** reflection closure over a fixed-denominator lattice.
//! - Orbit partitions under reflection subgroups, checked against known orbit sizes.
//! - Candidate adjacency graphs from Gram matrices, and an exhaustive strongly-regular check.
//! - A lazy, capped k-clique enumerator (branch-and-bound with greedy-colouring bounds).
//! - Double-six pairing by augmenting-path matching, and stabilizer counts inside an
//!   enumerated permutation group.
//! - A capped BFS permutation-group closure with orbits and a group-axiom check.
//!
//! ## Quick Start
//!
//! ```
//! use rootverify::validate::validate_known_structures;
//!
//! // E8 → 27-orbit → Schläfli graph → 72 sixes → 36 double-sixes → stabilizer 720
//! let report = validate_known_structures().expect("known structures verify");
//! assert_eq!(report.double_sixes, 36);
//! ```
//!
//! ## Working with Graphs Directly
//!
//! ```
//! use rootverify::clique::CliqueEnumerator;
//! use rootverify::graph::Graph;
//! use rootverify::srg::{verify_strongly_regular, SrgParameters};
//!
//! // The Petersen graph
//! let mut edges = Vec::new();
//! for i in 0..5 {
//!     edges.push((i, (i + 1) % 5));
//!     edges.push((i, i + 5));
//!     edges.push((i + 5, (i + 2) % 5 + 5));
//! }
//! let petersen = Graph::from_edges(10, &edges);
//!
//! assert_eq!(
//!     verify_strongly_regular(&petersen, 3).unwrap(),
//!     SrgParameters::new(10, 3, 0, 1)
//! );
//! assert_eq!(CliqueEnumerator::new(&petersen, 3).count(), 0);
//! assert_eq!(CliqueEnumerator::new(&petersen.complement(), 4).count(), 5);
//! ```
//!
//! ## Modules
//!
//! - [`lattice`]: exact vectors, lattices, root-system construction, lookup context.
//! - [`orbit`]: reflection orbit partition and generator action on an orbit.
//! - [`gram`]: Gram matrix and candidate graphs per inner-product value.
//! - [`srg`]: strongly-regular-graph verification.
//! - [`clique`]: bounded k-clique enumeration.
//! - [`matching`]: double-six pairing.
//! - [`stabilizer`]: stabilizer counts and subgroups.
//! - [`closure`]: permutation-group closure and orbits.
//! - [`incidence`]: point/line incidence structures.
//! - [`validate`]: end-to-end validation against known counts.
//!
//! ## Performance Notes
//!
//! - Graphs are rows of `u64` bitsets of any width; common-neighbour counts are popcounts.
//! - Lattice arithmetic is integer-only; nothing is compared with a float tolerance except
//!   [`Lattice::snap`](lattice::Lattice::snap) on external coordinate rays.
//! - Pairing and stabilizer counting run on `rayon`; their results do not depend on the
//!   thread count.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)] // Mathematical variable names
#![allow(clippy::needless_range_loop)] // Often clearer for matrix indexing
#![allow(clippy::doc_markdown)] // LaTeX-style notation in docs
#![allow(clippy::multiple_crate_versions)] // Cargo.lock management is external

pub mod bitset;
pub mod bounded;
pub mod clique;
pub mod closure;
pub mod error;
pub mod gram;
pub mod graph;
pub mod incidence;
pub mod lattice;
pub mod matching;
pub mod orbit;
pub mod permutation;
pub mod srg;
pub mod stabilizer;
pub mod validate;

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::bounded::Bounded;
    pub use crate::clique::{enumerate_cliques, Clique, CliqueEnumerator};
    pub use crate::closure::{verify_group, PermutationGroup};
    pub use crate::error::{Result, ValidationError, VerifyError};
    pub use crate::gram::{candidate_graphs, select_regular, CandidateGraph, GramMatrix};
    pub use crate::graph::{parse_adjacency_matrix, Graph};
    pub use crate::incidence::IncidenceStructure;
    pub use crate::lattice::{Lattice, Rational, RootSystem, Vector, VectorIndex, VectorSet};
    pub use crate::matching::{match_double_six, pair_double_sixes, DoubleSix, Pairing};
    pub use crate::orbit::{Orbit, OrbitPartition, ReflectionOrbitPartitioner};
    pub use crate::permutation::Permutation;
    pub use crate::srg::{verify_strongly_regular, SrgParameters};
    pub use crate::stabilizer::{double_six_stabilizer, stabilizer_subgroup, StabilizerReport};
    pub use crate::validate::{
        validate_known_structures, verify_double_sixes, DoubleSixConfig, DoubleSixReport,
    };
}
