//! Deterministic end-to-end validation against known structures.
//!
//! The reference case: the 240 roots of E8, split by the W(E6) reflection subgroup, give a
//! 27-orbit whose inner-product-1 graph is the Schläfli graph. Its 72 six-cliques pair into
//! 36 double-sixes, and each double-six is fixed by 720 elements of W(E6).

use crate::bounded::Bounded;
use crate::clique::CliqueEnumerator;
use crate::closure::PermutationGroup;
use crate::error::{Result, ValidationError};
use crate::gram::{candidate_graphs, select_regular};
use crate::lattice::{Rational, RootSystem};
use crate::matching::{pair_double_sixes, DoubleSix};
use crate::orbit::ReflectionOrbitPartitioner;
use crate::srg::{verify_strongly_regular, SrgParameters};
use crate::stabilizer::{double_six_stabilizer, StabilizerReport};
use serde::Serialize;
use tracing::{debug, info, warn};

// ============================================================================
// Configuration
// ============================================================================

/// Inputs and known answers for the double-six chain.
#[derive(Clone, Debug)]
pub struct DoubleSixConfig {
    /// Root system to build.
    pub root_system: RootSystem,
    /// Indices into the simple roots generating the reflection subgroup.
    pub subgroup_generators: Vec<usize>,
    /// Expected orbit-size multiset.
    pub orbit_sizes: Vec<usize>,
    /// Size of the orbit to analyse.
    pub orbit_size: usize,
    /// Valency that selects the adjacency relation.
    pub valency: usize,
    /// Expected SRG parameters of the selected relation.
    pub srg: SrgParameters,
    /// Clique size (one half of a double-six).
    pub clique_size: usize,
    /// Expected number of cliques.
    pub expected_cliques: usize,
    /// Expected number of double-sixes.
    pub expected_double_sixes: usize,
    /// Expected order of the subgroup restricted to the orbit.
    pub expected_group_order: usize,
    /// Expected identity-type stabilizer order of a double-six.
    pub expected_stabilizer: usize,
    /// Closure cap for the subgroup.
    pub group_cap: usize,
}

impl Default for DoubleSixConfig {
    fn default() -> Self {
        let mut orbit_sizes = vec![72];
        orbit_sizes.extend([27; 6]);
        orbit_sizes.extend([1; 6]);
        Self {
            root_system: RootSystem::e8(),
            subgroup_generators: (0..6).collect(),
            orbit_sizes,
            orbit_size: 27,
            valency: 16,
            srg: SrgParameters::new(27, 16, 10, 8),
            clique_size: 6,
            expected_cliques: 72,
            expected_double_sixes: 36,
            expected_group_order: 51_840,
            expected_stabilizer: 720,
            group_cap: 100_000,
        }
    }
}

// ============================================================================
// Report
// ============================================================================

/// Everything the double-six chain established.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DoubleSixReport {
    /// Number of roots built.
    pub roots: usize,
    /// Orbit sizes, ascending.
    pub orbit_sizes: Vec<usize>,
    /// Inner product defining the adjacency relation.
    pub inner_product: Rational,
    /// Verified SRG parameters.
    pub srg: SrgParameters,
    /// Number of cliques found.
    pub cliques: usize,
    /// Number of double-sixes found.
    pub double_sixes: usize,
    /// Order of the subgroup acting on the orbit.
    pub group_order: Bounded<usize>,
    /// First double-six (orbit positions).
    pub first_double_six: DoubleSix,
    /// Its stabilizer counts.
    pub stabilizer: StabilizerReport,
}

// ============================================================================
// Public API
// ============================================================================

/// Runs the whole chain for `cfg`.
///
/// # Errors
/// Any stage failure propagates unchanged; a count that differs from its expected value is
/// `CountMismatch`. Group-dependent counts are only compared when the closure completed.
pub fn verify_double_sixes(cfg: &DoubleSixConfig) -> Result<DoubleSixReport> {
    let set = cfg.root_system.build()?;
    debug!(system = cfg.root_system.name(), roots = set.len(), "root system built");

    let simple = cfg.root_system.simple_roots();
    if cfg.subgroup_generators.is_empty() {
        return Err(ValidationError::NoGenerators.into());
    }
    let generators = cfg
        .subgroup_generators
        .iter()
        .map(|&i| {
            simple.get(i).cloned().ok_or(ValidationError::VertexOutOfRange {
                vertex: i,
                size: simple.len(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let index = set.index();
    let partitioner = ReflectionOrbitPartitioner::new(generators, cfg.orbit_sizes.clone());
    let partition = partitioner.partition(&index)?;
    let orbit = partition
        .first_of_size(cfg.orbit_size)
        .ok_or(ValidationError::CountMismatch {
            what: "orbits of the requested size",
            expected: 1,
            found: 0,
        })?;
    info!(sizes = ?partition.sizes(), "orbits verified");

    let sub = set.restrict(orbit.indices());
    let candidates = candidate_graphs(&sub);
    let chosen = select_regular(&candidates, cfg.valency)?;
    let graph = &chosen.graph;
    let srg = verify_strongly_regular(graph, cfg.valency)?;
    expect_count("lambda", cfg.srg.lambda, srg.lambda)?;
    expect_count("mu", cfg.srg.mu, srg.mu)?;
    expect_count("vertices", cfg.srg.v, srg.v)?;
    info!(?srg, inner_product = %chosen.inner_product, "strongly regular graph verified");

    let mut cliques = CliqueEnumerator::new(graph, cfg.clique_size)
        .collect_bounded()
        .into_value();
    cliques.sort_unstable();
    expect_count("cliques", cfg.expected_cliques, cliques.len())?;

    let meets = graph.complement();
    let double_sixes = pair_double_sixes(&meets, &cliques)?;
    expect_count("double-sixes", cfg.expected_double_sixes, double_sixes.len())?;
    info!(cliques = cliques.len(), double_sixes = double_sixes.len(), "double-sixes paired");

    let first_double_six = double_sixes
        .first()
        .cloned()
        .ok_or(ValidationError::CountMismatch {
            what: "double-sixes",
            expected: cfg.expected_double_sixes,
            found: 0,
        })?;

    let action = partitioner.generator_action(&index, orbit)?;
    let group = PermutationGroup::new(orbit.len(), action)?;
    let elements = group.close(cfg.group_cap);
    let group_order = elements.as_ref().map(Vec::len);
    let stabilizer = double_six_stabilizer(&first_double_six, &elements)?;
    if let Some(order) = group_order.clone().exact() {
        expect_count("group order", cfg.expected_group_order, order)?;
        if let Some(fixed) = stabilizer.identity_type.clone().exact() {
            expect_count("stabilizer order", cfg.expected_stabilizer, fixed)?;
        }
    } else {
        warn!(cap = cfg.group_cap, "group closure capped; stabilizer counts are lower bounds");
    }
    info!(
        identity_type = *stabilizer.identity_type.value(),
        swap_type = *stabilizer.swap_type.value(),
        "stabilizer computed"
    );

    Ok(DoubleSixReport {
        roots: set.len(),
        orbit_sizes: partition.sizes(),
        inner_product: chosen.inner_product,
        srg,
        cliques: cliques.len(),
        double_sixes: double_sixes.len(),
        group_order,
        first_double_six,
        stabilizer,
    })
}

/// Builds the bundled root systems and runs the default double-six chain.
///
/// # Errors
/// The first failing structure.
pub fn validate_known_structures() -> Result<DoubleSixReport> {
    for system in [RootSystem::a(2), RootSystem::a(3), RootSystem::d(4), RootSystem::d(5)] {
        let set = system.build()?;
        debug!(system = system.name(), roots = set.len(), "root system ok");
    }
    verify_double_sixes(&DoubleSixConfig::default())
}

fn expect_count(what: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(ValidationError::CountMismatch {
            what,
            expected,
            found,
        }
        .into())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VerifyError;

    #[test]
    fn default_chain_matches_known_counts() {
        let report = validate_known_structures().unwrap();
        assert_eq!(report.roots, 240);
        assert_eq!(report.srg, SrgParameters::new(27, 16, 10, 8));
        assert_eq!(report.inner_product, Rational::integer(1));
        assert_eq!(report.cliques, 72);
        assert_eq!(report.double_sixes, 36);
        assert_eq!(report.group_order, Bounded::Complete(51_840));
        assert_eq!(report.stabilizer.identity_type, Bounded::Complete(720));
        assert_eq!(report.stabilizer.swap_type, Bounded::Complete(720));
    }

    #[test]
    fn wrong_expectation_is_a_count_mismatch() {
        let cfg = DoubleSixConfig {
            expected_double_sixes: 35,
            ..DoubleSixConfig::default()
        };
        let err = verify_double_sixes(&cfg).unwrap_err();
        assert_eq!(
            err,
            VerifyError::Validation(ValidationError::CountMismatch {
                what: "double-sixes",
                expected: 35,
                found: 36
            })
        );
    }

    #[test]
    fn capped_closure_reports_lower_bounds() {
        let cfg = DoubleSixConfig {
            group_cap: 1_000,
            ..DoubleSixConfig::default()
        };
        let report = verify_double_sixes(&cfg).unwrap();
        assert_eq!(report.group_order, Bounded::Capped(1_000));
        assert!(report.stabilizer.identity_type.is_capped());
        assert!(*report.stabilizer.identity_type.value() <= 720);
    }

    #[test]
    fn bad_generator_index() {
        let cfg = DoubleSixConfig {
            subgroup_generators: vec![0, 9],
            ..DoubleSixConfig::default()
        };
        assert_eq!(
            verify_double_sixes(&cfg).unwrap_err(),
            VerifyError::Validation(ValidationError::VertexOutOfRange { vertex: 9, size: 8 })
        );
    }
}
