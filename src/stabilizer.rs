//! Stabilizers of combinatorial structures inside an enumerated permutation group.
//!
//! The group is passed in as an element list. If that list came from a capped closure, every
//! count derived from it is a lower bound and is tagged [`Bounded::Capped`].

use crate::bounded::Bounded;
use crate::error::{Result, ValidationError};
use crate::matching::DoubleSix;
use crate::permutation::Permutation;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Stabilizer counts of one double-six.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StabilizerReport {
    /// Elements with `g(S) = S` and `g(T) = T`.
    pub identity_type: Bounded<usize>,
    /// Elements with `g(S) = T` and `g(T) = S`.
    pub swap_type: Bounded<usize>,
}

impl StabilizerReport {
    /// Returns `true` if at least one swap-type element was seen.
    pub fn has_swap(&self) -> bool {
        *self.swap_type.value() > 0
    }

    /// Size of the full set-wise stabilizer of `{S, T}`.
    pub fn total(&self) -> Bounded<usize> {
        let total = self.identity_type.value() + self.swap_type.value();
        Bounded::new(total, self.identity_type.is_capped())
    }
}

/// Counts the elements fixing `double_six`, with and without exchanging its halves.
///
/// # Errors
/// `VertexOutOfRange` if some element's domain does not contain every vertex of the
/// double-six.
pub fn double_six_stabilizer(
    double_six: &DoubleSix,
    elements: &Bounded<Vec<Permutation>>,
) -> Result<StabilizerReport> {
    let s = &double_six.s;
    let t = &double_six.t;
    check_domain(s.iter().chain(t), elements.value())?;

    let (identity_type, swap_type) = elements
        .value()
        .par_iter()
        .map(|g| {
            let fixes = g.maps_set_onto(s, s) && g.maps_set_onto(t, t);
            let swaps = g.maps_set_onto(s, t) && g.maps_set_onto(t, s);
            (usize::from(fixes), usize::from(swaps))
        })
        .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1));

    let capped = elements.is_capped();
    debug!(identity_type, swap_type, capped, "double-six stabilizer");
    Ok(StabilizerReport {
        identity_type: Bounded::new(identity_type, capped),
        swap_type: Bounded::new(swap_type, capped),
    })
}

/// The elements for which `preserves` holds, in input order.
///
/// Works for any structure; with a group as input and a predicate of the form "maps X to
/// itself" the result is a subgroup.
pub fn stabilizer_subgroup<F>(
    elements: &Bounded<Vec<Permutation>>,
    preserves: F,
) -> Bounded<Vec<Permutation>>
where
    F: Fn(&Permutation) -> bool + Sync,
{
    elements.as_ref().map(|all| {
        all.par_iter()
            .filter(|g| preserves(g))
            .cloned()
            .collect()
    })
}

fn check_domain<'a>(
    vertices: impl Iterator<Item = &'a usize>,
    elements: &[Permutation],
) -> Result<()> {
    let Some(max) = vertices.copied().max() else {
        return Ok(());
    };
    if let Some(g) = elements.iter().find(|g| g.degree() <= max) {
        return Err(ValidationError::VertexOutOfRange {
            vertex: max,
            size: g.degree(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::closure::{verify_group, PermutationGroup};
    use crate::error::VerifyError;

    /// S = {0, 1, 2, 3, 4, 5}, T = {6, ..., 11}, paired s_i ↔ t_i.
    fn double_six() -> DoubleSix {
        DoubleSix {
            s: (0..6).collect(),
            t: (6..12).collect(),
            phi: (6..12).collect(),
        }
    }

    /// Paired permutations of the twelve points: the same permutation on both halves.
    fn diagonal_s6_with_swap(with_swap: bool) -> Bounded<Vec<Permutation>> {
        let transposition = Permutation::from_cycles(12, &[&[0, 1], &[6, 7]]).unwrap();
        let rotation =
            Permutation::from_cycles(12, &[&[0, 1, 2, 3, 4, 5], &[6, 7, 8, 9, 10, 11]]).unwrap();
        let mut gens = vec![transposition, rotation];
        if with_swap {
            let swap = Permutation::from_cycles(
                12,
                &[&[0, 6], &[1, 7], &[2, 8], &[3, 9], &[4, 10], &[5, 11]],
            )
            .unwrap();
            gens.push(swap);
        }
        PermutationGroup::new(12, gens).unwrap().close(10_000)
    }

    #[test]
    fn diagonal_group_fixes_both_halves() {
        let elements = diagonal_s6_with_swap(false);
        assert_eq!(elements.value().len(), 720);
        let report = double_six_stabilizer(&double_six(), &elements).unwrap();
        assert_eq!(report.identity_type, Bounded::Complete(720));
        assert_eq!(report.swap_type, Bounded::Complete(0));
        assert!(!report.has_swap());
    }

    #[test]
    fn swap_doubles_the_stabilizer() {
        let elements = diagonal_s6_with_swap(true);
        assert_eq!(elements.value().len(), 1440);
        let report = double_six_stabilizer(&double_six(), &elements).unwrap();
        assert_eq!(report.identity_type, Bounded::Complete(720));
        assert_eq!(report.swap_type, Bounded::Complete(720));
        assert!(report.has_swap());
        assert_eq!(report.total(), Bounded::Complete(1440));
    }

    #[test]
    fn capped_input_gives_lower_bounds() {
        let full = diagonal_s6_with_swap(true);
        let partial = Bounded::Capped(full.value()[..100].to_vec());
        let report = double_six_stabilizer(&double_six(), &partial).unwrap();
        assert!(report.identity_type.is_capped());
        assert!(report.swap_type.is_capped());
        assert!(*report.total().value() <= 100);
        assert!(report.total().is_capped());
    }

    #[test]
    fn repeated_calls_agree() {
        let elements = diagonal_s6_with_swap(true);
        let first = double_six_stabilizer(&double_six(), &elements).unwrap();
        for _ in 0..5 {
            assert_eq!(double_six_stabilizer(&double_six(), &elements).unwrap(), first);
        }
    }

    #[test]
    fn domain_must_cover_the_double_six() {
        let small = Bounded::Complete(vec![Permutation::identity(10)]);
        let err = double_six_stabilizer(&double_six(), &small).unwrap_err();
        assert_eq!(
            err,
            VerifyError::Validation(ValidationError::VertexOutOfRange { vertex: 11, size: 10 })
        );
    }

    #[test]
    fn generic_stabilizer_is_a_subgroup() {
        let elements = diagonal_s6_with_swap(true);
        let pair = [0usize, 6];
        let sub = stabilizer_subgroup(&elements, |g| g.maps_set_onto(&pair, &pair));
        assert!(sub.is_complete());
        // Fixing {s_0, t_0} setwise: S5 on the rest, times the swap.
        assert_eq!(sub.value().len(), 240);
        verify_group(sub.value()).unwrap();
    }
}
