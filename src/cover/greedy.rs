//! Greedy maximum-coverage engine.
//!
//! # Algorithm
//!
//! 1. Start with every fact of the universe uncovered.
//! 2. Score each remaining potion by its marginal gain, the number of
//!    still-uncovered facts it reveals.
//! 3. Pick a potion with the highest gain, breaking ties with the
//!    configured [`TieBreaker`], and mark its facts covered.
//! 4. Repeat until nothing is uncovered or no potion has positive gain;
//!    whatever is still uncovered is the leftover.
//!
//! # Complexity
//! O(s * p * c) where s = selections, p = potions, c = facts per potion.
//!
//! # Reference
//! Chvátal (1979), "A Greedy Heuristic for the Set-Covering Problem"

use std::cmp::Ordering;
use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::CoverProblem;
use crate::error::Result;
use crate::models::{CoverSchedule, Fact, Selection};
use crate::validation::validate_coverage;

/// How ties between potions with equal marginal gain are broken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreaker {
    /// Uniformly at random among the tied potions (default).
    #[default]
    Random,
    /// The tied potion that comes first in enumeration order.
    First,
}

impl std::str::FromStr for TieBreaker {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "first" => Ok(Self::First),
            other => Err(format!("unknown tie breaker '{other}' (expected random|first)")),
        }
    }
}

/// Greedy set-cover solver.
///
/// Stateless between calls: every solve builds its own uncovered set
/// and selection list, so one solver can serve any number of threads.
///
/// # Example
/// ```
/// use std::collections::BTreeSet;
/// use alchemy_cover::cover::{CoverProblem, GreedyCover};
/// use alchemy_cover::models::{EffectId, Fact, IngredientId, Potion};
///
/// let f = |i, e| Fact::new(IngredientId(i), EffectId(e));
/// let universe = BTreeSet::from([f(0, 1), f(1, 1), f(2, 9)]);
/// let potion = Potion::new([IngredientId(0), IngredientId(1)], BTreeSet::from([f(0, 1), f(1, 1)]));
/// let problem = CoverProblem::new(universe, vec![potion]);
///
/// let schedule = GreedyCover::new().solve_seeded(&problem, Some(42)).unwrap();
/// assert_eq!(schedule.potion_count(), 1);
/// assert_eq!(schedule.leftover, BTreeSet::from([f(2, 9)]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyCover {
    tie_breaker: TieBreaker,
}

impl GreedyCover {
    /// Creates a solver with random tie-breaking.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tie-breaking strategy.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Solves with a generator seeded from `seed`, or from OS entropy when
    /// `None`.
    pub fn solve_seeded(&self, problem: &CoverProblem, seed: Option<u64>) -> Result<CoverSchedule> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.solve(problem, &mut rng)
    }

    /// Runs the greedy loop.
    ///
    /// # Errors
    /// [`Error::FactOutsideUniverse`](crate::error::Error::FactOutsideUniverse)
    /// if a potion reveals a fact the universe does not contain. Facts no
    /// potion can reveal are not an error; they come back in
    /// [`CoverSchedule::leftover`].
    pub fn solve<R: Rng + ?Sized>(&self, problem: &CoverProblem, rng: &mut R) -> Result<CoverSchedule> {
        validate_coverage(&problem.universe, &problem.potions)?;

        let potions = &problem.potions;
        let mut uncovered: BTreeSet<Fact> = problem.universe.clone();
        let mut schedule = CoverSchedule::new(uncovered.len());

        // Duds can never gain anything
        let mut remaining: Vec<usize> = (0..potions.len())
            .filter(|&i| !potions[i].is_dud())
            .collect();
        let mut ties: Vec<usize> = Vec::new();

        info!(
            facts = uncovered.len(),
            potions = potions.len(),
            live = remaining.len(),
            tie_breaker = ?self.tie_breaker,
            "starting greedy cover"
        );

        while !uncovered.is_empty() {
            let mut best_gain = 0usize;
            ties.clear();

            // Gains only shrink, so a potion at zero stays at zero.
            remaining.retain(|&idx| {
                let gain = potions[idx].marginal_gain(&uncovered);
                if gain == 0 {
                    return false;
                }
                match gain.cmp(&best_gain) {
                    Ordering::Greater => {
                        best_gain = gain;
                        ties.clear();
                        ties.push(idx);
                    }
                    Ordering::Equal => ties.push(idx),
                    Ordering::Less => {}
                }
                true
            });

            let Some(chosen) = self.pick(&ties, rng) else {
                break;
            };

            let potion = &potions[chosen];
            let revealed: BTreeSet<Fact> = potion.coverage.intersection(&uncovered).copied().collect();
            for fact in &revealed {
                uncovered.remove(fact);
            }
            remaining.retain(|&idx| idx != chosen);

            debug!(
                step = schedule.potion_count() + 1,
                candidate = chosen,
                gain = revealed.len(),
                tied = ties.len(),
                uncovered = uncovered.len(),
                "selected potion"
            );
            schedule.add_selection(Selection {
                potion: potion.clone(),
                revealed,
            });
        }

        if !uncovered.is_empty() {
            warn!(
                leftover = uncovered.len(),
                "no remaining potion reveals the leftover facts"
            );
        }
        info!(
            potions = schedule.potion_count(),
            covered = schedule.covered_count(),
            leftover = uncovered.len(),
            "greedy cover finished"
        );

        schedule.leftover = uncovered;
        Ok(schedule)
    }

    fn pick<R: Rng + ?Sized>(&self, ties: &[usize], rng: &mut R) -> Option<usize> {
        match self.tie_breaker {
            TieBreaker::Random => ties.choose(rng).copied(),
            TieBreaker::First => ties.first().copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::{EffectId, IngredientId, Potion};
    use itertools::Itertools;
    use proptest::prelude::*;

    const A: u32 = 0;
    const B: u32 = 1;
    const C: u32 = 2;
    const D: u32 = 3;

    fn fact(i: u32, e: u32) -> Fact {
        Fact::new(IngredientId(i), EffectId(e))
    }

    fn potion(ingredients: &[u32], facts: &[(u32, u32)]) -> Potion {
        Potion::new(
            ingredients.iter().map(|&i| IngredientId(i)),
            facts.iter().map(|&(i, e)| fact(i, e)).collect(),
        )
    }

    /// universe {(A,1),(A,2),(B,2),(B,3),(C,1),(C,3)} with AB, BC, AC.
    fn triangle() -> CoverProblem {
        let universe = BTreeSet::from([
            fact(A, 1),
            fact(A, 2),
            fact(B, 2),
            fact(B, 3),
            fact(C, 1),
            fact(C, 3),
        ]);
        CoverProblem::new(
            universe,
            vec![
                potion(&[A, B], &[(A, 2), (B, 2)]),
                potion(&[B, C], &[(B, 3), (C, 3)]),
                potion(&[A, C], &[(A, 1), (C, 1)]),
            ],
        )
    }

    #[test]
    fn test_triangle_needs_all_three() {
        let problem = triangle();
        let schedule = GreedyCover::new().solve_seeded(&problem, Some(7)).unwrap();

        assert_eq!(schedule.potion_count(), 3);
        assert!(schedule.is_complete());
        assert_eq!(schedule.gains(), vec![2, 2, 2]);
        assert_eq!(schedule.covered(), problem.universe);
    }

    #[test]
    fn test_unreachable_fact_is_leftover() {
        let mut problem = triangle();
        problem.universe.insert(fact(D, 9));

        let schedule = GreedyCover::new().solve_seeded(&problem, Some(1)).unwrap();
        assert_eq!(schedule.potion_count(), 3);
        assert_eq!(schedule.leftover, BTreeSet::from([fact(D, 9)]));
        assert_eq!(schedule.universe_size, 7);
    }

    #[test]
    fn test_empty_universe() {
        let problem = CoverProblem::new(BTreeSet::new(), Vec::new());
        let schedule = GreedyCover::new().solve_seeded(&problem, None).unwrap();
        assert_eq!(schedule.potion_count(), 0);
        assert!(schedule.leftover.is_empty());
    }

    #[test]
    fn test_duds_never_selected() {
        let mut problem = triangle();
        problem.potions.insert(0, potion(&[A, D], &[]));

        let schedule = GreedyCover::new()
            .with_tie_breaker(TieBreaker::First)
            .solve_seeded(&problem, None)
            .unwrap();
        assert!(schedule.potions().all(|p| !p.is_dud()));
        assert_eq!(schedule.potion_count(), 3);
    }

    #[test]
    fn test_prefers_larger_gain() {
        let universe = BTreeSet::from([fact(A, 1), fact(B, 1), fact(C, 1), fact(A, 2), fact(C, 2)]);
        let problem = CoverProblem::new(
            universe,
            vec![
                potion(&[A, C], &[(A, 2), (C, 2)]),
                potion(&[A, B, C], &[(A, 1), (B, 1), (C, 1)]),
            ],
        );

        let schedule = GreedyCover::new().solve_seeded(&problem, Some(3)).unwrap();
        assert_eq!(schedule.gains(), vec![3, 2]);
        assert_eq!(schedule.selections[0].potion.ingredients.len(), 3);
    }

    #[test]
    fn test_overlap_reduces_later_gain() {
        // AB reveals (A,1),(B,1); ABC reveals those plus (C,1): ABC first, then AB is useless
        let universe = BTreeSet::from([fact(A, 1), fact(B, 1), fact(C, 1)]);
        let problem = CoverProblem::new(
            universe,
            vec![
                potion(&[A, B], &[(A, 1), (B, 1)]),
                potion(&[A, B, C], &[(A, 1), (B, 1), (C, 1)]),
            ],
        );

        let schedule = GreedyCover::new().solve_seeded(&problem, None).unwrap();
        assert_eq!(schedule.potion_count(), 1);
        assert!(schedule.is_complete());
    }

    #[test]
    fn test_first_tie_breaker_is_deterministic() {
        let problem = triangle();
        let solver = GreedyCover::new().with_tie_breaker(TieBreaker::First);
        let a = solver.solve_seeded(&problem, None).unwrap();
        let b = solver.solve_seeded(&problem, None).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.selections[0].potion, problem.potions[0]);
    }

    #[test]
    fn test_same_seed_same_schedule() {
        let problem = triangle();
        let solver = GreedyCover::new();
        for seed in 0..20 {
            let a = solver.solve_seeded(&problem, Some(seed)).unwrap();
            let b = solver.solve_seeded(&problem, Some(seed)).unwrap();
            assert_eq!(a, b, "seed {seed}");
        }
    }

    #[test]
    fn test_seeds_explore_different_orders() {
        let problem = triangle();
        let solver = GreedyCover::new();
        let firsts: BTreeSet<Vec<IngredientId>> = (0..64)
            .map(|seed| {
                let s = solver.solve_seeded(&problem, Some(seed)).unwrap();
                s.selections[0].potion.ingredients.clone()
            })
            .collect();
        assert!(firsts.len() > 1, "random tie-breaking should vary the first pick");
    }

    #[test]
    fn test_tie_break_fairness() {
        // Two disjoint potions of equal gain: the first pick should split evenly
        let universe = BTreeSet::from([fact(A, 1), fact(B, 1), fact(C, 2), fact(D, 2)]);
        let problem = CoverProblem::new(
            universe,
            vec![
                potion(&[A, B], &[(A, 1), (B, 1)]),
                potion(&[C, D], &[(C, 2), (D, 2)]),
            ],
        );
        let solver = GreedyCover::new();
        let runs = 2000;
        let first_wins = (0..runs)
            .filter(|&seed| {
                let s = solver.solve_seeded(&problem, Some(seed)).unwrap();
                s.selections[0].potion == problem.potions[0]
            })
            .count();
        let share = first_wins as f64 / runs as f64;
        assert!((0.4..=0.6).contains(&share), "share = {share}");
    }

    #[test]
    fn test_fact_outside_universe_is_rejected() {
        let mut problem = triangle();
        problem.potions.push(potion(&[A, D], &[(A, 1), (D, 1)]));

        let err = GreedyCover::new().solve_seeded(&problem, Some(0)).unwrap_err();
        assert!(matches!(
            err,
            Error::FactOutsideUniverse { candidate: 3, .. }
        ));
    }

    #[test]
    fn test_tie_breaker_from_str() {
        assert_eq!("random".parse::<TieBreaker>(), Ok(TieBreaker::Random));
        assert_eq!("FIRST".parse::<TieBreaker>(), Ok(TieBreaker::First));
        assert!("best".parse::<TieBreaker>().is_err());
    }

    /// Random problems: up to 6 ingredients with effects drawn from 0..6.
    fn arb_problem() -> impl Strategy<Value = CoverProblem> {
        proptest::collection::vec(proptest::collection::btree_set(0u32..6, 1..=4), 0..=6).prop_map(
            |rows| {
                let ingredients: Vec<crate::models::Ingredient> = rows
                    .into_iter()
                    .enumerate()
                    .map(|(i, effects)| crate::models::Ingredient {
                        id: IngredientId(i as u32),
                        effects: effects.into_iter().map(EffectId).collect(),
                    })
                    .collect();
                let universe = ingredients.iter().flat_map(|i| i.facts()).collect();
                let mut potions = Vec::new();
                for members in ingredients.iter().combinations(2) {
                    potions.push(crate::brewing::brew_combination(&members));
                }
                CoverProblem::new(universe, potions)
            },
        )
    }

    proptest! {
        #[test]
        fn prop_cover_invariants(problem in arb_problem(), seed in any::<u64>()) {
            let schedule = GreedyCover::new().solve_seeded(&problem, Some(seed)).unwrap();

            // Each step shrinks the uncovered set by exactly its gain
            let mut uncovered = problem.universe.clone();
            for selection in &schedule.selections {
                prop_assert!(selection.gain() > 0);
                let before = uncovered.len();
                for fact in &selection.revealed {
                    prop_assert!(uncovered.remove(fact));
                }
                prop_assert_eq!(uncovered.len(), before - selection.gain());
            }
            prop_assert_eq!(&uncovered, &schedule.leftover);

            // Terminates within |candidates| steps, no potion twice
            prop_assert!(schedule.potion_count() <= problem.potions.len());
            let distinct: BTreeSet<_> = schedule.potions().map(|p| p.ingredients.clone()).collect();
            prop_assert_eq!(distinct.len(), schedule.potion_count());

            // Leftover is exactly what no potion can reach
            prop_assert_eq!(&schedule.leftover, &problem.unreachable());

            // covered ∪ leftover = universe, disjoint
            let covered = schedule.covered();
            prop_assert!(covered.is_disjoint(&schedule.leftover));
            let union: BTreeSet<Fact> = covered.union(&schedule.leftover).copied().collect();
            prop_assert_eq!(union, problem.universe.clone());

            // Same seed, same schedule
            let again = GreedyCover::new().solve_seeded(&problem, Some(seed)).unwrap();
            prop_assert_eq!(again, schedule);
        }
    }
}
