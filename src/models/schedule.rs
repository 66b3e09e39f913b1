//! Cover schedule (solution) model.
//!
//! A schedule is the ordered list of potions the greedy engine picked,
//! each with the facts it newly revealed, plus whatever facts no potion
//! could reach.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Fact, Potion};

/// One step of a solve: the chosen potion and what it revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// The chosen potion.
    pub potion: Potion,
    /// Facts that were still uncovered when the potion was chosen.
    pub revealed: BTreeSet<Fact>,
}

impl Selection {
    /// Marginal gain at the time of selection.
    #[inline]
    pub fn gain(&self) -> usize {
        self.revealed.len()
    }
}

/// Result of one solve.
///
/// Selection order is the order the engine chose potions in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverSchedule {
    /// Selections in pick order.
    pub selections: Vec<Selection>,
    /// Facts no remaining potion could reveal.
    pub leftover: BTreeSet<Fact>,
    /// Size of the universe this schedule was solved against.
    pub universe_size: usize,
}

impl CoverSchedule {
    /// Creates an empty schedule for a universe of the given size.
    pub fn new(universe_size: usize) -> Self {
        Self {
            universe_size,
            ..Default::default()
        }
    }

    /// Appends a selection.
    pub fn add_selection(&mut self, selection: Selection) {
        self.selections.push(selection);
    }

    /// Whether every fact of the universe was revealed.
    pub fn is_complete(&self) -> bool {
        self.leftover.is_empty()
    }

    /// Selected potions in pick order.
    pub fn potions(&self) -> impl Iterator<Item = &Potion> {
        self.selections.iter().map(|s| &s.potion)
    }

    /// Number of selected potions.
    pub fn potion_count(&self) -> usize {
        self.selections.len()
    }

    /// Union of everything the schedule revealed.
    pub fn covered(&self) -> BTreeSet<Fact> {
        self.selections
            .iter()
            .flat_map(|s| s.revealed.iter().copied())
            .collect()
    }

    /// Number of facts revealed.
    pub fn covered_count(&self) -> usize {
        self.selections.iter().map(Selection::gain).sum()
    }

    /// Marginal gains in pick order.
    pub fn gains(&self) -> Vec<usize> {
        self.selections.iter().map(Selection::gain).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EffectId, IngredientId};

    fn fact(i: u32, e: u32) -> Fact {
        Fact::new(IngredientId(i), EffectId(e))
    }

    fn selection(a: u32, b: u32, effect: u32) -> Selection {
        let coverage: BTreeSet<Fact> = [fact(a, effect), fact(b, effect)].into();
        Selection {
            potion: Potion::new([IngredientId(a), IngredientId(b)], coverage.clone()),
            revealed: coverage,
        }
    }

    #[test]
    fn test_schedule_counts() {
        let mut s = CoverSchedule::new(5);
        s.add_selection(selection(0, 1, 2));
        s.add_selection(selection(1, 2, 3));
        s.leftover.insert(fact(3, 9));

        assert_eq!(s.potion_count(), 2);
        assert_eq!(s.covered_count(), 4);
        assert_eq!(s.gains(), vec![2, 2]);
        assert_eq!(s.covered().len(), 4);
        assert!(!s.is_complete());
    }

    #[test]
    fn test_empty_schedule() {
        let s = CoverSchedule::new(0);
        assert!(s.is_complete());
        assert_eq!(s.potion_count(), 0);
        assert_eq!(s.potions().count(), 0);
    }
}
