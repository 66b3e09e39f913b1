//! Cover problem: the universe and the candidate potions.

use std::collections::BTreeSet;

use crate::brewing::PotionBrewer;
use crate::error::Result;
use crate::models::{AlchemyTable, Fact, Potion};

/// Read-only input to the cover engine.
///
/// Built once and shared by every solve; the engine copies the universe
/// into its own working set.
#[derive(Debug, Clone, Default)]
pub struct CoverProblem {
    /// Facts that should be revealed.
    pub universe: BTreeSet<Fact>,
    /// Candidate potions in enumeration order.
    pub potions: Vec<Potion>,
}

impl CoverProblem {
    /// Creates a problem from explicit parts.
    pub fn new(universe: BTreeSet<Fact>, potions: Vec<Potion>) -> Self {
        Self { universe, potions }
    }

    /// Brews every candidate potion for a table; the universe is every
    /// (ingredient, effect) pair in it.
    ///
    /// # Errors
    /// Whatever [`PotionBrewer::brew`] rejects.
    pub fn from_table(table: &AlchemyTable, brewer: &PotionBrewer) -> Result<Self> {
        Ok(Self {
            universe: table.universe(),
            potions: brewer.brew(table)?,
        })
    }

    /// Facts that no candidate reveals. These always end up as leftover.
    pub fn unreachable(&self) -> BTreeSet<Fact> {
        let reachable = AlchemyTable::discoverable(&self.potions);
        self.universe.difference(&reachable).copied().collect()
    }
}
