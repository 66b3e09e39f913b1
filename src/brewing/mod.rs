//! Candidate potion construction.
//!
//! Enumerates ingredient combinations and computes, for each, the facts
//! brewing it would reveal.
//!
//! # Discovery Rule
//!
//! An effect shows up in a potion when at least two of its ingredients
//! share it. Brewing then reveals that effect on *every* ingredient of
//! the combination that carries it, so a pair sharing effect E yields
//! two facts, `(A, E)` and `(B, E)`.
//!
//! # Usage
//!
//! ```
//! use alchemy_cover::brewing::PotionBrewer;
//! use alchemy_cover::models::{AlchemyTable, IngredientRecord};
//!
//! let table = AlchemyTable::from_records(
//!     &[
//!         IngredientRecord::new("A", ["1", "2"]),
//!         IngredientRecord::new("B", ["2", "3"]),
//!     ],
//!     4,
//! )
//! .unwrap();
//! let potions = PotionBrewer::new().brew(&table).unwrap();
//! assert_eq!(potions.len(), 1);
//! assert_eq!(potions[0].coverage.len(), 2);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;

use crate::config::CoverConfig;
use crate::error::{Error, Result};
use crate::models::{AlchemyTable, EffectId, Fact, Ingredient, Potion};

/// Smallest combination that can reveal anything.
pub const MIN_POTION_SIZE: usize = 2;

/// Default cap on how many combinations a single brew may enumerate.
pub const DEFAULT_MAX_COMBINATIONS: usize = 5_000_000;

/// Builds candidate potions from an ingredient table.
///
/// Combination sizes run from `min_ingredients` to `max_ingredients`
/// (ascending); within a size, combinations follow table order
/// lexicographically. The enumeration order is stable, which keeps
/// seeded solves reproducible.
#[derive(Debug, Clone)]
pub struct PotionBrewer {
    min_ingredients: usize,
    max_ingredients: usize,
    max_combinations: usize,
    drop_duds: bool,
}

impl PotionBrewer {
    /// Creates a brewer for two-ingredient potions that keeps duds.
    pub fn new() -> Self {
        Self {
            min_ingredients: MIN_POTION_SIZE,
            max_ingredients: MIN_POTION_SIZE,
            max_combinations: DEFAULT_MAX_COMBINATIONS,
            drop_duds: false,
        }
    }

    /// Creates a brewer from configuration.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] for a size range below two or reversed.
    pub fn from_config(config: &CoverConfig) -> Result<Self> {
        Self::new()
            .with_sizes(config.min_ingredients, config.max_ingredients)
            .map(|b| {
                b.without_duds(config.drop_duds)
                    .with_max_combinations(config.max_combinations)
            })
    }

    /// Sets the combination size range (inclusive).
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] if `min < 2` or `max < min`.
    pub fn with_sizes(mut self, min: usize, max: usize) -> Result<Self> {
        if min < MIN_POTION_SIZE {
            return Err(Error::config(format!(
                "potions need at least {MIN_POTION_SIZE} ingredients, got {min}"
            )));
        }
        if max < min {
            return Err(Error::config(format!(
                "max ingredients ({max}) is below min ingredients ({min})"
            )));
        }
        self.min_ingredients = min;
        self.max_ingredients = max;
        Ok(self)
    }

    /// Whether to discard combinations that reveal nothing.
    pub fn without_duds(mut self, drop: bool) -> Self {
        self.drop_duds = drop;
        self
    }

    /// Caps the number of combinations `brew` will enumerate.
    pub fn with_max_combinations(mut self, limit: usize) -> Self {
        self.max_combinations = limit;
        self
    }

    /// Number of combinations enumerated for `n` ingredients, saturating
    /// at `usize::MAX`.
    pub fn combination_count(&self, n: usize) -> usize {
        (self.min_ingredients..=self.max_ingredients)
            .map(|k| binomial(n, k))
            .fold(0usize, usize::saturating_add)
    }

    /// Enumerates all candidate potions.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] when the table would yield more
    /// combinations than the configured cap.
    pub fn brew(&self, table: &AlchemyTable) -> Result<Vec<Potion>> {
        let ingredients = &table.ingredients;
        let expected = self.combination_count(ingredients.len());
        if expected > self.max_combinations {
            return Err(Error::config(format!(
                "{} ingredients in potions of {}..={} make {expected} combinations, above the limit of {}",
                ingredients.len(),
                self.min_ingredients,
                self.max_ingredients,
                self.max_combinations
            )));
        }

        let mut potions = Vec::new();
        let mut duds = 0usize;

        for k in self.min_ingredients..=self.max_ingredients {
            for members in ingredients.iter().combinations(k) {
                let potion = brew_combination(&members);
                if potion.is_dud() {
                    duds += 1;
                    if self.drop_duds {
                        continue;
                    }
                }
                potions.push(potion);
            }
        }

        tracing::info!(
            ingredients = ingredients.len(),
            potions = potions.len(),
            duds,
            dropped_duds = self.drop_duds,
            "brewed candidate potions"
        );
        Ok(potions)
    }
}

impl Default for PotionBrewer {
    fn default() -> Self {
        Self::new()
    }
}

/// Binomial coefficient C(n, k), saturating on overflow.
fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: usize = 1;
    for i in 0..k {
        result = result.saturating_mul(n - i) / (i + 1);
    }
    result
}

/// Computes the potion a combination of ingredients makes.
///
/// Effects carried by two or more members are revealed for every member
/// carrying them.
pub fn brew_combination(members: &[&Ingredient]) -> Potion {
    let mut counts: BTreeMap<EffectId, usize> = BTreeMap::new();
    for ingredient in members {
        for &effect in &ingredient.effects {
            *counts.entry(effect).or_insert(0) += 1;
        }
    }

    let shared: BTreeSet<EffectId> = counts
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(effect, _)| effect)
        .collect();

    let coverage: BTreeSet<Fact> = members
        .iter()
        .flat_map(|ingredient| {
            shared
                .iter()
                .filter(move |&&effect| ingredient.has_effect(effect))
                .map(move |&effect| Fact::new(ingredient.id, effect))
        })
        .collect();

    Potion::new(members.iter().map(|i| i.id), coverage)
}
