//! Potion (candidate) model.
//!
//! A potion is an unordered combination of ingredients together with the
//! facts brewing it would reveal. The coverage set is computed once by
//! the brewer and never changes afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Catalog, EffectId, Fact, IngredientId};

/// A candidate ingredient combination and the facts it reveals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Potion {
    /// Ingredient ids in ascending order.
    pub ingredients: Vec<IngredientId>,
    /// Facts revealed by brewing this combination.
    pub coverage: BTreeSet<Fact>,
}

impl Potion {
    /// Creates a potion; ingredient ids are sorted and deduplicated.
    pub fn new(ingredients: impl IntoIterator<Item = IngredientId>, coverage: BTreeSet<Fact>) -> Self {
        let mut ingredients: Vec<IngredientId> = ingredients.into_iter().collect();
        ingredients.sort_unstable();
        ingredients.dedup();
        Self {
            ingredients,
            coverage,
        }
    }

    /// Distinct effects this potion reveals.
    pub fn effects(&self) -> BTreeSet<EffectId> {
        self.coverage.iter().map(|f| f.effect).collect()
    }

    /// Whether brewing this potion reveals nothing.
    #[inline]
    pub fn is_dud(&self) -> bool {
        self.coverage.is_empty()
    }

    /// Number of facts this potion would newly reveal.
    pub fn marginal_gain(&self, uncovered: &BTreeSet<Fact>) -> usize {
        self.coverage.iter().filter(|f| uncovered.contains(f)).count()
    }

    /// Ingredient names, in id order.
    pub fn ingredient_names<'a>(&self, catalog: &'a Catalog) -> Vec<&'a str> {
        self.ingredients
            .iter()
            .map(|&id| catalog.ingredient_name(id))
            .collect()
    }

    /// Effect names, in id order.
    pub fn effect_names<'a>(&self, catalog: &'a Catalog) -> Vec<&'a str> {
        self.effects()
            .into_iter()
            .map(|id| catalog.effect_name(id))
            .collect()
    }
}
