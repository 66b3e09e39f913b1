//! Ingredient model and the loaded ingredient → effects relation.
//!
//! # Domain Rule
//! In Skyrim each ingredient carries at most four effects; the cap is a
//! loader concern and is configurable (see `CoverConfig`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Catalog, EffectId, Fact, IngredientId, Potion};
use crate::error::{Error, Result};
use crate::validation::validate_records;

/// A raw table row: ingredient name and its effect names, as read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientRecord {
    /// Ingredient display name.
    pub name: String,
    /// Effect names in column order.
    pub effects: Vec<String>,
}

impl IngredientRecord {
    /// Creates a record.
    pub fn new<I, S>(name: impl Into<String>, effects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            effects: effects.into_iter().map(Into::into).collect(),
        }
    }
}

/// An interned ingredient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    /// Interned id.
    pub id: IngredientId,
    /// Effects this ingredient carries.
    pub effects: BTreeSet<EffectId>,
}

impl Ingredient {
    /// Whether this ingredient carries the effect.
    #[inline]
    pub fn has_effect(&self, effect: EffectId) -> bool {
        self.effects.contains(&effect)
    }

    /// The facts this ingredient contributes to the universe.
    pub fn facts(&self) -> impl Iterator<Item = Fact> + '_ {
        self.effects.iter().map(move |&e| Fact::new(self.id, e))
    }
}

/// The loaded relation: every ingredient with its effects, plus the
/// catalog that maps ids back to names.
///
/// Ingredients keep table order.
#[derive(Debug, Clone, Default)]
pub struct AlchemyTable {
    /// Name interning for ingredients and effects.
    pub catalog: Catalog,
    /// Ingredients in table order.
    pub ingredients: Vec<Ingredient>,
}

impl AlchemyTable {
    /// Builds a table from raw records after validating them.
    ///
    /// # Errors
    /// [`Error::InvalidInput`] listing every problem found (duplicate
    /// ingredients, more than `max_effects` effects, empty names, ...).
    pub fn from_records(records: &[IngredientRecord], max_effects: usize) -> Result<Self> {
        validate_records(records, max_effects).map_err(Error::InvalidInput)?;

        let mut catalog = Catalog::new();
        let mut ingredients = Vec::with_capacity(records.len());
        for record in records {
            let id = catalog.intern_ingredient(record.name.trim())?;
            let effects = record
                .effects
                .iter()
                .map(|e| catalog.intern_effect(e.trim()))
                .collect::<Result<_>>()?;
            ingredients.push(Ingredient { id, effects });
        }

        tracing::debug!(
            ingredients = ingredients.len(),
            effects = catalog.effect_count(),
            "built alchemy table"
        );
        Ok(Self {
            catalog,
            ingredients,
        })
    }

    /// Number of ingredients.
    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    /// Whether the table has no ingredients.
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    /// Every (ingredient, effect) pair in the relation.
    ///
    /// Includes effects only one ingredient has; those can never be
    /// revealed by a potion and surface as leftover facts.
    pub fn universe(&self) -> BTreeSet<Fact> {
        self.ingredients.iter().flat_map(Ingredient::facts).collect()
    }

    /// The facts at least one of the given potions reveals.
    pub fn discoverable(potions: &[Potion]) -> BTreeSet<Fact> {
        potions
            .iter()
            .flat_map(|p| p.coverage.iter().copied())
            .collect()
    }

    /// Builds a fact from names, if both are known.
    pub fn fact(&self, ingredient: &str, effect: &str) -> Option<Fact> {
        Some(Fact::new(
            self.catalog.ingredient_id(ingredient)?,
            self.catalog.effect_id(effect)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<IngredientRecord> {
        vec![
            IngredientRecord::new("A", ["1", "2"]),
            IngredientRecord::new("B", ["2", "3"]),
            IngredientRecord::new("C", ["1", "3"]),
        ]
    }

    #[test]
    fn test_from_records() {
        let table = AlchemyTable::from_records(&sample_records(), 4).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.catalog.effect_count(), 3);

        let b = &table.ingredients[1];
        assert_eq!(table.catalog.ingredient_name(b.id), "B");
        assert!(b.has_effect(table.catalog.effect_id("2").unwrap()));
        assert!(table.catalog.ingredient_id("Z").is_none());
    }

    #[test]
    fn test_universe_contains_every_pair() {
        let table = AlchemyTable::from_records(&sample_records(), 4).unwrap();
        let universe = table.universe();
        assert_eq!(universe.len(), 6);
        assert!(universe.contains(&table.fact("A", "1").unwrap()));
        assert!(universe.contains(&table.fact("C", "3").unwrap()));
        assert!(table.fact("A", "3").is_some()); // both names known
        assert!(!universe.contains(&table.fact("A", "3").unwrap()));
    }

    #[test]
    fn test_rejects_too_many_effects() {
        let records = vec![IngredientRecord::new("A", ["1", "2", "3", "4", "5"])];
        let err = AlchemyTable::from_records(&records, 4).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_empty_table() {
        let table = AlchemyTable::from_records(&[], 4).unwrap();
        assert!(table.is_empty());
        assert!(table.universe().is_empty());
    }
}
