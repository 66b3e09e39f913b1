//! Name interning for ingredients and effects.

use std::collections::HashMap;

use super::{EffectId, Fact, IngredientId};
use crate::error::{Error, Result};

/// Bidirectional name ↔ id map for ingredients and effects.
///
/// Ids are handed out densely in first-seen order, so the same input
/// table always produces the same ids.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    ingredient_names: Vec<String>,
    effect_names: Vec<String>,
    ingredient_index: HashMap<String, IngredientId>,
    effect_index: HashMap<String, EffectId>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for an ingredient name, interning it if new.
    ///
    /// # Errors
    /// [`Error::TooManyNames`] once ids no longer fit in `u32`.
    pub fn intern_ingredient(&mut self, name: &str) -> Result<IngredientId> {
        if let Some(&id) = self.ingredient_index.get(name) {
            return Ok(id);
        }
        let id = IngredientId(next_id(self.ingredient_names.len(), "ingredient")?);
        self.ingredient_names.push(name.to_string());
        self.ingredient_index.insert(name.to_string(), id);
        Ok(id)
    }

    /// Returns the id for an effect name, interning it if new.
    ///
    /// # Errors
    /// [`Error::TooManyNames`] once ids no longer fit in `u32`.
    pub fn intern_effect(&mut self, name: &str) -> Result<EffectId> {
        if let Some(&id) = self.effect_index.get(name) {
            return Ok(id);
        }
        let id = EffectId(next_id(self.effect_names.len(), "effect")?);
        self.effect_names.push(name.to_string());
        self.effect_index.insert(name.to_string(), id);
        Ok(id)
    }

    /// Looks up an ingredient id by name.
    pub fn ingredient_id(&self, name: &str) -> Option<IngredientId> {
        self.ingredient_index.get(name).copied()
    }

    /// Looks up an effect id by name.
    pub fn effect_id(&self, name: &str) -> Option<EffectId> {
        self.effect_index.get(name).copied()
    }

    /// Ingredient name, or `"?"` for an id this catalog never issued.
    pub fn ingredient_name(&self, id: IngredientId) -> &str {
        self.ingredient_names
            .get(id.0 as usize)
            .map(String::as_str)
            .unwrap_or("?")
    }

    /// Effect name, or `"?"` for an id this catalog never issued.
    pub fn effect_name(&self, id: EffectId) -> &str {
        self.effect_names
            .get(id.0 as usize)
            .map(String::as_str)
            .unwrap_or("?")
    }

    /// Renders a fact as `(ingredient, effect)` names.
    pub fn fact_names(&self, fact: Fact) -> (&str, &str) {
        (
            self.ingredient_name(fact.ingredient),
            self.effect_name(fact.effect),
        )
    }

    /// Number of interned effects.
    pub fn effect_count(&self) -> usize {
        self.effect_names.len()
    }
}

fn next_id(count: usize, kind: &'static str) -> Result<u32> {
    u32::try_from(count).map_err(|_| Error::TooManyNames { kind, count })
}
