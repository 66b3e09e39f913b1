//! Ingredient/effect identifiers and the facts built from them.
//!
//! Names are interned by [`Catalog`](super::Catalog); everything past the
//! loader works on these dense `Copy` handles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense handle for an ingredient name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IngredientId(pub u32);

/// Dense handle for an effect name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EffectId(pub u32);

/// An (ingredient, effect) pair waiting to be discovered.
///
/// Ordered by ingredient first, then effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Fact {
    /// Ingredient that carries the effect.
    pub ingredient: IngredientId,
    /// The effect itself.
    pub effect: EffectId,
}

impl Fact {
    /// Creates a fact.
    #[inline]
    pub fn new(ingredient: IngredientId, effect: EffectId) -> Self {
        Self { ingredient, effect }
    }
}

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I{}", self.0)
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.ingredient, self.effect)
    }
}
