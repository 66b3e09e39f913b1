//! Alchemy domain models.
//!
//! Provides the data types shared by the loader, the brewer and the
//! cover engine.
//!
//! # Domain Mappings
//!
//! | alchemy-cover | Set cover |
//! |---------------|-----------|
//! | Fact | Universe element |
//! | Potion | Candidate subset |
//! | CoverSchedule | Chosen subsets + uncovered remainder |

mod catalog;
mod fact;
mod ingredient;
mod potion;
mod schedule;

pub use catalog::Catalog;
pub use fact::{EffectId, Fact, IngredientId};
pub use ingredient::{AlchemyTable, Ingredient, IngredientRecord};
pub use potion::Potion;
pub use schedule::{CoverSchedule, Selection};
