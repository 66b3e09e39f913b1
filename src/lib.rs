//! Potion planning for Skyrim-style alchemy.
//!
//! Finds a small set of potions that, once brewed, reveals every
//! discoverable (ingredient, effect) fact of an ingredient table. The
//! selection is a greedy approximation to set cover with random
//! tie-breaking, so repeated runs yield different covers of the same
//! greedy quality.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Fact`, `Catalog`, `AlchemyTable`,
//!   `Potion`, `CoverSchedule`
//! - **`brewing`**: Candidate potions from ingredient combinations
//! - **`cover`**: The greedy engine, its tie-breaking and quality metrics
//! - **`validation`**: Input integrity checks (duplicate ingredients,
//!   effect caps, coverage outside the universe)
//! - **`io`**: CSV ingredient tables in, CSV/JSON schedules out
//! - **`runner`**: Independent solves with distinct seeds
//! - **`config`**: Domain constants and run parameters
//!
//! # Pipeline
//!
//! ```
//! use alchemy_cover::brewing::PotionBrewer;
//! use alchemy_cover::cover::{CoverProblem, GreedyCover};
//! use alchemy_cover::models::{AlchemyTable, IngredientRecord};
//!
//! let table = AlchemyTable::from_records(
//!     &[
//!         IngredientRecord::new("Wheat", ["Restore Health", "Fortify Health"]),
//!         IngredientRecord::new("Blue Mountain Flower", ["Restore Health", "Fortify Health"]),
//!         IngredientRecord::new("Salt Pile", ["Weakness to Magic"]),
//!     ],
//!     4,
//! )
//! .unwrap();
//! let problem = CoverProblem::from_table(&table, &PotionBrewer::new()).unwrap();
//! let schedule = GreedyCover::new().solve_seeded(&problem, Some(0)).unwrap();
//!
//! assert_eq!(schedule.potion_count(), 1);
//! assert_eq!(schedule.leftover.len(), 1); // Salt Pile shares nothing
//! ```
//!
//! # References
//!
//! - Chvátal (1979), "A Greedy Heuristic for the Set-Covering Problem"
//! - Johnson (1974), "Approximation Algorithms for Combinatorial Problems"

pub mod brewing;
pub mod config;
pub mod cover;
pub mod error;
pub mod io;
pub mod models;
pub mod runner;
pub mod validation;

pub use error::{Error, Result};
