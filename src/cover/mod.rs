//! Greedy set cover over alchemy facts.
//!
//! Picks, one at a time, the potion that reveals the most facts still
//! unknown, until every fact is known or no potion helps any more.
//! Equally good potions are chosen between at random, so repeated runs
//! with different seeds explore different covers of the same quality.
//!
//! # Usage
//!
//! ```
//! use alchemy_cover::brewing::PotionBrewer;
//! use alchemy_cover::cover::{CoverProblem, CoverStats, GreedyCover};
//! use alchemy_cover::models::{AlchemyTable, IngredientRecord};
//!
//! let table = AlchemyTable::from_records(
//!     &[
//!         IngredientRecord::new("A", ["1", "2"]),
//!         IngredientRecord::new("B", ["2", "3"]),
//!         IngredientRecord::new("C", ["1", "3"]),
//!     ],
//!     4,
//! )
//! .unwrap();
//! let problem = CoverProblem::from_table(&table, &PotionBrewer::new()).unwrap();
//! let schedule = GreedyCover::new().solve_seeded(&problem, Some(1)).unwrap();
//!
//! let stats = CoverStats::calculate(&schedule);
//! assert_eq!(stats.potion_count, 3);
//! assert!(schedule.is_complete());
//! ```
//!
//! # References
//!
//! - Chvátal (1979), "A Greedy Heuristic for the Set-Covering Problem"
//! - Vazirani (2001), "Approximation Algorithms", Ch. 2

mod greedy;
mod problem;
mod stats;

pub use greedy::{GreedyCover, TieBreaker};
pub use problem::CoverProblem;
pub use stats::CoverStats;
