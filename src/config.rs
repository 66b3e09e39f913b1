//! Run configuration.
//!
//! Holds the domain constants of the alchemy rules (effects per
//! ingredient, potion sizes) alongside the solver's run parameters.
//! Every field has a default, so a JSON file only needs the keys it
//! changes.
//!
//! ```
//! use alchemy_cover::config::CoverConfig;
//!
//! let config = CoverConfig::from_json_str(r#"{ "max_ingredients": 3, "seed": 7 }"#).unwrap();
//! assert_eq!(config.max_ingredients, 3);
//! assert_eq!(config.max_effects_per_ingredient, 4);
//! assert_eq!(config.seed, Some(7));
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::brewing::{DEFAULT_MAX_COMBINATIONS, MIN_POTION_SIZE};
use crate::cover::TieBreaker;
use crate::error::{Error, Result};

/// Effects an ingredient carries in Skyrim.
pub const DEFAULT_MAX_EFFECTS: usize = 4;

/// Configuration for loading, brewing and solving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverConfig {
    /// Maximum effects allowed per ingredient row.
    pub max_effects_per_ingredient: usize,
    /// Smallest potion size to enumerate.
    pub min_ingredients: usize,
    /// Largest potion size to enumerate.
    pub max_ingredients: usize,
    /// Refuse to brew when the table yields more combinations than this.
    pub max_combinations: usize,
    /// Drop potions that reveal nothing before solving.
    pub drop_duds: bool,
    /// How ties between equally good potions are broken.
    pub tie_breaker: TieBreaker,
    /// Seed for the first run. `None` = OS entropy.
    pub seed: Option<u64>,
    /// Number of independent solves.
    pub runs: usize,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            max_effects_per_ingredient: DEFAULT_MAX_EFFECTS,
            min_ingredients: MIN_POTION_SIZE,
            max_ingredients: MIN_POTION_SIZE,
            max_combinations: DEFAULT_MAX_COMBINATIONS,
            drop_duds: true,
            tie_breaker: TieBreaker::Random,
            seed: None,
            runs: 1,
        }
    }
}

impl CoverConfig {
    /// Parses a configuration from JSON and validates it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json_str(&json)
    }

    /// Sets the potion size range.
    pub fn with_ingredients(mut self, min: usize, max: usize) -> Self {
        self.min_ingredients = min;
        self.max_ingredients = max;
        self
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the number of runs.
    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    /// Sets the tie-breaking strategy.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Checks the values make sense together.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> Result<()> {
        if self.max_effects_per_ingredient == 0 {
            return Err(Error::config("max_effects_per_ingredient must be at least 1"));
        }
        if self.min_ingredients < MIN_POTION_SIZE {
            return Err(Error::config(format!(
                "min_ingredients must be at least {MIN_POTION_SIZE}"
            )));
        }
        if self.max_ingredients < self.min_ingredients {
            return Err(Error::config(format!(
                "max_ingredients ({}) is below min_ingredients ({})",
                self.max_ingredients, self.min_ingredients
            )));
        }
        if self.max_combinations == 0 {
            return Err(Error::config("max_combinations must be at least 1"));
        }
        if self.runs == 0 {
            return Err(Error::config("runs must be at least 1"));
        }
        Ok(())
    }
}
