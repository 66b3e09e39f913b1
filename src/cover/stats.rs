//! Cover quality metrics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Potions | Number of selections |
//! | Coverage rate | covered / universe (1.0 for an empty universe) |
//! | First gain | Marginal gain of the first pick |
//! | Last gain | Marginal gain of the final pick |
//! | Average gain | covered / potions |

use serde::{Deserialize, Serialize};

use crate::models::CoverSchedule;

/// Summary figures for one schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverStats {
    /// Number of potions selected.
    pub potion_count: usize,
    /// Facts revealed.
    pub covered_facts: usize,
    /// Facts left uncovered.
    pub leftover_facts: usize,
    /// Fraction of the universe revealed (0.0..=1.0).
    pub coverage_rate: f64,
    /// Gain of the first selection (0 if none).
    pub first_gain: usize,
    /// Gain of the last selection (0 if none).
    pub last_gain: usize,
    /// Mean gain per selection (0.0 if none).
    pub avg_gain: f64,
}

impl CoverStats {
    /// Computes the metrics of a schedule.
    pub fn calculate(schedule: &CoverSchedule) -> Self {
        let gains = schedule.gains();
        let covered: usize = gains.iter().sum();
        let potion_count = gains.len();

        let coverage_rate = if schedule.universe_size == 0 {
            1.0
        } else {
            covered as f64 / schedule.universe_size as f64
        };
        let avg_gain = if potion_count == 0 {
            0.0
        } else {
            covered as f64 / potion_count as f64
        };

        Self {
            potion_count,
            covered_facts: covered,
            leftover_facts: schedule.leftover.len(),
            coverage_rate,
            first_gain: gains.first().copied().unwrap_or(0),
            last_gain: gains.last().copied().unwrap_or(0),
            avg_gain,
        }
    }

    /// Whether this result beats `other`: fewer leftover facts first,
    /// then fewer potions.
    pub fn is_better_than(&self, other: &CoverStats) -> bool {
        (self.leftover_facts, self.potion_count) < (other.leftover_facts, other.potion_count)
    }
}
