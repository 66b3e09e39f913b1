//! Repeated independent solves.
//!
//! Each run gets its own seed, RNG and working set and runs on the
//! rayon pool; the problem is shared read-only. Different seeds let
//! random tie-breaking explore different covers of equal greedy quality.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::cover::{CoverProblem, CoverStats, GreedyCover};
use crate::error::Result;
use crate::models::CoverSchedule;

/// One finished run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Seed the run used.
    pub seed: u64,
    /// The schedule it produced.
    pub schedule: CoverSchedule,
    /// Metrics of that schedule.
    pub stats: CoverStats,
}

/// All runs of a batch, in seed order.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Outcomes, one per seed.
    pub outcomes: Vec<RunOutcome>,
    /// Index of the best outcome (fewest leftover, then fewest potions;
    /// earliest wins ties). `None` for an empty batch.
    pub best: Option<usize>,
}

impl RunSummary {
    /// The best outcome, if any.
    pub fn best_outcome(&self) -> Option<&RunOutcome> {
        self.best.map(|i| &self.outcomes[i])
    }
}

/// Seeds for `count` runs: `base, base + 1, ...` when a base is given,
/// otherwise drawn from OS entropy.
pub fn derive_seeds(base: Option<u64>, count: usize) -> Vec<u64> {
    match base {
        Some(base) => (0..count as u64).map(|i| base.wrapping_add(i)).collect(),
        None => {
            let mut rng = StdRng::from_os_rng();
            (0..count).map(|_| rng.random()).collect()
        }
    }
}

/// Solves the problem once per seed, in parallel.
///
/// Concurrency is bounded by the rayon thread pool, so any number of
/// seeds can be submitted at once. Outcomes keep seed order.
///
/// # Errors
/// The first error any run returned (they all see the same problem, so
/// a contract violation fails every run alike).
pub fn run_many(problem: &CoverProblem, solver: &GreedyCover, seeds: &[u64]) -> Result<RunSummary> {
    let schedules: Vec<CoverSchedule> = seeds
        .par_iter()
        .map(|&seed| solver.solve_seeded(problem, Some(seed)))
        .collect::<Result<Vec<_>>>()?;

    let mut outcomes = Vec::with_capacity(seeds.len());
    for (&seed, schedule) in seeds.iter().zip(schedules) {
        let stats = CoverStats::calculate(&schedule);
        tracing::info!(
            seed,
            potions = stats.potion_count,
            leftover = stats.leftover_facts,
            "run finished"
        );
        outcomes.push(RunOutcome {
            seed,
            schedule,
            stats,
        });
    }

    let best = outcomes
        .iter()
        .enumerate()
        .fold(None::<usize>, |best, (i, outcome)| match best {
            Some(b) if !outcome.stats.is_better_than(&outcomes[b].stats) => Some(b),
            _ => Some(i),
        });

    Ok(RunSummary { outcomes, best })
}
