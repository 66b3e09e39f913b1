//! alchemy-cover command-line tool.
//!
//! Reads an ingredient table, brews every candidate potion and writes a
//! small set of potions revealing every discoverable effect.
//!
//! ```text
//! alchemy-cover --infile ingredients.csv --outfile potions.csv
//! alchemy-cover --infile ingredients.csv --outfile 'potions-{}.csv' --count 10 --seed 1
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use alchemy_cover::brewing::PotionBrewer;
use alchemy_cover::config::CoverConfig;
use alchemy_cover::cover::{CoverProblem, GreedyCover, TieBreaker};
use alchemy_cover::io::{load_table, write_schedule, OutputFormat};
use alchemy_cover::runner::{derive_seeds, run_many};

/// Placeholder in `--outfile` replaced by the run number.
const RUN_PLACEHOLDER: &str = "{}";

/// Find a small set of potions that reveals every ingredient effect
#[derive(Parser, Debug)]
#[command(name = "alchemy-cover", version)]
#[command(about = "Greedy set cover over alchemy ingredient effects")]
struct Args {
    /// CSV to read ingredient data from
    #[arg(long, env = "ALCHEMY_INFILE")]
    infile: PathBuf,

    /// File to write potions to; must contain {} when --count > 1
    #[arg(long, env = "ALCHEMY_OUTFILE")]
    outfile: PathBuf,

    /// JSON configuration file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of independent runs
    #[arg(long)]
    count: Option<usize>,

    /// Seed of the first run (run i uses seed + i)
    #[arg(long)]
    seed: Option<u64>,

    /// Largest potion to brew (2 or 3 in the game)
    #[arg(long)]
    max_ingredients: Option<usize>,

    /// Refuse tables that would brew more candidate combinations than this
    #[arg(long)]
    max_combinations: Option<usize>,

    /// Maximum effects per ingredient row
    #[arg(long)]
    max_effects: Option<usize>,

    /// How to choose among equally good potions: random | first
    #[arg(long)]
    tie_breaker: Option<TieBreaker>,

    /// Output format: csv | json
    #[arg(long, default_value = "csv")]
    format: OutputFormat,

    /// Keep potions that reveal nothing
    #[arg(long)]
    keep_duds: bool,

    /// Exit with an error if any fact stays uncovered
    #[arg(long)]
    require_complete: bool,
}

impl Args {
    fn resolve_config(&self) -> anyhow::Result<CoverConfig> {
        let mut config = match &self.config {
            Some(path) => CoverConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => CoverConfig::default(),
        };
        if let Some(count) = self.count {
            config.runs = count;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(max) = self.max_ingredients {
            config.max_ingredients = max;
        }
        if let Some(limit) = self.max_combinations {
            config.max_combinations = limit;
        }
        if let Some(max) = self.max_effects {
            config.max_effects_per_ingredient = max;
        }
        if let Some(tie_breaker) = self.tie_breaker {
            config.tie_breaker = tie_breaker;
        }
        if self.keep_duds {
            config.drop_duds = false;
        }
        config.validate()?;
        Ok(config)
    }
}

fn output_path(template: &Path, run: usize, runs: usize) -> PathBuf {
    if runs == 1 {
        return template.to_path_buf();
    }
    PathBuf::from(
        template
            .to_string_lossy()
            .replace(RUN_PLACEHOLDER, &(run + 1).to_string()),
    )
}

fn run(args: &Args) -> anyhow::Result<bool> {
    let config = args.resolve_config()?;
    if config.runs > 1 && !args.outfile.to_string_lossy().contains(RUN_PLACEHOLDER) {
        bail!(
            "--outfile must contain {RUN_PLACEHOLDER} when running {} times",
            config.runs
        );
    }

    let table = load_table(&args.infile, config.max_effects_per_ingredient)
        .with_context(|| format!("loading {}", args.infile.display()))?;
    info!("Read {} ingredients", table.len());

    let brewer = PotionBrewer::from_config(&config)?;
    let problem = CoverProblem::from_table(&table, &brewer)?;
    info!(
        "Need to find {} ingredient-effect pairs using {} candidate potions",
        problem.universe.len(),
        problem.potions.len()
    );
    let unreachable = problem.unreachable();
    if !unreachable.is_empty() {
        warn!(
            "{} ingredient-effect pairs are not shared with any other ingredient",
            unreachable.len()
        );
    }

    let solver = GreedyCover::new().with_tie_breaker(config.tie_breaker);
    let seeds = derive_seeds(config.seed, config.runs);
    let summary = run_many(&problem, &solver, &seeds)?;

    for (i, outcome) in summary.outcomes.iter().enumerate() {
        let path = output_path(&args.outfile, i, config.runs);
        write_schedule(
            &path,
            args.format,
            &outcome.schedule,
            &table.catalog,
            Some(outcome.seed),
        )
        .with_context(|| format!("writing {}", path.display()))?;
        info!(
            "Run {} (seed {}): {} potions, {} facts left over -> {}",
            i + 1,
            outcome.seed,
            outcome.stats.potion_count,
            outcome.stats.leftover_facts,
            path.display()
        );
    }

    if let Some(best) = summary.best_outcome() {
        info!(
            "Best run used seed {} with {} potions",
            best.seed, best.stats.potion_count
        );
    }

    Ok(summary.outcomes.iter().all(|o| o.schedule.is_complete()))
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) if args.require_complete => {
            tracing::error!("some ingredient-effect pairs could not be covered");
            ExitCode::from(2)
        }
        Ok(false) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn test_output_path_single_run() {
        let path = output_path(Path::new("potions.csv"), 0, 1);
        assert_eq!(path, PathBuf::from("potions.csv"));
    }

    #[test]
    fn test_output_path_numbered() {
        let path = output_path(Path::new("out/potions-{}.csv"), 2, 5);
        assert_eq!(path, PathBuf::from("out/potions-3.csv"));
    }

    #[test]
    fn test_args_override_config() {
        let args = Args::parse_from([
            "alchemy-cover",
            "--infile",
            "in.csv",
            "--outfile",
            "out-{}.csv",
            "--count",
            "3",
            "--seed",
            "9",
            "--max-ingredients",
            "3",
            "--tie-breaker",
            "first",
            "--format",
            "json",
        ]);
        let config = args.resolve_config().unwrap();
        assert_eq!(config.runs, 3);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.max_ingredients, 3);
        assert_eq!(config.tie_breaker, TieBreaker::First);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_bad_override_is_rejected() {
        let args = Args::parse_from([
            "alchemy-cover",
            "--infile",
            "in.csv",
            "--outfile",
            "out.csv",
            "--count",
            "0",
        ]);
        assert!(args.resolve_config().is_err());
    }

    #[test]
    fn test_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let infile = dir.path().join("ingredients.csv");
        std::fs::write(
            &infile,
            "Ingredient,Effect1,Effect2\nA,1,2\nB,2,3\nC,1,3\nD,9,\n",
        )
        .unwrap();
        let outfile = dir.path().join("potions-{}.csv");

        let args = Args::parse_from([
            OsString::from("alchemy-cover"),
            OsString::from("--infile"),
            infile.into_os_string(),
            OsString::from("--outfile"),
            outfile.into_os_string(),
            OsString::from("--count"),
            OsString::from("2"),
            OsString::from("--seed"),
            OsString::from("5"),
        ]);
        let complete = run(&args).unwrap();
        assert!(!complete); // D's effect is unique

        for n in 1..=2 {
            let text = std::fs::read_to_string(dir.path().join(format!("potions-{n}.csv"))).unwrap();
            assert_eq!(text.lines().count(), 4); // header + 3 potions
        }
    }

    #[test]
    fn test_combination_limit_aborts_run() {
        let dir = tempfile::tempdir().unwrap();
        let infile = dir.path().join("ingredients.csv");
        std::fs::write(&infile, "Ingredient,Effect1\nA,1\nB,1\nC,1\n").unwrap();

        let args = Args::parse_from([
            OsString::from("alchemy-cover"),
            OsString::from("--infile"),
            infile.into_os_string(),
            OsString::from("--outfile"),
            dir.path().join("potions.csv").into_os_string(),
            OsString::from("--max-combinations"),
            OsString::from("2"),
        ]);
        assert!(run(&args).is_err());
        assert!(!dir.path().join("potions.csv").exists());
    }

    #[test]
    fn test_count_requires_placeholder() {
        let args = Args::parse_from([
            "alchemy-cover",
            "--infile",
            "in.csv",
            "--outfile",
            "out.csv",
            "--count",
            "2",
        ]);
        assert!(run(&args).is_err());
    }
}
