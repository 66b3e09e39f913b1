//! Schedule writers.
//!
//! CSV output lists one potion per row, in selection order:
//! `Ingredient1..IngredientK, Effect1..EffectM`, padded with empty
//! cells. JSON output is a [`ScheduleReport`].

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cover::CoverStats;
use crate::error::{Error, Result};
use crate::models::{Catalog, CoverSchedule};

/// Output encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One potion per CSV row.
    #[default]
    Csv,
    /// A pretty-printed [`ScheduleReport`].
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}' (expected csv|json)")),
        }
    }
}

/// A named (ingredient, effect) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedFact {
    pub ingredient: String,
    pub effect: String,
}

/// One selected potion, rendered with names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotionReport {
    /// Ingredient names.
    pub ingredients: Vec<String>,
    /// Effects the potion shows.
    pub effects: Vec<String>,
    /// Facts this potion newly revealed.
    pub revealed: Vec<NamedFact>,
}

/// Name-rendered schedule, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReport {
    /// Seed the run used, if known.
    pub seed: Option<u64>,
    /// Potions in selection order.
    pub potions: Vec<PotionReport>,
    /// Facts nothing could reveal.
    pub leftover: Vec<NamedFact>,
    /// Quality metrics.
    pub stats: CoverStats,
}

impl ScheduleReport {
    /// Renders a schedule through the catalog.
    pub fn new(schedule: &CoverSchedule, catalog: &Catalog, seed: Option<u64>) -> Self {
        let name_fact = |fact| {
            let (ingredient, effect) = catalog.fact_names(fact);
            NamedFact {
                ingredient: ingredient.to_string(),
                effect: effect.to_string(),
            }
        };

        let potions = schedule
            .selections
            .iter()
            .map(|s| PotionReport {
                ingredients: owned(s.potion.ingredient_names(catalog)),
                effects: owned(s.potion.effect_names(catalog)),
                revealed: s.revealed.iter().map(|&f| name_fact(f)).collect(),
            })
            .collect();

        Self {
            seed,
            potions,
            leftover: schedule.leftover.iter().map(|&f| name_fact(f)).collect(),
            stats: CoverStats::calculate(schedule),
        }
    }
}

fn owned(names: Vec<&str>) -> Vec<String> {
    names.into_iter().map(str::to_string).collect()
}

/// Writes the schedule as CSV, one potion per row.
pub fn write_csv<W: Write>(writer: W, schedule: &CoverSchedule, catalog: &Catalog) -> Result<()> {
    let ingredient_cols = schedule
        .potions()
        .map(|p| p.ingredients.len())
        .max()
        .unwrap_or(0)
        .max(2);
    let effect_cols = schedule
        .potions()
        .map(|p| p.effects().len())
        .max()
        .unwrap_or(0)
        .max(1);

    let mut wtr = csv::Writer::from_writer(writer);
    let header: Vec<String> = (1..=ingredient_cols)
        .map(|i| format!("Ingredient{i}"))
        .chain((1..=effect_cols).map(|i| format!("Effect{i}")))
        .collect();
    wtr.write_record(&header)?;

    for potion in schedule.potions() {
        let mut row = potion.ingredient_names(catalog);
        row.resize(ingredient_cols, "");
        let mut effects = potion.effect_names(catalog);
        effects.resize(effect_cols, "");
        row.extend(effects);
        wtr.write_record(&row)?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes a report as pretty JSON.
pub fn write_json<W: Write>(writer: W, report: &ScheduleReport) -> Result<()> {
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

/// Writes a schedule to a file in the given format.
pub fn write_schedule(
    path: impl AsRef<Path>,
    format: OutputFormat,
    schedule: &CoverSchedule,
    catalog: &Catalog,
    seed: Option<u64>,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut out = BufWriter::new(file);
    match format {
        OutputFormat::Csv => write_csv(&mut out, schedule, catalog)?,
        OutputFormat::Json => write_json(&mut out, &ScheduleReport::new(schedule, catalog, seed))?,
    }
    out.flush().map_err(|e| Error::io(path, e))?;

    tracing::info!(
        path = %path.display(),
        potions = schedule.potion_count(),
        ?format,
        "wrote schedule"
    );
    Ok(())
}
