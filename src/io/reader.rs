//! Ingredient table loader.
//!
//! Expects a header row with an `Ingredient` column and one or more
//! numbered `EffectN` columns (`Effect1`..`Effect4` in the usual data
//! set). Other columns are ignored.
//! Blank effect cells are skipped; surrounding whitespace is trimmed.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{AlchemyTable, IngredientRecord};

/// Header of the ingredient name column.
pub const INGREDIENT_COLUMN: &str = "Ingredient";
/// Prefix of effect column headers; the rest of the header is the
/// column number.
pub const EFFECT_COLUMN_PREFIX: &str = "Effect";

/// Reads raw ingredient records from CSV.
///
/// # Errors
/// [`Error::MissingColumn`] when there is no `Ingredient` column,
/// [`Error::Csv`] for malformed CSV.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<IngredientRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let name_col = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(INGREDIENT_COLUMN))
        .ok_or_else(|| Error::MissingColumn {
            column: INGREDIENT_COLUMN.to_string(),
        })?;
    let effect_cols: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| is_effect_column(h))
        .map(|(i, _)| i)
        .collect();
    if effect_cols.is_empty() {
        return Err(Error::MissingColumn {
            column: format!("{EFFECT_COLUMN_PREFIX}1"),
        });
    }

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let name = row.get(name_col).unwrap_or_default();
        let effects: Vec<String> = effect_cols
            .iter()
            .filter_map(|&i| row.get(i))
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .collect();
        records.push(IngredientRecord::new(name, effects));
    }
    Ok(records)
}

fn is_effect_column(header: &str) -> bool {
    let n = EFFECT_COLUMN_PREFIX.len();
    match (header.get(..n), header.get(n..)) {
        (Some(prefix), Some(number)) => {
            prefix.eq_ignore_ascii_case(EFFECT_COLUMN_PREFIX)
                && !number.is_empty()
                && number.bytes().all(|b| b.is_ascii_digit())
        }
        _ => false,
    }
}

/// Reads raw ingredient records from a file.
pub fn read_records_from_path(path: impl AsRef<Path>) -> Result<Vec<IngredientRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    read_records(file)
}

/// Loads and validates an ingredient table from a file.
pub fn load_table(path: impl AsRef<Path>, max_effects: usize) -> Result<AlchemyTable> {
    let path = path.as_ref();
    let records = read_records_from_path(path)?;
    tracing::info!(path = %path.display(), ingredients = records.len(), "read ingredient table");
    AlchemyTable::from_records(&records, max_effects)
}
