//! Input validation for cover problems.
//!
//! Checks structural integrity of the ingredient table before any
//! potion is brewed. Detects:
//! - Duplicate ingredient names
//! - Empty ingredient names
//! - Ingredients without effects
//! - Ingredients with more effects than the configured cap
//! - An effect listed twice for one ingredient
//!
//! Also checks the engine's input contract: every fact a potion reveals
//! must belong to the universe.

use std::collections::{BTreeSet, HashSet};

use thiserror::Error;

use crate::error::Error;
use crate::models::{Fact, IngredientRecord, Potion};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two rows share the same ingredient name.
    DuplicateIngredient,
    /// A row has a blank ingredient name.
    EmptyName,
    /// An ingredient has no effects.
    NoEffects,
    /// An ingredient exceeds the per-ingredient effect cap.
    TooManyEffects,
    /// An ingredient lists the same effect twice.
    DuplicateEffect,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates raw ingredient rows.
///
/// Checks:
/// 1. No blank ingredient names
/// 2. No duplicate ingredient names
/// 3. Every ingredient has at least one effect
/// 4. No ingredient has more than `max_effects` effects
/// 5. No effect is listed twice for the same ingredient
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_records(records: &[IngredientRecord], max_effects: usize) -> ValidationResult {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for (row, record) in records.iter().enumerate() {
        let name = record.name.trim();

        if name.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                format!("Row {} has an empty ingredient name", row + 1),
            ));
            continue;
        }

        if !names.insert(name) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateIngredient,
                format!("Duplicate ingredient: {name}"),
            ));
        }

        if record.effects.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoEffects,
                format!("Ingredient '{name}' has no effects"),
            ));
        }

        if record.effects.len() > max_effects {
            errors.push(ValidationError::new(
                ValidationErrorKind::TooManyEffects,
                format!(
                    "Ingredient '{name}' has {} effects (max {max_effects})",
                    record.effects.len()
                ),
            ));
        }

        let mut seen = HashSet::new();
        for effect in &record.effects {
            if !seen.insert(effect.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateEffect,
                    format!("Ingredient '{name}' lists effect '{effect}' twice"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks that every potion only reveals facts from the universe.
///
/// # Errors
/// [`Error::FactOutsideUniverse`] naming the first offending potion
/// (by index) and fact.
pub fn validate_coverage(universe: &BTreeSet<Fact>, potions: &[Potion]) -> Result<(), Error> {
    for (candidate, potion) in potions.iter().enumerate() {
        if let Some(&fact) = potion.coverage.iter().find(|f| !universe.contains(f)) {
            return Err(Error::FactOutsideUniverse { candidate, fact });
        }
    }
    Ok(())
}
