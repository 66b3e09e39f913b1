//! Error types for alchemy-cover.
//!
//! Loading, configuration and output failures are ordinary errors.
//! A cover problem whose potions reveal facts outside the declared
//! universe is a caller bug and is reported as
//! [`Error::FactOutsideUniverse`]. Leftover facts are *not* errors; they
//! are part of [`CoverSchedule`](crate::models::CoverSchedule).

use std::path::PathBuf;

use thiserror::Error;

use crate::models::Fact;
use crate::validation::ValidationError;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by alchemy-cover.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input table is missing the '{column}' column")]
    MissingColumn { column: String },

    #[error("Invalid input ({} problem(s)): {}", .0.len(), summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    #[error("Potion #{candidate} reveals {fact}, which is not in the universe")]
    FactOutsideUniverse { candidate: usize, fact: Fact },

    #[error("Too many distinct {kind} names ({count}) for 32-bit ids")]
    TooManyNames { kind: &'static str, count: usize },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl Error {
    /// Wraps an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a configuration error.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EffectId, IngredientId};
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_invalid_input_message_lists_problems() {
        let err = Error::InvalidInput(vec![
            ValidationError::new(ValidationErrorKind::DuplicateIngredient, "Duplicate ingredient: Wheat"),
            ValidationError::new(ValidationErrorKind::EmptyName, "Row 3 has an empty ingredient name"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("2 problem(s)"));
        assert!(msg.contains("Duplicate ingredient: Wheat"));
        assert!(msg.contains("Row 3"));
    }

    #[test]
    fn test_fact_outside_universe_message() {
        let err = Error::FactOutsideUniverse {
            candidate: 4,
            fact: Fact::new(IngredientId(1), EffectId(2)),
        };
        assert_eq!(
            err.to_string(),
            "Potion #4 reveals (I1, E2), which is not in the universe"
        );
    }
}
