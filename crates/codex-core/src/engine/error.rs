use thiserror::Error;

use super::config::ConfigError;
use super::sequence::GenerationError;
use crate::core::io::database::DatabaseError;
use crate::core::io::export::ExportError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Database error: {source}")]
    Database {
        #[from]
        source: DatabaseError,
    },

    #[error("Export error: {source}")]
    Export {
        #[from]
        source: ExportError,
    },

    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Sequence generation failed: {source}")]
    Generation {
        #[from]
        source: GenerationError,
    },

    #[error("Compound not found in database: '{0}'")]
    CompoundNotFound(String),

    #[error("Invalid input for '{parameter}': {reason}")]
    InvalidInput {
        parameter: &'static str,
        reason: String,
    },

    #[error("Analysis phase '{phase}' failed: {reason}")]
    PhaseFailed { phase: &'static str, reason: String },
}

impl EngineError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            parameter,
            reason: reason.into(),
        }
    }
}

/// Accepts finite, strictly positive physical quantities.
pub(crate) fn require_positive(parameter: &'static str, value: f64) -> Result<f64, EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EngineError::invalid(
            parameter,
            format!("must be a positive number, got {value}"),
        ))
    }
}
