use thiserror::Error;

use super::config::ConfigError;
use crate::core::models::metric::SimilarityMetric;
use crate::core::models::model::ModelType;
use crate::core::superposition::SuperpositionError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Superposition failed: {source}")]
    Superposition {
        #[from]
        source: SuperpositionError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("The {metric} metric does not support the {model} model")]
    UnsupportedModel {
        metric: SimilarityMetric,
        model: ModelType,
    },

    #[error(
        "Structure of length {length} does not conform to the {model} model ({atoms_per_unit} points per unit)"
    )]
    IncompatibleLength {
        model: ModelType,
        length: usize,
        atoms_per_unit: usize,
    },

    #[error("A similarity threshold must be declared for the {metric} metric")]
    MissingThreshold { metric: SimilarityMetric },

    #[error("Structure {index} has {found} points, expected {expected}")]
    LengthMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("At least {required} structure(s) required, got {found}")]
    TooFewStructures { required: usize, found: usize },

    #[error("Invalid k-mer request: {0}")]
    InvalidKmer(String),

    #[error("Internal logic error: {0}")]
    Internal(String),
}
