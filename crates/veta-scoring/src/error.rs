use thiserror::Error;
use veta_core::VetaError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error(transparent)]
    Core(#[from] VetaError),

    #[error("failed to read scoring plan {path}: {source}")]
    PlanFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scoring plan: {0}")]
    PlanParse(#[from] serde_yaml::Error),

    #[error("invalid scoring plan: {0}")]
    PlanValidation(String),

    #[error("duplicate protocol id: {0}")]
    DuplicateProtocolId(String),
}

/// Failures of a sentiment classifier. The sentiment protocols log these and
/// record an all-zero tuple instead of propagating them.
#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("classifier error: {0}")]
    Classifier(String),

    #[error("invalid weight {weight} for word '{word}'")]
    InvalidWeight { word: String, weight: f64 },
}
