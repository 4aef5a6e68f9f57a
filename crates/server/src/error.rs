//! Errors raised while computing recommendations.

use data_loader::DataLoadError;
use thiserror::Error;

/// Any failure inside a recommendation run.
///
/// The inner error is flattened into the message so callers see the
/// original cause without needing its type.
#[derive(Error, Debug)]
pub enum RecommendationError {
    #[error("Error during recommendation process: {0}")]
    Failed(String),
}

impl RecommendationError {
    pub fn wrap(err: impl std::fmt::Display) -> Self {
        Self::Failed(err.to_string())
    }
}

impl From<anyhow::Error> for RecommendationError {
    fn from(err: anyhow::Error) -> Self {
        // {:#} keeps the whole context chain
        Self::Failed(format!("{:#}", err))
    }
}

impl From<DataLoadError> for RecommendationError {
    fn from(err: DataLoadError) -> Self {
        Self::wrap(err)
    }
}
