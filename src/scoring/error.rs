use thiserror::Error;

use crate::provider::ProviderError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("provider call failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("invalid similarity {value}: must be a finite number")]
    InvalidSimilarity { value: f32 },
}

impl ScoringError {
    /// Returns the underlying provider error, if any.
    pub fn provider(&self) -> Option<&ProviderError> {
        match self {
            ScoringError::Provider(e) => Some(e),
            ScoringError::InvalidSimilarity { .. } => None,
        }
    }
}
