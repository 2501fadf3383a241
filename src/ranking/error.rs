use thiserror::Error;

use super::run::RunStatus;
use crate::candidate::CandidateId;
use crate::config::ConfigError;
use crate::provider::ProviderError;

/// Errors that stop a run from starting or continuing.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("cannot {action} a run that is {from}")]
    InvalidTransition {
        from: RunStatus,
        action: &'static str,
    },

    #[error("no candidates in rows {start}..={end} ({available} survivors available)")]
    EmptyRange {
        start: usize,
        end: usize,
        available: usize,
    },

    #[error("every candidate in rows {start}..={end} was already processed")]
    AlreadyProcessed { start: usize, end: usize },

    #[error("failed to embed ideal profiles: {0}")]
    IdealEmbedding(#[source] ProviderError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors from result-set mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResultError {
    #[error("no ranked result for {0}")]
    UnknownCandidate(CandidateId),

    #[error("a reason is required to change a category")]
    MissingReason,

    #[error("an explanation is required with score feedback")]
    MissingExplanation,

    #[error("score {0} is out of range (0-100)")]
    ScoreOutOfRange(u16),
}
