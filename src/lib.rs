//! Scorely library crate (used by the CLI binary and integration tests).
//!
//! # Pipeline
//!
//! 1. [`candidate`]: ingest source rows through a [`ColumnMapping`].
//! 2. [`filter`]: reject duplicates, past candidates, blacklisted people, no-go
//!    companies and red flags; tag hot signals and hidden gems.
//! 3. [`similarity`]: embed survivors and score them against ideal profiles.
//! 4. [`scoring`]: route by similarity (direct, hybrid LLM analysis, or skip)
//!    and classify into categories.
//! 5. [`ranking`]: run the pipeline over a row range with pause, resume and
//!    stop, keeping a ranked result set.
//!
//! ## Provider
//! [`ScoringProvider`] is the seam for embeddings and analyses.
//! [`OpenAiProvider`] talks to the hosted API; a deterministic mock is available
//! behind `#[cfg(any(test, feature = "mock"))]`.

pub mod candidate;
pub mod config;
pub mod constants;
pub mod filter;
pub mod hashing;
pub mod provider;
pub mod ranking;
pub mod scoring;
pub mod similarity;

pub use candidate::{
    CandidateId, CandidateRecord, CandidateStore, CandidateTag, ColumnMapping, RawColumns,
};
pub use config::{Config, ConfigError, PipelineConfig};
pub use filter::{FilterOutcome, FilterRule, HotSignal, RejectionFilter, RejectionRecord, RuleSet};
pub use hashing::{hash_identity, hash_text};
#[cfg(any(test, feature = "mock"))]
pub use provider::MockScoringProvider;
pub use provider::{OpenAiProvider, ProviderError, ScoringProvider, UsageLedger, UsageReport};
pub use ranking::{
    ControlHandle, Progress, RankedSet, RankingOrchestrator, ResultsHandle, RowRange, RunError,
    RunOutcome, RunStatus, RunSummary,
};
pub use scoring::{Category, ScoreResult, ScoringError, ScoringPolicy, ScoringRouter, Thresholds};
pub use similarity::{SimilarityEngine, cosine_similarity};
