//! Score routing and classification.
//!
//! A candidate's best similarity picks its path:
//!
//! - `sim >= top`: scored from similarity alone, no provider call.
//! - `borderline <= sim < top`: the provider analyses the profile and the score
//!   is extracted from its text (falling back to `round(sim * 100) + 10`).
//! - `sim < borderline`: skipped, with no result and no rejection.
//!
//! [`classify`] then maps the score to a [`Category`], with the hot-signal
//! override taking precedence at 70 and above.

pub mod category;
pub mod error;
pub mod extract;
pub mod router;
pub mod types;

#[cfg(test)]
mod tests;

pub use category::{Classification, classify};
pub use error::ScoringError;
pub use extract::{AnalysisSections, extract_score};
pub use router::{RouteInput, RouteOutcome, RoutePlan, ScoredCandidate, ScoringRouter};
pub use types::{
    Category, FeedbackRecord, ModelTier, RecategorizeEntry, ScoreResult, ScoringPath,
    ScoringPolicy, Thresholds,
};
