//! Remote scoring provider seam.
//!
//! [`ScoringProvider`] covers the two calls the pipeline makes: text embeddings
//! and a free-text fit analysis. [`OpenAiProvider`] talks to an
//! OpenAI-compatible API; a deterministic mock is available behind
//! `#[cfg(any(test, feature = "mock"))]`.

mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod openai;
mod prompt;
mod types;
mod usage;

#[cfg(test)]
mod tests;

pub use error::ProviderError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockScoringProvider, vector_with_similarity};
pub use openai::OpenAiProvider;
pub use prompt::build_analysis_prompt;
pub use types::{Analysis, AnalysisRequest, Embedding, TokenUsage};
pub use usage::{ModelUsage, UsageLedger, UsageReport, model_cost};

use async_trait::async_trait;

#[async_trait]
/// Embedding and analysis calls used by the ranking run.
pub trait ScoringProvider: Send + Sync {
    /// Model name recorded against embedding usage.
    fn embedding_model(&self) -> &str;

    /// Embeds a single text.
    async fn embed(&self, text: &str) -> Result<Embedding, ProviderError>;

    /// Requests a fit analysis for one candidate.
    async fn score_with_context(&self, request: &AnalysisRequest)
    -> Result<Analysis, ProviderError>;
}
