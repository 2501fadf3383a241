use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use super::ScoringProvider;
use super::error::ProviderError;
use super::types::{Analysis, AnalysisRequest, Embedding, TokenUsage};

/// Deterministic in-memory provider for tests.
///
/// Embeddings are looked up by exact text, falling back to a default vector.
/// Pair [`MockScoringProvider::IDEAL`] as the ideal-profile vector with
/// [`vector_with_similarity`] to pin a candidate's similarity.
pub struct MockScoringProvider {
    embeddings: RwLock<HashMap<String, Vec<f32>>>,
    default_embedding: RwLock<Vec<f32>>,
    analysis: RwLock<String>,
    analyses: RwLock<HashMap<String, String>>,
    failing_embeds: RwLock<HashSet<String>>,
    fail_analysis: AtomicBool,
    usage: Option<TokenUsage>,
    embed_calls: AtomicUsize,
    analysis_calls: AtomicUsize,
    models: Mutex<Vec<String>>,
}

impl Default for MockScoringProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockScoringProvider {
    /// Unit vector used as the ideal profile in similarity-pinned tests.
    pub const IDEAL: [f32; 2] = [1.0, 0.0];

    pub const MODEL: &'static str = "mock-embedding";

    pub fn new() -> Self {
        Self {
            embeddings: RwLock::new(HashMap::new()),
            default_embedding: RwLock::new(Self::IDEAL.to_vec()),
            analysis: RwLock::new("Summary: solid fit.\nScore: 80".to_string()),
            analyses: RwLock::new(HashMap::new()),
            failing_embeds: RwLock::new(HashSet::new()),
            fail_analysis: AtomicBool::new(false),
            usage: Some(TokenUsage::new(100, 50)),
            embed_calls: AtomicUsize::new(0),
            analysis_calls: AtomicUsize::new(0),
            models: Mutex::new(Vec::new()),
        }
    }

    pub fn with_embedding(self, text: &str, values: Vec<f32>) -> Self {
        self.embeddings.write().insert(text.to_string(), values);
        self
    }

    /// Embeds `text` so that it scores `similarity` against [`Self::IDEAL`].
    pub fn with_similarity(self, text: &str, similarity: f32) -> Self {
        self.with_embedding(text, vector_with_similarity(similarity))
    }

    pub fn with_default_embedding(self, values: Vec<f32>) -> Self {
        *self.default_embedding.write() = values;
        self
    }

    /// Analysis returned for every summary without a specific override.
    pub fn with_analysis(self, text: &str) -> Self {
        *self.analysis.write() = text.to_string();
        self
    }

    pub fn with_analysis_for(self, summary: &str, text: &str) -> Self {
        self.analyses
            .write()
            .insert(summary.to_string(), text.to_string());
        self
    }

    pub fn failing_embed_for(self, text: &str) -> Self {
        self.failing_embeds.write().insert(text.to_string());
        self
    }

    pub fn failing_analysis(self) -> Self {
        self.fail_analysis.store(true, Ordering::SeqCst);
        self
    }

    pub fn without_usage(mut self) -> Self {
        self.usage = None;
        self
    }

    pub fn set_fail_analysis(&self, fail: bool) {
        self.fail_analysis.store(fail, Ordering::SeqCst);
    }

    pub fn embed_calls(&self) -> usize {
        self.embed_calls.load(Ordering::SeqCst)
    }

    pub fn analysis_calls(&self) -> usize {
        self.analysis_calls.load(Ordering::SeqCst)
    }

    /// Models requested on the hybrid path, in call order.
    pub fn models_used(&self) -> Vec<String> {
        self.models.lock().clone()
    }
}

#[async_trait]
impl ScoringProvider for MockScoringProvider {
    fn embedding_model(&self) -> &str {
        Self::MODEL
    }

    async fn embed(&self, text: &str) -> Result<Embedding, ProviderError> {
        self.embed_calls.fetch_add(1, Ordering::SeqCst);

        if self.failing_embeds.read().contains(text) {
            return Err(ProviderError::Status {
                status: 500,
                body: "mock embedding failure".to_string(),
            });
        }

        let values = self
            .embeddings
            .read()
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.default_embedding.read().clone());

        Ok(Embedding {
            values,
            usage: self.usage.map(|u| TokenUsage::new(u.prompt_tokens, 0)),
        })
    }

    async fn score_with_context(
        &self,
        request: &AnalysisRequest,
    ) -> Result<Analysis, ProviderError> {
        self.analysis_calls.fetch_add(1, Ordering::SeqCst);
        self.models.lock().push(request.model.clone());

        if self.fail_analysis.load(Ordering::SeqCst) {
            return Err(ProviderError::QuotaExceeded {
                message: "mock quota exhausted".to_string(),
            });
        }

        let text = self
            .analyses
            .read()
            .get(&request.summary)
            .cloned()
            .unwrap_or_else(|| self.analysis.read().clone());

        Ok(Analysis {
            text,
            model: request.model.clone(),
            usage: self.usage,
        })
    }
}

/// Unit vector whose cosine similarity to [`MockScoringProvider::IDEAL`] is `similarity`.
pub fn vector_with_similarity(similarity: f32) -> Vec<f32> {
    let s = similarity.clamp(-1.0, 1.0);
    vec![s, (1.0 - s * s).max(0.0).sqrt()]
}
