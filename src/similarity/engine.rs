use std::sync::Arc;

use moka::sync::Cache;
use tracing::{debug, info};

use super::vector::{SimilarityVector, best_similarity};
use crate::hashing::{hash_text, hash_text_list};
use crate::provider::{ProviderError, ScoringProvider, UsageLedger};

/// Embeds texts through the provider and scores them against the ideal profiles.
///
/// Candidate embeddings are cached by text hash, so a resumed batch does not
/// pay for the same summary twice. Ideal vectors are recomputed only when the
/// ideal texts change.
pub struct SimilarityEngine {
    provider: Arc<dyn ScoringProvider>,
    ledger: Arc<UsageLedger>,
    cache: Cache<[u8; 32], Arc<Vec<f32>>>,
    ideals: Vec<SimilarityVector>,
    ideals_hash: Option<[u8; 32]>,
}

impl std::fmt::Debug for SimilarityEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityEngine")
            .field("ideals", &self.ideals.len())
            .field("cached", &self.cache.entry_count())
            .finish()
    }
}

impl SimilarityEngine {
    pub fn new(
        provider: Arc<dyn ScoringProvider>,
        ledger: Arc<UsageLedger>,
        cache_capacity: u64,
    ) -> Self {
        Self {
            provider,
            ledger,
            cache: Cache::builder().max_capacity(cache_capacity).build(),
            ideals: Vec::new(),
            ideals_hash: None,
        }
    }

    pub fn provider(&self) -> &Arc<dyn ScoringProvider> {
        &self.provider
    }

    pub fn ledger(&self) -> &Arc<UsageLedger> {
        &self.ledger
    }

    pub fn ideals(&self) -> &[SimilarityVector] {
        &self.ideals
    }

    /// Embeds `text`, using the cache when possible.
    pub async fn embed(&self, text: &str) -> Result<Arc<Vec<f32>>, ProviderError> {
        let key = hash_text(text);
        if let Some(values) = self.cache.get(&key) {
            debug!(text_len = text.len(), "Embedding cache hit");
            return Ok(values);
        }

        let embedding = self.provider.embed(text).await?;
        self.ledger
            .record(self.provider.embedding_model(), embedding.usage);

        let values = Arc::new(embedding.values);
        self.cache.insert(key, Arc::clone(&values));
        Ok(values)
    }

    /// Embeds the ideal profiles unless `texts` match the current set.
    ///
    /// Returns `true` if the vectors were recomputed. On failure the previous
    /// set is discarded.
    pub async fn prepare_ideals(&mut self, texts: &[String]) -> Result<bool, ProviderError> {
        let hash = hash_text_list(texts);
        if self.ideals_hash == Some(hash) {
            debug!(ideals = self.ideals.len(), "Ideal profile vectors unchanged");
            return Ok(false);
        }

        self.ideals.clear();
        self.ideals_hash = None;

        let mut ideals = Vec::with_capacity(texts.len());
        for text in texts {
            let embedding = self.provider.embed(text).await?;
            self.ledger
                .record(self.provider.embedding_model(), embedding.usage);
            ideals.push(SimilarityVector::new(text, embedding.values));
        }

        info!(ideals = ideals.len(), "Ideal profile vectors computed");
        self.ideals = ideals;
        self.ideals_hash = Some(hash);
        Ok(true)
    }

    /// Best similarity of `candidate` against the prepared ideals.
    pub fn score(&self, candidate: &[f32]) -> f32 {
        best_similarity(candidate, &self.ideals)
    }

    /// Embeds `text` and scores it in one step.
    pub async fn similarity(&self, text: &str) -> Result<f32, ProviderError> {
        let values = self.embed(text).await?;
        Ok(self.score(&values))
    }

    pub fn cached_embeddings(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}
