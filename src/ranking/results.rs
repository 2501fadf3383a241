use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use serde::Serialize;
use tracing::info;

use super::error::ResultError;
use crate::candidate::CandidateId;
use crate::constants::{GOOD_SCORE_FLOOR, MAX_SCORE};
use crate::scoring::{Category, FeedbackRecord, RecategorizeEntry, ScoreResult};

/// Ranked results, kept sorted by score (descending, input-order stable) with
/// 1-based ranks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankedSet {
    results: Vec<ScoreResult>,
}

impl RankedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &[ScoreResult] {
        &self.results
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoreResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn get(&self, id: CandidateId) -> Option<&ScoreResult> {
        self.results.iter().find(|r| r.candidate == id)
    }

    pub fn contains(&self, id: CandidateId) -> bool {
        self.get(id).is_some()
    }

    /// Adds a result (replacing any earlier one for the same candidate) and re-ranks.
    pub fn insert(&mut self, result: ScoreResult) {
        self.results.retain(|r| r.candidate != result.candidate);
        self.results.push(result);
        self.rerank();
    }

    /// Moves a result to `category`, recording why.
    pub fn recategorize(
        &mut self,
        id: CandidateId,
        category: Category,
        reason: &str,
    ) -> Result<&ScoreResult, ResultError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ResultError::MissingReason);
        }

        let result = self.get_mut(id)?;
        let entry = RecategorizeEntry {
            from: result.category,
            to: category,
            reason: reason.to_string(),
            at: Utc::now(),
        };
        info!(
            candidate = %id,
            from = %entry.from,
            to = %entry.to,
            "Candidate recategorized"
        );
        result.category = category;
        result.recategorize_history.push(entry);

        self.rerank();
        self.get(id).ok_or(ResultError::UnknownCandidate(id))
    }

    /// Replaces a score with the recruiter's, keeping the category as is.
    pub fn apply_feedback(
        &mut self,
        id: CandidateId,
        new_score: u16,
        explanation: &str,
    ) -> Result<FeedbackRecord, ResultError> {
        let explanation = explanation.trim();
        if explanation.is_empty() {
            return Err(ResultError::MissingExplanation);
        }
        if new_score > u16::from(MAX_SCORE) {
            return Err(ResultError::ScoreOutOfRange(new_score));
        }
        let new_score = new_score as u8;

        let result = self.get_mut(id)?;
        let record = FeedbackRecord {
            original_score: result.score,
            new_score,
            explanation: explanation.to_string(),
            at: Utc::now(),
        };
        info!(
            candidate = %id,
            original_score = record.original_score,
            new_score,
            "Score feedback applied"
        );
        result.score = new_score;
        result.feedback.push(record.clone());

        self.rerank();
        Ok(record)
    }

    pub fn remove(&mut self, id: CandidateId) -> Result<ScoreResult, ResultError> {
        let index = self
            .results
            .iter()
            .position(|r| r.candidate == id)
            .ok_or(ResultError::UnknownCandidate(id))?;
        let removed = self.results.remove(index);
        self.rerank();
        Ok(removed)
    }

    pub fn by_category(&self, category: Category) -> Vec<&ScoreResult> {
        self.results
            .iter()
            .filter(|r| r.category == category)
            .collect()
    }

    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for result in &self.results {
            *counts.entry(result.category).or_insert(0) += 1;
        }
        counts
    }

    /// Case-insensitive match over name, company, summary and analysis.
    /// A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<&ScoreResult> {
        let query = query.trim().to_lowercase();
        self.results
            .iter()
            .filter(|r| query.is_empty() || r.search_text().contains(&query))
            .collect()
    }

    /// Hot-signal candidates scoring 70 or more.
    pub fn hot_signals(&self) -> Vec<&ScoreResult> {
        self.results
            .iter()
            .filter(|r| r.hot_signal && r.score >= GOOD_SCORE_FLOOR)
            .collect()
    }

    fn get_mut(&mut self, id: CandidateId) -> Result<&mut ScoreResult, ResultError> {
        self.results
            .iter_mut()
            .find(|r| r.candidate == id)
            .ok_or(ResultError::UnknownCandidate(id))
    }

    fn rerank(&mut self) {
        // `sort_by` is stable: equal scores keep insertion order.
        self.results.sort_by(|a, b| b.score.cmp(&a.score));
        for (i, result) in self.results.iter_mut().enumerate() {
            result.rank = i + 1;
        }
    }
}

/// Shared result set. The orchestrator is the single writer; everyone else reads
/// snapshots.
#[derive(Debug, Clone, Default)]
pub struct ResultsHandle {
    inner: Arc<RwLock<RankedSet>>,
}

impl ResultsHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> RankedSet {
        self.inner.read().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn contains(&self, id: CandidateId) -> bool {
        self.inner.read().contains(id)
    }

    pub fn recategorize(
        &self,
        id: CandidateId,
        category: Category,
        reason: &str,
    ) -> Result<ScoreResult, ResultError> {
        self.inner
            .write()
            .recategorize(id, category, reason)
            .cloned()
    }

    pub fn apply_feedback(
        &self,
        id: CandidateId,
        new_score: u16,
        explanation: &str,
    ) -> Result<FeedbackRecord, ResultError> {
        self.inner.write().apply_feedback(id, new_score, explanation)
    }

    pub fn remove(&self, id: CandidateId) -> Result<ScoreResult, ResultError> {
        self.inner.write().remove(id)
    }

    pub(crate) fn insert(&self, result: ScoreResult) {
        self.inner.write().insert(result);
    }
}
