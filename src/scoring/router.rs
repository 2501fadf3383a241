use tracing::{debug, info};

use super::category::{Classification, classify};
use super::error::ScoringError;
use super::extract::{AnalysisSections, extract_score};
use super::types::{ModelTier, ScoringPath, ScoringPolicy};
use crate::constants::{
    ECONOMY_SIMILARITY_CUTOFF, FALLBACK_SCORE_BONUS, MAX_SCORE, round_similarity,
    threshold_to_score,
};
use crate::filter::HotSignal;
use crate::provider::{AnalysisRequest, ScoringProvider, UsageLedger};

const SIMILARITY_EXPLANATION: &str = "Ranked by embedding similarity.";

/// Which path a similarity value takes. Pure; no I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePlan {
    Direct,
    Hybrid(ModelTier),
    Skip,
}

/// Per-candidate routing input.
#[derive(Debug, Clone, Copy)]
pub struct RouteInput<'a> {
    pub summary: &'a str,
    /// Raw best cosine. Thresholds compare this value; outcomes carry it
    /// rounded to 3 decimals.
    pub similarity: f32,
    pub hot_signal: HotSignal,
    pub job_description: &'a str,
    pub ideal_texts: &'a [String],
}

/// A candidate that made it through routing with a category.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub score: u8,
    pub similarity: f32,
    pub classification: Classification,
    pub path: ScoringPath,
    pub model: Option<String>,
    pub ai_score: Option<u8>,
    pub analysis: Option<String>,
    pub concerns: Vec<String>,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Scored(ScoredCandidate),
    /// Similarity below borderline; not scored at all.
    Skipped { similarity: f32 },
    /// Scored, but under the borderline score or below every category band.
    BelowThreshold { score: u8, similarity: f32 },
}

/// Chooses between the similarity-only path, the hybrid LLM path, or a skip.
#[derive(Debug, Clone, Default)]
pub struct ScoringRouter {
    policy: ScoringPolicy,
}

impl ScoringRouter {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn plan(&self, similarity: f32) -> RoutePlan {
        let thresholds = &self.policy.thresholds;
        if similarity >= thresholds.top {
            RoutePlan::Direct
        } else if similarity >= thresholds.borderline {
            RoutePlan::Hybrid(self.model_tier(similarity))
        } else {
            RoutePlan::Skip
        }
    }

    /// Economy mode sends weaker matches to the cheaper model.
    pub fn model_tier(&self, similarity: f32) -> ModelTier {
        if self.policy.economy_mode && similarity < ECONOMY_SIMILARITY_CUTOFF {
            ModelTier::Economy
        } else {
            ModelTier::Full
        }
    }

    /// Score used when the analysis has no extractable score.
    pub fn fallback_score(similarity: f32) -> u8 {
        threshold_to_score(similarity)
            .saturating_add(FALLBACK_SCORE_BONUS)
            .min(MAX_SCORE)
    }

    /// Routes one candidate, calling the provider only on the hybrid path.
    pub async fn route<P>(
        &self,
        provider: &P,
        ledger: &UsageLedger,
        input: RouteInput<'_>,
    ) -> Result<RouteOutcome, ScoringError>
    where
        P: ScoringProvider + ?Sized,
    {
        if !input.similarity.is_finite() {
            return Err(ScoringError::InvalidSimilarity {
                value: input.similarity,
            });
        }

        let scored = match self.plan(input.similarity) {
            RoutePlan::Skip => {
                debug!(similarity = input.similarity, "Below borderline, skipped");
                return Ok(RouteOutcome::Skipped {
                    similarity: round_similarity(input.similarity),
                });
            }
            RoutePlan::Direct => {
                let score = threshold_to_score(input.similarity);
                ScoredCandidate {
                    score,
                    similarity: round_similarity(input.similarity),
                    classification: classify(score, input.hot_signal, &self.policy.thresholds),
                    path: ScoringPath::Similarity,
                    model: None,
                    ai_score: None,
                    analysis: None,
                    concerns: Vec::new(),
                    explanation: SIMILARITY_EXPLANATION.to_string(),
                }
            }
            RoutePlan::Hybrid(tier) => self.score_hybrid(provider, ledger, input, tier).await?,
        };

        if scored.score < self.policy.thresholds.borderline_score()
            || scored.classification.category.is_none()
        {
            debug!(
                score = scored.score,
                similarity = scored.similarity,
                "Score below threshold, dropped"
            );
            return Ok(RouteOutcome::BelowThreshold {
                score: scored.score,
                similarity: scored.similarity,
            });
        }

        Ok(RouteOutcome::Scored(scored))
    }

    async fn score_hybrid<P>(
        &self,
        provider: &P,
        ledger: &UsageLedger,
        input: RouteInput<'_>,
        tier: ModelTier,
    ) -> Result<ScoredCandidate, ScoringError>
    where
        P: ScoringProvider + ?Sized,
    {
        let model = self.policy.model_for(tier).to_string();
        let request = AnalysisRequest {
            summary: input.summary.to_string(),
            job_description: input.job_description.to_string(),
            ideal_texts: input.ideal_texts.to_vec(),
            model: model.clone(),
        };

        let analysis = provider.score_with_context(&request).await?;
        ledger.record(&analysis.model, analysis.usage);

        let ai_score = extract_score(&analysis.text);
        let score = ai_score.unwrap_or_else(|| Self::fallback_score(input.similarity));
        let sections = AnalysisSections::parse(&analysis.text);

        info!(
            similarity = input.similarity,
            model = %model,
            ai_score = ?ai_score,
            score,
            "Hybrid analysis scored"
        );

        Ok(ScoredCandidate {
            score,
            similarity: round_similarity(input.similarity),
            classification: classify(score, input.hot_signal, &self.policy.thresholds),
            path: ScoringPath::Hybrid,
            model: Some(model),
            ai_score,
            analysis: Some(analysis.text),
            concerns: sections.concerns,
            explanation: sections.explanation,
        })
    }
}
