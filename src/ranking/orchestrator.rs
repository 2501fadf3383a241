use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::control::{ControlHandle, ControlSignal};
use super::error::RunError;
use super::progress::Progress;
use super::results::ResultsHandle;
use super::run::{RankingRun, RowRange, RunStatus};
use crate::candidate::{CandidateId, CandidateRecord, CandidateStore, CandidateTag};
use crate::config::{Config, ConfigError, PipelineConfig};
use crate::filter::FilterOutcome;
use crate::provider::{ScoringProvider, UsageLedger, UsageReport};
use crate::scoring::{
    Category, RouteInput, RouteOutcome, ScoreResult, ScoredCandidate, ScoringPolicy, ScoringRouter,
};
use crate::similarity::SimilarityEngine;

/// Recruiter inputs that stay fixed for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSettings {
    pub job_description: String,
    pub ideal_texts: Vec<String>,
    /// Columns joined into the profile summary, in this order.
    pub selected_columns: Vec<String>,
}

impl RunSettings {
    pub fn from_pipeline(pipeline: &PipelineConfig) -> Self {
        Self {
            job_description: pipeline.job_description.clone(),
            ideal_texts: pipeline.ideal_profile_texts(),
            selected_columns: pipeline.selected_columns.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    Completed,
    /// The run finished but nobody made it into the result set.
    NoCandidatesRanked,
    Stopped,
}

/// Counts for one call to [`RankingOrchestrator::run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub range: RowRange,
    pub next_range: RowRange,
    pub total: usize,
    pub processed: usize,
    pub ranked: usize,
    /// No data in any selected column.
    pub skipped_invalid: usize,
    /// Similarity below borderline.
    pub skipped_low_similarity: usize,
    /// Scored under the borderline score or outside every category band.
    pub below_threshold: usize,
    pub errors: usize,
    pub batches: usize,
    pub elapsed_ms: u64,
    pub outcome: RunOutcome,
    pub usage: UsageReport,
}

impl RunSummary {
    fn new(range: RowRange, total: usize) -> Self {
        Self {
            range,
            next_range: range.next_range(),
            total,
            processed: 0,
            ranked: 0,
            skipped_invalid: 0,
            skipped_low_similarity: 0,
            below_threshold: 0,
            errors: 0,
            batches: 1,
            elapsed_ms: 0,
            outcome: RunOutcome::Completed,
            usage: UsageReport::default(),
        }
    }
}

/// Drives candidates through similarity, routing and classification, one at a
/// time, into the shared result set.
pub struct RankingOrchestrator {
    engine: SimilarityEngine,
    router: ScoringRouter,
    settings: RunSettings,
    run: RankingRun,
    results: ResultsHandle,
    processed: HashSet<CandidateId>,
    control_tx: Arc<watch::Sender<ControlSignal>>,
    control_rx: watch::Receiver<ControlSignal>,
    progress_tx: watch::Sender<Progress>,
}

impl RankingOrchestrator {
    pub fn new(engine: SimilarityEngine, router: ScoringRouter, settings: RunSettings) -> Self {
        let (control_tx, control_rx) = watch::channel(ControlSignal::Run);
        let (progress_tx, _) = watch::channel(Progress::default());
        Self {
            engine,
            router,
            settings,
            run: RankingRun::new(),
            results: ResultsHandle::new(),
            processed: HashSet::new(),
            control_tx: Arc::new(control_tx),
            control_rx,
            progress_tx,
        }
    }

    /// Wires a provider, runtime config and recruiter settings together.
    pub fn from_config(
        provider: Arc<dyn ScoringProvider>,
        config: &Config,
        pipeline: &PipelineConfig,
    ) -> Result<Self, ConfigError> {
        pipeline.thresholds.validate()?;

        let ledger = Arc::new(UsageLedger::new());
        let engine = SimilarityEngine::new(provider, ledger, config.embedding_cache_capacity);
        let policy = ScoringPolicy::new(pipeline.thresholds, pipeline.economy_mode)
            .with_models(config.full_model.clone(), config.economy_model.clone());

        Ok(Self::new(
            engine,
            ScoringRouter::new(policy),
            RunSettings::from_pipeline(pipeline),
        ))
    }

    pub fn control(&self) -> ControlHandle {
        ControlHandle::new(Arc::clone(&self.control_tx), self.progress_tx.subscribe())
    }

    pub fn results(&self) -> ResultsHandle {
        self.results.clone()
    }

    pub fn run_state(&self) -> &RankingRun {
        &self.run
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    pub fn usage(&self) -> UsageReport {
        self.engine.ledger().report()
    }

    /// Candidates handled by earlier runs (errors excluded, so they are retried).
    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    /// Ranks the survivors inside `range`, skipping anyone already handled.
    pub async fn run(
        &mut self,
        store: &CandidateStore,
        filtered: &FilterOutcome,
        range: RowRange,
    ) -> Result<RunSummary, RunError> {
        range.validate()?;

        let window = range.to_slice(filtered.survivors.len());
        if window.is_empty() {
            return Err(RunError::EmptyRange {
                start: range.start,
                end: range.end,
                available: filtered.survivors.len(),
            });
        }

        let batch: Vec<CandidateId> = filtered.survivors[window]
            .iter()
            .copied()
            .filter(|id| !self.processed.contains(id) && !self.results.contains(*id))
            .collect();
        if batch.is_empty() {
            return Err(RunError::AlreadyProcessed {
                start: range.start,
                end: range.end,
            });
        }

        self.run.start(batch.len())?;
        self.control_tx.send_replace(ControlSignal::Run);
        self.control_rx.mark_unchanged();

        let mut summary = RunSummary::new(range, batch.len());
        info!(range = %range, candidates = batch.len(), "Ranking run started");
        self.publish(&summary);

        if let Err(e) = self.engine.prepare_ideals(&self.settings.ideal_texts).await {
            warn!(
                error = %e,
                account_problem = e.is_account_problem(),
                "Ideal profile embedding failed, aborting run"
            );
            self.run.stop()?;
            self.publish(&summary);
            return Err(RunError::IdealEmbedding(e));
        }

        for id in batch {
            if self.wait_for_go().await == ControlSignal::Stop {
                self.run.stop()?;
                summary.outcome = RunOutcome::Stopped;
                info!(processed = summary.processed, "Ranking run stopped");
                break;
            }

            let Some(record) = store.get(id) else {
                warn!(candidate = %id, "Survivor missing from store");
                summary.skipped_invalid += 1;
                self.finish_candidate(id, &mut summary, true);
                continue;
            };

            if !record.has_profile_data(&self.settings.selected_columns) {
                debug!(candidate = %id, "No data in selected columns, skipped");
                summary.skipped_invalid += 1;
                self.finish_candidate(id, &mut summary, true);
                continue;
            }

            let done = match self.rank_one(record, filtered).await {
                Ok(result) => {
                    summary.ranked += 1;
                    self.results.insert(result);
                    true
                }
                Err(step) => {
                    step.count(&mut summary);
                    step.is_final()
                }
            };
            self.finish_candidate(id, &mut summary, done);
        }

        if self.run.status() == RunStatus::Running {
            self.run.complete()?;
            if summary.ranked == 0 {
                summary.outcome = RunOutcome::NoCandidatesRanked;
            }
        }

        summary.elapsed_ms = u64::try_from(self.run.elapsed().as_millis()).unwrap_or(u64::MAX);
        summary.usage = self.usage();
        self.publish(&summary);

        info!(
            outcome = ?summary.outcome,
            ranked = summary.ranked,
            skipped_invalid = summary.skipped_invalid,
            skipped_low_similarity = summary.skipped_low_similarity,
            below_threshold = summary.below_threshold,
            errors = summary.errors,
            cost_usd = summary.usage.total_cost_usd,
            "Ranking run finished"
        );

        Ok(summary)
    }

    /// Embeds, routes and classifies one candidate. Every non-result is a
    /// `StepOutcome` the caller counts.
    async fn rank_one(
        &self,
        record: &CandidateRecord,
        filtered: &FilterOutcome,
    ) -> Result<ScoreResult, StepOutcome> {
        let summary_text = record.profile_summary(&self.settings.selected_columns);

        let similarity = self.engine.similarity(&summary_text).await.map_err(|e| {
            warn!(
                candidate = %record.id,
                error = %e,
                account_problem = e.is_account_problem(),
                "Embedding failed"
            );
            StepOutcome::Error
        })?;

        let hot_signal = filtered.hot_signal(record.id);
        let input = RouteInput {
            summary: &summary_text,
            similarity,
            hot_signal,
            job_description: &self.settings.job_description,
            ideal_texts: &self.settings.ideal_texts,
        };

        let outcome = self
            .router
            .route(self.engine.provider().as_ref(), self.engine.ledger(), input)
            .await
            .map_err(|e| {
                warn!(
                    candidate = %record.id,
                    similarity,
                    error = %e,
                    account_problem = e.provider().is_some_and(|p| p.is_account_problem()),
                    "Scoring failed"
                );
                StepOutcome::Error
            })?;

        match outcome {
            RouteOutcome::Scored(scored) => {
                let Some(category) = scored.classification.category else {
                    return Err(StepOutcome::BelowThreshold);
                };
                debug!(
                    candidate = %record.id,
                    similarity,
                    score = scored.score,
                    "Candidate ranked"
                );
                let tags = filtered.tags_for(record.id).cloned().unwrap_or_default();
                Ok(build_result(
                    record,
                    summary_text,
                    hot_signal.is_hot(),
                    tags,
                    category,
                    scored,
                ))
            }
            RouteOutcome::Skipped { .. } => Err(StepOutcome::LowSimilarity),
            RouteOutcome::BelowThreshold { .. } => Err(StepOutcome::BelowThreshold),
        }
    }

    /// Blocks while paused. Returns the signal that ended the wait.
    async fn wait_for_go(&mut self) -> ControlSignal {
        loop {
            let signal = *self.control_rx.borrow_and_update();
            match signal {
                ControlSignal::Run => {
                    if self.run.status() == RunStatus::Paused {
                        let _ = self.run.resume();
                        info!("Ranking run resumed");
                        self.publish_current();
                    }
                    return ControlSignal::Run;
                }
                ControlSignal::Stop => return ControlSignal::Stop,
                ControlSignal::Pause => {
                    if self.run.status() == RunStatus::Running {
                        let _ = self.run.pause();
                        info!(processed = self.run.current(), "Ranking run paused");
                        self.publish_current();
                    }
                    if self.control_rx.changed().await.is_err() {
                        return ControlSignal::Stop;
                    }
                }
            }
        }
    }

    fn finish_candidate(&mut self, id: CandidateId, summary: &mut RunSummary, done: bool) {
        if done {
            self.processed.insert(id);
        }
        summary.processed = self.run.advance();
        self.publish(summary);
        summary.batches = self.progress_tx.borrow().batches();
    }

    fn publish(&self, summary: &RunSummary) {
        self.progress_tx.send_replace(Progress {
            status: self.run.status(),
            processed: self.run.current(),
            total: self.run.total(),
            ranked: summary.ranked,
            errors: summary.errors,
            elapsed: self.run.elapsed(),
        });
    }

    fn publish_current(&self) {
        self.progress_tx.send_modify(|p| {
            p.status = self.run.status();
            p.elapsed = self.run.elapsed();
        });
    }
}

/// Why a candidate produced no result.
enum StepOutcome {
    LowSimilarity,
    BelowThreshold,
    Error,
}

impl StepOutcome {
    fn count(&self, summary: &mut RunSummary) {
        match self {
            StepOutcome::LowSimilarity => summary.skipped_low_similarity += 1,
            StepOutcome::BelowThreshold => summary.below_threshold += 1,
            StepOutcome::Error => summary.errors += 1,
        }
    }

    /// Errors are left unmarked so a later run retries them.
    fn is_final(&self) -> bool {
        !matches!(self, StepOutcome::Error)
    }
}

fn build_result(
    record: &CandidateRecord,
    summary: String,
    hot_signal: bool,
    tags: BTreeSet<CandidateTag>,
    category: Category,
    scored: ScoredCandidate,
) -> ScoreResult {
    ScoreResult {
        candidate: record.id,
        name: record.full_name.clone(),
        company: record.company.clone(),
        title: record.title.clone(),
        profile_url: record.profile_url.clone(),
        summary,
        score: scored.score,
        similarity: scored.similarity,
        category,
        hot_signal,
        confirmed_hot: scored.classification.confirmed_hot,
        tags,
        rank: 0,
        scoring_path: scored.path,
        model: scored.model,
        ai_score: scored.ai_score,
        analysis: scored.analysis,
        concerns: scored.concerns,
        explanation: scored.explanation,
        recategorize_history: Vec::new(),
        feedback: Vec::new(),
    }
}
