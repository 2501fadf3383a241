use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::candidate::{CandidateId, CandidateTag};
use crate::config::ConfigError;
use crate::constants::{
    DEFAULT_BORDERLINE_THRESHOLD, DEFAULT_ECONOMY_MODEL, DEFAULT_FULL_MODEL,
    DEFAULT_TOP_THRESHOLD, threshold_to_score,
};

/// Similarity cut-offs for routing. Invariant: `0 <= borderline <= top <= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub top: f32,
    pub borderline: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            top: DEFAULT_TOP_THRESHOLD,
            borderline: DEFAULT_BORDERLINE_THRESHOLD,
        }
    }
}

impl Thresholds {
    pub fn new(top: f32, borderline: f32) -> Result<Self, ConfigError> {
        let thresholds = Self { top, borderline };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("top", self.top), ("borderline", self.borderline)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }
        if self.borderline > self.top {
            return Err(ConfigError::ThresholdOrder {
                borderline: self.borderline,
                top: self.top,
            });
        }
        Ok(())
    }

    /// `round(top * 100)`.
    #[inline]
    pub fn top_score(&self) -> u8 {
        threshold_to_score(self.top)
    }

    /// `round(borderline * 100)`; results below this are dropped.
    #[inline]
    pub fn borderline_score(&self) -> u8 {
        threshold_to_score(self.borderline)
    }
}

/// Result bucket shown to the recruiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Top,
    Good,
    Hidden,
    Hot,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::Top, Category::Good, Category::Hidden, Category::Hot];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Top => "top",
            Category::Good => "good",
            Category::Hidden => "hidden",
            Category::Hot => "hot",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPath {
    /// Score derived from similarity alone; no provider analysis.
    Similarity,
    /// Similarity plus an LLM analysis.
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTier {
    Full,
    Economy,
}

/// Thresholds plus cost policy for the hybrid path.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringPolicy {
    pub thresholds: Thresholds,
    pub economy_mode: bool,
    pub full_model: String,
    pub economy_model: String,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::new(Thresholds::default(), false)
    }
}

impl ScoringPolicy {
    pub fn new(thresholds: Thresholds, economy_mode: bool) -> Self {
        Self {
            thresholds,
            economy_mode,
            full_model: DEFAULT_FULL_MODEL.to_string(),
            economy_model: DEFAULT_ECONOMY_MODEL.to_string(),
        }
    }

    pub fn with_models(mut self, full: impl Into<String>, economy: impl Into<String>) -> Self {
        self.full_model = full.into();
        self.economy_model = economy.into();
        self
    }

    pub fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Full => &self.full_model,
            ModelTier::Economy => &self.economy_model,
        }
    }
}

/// One manual category change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecategorizeEntry {
    pub from: Category,
    pub to: Category,
    pub reason: String,
    pub at: DateTime<Utc>,
}

/// One recruiter score correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub original_score: u8,
    pub new_score: u8,
    pub explanation: String,
    pub at: DateTime<Utc>,
}

/// A ranked candidate.
///
/// `rank` is only meaningful inside a result set; it is reassigned after every
/// mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub candidate: CandidateId,
    pub name: String,
    pub company: String,
    pub title: String,
    pub profile_url: String,
    /// Profile summary the score was computed from.
    pub summary: String,
    pub score: u8,
    /// Best similarity against the ideal profiles, 3 decimals.
    pub similarity: f32,
    pub category: Category,
    pub hot_signal: bool,
    /// Hot override fired on an exact hot-list match.
    pub confirmed_hot: bool,
    pub tags: BTreeSet<CandidateTag>,
    pub rank: usize,
    pub scoring_path: ScoringPath,
    pub model: Option<String>,
    /// Score extracted from the analysis, if any.
    pub ai_score: Option<u8>,
    pub analysis: Option<String>,
    pub concerns: Vec<String>,
    pub explanation: String,
    pub recategorize_history: Vec<RecategorizeEntry>,
    pub feedback: Vec<FeedbackRecord>,
}

impl ScoreResult {
    /// Lowercased text searched by result-set queries.
    pub fn search_text(&self) -> String {
        let mut text = format!("{} {} {}", self.name, self.company, self.summary);
        if let Some(ref analysis) = self.analysis {
            text.push(' ');
            text.push_str(analysis);
        }
        text.to_lowercase()
    }
}
