use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Serialize;
use tracing::{debug, info};

use super::matching::{find_match, matches_either_way_normalized};
use super::rules::{FilterRule, HotSignal, RedFlagVerdict, RuleSet};
use crate::candidate::{CandidateId, CandidateRecord, CandidateTag};

/// Why a candidate was removed. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectionRecord {
    pub candidate: CandidateId,
    /// Display identity at rejection time (name, company or row).
    pub identity: String,
    pub rule: FilterRule,
    pub reason: String,
}

/// Per-rule rejection counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    pub input: usize,
    pub survivors: usize,
    pub duplicates: usize,
    pub past_candidates: usize,
    pub blacklist: usize,
    pub no_go: usize,
    pub red_flags: usize,
    pub hidden_gems: usize,
    pub hot_signals: usize,
}

impl FilterStats {
    pub fn rejected(&self) -> usize {
        self.duplicates + self.past_candidates + self.blacklist + self.no_go + self.red_flags
    }

    fn count(&mut self, rule: FilterRule) {
        match rule {
            FilterRule::Deduplication => self.duplicates += 1,
            FilterRule::PastCandidate => self.past_candidates += 1,
            FilterRule::Blacklist => self.blacklist += 1,
            FilterRule::NoGo => self.no_go += 1,
            FilterRule::RedFlag => self.red_flags += 1,
        }
    }
}

/// Result of a filter pass. Candidates themselves are not mutated; tags are
/// returned here and applied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOutcome {
    pub survivors: Vec<CandidateId>,
    pub rejections: Vec<RejectionRecord>,
    pub tags: BTreeMap<CandidateId, BTreeSet<CandidateTag>>,
    pub hot_signals: BTreeMap<CandidateId, HotSignal>,
    pub stats: FilterStats,
}

impl FilterOutcome {
    /// Hot-signal strength for a candidate (`None` if it had no match).
    pub fn hot_signal(&self, id: CandidateId) -> HotSignal {
        self.hot_signals.get(&id).copied().unwrap_or_default()
    }

    pub fn rejection_for(&self, id: CandidateId) -> Option<&RejectionRecord> {
        self.rejections.iter().find(|r| r.candidate == id)
    }

    pub fn is_survivor(&self, id: CandidateId) -> bool {
        self.survivors.contains(&id)
    }

    pub fn tags_for(&self, id: CandidateId) -> Option<&BTreeSet<CandidateTag>> {
        self.tags.get(&id)
    }
}

/// Ordered rejection pipeline. The first matching rule wins.
#[derive(Debug, Clone)]
pub struct RejectionFilter {
    rules: RuleSet,
}

impl RejectionFilter {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Splits `candidates` into survivors and rejections.
    ///
    /// Pure over `(candidates, rules)`: running it twice yields the same outcome.
    pub fn filter(&self, candidates: &[CandidateRecord]) -> FilterOutcome {
        let mut outcome = FilterOutcome {
            stats: FilterStats {
                input: candidates.len(),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut seen = HashSet::new();

        for candidate in candidates {
            // Tagging never rejects, so it runs before any rule.
            let hot = HotSignal::detect(&candidate.company, &self.rules.hot_signals);
            if hot.is_hot() {
                outcome.hot_signals.insert(candidate.id, hot);
                outcome
                    .tags
                    .entry(candidate.id)
                    .or_default()
                    .insert(CandidateTag::HotSignal);
            }

            match self.evaluate(candidate, &mut seen) {
                Verdict::Keep { hidden_gem } => {
                    if hidden_gem {
                        outcome
                            .tags
                            .entry(candidate.id)
                            .or_default()
                            .insert(CandidateTag::HiddenGem);
                        outcome.stats.hidden_gems += 1;
                    }
                    if hot.is_hot() {
                        outcome.stats.hot_signals += 1;
                    }
                    outcome.survivors.push(candidate.id);
                }
                Verdict::Reject { rule, reason } => {
                    debug!(
                        candidate = %candidate.id,
                        rule = %rule,
                        reason = %reason,
                        "Candidate rejected"
                    );
                    outcome.stats.count(rule);
                    outcome.rejections.push(RejectionRecord {
                        candidate: candidate.id,
                        identity: candidate.display_name(),
                        rule,
                        reason,
                    });
                }
            }
        }

        outcome.stats.survivors = outcome.survivors.len();

        info!(
            input = outcome.stats.input,
            survivors = outcome.stats.survivors,
            rejected = outcome.stats.rejected(),
            duplicates = outcome.stats.duplicates,
            past_candidates = outcome.stats.past_candidates,
            blacklist = outcome.stats.blacklist,
            no_go = outcome.stats.no_go,
            red_flags = outcome.stats.red_flags,
            "Rejection filtering complete"
        );

        outcome
    }

    fn evaluate(&self, candidate: &CandidateRecord, seen: &mut HashSet<String>) -> Verdict {
        if self.is_duplicate(candidate, seen) {
            return Verdict::reject(FilterRule::Deduplication, "");
        }

        if self.is_past_candidate(candidate) {
            return Verdict::reject(FilterRule::PastCandidate, "");
        }

        if let Some(entry) = find_match(&candidate.company, &self.rules.blacklist) {
            return Verdict::reject(FilterRule::Blacklist, entry);
        }

        if let Some(entry) = find_match(&candidate.company, &self.rules.no_go) {
            return Verdict::reject(FilterRule::NoGo, entry);
        }

        self.check_red_flags(candidate)
    }

    fn is_duplicate(&self, candidate: &CandidateRecord, seen: &mut HashSet<String>) -> bool {
        let name = candidate.full_name.to_lowercase();
        if name.is_empty() {
            return false;
        }
        let key = format!("{}-{}", name, candidate.company.to_lowercase());
        !seen.insert(key)
    }

    fn is_past_candidate(&self, candidate: &CandidateRecord) -> bool {
        let name = candidate.full_name.trim().to_lowercase();
        let url = candidate.profile_url.trim().to_lowercase();
        self.rules.past_candidates.iter().any(|entry| {
            matches_either_way_normalized(&name, entry) || matches_either_way_normalized(&url, entry)
        })
    }

    fn check_red_flags(&self, candidate: &CandidateRecord) -> Verdict {
        if !self.rules.has_red_flags() {
            return Verdict::Keep { hidden_gem: false };
        }

        let text = candidate.searchable_text(&self.rules.summary_columns);
        if text.is_empty() {
            return Verdict::Keep { hidden_gem: false };
        }

        let mut hidden_gem = false;
        for flag in &self.rules.red_flags {
            match flag.check(&text) {
                RedFlagVerdict::Clear => {}
                RedFlagVerdict::Excepted => hidden_gem = true,
                RedFlagVerdict::Reject => return Verdict::reject(FilterRule::RedFlag, flag.label()),
            }
        }

        if let Some(flag) = self
            .rules
            .custom_red_flags
            .iter()
            .find(|flag| text.contains(flag.as_str()))
        {
            return Verdict::reject(FilterRule::RedFlag, flag);
        }

        Verdict::Keep { hidden_gem }
    }
}

enum Verdict {
    Keep { hidden_gem: bool },
    Reject { rule: FilterRule, reason: String },
}

impl Verdict {
    fn reject(rule: FilterRule, detail: &str) -> Self {
        Verdict::Reject {
            rule,
            reason: rule.reason(detail),
        }
    }
}
