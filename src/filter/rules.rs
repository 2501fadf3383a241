use std::fmt;

use serde::{Deserialize, Serialize};

use super::matching::normalize_entries;
use crate::config::{ConfigError, PipelineConfig};
use crate::constants::{BIG_TECH_ALLOWLIST, PRESET_NO_GO_COMPANIES};

/// Rejection rules in evaluation order. Lower priority number runs first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterRule {
    Deduplication,
    PastCandidate,
    Blacklist,
    NoGo,
    RedFlag,
}

impl FilterRule {
    pub const ALL: [FilterRule; 5] = [
        FilterRule::Deduplication,
        FilterRule::PastCandidate,
        FilterRule::Blacklist,
        FilterRule::NoGo,
        FilterRule::RedFlag,
    ];

    pub fn priority(&self) -> u8 {
        match self {
            FilterRule::Deduplication => 1,
            FilterRule::PastCandidate => 2,
            FilterRule::Blacklist => 3,
            FilterRule::NoGo => 4,
            FilterRule::RedFlag => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FilterRule::Deduplication => "deduplication",
            FilterRule::PastCandidate => "past_candidate",
            FilterRule::Blacklist => "blacklist",
            FilterRule::NoGo => "no_go",
            FilterRule::RedFlag => "red_flag",
        }
    }

    /// Renders the rejection reason. `detail` is the matched entry or flag label.
    pub fn reason(&self, detail: &str) -> String {
        match self {
            FilterRule::Deduplication => "Duplicate".to_string(),
            FilterRule::PastCandidate => "Past Candidate".to_string(),
            FilterRule::Blacklist => format!("Blacklist: {detail}"),
            FilterRule::NoGo => format!("No-Go Company: {detail}"),
            FilterRule::RedFlag => format!("Red Flag: {detail}"),
        }
    }
}

impl fmt::Display for FilterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Preset red flags. Declaration order is evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedFlagKind {
    JobHopping,
    FreelanceConsultant,
    EnterpriseOnly,
    #[serde(rename = "grad_before_2000")]
    GradBefore2000,
}

impl RedFlagKind {
    pub fn label(&self) -> &'static str {
        match self {
            RedFlagKind::JobHopping => "Job Hopping",
            RedFlagKind::FreelanceConsultant => "Freelance/Consultant",
            RedFlagKind::EnterpriseOnly => "Enterprise Only",
            RedFlagKind::GradBefore2000 => "Graduated before 2000",
        }
    }

    /// Evaluates the flag against lowercased profile text.
    pub fn check(&self, text: &str) -> RedFlagVerdict {
        match self {
            RedFlagKind::JobHopping => {
                RedFlagVerdict::from_hit(text.contains("job") && text.contains("hopping"))
            }
            RedFlagKind::FreelanceConsultant => RedFlagVerdict::from_hit(
                text.contains("freelance") || text.contains("consultant"),
            ),
            RedFlagKind::EnterpriseOnly => {
                if !text.contains("enterprise") || text.contains("startup") {
                    RedFlagVerdict::Clear
                } else if BIG_TECH_ALLOWLIST.iter().any(|c| text.contains(c)) {
                    RedFlagVerdict::Excepted
                } else {
                    RedFlagVerdict::Reject
                }
            }
            RedFlagKind::GradBefore2000 => RedFlagVerdict::from_hit(text.contains("199")),
        }
    }
}

/// Outcome of a single red-flag check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedFlagVerdict {
    Clear,
    Reject,
    /// Flag matched but an exception applies; tag as `Hidden Gem` and keep.
    Excepted,
}

impl RedFlagVerdict {
    fn from_hit(hit: bool) -> Self {
        if hit {
            RedFlagVerdict::Reject
        } else {
            RedFlagVerdict::Clear
        }
    }
}

/// How strongly a candidate's company matches the hot-signal list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotSignal {
    #[default]
    None,
    /// Company name contains a hot-signal entry.
    Partial,
    /// Company equals a hot-signal entry.
    Listed,
}

impl HotSignal {
    /// Classifies a company against normalized hot-signal entries.
    pub fn detect(company: &str, entries: &[String]) -> Self {
        let company = company.trim().to_lowercase();
        if company.is_empty() {
            return HotSignal::None;
        }
        if entries.iter().any(|e| *e == company) {
            HotSignal::Listed
        } else if entries.iter().any(|e| company.contains(e.as_str())) {
            HotSignal::Partial
        } else {
            HotSignal::None
        }
    }

    pub fn is_hot(&self) -> bool {
        !matches!(self, HotSignal::None)
    }
}

/// Normalized lists and flags the filter evaluates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    pub past_candidates: Vec<String>,
    pub blacklist: Vec<String>,
    /// Enabled presets followed by custom entries.
    pub no_go: Vec<String>,
    /// Preset flags, deduplicated, in [`RedFlagKind`] order.
    pub red_flags: Vec<RedFlagKind>,
    pub custom_red_flags: Vec<String>,
    pub hot_signals: Vec<String>,
    /// Columns forming the text that red flags search.
    pub summary_columns: Vec<String>,
}

impl RuleSet {
    /// Builds a rule set from persisted configuration.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, ConfigError> {
        let lists = &config.rejection;

        let mut no_go = Vec::new();
        for name in normalize_entries(&lists.preset_no_go) {
            if !PRESET_NO_GO_COMPANIES.contains(&name.as_str()) {
                return Err(ConfigError::UnknownPresetCompany { name });
            }
            no_go.push(name);
        }
        no_go.extend(normalize_entries(&lists.custom_no_go));

        let mut red_flags = config.red_flags.preset.clone();
        red_flags.sort();
        red_flags.dedup();

        Ok(Self {
            past_candidates: normalize_entries(&lists.past_candidates),
            blacklist: normalize_entries(&lists.blacklist),
            no_go,
            red_flags,
            custom_red_flags: normalize_entries(&config.red_flags.custom),
            hot_signals: normalize_entries(&lists.hot_signals),
            summary_columns: config.selected_columns.clone(),
        })
    }

    pub fn has_red_flags(&self) -> bool {
        !self.red_flags.is_empty() || !self.custom_red_flags.is_empty()
    }
}
