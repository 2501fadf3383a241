//! Persisted recruiter configuration consumed by the pipeline.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use super::error::ConfigError;
use crate::candidate::ColumnMapping;
use crate::constants::PRESET_NO_GO_COMPANIES;
use crate::filter::RedFlagKind;
use crate::ranking::RowRange;
use crate::scoring::Thresholds;

/// Recruiter-owned settings. Opaque to the pipeline apart from validation.
///
/// Rejection lists and custom red flags accept either a JSON array or a single
/// newline-separated string, matching how the lists are typed into text areas.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub column_mapping: ColumnMapping,
    pub rejection: RejectionLists,
    pub red_flags: RedFlagSettings,
    pub thresholds: Thresholds,
    pub economy_mode: bool,
    pub ideal_profiles: Vec<String>,
    pub job_description: String,
    /// Columns concatenated (in this order) into the profile summary.
    pub selected_columns: Vec<String>,
    pub row_range: RowRange,
}

/// Rejection and tagging lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RejectionLists {
    #[serde(deserialize_with = "list_or_lines")]
    pub blacklist: Vec<String>,
    #[serde(deserialize_with = "list_or_lines")]
    pub past_candidates: Vec<String>,
    /// User-entered no-go companies.
    #[serde(deserialize_with = "list_or_lines")]
    pub custom_no_go: Vec<String>,
    /// Enabled entries from [`PRESET_NO_GO_COMPANIES`].
    #[serde(deserialize_with = "list_or_lines")]
    pub preset_no_go: Vec<String>,
    #[serde(deserialize_with = "list_or_lines")]
    pub hot_signals: Vec<String>,
}

/// Selected red flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RedFlagSettings {
    pub preset: Vec<RedFlagKind>,
    #[serde(deserialize_with = "list_or_lines")]
    pub custom: Vec<String>,
}

impl PipelineConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a configuration file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks everything that would make a run meaningless before it starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        self.column_mapping.validate()?;
        self.row_range.validate()?;

        let presets: HashSet<&str> = PRESET_NO_GO_COMPANIES.iter().copied().collect();
        for name in &self.rejection.preset_no_go {
            let normalized = name.trim().to_lowercase();
            if !normalized.is_empty() && !presets.contains(normalized.as_str()) {
                return Err(ConfigError::UnknownPresetCompany { name: name.clone() });
            }
        }

        Ok(())
    }

    /// Non-empty ideal profile texts, in configured order.
    pub fn ideal_profile_texts(&self) -> Vec<String> {
        self.ideal_profiles
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListInput {
    Lines(String),
    Items(Vec<String>),
}

fn list_or_lines<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<ListInput>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(ListInput::Lines(text)) => text.lines().map(str::to_string).collect(),
        Some(ListInput::Items(items)) => items,
    };

    Ok(items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}
