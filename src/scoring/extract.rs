//! Best-effort parsing of free-text analyses.
//!
//! Nothing here fails: a missing score falls back to the similarity-derived
//! value, and missing sections fall back to the whole text.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::MAX_SCORE;

static SCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)score[^\d]*(\d{2,3})").expect("score pattern is valid"));

static EXPLANATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)explanation.*?[:\-\n]+(.*)").expect("explanation pattern is valid")
});

/// Last `score ... NN` in `text`. Values above 100 are capped; 0 counts as
/// not found.
pub fn extract_score(text: &str) -> Option<u8> {
    let last = SCORE_RE.captures_iter(text).last()?;
    let value: u16 = last.get(1)?.as_str().parse().ok()?;
    match value {
        0 => None,
        v => Some(v.min(u16::from(MAX_SCORE)) as u8),
    }
}

/// Sections pulled out of an analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisSections {
    pub concerns: Vec<String>,
    pub explanation: String,
}

impl AnalysisSections {
    pub fn parse(text: &str) -> Self {
        let explanation = EXPLANATION_RE
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().trim_start_matches('*').trim())
            .filter(|s| !s.is_empty())
            .unwrap_or(text.trim())
            .to_string();

        Self {
            concerns: parse_concerns(text),
            explanation,
        }
    }
}

/// Lines following a "concern(s)" heading, up to the next heading or blank line.
fn parse_concerns(text: &str) -> Vec<String> {
    let mut lines = text.lines();
    let mut concerns = Vec::new();

    let Some(heading) = lines.by_ref().find(|l| l.to_lowercase().contains("concern")) else {
        return concerns;
    };

    // Inline form: "Concerns: lacks X; no Y".
    if let Some((_, rest)) = heading.split_once(':') {
        let rest = strip_bullet(rest);
        if !rest.is_empty() {
            concerns.push(rest.to_string());
        }
    }

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if concerns.is_empty() {
                continue;
            }
            break;
        }
        if is_heading(trimmed) {
            break;
        }
        let item = strip_bullet(trimmed);
        if !item.is_empty() {
            concerns.push(item.to_string());
        }
    }

    concerns
}

fn strip_bullet(line: &str) -> &str {
    line.trim()
        .trim_start_matches(['-', '*', '•', ' '])
        .trim_end_matches('*')
        .trim()
}

fn is_heading(line: &str) -> bool {
    let lower = line.to_lowercase();
    (line.starts_with("**") && !line.starts_with("** "))
        || line.starts_with('#')
        || lower.starts_with("explanation")
        || lower.starts_with("score")
        || lower.starts_with("strength")
}
