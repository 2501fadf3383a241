//! Cross-cutting, shared constants.
//!
//! Thresholds are expressed on the similarity scale (`0.0..=1.0`); score bands are
//! expressed on the integer score scale (`0..=100`). Derive one from the other with
//! [`threshold_to_score`] rather than duplicating values.

pub const DEFAULT_TOP_THRESHOLD: f32 = 0.85;
pub const DEFAULT_BORDERLINE_THRESHOLD: f32 = 0.60;

/// Similarity below which economy mode downgrades the hybrid-path model.
pub const ECONOMY_SIMILARITY_CUTOFF: f32 = 0.80;

/// Bonus added to the similarity-derived score when no score can be extracted.
pub const FALLBACK_SCORE_BONUS: u8 = 10;

pub const MAX_SCORE: u8 = 100;

/// Lower bound of the `good` band (and of the hot-signal override).
pub const GOOD_SCORE_FLOOR: u8 = 70;
pub const HOT_OVERRIDE_SCORE_FLOOR: u8 = GOOD_SCORE_FLOOR;

/// Lower bound of the `hidden` band.
pub const HIDDEN_SCORE_FLOOR: u8 = 50;

/// Decimal places kept on reported similarity values.
pub const SIMILARITY_PRECISION: i32 = 3;

/// Row 1 of a sheet is the header row; data starts at row 2.
pub const FIRST_DATA_ROW: usize = 2;
pub const DEFAULT_RANGE_END: usize = 100;

/// Candidates per reporting batch.
pub const PROGRESS_BATCH_SIZE: usize = 20;

/// Separator used when joining selected columns into a profile summary.
pub const SUMMARY_SEPARATOR: &str = " | ";

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_FULL_MODEL: &str = "gpt-4o";
pub const DEFAULT_ECONOMY_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";

pub const ANALYSIS_MAX_TOKENS: u32 = 400;
pub const ANALYSIS_TEMPERATURE: f64 = 0.2;

pub const EMBEDDING_CACHE_CAPACITY: u64 = 10_000;

/// Companies that can be switched on as no-go entries. Not user-editable.
pub const PRESET_NO_GO_COMPANIES: &[&str] = &[
    "isracard",
    "matrix",
    "harel insurance & finance",
    "ness technologies",
    "bank leumi",
    "gav systems",
    "amdocs",
    "log-on software",
    "sapiens",
    "aman group",
    "nice",
    "maccabi healthcare services",
    "zap group",
    "clalit health services",
    "bank hapoalim",
    "israel tax authority",
    "discount bank",
    "infanity labs",
    "experis israel",
    "sapiens international",
    "magic software enterprises",
    "ethernity networks",
    "elad software systems",
    "mizrahi-tefahot bank",
    "migdal insurance",
    "menora mivtachim",
    "clal insurance",
    "taldor",
    "bynet data communications",
    "hachshara insurance company",
    "psagot investment house",
    "max it finance",
    "bizi",
];

/// Employers that turn an enterprise-only red flag into a `Hidden Gem` tag.
pub const BIG_TECH_ALLOWLIST: &[&str] = &["microsoft", "google", "amazon", "meta", "facebook"];

/// Converts a similarity threshold to the integer score scale.
#[inline]
pub fn threshold_to_score(threshold: f32) -> u8 {
    (threshold.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Rounds a similarity value to [`SIMILARITY_PRECISION`] decimal places.
#[inline]
pub fn round_similarity(value: f32) -> f32 {
    let factor = 10f32.powi(SIMILARITY_PRECISION);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_to_score() {
        assert_eq!(threshold_to_score(0.85), 85);
        assert_eq!(threshold_to_score(0.60), 60);
        assert_eq!(threshold_to_score(1.5), 100);
        assert_eq!(threshold_to_score(-0.2), 0);
    }

    #[test]
    fn test_round_similarity() {
        assert!((round_similarity(0.123_456) - 0.123).abs() < 1e-6);
        assert!((round_similarity(0.8996) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_preset_list_is_lowercase() {
        for company in PRESET_NO_GO_COMPANIES {
            assert_eq!(*company, company.to_lowercase());
        }
    }
}
