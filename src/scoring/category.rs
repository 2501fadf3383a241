use super::types::{Category, Thresholds};
use crate::constants::{GOOD_SCORE_FLOOR, HIDDEN_SCORE_FLOOR, HOT_OVERRIDE_SCORE_FLOOR};
use crate::filter::HotSignal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// `None` below the hidden band.
    pub category: Option<Category>,
    pub confirmed_hot: bool,
}

/// Maps a score to its category, applying the hot-signal override.
pub fn classify(score: u8, hot: HotSignal, thresholds: &Thresholds) -> Classification {
    if hot.is_hot() && score >= HOT_OVERRIDE_SCORE_FLOOR {
        return Classification {
            category: Some(Category::Hot),
            confirmed_hot: hot == HotSignal::Listed,
        };
    }

    let category = if score >= thresholds.top_score() {
        Some(Category::Top)
    } else if score >= GOOD_SCORE_FLOOR {
        Some(Category::Good)
    } else if score >= HIDDEN_SCORE_FLOOR {
        Some(Category::Hidden)
    } else {
        None
    };

    Classification {
        category,
        confirmed_hot: false,
    }
}
