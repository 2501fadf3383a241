use std::time::Duration;

use serde::Serialize;

use super::run::RunStatus;
use crate::constants::PROGRESS_BATCH_SIZE;

/// Snapshot published after every candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Progress {
    pub status: RunStatus,
    pub processed: usize,
    pub total: usize,
    pub ranked: usize,
    pub errors: usize,
    #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
    pub elapsed: Duration,
}

impl Progress {
    /// `processed / total`, 0 for an empty run.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }

    /// `elapsed / processed * (total - processed)`; unknown before the first candidate.
    pub fn eta(&self) -> Option<Duration> {
        if self.processed == 0 {
            return None;
        }
        let remaining = self.total.saturating_sub(self.processed) as f64;
        let per_item = self.elapsed.as_secs_f64() / self.processed as f64;
        Some(Duration::from_secs_f64(per_item * remaining))
    }

    /// Reporting batch the run is in (`processed / 20 + 1`).
    pub fn batches(&self) -> usize {
        self.processed / PROGRESS_BATCH_SIZE + 1
    }
}

fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}
