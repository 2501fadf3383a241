use std::fmt;
use std::ops::Range;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::RunError;
use crate::config::ConfigError;
use crate::constants::{DEFAULT_RANGE_END, FIRST_DATA_ROW};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Paused,
    Stopped,
    Complete,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Idle => "idle",
            RunStatus::Running => "running",
            RunStatus::Paused => "paused",
            RunStatus::Stopped => "stopped",
            RunStatus::Complete => "complete",
        }
    }

    /// Stopped and complete runs only leave through a new start.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Stopped | RunStatus::Complete)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of the active ranking run. Transition methods return the new status.
#[derive(Debug, Clone, Default)]
pub struct RankingRun {
    status: RunStatus,
    total: usize,
    current: usize,
    started_at: Option<Instant>,
    started_at_utc: Option<DateTime<Utc>>,
}

impl RankingRun {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at_utc
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.map(|t| t.elapsed()).unwrap_or_default()
    }

    /// Starts a run over `total` candidates. Terminal runs reset through idle first.
    pub fn start(&mut self, total: usize) -> Result<RunStatus, RunError> {
        if self.status.is_terminal() {
            self.reset();
        }
        self.require(RunStatus::Idle, "start")?;

        self.total = total;
        self.current = 0;
        self.started_at = Some(Instant::now());
        self.started_at_utc = Some(Utc::now());
        self.status = RunStatus::Running;
        Ok(self.status)
    }

    pub fn pause(&mut self) -> Result<RunStatus, RunError> {
        self.require(RunStatus::Running, "pause")?;
        self.status = RunStatus::Paused;
        Ok(self.status)
    }

    pub fn resume(&mut self) -> Result<RunStatus, RunError> {
        self.require(RunStatus::Paused, "resume")?;
        self.status = RunStatus::Running;
        Ok(self.status)
    }

    /// Stops a running or paused run and clears its counters.
    pub fn stop(&mut self) -> Result<RunStatus, RunError> {
        if !matches!(self.status, RunStatus::Running | RunStatus::Paused) {
            return Err(RunError::InvalidTransition {
                from: self.status,
                action: "stop",
            });
        }
        self.status = RunStatus::Stopped;
        self.total = 0;
        self.current = 0;
        Ok(self.status)
    }

    pub fn complete(&mut self) -> Result<RunStatus, RunError> {
        self.require(RunStatus::Running, "complete")?;
        self.status = RunStatus::Complete;
        Ok(self.status)
    }

    /// Marks one more candidate as processed.
    pub fn advance(&mut self) -> usize {
        if self.status == RunStatus::Running {
            self.current = (self.current + 1).min(self.total);
        }
        self.current
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn require(&self, status: RunStatus, action: &'static str) -> Result<(), RunError> {
        if self.status == status {
            Ok(())
        } else {
            Err(RunError::InvalidTransition {
                from: self.status,
                action,
            })
        }
    }
}

/// Inclusive sheet row range. Row 1 is the header, so data rows start at 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl Default for RowRange {
    fn default() -> Self {
        Self {
            start: FIRST_DATA_ROW,
            end: DEFAULT_RANGE_END,
        }
    }
}

impl RowRange {
    pub fn new(start: usize, end: usize) -> Result<Self, ConfigError> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start < FIRST_DATA_ROW || self.end < self.start {
            return Err(ConfigError::InvalidRowRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// 0-based slice `[start-2, end-1)` clamped to `len`.
    pub fn to_slice(&self, len: usize) -> Range<usize> {
        let lo = self.start.saturating_sub(FIRST_DATA_ROW).min(len);
        let hi = self.end.saturating_sub(1).min(len).max(lo);
        lo..hi
    }

    /// Number of rows the range names.
    pub fn size(&self) -> usize {
        self.end.saturating_sub(self.start) + 1
    }

    /// The following window of the same size.
    pub fn next_range(&self) -> Self {
        let size = self.size();
        Self {
            start: self.end + 1,
            end: self.end + size,
        }
    }
}

impl fmt::Display for RowRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
