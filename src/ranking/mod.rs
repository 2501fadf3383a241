//! Ranking runs: state machine, progress, result set and the orchestrator.
//!
//! A run walks the filter survivors inside a [`RowRange`] one candidate at a
//! time. Each candidate is embedded, routed through the scoring tiers and, if it
//! lands in a category, inserted into the shared [`RankedSet`].
//!
//! Runs can be paused, resumed and stopped from another task through a
//! [`ControlHandle`]. Signals take effect between candidates. Candidates already
//! handled are remembered, so a later run over an overlapping range only does
//! the new work.

pub mod control;
pub mod error;
pub mod orchestrator;
pub mod progress;
pub mod results;
pub mod run;


pub use control::{ControlHandle, ControlSignal};
pub use error::{ResultError, RunError};
pub use orchestrator::{RankingOrchestrator, RunOutcome, RunSettings, RunSummary};
pub use progress::Progress;
pub use results::{RankedSet, ResultsHandle};
pub use run::{RankingRun, RowRange, RunStatus};
