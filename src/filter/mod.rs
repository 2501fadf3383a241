//! Ordered rejection filter.
//!
//! Rules run in a fixed order (see [`FilterRule`]) and a rejected candidate is
//! never seen by later rules, so each rejection carries exactly one reason.
//! Hot-signal and hidden-gem tagging ride along without ever rejecting.

#[allow(clippy::module_inception)]
mod filter;
pub mod matching;
mod rules;


pub use filter::{FilterOutcome, FilterStats, RejectionFilter, RejectionRecord};
pub use matching::{find_match, matches_either_way, normalize_entries};
pub use rules::{FilterRule, HotSignal, RedFlagKind, RedFlagVerdict, RuleSet};
