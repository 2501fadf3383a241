//! Candidate records and the store that owns them.
//!
//! A [`CandidateRecord`] keeps the source row ([`RawColumns`], in source column
//! order) separate from the fields derived through a [`ColumnMapping`].

mod mapping;
mod record;
mod store;

#[cfg(test)]
mod tests;

pub use mapping::ColumnMapping;
pub use record::{CandidateId, CandidateRecord, CandidateTag, RawColumns};
pub use store::CandidateStore;
