use std::collections::BTreeSet;

use tracing::{debug, info};

use super::mapping::ColumnMapping;
use super::record::{CandidateId, CandidateRecord, CandidateTag, RawColumns};
use crate::config::ConfigError;
use crate::hashing::hash_identity;

/// Owns every ingested candidate from ingestion until export.
///
/// Rows are kept even when mapped fields are blank; rules treat blank fields as
/// non-matching rather than dropping the row here.
#[derive(Debug, Clone, Default)]
pub struct CandidateStore {
    records: Vec<CandidateRecord>,
    mapping: ColumnMapping,
}

impl CandidateStore {
    /// Builds records from source rows using `mapping`.
    pub fn ingest(rows: Vec<RawColumns>, mapping: &ColumnMapping) -> Result<Self, ConfigError> {
        mapping.validate()?;

        let records: Vec<CandidateRecord> = rows
            .into_iter()
            .enumerate()
            .map(|(index, raw)| Self::build_record(CandidateId(index), raw, mapping))
            .collect();

        info!(
            candidates = records.len(),
            "Candidate rows ingested"
        );

        Ok(Self {
            records,
            mapping: mapping.clone(),
        })
    }

    fn build_record(id: CandidateId, raw: RawColumns, mapping: &ColumnMapping) -> CandidateRecord {
        let field = |column: &Option<String>| -> String {
            column
                .as_deref()
                .and_then(|c| raw.non_empty(c))
                .unwrap_or_default()
                .to_string()
        };

        let first_name = field(&mapping.first_name);
        let last_name = field(&mapping.last_name);
        let company = field(&mapping.company);
        let title = field(&mapping.title);
        let profile_url = field(&mapping.profile_url);
        let full_name = format!("{first_name} {last_name}").trim().to_string();

        let identity_key = hash_identity(
            &full_name.to_lowercase(),
            &company.to_lowercase(),
            &profile_url.to_lowercase(),
        );

        if full_name.is_empty() && company.is_empty() {
            debug!(candidate = %id, "Row has no mapped identity fields");
        }

        CandidateRecord {
            id,
            raw,
            first_name,
            last_name,
            full_name,
            company,
            title,
            profile_url,
            identity_key,
            tags: BTreeSet::new(),
        }
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    pub fn get(&self, id: CandidateId) -> Option<&CandidateRecord> {
        self.records.get(id.0)
    }

    pub fn records(&self) -> &[CandidateRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Attaches a tag. Returns `false` if the id is unknown.
    pub fn tag(&mut self, id: CandidateId, tag: CandidateTag) -> bool {
        match self.records.get_mut(id.0) {
            Some(record) => {
                record.tags.insert(tag);
                true
            }
            None => false,
        }
    }

    /// Applies every `(id, tags)` pair, e.g. from a filter outcome.
    pub fn apply_tags<'a, I>(&mut self, tags: I)
    where
        I: IntoIterator<Item = (&'a CandidateId, &'a BTreeSet<CandidateTag>)>,
    {
        for (id, set) in tags {
            for tag in set {
                self.tag(*id, *tag);
            }
        }
    }
}
