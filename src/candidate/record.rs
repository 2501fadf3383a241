use std::collections::BTreeSet;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{FIRST_DATA_ROW, SUMMARY_SEPARATOR};

/// Stable position of a candidate in the ingested row set (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub usize);

impl CandidateId {
    /// Sheet row number (row 1 is the header).
    #[inline]
    pub fn sheet_row(&self) -> usize {
        self.0 + FIRST_DATA_ROW
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row-{}", self.sheet_row())
    }
}

/// Source row as ordered `column -> value` pairs.
///
/// Column order is preserved from the source; values are stored as strings
/// (JSON numbers and booleans are stringified, `null` becomes empty).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawColumns {
    columns: Vec<(String, String)>,
}

impl RawColumns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column, replacing the value in place if the column already exists.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.columns.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value,
            None => self.columns.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    /// Value of `column`, trimmed; `None` when missing or blank.
    pub fn non_empty(&self, column: &str) -> Option<&str> {
        self.get(column).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(c, _)| c.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawColumns {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut raw = RawColumns::new();
        for (k, v) in iter {
            raw.insert(k, v);
        }
        raw
    }
}

impl Serialize for RawColumns {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, value) in &self.columns {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RawColumns {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawColumnsVisitor;

        impl<'de> Visitor<'de> for RawColumnsVisitor {
            type Value = RawColumns;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of column -> value")
            }

            // Entries arrive in document order, which is the source column order.
            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RawColumns, A::Error> {
                let mut raw = RawColumns::new();
                while let Some((column, value)) =
                    access.next_entry::<String, serde_json::Value>()?
                {
                    let value = match value {
                        serde_json::Value::String(s) => s,
                        serde_json::Value::Null => String::new(),
                        other => other.to_string(),
                    };
                    raw.insert(column, value);
                }
                Ok(raw)
            }
        }

        deserializer.deserialize_map(RawColumnsVisitor)
    }
}

/// Non-rejecting labels attached during filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CandidateTag {
    #[serde(rename = "Hot Signal")]
    HotSignal,
    #[serde(rename = "Hidden Gem")]
    HiddenGem,
}

impl CandidateTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateTag::HotSignal => "Hot Signal",
            CandidateTag::HiddenGem => "Hidden Gem",
        }
    }
}

impl fmt::Display for CandidateTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate: immutable source columns plus derived identity fields.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateRecord {
    pub id: CandidateId,
    pub raw: RawColumns,
    pub first_name: String,
    pub last_name: String,
    /// `"first last"`, trimmed.
    pub full_name: String,
    /// Current company, trimmed (original casing kept for display).
    pub company: String,
    pub title: String,
    pub profile_url: String,
    /// Fingerprint of the normalized identity fields.
    pub identity_key: u64,
    pub tags: BTreeSet<CandidateTag>,
}

impl CandidateRecord {
    /// Name for logs and audit records, falling back to the company or row.
    pub fn display_name(&self) -> String {
        if !self.full_name.is_empty() {
            self.full_name.clone()
        } else if !self.company.is_empty() {
            self.company.clone()
        } else {
            self.id.to_string()
        }
    }

    pub fn has_tag(&self, tag: CandidateTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Returns `true` if at least one of `columns` holds a non-blank value.
    pub fn has_profile_data(&self, columns: &[String]) -> bool {
        columns.iter().any(|c| self.raw.non_empty(c).is_some())
    }

    /// Selected column values in the configured order, joined with `" | "`.
    pub fn profile_summary(&self, columns: &[String]) -> String {
        columns
            .iter()
            .filter_map(|c| self.raw.non_empty(c))
            .collect::<Vec<_>>()
            .join(SUMMARY_SEPARATOR)
    }

    /// Lowercased text red-flag rules search: the profile summary, or every raw
    /// value when no summary columns are configured or they are all blank.
    pub fn searchable_text(&self, columns: &[String]) -> String {
        let summary = self.profile_summary(columns);
        let text = if summary.is_empty() {
            self.raw
                .iter()
                .map(|(_, v)| v.trim())
                .filter(|v| !v.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            summary
        };
        text.to_lowercase()
    }
}
