use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Maps logical candidate fields to source column names.
///
/// The pipeline never assumes column names beyond what this mapping provides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    /// Profile URL column (e.g. a LinkedIn link).
    pub profile_url: Option<String>,
}

impl ColumnMapping {
    /// First name and company are required to build an identity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if Self::is_unset(&self.first_name) {
            return Err(ConfigError::MissingMapping {
                field: "first_name",
            });
        }
        if Self::is_unset(&self.company) {
            return Err(ConfigError::MissingMapping { field: "company" });
        }
        Ok(())
    }

    fn is_unset(column: &Option<String>) -> bool {
        column.as_deref().map(str::trim).is_none_or(str::is_empty)
    }
}
