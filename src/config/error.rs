//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating configuration.
///
/// All of these are fatal and surface before a ranking run starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A similarity threshold is outside `0.0..=1.0`.
    #[error("invalid {name} threshold {value}: must be between 0.0 and 1.0")]
    InvalidThreshold { name: &'static str, value: f32 },

    /// `borderline` must not exceed `top`.
    #[error("borderline threshold {borderline} is greater than top threshold {top}")]
    ThresholdOrder { borderline: f32, top: f32 },

    /// A logical field the pipeline requires has no source column.
    #[error("missing column mapping for required field: {field}")]
    MissingMapping { field: &'static str },

    /// A preset no-go entry was selected that is not part of the fixed preset list.
    #[error("unknown preset no-go company: '{name}'")]
    UnknownPresetCompany { name: String },

    /// Row ranges start at 2 (row 1 is the header) and must not be reversed.
    #[error("invalid row range {start}..={end}: start must be >= 2 and end >= start")]
    InvalidRowRange { start: usize, end: usize },

    /// An environment variable held a value that could not be parsed.
    #[error("failed to parse {name}='{value}': {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// A setting that must be non-empty was empty.
    #[error("{name} must not be empty")]
    EmptyValue { name: &'static str },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Reading a configuration file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Pipeline configuration JSON was malformed.
    #[error("invalid pipeline configuration: {0}")]
    Json(#[from] serde_json::Error),
}
