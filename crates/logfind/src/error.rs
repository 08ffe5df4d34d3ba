//! Error types for the logfind crate.

use thiserror::Error;

use crate::timestamp::Timestamp;

/// Errors raised while reading records or their fields from a source.
///
/// End of stream is not an error: sources signal it with `Ok(None)`.
#[derive(Debug, Error)]
pub enum SourceError {
    /// A raw record did not have the expected number of fields.
    #[error("record has {found} fields, expected {expected}")]
    FieldCountMismatch { expected: usize, found: usize },

    /// A field was present but could not be interpreted.
    #[error("invalid {field} '{value}': {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// The underlying reader failed.
    #[error("failed to read record: {0}")]
    ReadFailure(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SourceError {
    /// Create an invalid-field error.
    pub fn invalid_field(
        field: &'static str,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::InvalidField {
            field,
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Wrap a lower-level reader error.
    pub fn read(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::ReadFailure(err.into())
    }
}

/// Errors that can occur when configuring or running a find.
#[derive(Debug, Error)]
pub enum FindError {
    /// The upper time bound is not strictly after the lower one.
    #[error("time range invalid: {max} is not after {min}")]
    TimeRangeInvalid { min: Timestamp, max: Timestamp },

    /// A count concern name did not match any known concern.
    #[error("unknown count concern '{0}' (expected event, operation or user)")]
    UnknownCountConcern(String),

    /// The record source failed mid-scan.
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Result type for logfind operations.
pub type Result<T> = std::result::Result<T, FindError>;
