//! Error types for the Open Library loader

use std::path::PathBuf;

use thiserror::Error;

/// Process and pass level errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Dump source {} unavailable: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Why a single dump line was skipped.
///
/// These never abort a pass: the loader logs them, counts them by
/// [`LineError::kind`] and moves on to the next line.
#[derive(Error, Debug)]
pub enum LineError {
    #[error("line is not valid UTF-8: {0}")]
    InvalidEncoding(String),

    #[error("no JSON payload in line")]
    MalformedLine,

    #[error("payload is not a JSON object: {0}")]
    MalformedJson(String),

    #[error("required field `{0}` is missing")]
    RequiredFieldMissing(String),

    #[error("field `{field}` is invalid: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("author {0} referenced before it was loaded")]
    UnresolvedAuthorReference(String),

    #[error("storage failure: {0}")]
    Storage(#[from] AppError),
}

impl LineError {
    /// Stable bucket name used in load reports
    pub fn kind(&self) -> &'static str {
        match self {
            LineError::InvalidEncoding(_) => "invalid_encoding",
            LineError::MalformedLine => "malformed_line",
            LineError::MalformedJson(_) => "malformed_json",
            LineError::RequiredFieldMissing(_) => "required_field_missing",
            LineError::InvalidField { .. } => "invalid_field",
            LineError::UnresolvedAuthorReference(_) => "unresolved_author_reference",
            LineError::Storage(_) => "storage",
        }
    }

    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        LineError::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for LineError {
    fn from(e: serde_json::Error) -> Self {
        LineError::MalformedJson(e.to_string())
    }
}
