//! Error types for the data-loader crate.
//!
//! Only failures that abort a load run live here. Malformed field values
//! are normalized by the builders and never reach this type.

use thiserror::Error;

/// Errors that can occur while reading dataset files or writing to the store
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Dataset file could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error while reading a file (including a corrupt gzip stream)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A line in a dataset file is not valid UTF-8
    #[error("Invalid UTF-8 at line {line} in {file}")]
    DecodeError { file: String, line: u64 },

    /// Any other failure reported by the TSV reader
    #[error("Failed to read {file}: {source}")]
    CsvError {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// The header row lacks a column the builder depends on
    #[error("Missing column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    /// The store rejected a statement (unique or foreign-key violation, ...)
    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    /// Loader configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DataLoadError {
    /// Classify a csv error raised while reading `file`.
    ///
    /// Encoding problems and I/O failures get their own variants so the
    /// caller can tell a truncated archive from a bad byte sequence.
    pub(crate) fn from_csv(file: &str, err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        if matches!(err.kind(), csv::ErrorKind::Utf8 { .. }) {
            DataLoadError::DecodeError {
                file: file.to_string(),
                line,
            }
        } else if err.is_io_error() {
            DataLoadError::IoError(err.into())
        } else {
            DataLoadError::CsvError {
                file: file.to_string(),
                source: err,
            }
        }
    }

    /// True when the store refused a row because its key already exists
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DataLoadError::DatabaseError(rusqlite::Error::SqliteFailure(e, _)) => {
                e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
            }
            _ => false,
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
