//! Error types for YAML decoding and encoding.

use thiserror::Error;

/// Result type alias for ylt-yaml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing YAML documents.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// YAML syntax error
    #[error("{}{line}:{column}: {message}", file_prefix(.file))]
    Parse {
        message: String,
        file: Option<String>,
        line: usize,
        column: usize,
    },

    /// The stream contained no document
    #[error("no YAML document found")]
    NoDocument,

    /// Source file could not be read
    #[error("{path}: {message}")]
    Io { path: String, message: String },

    /// Emitter failure
    #[error("error emitting document: {0}")]
    Emit(String),
}

fn file_prefix(file: &Option<String>) -> String {
    match file {
        Some(file) => format!("{}:", file),
        None => String::new(),
    }
}

impl Error {
    pub(crate) fn from_scan(err: &yaml_rust2::ScanError, file: Option<&str>) -> Self {
        let marker = err.marker();
        Error::Parse {
            message: err.info().to_string(),
            file: file.map(|s| s.to_string()),
            line: marker.line(),
            column: marker.col() + 1,
        }
    }
}

impl From<yaml_rust2::ScanError> for Error {
    fn from(err: yaml_rust2::ScanError) -> Self {
        Error::from_scan(&err, None)
    }
}

impl From<yaml_rust2::EmitError> for Error {
    fn from(err: yaml_rust2::EmitError) -> Self {
        Error::Emit(err.to_string())
    }
}
