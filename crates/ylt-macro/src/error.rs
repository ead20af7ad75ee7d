//! Error types for macro expansion.

use thiserror::Error;

/// Result type alias for ylt-macro operations.
pub type Result<T> = std::result::Result<T, Error>;

/// What went wrong at a node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A node kind that may not appear at this position.
    #[error("unexpected node kind, {0}")]
    UnexpectedKind(String),

    /// A top-level entry that is not a document.
    #[error("expected DocumentNode, got {0}")]
    ExpectedDocument(String),

    /// A document without exactly one root.
    #[error("expected exactly one child node of document")]
    DocumentChildCount { found: usize },

    /// Unwrap applied to something that is neither a sequence nor a mapping.
    #[error("cannot unwrap {0}")]
    CannotUnwrap(String),

    #[error("cannot unwrap a mapping key")]
    UnwrapMappingKey,

    #[error("cannot unwrap a mapping value")]
    UnwrapMappingValue,

    /// Mapping content must alternate key and value.
    #[error("mapping node has an odd number of content nodes ({0})")]
    OddMappingContent(usize),

    #[error("maximum nesting depth of {0} exceeded")]
    NestingTooDeep(usize),

    /// Failure reported by a registered macro.
    #[error("{0}")]
    Custom(String),
}

impl From<String> for ErrorKind {
    fn from(message: String) -> Self {
        ErrorKind::Custom(message)
    }
}

impl From<&str> for ErrorKind {
    fn from(message: &str) -> Self {
        ErrorKind::Custom(message.to_string())
    }
}

/// Errors produced while expanding documents.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A failure attributed to a node, rendered as `path:line:column: message`.
    #[error("{path}:{line}:{column}: {kind}")]
    Node {
        path: String,
        line: usize,
        column: usize,
        kind: ErrorKind,
    },

    /// Several documents failed while errors were being collected.
    #[error("{}", render_multiple(.0))]
    Multiple(Vec<Error>),

    /// The input could not be decoded.
    #[error(transparent)]
    Yaml(#[from] ylt_yaml::Error),
}

fn render_multiple(errors: &[Error]) -> String {
    let mut out = format!("{} errors occurred:", errors.len());
    for error in errors {
        out.push_str("\n  ");
        out.push_str(&error.to_string());
    }
    out
}

impl Error {
    /// The kind of a node error, or `None` for aggregate and decode errors.
    pub fn kind(&self) -> Option<&ErrorKind> {
        match self {
            Error::Node { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Every node error contained in this error, in order.
    pub fn flatten(&self) -> Vec<&Error> {
        match self {
            Error::Multiple(errors) => errors.iter().flat_map(Error::flatten).collect(),
            other => vec![other],
        }
    }
}
