//! Error taxonomy for translation and for the file-processing host

use strum_macros::Display;
use thiserror::Error;

/// Faults raised while translating a single tree.
///
/// Any of these aborts the translation of that tree; there is no partial result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// The tag names a kind the dispatch table does not know.
    #[error("unmapped node kind `{kind}`")]
    UnmappedKind { kind: String },

    /// A rule found a field missing or of the wrong JSON type.
    #[error("{kind}.{field}: expected {expected}")]
    ShapeMismatch {
        kind: String,
        field: String,
        expected: &'static str,
    },

    /// A node position held something other than a tagged object.
    #[error("expected a syntax node, found {found}")]
    NotANode { found: &'static str },

    /// A known source kind without any typescript-estree counterpart.
    #[error("{kind} has no typescript-estree counterpart")]
    Unrepresentable { kind: String },

    /// Parser recovery node; the upstream parse did not succeed.
    #[error("parser recovery node at {start}..{end}")]
    InvalidNode { start: u32, end: u32 },

    #[error("tree nesting exceeds {limit} levels")]
    TooDeep { limit: usize },
}

impl TranslateError {
    pub(crate) fn shape(kind: &str, field: &str, expected: &'static str) -> Self {
        TranslateError::ShapeMismatch {
            kind: kind.to_string(),
            field: field.to_string(),
            expected,
        }
    }

    pub(crate) fn unrepresentable(kind: &str) -> Self {
        TranslateError::Unrepresentable {
            kind: kind.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TranslateError>;

/// Where in the host pipeline an input failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    Read,
    Parse,
    Translate,
}

/// A failure tied to one input file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{path}: {stage} failed: {message}")]
pub struct ProcessError {
    pub path: String,
    pub stage: Stage,
    pub message: String,
}

impl ProcessError {
    pub fn new(path: impl Into<String>, stage: Stage, message: impl ToString) -> Self {
        Self {
            path: path.into(),
            stage,
            message: message.to_string(),
        }
    }
}
