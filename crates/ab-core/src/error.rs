//! Error types for document mutations and JSON import.
//!
//! Mutations are total from the editor's point of view: every error leaves
//! the document untouched. Only import failures are meant to reach the user.

use crate::id::ElementId;

/// Failure of a document mutation. The document is unchanged when returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DocumentError {
    /// Bad creation or update parameters (non-positive size, bad font size, ...).
    #[error("invalid element spec: {0}")]
    InvalidSpec(String),
    /// The operation referenced an id that no longer exists.
    #[error("element not found: {0}")]
    NotFound(ElementId),
    /// The operation is not allowed in the current structure
    /// (grouping fewer than two elements, ungrouping a non-group, ...).
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
}

impl DocumentError {
    /// Short machine-readable code, used by the WASM bridge.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidSpec(_) => "E_INVALID_SPEC",
            Self::NotFound(_) => "E_NOT_FOUND",
            Self::ConstraintViolation(_) => "E_CONSTRAINT",
        }
    }
}

/// Failure of a JSON import. The current document is left as it was.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The input is not valid JSON.
    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// The JSON is well-formed but does not describe a valid document.
    #[error("invalid document: {0}")]
    Schema(String),
}

impl ImportError {
    /// Short machine-readable code, used by the WASM bridge.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "E_PARSE",
            Self::Schema(_) => "E_SCHEMA",
        }
    }
}
