//! Domain error model.

use thiserror::Error;

use crate::document::DocumentKind;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Deterministic, client-side failures only (form validation, malformed
/// identifiers). Transport and storage concerns belong to the crates that
/// own them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// One or more required fields were left empty.
    #[error("required field missing: {0}")]
    MissingField(&'static str),

    /// A tax document failed its checksum or length check.
    #[error("invalid {kind}")]
    InvalidDocument { kind: DocumentKind },

    /// An identifier was invalid (e.g. empty).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn invalid_document(kind: DocumentKind) -> Self {
        Self::InvalidDocument { kind }
    }
}
