//! Error type shared by the registries, the book and the graph queries

use crate::model::EntityKind;
use thiserror::Error;

/// Errors that can occur in address book operations
#[derive(Debug, Error)]
pub enum BookError {
    #[error("Duplicate {kind}: an equivalent entry already exists")]
    DuplicateEntity { kind: EntityKind },

    #[error("{kind} not found")]
    EntityNotFound { kind: EntityKind },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Identifier out of range: {0}")]
    InvalidIdentifier(i64),

    #[error("No {kind} identifiers left to allocate")]
    IdentifierSpaceExhausted { kind: EntityKind },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for address book operations
pub type BookResult<T> = Result<T, BookError>;
