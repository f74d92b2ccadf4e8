//! Error type shared by every draft operation and the produce entry points.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Prototype changes and custom property descriptors are never allowed
    /// on a draft.
    #[error("UNSUPPORTED_OPERATION: {0}")]
    UnsupportedOperation(&'static str),
    #[error(
        "a recipe returned a new value *and* modified its draft; \
         either return a new value *or* modify the draft"
    )]
    ConflictingResult,
    #[error("INTERNAL_INVARIANT_VIOLATION: {0}")]
    InternalInvariantViolation(String),
    /// The draft belongs to a produce call that has already finished.
    #[error("REVOKED")]
    Revoked,
    /// A draft is reachable from its own shadow copy.
    #[error("CYCLE")]
    Cycle,
    #[error("NOT_DRAFTABLE")]
    NotDraftable,
    #[error("NOT_AN_ARRAY")]
    NotAnArray,
    #[error("NOT_FOUND: {0}")]
    NotFound(String),
    #[error("INVALID_KEY: {0}")]
    InvalidKey(String),
    #[error("INVALID_ARRAY_LENGTH")]
    InvalidArrayLength,
}
