//! Crate error taxonomy.
//!
//! Subsystems declare their own error enums; everything converges into
//! [`Error`] at the operation boundary. Every failure renders a short
//! machine-checkable reason string and aborts the whole invocation. Nothing
//! is retried internally and no error is downgraded to a default value.

use crate::{
    codec::EncodeError,
    db::{index::IndexWriteError, store::NotFoundError, store::SerializeError},
    ledger::StateError,
};
use thiserror::Error as ThisError;

///
/// Error
///
/// Top-level failure of one logical invocation.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    IndexWrite(#[from] IndexWriteError),

    #[error(transparent)]
    Serialize(#[from] SerializeError),

    #[error(transparent)]
    State(#[from] StateError),
}

impl Error {
    /// True when the failure means the addressed record does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

///
/// ValidationError
///
/// Request-shape failures detected before any write is issued.
///

#[derive(Debug, ThisError)]
pub enum ValidationError {
    #[error("operation '{op}' expects {expected} arguments, received {received}")]
    Arity {
        op: &'static str,
        expected: usize,
        received: usize,
    },

    #[error("argument '{field}' must be a non-negative integer")]
    NotNumeric { field: &'static str },

    #[error("update type {value} is reserved for retrieval sentinels and cannot be stored")]
    ReservedUpdateType { value: u64 },

    #[error("update positions are 1-based; index 0 is not addressable")]
    ZeroUpdateIndex,

    #[error("'{value}' is not a recognized status code")]
    UnknownStatus { value: u64 },

    #[error("unknown operation '{0}'")]
    UnknownOperation(String),
}
