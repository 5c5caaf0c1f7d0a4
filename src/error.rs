//! Error types for the record engine.

use serde::Serialize;
use thiserror::Error;

/// Main error type for engine and storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid number of parameters for {operation}: expected {expected}, got {got}")]
    InvalidArity {
        operation: &'static str,
        expected: &'static str,
        got: usize,
    },

    #[error("Invalid email format: {0:?}")]
    InvalidEmail(String),

    #[error("Index is not an integer: {0:?}")]
    InvalidIndex(String),

    #[error("Position {position} out of range (store holds {len} records)")]
    OutOfRange { position: i64, len: usize },

    #[error("No previous operation to undo")]
    EmptyHistory,

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Data file not found: {0}")]
    NotFound(String),

    #[error("Data file is locked by another process: {0}")]
    Locked(String),

    #[error("Invalid record on line {line}: {reason}")]
    InvalidFormat { line: usize, reason: String },

    #[error("Invalid script on line {line}: {reason}")]
    InvalidScript { line: usize, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Coarse classification of a [`StoreError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Io,
    InvalidArity,
    InvalidEmail,
    InvalidIndex,
    OutOfRange,
    EmptyHistory,
    InvalidOperation,
    NotFound,
    Locked,
    InvalidFormat,
    InvalidScript,
    Serialization,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Io(_) => ErrorKind::Io,
            StoreError::InvalidArity { .. } => ErrorKind::InvalidArity,
            StoreError::InvalidEmail(_) => ErrorKind::InvalidEmail,
            StoreError::InvalidIndex(_) => ErrorKind::InvalidIndex,
            StoreError::OutOfRange { .. } => ErrorKind::OutOfRange,
            StoreError::EmptyHistory => ErrorKind::EmptyHistory,
            StoreError::InvalidOperation(_) => ErrorKind::InvalidOperation,
            StoreError::NotFound(_) => ErrorKind::NotFound,
            StoreError::Locked(_) => ErrorKind::Locked,
            StoreError::InvalidFormat { .. } => ErrorKind::InvalidFormat,
            StoreError::InvalidScript { .. } => ErrorKind::InvalidScript,
            StoreError::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// Whether this error is a data-validation failure of a single operation,
    /// as opposed to a failure of a collaborator (storage, script parsing).
    pub fn is_operation_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidArity
                | ErrorKind::InvalidEmail
                | ErrorKind::InvalidIndex
                | ErrorKind::OutOfRange
                | ErrorKind::EmptyHistory
                | ErrorKind::InvalidOperation
        )
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, StoreError>;
