use thiserror::Error;
use weft_types::{OperatorId, StorageKey};

/// Errors from ledger read calls.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// No record exists under this key and operator.
    #[error("record not found: key {key}, operator {operator}")]
    NotFound {
        key: StorageKey,
        operator: OperatorId,
    },

    /// The record exists but has no version at the requested index.
    #[error("no version at index {index} for key {key}")]
    NoVersion { key: StorageKey, index: u32 },

    /// The version at the requested index was not written as chunks.
    #[error("no chunked entry at index {index} for key {key}")]
    NoChunkedEntry { key: StorageKey, index: u32 },

    /// The backend failed or is unreachable.
    #[error("ledger backend unavailable: {0}")]
    Backend(String),
}

/// Result alias for ledger read calls.
pub type LedgerResult<T> = Result<T, LedgerError>;
