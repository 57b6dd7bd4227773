use thiserror::Error;

/// Errors from key encoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// Fixed-width input did not decode to exactly the key width.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// Raw key text exceeds the key width. Digest it explicitly instead.
    #[error("key is {len} bytes, exceeding the {max}-byte width; digest long keys explicitly")]
    KeyTooLong { len: usize, max: usize },

    /// Fixed-width input was not valid hex.
    #[error("invalid hex in fixed-width key: {0}")]
    InvalidHex(String),
}

/// Result alias for key operations.
pub type KeyResult<T> = Result<T, KeyError>;
