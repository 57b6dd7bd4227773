use thiserror::Error;

/// Errors from chunk assembly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    /// A fragment failed to decode from its wire encoding. Assembly is
    /// abandoned; there is no partial result.
    #[error("malformed fragment at index {index}: {reason}")]
    MalformedFragment { index: usize, reason: String },
}

/// Result alias for chunk operations.
pub type ChunkResult<T> = Result<T, ChunkError>;
