use thiserror::Error;
use weft_chunks::ChunkError;
use weft_keys::KeyError;
use weft_ledger::LedgerError;
use weft_types::OperatorId;

/// Errors from a single storage read.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReadError {
    /// The ledger backend failed outside the documented historical
    /// fallback.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// A fragment in the record's run failed to decode.
    #[error("chunk error: {0}")]
    Chunk(#[from] ChunkError),

    /// The router reported a chunked record but its payload did not parse
    /// as a chunk count.
    #[error("malformed chunk count payload: {payload:?}")]
    MalformedChunkCount { payload: String },
}

/// Result alias for storage reads.
pub type ReadResult<T> = Result<T, ReadError>;

/// Errors from recursive resolution.
///
/// Every variant names the reference that failed — key text, operator,
/// and the depth it was encountered at — so a caller can tell one broken
/// link from a systemic backend outage.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// Fetching or assembling a referenced record failed.
    #[error("failed to fetch reference {key:?} (operator {operator}) at depth {depth}: {source}")]
    Fetch {
        key: String,
        operator: OperatorId,
        depth: usize,
        #[source]
        source: ReadError,
    },

    /// A reference's key text could not be encoded into a storage key.
    #[error("invalid reference key {key:?} at depth {depth}: {source}")]
    InvalidReferenceKey {
        key: String,
        depth: usize,
        #[source]
        source: KeyError,
    },

    /// A referenced record's content was not valid UTF-8.
    #[error("reference {key:?} (operator {operator}) at depth {depth} is not valid UTF-8")]
    InvalidUtf8 {
        key: String,
        operator: OperatorId,
        depth: usize,
    },
}

/// Result alias for resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;
