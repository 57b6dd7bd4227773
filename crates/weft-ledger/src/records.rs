use serde::{Deserialize, Serialize};

/// A non-chunked record value, as returned by the direct accessor and the
/// historical plain accessor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainRecord {
    /// Human-readable label the writer attached to the record.
    pub label: String,
    /// The stored value bytes.
    pub value: Vec<u8>,
}

/// A router-mediated record result.
///
/// The router answers one question the direct accessor cannot: whether the
/// record was written as chunks. When `is_chunked` is false, `payload` is
/// the final value. When true, `payload` is the ASCII decimal fragment
/// count and the fragments themselves are fetched separately.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterRecord {
    pub is_chunked: bool,
    pub label: String,
    pub payload: Vec<u8>,
}

/// Metadata of a chunked record version at a historical index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryMetadata {
    /// Number of fragments in this version's run.
    pub chunk_count: u32,
    /// Label attached to this version.
    pub label: String,
}
