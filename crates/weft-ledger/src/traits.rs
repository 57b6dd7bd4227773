use async_trait::async_trait;
use weft_types::{OperatorId, StorageKey};

use crate::error::LedgerResult;
use crate::records::{HistoryMetadata, PlainRecord, RouterRecord};

/// Read-only boundary to the ledger's record storage.
///
/// Weft never writes: this trait has no mutating surface at all, and the
/// argument and return shapes below are a compatibility contract — any
/// change to them is a breaking change for every caller.
///
/// Fragment windows (`start`, `end`) are half-open: `[start, end)` in
/// fragment indexes. Implementations clamp `end` to the record's fragment
/// count; a window entirely past the end yields an empty list.
#[async_trait]
pub trait LedgerRead: Send + Sync {
    /// Fetch the latest version of a record through the router.
    ///
    /// The router reports whether the record is chunked. For plain records
    /// the payload is the value itself; for chunked records it is the
    /// ASCII decimal fragment count.
    async fn router_get(
        &self,
        key: &StorageKey,
        operator: &OperatorId,
    ) -> LedgerResult<RouterRecord>;

    /// Fetch the latest version of a plain (non-chunked) record directly.
    async fn direct_get(
        &self,
        key: &StorageKey,
        operator: &OperatorId,
    ) -> LedgerResult<PlainRecord>;

    /// Fetch a window of the latest version's fragment run, in order.
    async fn chunked_get_chunks(
        &self,
        key: &StorageKey,
        operator: &OperatorId,
        start: u32,
        end: u32,
    ) -> LedgerResult<Vec<String>>;

    /// Fetch chunk metadata for the version at a historical index.
    ///
    /// Fails when the index has no version or the version at that index
    /// was not written as chunks.
    async fn history_get_metadata_at_index(
        &self,
        key: &StorageKey,
        operator: &OperatorId,
        index: u32,
    ) -> LedgerResult<HistoryMetadata>;

    /// Fetch a fragment window of the version at a historical index.
    async fn history_get_chunks_at_index(
        &self,
        key: &StorageKey,
        operator: &OperatorId,
        start: u32,
        end: u32,
        index: u32,
    ) -> LedgerResult<Vec<String>>;

    /// Fetch the plain value of the version at a historical index.
    async fn history_get_value_at_index(
        &self,
        key: &StorageKey,
        operator: &OperatorId,
        index: u32,
    ) -> LedgerResult<PlainRecord>;
}
