use tracing::debug;
use weft_chunks::{BatchRanges, ChunkAssembler};
use weft_ledger::LedgerRead;
use weft_types::{OperatorId, StorageKey};

use crate::error::{ReadError, ReadResult};

/// Default number of fragments fetched per batch.
pub const DEFAULT_BATCH_SIZE: u32 = 16;

/// What to read: which version, and through which path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadOptions {
    /// Historical version index; `None` reads the latest version.
    pub version_index: Option<u32>,
    /// For latest-version reads, prefer the router path (which can serve
    /// chunked records) over the direct plain accessor. Ignored for
    /// historical reads.
    pub prefer_router: bool,
}

impl ReadOptions {
    /// Latest version through the router (serves both plain and chunked).
    pub fn router() -> Self {
        Self {
            version_index: None,
            prefer_router: true,
        }
    }

    /// Latest version through the direct plain accessor.
    pub fn direct() -> Self {
        Self {
            version_index: None,
            prefer_router: false,
        }
    }

    /// Historical version at the given index.
    pub fn at_index(index: u32) -> Self {
        Self {
            version_index: Some(index),
            prefer_router: true,
        }
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self::router()
    }
}

/// The one result shape every read path normalizes into.
///
/// Callers never branch on which ledger path served a read; the only
/// trace a chunked record leaves is the `is_chunked` flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub label: String,
    pub value: Vec<u8>,
    pub is_chunked: bool,
}

/// Storage access selector: one `read` entry point over the ledger's
/// three read paths.
///
/// Fragment runs are fetched in sequential windows of at most
/// `batch_size` fragments — each batch is awaited before the next is
/// issued, so outstanding chunk requests for one record never exceed a
/// single batch.
pub struct RecordReader<L> {
    ledger: L,
    batch_size: u32,
}

impl<L: LedgerRead> RecordReader<L> {
    /// Create a reader over a ledger backend.
    pub fn new(ledger: L) -> Self {
        Self {
            ledger,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Override the fragment batch size (clamped to at least one).
    pub fn with_batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// The underlying ledger backend.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Read a record and normalize the result.
    pub async fn read(
        &self,
        key: &StorageKey,
        operator: &OperatorId,
        options: &ReadOptions,
    ) -> ReadResult<NormalizedRecord> {
        match options.version_index {
            Some(index) => self.read_at_index(key, operator, index).await,
            None if options.prefer_router => self.read_router(key, operator).await,
            None => self.read_direct(key, operator).await,
        }
    }

    /// Latest version through the router: one call decides plain vs
    /// chunked, then chunked records pull their fragment run.
    async fn read_router(
        &self,
        key: &StorageKey,
        operator: &OperatorId,
    ) -> ReadResult<NormalizedRecord> {
        let record = self.ledger.router_get(key, operator).await?;
        if !record.is_chunked {
            return Ok(NormalizedRecord {
                label: record.label,
                value: record.payload,
                is_chunked: false,
            });
        }

        let chunk_count = parse_chunk_count(&record.payload)?;
        let mut fragments = Vec::with_capacity(chunk_count as usize);
        for (start, end) in BatchRanges::new(chunk_count, self.batch_size) {
            let batch = self
                .ledger
                .chunked_get_chunks(key, operator, start, end)
                .await?;
            fragments.extend(batch);
        }
        let content = ChunkAssembler::assemble_counted(&fragments, chunk_count)?;
        Ok(NormalizedRecord {
            label: record.label,
            value: content.into_bytes(),
            is_chunked: true,
        })
    }

    /// Latest version through the direct plain accessor.
    async fn read_direct(
        &self,
        key: &StorageKey,
        operator: &OperatorId,
    ) -> ReadResult<NormalizedRecord> {
        let record = self.ledger.direct_get(key, operator).await?;
        Ok(NormalizedRecord {
            label: record.label,
            value: record.value,
            is_chunked: false,
        })
    }

    /// Historical read: always try the chunked-history accessor first and
    /// fall back to the plain at-index accessor.
    ///
    /// The fallback triggers on a metadata failure or a zero chunk count —
    /// both simply mean "this version was not written as chunks" and are
    /// absorbed here, not surfaced. A failure while fetching fragments a
    /// positive chunk count promised is a real error and propagates.
    async fn read_at_index(
        &self,
        key: &StorageKey,
        operator: &OperatorId,
        index: u32,
    ) -> ReadResult<NormalizedRecord> {
        match self
            .ledger
            .history_get_metadata_at_index(key, operator, index)
            .await
        {
            Ok(metadata) if metadata.chunk_count > 0 => {
                let mut fragments = Vec::with_capacity(metadata.chunk_count as usize);
                for (start, end) in BatchRanges::new(metadata.chunk_count, self.batch_size) {
                    let batch = self
                        .ledger
                        .history_get_chunks_at_index(key, operator, start, end, index)
                        .await?;
                    fragments.extend(batch);
                }
                let content = ChunkAssembler::assemble_counted(&fragments, metadata.chunk_count)?;
                Ok(NormalizedRecord {
                    label: metadata.label,
                    value: content.into_bytes(),
                    is_chunked: true,
                })
            }
            Ok(_) => {
                debug!(
                    key = %key.short_hex(),
                    index,
                    "chunked history reported zero chunks; falling back to plain read"
                );
                self.read_plain_at_index(key, operator, index).await
            }
            Err(e) => {
                debug!(
                    key = %key.short_hex(),
                    index,
                    error = %e,
                    "chunked history lookup missed; falling back to plain read"
                );
                self.read_plain_at_index(key, operator, index).await
            }
        }
    }

    async fn read_plain_at_index(
        &self,
        key: &StorageKey,
        operator: &OperatorId,
        index: u32,
    ) -> ReadResult<NormalizedRecord> {
        let record = self
            .ledger
            .history_get_value_at_index(key, operator, index)
            .await?;
        Ok(NormalizedRecord {
            label: record.label,
            value: record.value,
            is_chunked: false,
        })
    }
}

/// Parse the router's ASCII decimal chunk-count payload.
fn parse_chunk_count(payload: &[u8]) -> ReadResult<u32> {
    std::str::from_utf8(payload)
        .ok()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .ok_or_else(|| ReadError::MalformedChunkCount {
            payload: String::from_utf8_lossy(payload).into_owned(),
        })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use weft_keys::KeyCodec;
    use weft_ledger::{
        HistoryMetadata, InMemoryLedger, LedgerError, LedgerResult, PlainRecord, RouterRecord,
    };
    use weft_types::KeyFormat;

    use super::*;

    fn key(name: &str) -> StorageKey {
        KeyCodec::encode(name, KeyFormat::Raw).unwrap()
    }

    fn operator() -> OperatorId {
        OperatorId::from_hex("0xaa").unwrap()
    }

    #[tokio::test]
    async fn router_path_serves_plain_records() {
        let ledger = InMemoryLedger::new();
        ledger.put_plain(&key("a"), &operator(), "greeting", b"hello".to_vec());

        let reader = RecordReader::new(ledger);
        let record = reader
            .read(&key("a"), &operator(), &ReadOptions::router())
            .await
            .unwrap();
        assert_eq!(record.label, "greeting");
        assert_eq!(record.value, b"hello");
        assert!(!record.is_chunked);
    }

    #[tokio::test]
    async fn router_path_reassembles_chunked_records() {
        let ledger = InMemoryLedger::with_fragment_size(3);
        let content = b"a fairly long value split across many fragments";
        ledger.put_chunked(&key("a"), &operator(), "blob", content);

        let reader = RecordReader::new(ledger).with_batch_size(4);
        let record = reader
            .read(&key("a"), &operator(), &ReadOptions::router())
            .await
            .unwrap();
        assert_eq!(record.value, content);
        assert!(record.is_chunked);
    }

    #[tokio::test]
    async fn direct_path_serves_plain_records() {
        let ledger = InMemoryLedger::new();
        ledger.put_plain(&key("a"), &operator(), "plain", b"value".to_vec());

        let reader = RecordReader::new(ledger);
        let record = reader
            .read(&key("a"), &operator(), &ReadOptions::direct())
            .await
            .unwrap();
        assert_eq!(record.value, b"value");
        assert!(!record.is_chunked);
    }

    #[tokio::test]
    async fn historical_chunked_version_reassembles() {
        let ledger = InMemoryLedger::with_fragment_size(2);
        let k = key("h");
        let op = operator();
        ledger.put_chunked(&k, &op, "old", b"archived content");
        ledger.put_plain(&k, &op, "new", b"tiny".to_vec());

        let reader = RecordReader::new(ledger);
        let record = reader
            .read(&k, &op, &ReadOptions::at_index(0))
            .await
            .unwrap();
        assert_eq!(record.value, b"archived content");
        assert_eq!(record.label, "old");
        assert!(record.is_chunked);
    }

    #[tokio::test]
    async fn historical_fallback_serves_plain_version() {
        let ledger = InMemoryLedger::new();
        let k = key("h");
        let op = operator();
        ledger.put_plain(&k, &op, "v0", b"the plain version".to_vec());

        // The chunked-history lookup misses (plain version) and the read
        // silently falls back to the plain at-index accessor.
        let reader = RecordReader::new(ledger);
        let record = reader
            .read(&k, &op, &ReadOptions::at_index(0))
            .await
            .unwrap();
        assert_eq!(record.value, b"the plain version");
        assert!(!record.is_chunked);
    }

    #[tokio::test]
    async fn historical_read_with_no_version_at_index_errors() {
        let ledger = InMemoryLedger::new();
        let k = key("h");
        let op = operator();
        ledger.put_plain(&k, &op, "v0", b"only".to_vec());

        let err = RecordReader::new(ledger)
            .read(&k, &op, &ReadOptions::at_index(9))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ReadError::Ledger(LedgerError::NoVersion { index: 9, .. })
        ));
    }

    /// Ledger stub that scripts the router/metadata responses and records
    /// every chunk window requested.
    struct ScriptedLedger {
        router: Option<RouterRecord>,
        metadata: Option<LedgerResult<HistoryMetadata>>,
        plain_at_index: Option<PlainRecord>,
        fragments: Vec<String>,
        windows: Mutex<Vec<(u32, u32)>>,
    }

    impl ScriptedLedger {
        fn new() -> Self {
            Self {
                router: None,
                metadata: None,
                plain_at_index: None,
                fragments: Vec::new(),
                windows: Mutex::new(Vec::new()),
            }
        }

        fn window(&self, start: u32, end: u32) -> Vec<String> {
            self.windows.lock().unwrap().push((start, end));
            let len = self.fragments.len();
            let start = (start as usize).min(len);
            let end = (end as usize).min(len);
            self.fragments[start..end].to_vec()
        }
    }

    #[async_trait]
    impl LedgerRead for ScriptedLedger {
        async fn router_get(
            &self,
            _key: &StorageKey,
            _operator: &OperatorId,
        ) -> LedgerResult<RouterRecord> {
            self.router
                .clone()
                .ok_or_else(|| LedgerError::Backend("no router script".into()))
        }

        async fn direct_get(
            &self,
            _key: &StorageKey,
            _operator: &OperatorId,
        ) -> LedgerResult<PlainRecord> {
            Err(LedgerError::Backend("no direct script".into()))
        }

        async fn chunked_get_chunks(
            &self,
            _key: &StorageKey,
            _operator: &OperatorId,
            start: u32,
            end: u32,
        ) -> LedgerResult<Vec<String>> {
            Ok(self.window(start, end))
        }

        async fn history_get_metadata_at_index(
            &self,
            _key: &StorageKey,
            _operator: &OperatorId,
            _index: u32,
        ) -> LedgerResult<HistoryMetadata> {
            self.metadata
                .clone()
                .unwrap_or_else(|| Err(LedgerError::Backend("no metadata script".into())))
        }

        async fn history_get_chunks_at_index(
            &self,
            _key: &StorageKey,
            _operator: &OperatorId,
            start: u32,
            end: u32,
            _index: u32,
        ) -> LedgerResult<Vec<String>> {
            Ok(self.window(start, end))
        }

        async fn history_get_value_at_index(
            &self,
            _key: &StorageKey,
            _operator: &OperatorId,
            _index: u32,
        ) -> LedgerResult<PlainRecord> {
            self.plain_at_index.clone().ok_or_else(|| {
                LedgerError::Backend("no plain-at-index script".into())
            })
        }
    }

    #[tokio::test]
    async fn chunk_batches_are_sequential_bounded_windows() {
        let mut ledger = ScriptedLedger::new();
        ledger.fragments = weft_chunks::encode_fragments(&vec![0x61u8; 35], 1);
        ledger.router = Some(RouterRecord {
            is_chunked: true,
            label: "big".into(),
            payload: b"35".to_vec(),
        });

        let reader = RecordReader::new(ledger).with_batch_size(16);
        let record = reader
            .read(&key("a"), &operator(), &ReadOptions::router())
            .await
            .unwrap();
        assert_eq!(record.value.len(), 35);

        let windows = reader.ledger().windows.lock().unwrap().clone();
        assert_eq!(windows, vec![(0, 16), (16, 32), (32, 35)]);
    }

    #[tokio::test]
    async fn zero_chunk_count_metadata_falls_back_to_plain() {
        let mut ledger = ScriptedLedger::new();
        ledger.metadata = Some(Ok(HistoryMetadata {
            chunk_count: 0,
            label: "meta".into(),
        }));
        ledger.plain_at_index = Some(PlainRecord {
            label: "plain".into(),
            value: b"fallback value".to_vec(),
        });

        let reader = RecordReader::new(ledger);
        let record = reader
            .read(&key("h"), &operator(), &ReadOptions::at_index(2))
            .await
            .unwrap();
        assert_eq!(record.value, b"fallback value");
        assert_eq!(record.label, "plain");
        assert!(!record.is_chunked);
    }

    #[tokio::test]
    async fn malformed_chunk_count_is_an_error() {
        let mut ledger = ScriptedLedger::new();
        ledger.router = Some(RouterRecord {
            is_chunked: true,
            label: "bad".into(),
            payload: b"not a number".to_vec(),
        });

        let reader = RecordReader::new(ledger);
        let err = reader
            .read(&key("a"), &operator(), &ReadOptions::router())
            .await
            .unwrap_err();
        assert!(matches!(err, ReadError::MalformedChunkCount { .. }));
    }

    #[tokio::test]
    async fn fallback_result_is_shape_indistinguishable() {
        // A chunked historical version and a plain fallback produce the
        // same NormalizedRecord shape; only the flag differs.
        let ledger = InMemoryLedger::with_fragment_size(2);
        let k = key("h");
        let op = operator();
        ledger.put_chunked(&k, &op, "same", b"same bytes");
        ledger.put_plain(&k, &op, "same", b"same bytes".to_vec());

        let reader = RecordReader::new(ledger);
        let chunked = reader.read(&k, &op, &ReadOptions::at_index(0)).await.unwrap();
        let plain = reader.read(&k, &op, &ReadOptions::at_index(1)).await.unwrap();
        assert_eq!(chunked.value, plain.value);
        assert_eq!(chunked.label, plain.label);
        assert!(chunked.is_chunked && !plain.is_chunked);
    }

    #[tokio::test]
    async fn batch_size_zero_is_clamped_to_one() {
        let ledger = InMemoryLedger::with_fragment_size(1);
        ledger.put_chunked(&key("a"), &operator(), "b", b"xyz");

        let reader = RecordReader::new(ledger).with_batch_size(0);
        let record = reader
            .read(&key("a"), &operator(), &ReadOptions::router())
            .await
            .unwrap();
        assert_eq!(record.value, b"xyz");
    }
}
