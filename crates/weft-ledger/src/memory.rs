//! In-memory ledger backend for tests and embedding.
//!
//! [`InMemoryLedger`] keeps versioned records in a `HashMap` behind a
//! `RwLock` and implements the full [`LedgerRead`] trait. The `put_*` /
//! `push_*` helpers stage ledger state the way a real write path would lay
//! it out; they are scaffolding for tests and demos, not part of the read
//! contract.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use weft_chunks::encode_fragments;
use weft_types::{OperatorId, StorageKey};

use crate::error::{LedgerError, LedgerResult};
use crate::records::{HistoryMetadata, PlainRecord, RouterRecord};
use crate::traits::LedgerRead;

/// Default content bytes per staged fragment.
const DEFAULT_FRAGMENT_SIZE: usize = 128;

/// One stored version of a record.
#[derive(Clone, Debug)]
struct VersionEntry {
    label: String,
    value: Vec<u8>,
    /// `Some` when this version was written as chunks.
    fragments: Option<Vec<String>>,
}

#[derive(Default)]
struct LedgerState {
    records: HashMap<(StorageKey, OperatorId), Vec<VersionEntry>>,
}

/// An in-memory implementation of [`LedgerRead`].
///
/// Versions append in write order; index 0 is the oldest and the highest
/// index is what the latest-version accessors serve. Data is lost when the
/// ledger is dropped.
pub struct InMemoryLedger {
    inner: RwLock<LedgerState>,
    fragment_size: usize,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(LedgerState::default()),
            fragment_size: DEFAULT_FRAGMENT_SIZE,
        }
    }

    /// Create an empty ledger that stages chunked records with the given
    /// fragment size (clamped to at least one byte).
    pub fn with_fragment_size(fragment_size: usize) -> Self {
        Self {
            inner: RwLock::new(LedgerState::default()),
            fragment_size: fragment_size.max(1),
        }
    }

    /// Stage a new plain version of a record.
    pub fn put_plain(
        &self,
        key: &StorageKey,
        operator: &OperatorId,
        label: impl Into<String>,
        value: impl Into<Vec<u8>>,
    ) {
        self.push_version(
            key,
            operator,
            VersionEntry {
                label: label.into(),
                value: value.into(),
                fragments: None,
            },
        );
    }

    /// Stage a new chunked version of a record, splitting the content into
    /// wire fragments the way a writer would.
    pub fn put_chunked(
        &self,
        key: &StorageKey,
        operator: &OperatorId,
        label: impl Into<String>,
        content: &[u8],
    ) {
        self.push_version(
            key,
            operator,
            VersionEntry {
                label: label.into(),
                value: content.to_vec(),
                fragments: Some(encode_fragments(content, self.fragment_size)),
            },
        );
    }

    /// Number of versions stored under a record.
    pub fn version_count(&self, key: &StorageKey, operator: &OperatorId) -> usize {
        let state = self.inner.read().expect("ledger lock poisoned");
        state
            .records
            .get(&(*key, operator.clone()))
            .map_or(0, Vec::len)
    }

    fn push_version(&self, key: &StorageKey, operator: &OperatorId, version: VersionEntry) {
        let mut state = self.inner.write().expect("ledger lock poisoned");
        state
            .records
            .entry((*key, operator.clone()))
            .or_default()
            .push(version);
    }

    fn with_record<T>(
        &self,
        key: &StorageKey,
        operator: &OperatorId,
        f: impl FnOnce(&[VersionEntry]) -> LedgerResult<T>,
    ) -> LedgerResult<T> {
        let state = self
            .inner
            .read()
            .map_err(|e| LedgerError::Backend(format!("lock poisoned: {e}")))?;
        let versions = state
            .records
            .get(&(*key, operator.clone()))
            .ok_or_else(|| LedgerError::NotFound {
                key: *key,
                operator: operator.clone(),
            })?;
        f(versions)
    }

    fn window(fragments: &[String], start: u32, end: u32) -> Vec<String> {
        let len = fragments.len();
        let start = (start as usize).min(len);
        let end = (end as usize).min(len);
        if start >= end {
            return Vec::new();
        }
        fragments[start..end].to_vec()
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerRead for InMemoryLedger {
    async fn router_get(
        &self,
        key: &StorageKey,
        operator: &OperatorId,
    ) -> LedgerResult<RouterRecord> {
        self.with_record(key, operator, |versions| {
            let latest = versions.last().expect("records never have zero versions");
            Ok(match &latest.fragments {
                Some(fragments) => RouterRecord {
                    is_chunked: true,
                    label: latest.label.clone(),
                    payload: fragments.len().to_string().into_bytes(),
                },
                None => RouterRecord {
                    is_chunked: false,
                    label: latest.label.clone(),
                    payload: latest.value.clone(),
                },
            })
        })
    }

    async fn direct_get(
        &self,
        key: &StorageKey,
        operator: &OperatorId,
    ) -> LedgerResult<PlainRecord> {
        self.with_record(key, operator, |versions| {
            let latest = versions.last().expect("records never have zero versions");
            // A chunked record has no plain form; the direct accessor
            // behaves as if the record does not exist.
            if latest.fragments.is_some() {
                return Err(LedgerError::NotFound {
                    key: *key,
                    operator: operator.clone(),
                });
            }
            Ok(PlainRecord {
                label: latest.label.clone(),
                value: latest.value.clone(),
            })
        })
    }

    async fn chunked_get_chunks(
        &self,
        key: &StorageKey,
        operator: &OperatorId,
        start: u32,
        end: u32,
    ) -> LedgerResult<Vec<String>> {
        self.with_record(key, operator, |versions| {
            let latest = versions.last().expect("records never have zero versions");
            let fragments = latest.fragments.as_ref().ok_or(LedgerError::NoChunkedEntry {
                key: *key,
                index: versions.len() as u32 - 1,
            })?;
            Ok(Self::window(fragments, start, end))
        })
    }

    async fn history_get_metadata_at_index(
        &self,
        key: &StorageKey,
        operator: &OperatorId,
        index: u32,
    ) -> LedgerResult<HistoryMetadata> {
        self.with_record(key, operator, |versions| {
            let version = versions
                .get(index as usize)
                .ok_or(LedgerError::NoVersion { key: *key, index })?;
            let fragments = version
                .fragments
                .as_ref()
                .ok_or(LedgerError::NoChunkedEntry { key: *key, index })?;
            Ok(HistoryMetadata {
                chunk_count: fragments.len() as u32,
                label: version.label.clone(),
            })
        })
    }

    async fn history_get_chunks_at_index(
        &self,
        key: &StorageKey,
        operator: &OperatorId,
        start: u32,
        end: u32,
        index: u32,
    ) -> LedgerResult<Vec<String>> {
        self.with_record(key, operator, |versions| {
            let version = versions
                .get(index as usize)
                .ok_or(LedgerError::NoVersion { key: *key, index })?;
            let fragments = version
                .fragments
                .as_ref()
                .ok_or(LedgerError::NoChunkedEntry { key: *key, index })?;
            Ok(Self::window(fragments, start, end))
        })
    }

    async fn history_get_value_at_index(
        &self,
        key: &StorageKey,
        operator: &OperatorId,
        index: u32,
    ) -> LedgerResult<PlainRecord> {
        self.with_record(key, operator, |versions| {
            let version = versions
                .get(index as usize)
                .ok_or(LedgerError::NoVersion { key: *key, index })?;
            // Chunked versions have no plain form at their index either.
            if version.fragments.is_some() {
                return Err(LedgerError::NotFound {
                    key: *key,
                    operator: operator.clone(),
                });
            }
            Ok(PlainRecord {
                label: version.label.clone(),
                value: version.value.clone(),
            })
        })
    }
}
