use weft_types::{KeyFormat, StorageKey, KEY_WIDTH};

use crate::error::{KeyError, KeyResult};

/// Pure mapping from human-readable key text to a [`StorageKey`].
///
/// Encoding is deterministic: the same input always yields the same key,
/// which is what makes re-reads idempotent and lets the resolver detect
/// repeated reference targets. Two properties are load-bearing:
///
/// - Short raw names are zero-padded, not hashed, so they stay readable
///   in ledger explorers.
/// - Raw names longer than [`KEY_WIDTH`] are rejected, never silently
///   hashed. A caller that wants a digest uses [`crate::KeyDigest`].
pub struct KeyCodec;

impl KeyCodec {
    /// Encode key text under the given format.
    pub fn encode(raw: &str, format: KeyFormat) -> KeyResult<StorageKey> {
        match format {
            KeyFormat::FixedWidth => Self::encode_fixed_width(raw),
            KeyFormat::Raw => Self::encode_raw(raw),
        }
    }

    fn encode_fixed_width(raw: &str) -> KeyResult<StorageKey> {
        let s = raw.strip_prefix("0x").unwrap_or(raw);
        let bytes = hex::decode(s).map_err(|e| KeyError::InvalidHex(e.to_string()))?;
        if bytes.len() != KEY_WIDTH {
            return Err(KeyError::InvalidKeyLength {
                expected: KEY_WIDTH,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; KEY_WIDTH];
        arr.copy_from_slice(&bytes);
        Ok(StorageKey::from_bytes(arr))
    }

    fn encode_raw(raw: &str) -> KeyResult<StorageKey> {
        let bytes = raw.as_bytes();
        if bytes.len() > KEY_WIDTH {
            return Err(KeyError::KeyTooLong {
                len: bytes.len(),
                max: KEY_WIDTH,
            });
        }
        let mut arr = [0u8; KEY_WIDTH];
        arr[..bytes.len()].copy_from_slice(bytes);
        Ok(StorageKey::from_bytes(arr))
    }
}
