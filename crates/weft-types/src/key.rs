use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Width in bytes of every ledger record key.
pub const KEY_WIDTH: usize = 32;

/// Format hint for encoding a human-readable key into a [`StorageKey`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyFormat {
    /// A human-readable name; encoded by zero-padding up to [`KEY_WIDTH`].
    Raw,
    /// A hex string that already decodes to exactly [`KEY_WIDTH`] bytes.
    FixedWidth,
}

impl fmt::Display for KeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw => write!(f, "raw"),
            Self::FixedWidth => write!(f, "fixed-width"),
        }
    }
}

/// Fixed-width identifier of a ledger record.
///
/// A `StorageKey` is always exactly [`KEY_WIDTH`] bytes. Short human-readable
/// names are zero-padded into this width (preserving their readability on
/// the ledger); longer names must be digested first. Construction from raw
/// strings goes through `weft-keys`, which owns that policy.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StorageKey([u8; KEY_WIDTH]);

impl StorageKey {
    /// Create a key from raw bytes.
    pub const fn from_bytes(bytes: [u8; KEY_WIDTH]) -> Self {
        Self(bytes)
    }

    /// The all-zero key. Represents "no key".
    pub const fn null() -> Self {
        Self([0u8; KEY_WIDTH])
    }

    /// Returns `true` if this is the all-zero key.
    pub fn is_null(&self) -> bool {
        self.0 == [0u8; KEY_WIDTH]
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_WIDTH] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string (optionally `0x`-prefixed).
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != KEY_WIDTH {
            return Err(TypeError::InvalidLength {
                expected: KEY_WIDTH,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; KEY_WIDTH];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// The readable prefix of a zero-padded key: the bytes before the first
    /// trailing zero, as UTF-8 if they decode cleanly.
    pub fn readable_prefix(&self) -> Option<&str> {
        let end = self
            .0
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |pos| pos + 1);
        std::str::from_utf8(&self.0[..end]).ok()
    }
}

impl fmt::Debug for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StorageKey({})", self.short_hex())
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; KEY_WIDTH]> for StorageKey {
    fn from(bytes: [u8; KEY_WIDTH]) -> Self {
        Self(bytes)
    }
}

impl From<StorageKey> for [u8; KEY_WIDTH] {
    fn from(key: StorageKey) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_all_zeros() {
        let null = StorageKey::null();
        assert!(null.is_null());
        assert_eq!(null.as_bytes(), &[0u8; KEY_WIDTH]);
    }

    #[test]
    fn hex_roundtrip() {
        let key = StorageKey::from_bytes([0xab; KEY_WIDTH]);
        let hex = key.to_hex();
        let parsed = StorageKey::from_hex(&hex).unwrap();
        assert_eq!(key, parsed);
    }

    #[test]
    fn from_hex_accepts_0x_prefix() {
        let key = StorageKey::from_bytes([0x11; KEY_WIDTH]);
        let parsed = StorageKey::from_hex(&format!("0x{}", key.to_hex())).unwrap();
        assert_eq!(key, parsed);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        let err = StorageKey::from_hex("abcd").unwrap_err();
        assert_eq!(
            err,
            TypeError::InvalidLength {
                expected: KEY_WIDTH,
                actual: 2
            }
        );
    }

    #[test]
    fn from_hex_rejects_garbage() {
        let err = StorageKey::from_hex("zz").unwrap_err();
        assert!(matches!(err, TypeError::InvalidHex(_)));
    }

    #[test]
    fn short_hex_is_8_chars() {
        let key = StorageKey::from_bytes([0x42; KEY_WIDTH]);
        assert_eq!(key.short_hex().len(), 8);
    }

    #[test]
    fn display_is_full_hex() {
        let key = StorageKey::from_bytes([7; KEY_WIDTH]);
        let display = format!("{key}");
        assert_eq!(display.len(), KEY_WIDTH * 2);
        assert_eq!(display, key.to_hex());
    }

    #[test]
    fn readable_prefix_of_padded_key() {
        let mut bytes = [0u8; KEY_WIDTH];
        bytes[..5].copy_from_slice(b"hello");
        let key = StorageKey::from_bytes(bytes);
        assert_eq!(key.readable_prefix(), Some("hello"));
    }

    #[test]
    fn readable_prefix_of_null_key_is_empty() {
        assert_eq!(StorageKey::null().readable_prefix(), Some(""));
    }

    #[test]
    fn readable_prefix_of_binary_key_is_none() {
        let mut bytes = [0u8; KEY_WIDTH];
        bytes[0] = 0xff;
        bytes[1] = 0xfe;
        let key = StorageKey::from_bytes(bytes);
        assert_eq!(key.readable_prefix(), None);
    }

    #[test]
    fn serde_roundtrip() {
        let key = StorageKey::from_bytes([9; KEY_WIDTH]);
        let json = serde_json::to_string(&key).unwrap();
        let parsed: StorageKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, parsed);
    }

    #[test]
    fn ordering_is_consistent() {
        let a = StorageKey::from_bytes([0; KEY_WIDTH]);
        let b = StorageKey::from_bytes([1; KEY_WIDTH]);
        assert!(a < b);
    }

    #[test]
    fn key_format_display() {
        assert_eq!(format!("{}", KeyFormat::Raw), "raw");
        assert_eq!(format!("{}", KeyFormat::FixedWidth), "fixed-width");
    }
}
