use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Opaque identity of the account that wrote a ledger record.
///
/// The operator participates in every lookup key — the same storage key
/// written by two different operators names two different records. Weft
/// never interprets the bytes; they are whatever identity scheme the
/// underlying ledger uses, carried verbatim.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OperatorId(Vec<u8>);

impl OperatorId {
    /// Create an operator identity from raw bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, TypeError> {
        if bytes.is_empty() {
            return Err(TypeError::EmptyOperator);
        }
        Ok(Self(bytes))
    }

    /// Parse from a hex string (optionally `0x`-prefixed).
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        Self::from_bytes(bytes)
    }

    /// The raw identity bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Hex-encoded string with a `0x` prefix.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }
}

impl fmt::Debug for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OperatorId({})", self.to_hex())
    }
}

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_roundtrip() {
        let op = OperatorId::from_hex("0xaabbcc").unwrap();
        assert_eq!(op.as_bytes(), &[0xaa, 0xbb, 0xcc]);
        assert_eq!(op.to_hex(), "0xaabbcc");
    }

    #[test]
    fn from_hex_without_prefix() {
        let op = OperatorId::from_hex("aa").unwrap();
        assert_eq!(op.as_bytes(), &[0xaa]);
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(OperatorId::from_hex("").unwrap_err(), TypeError::EmptyOperator);
        assert_eq!(
            OperatorId::from_bytes(vec![]).unwrap_err(),
            TypeError::EmptyOperator
        );
    }

    #[test]
    fn rejects_invalid_hex() {
        assert!(matches!(
            OperatorId::from_hex("0xgg").unwrap_err(),
            TypeError::InvalidHex(_)
        ));
    }

    #[test]
    fn equality_is_byte_equality() {
        let a = OperatorId::from_hex("0xAA").unwrap();
        let b = OperatorId::from_hex("aa").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn serde_roundtrip() {
        let op = OperatorId::from_hex("0x0102").unwrap();
        let json = serde_json::to_string(&op).unwrap();
        let parsed: OperatorId = serde_json::from_str(&json).unwrap();
        assert_eq!(op, parsed);
    }
}
