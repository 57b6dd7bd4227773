//! Writer-side fragment split.
//!
//! Weft's read path never writes, but its in-memory ledger backend and its
//! tests need to stage chunked records exactly the way a real writer lays
//! them out. Keeping the split next to [`crate::ChunkAssembler`] keeps both
//! halves of the wire codec in one place.

/// Split content into `0x`-prefixed hex fragments of at most
/// `fragment_size` content bytes each.
///
/// A `fragment_size` of zero is treated as one: every fragment must carry
/// at least one byte or the split would never terminate. Empty content
/// yields a single empty fragment (`"0x"`) — a real zero-length value,
/// not the absence of one.
pub fn encode_fragments(content: &[u8], fragment_size: usize) -> Vec<String> {
    let size = fragment_size.max(1);
    if content.is_empty() {
        return vec!["0x".to_string()];
    }
    content
        .chunks(size)
        .map(|chunk| format!("0x{}", hex::encode(chunk)))
        .collect()
}
