//! Deterministic key encoding for weft.
//!
//! The ledger addresses every record by a fixed-width key. This crate owns
//! the mapping from human-readable key text to that width:
//!
//! - [`KeyCodec`] — pure encoding: pass-through with a width check for
//!   fixed-width input, zero-padding for short raw names, and a hard
//!   rejection for raw names that exceed the width.
//! - [`KeyDigest`] — the explicit escape hatch for arbitrary-length names:
//!   a domain-separated BLAKE3 digest down to key width. Hashing is never
//!   applied implicitly; a caller that wants it says so.

pub mod codec;
pub mod digest;
pub mod error;

pub use codec::KeyCodec;
pub use digest::KeyDigest;
pub use error::{KeyError, KeyResult};
