//! Chunk reassembly for weft.
//!
//! Ledger records larger than the per-record size cap are written as an
//! ordered run of hex-encoded fragments. This crate turns a fetched run of
//! fragments back into the original bytes:
//!
//! - [`ChunkAssembler`] — strictly ordered decode-and-concatenate with a
//!   fail-fast per-fragment error carrying the fragment index.
//! - [`AssembledContent`] — distinguishes "no data was ever written"
//!   ([`AssembledContent::Empty`]) from real zero-length content.
//! - [`BatchRanges`] — the half-open fetch windows used to pull fragment
//!   runs in bounded, sequential batches.
//! - [`encode_fragments`] — the writer-side split, kept beside the
//!   assembler so the two halves of the wire codec stay in lockstep. The
//!   read path never calls it; tests and in-memory backends do.

pub mod assemble;
pub mod batch;
pub mod error;
pub mod fragment;

pub use assemble::{AssembledContent, ChunkAssembler};
pub use batch::BatchRanges;
pub use error::{ChunkError, ChunkResult};
pub use fragment::encode_fragments;
