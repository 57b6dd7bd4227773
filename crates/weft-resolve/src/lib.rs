//! Record reconstruction for weft.
//!
//! This crate is the front door of the read side. It reconciles the
//! ledger's three read paths into one normalized shape and walks the
//! reference graph embedded in record content:
//!
//! - [`RecordReader`] — picks the router, direct, or historical read path
//!   for a request, fetches fragment runs in bounded sequential batches,
//!   and normalizes every path's result into a [`NormalizedRecord`].
//! - [`Resolver`] — recursively inlines references, bounded by a depth
//!   budget and a visited set shared across the whole call, so any
//!   reference graph — cyclic, diamond-shaped, or adversarial — resolves
//!   in finite work with every skipped reference cited in the result.

pub mod error;
pub mod reader;
pub mod resolver;

pub use error::{ReadError, ReadResult, ResolveError, ResolveResult};
pub use reader::{NormalizedRecord, ReadOptions, RecordReader, DEFAULT_BATCH_SIZE};
pub use resolver::{
    ResolveOptions, ResolvedContent, Resolver, UnresolvedReason, UnresolvedRef,
};
