//! Ledger access boundary for weft.
//!
//! The ledger itself — its write path, consensus, and storage contracts —
//! is an external system. Weft consumes it through the read-only
//! [`LedgerRead`] trait: three read paths (router-mediated, direct, and
//! historical) exposed as six async calls. Everything above this crate is
//! a pure resolution algorithm over that boundary.
//!
//! [`InMemoryLedger`] implements the trait over a versioned in-memory map
//! for tests, demos, and embedding. [`LedgerConfig`] carries per-network
//! endpoint overrides as an explicit constructor argument — there is no
//! process-wide override state.

pub mod config;
pub mod error;
pub mod memory;
pub mod records;
pub mod traits;

pub use config::LedgerConfig;
pub use error::{LedgerError, LedgerResult};
pub use memory::InMemoryLedger;
pub use records::{HistoryMetadata, PlainRecord, RouterRecord};
pub use traits::LedgerRead;
