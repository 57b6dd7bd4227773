//! Reference parsing for weft.
//!
//! Assembled content may embed pointers to other stored records using the
//! `{{ref:key=<key>,op=<hex>}}` syntax. References are pure data extracted
//! from content — the ledger knows nothing about them — and only exist
//! after assembly. This crate detects and extracts them; resolution lives
//! in `weft-resolve`.

pub mod parser;
pub mod types;

pub use parser::ReferenceParser;
pub use types::Reference;
