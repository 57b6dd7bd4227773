//! Foundation types for weft.
//!
//! This crate provides the identity and key types used throughout the weft
//! read-side reconstruction engine. Every other weft crate depends on
//! `weft-types`.
//!
//! # Key Types
//!
//! - [`StorageKey`] — Fixed-width (32-byte) ledger record identifier
//! - [`KeyFormat`] — Format hint for key encoding (`Raw` vs `FixedWidth`)
//! - [`OperatorId`] — Opaque identity of the account that wrote a record

pub mod error;
pub mod key;
pub mod operator;

pub use error::TypeError;
pub use key::{KeyFormat, StorageKey, KEY_WIDTH};
pub use operator::OperatorId;
