//! Append-only movement ledger.
//!
//! This module implements:
//! - Movement kinds and their per-kind record shape
//! - Draft validation into ledger records
//! - The write-side store trait and the recording service
//! - Error types for ledger operations

pub mod error;
pub mod movement;
pub mod service;
pub mod transaction;

#[cfg(test)]
mod validation_props;

pub use error::{LedgerError, StoreError};
pub use movement::{Movement, MovementKind, Quantity};
pub use service::{LedgerService, LedgerWriter};
pub use transaction::{LedgerTransaction, NewTransaction, TransactionDraft};
