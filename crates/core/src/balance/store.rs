//! Read side of the ledger.

use std::future::Future;

use super::query::QuantityQuery;
use crate::ledger::StoreError;

/// Ledger store interface consumed by the aggregator.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait LedgerStore: Send + Sync {
    /// Sum `quantity` over matching records. An empty match sums to zero.
    fn sum_quantity(
        &self,
        query: &QuantityQuery,
    ) -> impl Future<Output = Result<i64, StoreError>> + Send;
}
