//! Opening/closing balance reconstruction.

use std::sync::Arc;

use quartermaster_shared::types::EquipmentTypeId;
use serde::Serialize;

use super::error::BalanceError;
use super::query::{Leg, QuantityQuery, TimeRange};
use super::store::LedgerStore;
use super::window::DateWindow;
use crate::access::BaseScope;
use crate::ledger::MovementKind;

/// What to summarize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceQuery {
    /// Reporting window.
    pub window: DateWindow,
    /// Bases included.
    pub scope: BaseScope,
    /// Optional equipment filter.
    pub equipment_type_id: Option<EquipmentTypeId>,
}

/// Stock position over a window.
///
/// `closing_balance` always equals
/// `opening_balance + purchases + transfer_in - transfer_out`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BalanceSummary {
    /// Net stock before the window.
    pub opening_balance: i64,
    /// Purchased into scope during the window.
    pub purchases: i64,
    /// Transferred into scope during the window.
    pub transfer_in: i64,
    /// Transferred out of scope during the window.
    pub transfer_out: i64,
    /// Opening plus the window's net movement.
    pub closing_balance: i64,
}

impl BalanceSummary {
    /// Builds a summary, deriving the closing balance.
    #[must_use]
    pub const fn from_parts(
        opening_balance: i64,
        purchases: i64,
        transfer_in: i64,
        transfer_out: i64,
    ) -> Self {
        Self {
            opening_balance,
            purchases,
            transfer_in,
            transfer_out,
            closing_balance: opening_balance + purchases + transfer_in - transfer_out,
        }
    }
}

/// Computes balance summaries from ledger sums.
pub struct BalanceAggregator<S: LedgerStore> {
    store: Arc<S>,
}

impl<S: LedgerStore> BalanceAggregator<S> {
    /// Create a new aggregator.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Summarize stock for an already-scoped query.
    ///
    /// Runs five sums: inbound and outbound totals before the window, then
    /// purchases, transfers in and transfers out inside it.
    ///
    /// # Errors
    ///
    /// Returns `BalanceError::StoreUnavailable` if any sum fails.
    pub async fn summarize(&self, query: &BalanceQuery) -> Result<BalanceSummary, BalanceError> {
        let before = TimeRange::Before(query.window.start());
        let within = TimeRange::Within(query.window);

        let received_before = self.sum(query, &MovementKind::INBOUND, before, Leg::Inbound).await?;
        let issued_before = self.sum(query, &MovementKind::OUTBOUND, before, Leg::Outbound).await?;
        let purchases = self.sum(query, &[MovementKind::Purchase], within, Leg::Inbound).await?;
        let transfer_in = self.sum(query, &[MovementKind::Transfer], within, Leg::Inbound).await?;
        let transfer_out = self.sum(query, &[MovementKind::Transfer], within, Leg::Outbound).await?;

        Ok(BalanceSummary::from_parts(
            received_before - issued_before,
            purchases,
            transfer_in,
            transfer_out,
        ))
    }

    async fn sum(
        &self,
        query: &BalanceQuery,
        kinds: &'static [MovementKind],
        range: TimeRange,
        leg: Leg,
    ) -> Result<i64, BalanceError> {
        let quantity_query = QuantityQuery {
            kinds,
            range,
            leg,
            scope: query.scope,
            equipment_type_id: query.equipment_type_id,
        };
        Ok(self.store.sum_quantity(&quantity_query).await?)
    }
}
