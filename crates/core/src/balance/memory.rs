//! In-memory ledger used by the aggregator tests.

use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use quartermaster_shared::types::{EquipmentTypeId, TransactionId, UserId};

use super::query::QuantityQuery;
use super::store::LedgerStore;
use crate::ledger::{LedgerTransaction, Movement, Quantity, StoreError};

#[derive(Default)]
pub(crate) struct InMemoryLedger {
    pub(crate) records: Mutex<Vec<LedgerTransaction>>,
    pub(crate) unavailable: bool,
    pub(crate) queries: Mutex<usize>,
}

impl InMemoryLedger {
    pub(crate) fn push(
        &self,
        movement: Movement,
        equipment: EquipmentTypeId,
        quantity: i64,
        timestamp: DateTime<Utc>,
    ) {
        self.records.lock().unwrap().push(LedgerTransaction {
            id: TransactionId::new(),
            movement,
            equipment_type_id: equipment,
            quantity: Quantity::new(quantity).unwrap(),
            notes: None,
            timestamp,
            recorded_by: UserId::new(),
            created_at: timestamp,
        });
    }

    pub(crate) fn query_count(&self) -> usize {
        *self.queries.lock().unwrap()
    }
}

impl LedgerStore for InMemoryLedger {
    async fn sum_quantity(&self, query: &QuantityQuery) -> Result<i64, StoreError> {
        *self.queries.lock().unwrap() += 1;
        if self.unavailable {
            return Err(StoreError::new("ledger offline"));
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|tx| query.matches(tx))
            .map(|tx| i64::from(tx.quantity))
            .sum())
    }
}

/// Midnight UTC on the given day of 2024.
pub(crate) fn day(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, 0, 0, 0).unwrap()
}
