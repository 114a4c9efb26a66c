//! Ledger service: validates, authorizes and appends movements.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use quartermaster_shared::types::{BaseId, EquipmentTypeId};

use super::error::{LedgerError, StoreError};
use super::transaction::{LedgerTransaction, NewTransaction, TransactionDraft};
use crate::access::{Caller, Operation, authorize_movement};

/// Write side of the ledger.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait LedgerWriter: Send + Sync {
    /// Check if a base exists.
    fn base_exists(&self, id: BaseId) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Check if an equipment type exists.
    fn equipment_type_exists(
        &self,
        id: EquipmentTypeId,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Append a validated movement. Records are never updated afterwards.
    fn append(
        &self,
        tx: NewTransaction,
    ) -> impl Future<Output = Result<LedgerTransaction, StoreError>> + Send;
}

/// Records movements on behalf of a caller.
pub struct LedgerService<W: LedgerWriter> {
    writer: Arc<W>,
}

impl<W: LedgerWriter> LedgerService<W> {
    /// Create a new ledger service.
    #[must_use]
    pub const fn new(writer: Arc<W>) -> Self {
        Self { writer }
    }

    /// Validate and append a movement.
    ///
    /// Checks run in this order: role capability, draft shape, per-base
    /// authorization, then existence of every referenced base and the
    /// equipment type.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The caller may not record movements, or not at the bases involved
    /// - The draft does not fit its kind
    /// - A referenced base or equipment type does not exist
    /// - The store fails
    pub async fn record(
        &self,
        caller: &Caller,
        draft: TransactionDraft,
        now: DateTime<Utc>,
    ) -> Result<LedgerTransaction, LedgerError> {
        caller.require(Operation::RecordMovement)?;

        let tx = NewTransaction::from_draft(draft, caller.user_id, now)?;
        authorize_movement(caller, &tx.movement)?;

        for base in tx.referenced_bases() {
            if !self.writer.base_exists(base).await? {
                return Err(LedgerError::UnknownBase(base));
            }
        }
        if !self.writer.equipment_type_exists(tx.equipment_type_id).await? {
            return Err(LedgerError::UnknownEquipmentType(tx.equipment_type_id));
        }

        Ok(self.writer.append(tx).await?)
    }
}
