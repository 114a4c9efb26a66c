//! Transaction repository for the append-only movement ledger.
//!
//! Implements both sides of the ledger seam from the core crate:
//! `LedgerStore` (scoped quantity sums) and `LedgerWriter` (validated appends).

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use quartermaster_core::access::BaseScope;
use quartermaster_core::balance::{Leg, LedgerStore, QuantityQuery, TimeRange};
use quartermaster_core::ledger::{
    LedgerTransaction, LedgerWriter, Movement, MovementKind, NewTransaction, Quantity, StoreError,
};
use quartermaster_shared::types::{
    BaseId, EquipmentTypeId, PageRequest, PageResponse, TransactionId, UserId,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::TransactionKind;
use crate::entities::{bases, equipment_types, transactions, users};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// A stored row does not describe a valid movement.
    #[error("Transaction {id} is corrupt: {reason}")]
    Corrupt {
        /// Row ID.
        id: Uuid,
        /// What failed to validate.
        reason: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Optional filters for listing transactions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionFilter {
    /// Only this kind.
    pub kind: Option<MovementKind>,
    /// Only this equipment type.
    pub equipment_type_id: Option<EquipmentTypeId>,
}

/// A ledger transaction with the names of everything it references.
#[derive(Debug, Clone)]
pub struct TransactionRecord {
    /// The ledger entry.
    pub transaction: LedgerTransaction,
    /// Equipment type name.
    pub equipment_type_name: Option<String>,
    /// Source base name.
    pub from_base_name: Option<String>,
    /// Destination base name.
    pub to_base_name: Option<String>,
    /// Username of the recorder.
    pub recorded_by_username: Option<String>,
}

/// Transaction repository. Exposes no update or delete.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists transactions touching the scope, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a row is corrupt.
    pub async fn list(
        &self,
        scope: BaseScope,
        filter: TransactionFilter,
        page: PageRequest,
    ) -> Result<PageResponse<TransactionRecord>, TransactionError> {
        let mut query = scoped(transactions::Entity::find(), scope);

        if let Some(kind) = filter.kind {
            query = query.filter(transactions::Column::Kind.eq(TransactionKind::from(kind)));
        }
        if let Some(equipment) = filter.equipment_type_id {
            query = query.filter(transactions::Column::EquipmentTypeId.eq(equipment.into_inner()));
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(transactions::Column::Timestamp)
            .order_by_desc(transactions::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        let records = self.hydrate(rows).await?;
        Ok(PageResponse::new(records, page, total))
    }

    /// Finds a transaction by ID. Rows outside the scope are reported as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the row is corrupt.
    pub async fn find(
        &self,
        id: TransactionId,
        scope: BaseScope,
    ) -> Result<Option<TransactionRecord>, TransactionError> {
        let row = scoped(transactions::Entity::find_by_id(id.into_inner()), scope)
            .one(&self.db)
            .await?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Sums `quantity` over the rows matching a balance query.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn sum(&self, query: &QuantityQuery) -> Result<i64, DbErr> {
        let leg_column = match query.leg {
            Leg::Inbound => transactions::Column::ToBaseId,
            Leg::Outbound => transactions::Column::FromBaseId,
        };

        let mut select = transactions::Entity::find()
            .select_only()
            .column_as(Expr::col(transactions::Column::Quantity).sum(), "total")
            .filter(
                transactions::Column::Kind
                    .is_in(query.kinds.iter().copied().map(TransactionKind::from)),
            );

        select = match query.range {
            TimeRange::Before(instant) => {
                select.filter(transactions::Column::Timestamp.lt(instant))
            }
            TimeRange::Within(window) => select
                .filter(transactions::Column::Timestamp.gte(window.start()))
                .filter(transactions::Column::Timestamp.lt(window.end())),
        };

        select = match query.scope {
            BaseScope::All => select.filter(leg_column.is_not_null()),
            BaseScope::Base(base) => select.filter(leg_column.eq(base.into_inner())),
        };

        if let Some(equipment) = query.equipment_type_id {
            select =
                select.filter(transactions::Column::EquipmentTypeId.eq(equipment.into_inner()));
        }

        // SUM over no rows is NULL.
        let total: Option<Option<i64>> = select.into_tuple().one(&self.db).await?;
        Ok(total.flatten().unwrap_or(0))
    }

    /// Inserts a validated movement.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn insert(&self, tx: NewTransaction) -> Result<LedgerTransaction, DbErr> {
        let id = TransactionId::new();
        let created_at = Utc::now();

        let row = transactions::ActiveModel {
            id: Set(id.into_inner()),
            kind: Set(tx.movement.kind().into()),
            equipment_type_id: Set(tx.equipment_type_id.into_inner()),
            quantity: Set(tx.quantity.get()),
            from_base_id: Set(tx.movement.source().map(BaseId::into_inner)),
            to_base_id: Set(tx.movement.destination().map(BaseId::into_inner)),
            assigned_to_personnel: Set(tx.movement.personnel().map(ToString::to_string)),
            notes: Set(tx.notes.clone()),
            timestamp: Set(tx.timestamp),
            recorded_by: Set(tx.recorded_by.into_inner()),
            created_at: Set(created_at),
        };
        row.insert(&self.db).await?;

        tracing::info!(
            transaction_id = %id,
            kind = %tx.movement.kind(),
            quantity = tx.quantity.get(),
            "ledger transaction recorded"
        );
        Ok(LedgerTransaction::from_new(id, tx, created_at))
    }

    /// Attaches referenced names, three lookups per batch.
    async fn hydrate(
        &self,
        rows: Vec<transactions::Model>,
    ) -> Result<Vec<TransactionRecord>, TransactionError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let equipment_ids: HashSet<Uuid> = rows.iter().map(|r| r.equipment_type_id).collect();
        let base_ids: HashSet<Uuid> = rows
            .iter()
            .flat_map(|r| r.from_base_id.into_iter().chain(r.to_base_id))
            .collect();
        let user_ids: HashSet<Uuid> = rows.iter().map(|r| r.recorded_by).collect();

        let equipment_names: HashMap<Uuid, String> = equipment_types::Entity::find()
            .filter(equipment_types::Column::Id.is_in(equipment_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|e| (e.id, e.name))
            .collect();
        let base_names: HashMap<Uuid, String> = bases::Entity::find()
            .filter(bases::Column::Id.is_in(base_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|b| (b.id, b.name))
            .collect();
        let usernames: HashMap<Uuid, String> = users::Entity::find()
            .filter(users::Column::Id.is_in(user_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        rows.into_iter()
            .map(|row| {
                let equipment_type_name = equipment_names.get(&row.equipment_type_id).cloned();
                let from_base_name = row.from_base_id.and_then(|id| base_names.get(&id).cloned());
                let to_base_name = row.to_base_id.and_then(|id| base_names.get(&id).cloned());
                let recorded_by_username = usernames.get(&row.recorded_by).cloned();
                Ok(TransactionRecord {
                    transaction: into_ledger(row)?,
                    equipment_type_name,
                    from_base_name,
                    to_base_name,
                    recorded_by_username,
                })
            })
            .collect()
    }
}

/// Restricts a select to rows with either leg in scope.
fn scoped(select: Select<transactions::Entity>, scope: BaseScope) -> Select<transactions::Entity> {
    match scope {
        BaseScope::All => select,
        BaseScope::Base(base) => select.filter(
            Condition::any()
                .add(transactions::Column::FromBaseId.eq(base.into_inner()))
                .add(transactions::Column::ToBaseId.eq(base.into_inner())),
        ),
    }
}

/// Re-validates a stored row into a ledger transaction.
fn into_ledger(row: transactions::Model) -> Result<LedgerTransaction, TransactionError> {
    let id = row.id;
    let corrupt = |reason: String| TransactionError::Corrupt { id, reason };

    let movement = Movement::from_parts(
        row.kind.into(),
        row.from_base_id.map(BaseId::from_uuid),
        row.to_base_id.map(BaseId::from_uuid),
        row.assigned_to_personnel,
    )
    .map_err(|e| corrupt(e.to_string()))?;
    let quantity = Quantity::new(i64::from(row.quantity)).map_err(|e| corrupt(e.to_string()))?;

    Ok(LedgerTransaction {
        id: TransactionId::from_uuid(row.id),
        movement,
        equipment_type_id: EquipmentTypeId::from_uuid(row.equipment_type_id),
        quantity,
        notes: row.notes,
        timestamp: row.timestamp,
        recorded_by: UserId::from_uuid(row.recorded_by),
        created_at: row.created_at,
    })
}

impl LedgerStore for TransactionRepository {
    async fn sum_quantity(&self, query: &QuantityQuery) -> Result<i64, StoreError> {
        self.sum(query).await.map_err(|err| {
            tracing::error!(error = %err, leg = ?query.leg, "ledger sum failed");
            StoreError::new(err)
        })
    }
}

impl LedgerWriter for TransactionRepository {
    async fn base_exists(&self, id: BaseId) -> Result<bool, StoreError> {
        bases::Entity::find_by_id(id.into_inner())
            .count(&self.db)
            .await
            .map(|count| count > 0)
            .map_err(StoreError::new)
    }

    async fn equipment_type_exists(&self, id: EquipmentTypeId) -> Result<bool, StoreError> {
        equipment_types::Entity::find_by_id(id.into_inner())
            .count(&self.db)
            .await
            .map(|count| count > 0)
            .map_err(StoreError::new)
    }

    async fn append(&self, tx: NewTransaction) -> Result<LedgerTransaction, StoreError> {
        self.insert(tx).await.map_err(|err| {
            tracing::error!(error = %err, "ledger append failed");
            StoreError::new(err)
        })
    }
}
