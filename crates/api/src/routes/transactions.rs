//! Ledger transaction routes.
//!
//! The ledger is append-only: there is no update or delete route.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, Utc};
use quartermaster_core::access::{Operation, resolve_scope};
use quartermaster_core::ledger::{LedgerService, MovementKind, TransactionDraft};
use quartermaster_db::TransactionRepository;
use quartermaster_db::repositories::{TransactionFilter, TransactionRecord};
use quartermaster_shared::AppError;
use quartermaster_shared::types::{
    BaseId, EquipmentTypeId, PageRequest, PageResponse, TransactionId, UserId,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route("/transactions/{transaction_id}", get(get_transaction))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing transactions.
#[derive(Debug, Default, Deserialize)]
pub struct ListTransactionsQuery {
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size (default: 20, max: 100).
    pub per_page: Option<u32>,
    /// Filter by movement kind.
    #[serde(alias = "type")]
    pub kind: Option<String>,
    /// Filter by equipment type.
    pub equipment_type_id: Option<EquipmentTypeId>,
    /// Narrow to one base; ignored for commanders.
    pub base_id: Option<BaseId>,
}

/// Response for a ledger transaction.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: TransactionId,
    /// Movement kind.
    pub kind: MovementKind,
    /// Equipment type ID.
    pub equipment_type_id: EquipmentTypeId,
    /// Equipment type name.
    pub equipment_type_name: Option<String>,
    /// Number of units.
    pub quantity: i32,
    /// Sending base.
    pub from_base_id: Option<BaseId>,
    /// Sending base name.
    pub from_base_name: Option<String>,
    /// Receiving base.
    pub to_base_id: Option<BaseId>,
    /// Receiving base name.
    pub to_base_name: Option<String>,
    /// Recipient of an assignment.
    pub assigned_to_personnel: Option<String>,
    /// Free text.
    pub notes: Option<String>,
    /// When the movement happened.
    pub timestamp: DateTime<Utc>,
    /// User who recorded it.
    pub recorded_by: UserId,
    /// Username of the recorder.
    pub recorded_by_username: Option<String>,
    /// Created at timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<TransactionRecord> for TransactionResponse {
    fn from(record: TransactionRecord) -> Self {
        let tx = record.transaction;
        Self {
            id: tx.id,
            kind: tx.kind(),
            equipment_type_id: tx.equipment_type_id,
            equipment_type_name: record.equipment_type_name,
            quantity: tx.quantity.get(),
            from_base_id: tx.movement.source(),
            from_base_name: record.from_base_name,
            to_base_id: tx.movement.destination(),
            to_base_name: record.to_base_name,
            assigned_to_personnel: tx.movement.personnel().map(ToString::to_string),
            notes: tx.notes,
            timestamp: tx.timestamp,
            recorded_by: tx.recorded_by,
            recorded_by_username: record.recorded_by_username,
            created_at: tx.created_at,
        }
    }
}

fn parse_kind(raw: &str) -> Result<MovementKind, ApiError> {
    raw.parse::<MovementKind>().map_err(ApiError::from)
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/transactions` - Movements touching the caller's scope, newest first.
///
/// Access is checked before the query string is looked at.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<ListTransactionsQuery>, QueryRejection>,
) -> Result<Json<PageResponse<TransactionResponse>>, ApiError> {
    let caller = auth.caller()?;
    resolve_scope(&caller, Operation::ViewLedger, None)?;

    let Query(query) = query?;
    let scope = resolve_scope(&caller, Operation::ViewLedger, query.base_id)?;

    let filter = TransactionFilter {
        kind: query.kind.as_deref().map(parse_kind).transpose()?,
        equipment_type_id: query.equipment_type_id,
    };
    let page = PageRequest::from_query(query.page, query.per_page);

    let records = TransactionRepository::new((*state.db).clone())
        .list(scope, filter, page)
        .await?;

    Ok(Json(records.map(TransactionResponse::from)))
}

/// GET `/transactions/{transaction_id}` - Movements outside the scope are reported as missing.
async fn get_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let scope = resolve_scope(&auth.caller()?, Operation::ViewLedger, None)?;

    TransactionRepository::new((*state.db).clone())
        .find(transaction_id, scope)
        .await?
        .map(|record| Json(record.into()))
        .ok_or_else(|| ApiError::not_found("Transaction"))
}

/// POST `/transactions` - Record a movement.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<TransactionDraft>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = auth.caller()?;
    caller.require(Operation::RecordMovement)?;

    let Json(draft) = payload?;

    let repo = Arc::new(TransactionRepository::new((*state.db).clone()));
    let recorded = LedgerService::new(Arc::clone(&repo))
        .record(&caller, draft, Utc::now())
        .await?;

    info!(
        transaction_id = %recorded.id,
        kind = %recorded.kind(),
        user_id = %caller.user_id,
        "Movement recorded"
    );

    let record = repo
        .find(recorded.id, resolve_scope(&caller, Operation::ViewLedger, None)?)
        .await?
        .ok_or_else(|| {
            ApiError::from(AppError::Internal(format!(
                "Transaction {} vanished after insert",
                recorded.id
            )))
        })?;

    Ok((StatusCode::CREATED, Json(TransactionResponse::from(record))))
}
