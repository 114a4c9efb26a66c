//! Access-filtered balance queries.

use std::sync::Arc;

use quartermaster_shared::types::{BaseId, EquipmentTypeId};
use serde::Deserialize;

use super::aggregator::{BalanceAggregator, BalanceQuery, BalanceSummary};
use super::error::BalanceError;
use super::store::LedgerStore;
use super::window::DateWindow;
use crate::access::{Caller, Operation, resolve_scope};

/// Raw dashboard parameters, as received from the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BalanceRequest {
    /// Window start, RFC 3339 or `YYYY-MM-DD`.
    #[serde(alias = "startDate")]
    pub start: Option<String>,
    /// Window end, RFC 3339 or `YYYY-MM-DD`.
    #[serde(alias = "endDate")]
    pub end: Option<String>,
    /// Requested base; ignored for commanders.
    #[serde(alias = "baseId")]
    pub base_id: Option<BaseId>,
    /// Optional equipment filter.
    #[serde(alias = "equipmentType")]
    pub equipment_type_id: Option<EquipmentTypeId>,
}

/// Balance summaries on behalf of a caller.
pub struct BalanceService<S: LedgerStore> {
    aggregator: BalanceAggregator<S>,
}

impl<S: LedgerStore> BalanceService<S> {
    /// Create a new balance service.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self {
            aggregator: BalanceAggregator::new(store),
        }
    }

    /// Compute the summary the caller is allowed to see.
    ///
    /// The scope is resolved before the window is parsed, so a denied caller
    /// is refused whatever parameters it sends and never reaches the store.
    ///
    /// # Errors
    ///
    /// Returns `AccessDenied`, `InvalidRange` or `StoreUnavailable`.
    pub async fn balances_for(
        &self,
        caller: &Caller,
        request: &BalanceRequest,
    ) -> Result<BalanceSummary, BalanceError> {
        let scope = resolve_scope(caller, Operation::ViewBalances, request.base_id)?;
        let window = DateWindow::parse(request.start.as_deref(), request.end.as_deref())?;

        self.aggregator
            .summarize(&BalanceQuery {
                window,
                scope,
                equipment_type_id: request.equipment_type_id,
            })
            .await
    }
}
