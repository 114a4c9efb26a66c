//! The single query shape the aggregator sends to the ledger store.

use chrono::{DateTime, Utc};
use quartermaster_shared::types::{BaseId, EquipmentTypeId};

use super::window::DateWindow;
use crate::access::BaseScope;
use crate::ledger::{LedgerTransaction, Movement, MovementKind};

/// Which timestamps a sum covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    /// Everything strictly before the instant.
    Before(DateTime<Utc>),
    /// Everything inside the window.
    Within(DateWindow),
}

impl TimeRange {
    /// Returns true if `ts` falls in the range.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        match self {
            Self::Before(instant) => ts < *instant,
            Self::Within(window) => window.contains(ts),
        }
    }
}

/// Side of a movement a sum is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    /// The destination base (`to_base_id`).
    Inbound,
    /// The source base (`from_base_id`).
    Outbound,
}

impl Leg {
    /// Base on this side of `movement`, if it has one.
    #[must_use]
    pub const fn base_of(self, movement: &Movement) -> Option<BaseId> {
        match self {
            Self::Inbound => movement.destination(),
            Self::Outbound => movement.source(),
        }
    }
}

/// Sum of `quantity` over the ledger records matching every criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityQuery {
    /// Movement kinds to include.
    pub kinds: &'static [MovementKind],
    /// Timestamp filter.
    pub range: TimeRange,
    /// Leg the scope is checked against.
    pub leg: Leg,
    /// Bases whose leg counts.
    pub scope: BaseScope,
    /// Optional equipment filter.
    pub equipment_type_id: Option<EquipmentTypeId>,
}

impl QuantityQuery {
    /// Returns true if `tx` contributes to this sum.
    #[must_use]
    pub fn matches(&self, tx: &LedgerTransaction) -> bool {
        self.kinds.contains(&tx.kind())
            && self.range.contains(tx.timestamp)
            && self
                .equipment_type_id
                .is_none_or(|id| id == tx.equipment_type_id)
            && self
                .leg
                .base_of(&tx.movement)
                .is_some_and(|base| self.scope.includes(base))
    }
}
