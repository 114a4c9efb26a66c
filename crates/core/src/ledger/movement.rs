//! Movement kinds and the per-kind shape of a ledger record.

use std::fmt;
use std::str::FromStr;

use quartermaster_shared::types::BaseId;
use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// The four ways stock moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum MovementKind {
    /// Stock enters a base from outside the system.
    Purchase,
    /// Stock moves from one base to another.
    Transfer,
    /// Stock is issued from a base to named personnel.
    Assignment,
    /// Stock is consumed at a base.
    Expenditure,
}

impl MovementKind {
    /// All kinds.
    pub const ALL: [Self; 4] = [
        Self::Purchase,
        Self::Transfer,
        Self::Assignment,
        Self::Expenditure,
    ];

    /// Kinds that add stock at their destination base.
    pub const INBOUND: [Self; 2] = [Self::Purchase, Self::Transfer];

    /// Kinds that remove stock from their source base.
    pub const OUTBOUND: [Self; 3] = [Self::Transfer, Self::Assignment, Self::Expenditure];

    /// Returns the wire name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Purchase => "PURCHASE",
            Self::Transfer => "TRANSFER",
            Self::Assignment => "ASSIGNMENT",
            Self::Expenditure => "EXPENDITURE",
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for MovementKind {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for MovementKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PURCHASE" => Ok(Self::Purchase),
            "TRANSFER" => Ok(Self::Transfer),
            "ASSIGNMENT" => Ok(Self::Assignment),
            "EXPENDITURE" => Ok(Self::Expenditure),
            _ => Err(LedgerError::UnknownKind(s.to_string())),
        }
    }
}

/// A validated movement: each kind carries exactly the fields it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Movement {
    /// Stock bought into `to_base`.
    Purchase {
        /// Receiving base.
        to_base: BaseId,
    },
    /// Stock moved between two distinct bases.
    Transfer {
        /// Sending base.
        from_base: BaseId,
        /// Receiving base.
        to_base: BaseId,
    },
    /// Stock issued to personnel.
    Assignment {
        /// Issuing base.
        from_base: BaseId,
        /// Name of the person receiving the stock.
        personnel: String,
    },
    /// Stock consumed at `from_base`.
    Expenditure {
        /// Consuming base.
        from_base: BaseId,
    },
}

impl Movement {
    /// Builds a movement from loosely-typed fields, rejecting any combination
    /// that does not fit `kind`.
    ///
    /// # Errors
    ///
    /// - `LedgerError::MissingField` when a field the kind needs is absent
    /// - `LedgerError::UnexpectedField` when a field the kind forbids is present
    /// - `LedgerError::SameBaseTransfer` when a transfer names one base twice
    /// - `LedgerError::BlankPersonnel` when an assignment names nobody
    pub fn from_parts(
        kind: MovementKind,
        from_base: Option<BaseId>,
        to_base: Option<BaseId>,
        personnel: Option<String>,
    ) -> Result<Self, LedgerError> {
        let personnel = personnel.map(|p| p.trim().to_string());

        match kind {
            MovementKind::Purchase => {
                forbid(kind, "from_base_id", from_base.is_some())?;
                forbid(kind, "assigned_to_personnel", is_named(personnel.as_deref()))?;
                Ok(Self::Purchase {
                    to_base: demand(kind, "to_base_id", to_base)?,
                })
            }
            MovementKind::Transfer => {
                forbid(kind, "assigned_to_personnel", is_named(personnel.as_deref()))?;
                let from_base = demand(kind, "from_base_id", from_base)?;
                let to_base = demand(kind, "to_base_id", to_base)?;
                if from_base == to_base {
                    return Err(LedgerError::SameBaseTransfer(from_base));
                }
                Ok(Self::Transfer { from_base, to_base })
            }
            MovementKind::Assignment => {
                forbid(kind, "to_base_id", to_base.is_some())?;
                let from_base = demand(kind, "from_base_id", from_base)?;
                let personnel = demand(kind, "assigned_to_personnel", personnel)?;
                if personnel.is_empty() {
                    return Err(LedgerError::BlankPersonnel);
                }
                Ok(Self::Assignment {
                    from_base,
                    personnel,
                })
            }
            MovementKind::Expenditure => {
                forbid(kind, "to_base_id", to_base.is_some())?;
                forbid(kind, "assigned_to_personnel", is_named(personnel.as_deref()))?;
                Ok(Self::Expenditure {
                    from_base: demand(kind, "from_base_id", from_base)?,
                })
            }
        }
    }

    /// Returns the kind of this movement.
    #[must_use]
    pub const fn kind(&self) -> MovementKind {
        match self {
            Self::Purchase { .. } => MovementKind::Purchase,
            Self::Transfer { .. } => MovementKind::Transfer,
            Self::Assignment { .. } => MovementKind::Assignment,
            Self::Expenditure { .. } => MovementKind::Expenditure,
        }
    }

    /// Base the stock leaves, if any.
    #[must_use]
    pub const fn source(&self) -> Option<BaseId> {
        match self {
            Self::Purchase { .. } => None,
            Self::Transfer { from_base, .. }
            | Self::Assignment { from_base, .. }
            | Self::Expenditure { from_base } => Some(*from_base),
        }
    }

    /// Base the stock arrives at, if any.
    #[must_use]
    pub const fn destination(&self) -> Option<BaseId> {
        match self {
            Self::Purchase { to_base } | Self::Transfer { to_base, .. } => Some(*to_base),
            Self::Assignment { .. } | Self::Expenditure { .. } => None,
        }
    }

    /// Personnel named by an assignment.
    #[must_use]
    pub fn personnel(&self) -> Option<&str> {
        match self {
            Self::Assignment { personnel, .. } => Some(personnel),
            _ => None,
        }
    }
}

fn is_named(personnel: Option<&str>) -> bool {
    personnel.is_some_and(|p| !p.is_empty())
}

fn demand<T>(kind: MovementKind, field: &'static str, value: Option<T>) -> Result<T, LedgerError> {
    value.ok_or(LedgerError::MissingField { kind, field })
}

fn forbid(kind: MovementKind, field: &'static str, present: bool) -> Result<(), LedgerError> {
    if present {
        Err(LedgerError::UnexpectedField { kind, field })
    } else {
        Ok(())
    }
}

/// A strictly positive stock count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantity(i32);

impl Quantity {
    /// Validates a raw quantity.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NonPositiveQuantity` for zero or negative input and
    /// `LedgerError::QuantityTooLarge` when the value does not fit the ledger column.
    pub fn new(raw: i64) -> Result<Self, LedgerError> {
        if raw <= 0 {
            return Err(LedgerError::NonPositiveQuantity(raw));
        }
        i32::try_from(raw)
            .map(Self)
            .map_err(|_| LedgerError::QuantityTooLarge(raw))
    }

    /// Returns the count.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<Quantity> for i64 {
    fn from(quantity: Quantity) -> Self {
        Self::from(quantity.0)
    }
}
