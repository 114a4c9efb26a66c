//! User roles and the operations they unlock.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::AccessError;

/// Roles a user may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Sees and records everything, manages the catalog and user accounts.
    Admin,
    /// Sees and records movements of exactly one base.
    Commander,
    /// Authenticated, but holds no inventory read or write capability.
    Logistics,
}

/// Operations gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Read the dashboard balance summary.
    ViewBalances,
    /// List or fetch ledger transactions.
    ViewLedger,
    /// Append a transaction to the ledger.
    RecordMovement,
    /// Read bases and equipment types.
    ViewCatalog,
    /// Create bases and equipment types.
    ManageCatalog,
    /// Create user accounts.
    ManageUsers,
}

impl UserRole {
    /// All roles, in privilege order.
    pub const ALL: [Self; 3] = [Self::Admin, Self::Commander, Self::Logistics];

    /// Returns true if this role can read balance summaries.
    #[must_use]
    pub const fn can_view_balances(&self) -> bool {
        matches!(self, Self::Admin | Self::Commander)
    }

    /// Returns true if this role can read ledger transactions.
    #[must_use]
    pub const fn can_view_ledger(&self) -> bool {
        matches!(self, Self::Admin | Self::Commander)
    }

    /// Returns true if this role can record movements.
    #[must_use]
    pub const fn can_record_movements(&self) -> bool {
        matches!(self, Self::Admin | Self::Commander)
    }

    /// Returns true if this role can read bases and equipment types.
    #[must_use]
    pub const fn can_view_catalog(&self) -> bool {
        matches!(self, Self::Admin | Self::Commander)
    }

    /// Returns true if this role can create bases and equipment types.
    #[must_use]
    pub const fn can_manage_catalog(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns true if this role can manage users.
    #[must_use]
    pub const fn can_manage_users(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns true if this role is allowed to perform `operation`.
    #[must_use]
    pub const fn allows(&self, operation: Operation) -> bool {
        match operation {
            Operation::ViewBalances => self.can_view_balances(),
            Operation::ViewLedger => self.can_view_ledger(),
            Operation::RecordMovement => self.can_record_movements(),
            Operation::ViewCatalog => self.can_view_catalog(),
            Operation::ManageCatalog => self.can_manage_catalog(),
            Operation::ManageUsers => self.can_manage_users(),
        }
    }

    /// Returns the wire representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Commander => "commander",
            Self::Logistics => "logistics",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "commander" => Ok(Self::Commander),
            "logistics" => Ok(Self::Logistics),
            _ => Err(AccessError::UnknownRole(s.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ViewBalances => "view balances",
            Self::ViewLedger => "view the ledger",
            Self::RecordMovement => "record movements",
            Self::ViewCatalog => "view the catalog",
            Self::ManageCatalog => "manage the catalog",
            Self::ManageUsers => "manage users",
        };
        f.write_str(label)
    }
}
