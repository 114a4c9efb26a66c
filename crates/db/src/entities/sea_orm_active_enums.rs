//! Database enums and their mapping to the domain enums.

use quartermaster_core::access::UserRole as DomainRole;
use quartermaster_core::ledger::MovementKind;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stored form of a movement kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TransactionKind {
    /// Stock bought into a base.
    #[sea_orm(string_value = "PURCHASE")]
    Purchase,
    /// Stock moved between bases.
    #[sea_orm(string_value = "TRANSFER")]
    Transfer,
    /// Stock issued to personnel.
    #[sea_orm(string_value = "ASSIGNMENT")]
    Assignment,
    /// Stock consumed.
    #[sea_orm(string_value = "EXPENDITURE")]
    Expenditure,
}

impl From<MovementKind> for TransactionKind {
    fn from(kind: MovementKind) -> Self {
        match kind {
            MovementKind::Purchase => Self::Purchase,
            MovementKind::Transfer => Self::Transfer,
            MovementKind::Assignment => Self::Assignment,
            MovementKind::Expenditure => Self::Expenditure,
        }
    }
}

impl From<TransactionKind> for MovementKind {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Purchase => Self::Purchase,
            TransactionKind::Transfer => Self::Transfer,
            TransactionKind::Assignment => Self::Assignment,
            TransactionKind::Expenditure => Self::Expenditure,
        }
    }
}

/// Stored form of a user role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum UserRole {
    /// Administrator.
    #[sea_orm(string_value = "admin")]
    Admin,
    /// Base commander.
    #[sea_orm(string_value = "commander")]
    Commander,
    /// Logistics officer.
    #[sea_orm(string_value = "logistics")]
    Logistics,
}

impl From<DomainRole> for UserRole {
    fn from(role: DomainRole) -> Self {
        match role {
            DomainRole::Admin => Self::Admin,
            DomainRole::Commander => Self::Commander,
            DomainRole::Logistics => Self::Logistics,
        }
    }
}

impl From<UserRole> for DomainRole {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Admin => Self::Admin,
            UserRole::Commander => Self::Commander,
            UserRole::Logistics => Self::Logistics,
        }
    }
}
