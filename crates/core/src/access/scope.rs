//! Caller identity, base scoping and movement authorization.

use quartermaster_shared::types::{BaseId, UserId};
use serde::Serialize;

use super::error::AccessError;
use super::role::{Operation, UserRole};
use crate::ledger::Movement;

/// The authenticated principal behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Caller {
    /// User making the request.
    pub user_id: UserId,
    /// Role claimed in the access token.
    pub role: UserRole,
    /// Base assignment, meaningful for commanders only.
    pub base_id: Option<BaseId>,
}

impl Caller {
    /// Creates a caller.
    #[must_use]
    pub const fn new(user_id: UserId, role: UserRole, base_id: Option<BaseId>) -> Self {
        Self {
            user_id,
            role,
            base_id,
        }
    }

    /// Builds a caller from raw token claims.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::UnknownRole` if the role claim is not recognised.
    pub fn from_claims(
        user_id: impl Into<UserId>,
        role: &str,
        base_id: Option<impl Into<BaseId>>,
    ) -> Result<Self, AccessError> {
        Ok(Self::new(user_id.into(), role.parse()?, base_id.map(Into::into)))
    }

    /// Fails unless the caller's role allows `operation`.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::Denied` when the role lacks the capability.
    pub const fn require(&self, operation: Operation) -> Result<(), AccessError> {
        if self.role.allows(operation) {
            Ok(())
        } else {
            Err(AccessError::denied(self.role, operation))
        }
    }
}

/// The set of bases a permitted read may cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseScope {
    /// Every base.
    All,
    /// Exactly one base.
    Base(BaseId),
}

impl BaseScope {
    /// Returns true if `base` lies within the scope.
    #[must_use]
    pub fn includes(&self, base: BaseId) -> bool {
        match self {
            Self::All => true,
            Self::Base(id) => *id == base,
        }
    }

    /// Returns true if a record with the given source and destination
    /// involves a base in scope on either side.
    #[must_use]
    pub fn touches(&self, from: Option<BaseId>, to: Option<BaseId>) -> bool {
        match self {
            Self::All => true,
            Self::Base(id) => from == Some(*id) || to == Some(*id),
        }
    }

    /// Returns the single base of a restricted scope.
    #[must_use]
    pub const fn base_id(&self) -> Option<BaseId> {
        match self {
            Self::All => None,
            Self::Base(id) => Some(*id),
        }
    }
}

/// Resolves which bases a read operation may cover.
///
/// Admins get the requested base, or everything when none is requested.
/// Commanders are pinned to their own base whatever they ask for.
///
/// # Errors
///
/// - `AccessError::Denied` if the role may not perform `operation`
/// - `AccessError::MissingBase` for a commander without a base assignment
pub fn resolve_scope(
    caller: &Caller,
    operation: Operation,
    requested: Option<BaseId>,
) -> Result<BaseScope, AccessError> {
    caller.require(operation)?;

    match caller.role {
        UserRole::Admin => Ok(requested.map_or(BaseScope::All, BaseScope::Base)),
        UserRole::Commander => caller
            .base_id
            .map(BaseScope::Base)
            .ok_or(AccessError::MissingBase),
        UserRole::Logistics => Err(AccessError::denied(caller.role, operation)),
    }
}

/// Checks that the caller may record `movement`.
///
/// A commander may only bring stock into their own base by purchase, and may
/// only move stock out of their own base by transfer, assignment or expenditure.
///
/// # Errors
///
/// - `AccessError::Denied` if the role may not record movements
/// - `AccessError::MissingBase` for a commander without a base assignment
/// - `AccessError::OutsideBase` if the movement acts on another base
pub fn authorize_movement(caller: &Caller, movement: &Movement) -> Result<(), AccessError> {
    caller.require(Operation::RecordMovement)?;

    match caller.role {
        UserRole::Admin => Ok(()),
        UserRole::Commander => {
            let own = caller.base_id.ok_or(AccessError::MissingBase)?;
            let acted_on = match movement {
                Movement::Purchase { to_base } => *to_base,
                Movement::Transfer { from_base, .. }
                | Movement::Assignment { from_base, .. }
                | Movement::Expenditure { from_base } => *from_base,
            };
            if acted_on == own {
                Ok(())
            } else {
                Err(AccessError::OutsideBase(acted_on))
            }
        }
        UserRole::Logistics => Err(AccessError::denied(caller.role, Operation::RecordMovement)),
    }
}
