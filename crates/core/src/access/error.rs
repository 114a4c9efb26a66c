//! Access filter errors.

use quartermaster_shared::AppError;
use quartermaster_shared::types::BaseId;
use thiserror::Error;

use super::role::{Operation, UserRole};

/// Reasons a caller is refused access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The caller's role does not grant the operation.
    #[error("role '{role}' may not {operation}")]
    Denied {
        /// Role of the caller.
        role: UserRole,
        /// Operation that was attempted.
        operation: Operation,
    },

    /// A commander account has no base assignment.
    #[error("commander account has no base assigned")]
    MissingBase,

    /// The operation touches a base outside the caller's command.
    #[error("base {0} is outside the caller's command")]
    OutsideBase(BaseId),

    /// The role claim is not one of the known roles.
    #[error("unknown role: {0}")]
    UnknownRole(String),
}

impl AccessError {
    /// Creates a role denial.
    #[must_use]
    pub const fn denied(role: UserRole, operation: Operation) -> Self {
        Self::Denied { role, operation }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Denied { .. } => "ACCESS_DENIED",
            Self::MissingBase => "MISSING_BASE_ASSIGNMENT",
            Self::OutsideBase(_) => "OUTSIDE_BASE",
            Self::UnknownRole(_) => "UNKNOWN_ROLE",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        403
    }
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        Self::Forbidden(err.to_string())
    }
}
