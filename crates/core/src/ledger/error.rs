//! Ledger error types for draft validation and persistence.

use quartermaster_shared::AppError;
use quartermaster_shared::types::{BaseId, EquipmentTypeId};
use thiserror::Error;

use super::movement::MovementKind;
use crate::access::AccessError;

/// The backing store could not answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ledger store unavailable: {0}")]
pub struct StoreError(pub String);

impl StoreError {
    /// Wraps any displayable backend failure.
    pub fn new(err: impl std::fmt::Display) -> Self {
        Self(err.to_string())
    }
}

/// Errors that can occur while recording a movement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// A field the movement kind needs was not supplied.
    #[error("{kind} requires {field}")]
    MissingField {
        /// Kind of the rejected draft.
        kind: MovementKind,
        /// Name of the missing field.
        field: &'static str,
    },

    /// A field the movement kind does not use was supplied.
    #[error("{kind} does not accept {field}")]
    UnexpectedField {
        /// Kind of the rejected draft.
        kind: MovementKind,
        /// Name of the offending field.
        field: &'static str,
    },

    /// Quantity must be at least one.
    #[error("quantity must be positive, got {0}")]
    NonPositiveQuantity(i64),

    /// Quantity does not fit the ledger.
    #[error("quantity {0} is too large")]
    QuantityTooLarge(i64),

    /// A transfer names the same base on both sides.
    #[error("transfer source and destination are both {0}")]
    SameBaseTransfer(BaseId),

    /// An assignment names no personnel.
    #[error("assigned_to_personnel must not be blank")]
    BlankPersonnel,

    /// Movement kind is not one of the four known kinds.
    #[error("unknown movement kind: {0}")]
    UnknownKind(String),

    // ========== Reference Errors ==========
    /// Referenced base does not exist.
    #[error("base not found: {0}")]
    UnknownBase(BaseId),

    /// Referenced equipment type does not exist.
    #[error("equipment type not found: {0}")]
    UnknownEquipmentType(EquipmentTypeId),

    // ========== Access Errors ==========
    /// Caller may not record this movement.
    #[error(transparent)]
    AccessDenied(#[from] AccessError),

    // ========== Store Errors ==========
    /// The store failed.
    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "MISSING_FIELD",
            Self::UnexpectedField { .. } => "UNEXPECTED_FIELD",
            Self::NonPositiveQuantity(_) => "NON_POSITIVE_QUANTITY",
            Self::QuantityTooLarge(_) => "QUANTITY_TOO_LARGE",
            Self::SameBaseTransfer(_) => "SAME_BASE_TRANSFER",
            Self::BlankPersonnel => "BLANK_PERSONNEL",
            Self::UnknownKind(_) => "UNKNOWN_KIND",
            Self::UnknownBase(_) => "UNKNOWN_BASE",
            Self::UnknownEquipmentType(_) => "UNKNOWN_EQUIPMENT_TYPE",
            Self::AccessDenied(err) => err.error_code(),
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation and reference errors
            Self::MissingField { .. }
            | Self::UnexpectedField { .. }
            | Self::NonPositiveQuantity(_)
            | Self::QuantityTooLarge(_)
            | Self::SameBaseTransfer(_)
            | Self::BlankPersonnel
            | Self::UnknownKind(_)
            | Self::UnknownBase(_)
            | Self::UnknownEquipmentType(_) => 400,

            // 403 Forbidden
            Self::AccessDenied(_) => 403,

            // 500 Internal Server Error
            Self::StoreUnavailable(_) => 500,
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::AccessDenied(access) => access.into(),
            LedgerError::StoreUnavailable(store) => Self::Database(store.to_string()),
            other => Self::Validation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{Operation, UserRole};

    #[test]
    fn test_error_codes() {
        assert_eq!(LedgerError::BlankPersonnel.error_code(), "BLANK_PERSONNEL");
        assert_eq!(
            LedgerError::SameBaseTransfer(BaseId::new()).error_code(),
            "SAME_BASE_TRANSFER"
        );
        assert_eq!(
            LedgerError::from(AccessError::MissingBase).error_code(),
            "MISSING_BASE_ASSIGNMENT"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(LedgerError::NonPositiveQuantity(0).http_status_code(), 400);
        assert_eq!(
            LedgerError::UnknownEquipmentType(EquipmentTypeId::new()).http_status_code(),
            400
        );
        assert_eq!(
            LedgerError::from(AccessError::denied(
                UserRole::Logistics,
                Operation::RecordMovement
            ))
            .http_status_code(),
            403
        );
        assert_eq!(
            LedgerError::from(StoreError::new("connection reset")).http_status_code(),
            500
        );
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = LedgerError::MissingField {
            kind: MovementKind::Transfer,
            field: "from_base_id",
        }
        .into();
        assert_eq!(app.status_code(), 400);
        assert!(app.to_string().contains("TRANSFER requires from_base_id"));

        let app: AppError = LedgerError::from(AccessError::OutsideBase(BaseId::new())).into();
        assert_eq!(app.status_code(), 403);

        let app: AppError = LedgerError::from(StoreError::new("timeout")).into();
        assert_eq!(app.error_code(), "DATABASE_ERROR");
    }
}
