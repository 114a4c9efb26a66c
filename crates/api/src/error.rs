//! The JSON error envelope shared by every handler.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use quartermaster_core::access::AccessError;
use quartermaster_core::balance::BalanceError;
use quartermaster_core::ledger::LedgerError;
use quartermaster_db::repositories::{TransactionError, UserError};
use quartermaster_shared::AppError;
use sea_orm::DbErr;
use serde_json::json;

/// Handler error, rendered as `{ "error": CODE, "message": text }`.
///
/// Domain errors keep their own code and status, so a denied dashboard call
/// reports `ACCESS_DENIED` rather than the generic `FORBIDDEN`.
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    code: &'static str,
    status: u16,
}

impl ApiError {
    /// Wraps an application error under a domain-specific code and status.
    #[must_use]
    pub const fn with_code(error: AppError, code: &'static str, status: u16) -> Self {
        Self {
            error,
            code,
            status,
        }
    }

    /// Shorthand for a 404 naming the missing resource.
    #[must_use]
    pub fn not_found(what: &str) -> Self {
        AppError::NotFound(format!("{what} not found")).into()
    }

    /// Shorthand for a 400 validation failure.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into()).into()
    }

    /// Code sent to the client.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if self.error.is_server_error() {
            tracing::error!(error = %self.error, code = self.code, "request failed");
            "An internal error occurred".to_string()
        } else {
            match &self.error {
                AppError::Unauthorized(m)
                | AppError::Forbidden(m)
                | AppError::NotFound(m)
                | AppError::Validation(m)
                | AppError::InvalidRange(m)
                | AppError::Conflict(m)
                | AppError::Database(m)
                | AppError::Internal(m) => m.clone(),
            }
        };

        (
            status,
            Json(json!({
                "error": self.code,
                "message": message
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        let (code, status) = (error.error_code(), error.status_code());
        Self::with_code(error, code, status)
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        let (code, status) = (err.error_code(), err.http_status_code());
        Self::with_code(err.into(), code, status)
    }
}

impl From<BalanceError> for ApiError {
    fn from(err: BalanceError) -> Self {
        let (code, status) = (err.error_code(), err.http_status_code());
        Self::with_code(err.into(), code, status)
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        let (code, status) = (err.error_code(), err.http_status_code());
        Self::with_code(err.into(), code, status)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        AppError::Database(err.to_string()).into()
    }
}

impl From<TransactionError> for ApiError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::Corrupt { .. } => AppError::Internal(err.to_string()).into(),
            TransactionError::Database(db) => db.into(),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UsernameTaken(_) => AppError::Conflict(err.to_string()).into(),
            UserError::Database(db) => db.into(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}
