//! Dashboard routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use quartermaster_core::access::{Operation, resolve_scope};
use quartermaster_core::balance::{BalanceRequest, BalanceService, BalanceSummary};
use quartermaster_db::TransactionRepository;

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the dashboard routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard/metrics", get(get_dashboard_metrics))
}

/// GET `/dashboard/metrics` - Opening, movement and closing balances for a window.
///
/// Query: `start`, `end` (RFC 3339 or `YYYY-MM-DD`), optional `base_id` and
/// `equipment_type_id`. A caller without balance access is refused whatever
/// the query string holds, malformed or not.
async fn get_dashboard_metrics(
    State(state): State<AppState>,
    auth: AuthUser,
    request: Result<Query<BalanceRequest>, QueryRejection>,
) -> Result<Json<BalanceSummary>, ApiError> {
    let caller = auth.caller()?;
    resolve_scope(&caller, Operation::ViewBalances, None)?;

    let Query(request) = request?;
    let store = Arc::new(TransactionRepository::new((*state.db).clone()));

    let summary = BalanceService::new(store)
        .balances_for(&caller, &request)
        .await?;

    tracing::debug!(
        user_id = %caller.user_id,
        closing_balance = summary.closing_balance,
        "Dashboard metrics computed"
    );

    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use chrono::{DateTime, TimeZone, Utc};
    use quartermaster_core::access::{Caller, UserRole};
    use quartermaster_core::ledger::{LedgerService, MovementKind, TransactionDraft};
    use quartermaster_db::TransactionRepository;
    use quartermaster_shared::types::BaseId;

    use crate::test_support::TestApp;

    fn at(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, month, day, 12, 0, 0).unwrap()
    }

    /// Purchases 100 into North before the window, then inside March:
    /// purchases 5+3+2 into North, transfer 7 North to South, expend 4 at North.
    async fn seed(app: &TestApp) {
        let service = LedgerService::new(Arc::new(TransactionRepository::new(
            (*app.state.db).clone(),
        )));
        let admin = Caller::new(app.admin_id, UserRole::Admin, None);

        let movements: [(MovementKind, i64, Option<BaseId>, Option<BaseId>, DateTime<Utc>); 6] = [
            (MovementKind::Purchase, 100, None, Some(app.north), at(2, 1)),
            (MovementKind::Purchase, 5, None, Some(app.north), at(3, 2)),
            (MovementKind::Purchase, 3, None, Some(app.north), at(3, 5)),
            (MovementKind::Purchase, 2, None, Some(app.north), at(3, 9)),
            (MovementKind::Transfer, 7, Some(app.north), Some(app.south), at(3, 10)),
            (MovementKind::Expenditure, 4, Some(app.north), None, at(3, 12)),
        ];

        for (kind, quantity, from, to, timestamp) in movements {
            service
                .record(
                    &admin,
                    TransactionDraft {
                        kind,
                        equipment_type_id: app.rifles,
                        quantity,
                        from_base_id: from,
                        to_base_id: to,
                        assigned_to_personnel: None,
                        notes: None,
                        timestamp: Some(timestamp),
                    },
                    Utc::now(),
                )
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_admin_network_wide_metrics() {
        let app = TestApp::new().await;
        seed(&app).await;

        let (status, body) = app
            .get(
                "/api/v1/dashboard/metrics?start=2024-03-01&end=2024-04-01",
                &app.admin_token,
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["opening_balance"], 100);
        assert_eq!(body["purchases"], 10);
        assert_eq!(body["transfer_in"], 7);
        assert_eq!(body["transfer_out"], 7);
        assert_eq!(body["closing_balance"], 110);
    }

    #[tokio::test]
    async fn test_commander_pinned_to_own_base() {
        let app = TestApp::new().await;
        seed(&app).await;

        // Asks for South, gets North.
        let (status, body) = app
            .get(
                &format!(
                    "/api/v1/dashboard/metrics?startDate=2024-03-01&endDate=2024-04-01&baseId={}",
                    app.south
                ),
                &app.commander_token,
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["opening_balance"], 100);
        assert_eq!(body["purchases"], 10);
        assert_eq!(body["transfer_in"], 0);
        assert_eq!(body["transfer_out"], 7);
        assert_eq!(body["closing_balance"], 103);
    }

    #[tokio::test]
    async fn test_admin_scoped_to_receiving_base() {
        let app = TestApp::new().await;
        seed(&app).await;

        let (_, body) = app
            .get(
                &format!(
                    "/api/v1/dashboard/metrics?start=2024-03-01&end=2024-04-01&base_id={}",
                    app.south
                ),
                &app.admin_token,
            )
            .await;

        assert_eq!(body["opening_balance"], 0);
        assert_eq!(body["transfer_in"], 7);
        assert_eq!(body["closing_balance"], 7);
    }

    #[tokio::test]
    async fn test_logistics_denied_and_bad_range_rejected() {
        let app = TestApp::new().await;

        let (status, body) = app
            .get(
                "/api/v1/dashboard/metrics?start=2024-03-01&end=2024-04-01",
                &app.logistics_token,
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "ACCESS_DENIED");

        let (status, body) = app
            .get(
                "/api/v1/dashboard/metrics?start=2024-04-01&end=2024-03-01",
                &app.admin_token,
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "INVALID_RANGE");

        let (status, _) = app
            .get("/api/v1/dashboard/metrics?start=yesterday", &app.admin_token)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_logistics_denied_with_malformed_parameters() {
        let app = TestApp::new().await;

        for query in [
            "start=2024-03-01&end=2024-04-01&base_id=not-a-uuid",
            "start=2024-03-01&end=2024-04-01&equipment_type_id=42",
            "start=2024-03-01&startDate=2024-03-02&end=2024-04-01",
        ] {
            let (status, body) = app
                .get(
                    &format!("/api/v1/dashboard/metrics?{query}"),
                    &app.logistics_token,
                )
                .await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{query}");
            assert_eq!(body["error"], "ACCESS_DENIED", "{query}");
        }
    }

    #[tokio::test]
    async fn test_malformed_parameters_rejected_with_envelope() {
        let app = TestApp::new().await;

        let (status, body) = app
            .get(
                "/api/v1/dashboard/metrics?start=2024-03-01&end=2024-04-01&base_id=not-a-uuid",
                &app.admin_token,
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }
}
