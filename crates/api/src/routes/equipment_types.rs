//! Equipment type routes.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, Utc};
use quartermaster_core::access::Operation;
use quartermaster_db::{EquipmentTypeRepository, entities::equipment_types};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::bases::non_blank;
use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the equipment type routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/equipment-types",
        get(list_equipment_types).post(create_equipment_type),
    )
}

/// Request body for creating an equipment type.
#[derive(Debug, Deserialize)]
pub struct CreateEquipmentTypeRequest {
    /// Display name.
    pub name: String,
    /// Optional grouping such as "weapon" or "vehicle".
    pub category: Option<String>,
}

/// Response for an equipment type.
#[derive(Debug, Serialize)]
pub struct EquipmentTypeResponse {
    /// Equipment type ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Category.
    pub category: Option<String>,
    /// Created at timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<equipment_types::Model> for EquipmentTypeResponse {
    fn from(model: equipment_types::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
            created_at: model.created_at,
        }
    }
}

async fn list_equipment_types(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<EquipmentTypeResponse>>, ApiError> {
    auth.caller()?.require(Operation::ViewCatalog)?;

    let items = EquipmentTypeRepository::new((*state.db).clone())
        .list()
        .await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

async fn create_equipment_type(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<CreateEquipmentTypeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    auth.caller()?.require(Operation::ManageCatalog)?;
    let Json(payload) = payload?;

    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::validation("Equipment type name is required"));
    }

    let item = EquipmentTypeRepository::new((*state.db).clone())
        .create(name, non_blank(payload.category.as_deref()))
        .await?;

    Ok((StatusCode::CREATED, Json(EquipmentTypeResponse::from(item))))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use rstest::rstest;
    use serde_json::json;

    use crate::test_support::{Persona, TestApp};

    #[rstest]
    #[case::admin(Persona::Admin, StatusCode::OK)]
    #[case::commander(Persona::Commander, StatusCode::OK)]
    #[case::logistics(Persona::Logistics, StatusCode::FORBIDDEN)]
    #[tokio::test]
    async fn test_list_equipment_types_by_role(
        #[case] persona: Persona,
        #[case] expected: StatusCode,
    ) {
        let app = TestApp::new().await;

        let (status, _) = app.get("/api/v1/equipment-types", app.token(persona)).await;
        assert_eq!(status, expected);
    }

    #[tokio::test]
    async fn test_admin_creates_equipment_type() {
        let app = TestApp::new().await;

        let (status, body) = app
            .post(
                "/api/v1/equipment-types",
                &app.admin_token,
                json!({ "name": "Night vision goggles", "category": "optics" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["category"], "optics");

        let (_, body) = app.get("/api/v1/equipment-types", &app.admin_token).await;
        assert!(
            body.as_array()
                .unwrap()
                .iter()
                .any(|item| item["name"] == "Night vision goggles")
        );
    }

    #[tokio::test]
    async fn test_commander_cannot_create_equipment_type() {
        let app = TestApp::new().await;

        let (status, _) = app
            .post(
                "/api/v1/equipment-types",
                &app.commander_token,
                json!({ "name": "Mortar" }),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
