//! Base routes.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, Utc};
use quartermaster_core::access::{Operation, resolve_scope};
use quartermaster_db::{BaseRepository, entities::bases};
use quartermaster_shared::types::BaseId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the base routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bases", get(list_bases).post(create_base))
        .route("/bases/{base_id}", get(get_base))
}

/// Request body for creating a base.
#[derive(Debug, Deserialize)]
pub struct CreateBaseRequest {
    /// Display name.
    pub name: String,
    /// Optional location.
    pub location: Option<String>,
}

/// Response for a base.
#[derive(Debug, Serialize)]
pub struct BaseResponse {
    /// Base ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Location.
    pub location: Option<String>,
    /// Created at timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<bases::Model> for BaseResponse {
    fn from(model: bases::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            location: model.location,
            created_at: model.created_at,
        }
    }
}

/// Trims optional free text, dropping it when blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// GET `/bases` - Admins see every base, commanders only their own.
async fn list_bases(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<BaseResponse>>, ApiError> {
    let scope = resolve_scope(&auth.caller()?, Operation::ViewCatalog, None)?;

    let bases = BaseRepository::new((*state.db).clone()).list(scope).await?;
    Ok(Json(bases.into_iter().map(BaseResponse::from).collect()))
}

/// GET `/bases/{base_id}` - A base outside the caller's scope is reported as missing.
async fn get_base(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(base_id): Path<BaseId>,
) -> Result<Json<BaseResponse>, ApiError> {
    let scope = resolve_scope(&auth.caller()?, Operation::ViewCatalog, None)?;

    BaseRepository::new((*state.db).clone())
        .find(base_id, scope)
        .await?
        .map(|base| Json(base.into()))
        .ok_or_else(|| ApiError::not_found("Base"))
}

/// POST `/bases` - Admin only.
async fn create_base(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<CreateBaseRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    auth.caller()?.require(Operation::ManageCatalog)?;
    let Json(payload) = payload?;

    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::validation("Base name is required"));
    }

    let base = BaseRepository::new((*state.db).clone())
        .create(name, non_blank(payload.location.as_deref()))
        .await?;

    Ok((StatusCode::CREATED, Json(BaseResponse::from(base))))
}
