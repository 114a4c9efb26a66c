//! User routes: the caller's own identity and admin user management.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use quartermaster_core::access::{Operation, UserRole};
use quartermaster_db::{
    BaseRepository, UserRepository, entities::users, repositories::CreateUserInput,
};
use quartermaster_shared::AppError;
use quartermaster_shared::types::BaseId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the user routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/users", post(create_user).get(list_users))
}

/// Request body for creating a user.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// Unique login name.
    pub username: String,
    /// One of `admin`, `commander`, `logistics`.
    pub role: String,
    /// Base assignment; required for commanders, refused for admins.
    pub base_id: Option<BaseId>,
}

/// Response for a user.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Login name.
    pub username: String,
    /// Role.
    pub role: UserRole,
    /// Base assignment.
    pub base_id: Option<Uuid>,
    /// Created at timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for UserResponse {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            role: model.role.into(),
            base_id: model.base_id,
            created_at: model.created_at,
        }
    }
}

/// GET `/me` - The authenticated user.
async fn me(State(state): State<AppState>, auth: AuthUser) -> Result<Json<UserResponse>, ApiError> {
    let caller = auth.caller()?;

    UserRepository::new((*state.db).clone())
        .find_by_id(caller.user_id)
        .await?
        .map(|user| Json(user.into()))
        .ok_or_else(|| ApiError::from(AppError::Unauthorized("User no longer exists".to_string())))
}

/// GET `/users` - Admin only.
async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    auth.caller()?.require(Operation::ManageUsers)?;

    let users = UserRepository::new((*state.db).clone()).list().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// POST `/users` - Admin only.
async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    auth.caller()?.require(Operation::ManageUsers)?;
    let Json(payload) = payload?;

    let username = payload.username.trim();
    if username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }

    let role: UserRole = payload
        .role
        .parse()
        .map_err(|_| ApiError::validation(format!("Unknown role: {}", payload.role)))?;

    match (role, payload.base_id) {
        (UserRole::Commander, None) => {
            return Err(ApiError::validation("Commanders must be assigned a base"));
        }
        (UserRole::Admin, Some(_)) => {
            return Err(ApiError::validation("Admins cannot be assigned a base"));
        }
        (_, Some(base_id)) => {
            if !BaseRepository::new((*state.db).clone()).exists(base_id).await? {
                return Err(ApiError::validation(format!("Unknown base: {base_id}")));
            }
        }
        (_, None) => {}
    }

    let user = UserRepository::new((*state.db).clone())
        .create(CreateUserInput {
            username: username.to_string(),
            role,
            base_id: payload.base_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
