//! Router harness for handler tests.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use quartermaster_core::access::UserRole;
use quartermaster_db::migration::{Migrator, MigratorTrait};
use quartermaster_db::repositories::CreateUserInput;
use quartermaster_db::{BaseRepository, EquipmentTypeRepository, UserRepository};
use quartermaster_shared::types::{BaseId, EquipmentTypeId, UserId};
use quartermaster_shared::{JwtConfig, JwtService};
use sea_orm::Database;
use serde_json::Value;
use tower::ServiceExt;

use crate::{AppState, create_router};

/// Which fixture user a request is made as.
#[derive(Debug, Clone, Copy)]
pub enum Persona {
    Admin,
    Commander,
    Logistics,
}

/// A migrated in-memory database behind the full router.
///
/// Fixture: bases "Fort North" and "Camp South", equipment "M4 Carbine",
/// an admin, a commander of Fort North and a logistics officer.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub north: BaseId,
    pub south: BaseId,
    pub rifles: EquipmentTypeId,
    pub admin_id: UserId,
    pub admin_token: String,
    pub commander_token: String,
    pub logistics_token: String,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let bases = BaseRepository::new(db.clone());
        let north = bases.create("Fort North", Some("Sector 1")).await.unwrap();
        let south = bases.create("Camp South", None).await.unwrap();
        let rifles = EquipmentTypeRepository::new(db.clone())
            .create("M4 Carbine", Some("weapons"))
            .await
            .unwrap();

        let users = UserRepository::new(db.clone());
        let admin = users
            .create(CreateUserInput {
                username: "hq-admin".to_string(),
                role: UserRole::Admin,
                base_id: None,
            })
            .await
            .unwrap();
        let commander = users
            .create(CreateUserInput {
                username: "north-commander".to_string(),
                role: UserRole::Commander,
                base_id: Some(BaseId::from_uuid(north.id)),
            })
            .await
            .unwrap();
        let logistics = users
            .create(CreateUserInput {
                username: "logistics".to_string(),
                role: UserRole::Logistics,
                base_id: None,
            })
            .await
            .unwrap();

        let jwt = JwtService::new(JwtConfig::default());
        let admin_token = jwt.generate_access_token(admin.id, "admin", None).unwrap();
        let commander_token = jwt
            .generate_access_token(commander.id, "commander", Some(north.id))
            .unwrap();
        let logistics_token = jwt
            .generate_access_token(logistics.id, "logistics", None)
            .unwrap();

        let state = AppState::new(db, jwt);
        Self {
            router: create_router(state.clone()),
            state,
            north: BaseId::from_uuid(north.id),
            south: BaseId::from_uuid(south.id),
            rifles: EquipmentTypeId::from_uuid(rifles.id),
            admin_id: UserId::from_uuid(admin.id),
            admin_token,
            commander_token,
            logistics_token,
        }
    }

    pub fn token(&self, persona: Persona) -> &str {
        match persona {
            Persona::Admin => &self.admin_token,
            Persona::Commander => &self.commander_token,
            Persona::Logistics => &self.logistics_token,
        }
    }

    /// Sends a request; an empty token omits the Authorization header.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if !token.is_empty() {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }
}
