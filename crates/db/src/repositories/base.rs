//! Base repository.

use chrono::Utc;
use quartermaster_core::access::BaseScope;
use quartermaster_shared::types::BaseId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::bases;

/// Base repository for create and scoped reads.
#[derive(Debug, Clone)]
pub struct BaseRepository {
    db: DatabaseConnection,
}

impl BaseRepository {
    /// Creates a new base repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a base.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, name: &str, location: Option<&str>) -> Result<bases::Model, DbErr> {
        let base = bases::ActiveModel {
            id: Set(BaseId::new().into_inner()),
            name: Set(name.to_string()),
            location: Set(location.map(ToString::to_string)),
            created_at: Set(Utc::now()),
        };

        let base = base.insert(&self.db).await?;
        tracing::info!(base_id = %base.id, name = %base.name, "base created");
        Ok(base)
    }

    /// Finds a base by ID within a scope.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(&self, id: BaseId, scope: BaseScope) -> Result<Option<bases::Model>, DbErr> {
        if !scope.includes(id) {
            return Ok(None);
        }
        bases::Entity::find_by_id(id.into_inner()).one(&self.db).await
    }

    /// Lists the bases in scope, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, scope: BaseScope) -> Result<Vec<bases::Model>, DbErr> {
        let mut query = bases::Entity::find();
        if let BaseScope::Base(id) = scope {
            query = query.filter(bases::Column::Id.eq(id.into_inner()));
        }
        query.order_by_asc(bases::Column::Name).all(&self.db).await
    }

    /// Checks if a base exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn exists(&self, id: BaseId) -> Result<bool, DbErr> {
        let count = bases::Entity::find_by_id(id.into_inner())
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}
