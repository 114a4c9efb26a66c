//! Equipment type repository.

use chrono::Utc;
use quartermaster_shared::types::EquipmentTypeId;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder, Set,
};

use crate::entities::equipment_types;

/// Equipment type repository.
#[derive(Debug, Clone)]
pub struct EquipmentTypeRepository {
    db: DatabaseConnection,
}

impl EquipmentTypeRepository {
    /// Creates a new equipment type repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an equipment type.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        name: &str,
        category: Option<&str>,
    ) -> Result<equipment_types::Model, DbErr> {
        let equipment = equipment_types::ActiveModel {
            id: Set(EquipmentTypeId::new().into_inner()),
            name: Set(name.to_string()),
            category: Set(category.map(ToString::to_string)),
            created_at: Set(Utc::now()),
        };

        let equipment = equipment.insert(&self.db).await?;
        tracing::info!(equipment_type_id = %equipment.id, name = %equipment.name, "equipment type created");
        Ok(equipment)
    }

    /// Finds an equipment type by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        id: EquipmentTypeId,
    ) -> Result<Option<equipment_types::Model>, DbErr> {
        equipment_types::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
    }

    /// Lists all equipment types, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<equipment_types::Model>, DbErr> {
        equipment_types::Entity::find()
            .order_by_asc(equipment_types::Column::Name)
            .all(&self.db)
            .await
    }

    /// Checks if an equipment type exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn exists(&self, id: EquipmentTypeId) -> Result<bool, DbErr> {
        let count = equipment_types::Entity::find_by_id(id.into_inner())
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}
