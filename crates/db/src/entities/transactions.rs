//! `SeaORM` Entity for the append-only transactions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::TransactionKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub kind: TransactionKind,
    pub equipment_type_id: Uuid,
    pub quantity: i32,
    pub from_base_id: Option<Uuid>,
    pub to_base_id: Option<Uuid>,
    pub assigned_to_personnel: Option<String>,
    pub notes: Option<String>,
    pub timestamp: DateTimeUtc,
    pub recorded_by: Uuid,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::equipment_types::Entity",
        from = "Column::EquipmentTypeId",
        to = "super::equipment_types::Column::Id"
    )]
    EquipmentTypes,
    #[sea_orm(
        belongs_to = "super::bases::Entity",
        from = "Column::FromBaseId",
        to = "super::bases::Column::Id"
    )]
    FromBase,
    #[sea_orm(
        belongs_to = "super::bases::Entity",
        from = "Column::ToBaseId",
        to = "super::bases::Column::Id"
    )]
    ToBase,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::RecordedBy",
        to = "super::users::Column::Id"
    )]
    RecordedBy,
}

impl Related<super::equipment_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EquipmentTypes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
