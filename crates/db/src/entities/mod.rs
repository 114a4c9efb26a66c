//! `SeaORM` entity definitions.

pub mod bases;
pub mod equipment_types;
pub mod sea_orm_active_enums;
pub mod transactions;
pub mod users;

pub mod prelude {
    //! Entity aliases.

    pub use super::bases::Entity as Bases;
    pub use super::equipment_types::Entity as EquipmentTypes;
    pub use super::transactions::Entity as Transactions;
    pub use super::users::Entity as Users;
}
