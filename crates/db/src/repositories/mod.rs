//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod base;
pub mod equipment_type;
pub mod transaction;
pub mod user;

pub use base::BaseRepository;
pub use equipment_type::EquipmentTypeRepository;
pub use transaction::{
    TransactionError, TransactionFilter, TransactionRecord, TransactionRepository,
};
pub use user::{CreateUserInput, UserError, UserRepository};
