//! Shared setup for the db integration tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use quartermaster_core::access::UserRole;
use quartermaster_core::ledger::{LedgerTransaction, Movement, NewTransaction, Quantity};
use quartermaster_db::migration::{Migrator, MigratorTrait};
use quartermaster_db::repositories::CreateUserInput;
use quartermaster_db::{BaseRepository, EquipmentTypeRepository, TransactionRepository, UserRepository};
use quartermaster_shared::types::{BaseId, EquipmentTypeId, UserId};
use sea_orm::{Database, DatabaseConnection};

/// Fresh in-memory database with the schema applied.
pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

/// Two bases, two equipment types and an admin to record against.
pub struct Fixture {
    pub db: DatabaseConnection,
    pub ledger: TransactionRepository,
    pub north: BaseId,
    pub south: BaseId,
    pub rifles: EquipmentTypeId,
    pub radios: EquipmentTypeId,
    pub admin: UserId,
}

pub async fn fixture() -> Fixture {
    let db = setup_db().await;

    let bases = BaseRepository::new(db.clone());
    let north = bases
        .create("Fort North", Some("Sector 1"))
        .await
        .expect("Failed to create base");
    let south = bases
        .create("Camp South", None)
        .await
        .expect("Failed to create base");

    let equipment = EquipmentTypeRepository::new(db.clone());
    let rifles = equipment
        .create("M4 Carbine", Some("weapons"))
        .await
        .expect("Failed to create equipment type");
    let radios = equipment
        .create("PRC-152 Radio", Some("comms"))
        .await
        .expect("Failed to create equipment type");

    let admin = UserRepository::new(db.clone())
        .create(CreateUserInput {
            username: "quartermaster".to_string(),
            role: UserRole::Admin,
            base_id: None,
        })
        .await
        .expect("Failed to create user");

    Fixture {
        ledger: TransactionRepository::new(db.clone()),
        db,
        north: BaseId::from_uuid(north.id),
        south: BaseId::from_uuid(south.id),
        rifles: EquipmentTypeId::from_uuid(rifles.id),
        radios: EquipmentTypeId::from_uuid(radios.id),
        admin: UserId::from_uuid(admin.id),
    }
}

impl Fixture {
    /// Inserts a movement directly, bypassing access checks.
    pub async fn record(
        &self,
        movement: Movement,
        equipment: EquipmentTypeId,
        quantity: i64,
        timestamp: DateTime<Utc>,
    ) -> LedgerTransaction {
        self.ledger
            .insert(NewTransaction {
                movement,
                equipment_type_id: equipment,
                quantity: Quantity::new(quantity).expect("quantity must be positive"),
                notes: None,
                timestamp,
                recorded_by: self.admin,
            })
            .await
            .expect("Failed to insert transaction")
    }
}

/// Midnight UTC on the given day of 2024.
pub fn day(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, 0, 0, 0).unwrap()
}
