//! Database seeder for Quartermaster development and testing.
//!
//! Seeds three bases, a small equipment catalog, one user per role and a few
//! weeks of movements, then prints an access token for every seeded user.
//! Running it twice only reprints the tokens.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use quartermaster_core::access::{Caller, UserRole};
use quartermaster_core::ledger::{LedgerService, MovementKind, TransactionDraft};
use quartermaster_db::entities::users;
use quartermaster_db::repositories::CreateUserInput;
use quartermaster_db::{
    BaseRepository, EquipmentTypeRepository, TransactionRepository, UserRepository,
};
use quartermaster_shared::types::{BaseId, EquipmentTypeId, UserId};
use quartermaster_shared::{AppConfig, JwtConfig, JwtService};
use sea_orm::DatabaseConnection;

const ADMIN_USERNAME: &str = "hq-admin";

/// One seeded movement: kind, equipment index, quantity, from, to, personnel, days ago.
type SeedMovement = (
    MovementKind,
    usize,
    i64,
    Option<usize>,
    Option<usize>,
    Option<&'static str>,
    i64,
);

const MOVEMENTS: &[SeedMovement] = &[
    (MovementKind::Purchase, 0, 120, None, Some(0), None, 45),
    (MovementKind::Purchase, 1, 12, None, Some(0), None, 44),
    (MovementKind::Purchase, 2, 5000, None, Some(0), None, 40),
    (MovementKind::Purchase, 0, 60, None, Some(1), None, 38),
    (MovementKind::Purchase, 3, 30, None, Some(1), None, 35),
    (MovementKind::Transfer, 0, 25, Some(0), Some(2), None, 30),
    (MovementKind::Transfer, 2, 1200, Some(0), Some(1), None, 21),
    (MovementKind::Assignment, 0, 8, Some(1), None, Some("2nd Platoon, Bravo Company"), 14),
    (MovementKind::Expenditure, 2, 800, Some(1), None, None, 10),
    (MovementKind::Purchase, 0, 40, None, Some(2), None, 7),
    (MovementKind::Expenditure, 2, 350, Some(0), None, None, 3),
    (MovementKind::Assignment, 3, 4, Some(2), None, Some("Signals detachment"), 1),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    println!("Connecting to database...");
    let db = quartermaster_db::connect(&config.database.url).await?;

    let users = UserRepository::new(db.clone());
    if users.username_exists(ADMIN_USERNAME).await? {
        println!("Seed data already present, skipping inserts...");
    } else {
        seed(&db).await?;
        println!("Seeding complete!");
    }

    let jwt = JwtService::new(JwtConfig::from(&config.jwt));
    println!();
    println!("Development tokens:");
    for user in users.list().await? {
        print_token(&jwt, &user)?;
    }

    Ok(())
}

async fn seed(db: &DatabaseConnection) -> anyhow::Result<()> {
    println!("Seeding bases...");
    let base_repo = BaseRepository::new(db.clone());
    let mut bases = Vec::new();
    for (name, location) in [
        ("Fort Alpha", Some("Northern sector")),
        ("Camp Bravo", Some("Eastern sector")),
        ("Outpost Charlie", None),
    ] {
        let base = base_repo.create(name, location).await?;
        println!("  Created base: {name}");
        bases.push(BaseId::from_uuid(base.id));
    }

    println!("Seeding equipment types...");
    let equipment_repo = EquipmentTypeRepository::new(db.clone());
    let mut equipment = Vec::new();
    for (name, category) in [
        ("M4 Carbine", "weapons"),
        ("Humvee", "vehicles"),
        ("5.56mm Ammunition (rounds)", "ammunition"),
        ("PRC-152 Radio", "communications"),
    ] {
        let item = equipment_repo.create(name, Some(category)).await?;
        println!("  Created equipment type: {name}");
        equipment.push(EquipmentTypeId::from_uuid(item.id));
    }

    println!("Seeding users...");
    let user_repo = UserRepository::new(db.clone());
    let mut admin_id = None;
    for (username, role, base) in [
        (ADMIN_USERNAME, UserRole::Admin, None),
        ("alpha-commander", UserRole::Commander, Some(bases[0])),
        ("bravo-commander", UserRole::Commander, Some(bases[1])),
        ("logistics-officer", UserRole::Logistics, None),
    ] {
        let user = user_repo
            .create(CreateUserInput {
                username: username.to_string(),
                role,
                base_id: base,
            })
            .await?;
        println!("  Created user: {username} ({role})");
        if role == UserRole::Admin {
            admin_id = Some(UserId::from_uuid(user.id));
        }
    }
    let admin_id = admin_id.ok_or_else(|| anyhow::anyhow!("admin user was not created"))?;

    println!("Seeding movements...");
    let admin = Caller::new(admin_id, UserRole::Admin, None);
    let service = LedgerService::new(Arc::new(TransactionRepository::new(db.clone())));
    let now = Utc::now();

    for &(kind, item, quantity, from, to, personnel, days_ago) in MOVEMENTS {
        let timestamp: DateTime<Utc> = now - Duration::days(days_ago);
        let draft = TransactionDraft {
            kind,
            equipment_type_id: equipment[item],
            quantity,
            from_base_id: from.map(|i| bases[i]),
            to_base_id: to.map(|i| bases[i]),
            assigned_to_personnel: personnel.map(ToString::to_string),
            notes: Some("Seed data".to_string()),
            timestamp: Some(timestamp),
        };
        let recorded = service.record(&admin, draft, now).await?;
        println!("  Recorded {kind} of {quantity} ({})", recorded.id);
    }

    Ok(())
}

fn print_token(jwt: &JwtService, user: &users::Model) -> anyhow::Result<()> {
    let role = UserRole::from(user.role);
    let token = jwt.generate_access_token(user.id, role.as_str(), user.base_id)?;
    println!("  {} ({role}):", user.username);
    println!("    {token}");
    Ok(())
}
