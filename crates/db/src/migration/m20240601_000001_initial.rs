//! Initial schema: bases, equipment types, users and the transaction ledger.
//!
//! Written with the schema builder so the same migration runs on Postgres and
//! on the SQLite databases used in tests.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bases::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bases::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Bases::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Bases::Location).string_len(200))
                    .col(
                        ColumnDef::new(Bases::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EquipmentTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EquipmentTypes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EquipmentTypes::Name)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(EquipmentTypes::Category).string_len(100))
                    .col(
                        ColumnDef::new(EquipmentTypes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Role).string_len(16).not_null())
                    .col(ColumnDef::new(Users::BaseId).uuid())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_base")
                            .from(Users::Table, Users::BaseId)
                            .to(Bases::Table, Bases::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::Kind).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Transactions::EquipmentTypeId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::Quantity)
                            .integer()
                            .not_null()
                            .check(Expr::col(Transactions::Quantity).gt(0)),
                    )
                    .col(ColumnDef::new(Transactions::FromBaseId).uuid())
                    .col(ColumnDef::new(Transactions::ToBaseId).uuid())
                    .col(ColumnDef::new(Transactions::AssignedToPersonnel).string_len(200))
                    .col(ColumnDef::new(Transactions::Notes).text())
                    .col(
                        ColumnDef::new(Transactions::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::RecordedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_equipment_type")
                            .from(Transactions::Table, Transactions::EquipmentTypeId)
                            .to(EquipmentTypes::Table, EquipmentTypes::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_from_base")
                            .from(Transactions::Table, Transactions::FromBaseId)
                            .to(Bases::Table, Bases::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_to_base")
                            .from(Transactions::Table, Transactions::ToBaseId)
                            .to(Bases::Table, Bases::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_recorded_by")
                            .from(Transactions::Table, Transactions::RecordedBy)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Every balance sum filters on kind and timestamp, then on one leg.
        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_kind_timestamp")
                    .table(Transactions::Table)
                    .col(Transactions::Kind)
                    .col(Transactions::Timestamp)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_from_base")
                    .table(Transactions::Table)
                    .col(Transactions::FromBaseId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_to_base")
                    .table(Transactions::Table)
                    .col(Transactions::ToBaseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EquipmentTypes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bases::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Bases {
    Table,
    Id,
    Name,
    Location,
    CreatedAt,
}

#[derive(DeriveIden)]
enum EquipmentTypes {
    Table,
    Id,
    Name,
    Category,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Role,
    BaseId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    Kind,
    EquipmentTypeId,
    Quantity,
    FromBaseId,
    ToBaseId,
    AssignedToPersonnel,
    Notes,
    Timestamp,
    RecordedBy,
    CreatedAt,
}
