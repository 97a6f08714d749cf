//! Create room_availabilities table
//!
//! Live rows mark windows where a room is not bookable. The overlap
//! invariant is enforced by the transactional check-then-insert in the
//! repository, not by a schema constraint (SQLite has no exclusion
//! constraints over date ranges).

use sea_orm_migration::prelude::*;

use super::m20260201_000002_create_rooms::Rooms;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RoomAvailabilities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoomAvailabilities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RoomAvailabilities::RoomId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoomAvailabilities::StartDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoomAvailabilities::EndDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoomAvailabilities::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(RoomAvailabilities::IsManual)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(RoomAvailabilities::DeletedAt).timestamp_with_time_zone(),
                    )
                    .col(
                        ColumnDef::new(RoomAvailabilities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_availabilities_room")
                            .from(RoomAvailabilities::Table, RoomAvailabilities::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_room_availabilities_room_dates")
                    .table(RoomAvailabilities::Table)
                    .col(RoomAvailabilities::RoomId)
                    .col(RoomAvailabilities::StartDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoomAvailabilities::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum RoomAvailabilities {
    Table,
    Id,
    RoomId,
    StartDate,
    EndDate,
    IsAvailable,
    IsManual,
    DeletedAt,
    CreatedAt,
}
