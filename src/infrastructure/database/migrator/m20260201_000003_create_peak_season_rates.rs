//! Create peak_season_rates table
//!
//! One row per price-adjustment window. The (property_id, start_date,
//! source) combination is the upsert key used by the reconciler.

use sea_orm_migration::prelude::*;

use super::m20260201_000001_create_properties::Properties;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PeakSeasonRates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PeakSeasonRates::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PeakSeasonRates::PropertyId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PeakSeasonRates::StartDate).date().not_null())
                    .col(ColumnDef::new(PeakSeasonRates::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(PeakSeasonRates::AdjustmentRate)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PeakSeasonRates::AdjustmentType)
                            .string()
                            .not_null()
                            .default("Percentage"),
                    )
                    .col(
                        ColumnDef::new(PeakSeasonRates::Source)
                            .string()
                            .not_null()
                            .default("Manual"),
                    )
                    .col(ColumnDef::new(PeakSeasonRates::Reason).string())
                    .col(
                        ColumnDef::new(PeakSeasonRates::ValidFrom)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PeakSeasonRates::ValidTo).timestamp_with_time_zone())
                    .col(ColumnDef::new(PeakSeasonRates::DeletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(PeakSeasonRates::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PeakSeasonRates::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_peak_season_rates_property")
                            .from(PeakSeasonRates::Table, PeakSeasonRates::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_peak_season_rates_property_start")
                    .table(PeakSeasonRates::Table)
                    .col(PeakSeasonRates::PropertyId)
                    .col(PeakSeasonRates::StartDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PeakSeasonRates::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum PeakSeasonRates {
    Table,
    Id,
    PropertyId,
    StartDate,
    EndDate,
    AdjustmentRate,
    AdjustmentType,
    Source,
    Reason,
    ValidFrom,
    ValidTo,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}
