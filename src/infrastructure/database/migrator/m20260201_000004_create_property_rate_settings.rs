//! Create property_rate_settings table (1:1 with properties)

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
                    .table(PropertyRateSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PropertyRateSettings::PropertyId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PropertyRateSettings::UseAutoRates)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PropertyRateSettings::HolidayAdjustmentRate)
                            .decimal_len(12, 2),
                    )
                    .col(ColumnDef::new(PropertyRateSettings::HolidayAdjustmentType).string())
                    .col(
                        ColumnDef::new(PropertyRateSettings::LongWeekendAdjustmentRate)
                            .decimal_len(12, 2),
                    )
                    .col(ColumnDef::new(PropertyRateSettings::LongWeekendAdjustmentType).string())
                    .col(
                        ColumnDef::new(PropertyRateSettings::ValidFrom)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PropertyRateSettings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PropertyRateSettings::DeletedAt).timestamp_with_time_zone(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_rate_settings_property")
                            .from(
                                PropertyRateSettings::Table,
                                PropertyRateSettings::PropertyId,
                            )
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PropertyRateSettings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum PropertyRateSettings {
    Table,
    PropertyId,
    UseAutoRates,
    HolidayAdjustmentRate,
    HolidayAdjustmentType,
    LongWeekendAdjustmentRate,
    LongWeekendAdjustmentType,
    ValidFrom,
    UpdatedAt,
    DeletedAt,
}
