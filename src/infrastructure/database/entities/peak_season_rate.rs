//! Peak-season rate entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "peak_season_rates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub property_id: i32,

    pub start_date: Date,
    pub end_date: Date,

    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub adjustment_rate: Decimal,

    /// Adjustment type: Percentage, Fixed
    pub adjustment_type: String,

    /// Rate origin: Manual, Automatic - Holiday, Automatic - Long Weekend
    pub source: String,

    #[sea_orm(nullable)]
    pub reason: Option<String>,

    pub valid_from: DateTimeUtc,

    #[sea_orm(nullable)]
    pub valid_to: Option<DateTimeUtc>,

    #[sea_orm(nullable)]
    pub deleted_at: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::property::Entity",
        from = "Column::PropertyId",
        to = "super::property::Column::Id"
    )]
    Property,
}

impl Related<super::property::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Property.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
