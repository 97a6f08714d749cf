//! Property rate setting entity (one row per property)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "property_rate_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub property_id: i32,

    pub use_auto_rates: bool,

    #[sea_orm(nullable, column_type = "Decimal(Some((12, 2)))")]
    pub holiday_adjustment_rate: Option<Decimal>,

    #[sea_orm(nullable)]
    pub holiday_adjustment_type: Option<String>,

    #[sea_orm(nullable, column_type = "Decimal(Some((12, 2)))")]
    pub long_weekend_adjustment_rate: Option<Decimal>,

    #[sea_orm(nullable)]
    pub long_weekend_adjustment_type: Option<String>,

    pub valid_from: DateTimeUtc,
    pub updated_at: DateTimeUtc,

    #[sea_orm(nullable)]
    pub deleted_at: Option<DateTimeUtc>,
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
