//! SeaORM implementation of RateSettingRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::rate::AdjustmentType;
use crate::domain::rate_setting::{PropertyRateSetting, RateSettingRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::property_rate_setting;

use super::db_err;

pub struct SeaOrmRateSettingRepository {
    db: DatabaseConnection,
}

impl SeaOrmRateSettingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: property_rate_setting::Model) -> PropertyRateSetting {
    PropertyRateSetting {
        property_id: m.property_id,
        use_auto_rates: m.use_auto_rates,
        holiday_adjustment_rate: m.holiday_adjustment_rate,
        holiday_adjustment_type: m
            .holiday_adjustment_type
            .as_deref()
            .map(AdjustmentType::from_str),
        long_weekend_adjustment_rate: m.long_weekend_adjustment_rate,
        long_weekend_adjustment_type: m
            .long_weekend_adjustment_type
            .as_deref()
            .map(AdjustmentType::from_str),
        valid_from: m.valid_from,
        updated_at: m.updated_at,
        deleted_at: m.deleted_at,
    }
}

fn domain_to_active(s: &PropertyRateSetting) -> property_rate_setting::ActiveModel {
    property_rate_setting::ActiveModel {
        property_id: Set(s.property_id),
        use_auto_rates: Set(s.use_auto_rates),
        holiday_adjustment_rate: Set(s.holiday_adjustment_rate),
        holiday_adjustment_type: Set(s
            .holiday_adjustment_type
            .map(|t| t.as_str().to_string())),
        long_weekend_adjustment_rate: Set(s.long_weekend_adjustment_rate),
        long_weekend_adjustment_type: Set(s
            .long_weekend_adjustment_type
            .map(|t| t.as_str().to_string())),
        valid_from: Set(s.valid_from),
        updated_at: Set(s.updated_at),
        deleted_at: Set(s.deleted_at),
    }
}

#[async_trait]
impl RateSettingRepository for SeaOrmRateSettingRepository {
    async fn find_by_property(
        &self,
        property_id: i32,
    ) -> DomainResult<Option<PropertyRateSetting>> {
        let model = property_rate_setting::Entity::find_by_id(property_id)
            .filter(property_rate_setting::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn upsert(&self, setting: PropertyRateSetting) -> DomainResult<PropertyRateSetting> {
        let exists = property_rate_setting::Entity::find_by_id(setting.property_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some();

        let active = domain_to_active(&setting);
        if exists {
            active.update(&self.db).await.map_err(db_err)?;
        } else {
            active.insert(&self.db).await.map_err(db_err)?;
        }
        Ok(setting)
    }
}
