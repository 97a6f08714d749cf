//! SeaORM implementation of PropertyRepository

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::domain::property::{Property, PropertyRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{property, property_rate_setting};

use super::db_err;

pub struct SeaOrmPropertyRepository {
    db: DatabaseConnection,
}

impl SeaOrmPropertyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: property::Model) -> Property {
    Property {
        id: m.id,
        tenant_id: m.tenant_id,
        name: m.name,
        deleted_at: m.deleted_at,
    }
}

#[async_trait]
impl PropertyRepository for SeaOrmPropertyRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Property>> {
        let model = property::Entity::find_by_id(id)
            .filter(property::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_with_auto_rates_enabled(&self) -> DomainResult<Vec<Property>> {
        let enabled_ids: Vec<i32> = property_rate_setting::Entity::find()
            .filter(property_rate_setting::Column::UseAutoRates.eq(true))
            .filter(property_rate_setting::Column::DeletedAt.is_null())
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|s| s.property_id)
            .collect();

        if enabled_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = property::Entity::find()
            .filter(property::Column::Id.is_in(enabled_ids))
            .filter(property::Column::DeletedAt.is_null())
            .order_by_asc(property::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
