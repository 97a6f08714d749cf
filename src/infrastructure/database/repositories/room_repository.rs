//! SeaORM implementation of RoomRepository

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::domain::room::{Room, RoomRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::room;

use super::db_err;

pub struct SeaOrmRoomRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: room::Model) -> Room {
    Room {
        id: m.id,
        property_id: m.property_id,
        name: m.name,
        base_price: m.base_price,
        max_guests: m.max_guests,
        deleted_at: m.deleted_at,
    }
}

#[async_trait]
impl RoomRepository for SeaOrmRoomRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>> {
        let model = room::Entity::find_by_id(id)
            .filter(room::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_property(&self, property_id: i32) -> DomainResult<Vec<Room>> {
        let models = room::Entity::find()
            .filter(room::Column::PropertyId.eq(property_id))
            .filter(room::Column::DeletedAt.is_null())
            .order_by_asc(room::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
