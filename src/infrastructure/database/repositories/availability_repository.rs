//! SeaORM implementation of RoomAvailabilityRepository
//!
//! The overlap check and the insert run inside one transaction so the
//! booking path cannot be torn by a concurrent writer. SQLite serializes
//! writing transactions; on PostgreSQL the same code should be paired
//! with SERIALIZABLE isolation or an exclusion constraint on
//! (room_id, daterange).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use crate::domain::availability::{RoomAvailability, RoomAvailabilityRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::room_availability;

use super::db_err;

pub struct SeaOrmRoomAvailabilityRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomAvailabilityRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: room_availability::Model) -> RoomAvailability {
    RoomAvailability {
        id: m.id,
        room_id: m.room_id,
        start_date: m.start_date,
        end_date: m.end_date,
        is_available: m.is_available,
        is_manual: m.is_manual,
        deleted_at: m.deleted_at,
        created_at: m.created_at,
    }
}

fn domain_to_active(r: &RoomAvailability) -> room_availability::ActiveModel {
    room_availability::ActiveModel {
        id: if r.id == 0 { NotSet } else { Set(r.id) },
        room_id: Set(r.room_id),
        start_date: Set(r.start_date),
        end_date: Set(r.end_date),
        is_available: Set(r.is_available),
        is_manual: Set(r.is_manual),
        deleted_at: Set(r.deleted_at),
        created_at: Set(r.created_at),
    }
}

#[async_trait]
impl RoomAvailabilityRepository for SeaOrmRoomAvailabilityRepository {
    async fn insert_if_vacant(&self, row: RoomAvailability) -> DomainResult<RoomAvailability> {
        debug!(
            room_id = row.room_id,
            start = %row.start_date,
            end = %row.end_date,
            manual = row.is_manual,
            "Creating unavailability window"
        );

        let txn = self.db.begin().await.map_err(db_err)?;

        if row.is_live() {
            let conflicts = room_availability::Entity::find()
                .filter(room_availability::Column::RoomId.eq(row.room_id))
                .filter(room_availability::Column::DeletedAt.is_null())
                .filter(room_availability::Column::StartDate.lte(row.end_date))
                .filter(room_availability::Column::EndDate.gte(row.start_date))
                .count(&txn)
                .await
                .map_err(db_err)?;
            if conflicts > 0 {
                txn.rollback().await.map_err(db_err)?;
                return Err(DomainError::RoomUnavailable {
                    room_id: row.room_id,
                    start: row.start_date,
                    end: row.end_date,
                });
            }
        }

        let inserted = domain_to_active(&row).insert(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<RoomAvailability>> {
        let model = room_availability::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_live_for_room(&self, room_id: i32) -> DomainResult<Vec<RoomAvailability>> {
        let models = room_availability::Entity::find()
            .filter(room_availability::Column::RoomId.eq(room_id))
            .filter(room_availability::Column::DeletedAt.is_null())
            .order_by_asc(room_availability::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn count_booking_rows(&self, room_id: i32) -> DomainResult<u64> {
        room_availability::Entity::find()
            .filter(room_availability::Column::RoomId.eq(room_id))
            .filter(room_availability::Column::DeletedAt.is_null())
            .filter(room_availability::Column::IsManual.eq(false))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn soft_delete(&self, id: i32, at: DateTime<Utc>) -> DomainResult<()> {
        let existing = room_availability::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        let Some(existing) = existing else {
            return Err(DomainError::availability_not_found(id));
        };

        let mut active: room_availability::ActiveModel = existing.into();
        active.deleted_at = Set(Some(at));
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn soft_delete_manual_for_room(
        &self,
        room_id: i32,
        at: DateTime<Utc>,
    ) -> DomainResult<u64> {
        let result = room_availability::Entity::update_many()
            .col_expr(
                room_availability::Column::DeletedAt,
                sea_orm::sea_query::Expr::value(Some(at)),
            )
            .filter(room_availability::Column::RoomId.eq(room_id))
            .filter(room_availability::Column::DeletedAt.is_null())
            .filter(room_availability::Column::IsManual.eq(true))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }

    async fn purge_deleted_before(&self, cutoff: DateTime<Utc>) -> DomainResult<u64> {
        let result = room_availability::Entity::delete_many()
            .filter(room_availability::Column::DeletedAt.is_not_null())
            .filter(room_availability::Column::DeletedAt.lt(cutoff))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }
}
