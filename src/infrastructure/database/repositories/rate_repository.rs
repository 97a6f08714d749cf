//! SeaORM implementation of PeakSeasonRateRepository

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use crate::domain::rate::{AdjustmentType, PeakSeasonRate, PeakSeasonRateRepository, RateSource};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::peak_season_rate;

use super::db_err;

pub struct SeaOrmPeakSeasonRateRepository {
    db: DatabaseConnection,
}

impl SeaOrmPeakSeasonRateRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: peak_season_rate::Model) -> PeakSeasonRate {
    PeakSeasonRate {
        id: m.id,
        property_id: m.property_id,
        start_date: m.start_date,
        end_date: m.end_date,
        adjustment_rate: m.adjustment_rate,
        adjustment_type: AdjustmentType::from_str(&m.adjustment_type),
        source: RateSource::from_str(&m.source),
        reason: m.reason,
        valid_from: m.valid_from,
        valid_to: m.valid_to,
        deleted_at: m.deleted_at,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(r: &PeakSeasonRate) -> peak_season_rate::ActiveModel {
    peak_season_rate::ActiveModel {
        id: if r.id == 0 { NotSet } else { Set(r.id) },
        property_id: Set(r.property_id),
        start_date: Set(r.start_date),
        end_date: Set(r.end_date),
        adjustment_rate: Set(r.adjustment_rate),
        adjustment_type: Set(r.adjustment_type.as_str().to_string()),
        source: Set(r.source.as_str().to_string()),
        reason: Set(r.reason.clone()),
        valid_from: Set(r.valid_from),
        valid_to: Set(r.valid_to),
        deleted_at: Set(r.deleted_at),
        created_at: Set(r.created_at),
        updated_at: Set(r.updated_at),
    }
}

// ── PeakSeasonRateRepository impl ───────────────────────────────

#[async_trait]
impl PeakSeasonRateRepository for SeaOrmPeakSeasonRateRepository {
    async fn save(&self, rate: PeakSeasonRate) -> DomainResult<PeakSeasonRate> {
        debug!(
            property_id = rate.property_id,
            start = %rate.start_date,
            "Saving peak season rate"
        );
        let inserted = domain_to_active(&rate)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn update(&self, rate: PeakSeasonRate) -> DomainResult<()> {
        let existing = peak_season_rate::Entity::find_by_id(rate.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::rate_not_found(rate.id));
        }

        domain_to_active(&rate)
            .update(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<PeakSeasonRate>> {
        let model = peak_season_rate::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_live_for_property(&self, property_id: i32) -> DomainResult<Vec<PeakSeasonRate>> {
        let models = peak_season_rate::Entity::find()
            .filter(peak_season_rate::Column::PropertyId.eq(property_id))
            .filter(peak_season_rate::Column::DeletedAt.is_null())
            .order_by_asc(peak_season_rate::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_automatic_in_window(
        &self,
        property_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<PeakSeasonRate>> {
        let models = peak_season_rate::Entity::find()
            .filter(peak_season_rate::Column::PropertyId.eq(property_id))
            .filter(peak_season_rate::Column::DeletedAt.is_null())
            .filter(peak_season_rate::Column::Source.ne(RateSource::Manual.as_str()))
            .filter(peak_season_rate::Column::StartDate.lte(end))
            .filter(peak_season_rate::Column::EndDate.gte(start))
            .order_by_asc(peak_season_rate::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_applicable(
        &self,
        property_id: i32,
        date: NaiveDate,
        at: DateTime<Utc>,
    ) -> DomainResult<Vec<PeakSeasonRate>> {
        // The valid_to coalescing is easier to express on the domain
        // model; SQL narrows by property and start date.
        let models = peak_season_rate::Entity::find()
            .filter(peak_season_rate::Column::PropertyId.eq(property_id))
            .filter(peak_season_rate::Column::DeletedAt.is_null())
            .filter(peak_season_rate::Column::StartDate.lte(date))
            .order_by_asc(peak_season_rate::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models
            .into_iter()
            .map(model_to_domain)
            .filter(|r| r.applies_to(date, at))
            .collect())
    }

    async fn exists_overlapping(
        &self,
        property_id: i32,
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<i32>,
    ) -> DomainResult<bool> {
        let mut query = peak_season_rate::Entity::find()
            .filter(peak_season_rate::Column::PropertyId.eq(property_id))
            .filter(peak_season_rate::Column::DeletedAt.is_null())
            .filter(peak_season_rate::Column::StartDate.lte(end))
            .filter(peak_season_rate::Column::EndDate.gte(start));
        if let Some(id) = exclude_id {
            query = query.filter(peak_season_rate::Column::Id.ne(id));
        }
        let count = query.count(&self.db).await.map_err(db_err)?;
        Ok(count > 0)
    }

    async fn soft_delete(&self, id: i32, at: DateTime<Utc>) -> DomainResult<()> {
        let existing = peak_season_rate::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        let Some(existing) = existing else {
            return Err(DomainError::rate_not_found(id));
        };

        let mut active: peak_season_rate::ActiveModel = existing.into();
        active.deleted_at = Set(Some(at));
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn purge_deleted_before(&self, cutoff: DateTime<Utc>) -> DomainResult<u64> {
        let result = peak_season_rate::Entity::delete_many()
            .filter(peak_season_rate::Column::DeletedAt.is_not_null())
            .filter(peak_season_rate::Column::DeletedAt.lt(cutoff))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }
}
