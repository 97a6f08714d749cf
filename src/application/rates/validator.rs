//! Rate validation: date-range checks, conflict checks, ownership checks.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult, PeakSeasonRate, Property, RepositoryProvider, Room};
use crate::shared::validations::validate_date_range;

pub struct RateValidator {
    repos: Arc<dyn RepositoryProvider>,
}

impl RateValidator {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Date-range validation plus conflict check against every live rate
    /// of the property. `exclude_id` skips the rate being updated.
    pub async fn validate_rate_date_range(
        &self,
        property_id: i32,
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<i32>,
    ) -> DomainResult<()> {
        validate_date_range(start, end)?;

        let conflict = self
            .repos
            .rates()
            .exists_overlapping(property_id, start, end, exclude_id)
            .await?;
        if conflict {
            return Err(DomainError::ConflictingRate(format!(
                "property {} already has a rate overlapping {}..{}",
                property_id, start, end
            )));
        }
        Ok(())
    }

    /// Fails `PropertyNotFound` when the property is missing,
    /// `Unauthorized` when `tenant_id` is not the owner. Returns the
    /// property on success.
    pub async fn validate_property_ownership(
        &self,
        tenant_id: Uuid,
        property_id: i32,
    ) -> DomainResult<Property> {
        let property = self
            .repos
            .properties()
            .find_by_id(property_id)
            .await?
            .ok_or_else(|| DomainError::property_not_found(property_id))?;

        if !property.is_owned_by(tenant_id) {
            return Err(DomainError::Unauthorized(format!(
                "tenant {} does not own property {}",
                tenant_id, property_id
            )));
        }
        Ok(property)
    }

    /// Lookup helper failing `PeakSeasonRateNotFound` on a missing or
    /// soft-deleted rate.
    pub async fn find_rate(&self, rate_id: i32) -> DomainResult<PeakSeasonRate> {
        self.repos
            .rates()
            .find_by_id(rate_id)
            .await?
            .filter(|r| r.is_live())
            .ok_or_else(|| DomainError::rate_not_found(rate_id))
    }

    /// Lookup helper failing `RoomNotFound` on a missing room.
    pub async fn find_room(&self, room_id: i32) -> DomainResult<Room> {
        self.repos
            .rooms()
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| DomainError::room_not_found(room_id))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rate::AdjustmentType;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    fn future(days: i64) -> NaiveDate {
        Utc::now().date_naive() + Duration::days(days)
    }

    async fn seeded() -> (Arc<InMemoryRepositoryProvider>, Uuid) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let tenant = Uuid::new_v4();
        repos.seed_property(1, tenant, "Seaside Villa");
        (repos, tenant)
    }

    #[tokio::test]
    async fn rejects_past_start_date() {
        let (repos, _) = seeded().await;
        let validator = RateValidator::new(repos);
        let err = validator
            .validate_rate_date_range(1, future(-2), future(5), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidDate(_)));
    }

    #[tokio::test]
    async fn rejects_overlapping_rate() {
        let (repos, _) = seeded().await;
        let existing = PeakSeasonRate::new_manual(
            1,
            future(10),
            future(20),
            dec!(10),
            AdjustmentType::Percentage,
            None,
        );
        repos.rates().save(existing).await.unwrap();

        let validator = RateValidator::new(repos);
        let err = validator
            .validate_rate_date_range(1, future(15), future(25), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ConflictingRate(_)));

        // disjoint window passes
        validator
            .validate_rate_date_range(1, future(21), future(25), None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn exclude_id_permits_updating_own_window() {
        let (repos, _) = seeded().await;
        let saved = repos
            .rates()
            .save(PeakSeasonRate::new_manual(
                1,
                future(10),
                future(20),
                dec!(10),
                AdjustmentType::Percentage,
                None,
            ))
            .await
            .unwrap();

        let validator = RateValidator::new(repos);
        validator
            .validate_rate_date_range(1, future(12), future(18), Some(saved.id))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn ownership_failures() {
        let (repos, tenant) = seeded().await;
        let validator = RateValidator::new(repos);

        let err = validator
            .validate_property_ownership(tenant, 99)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Property", .. }));

        let err = validator
            .validate_property_ownership(Uuid::new_v4(), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));

        let property = validator.validate_property_ownership(tenant, 1).await.unwrap();
        assert_eq!(property.id, 1);
    }

    #[tokio::test]
    async fn missing_rate_and_room_lookups() {
        let (repos, _) = seeded().await;
        let validator = RateValidator::new(repos);

        let err = validator.find_rate(123).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "PeakSeasonRate", .. }));

        let err = validator.find_room(123).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Room", .. }));
    }
}
