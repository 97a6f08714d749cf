//! Property rate settings: lazy creation and tenant updates.
//!
//! Updating settings immediately re-reconciles the property over a
//! forward-looking window so automatic rates reflect the new
//! configuration without waiting for the next scheduled run.

use std::sync::Arc;

use chrono::{Months, Utc};
use rust_decimal::Decimal;
use tracing::warn;
use uuid::Uuid;

use crate::domain::rate::AdjustmentType;
use crate::domain::rate_setting::PropertyRateSetting;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

use super::reconciler::RateSettingsReconciler;
use super::validator::RateValidator;

/// Forward-looking reconcile window after a settings change
const RECONCILE_WINDOW_MONTHS: u32 = 6;

/// Tenant update of a property's automatic-rate configuration
#[derive(Debug, Clone, Default)]
pub struct UpdateRateSettingCommand {
    pub use_auto_rates: Option<bool>,
    pub holiday_adjustment_rate: Option<Decimal>,
    pub holiday_adjustment_type: Option<AdjustmentType>,
    pub long_weekend_adjustment_rate: Option<Decimal>,
    pub long_weekend_adjustment_type: Option<AdjustmentType>,
}

pub struct RateSettingsService {
    repos: Arc<dyn RepositoryProvider>,
    reconciler: Arc<RateSettingsReconciler>,
    validator: RateValidator,
}

impl RateSettingsService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, reconciler: Arc<RateSettingsReconciler>) -> Self {
        let validator = RateValidator::new(repos.clone());
        Self {
            repos,
            reconciler,
            validator,
        }
    }

    /// Settings row for the property, lazily created with automatic
    /// rates disabled on first access.
    pub async fn get_or_create(
        &self,
        tenant_id: Uuid,
        property_id: i32,
    ) -> DomainResult<PropertyRateSetting> {
        let property = self
            .validator
            .validate_property_ownership(tenant_id, property_id)
            .await?;

        if let Some(setting) = self
            .repos
            .rate_settings()
            .find_by_property(property.id)
            .await?
        {
            return Ok(setting);
        }
        self.repos
            .rate_settings()
            .upsert(PropertyRateSetting::disabled(property.id))
            .await
    }

    /// Apply a tenant update, then reconcile today..+6 months. A holiday
    /// calendar outage does not fail the update; the scheduled resync
    /// will catch up.
    pub async fn update(
        &self,
        tenant_id: Uuid,
        property_id: i32,
        cmd: UpdateRateSettingCommand,
    ) -> DomainResult<PropertyRateSetting> {
        let mut setting = self.get_or_create(tenant_id, property_id).await?;

        if let Some(enabled) = cmd.use_auto_rates {
            setting.use_auto_rates = enabled;
        }
        if let Some(rate) = cmd.holiday_adjustment_rate {
            setting.holiday_adjustment_rate = Some(rate);
        }
        if let Some(ty) = cmd.holiday_adjustment_type {
            setting.holiday_adjustment_type = Some(ty);
        }
        if let Some(rate) = cmd.long_weekend_adjustment_rate {
            setting.long_weekend_adjustment_rate = Some(rate);
        }
        if let Some(ty) = cmd.long_weekend_adjustment_type {
            setting.long_weekend_adjustment_type = Some(ty);
        }

        validate_setting_adjustments(&setting)?;

        setting.updated_at = Utc::now();
        let saved = self.repos.rate_settings().upsert(setting).await?;

        let today = Utc::now().date_naive();
        let end = today
            .checked_add_months(Months::new(RECONCILE_WINDOW_MONTHS))
            .expect("date overflow");
        if let Err(e) = self.reconciler.reconcile_property(property_id, today, end).await {
            warn!(
                property_id,
                error = %e,
                "Post-update reconciliation failed; next scheduled resync will retry"
            );
        }

        Ok(saved)
    }
}

fn validate_setting_adjustments(setting: &PropertyRateSetting) -> DomainResult<()> {
    for (rate, ty, label) in [
        (
            setting.holiday_adjustment_rate,
            setting.holiday_adjustment_type,
            "holiday",
        ),
        (
            setting.long_weekend_adjustment_rate,
            setting.long_weekend_adjustment_type,
            "long weekend",
        ),
    ] {
        if let Some(rate) = rate {
            if rate < Decimal::ZERO {
                return Err(DomainError::InvalidRequest(format!(
                    "{} adjustment rate cannot be negative",
                    label
                )));
            }
            if ty == Some(AdjustmentType::Percentage) && rate > Decimal::from(100) {
                return Err(DomainError::InvalidRequest(format!(
                    "{} percentage adjustment {} exceeds 100",
                    label, rate
                )));
            }
        }
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::holiday::{Holiday, HolidayCalendar, LongWeekend};
    use crate::domain::rate::RateSource;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use async_trait::async_trait;
    use chrono::{Duration, NaiveDate};
    use rust_decimal_macros::dec;

    struct UpcomingHoliday;

    #[async_trait]
    impl HolidayCalendar for UpcomingHoliday {
        async fn holidays_in_range(
            &self,
            start: NaiveDate,
            end: NaiveDate,
        ) -> DomainResult<Vec<Holiday>> {
            let date = Utc::now().date_naive() + Duration::days(30);
            Ok(if date >= start && date <= end {
                vec![Holiday {
                    date,
                    name: "Founding Day".into(),
                }]
            } else {
                vec![]
            })
        }

        async fn long_weekends_in_range(
            &self,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> DomainResult<Vec<LongWeekend>> {
            Ok(vec![])
        }
    }

    fn setup() -> (Arc<InMemoryRepositoryProvider>, Uuid, RateSettingsService) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let tenant = Uuid::new_v4();
        repos.seed_property(1, tenant, "Seaside Villa");
        let reconciler = Arc::new(RateSettingsReconciler::new(
            repos.clone(),
            Arc::new(UpcomingHoliday),
        ));
        let service = RateSettingsService::new(repos.clone(), reconciler);
        (repos, tenant, service)
    }

    #[tokio::test]
    async fn lazily_created_disabled() {
        let (repos, tenant, service) = setup();
        assert!(repos
            .rate_settings()
            .find_by_property(1)
            .await
            .unwrap()
            .is_none());

        let setting = service.get_or_create(tenant, 1).await.unwrap();
        assert!(!setting.use_auto_rates);

        // second access returns the persisted row
        assert!(repos
            .rate_settings()
            .find_by_property(1)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn update_triggers_immediate_reconcile() {
        let (repos, tenant, service) = setup();
        service
            .update(
                tenant,
                1,
                UpdateRateSettingCommand {
                    use_auto_rates: Some(true),
                    holiday_adjustment_rate: Some(dec!(25)),
                    holiday_adjustment_type: Some(AdjustmentType::Percentage),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let live = repos.rates().find_live_for_property(1).await.unwrap();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].source, RateSource::AutoHoliday);
        assert_eq!(live[0].adjustment_rate, dec!(25));
    }

    #[tokio::test]
    async fn disabling_removes_automatic_rates() {
        let (repos, tenant, service) = setup();
        service
            .update(
                tenant,
                1,
                UpdateRateSettingCommand {
                    use_auto_rates: Some(true),
                    holiday_adjustment_rate: Some(dec!(25)),
                    holiday_adjustment_type: Some(AdjustmentType::Percentage),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        service
            .update(
                tenant,
                1,
                UpdateRateSettingCommand {
                    use_auto_rates: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let live = repos.rates().find_live_for_property(1).await.unwrap();
        assert!(live.is_empty());
    }

    #[tokio::test]
    async fn percentage_cap_applies_to_settings() {
        let (_, tenant, service) = setup();
        let err = service
            .update(
                tenant,
                1,
                UpdateRateSettingCommand {
                    holiday_adjustment_rate: Some(dec!(120)),
                    holiday_adjustment_type: Some(AdjustmentType::Percentage),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn foreign_tenant_rejected() {
        let (_, _, service) = setup();
        let err = service
            .get_or_create(Uuid::new_v4(), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }
}
