//! Automatic-rate reconciliation
//!
//! Keeps a property's automatic peak-season rates consistent with its
//! settings and the external holiday calendar over a target window.
//! Reconciliation is idempotent: rates are upserted keyed by
//! (start_date, source), so re-running with no underlying change
//! produces zero net new rows.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use metrics::counter;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::domain::rate::{AdjustmentType, PeakSeasonRate, RateSource};
use crate::domain::rate_setting::PropertyRateSetting;
use crate::domain::{DomainResult, HolidayCalendar, RepositoryProvider};
use crate::shared::utills::{retry_with_backoff, RetryConfig};

/// Net effect of one reconciliation run for one property
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub created: u32,
    pub updated: u32,
    pub deactivated: u32,
}

impl ReconcileSummary {
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

pub struct RateSettingsReconciler {
    repos: Arc<dyn RepositoryProvider>,
    calendar: Arc<dyn HolidayCalendar>,
    retry: RetryConfig,
}

impl RateSettingsReconciler {
    pub fn new(repos: Arc<dyn RepositoryProvider>, calendar: Arc<dyn HolidayCalendar>) -> Self {
        Self {
            repos,
            calendar,
            retry: RetryConfig::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Reconcile every property with automatic rates enabled. One
    /// property failing (typically the holiday calendar being down)
    /// is logged and skipped; the batch continues.
    pub async fn reconcile_all(&self, start: NaiveDate, end: NaiveDate) -> DomainResult<u32> {
        let properties = self.repos.properties().find_with_auto_rates_enabled().await?;
        info!(
            properties = properties.len(),
            %start,
            %end,
            "Reconciling automatic rates"
        );

        let mut reconciled = 0u32;
        for property in properties {
            match self.reconcile_property(property.id, start, end).await {
                Ok(summary) => {
                    reconciled += 1;
                    if !summary.is_noop() {
                        info!(
                            property_id = property.id,
                            created = summary.created,
                            updated = summary.updated,
                            deactivated = summary.deactivated,
                            "Automatic rates reconciled"
                        );
                    }
                }
                Err(e) => {
                    counter!("roomrate_reconcile_failures_total").increment(1);
                    warn!(
                        property_id = property.id,
                        error = %e,
                        "Skipping property for this tick"
                    );
                }
            }
        }
        Ok(reconciled)
    }

    /// Reconcile one property over `[start, end]`.
    pub async fn reconcile_property(
        &self,
        property_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<ReconcileSummary> {
        let setting = self
            .repos
            .rate_settings()
            .find_by_property(property_id)
            .await?
            .unwrap_or_else(|| PropertyRateSetting::disabled(property_id));

        let existing = self
            .repos
            .rates()
            .find_automatic_in_window(property_id, start, end)
            .await?;

        let mut summary = ReconcileSummary::default();

        // Automatic rates switched off: everything in the window goes.
        if !setting.use_auto_rates {
            for rate in &existing {
                self.repos.rates().soft_delete(rate.id, Utc::now()).await?;
                summary.deactivated += 1;
            }
            self.record(&summary);
            return Ok(summary);
        }

        let holidays = retry_with_backoff(
            self.retry.clone(),
            || self.calendar.holidays_in_range(start, end),
            |e| e.is_transient(),
            "fetch_holidays",
        )
        .await?;
        let long_weekends = retry_with_backoff(
            self.retry.clone(),
            || self.calendar.long_weekends_in_range(start, end),
            |e| e.is_transient(),
            "fetch_long_weekends",
        )
        .await?;

        debug!(
            property_id,
            holidays = holidays.len(),
            long_weekends = long_weekends.len(),
            "Holiday calendar fetched"
        );

        // Existing automatic rates grouped by start date. The map is
        // built before any write of this pass, so rates upserted below
        // are never seen by the stale-cleanup step.
        let mut by_start: HashMap<NaiveDate, Vec<PeakSeasonRate>> = HashMap::new();
        for rate in existing {
            by_start.entry(rate.start_date).or_default().push(rate);
        }

        if let Some((rate, ty)) = setting.holiday_adjustment() {
            for holiday in &holidays {
                self.upsert(
                    property_id,
                    holiday.date,
                    holiday.date,
                    rate,
                    ty,
                    RateSource::AutoHoliday,
                    &by_start,
                    &mut summary,
                )
                .await?;
            }
        }

        if let Some((rate, ty)) = setting.long_weekend_adjustment() {
            for lw in &long_weekends {
                self.upsert(
                    property_id,
                    lw.start_date,
                    lw.end_date,
                    rate,
                    ty,
                    RateSource::AutoLongWeekend,
                    &by_start,
                    &mut summary,
                )
                .await?;
            }
        }

        // Deactivate leftovers on days the calendar no longer claims.
        let mut covered: HashSet<NaiveDate> = holidays.iter().map(|h| h.date).collect();
        for lw in &long_weekends {
            covered.extend(lw.days());
        }
        for (date, rates) in &by_start {
            if covered.contains(date) {
                continue;
            }
            for rate in rates {
                self.repos.rates().soft_delete(rate.id, Utc::now()).await?;
                summary.deactivated += 1;
            }
        }

        self.record(&summary);
        Ok(summary)
    }

    /// Create or update-in-place one automatic rate. The tie-break for
    /// multiple automatic rates sharing a start date is the `source`
    /// key; with no source match a new row is created instead of
    /// guessing which one to touch.
    #[allow(clippy::too_many_arguments)]
    async fn upsert(
        &self,
        property_id: i32,
        start: NaiveDate,
        end: NaiveDate,
        adjustment_rate: Decimal,
        adjustment_type: AdjustmentType,
        source: RateSource,
        by_start: &HashMap<NaiveDate, Vec<PeakSeasonRate>>,
        summary: &mut ReconcileSummary,
    ) -> DomainResult<()> {
        let matched = by_start
            .get(&start)
            .and_then(|rates| rates.iter().find(|r| r.source == source));

        match matched {
            Some(existing) => {
                let unchanged = existing.adjustment_rate == adjustment_rate
                    && existing.adjustment_type == adjustment_type
                    && existing.end_date == end;
                if unchanged {
                    return Ok(());
                }
                let mut updated = existing.clone();
                updated.adjustment_rate = adjustment_rate;
                updated.adjustment_type = adjustment_type;
                updated.end_date = end;
                updated.updated_at = Utc::now();
                self.repos.rates().update(updated).await?;
                summary.updated += 1;
            }
            None => {
                let rate = PeakSeasonRate::new_automatic(
                    property_id,
                    start,
                    end,
                    adjustment_rate,
                    adjustment_type,
                    source,
                );
                self.repos.rates().save(rate).await?;
                summary.created += 1;
            }
        }
        Ok(())
    }

    fn record(&self, summary: &ReconcileSummary) {
        counter!("roomrate_reconcile_rates_created_total").increment(summary.created as u64);
        counter!("roomrate_reconcile_rates_updated_total").increment(summary.updated as u64);
        counter!("roomrate_reconcile_rates_deactivated_total")
            .increment(summary.deactivated as u64);
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::holiday::{Holiday, LongWeekend};
    use crate::domain::DomainError;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use uuid::Uuid;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    /// Scripted calendar: fixed holidays/long weekends, optional failure.
    struct StubCalendar {
        holidays: Mutex<Vec<Holiday>>,
        long_weekends: Mutex<Vec<LongWeekend>>,
        fail_calls: AtomicU32,
    }

    impl StubCalendar {
        fn new(holidays: Vec<Holiday>, long_weekends: Vec<LongWeekend>) -> Self {
            Self {
                holidays: Mutex::new(holidays),
                long_weekends: Mutex::new(long_weekends),
                fail_calls: AtomicU32::new(0),
            }
        }

        fn failing(times: u32) -> Self {
            let cal = Self::new(vec![], vec![]);
            cal.fail_calls.store(times, Ordering::SeqCst);
            cal
        }

        fn set_holidays(&self, holidays: Vec<Holiday>) {
            *self.holidays.lock().unwrap() = holidays;
        }
    }

    #[async_trait]
    impl HolidayCalendar for StubCalendar {
        async fn holidays_in_range(
            &self,
            start: NaiveDate,
            end: NaiveDate,
        ) -> DomainResult<Vec<Holiday>> {
            if self.fail_calls.load(Ordering::SeqCst) > 0 {
                self.fail_calls.fetch_sub(1, Ordering::SeqCst);
                return Err(DomainError::HolidayCalendar("stub outage".into()));
            }
            Ok(self
                .holidays
                .lock()
                .unwrap()
                .iter()
                .filter(|h| h.date >= start && h.date <= end)
                .cloned()
                .collect())
        }

        async fn long_weekends_in_range(
            &self,
            start: NaiveDate,
            end: NaiveDate,
        ) -> DomainResult<Vec<LongWeekend>> {
            Ok(self
                .long_weekends
                .lock()
                .unwrap()
                .iter()
                .filter(|lw| lw.start_date <= end && lw.end_date >= start)
                .cloned()
                .collect())
        }
    }

    fn enabled_setting(property_id: i32) -> PropertyRateSetting {
        let mut s = PropertyRateSetting::disabled(property_id);
        s.use_auto_rates = true;
        s.holiday_adjustment_rate = Some(dec!(20));
        s.holiday_adjustment_type = Some(AdjustmentType::Percentage);
        s.long_weekend_adjustment_rate = Some(dec!(15));
        s.long_weekend_adjustment_type = Some(AdjustmentType::Fixed);
        s
    }

    async fn setup(
        calendar: Arc<StubCalendar>,
    ) -> (Arc<InMemoryRepositoryProvider>, RateSettingsReconciler) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        repos.seed_property(1, Uuid::new_v4(), "Seaside Villa");
        repos
            .rate_settings()
            .upsert(enabled_setting(1))
            .await
            .unwrap();
        let reconciler = RateSettingsReconciler::new(repos.clone(), calendar).with_retry(
            RetryConfig {
                max_attempts: 2,
                initial_delay: std::time::Duration::from_millis(1),
                backoff_multiplier: 2.0,
                max_delay: std::time::Duration::from_millis(2),
            },
        );
        (repos, reconciler)
    }

    fn window() -> (NaiveDate, NaiveDate) {
        (d("2026-12-01"), d("2026-12-31"))
    }

    #[tokio::test]
    async fn creates_holiday_and_long_weekend_rates() {
        let calendar = Arc::new(StubCalendar::new(
            vec![Holiday {
                date: d("2026-12-25"),
                name: "Christmas Day".into(),
            }],
            vec![LongWeekend {
                start_date: d("2026-12-25"),
                end_date: d("2026-12-27"),
                day_count: 3,
            }],
        ));
        let (repos, reconciler) = setup(calendar).await;
        let (start, end) = window();

        let summary = reconciler.reconcile_property(1, start, end).await.unwrap();
        assert_eq!(summary.created, 2);
        assert_eq!(summary.updated, 0);
        assert_eq!(summary.deactivated, 0);

        let rates = repos
            .rates()
            .find_automatic_in_window(1, start, end)
            .await
            .unwrap();
        assert_eq!(rates.len(), 2);
        let holiday = rates
            .iter()
            .find(|r| r.source == RateSource::AutoHoliday)
            .unwrap();
        assert_eq!(holiday.start_date, d("2026-12-25"));
        assert_eq!(holiday.end_date, d("2026-12-25"));
        assert_eq!(holiday.adjustment_rate, dec!(20));
        let lw = rates
            .iter()
            .find(|r| r.source == RateSource::AutoLongWeekend)
            .unwrap();
        assert_eq!(lw.end_date, d("2026-12-27"));
    }

    #[tokio::test]
    async fn reconcile_twice_is_idempotent() {
        let calendar = Arc::new(StubCalendar::new(
            vec![Holiday {
                date: d("2026-12-25"),
                name: "Christmas Day".into(),
            }],
            vec![],
        ));
        let (repos, reconciler) = setup(calendar).await;
        let (start, end) = window();

        let first = reconciler.reconcile_property(1, start, end).await.unwrap();
        assert_eq!(first.created, 1);

        let second = reconciler.reconcile_property(1, start, end).await.unwrap();
        assert!(second.is_noop());

        let rates = repos
            .rates()
            .find_automatic_in_window(1, start, end)
            .await
            .unwrap();
        assert_eq!(rates.len(), 1);
    }

    #[tokio::test]
    async fn settings_change_updates_in_place() {
        let calendar = Arc::new(StubCalendar::new(
            vec![Holiday {
                date: d("2026-12-25"),
                name: "Christmas Day".into(),
            }],
            vec![],
        ));
        let (repos, reconciler) = setup(calendar).await;
        let (start, end) = window();
        reconciler.reconcile_property(1, start, end).await.unwrap();

        let mut setting = enabled_setting(1);
        setting.holiday_adjustment_rate = Some(dec!(30));
        repos.rate_settings().upsert(setting).await.unwrap();

        let summary = reconciler.reconcile_property(1, start, end).await.unwrap();
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.created, 0);

        let rates = repos
            .rates()
            .find_automatic_in_window(1, start, end)
            .await
            .unwrap();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].adjustment_rate, dec!(30));
    }

    #[tokio::test]
    async fn stale_rates_deactivated_when_calendar_moves() {
        let calendar = Arc::new(StubCalendar::new(
            vec![Holiday {
                date: d("2026-12-25"),
                name: "Christmas Day".into(),
            }],
            vec![],
        ));
        let (repos, reconciler) = setup(calendar.clone()).await;
        let (start, end) = window();
        reconciler.reconcile_property(1, start, end).await.unwrap();

        // calendar correction moves the holiday
        calendar.set_holidays(vec![Holiday {
            date: d("2026-12-26"),
            name: "Christmas Day (observed)".into(),
        }]);

        let summary = reconciler.reconcile_property(1, start, end).await.unwrap();
        assert_eq!(summary.created, 1);
        assert_eq!(summary.deactivated, 1);

        let rates = repos
            .rates()
            .find_automatic_in_window(1, start, end)
            .await
            .unwrap();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].start_date, d("2026-12-26"));
    }

    #[tokio::test]
    async fn disabling_auto_rates_clears_window() {
        let calendar = Arc::new(StubCalendar::new(
            vec![Holiday {
                date: d("2026-12-25"),
                name: "Christmas Day".into(),
            }],
            vec![],
        ));
        let (repos, reconciler) = setup(calendar).await;
        let (start, end) = window();
        reconciler.reconcile_property(1, start, end).await.unwrap();

        let mut setting = enabled_setting(1);
        setting.use_auto_rates = false;
        repos.rate_settings().upsert(setting).await.unwrap();

        let summary = reconciler.reconcile_property(1, start, end).await.unwrap();
        assert_eq!(summary.deactivated, 1);

        let rates = repos
            .rates()
            .find_automatic_in_window(1, start, end)
            .await
            .unwrap();
        assert!(rates.is_empty());
    }

    #[tokio::test]
    async fn manual_rates_are_never_touched() {
        let calendar = Arc::new(StubCalendar::new(vec![], vec![]));
        let (repos, reconciler) = setup(calendar).await;
        let (start, end) = window();

        repos
            .rates()
            .save(PeakSeasonRate::new_manual(
                1,
                d("2026-12-10"),
                d("2026-12-15"),
                dec!(10),
                AdjustmentType::Percentage,
                Some("Ski season".into()),
            ))
            .await
            .unwrap();

        let summary = reconciler.reconcile_property(1, start, end).await.unwrap();
        assert!(summary.is_noop());

        let live = repos.rates().find_live_for_property(1).await.unwrap();
        assert_eq!(live.len(), 1);
    }

    #[tokio::test]
    async fn holiday_and_long_weekend_sharing_start_date_both_exist() {
        let calendar = Arc::new(StubCalendar::new(
            vec![Holiday {
                date: d("2026-12-25"),
                name: "Christmas Day".into(),
            }],
            vec![LongWeekend {
                start_date: d("2026-12-25"),
                end_date: d("2026-12-27"),
                day_count: 3,
            }],
        ));
        let (repos, reconciler) = setup(calendar).await;
        let (start, end) = window();

        reconciler.reconcile_property(1, start, end).await.unwrap();
        // run again: the source tie-break matches each to its own row
        let second = reconciler.reconcile_property(1, start, end).await.unwrap();
        assert!(second.is_noop());

        let rates = repos
            .rates()
            .find_automatic_in_window(1, start, end)
            .await
            .unwrap();
        assert_eq!(rates.len(), 2);
    }

    #[tokio::test]
    async fn transient_calendar_failure_is_retried() {
        let calendar = Arc::new(StubCalendar::failing(1));
        let (_, reconciler) = setup(calendar.clone()).await;
        let (start, end) = window();

        // first call fails, retry succeeds
        reconciler.reconcile_property(1, start, end).await.unwrap();
    }

    #[tokio::test]
    async fn exhausted_retries_surface_the_error() {
        let calendar = Arc::new(StubCalendar::failing(5));
        let (_, reconciler) = setup(calendar).await;
        let (start, end) = window();

        let err = reconciler.reconcile_property(1, start, end).await.unwrap_err();
        assert!(matches!(err, DomainError::HolidayCalendar(_)));
    }

    #[tokio::test]
    async fn reconcile_all_continues_past_failures() {
        let calendar = Arc::new(StubCalendar::failing(10));
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        repos.seed_property(1, Uuid::new_v4(), "Villa A");
        repos.seed_property(2, Uuid::new_v4(), "Villa B");
        repos
            .rate_settings()
            .upsert(enabled_setting(1))
            .await
            .unwrap();
        repos
            .rate_settings()
            .upsert(enabled_setting(2))
            .await
            .unwrap();
        let reconciler = RateSettingsReconciler::new(repos, calendar).with_retry(RetryConfig {
            max_attempts: 1,
            initial_delay: std::time::Duration::from_millis(1),
            backoff_multiplier: 2.0,
            max_delay: std::time::Duration::from_millis(1),
        });

        let (start, end) = window();
        // both properties fail, nothing panics, batch reports zero
        let reconciled = reconciler.reconcile_all(start, end).await.unwrap();
        assert_eq!(reconciled, 0);
    }
}
