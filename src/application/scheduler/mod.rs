//! Periodic jobs
//!
//! Explicit scheduler component that registers named jobs and invokes
//! the reconciler and the stale-data purge directly:
//!
//! - `full_resync` — weekly, window today..+6 months, so a rate always
//!   exists far enough in the future even with no property changes
//! - `incremental_resync` — daily, window today..+3 days, absorbing
//!   last-minute holiday-calendar corrections cheaply
//! - `purge_soft_deleted` — hard-deletes rows soft-deleted longer ago
//!   than the retention window
//!
//! Each job runs in a tokio::spawn loop under the shutdown signal.
//! Re-running any job with no underlying change is a no-op thanks to
//! the reconciler's upsert keys.

use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Months, NaiveDate, Utc};
use metrics::counter;
use tokio::time::Duration;
use tracing::{info, warn};

use crate::application::rates::RateSettingsReconciler;
use crate::domain::{DomainResult, RepositoryProvider};
use crate::shared::shutdown::ShutdownSignal;

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Seconds between full resyncs (default: weekly)
    pub full_resync_interval_secs: u64,
    /// Seconds between incremental resyncs (default: daily)
    pub incremental_resync_interval_secs: u64,
    /// Seconds between purge sweeps (default: hourly)
    pub purge_interval_secs: u64,
    /// Full-resync window length in months
    pub full_resync_window_months: u32,
    /// Incremental-resync window length in days
    pub incremental_window_days: i64,
    /// Soft-deleted rows older than this are hard-deleted
    pub purge_retention_hours: i64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            full_resync_interval_secs: 7 * 24 * 3600,
            incremental_resync_interval_secs: 24 * 3600,
            purge_interval_secs: 3600,
            full_resync_window_months: 6,
            incremental_window_days: 3,
            purge_retention_hours: 12,
        }
    }
}

#[derive(Clone)]
pub struct Scheduler {
    repos: Arc<dyn RepositoryProvider>,
    reconciler: Arc<RateSettingsReconciler>,
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        reconciler: Arc<RateSettingsReconciler>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            repos,
            reconciler,
            config,
        }
    }

    /// Spawn all three job loops. Each ticks once at startup, then at
    /// its configured interval, until shutdown.
    pub fn start(&self, shutdown: ShutdownSignal) {
        self.spawn_job(
            "full_resync",
            self.config.full_resync_interval_secs,
            shutdown.clone(),
            |s| Box::pin(async move { s.run_full_resync().await.map(|_| ()) }),
        );
        self.spawn_job(
            "incremental_resync",
            self.config.incremental_resync_interval_secs,
            shutdown.clone(),
            |s| Box::pin(async move { s.run_incremental_resync().await.map(|_| ()) }),
        );
        self.spawn_job(
            "purge_soft_deleted",
            self.config.purge_interval_secs,
            shutdown,
            |s| Box::pin(async move { s.run_purge().await.map(|_| ()) }),
        );
    }

    fn spawn_job(
        &self,
        name: &'static str,
        interval_secs: u64,
        shutdown: ShutdownSignal,
        run: fn(
            Scheduler,
        )
            -> std::pin::Pin<Box<dyn std::future::Future<Output = DomainResult<()>> + Send>>,
    ) {
        let scheduler = self.clone();
        tokio::spawn(async move {
            info!(job = name, interval_secs, "📅 Scheduled job started");
            let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        counter!("roomrate_scheduler_ticks_total", "job" => name).increment(1);
                        if let Err(e) = run(scheduler.clone()).await {
                            warn!(job = name, error = %e, "Scheduled job tick failed");
                        }
                    }
                    _ = shutdown.notified().wait() => {
                        info!(job = name, "📅 Scheduled job shutting down");
                        break;
                    }
                }
            }
        });
    }

    /// Weekly full resync: today..+6 months over all auto-rate properties.
    pub async fn run_full_resync(&self) -> DomainResult<u32> {
        let (start, end) = full_resync_window(
            Utc::now().date_naive(),
            self.config.full_resync_window_months,
        );
        self.reconciler.reconcile_all(start, end).await
    }

    /// Daily incremental resync: today..+3 days.
    pub async fn run_incremental_resync(&self) -> DomainResult<u32> {
        let (start, end) = incremental_resync_window(
            Utc::now().date_naive(),
            self.config.incremental_window_days,
        );
        self.reconciler.reconcile_all(start, end).await
    }

    /// Hard-delete rate and availability rows soft-deleted before the
    /// retention cutoff. Age-based only; no reconciliation logic here.
    pub async fn run_purge(&self) -> DomainResult<u64> {
        let cutoff = Utc::now() - ChronoDuration::hours(self.config.purge_retention_hours);

        let rates = self.repos.rates().purge_deleted_before(cutoff).await?;
        let windows = self
            .repos
            .availability()
            .purge_deleted_before(cutoff)
            .await?;

        let purged = rates + windows;
        if purged > 0 {
            info!(rates, windows, "🧹 Purged soft-deleted rows");
        }
        counter!("roomrate_purged_rows_total").increment(purged);
        Ok(purged)
    }
}

fn full_resync_window(today: NaiveDate, months: u32) -> (NaiveDate, NaiveDate) {
    let end = today
        .checked_add_months(Months::new(months))
        .expect("date overflow");
    (today, end)
}

fn incremental_resync_window(today: NaiveDate, days: i64) -> (NaiveDate, NaiveDate) {
    (today, today + ChronoDuration::days(days))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::availability::RoomAvailability;
    use crate::domain::holiday::{Holiday, HolidayCalendar, LongWeekend};
    use crate::domain::rate::{AdjustmentType, PeakSeasonRate, RateSource};
    use crate::domain::rate_setting::PropertyRateSetting;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use async_trait::async_trait;
    use chrono::Duration as ChronoDuration;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    struct EverySaturdayHoliday;

    #[async_trait]
    impl HolidayCalendar for EverySaturdayHoliday {
        async fn holidays_in_range(
            &self,
            start: NaiveDate,
            end: NaiveDate,
        ) -> DomainResult<Vec<Holiday>> {
            Ok(start
                .iter_days()
                .take_while(|d| *d <= end)
                .filter(|d| d.format("%a").to_string() == "Sat")
                .map(|date| Holiday {
                    date,
                    name: "Stub Day".into(),
                })
                .collect())
        }

        async fn long_weekends_in_range(
            &self,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> DomainResult<Vec<LongWeekend>> {
            Ok(vec![])
        }
    }

    fn scheduler_with(
        repos: Arc<InMemoryRepositoryProvider>,
        config: SchedulerConfig,
    ) -> Scheduler {
        let reconciler = Arc::new(RateSettingsReconciler::new(
            repos.clone(),
            Arc::new(EverySaturdayHoliday),
        ));
        Scheduler::new(repos, reconciler, config)
    }

    #[test]
    fn window_helpers() {
        let today: NaiveDate = "2026-08-07".parse().unwrap();
        let (start, end) = full_resync_window(today, 6);
        assert_eq!(start, today);
        assert_eq!(end, "2027-02-07".parse::<NaiveDate>().unwrap());

        let (start, end) = incremental_resync_window(today, 3);
        assert_eq!(start, today);
        assert_eq!(end, "2026-08-10".parse::<NaiveDate>().unwrap());
    }

    #[tokio::test]
    async fn full_resync_covers_auto_rate_properties() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        repos.seed_property(1, Uuid::new_v4(), "Villa A");
        let mut setting = PropertyRateSetting::disabled(1);
        setting.use_auto_rates = true;
        setting.holiday_adjustment_rate = Some(dec!(10));
        setting.holiday_adjustment_type = Some(AdjustmentType::Percentage);
        repos.rate_settings().upsert(setting).await.unwrap();

        let scheduler = scheduler_with(repos.clone(), SchedulerConfig::default());
        let reconciled = scheduler.run_full_resync().await.unwrap();
        assert_eq!(reconciled, 1);

        let live = repos.rates().find_live_for_property(1).await.unwrap();
        // ~26 Saturdays in six months
        assert!(live.len() >= 24, "got {}", live.len());
        assert!(live.iter().all(|r| r.source == RateSource::AutoHoliday));

        // second run: nothing new
        scheduler.run_full_resync().await.unwrap();
        let after = repos.rates().find_live_for_property(1).await.unwrap();
        assert_eq!(live.len(), after.len());
    }

    #[tokio::test]
    async fn properties_without_auto_rates_are_skipped() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        repos.seed_property(1, Uuid::new_v4(), "Villa A");
        // settings row exists but disabled
        repos
            .rate_settings()
            .upsert(PropertyRateSetting::disabled(1))
            .await
            .unwrap();

        let scheduler = scheduler_with(repos.clone(), SchedulerConfig::default());
        let reconciled = scheduler.run_incremental_resync().await.unwrap();
        assert_eq!(reconciled, 0);
        assert!(repos
            .rates()
            .find_live_for_property(1)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn purge_removes_only_rows_past_retention() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        repos.seed_property(1, Uuid::new_v4(), "Villa A");
        repos.seed_room(10, 1, "Garden Room", dec!(100));

        // soft-deleted 13h ago → purged
        let mut old_rate = PeakSeasonRate::new_manual(
            1,
            "2026-09-01".parse().unwrap(),
            "2026-09-05".parse().unwrap(),
            dec!(10),
            AdjustmentType::Percentage,
            None,
        );
        old_rate.deleted_at = Some(Utc::now() - ChronoDuration::hours(13));
        repos.rates().save(old_rate).await.unwrap();

        // soft-deleted just now → kept
        let fresh = repos
            .rates()
            .save(PeakSeasonRate::new_manual(
                1,
                "2026-10-01".parse().unwrap(),
                "2026-10-05".parse().unwrap(),
                dec!(10),
                AdjustmentType::Percentage,
                None,
            ))
            .await
            .unwrap();
        repos.rates().soft_delete(fresh.id, Utc::now()).await.unwrap();

        // stale availability row → purged
        let mut window = RoomAvailability::new(
            10,
            "2026-09-01".parse().unwrap(),
            "2026-09-02".parse().unwrap(),
            true,
        );
        window.deleted_at = Some(Utc::now() - ChronoDuration::hours(14));
        repos.availability().insert_if_vacant(window).await.unwrap();

        let scheduler = scheduler_with(repos.clone(), SchedulerConfig::default());
        let purged = scheduler.run_purge().await.unwrap();
        assert_eq!(purged, 2);

        // the fresh soft-deleted rate survives
        assert!(repos.rates().find_by_id(fresh.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn jobs_stop_on_shutdown() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let scheduler = scheduler_with(
            repos,
            SchedulerConfig {
                full_resync_interval_secs: 3600,
                incremental_resync_interval_secs: 3600,
                purge_interval_secs: 3600,
                ..SchedulerConfig::default()
            },
        );
        let shutdown = ShutdownSignal::new();
        scheduler.start(shutdown.clone());

        // let the startup ticks run, then shut down
        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown.trigger();
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
