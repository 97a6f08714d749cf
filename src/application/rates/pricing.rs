//! Adjusted-price read queries backing the public rates endpoints.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::domain::{DomainError, DomainResult, RepositoryProvider};

use super::calculator::apply_peak_season_rates;

/// Adjusted price for one room on one date
#[derive(Debug, Clone)]
pub struct RoomRate {
    pub room_id: i32,
    pub room_name: String,
    pub base_price: Decimal,
    pub adjusted_price: Decimal,
    /// Number of adjustments that contributed
    pub applied_rates: usize,
}

/// Lowest adjusted price across a property's rooms for one date
#[derive(Debug, Clone)]
pub struct DailyRate {
    pub date: NaiveDate,
    pub lowest_price: Decimal,
}

/// Running sum of the daily-lowest series
#[derive(Debug, Clone)]
pub struct CumulativeDailyRate {
    pub date: NaiveDate,
    pub lowest_price: Decimal,
    pub running_total: Decimal,
}

pub struct PricingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl PricingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Per-room adjusted rates for `property_id` on `date`.
    pub async fn room_rates_on(
        &self,
        property_id: i32,
        date: NaiveDate,
    ) -> DomainResult<Vec<RoomRate>> {
        self.ensure_property(property_id).await?;

        let now = Utc::now();
        let rooms = self.repos.rooms().find_by_property(property_id).await?;
        let applicable = self
            .repos
            .rates()
            .find_applicable(property_id, date, now)
            .await?;

        Ok(rooms
            .into_iter()
            .map(|room| {
                let adjusted = apply_peak_season_rates(room.base_price, &applicable);
                RoomRate {
                    room_id: room.id,
                    room_name: room.name,
                    base_price: room.base_price,
                    adjusted_price: adjusted,
                    applied_rates: applicable.len(),
                }
            })
            .collect())
    }

    /// Lowest adjusted price per day over `[start, end]`.
    pub async fn daily_lowest(
        &self,
        property_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<DailyRate>> {
        if start > end {
            return Err(DomainError::InvalidDate(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }
        self.ensure_property(property_id).await?;

        let now = Utc::now();
        let rooms = self.repos.rooms().find_by_property(property_id).await?;
        if rooms.is_empty() {
            return Ok(Vec::new());
        }
        // one fetch for the whole window, filtered per day in memory
        let live = self.repos.rates().find_live_for_property(property_id).await?;

        let mut days = Vec::new();
        let mut date = start;
        while date <= end {
            let applicable: Vec<_> = live
                .iter()
                .filter(|r| r.applies_to(date, now))
                .cloned()
                .collect();
            let lowest = rooms
                .iter()
                .map(|room| apply_peak_season_rates(room.base_price, &applicable))
                .min()
                .expect("rooms is non-empty");
            days.push(DailyRate {
                date,
                lowest_price: lowest,
            });
            date = date.succ_opt().expect("date overflow");
        }
        Ok(days)
    }

    /// Running sum of the daily-lowest series over `[start, end]`.
    pub async fn daily_cumulative(
        &self,
        property_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<CumulativeDailyRate>> {
        let daily = self.daily_lowest(property_id, start, end).await?;

        let mut running = Decimal::ZERO;
        Ok(daily
            .into_iter()
            .map(|day| {
                running += day.lowest_price;
                CumulativeDailyRate {
                    date: day.date,
                    lowest_price: day.lowest_price,
                    running_total: running,
                }
            })
            .collect())
    }

    async fn ensure_property(&self, property_id: i32) -> DomainResult<()> {
        self.repos
            .properties()
            .find_by_id(property_id)
            .await?
            .ok_or_else(|| DomainError::property_not_found(property_id))?;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
