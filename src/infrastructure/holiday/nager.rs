//! Nager.Date-style holiday calendar client
//!
//! Blocking the whole resync pass on a slow calendar is the failure mode
//! to avoid, so every request carries a timeout; the reconciler adds
//! bounded retry on top.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::domain::holiday::{Holiday, HolidayCalendar, LongWeekend};
use crate::domain::{DomainError, DomainResult};
use crate::shared::types::InfraError;

#[derive(Debug, Clone)]
pub struct HolidayApiConfig {
    /// API root, e.g. "https://date.nager.at"
    pub base_url: String,
    /// ISO 3166-1 alpha-2 country code
    pub country_code: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HolidayApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://date.nager.at".to_string(),
            country_code: "ID".to_string(),
            timeout_secs: 10,
        }
    }
}

pub struct NagerHolidayCalendar {
    client: reqwest::Client,
    config: HolidayApiConfig,
}

impl NagerHolidayCalendar {
    pub fn new(config: HolidayApiConfig) -> Result<Self, InfraError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, url: String) -> DomainResult<T> {
        debug!(%url, "Fetching holiday calendar");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::HolidayCalendar(format!("{}: {}", url, e)))?;
        let response = response
            .error_for_status()
            .map_err(|e| DomainError::HolidayCalendar(format!("{}: {}", url, e)))?;
        response
            .json::<T>()
            .await
            .map_err(|e| DomainError::HolidayCalendar(format!("{}: invalid body: {}", url, e)))
    }
}

// ── Wire DTOs ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublicHolidayDto {
    date: NaiveDate,
    local_name: Option<String>,
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LongWeekendDto {
    start_date: NaiveDate,
    end_date: NaiveDate,
    day_count: u32,
}

impl From<PublicHolidayDto> for Holiday {
    fn from(dto: PublicHolidayDto) -> Self {
        Holiday {
            date: dto.date,
            name: dto.local_name.unwrap_or(dto.name),
        }
    }
}

impl From<LongWeekendDto> for LongWeekend {
    fn from(dto: LongWeekendDto) -> Self {
        LongWeekend {
            start_date: dto.start_date,
            end_date: dto.end_date,
            day_count: dto.day_count,
        }
    }
}

// ── HolidayCalendar impl ────────────────────────────────────────

#[async_trait]
impl HolidayCalendar for NagerHolidayCalendar {
    async fn holidays_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Holiday>> {
        let mut holidays = Vec::new();
        for year in start.year()..=end.year() {
            let url = format!(
                "{}/api/v3/PublicHolidays/{}/{}",
                self.config.base_url, year, self.config.country_code
            );
            let page: Vec<PublicHolidayDto> = self.fetch(url).await?;
            holidays.extend(
                page.into_iter()
                    .map(Holiday::from)
                    .filter(|h| h.date >= start && h.date <= end),
            );
        }
        Ok(holidays)
    }

    async fn long_weekends_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<LongWeekend>> {
        let mut weekends = Vec::new();
        for year in start.year()..=end.year() {
            let url = format!(
                "{}/api/v3/LongWeekend/{}/{}",
                self.config.base_url, year, self.config.country_code
            );
            let page: Vec<LongWeekendDto> = self.fetch(url).await?;
            weekends.extend(
                page.into_iter()
                    .map(LongWeekend::from)
                    .filter(|lw| lw.start_date <= end && lw.end_date >= start),
            );
        }
        Ok(weekends)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_holiday_payload_parses() {
        let body = r#"[
            {"date":"2026-12-25","localName":"Hari Raya Natal","name":"Christmas Day","countryCode":"ID","fixed":true,"global":true,"types":["Public"]},
            {"date":"2026-01-01","localName":null,"name":"New Year's Day","countryCode":"ID","fixed":true,"global":true,"types":["Public"]}
        ]"#;
        let parsed: Vec<PublicHolidayDto> = serde_json::from_str(body).unwrap();
        let holidays: Vec<Holiday> = parsed.into_iter().map(Holiday::from).collect();
        assert_eq!(holidays[0].name, "Hari Raya Natal");
        assert_eq!(holidays[0].date, "2026-12-25".parse().unwrap());
        // missing localName falls back to the English name
        assert_eq!(holidays[1].name, "New Year's Day");
    }

    #[test]
    fn long_weekend_payload_parses() {
        let body = r#"[
            {"startDate":"2026-05-01","endDate":"2026-05-03","dayCount":3,"needBridgeDay":false}
        ]"#;
        let parsed: Vec<LongWeekendDto> = serde_json::from_str(body).unwrap();
        let lw = LongWeekend::from(parsed.into_iter().next().unwrap());
        assert_eq!(lw.day_count, 3);
        assert_eq!(lw.days().count(), 3);
    }

    #[test]
    fn config_default_has_sane_timeout() {
        let cfg = HolidayApiConfig::default();
        assert!(cfg.timeout_secs > 0);
        assert!(cfg.base_url.starts_with("https://"));
    }
}
