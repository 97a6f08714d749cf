//! Manual peak-season rate creation, update and removal.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::rate::{AdjustmentType, PeakSeasonRate};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

use super::validator::RateValidator;

/// Fields for a new manual rate
#[derive(Debug, Clone)]
pub struct CreateRateCommand {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub adjustment_rate: Decimal,
    pub adjustment_type: AdjustmentType,
    pub reason: Option<String>,
}

/// Partial update: present fields overwrite, absent fields keep the
/// existing value.
#[derive(Debug, Clone, Default)]
pub struct UpdateRateCommand {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub adjustment_rate: Option<Decimal>,
    pub adjustment_type: Option<AdjustmentType>,
    pub reason: Option<String>,
}

pub struct PeakSeasonRateService {
    repos: Arc<dyn RepositoryProvider>,
    validator: RateValidator,
}

impl PeakSeasonRateService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        let validator = RateValidator::new(repos.clone());
        Self { repos, validator }
    }

    pub async fn create_manual_rate(
        &self,
        tenant_id: Uuid,
        property_id: i32,
        cmd: CreateRateCommand,
    ) -> DomainResult<PeakSeasonRate> {
        let property = self
            .validator
            .validate_property_ownership(tenant_id, property_id)
            .await?;

        validate_adjustment(cmd.adjustment_rate, cmd.adjustment_type)?;
        self.validator
            .validate_rate_date_range(property.id, cmd.start_date, cmd.end_date, None)
            .await?;

        let rate = PeakSeasonRate::new_manual(
            property.id,
            cmd.start_date,
            cmd.end_date,
            cmd.adjustment_rate,
            cmd.adjustment_type,
            cmd.reason,
        );
        self.repos.rates().save(rate).await
    }

    pub async fn update_rate(
        &self,
        tenant_id: Uuid,
        rate_id: i32,
        cmd: UpdateRateCommand,
    ) -> DomainResult<PeakSeasonRate> {
        let existing = self.validator.find_rate(rate_id).await?;
        self.validator
            .validate_property_ownership(tenant_id, existing.property_id)
            .await?;

        // A window that has already begun keeps its start date.
        let today = Utc::now().date_naive();
        if let Some(new_start) = cmd.start_date {
            if new_start != existing.start_date && existing.has_begun(today) {
                return Err(DomainError::InvalidDate(
                    "start date cannot be changed once the window has begun".into(),
                ));
            }
        }

        let mut updated = existing.clone();
        if let Some(start) = cmd.start_date {
            updated.start_date = start;
        }
        if let Some(end) = cmd.end_date {
            updated.end_date = end;
        }
        if let Some(rate) = cmd.adjustment_rate {
            updated.adjustment_rate = rate;
        }
        if let Some(ty) = cmd.adjustment_type {
            updated.adjustment_type = ty;
        }
        if let Some(reason) = cmd.reason {
            updated.reason = Some(reason);
        }

        validate_adjustment(updated.adjustment_rate, updated.adjustment_type)?;
        self.validator
            .validate_rate_date_range(
                updated.property_id,
                updated.start_date,
                updated.end_date,
                Some(updated.id),
            )
            .await?;

        updated.updated_at = Utc::now();
        self.repos.rates().update(updated.clone()).await?;
        Ok(updated)
    }

    pub async fn delete_rate(&self, tenant_id: Uuid, rate_id: i32) -> DomainResult<()> {
        let existing = self.validator.find_rate(rate_id).await?;
        self.validator
            .validate_property_ownership(tenant_id, existing.property_id)
            .await?;
        self.repos.rates().soft_delete(rate_id, Utc::now()).await
    }
}

/// Percentage adjustments must stay within 0–100.
fn validate_adjustment(rate: Decimal, ty: AdjustmentType) -> DomainResult<()> {
    if rate < Decimal::ZERO {
        return Err(DomainError::InvalidRequest(
            "adjustment rate cannot be negative".into(),
        ));
    }
    if ty == AdjustmentType::Percentage && rate > Decimal::from(100) {
        return Err(DomainError::InvalidRequest(format!(
            "percentage adjustment {} exceeds 100",
            rate
        )));
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────
