//! Rates HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::application::rates::service::{CreateRateCommand, UpdateRateCommand};
use crate::application::rates::{PeakSeasonRateService, PricingService};
use crate::domain::rate::AdjustmentType;
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiError, ApiResponse, TenantId};

use super::dto::*;

/// Application state for rate handlers.
#[derive(Clone)]
pub struct RatesAppState {
    pub pricing: Arc<PricingService>,
    pub rate_service: Arc<PeakSeasonRateService>,
}

fn validation_err(e: validator::ValidationErrors) -> ApiError {
    ApiError(DomainError::InvalidRequest(e.to_string()))
}

#[utoipa::path(
    get,
    path = "/api/v1/rates/{property_id}",
    tag = "Rates",
    params(
        ("property_id" = i32, Path, description = "Property ID"),
        DateQuery
    ),
    responses(
        (status = 200, description = "Per-room adjusted rates", body = ApiResponse<Vec<RoomRateDto>>),
        (status = 404, description = "Property not found")
    )
)]
pub async fn room_rates(
    State(state): State<RatesAppState>,
    Path(property_id): Path<i32>,
    Query(query): Query<DateQuery>,
) -> Result<Json<ApiResponse<Vec<RoomRateDto>>>, ApiError> {
    let rates = state.pricing.room_rates_on(property_id, query.date).await?;
    Ok(Json(ApiResponse::success(
        rates.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/rates/{property_id}/daily",
    tag = "Rates",
    params(
        ("property_id" = i32, Path, description = "Property ID"),
        DateRangeQuery
    ),
    responses(
        (status = 200, description = "Lowest adjusted price per day", body = ApiResponse<Vec<DailyRateDto>>),
        (status = 404, description = "Property not found")
    )
)]
pub async fn daily_rates(
    State(state): State<RatesAppState>,
    Path(property_id): Path<i32>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<ApiResponse<Vec<DailyRateDto>>>, ApiError> {
    let days = state
        .pricing
        .daily_lowest(property_id, query.start_date, query.end_date)
        .await?;
    Ok(Json(ApiResponse::success(
        days.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/rates/{property_id}/daily/cumulative",
    tag = "Rates",
    params(
        ("property_id" = i32, Path, description = "Property ID"),
        DateRangeQuery
    ),
    responses(
        (status = 200, description = "Running sum of daily lowest prices", body = ApiResponse<Vec<CumulativeDailyRateDto>>),
        (status = 404, description = "Property not found")
    )
)]
pub async fn cumulative_daily_rates(
    State(state): State<RatesAppState>,
    Path(property_id): Path<i32>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<ApiResponse<Vec<CumulativeDailyRateDto>>>, ApiError> {
    let days = state
        .pricing
        .daily_cumulative(property_id, query.start_date, query.end_date)
        .await?;
    Ok(Json(ApiResponse::success(
        days.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/rates/properties/{property_id}",
    tag = "Rates",
    params(("property_id" = i32, Path, description = "Property ID")),
    request_body = CreateRateRequest,
    responses(
        (status = 201, description = "Rate created", body = ApiResponse<RateDto>),
        (status = 400, description = "Invalid dates, conflicting rate or percentage above 100"),
        (status = 403, description = "Caller does not own the property"),
        (status = 404, description = "Property not found")
    )
)]
pub async fn create_rate(
    State(state): State<RatesAppState>,
    TenantId(tenant_id): TenantId,
    Path(property_id): Path<i32>,
    Json(req): Json<CreateRateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RateDto>>), ApiError> {
    req.validate().map_err(validation_err)?;

    let rate = state
        .rate_service
        .create_manual_rate(
            tenant_id,
            property_id,
            CreateRateCommand {
                start_date: req.start_date,
                end_date: req.end_date,
                adjustment_rate: req.adjustment_rate,
                adjustment_type: AdjustmentType::from_str(&req.adjustment_type),
                reason: req.reason,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::created(rate.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/rates/{rate_id}",
    tag = "Rates",
    params(("rate_id" = i32, Path, description = "Peak season rate ID")),
    request_body = UpdateRateRequest,
    responses(
        (status = 200, description = "Rate updated", body = ApiResponse<RateDto>),
        (status = 400, description = "Started window or conflicting dates"),
        (status = 403, description = "Caller does not own the property"),
        (status = 404, description = "Rate not found")
    )
)]
pub async fn update_rate(
    State(state): State<RatesAppState>,
    TenantId(tenant_id): TenantId,
    Path(rate_id): Path<i32>,
    Json(req): Json<UpdateRateRequest>,
) -> Result<Json<ApiResponse<RateDto>>, ApiError> {
    req.validate().map_err(validation_err)?;

    let rate = state
        .rate_service
        .update_rate(
            tenant_id,
            rate_id,
            UpdateRateCommand {
                start_date: req.start_date,
                end_date: req.end_date,
                adjustment_rate: req.adjustment_rate,
                adjustment_type: req.adjustment_type.as_deref().map(AdjustmentType::from_str),
                reason: req.reason,
            },
        )
        .await?;
    Ok(Json(ApiResponse::success(rate.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/rates/{rate_id}",
    tag = "Rates",
    params(("rate_id" = i32, Path, description = "Peak season rate ID")),
    responses(
        (status = 200, description = "Rate removed"),
        (status = 403, description = "Caller does not own the property"),
        (status = 404, description = "Rate not found")
    )
)]
pub async fn delete_rate(
    State(state): State<RatesAppState>,
    TenantId(tenant_id): TenantId,
    Path(rate_id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.rate_service.delete_rate(tenant_id, rate_id).await?;
    Ok(Json(ApiResponse::message("rate removed")))
}
