//! Rate settings HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::application::rates::settings::UpdateRateSettingCommand;
use crate::application::rates::RateSettingsService;
use crate::domain::rate::AdjustmentType;
use crate::interfaces::http::common::{ApiError, ApiResponse, TenantId};

use super::dto::*;

/// Application state for rate-setting handlers.
#[derive(Clone)]
pub struct RateSettingsAppState {
    pub settings: Arc<RateSettingsService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/rate-settings/{property_id}",
    tag = "Rate Settings",
    params(("property_id" = i32, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Settings (lazily created on first access)", body = ApiResponse<RateSettingDto>),
        (status = 403, description = "Caller does not own the property"),
        (status = 404, description = "Property not found")
    )
)]
pub async fn get_rate_setting(
    State(state): State<RateSettingsAppState>,
    TenantId(tenant_id): TenantId,
    Path(property_id): Path<i32>,
) -> Result<Json<ApiResponse<RateSettingDto>>, ApiError> {
    let setting = state.settings.get_or_create(tenant_id, property_id).await?;
    Ok(Json(ApiResponse::success(setting.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/rate-settings/{property_id}",
    tag = "Rate Settings",
    params(("property_id" = i32, Path, description = "Property ID")),
    request_body = UpdateRateSettingRequest,
    responses(
        (status = 200, description = "Settings updated; reconciliation triggered", body = ApiResponse<RateSettingDto>),
        (status = 400, description = "Percentage adjustment above 100"),
        (status = 403, description = "Caller does not own the property"),
        (status = 404, description = "Property not found")
    )
)]
pub async fn update_rate_setting(
    State(state): State<RateSettingsAppState>,
    TenantId(tenant_id): TenantId,
    Path(property_id): Path<i32>,
    Json(req): Json<UpdateRateSettingRequest>,
) -> Result<Json<ApiResponse<RateSettingDto>>, ApiError> {
    let setting = state
        .settings
        .update(
            tenant_id,
            property_id,
            UpdateRateSettingCommand {
                use_auto_rates: req.use_auto_rates,
                holiday_adjustment_rate: req.holiday_adjustment_rate,
                holiday_adjustment_type: req
                    .holiday_adjustment_type
                    .as_deref()
                    .map(AdjustmentType::from_str),
                long_weekend_adjustment_rate: req.long_weekend_adjustment_rate,
                long_weekend_adjustment_type: req
                    .long_weekend_adjustment_type
                    .as_deref()
                    .map(AdjustmentType::from_str),
            },
        )
        .await?;
    Ok(Json(ApiResponse::success(setting.into())))
}
