//! Availability HTTP handlers (tenant-facing manual blocks)
//!
//! Booking-derived windows are created and released by the booking
//! flow through `RoomAvailabilityService` directly; only manual blocks
//! are exposed over HTTP.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::availability::RoomAvailabilityService;
use crate::interfaces::http::common::{ApiError, ApiResponse, TenantId};

use super::dto::*;

/// Application state for availability handlers.
#[derive(Clone)]
pub struct AvailabilityAppState {
    pub availability: Arc<RoomAvailabilityService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/availability/rooms/{room_id}",
    tag = "Availability",
    params(("room_id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Live unavailability windows for the room", body = ApiResponse<Vec<AvailabilityDto>>),
        (status = 403, description = "Caller does not own the room"),
        (status = 404, description = "Room not found")
    )
)]
pub async fn room_windows(
    State(state): State<AvailabilityAppState>,
    TenantId(tenant_id): TenantId,
    Path(room_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<AvailabilityDto>>>, ApiError> {
    let windows = state.availability.room_windows(tenant_id, room_id).await?;
    Ok(Json(ApiResponse::success(
        windows.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/availability/rooms/{room_id}/block",
    tag = "Availability",
    params(("room_id" = i32, Path, description = "Room ID")),
    request_body = BlockDatesRequest,
    responses(
        (status = 201, description = "Dates blocked", body = ApiResponse<AvailabilityDto>),
        (status = 400, description = "Past start, inverted range or overlapping window"),
        (status = 403, description = "Caller does not own the room"),
        (status = 404, description = "Room not found")
    )
)]
pub async fn block_dates(
    State(state): State<AvailabilityAppState>,
    TenantId(tenant_id): TenantId,
    Path(room_id): Path<i32>,
    Json(req): Json<BlockDatesRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AvailabilityDto>>), ApiError> {
    let row = state
        .availability
        .block_dates(tenant_id, room_id, req.start_date, req.end_date)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::created(row.into()))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/availability/{availability_id}",
    tag = "Availability",
    params(("availability_id" = i32, Path, description = "Availability window ID")),
    responses(
        (status = 200, description = "Block removed"),
        (status = 400, description = "Window is booking-derived"),
        (status = 403, description = "Caller does not own the room or window"),
        (status = 404, description = "Window not found")
    )
)]
pub async fn unblock_dates(
    State(state): State<AvailabilityAppState>,
    TenantId(tenant_id): TenantId,
    Path(availability_id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .availability
        .unblock_dates(tenant_id, availability_id)
        .await?;
    Ok(Json(ApiResponse::message("block removed")))
}
