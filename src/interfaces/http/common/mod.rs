//! Shared HTTP plumbing: response envelope, error body, tenant identity.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::DomainError;

/// Success envelope: `{status, message, data}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// HTTP status code mirrored into the body
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: 200,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            status: 201,
            message: "created".to_string(),
            data: Some(data),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: 200,
            message: message.into(),
            data: None,
        }
    }
}

/// Error envelope: `{status, error, message}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub status: u16,
    /// Stable error kind, e.g. `PropertyNotFound`, `ConflictingRate`
    pub error: String,
    pub message: String,
}

/// Boundary error: wraps a `DomainError` and maps its kind to an HTTP
/// status through one static lookup.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

fn status_and_kind(e: &DomainError) -> (StatusCode, String) {
    match e {
        DomainError::NotFound { entity, .. } => {
            (StatusCode::NOT_FOUND, format!("{}NotFound", entity))
        }
        DomainError::InvalidDate(_) => (StatusCode::BAD_REQUEST, "InvalidDate".into()),
        DomainError::ConflictingRate(_) => (StatusCode::BAD_REQUEST, "ConflictingRate".into()),
        DomainError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "InvalidRequest".into()),
        DomainError::Unauthorized(_) => (StatusCode::FORBIDDEN, "Unauthorized".into()),
        DomainError::RoomUnavailable { .. } => (StatusCode::CONFLICT, "RoomUnavailable".into()),
        DomainError::HolidayCalendar(_) => (StatusCode::BAD_GATEWAY, "HolidayCalendar".into()),
        DomainError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal".into()),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = status_and_kind(&self.0);
        let body = ErrorBody {
            status: status.as_u16(),
            error: kind,
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Acting tenant identity, taken from the `X-Tenant-Id` header issued by
/// the external auth gateway. Replaces any notion of an implicit
/// logged-in-user context.
#[derive(Debug, Clone, Copy)]
pub struct TenantId(pub Uuid);

impl<S> FromRequestParts<S> for TenantId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get("x-tenant-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ApiError(DomainError::Unauthorized(
                    "missing X-Tenant-Id header".into(),
                ))
            })?;
        let id = Uuid::parse_str(raw).map_err(|_| {
            ApiError(DomainError::Unauthorized(
                "X-Tenant-Id is not a valid UUID".into(),
            ))
        })?;
        Ok(TenantId(id))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_map_to_expected_statuses() {
        let cases = [
            (DomainError::property_not_found(1), 404, "PropertyNotFound"),
            (DomainError::rate_not_found(1), 404, "PeakSeasonRateNotFound"),
            (DomainError::room_not_found(1), 404, "RoomNotFound"),
            (
                DomainError::availability_not_found(1),
                404,
                "RoomAvailabilityNotFound",
            ),
            (DomainError::InvalidDate("x".into()), 400, "InvalidDate"),
            (
                DomainError::ConflictingRate("x".into()),
                400,
                "ConflictingRate",
            ),
            (
                DomainError::InvalidRequest("x".into()),
                400,
                "InvalidRequest",
            ),
            (DomainError::Unauthorized("x".into()), 403, "Unauthorized"),
            (
                DomainError::RoomUnavailable {
                    room_id: 1,
                    start: "2026-06-10".parse().unwrap(),
                    end: "2026-06-11".parse().unwrap(),
                },
                409,
                "RoomUnavailable",
            ),
            (DomainError::Storage("x".into()), 500, "Internal"),
        ];
        for (err, status, kind) in cases {
            let (code, k) = status_and_kind(&err);
            assert_eq!(code.as_u16(), status, "{:?}", k);
            assert_eq!(k, kind);
        }
    }

    #[test]
    fn success_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::success(42)).unwrap();
        assert_eq!(body["status"], 200);
        assert_eq!(body["message"], "success");
        assert_eq!(body["data"], 42);
    }

    #[test]
    fn message_envelope_omits_data() {
        let body = serde_json::to_value(ApiResponse::<()>::message("removed")).unwrap();
        assert!(body.get("data").is_none());
    }
}
