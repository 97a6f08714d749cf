use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Conflicting rate: {0}")]
    ConflictingRate(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Room {room_id} is unavailable between {start} and {end}")]
    RoomUnavailable {
        room_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Holiday calendar: {0}")]
    HolidayCalendar(String),

    #[error("Storage: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn property_not_found(id: i32) -> Self {
        Self::NotFound {
            entity: "Property",
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn room_not_found(id: i32) -> Self {
        Self::NotFound {
            entity: "Room",
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn rate_not_found(id: i32) -> Self {
        Self::NotFound {
            entity: "PeakSeasonRate",
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn availability_not_found(id: i32) -> Self {
        Self::NotFound {
            entity: "RoomAvailability",
            field: "id",
            value: id.to_string(),
        }
    }

    /// Whether this error is likely transient (DB connection lost,
    /// holiday API timeout) and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DomainError::Storage(_) | DomainError::HolidayCalendar(_)
        )
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

// ── Tests ──────────────────────────────────────────────────────
