//! Room repository interface

use async_trait::async_trait;

use super::model::Room;
use crate::domain::DomainResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Find room by ID (live rows only)
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>>;

    /// All live rooms of a property
    async fn find_by_property(&self, property_id: i32) -> DomainResult<Vec<Room>>;
}
