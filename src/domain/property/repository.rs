//! Property repository interface

use async_trait::async_trait;

use super::model::Property;
use crate::domain::DomainResult;

#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Find property by ID (live rows only)
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Property>>;

    /// All live properties whose rate settings have automatic rates enabled
    async fn find_with_auto_rates_enabled(&self) -> DomainResult<Vec<Property>>;
}
