//! Rate setting repository interface

use async_trait::async_trait;

use super::model::PropertyRateSetting;
use crate::domain::DomainResult;

#[async_trait]
pub trait RateSettingRepository: Send + Sync {
    /// Live settings row for a property, if one exists
    async fn find_by_property(&self, property_id: i32)
        -> DomainResult<Option<PropertyRateSetting>>;

    /// Insert or replace the single live settings row for the property
    async fn upsert(&self, setting: PropertyRateSetting) -> DomainResult<PropertyRateSetting>;
}
