//! In-memory repository provider for development and testing
//!
//! Backs every repository trait with DashMaps. The booking-path
//! check-then-insert is serialized through a single async mutex,
//! mirroring the transactional guarantee of the SeaORM implementation.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::availability::{RoomAvailability, RoomAvailabilityRepository};
use crate::domain::property::{Property, PropertyRepository};
use crate::domain::rate::{PeakSeasonRate, PeakSeasonRateRepository};
use crate::domain::rate_setting::{PropertyRateSetting, RateSettingRepository};
use crate::domain::room::{Room, RoomRepository};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

pub struct InMemoryRepositoryProvider {
    properties: DashMap<i32, Property>,
    rooms: DashMap<i32, Room>,
    rates: DashMap<i32, PeakSeasonRate>,
    settings: DashMap<i32, PropertyRateSetting>,
    availability: DashMap<i32, RoomAvailability>,
    rate_counter: AtomicI32,
    availability_counter: AtomicI32,
    /// Serializes the availability check-then-insert
    booking_lock: Mutex<()>,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self {
            properties: DashMap::new(),
            rooms: DashMap::new(),
            rates: DashMap::new(),
            settings: DashMap::new(),
            availability: DashMap::new(),
            rate_counter: AtomicI32::new(1),
            availability_counter: AtomicI32::new(1),
            booking_lock: Mutex::new(()),
        }
    }

    /// Test/dev helper: register a property owned by `tenant_id`
    pub fn seed_property(&self, id: i32, tenant_id: Uuid, name: &str) {
        self.properties.insert(
            id,
            Property {
                id,
                tenant_id,
                name: name.to_string(),
                deleted_at: None,
            },
        );
    }

    /// Test/dev helper: register a room under a property
    pub fn seed_room(&self, id: i32, property_id: i32, name: &str, base_price: Decimal) {
        self.rooms.insert(
            id,
            Room {
                id,
                property_id,
                name: name.to_string(),
                base_price,
                max_guests: 2,
                deleted_at: None,
            },
        );
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn properties(&self) -> &dyn PropertyRepository {
        self
    }

    fn rooms(&self) -> &dyn RoomRepository {
        self
    }

    fn rates(&self) -> &dyn PeakSeasonRateRepository {
        self
    }

    fn rate_settings(&self) -> &dyn RateSettingRepository {
        self
    }

    fn availability(&self) -> &dyn RoomAvailabilityRepository {
        self
    }
}

// ── PropertyRepository ──────────────────────────────────────────

#[async_trait]
impl PropertyRepository for InMemoryRepositoryProvider {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Property>> {
        Ok(self
            .properties
            .get(&id)
            .filter(|p| p.is_live())
            .map(|p| p.clone()))
    }

    async fn find_with_auto_rates_enabled(&self) -> DomainResult<Vec<Property>> {
        let mut found: Vec<Property> = self
            .properties
            .iter()
            .filter(|p| p.is_live())
            .filter(|p| {
                self.settings
                    .get(&p.id)
                    .map(|s| s.is_live() && s.use_auto_rates)
                    .unwrap_or(false)
            })
            .map(|p| p.clone())
            .collect();
        found.sort_by_key(|p| p.id);
        Ok(found)
    }
}

// ── RoomRepository ──────────────────────────────────────────────

#[async_trait]
impl RoomRepository for InMemoryRepositoryProvider {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>> {
        Ok(self.rooms.get(&id).filter(|r| r.is_live()).map(|r| r.clone()))
    }

    async fn find_by_property(&self, property_id: i32) -> DomainResult<Vec<Room>> {
        let mut found: Vec<Room> = self
            .rooms
            .iter()
            .filter(|r| r.property_id == property_id && r.is_live())
            .map(|r| r.clone())
            .collect();
        found.sort_by_key(|r| r.id);
        Ok(found)
    }
}

// ── PeakSeasonRateRepository ────────────────────────────────────

#[async_trait]
impl PeakSeasonRateRepository for InMemoryRepositoryProvider {
    async fn save(&self, mut rate: PeakSeasonRate) -> DomainResult<PeakSeasonRate> {
        rate.id = self.rate_counter.fetch_add(1, Ordering::SeqCst);
        self.rates.insert(rate.id, rate.clone());
        Ok(rate)
    }

    async fn update(&self, rate: PeakSeasonRate) -> DomainResult<()> {
        if !self.rates.contains_key(&rate.id) {
            return Err(DomainError::rate_not_found(rate.id));
        }
        self.rates.insert(rate.id, rate);
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<PeakSeasonRate>> {
        Ok(self.rates.get(&id).map(|r| r.clone()))
    }

    async fn find_live_for_property(&self, property_id: i32) -> DomainResult<Vec<PeakSeasonRate>> {
        let mut found: Vec<PeakSeasonRate> = self
            .rates
            .iter()
            .filter(|r| r.property_id == property_id && r.is_live())
            .map(|r| r.clone())
            .collect();
        found.sort_by_key(|r| r.id);
        Ok(found)
    }

    async fn find_automatic_in_window(
        &self,
        property_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<PeakSeasonRate>> {
        let mut found: Vec<PeakSeasonRate> = self
            .rates
            .iter()
            .filter(|r| {
                r.property_id == property_id
                    && r.is_live()
                    && r.source.is_automatic()
                    && r.overlaps(start, end)
            })
            .map(|r| r.clone())
            .collect();
        found.sort_by_key(|r| r.id);
        Ok(found)
    }

    async fn find_applicable(
        &self,
        property_id: i32,
        date: NaiveDate,
        at: DateTime<Utc>,
    ) -> DomainResult<Vec<PeakSeasonRate>> {
        let mut found: Vec<PeakSeasonRate> = self
            .rates
            .iter()
            .filter(|r| r.property_id == property_id && r.applies_to(date, at))
            .map(|r| r.clone())
            .collect();
        found.sort_by_key(|r| r.id);
        Ok(found)
    }

    async fn exists_overlapping(
        &self,
        property_id: i32,
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<i32>,
    ) -> DomainResult<bool> {
        Ok(self.rates.iter().any(|r| {
            r.property_id == property_id
                && r.is_live()
                && Some(r.id) != exclude_id
                && r.overlaps(start, end)
        }))
    }

    async fn soft_delete(&self, id: i32, at: DateTime<Utc>) -> DomainResult<()> {
        match self.rates.get_mut(&id) {
            Some(mut rate) => {
                rate.soft_delete(at);
                Ok(())
            }
            None => Err(DomainError::rate_not_found(id)),
        }
    }

    async fn purge_deleted_before(&self, cutoff: DateTime<Utc>) -> DomainResult<u64> {
        let before = self.rates.len();
        self.rates
            .retain(|_, r| !matches!(r.deleted_at, Some(at) if at < cutoff));
        Ok((before - self.rates.len()) as u64)
    }
}

// ── RateSettingRepository ───────────────────────────────────────

#[async_trait]
impl RateSettingRepository for InMemoryRepositoryProvider {
    async fn find_by_property(
        &self,
        property_id: i32,
    ) -> DomainResult<Option<PropertyRateSetting>> {
        Ok(self
            .settings
            .get(&property_id)
            .filter(|s| s.is_live())
            .map(|s| s.clone()))
    }

    async fn upsert(&self, setting: PropertyRateSetting) -> DomainResult<PropertyRateSetting> {
        self.settings.insert(setting.property_id, setting.clone());
        Ok(setting)
    }
}

// ── RoomAvailabilityRepository ──────────────────────────────────

#[async_trait]
impl RoomAvailabilityRepository for InMemoryRepositoryProvider {
    async fn insert_if_vacant(&self, mut row: RoomAvailability) -> DomainResult<RoomAvailability> {
        let _guard = self.booking_lock.lock().await;

        if row.is_live() {
            let conflict = self.availability.iter().any(|existing| {
                existing.room_id == row.room_id
                    && existing.is_live()
                    && existing.overlaps(row.start_date, row.end_date)
            });
            if conflict {
                return Err(DomainError::RoomUnavailable {
                    room_id: row.room_id,
                    start: row.start_date,
                    end: row.end_date,
                });
            }
        }

        row.id = self.availability_counter.fetch_add(1, Ordering::SeqCst);
        self.availability.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<RoomAvailability>> {
        Ok(self.availability.get(&id).map(|r| r.clone()))
    }

    async fn find_live_for_room(&self, room_id: i32) -> DomainResult<Vec<RoomAvailability>> {
        let mut found: Vec<RoomAvailability> = self
            .availability
            .iter()
            .filter(|r| r.room_id == room_id && r.is_live())
            .map(|r| r.clone())
            .collect();
        found.sort_by_key(|r| r.start_date);
        Ok(found)
    }

    async fn count_booking_rows(&self, room_id: i32) -> DomainResult<u64> {
        Ok(self
            .availability
            .iter()
            .filter(|r| r.room_id == room_id && r.is_live() && !r.is_manual)
            .count() as u64)
    }

    async fn soft_delete(&self, id: i32, at: DateTime<Utc>) -> DomainResult<()> {
        match self.availability.get_mut(&id) {
            Some(mut row) => {
                row.soft_delete(at);
                Ok(())
            }
            None => Err(DomainError::availability_not_found(id)),
        }
    }

    async fn soft_delete_manual_for_room(
        &self,
        room_id: i32,
        at: DateTime<Utc>,
    ) -> DomainResult<u64> {
        let mut removed = 0u64;
        for mut row in self.availability.iter_mut() {
            if row.room_id == room_id && row.is_live() && row.is_manual {
                row.soft_delete(at);
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn purge_deleted_before(&self, cutoff: DateTime<Utc>) -> DomainResult<u64> {
        let before = self.availability.len();
        self.availability
            .retain(|_, r| !matches!(r.deleted_at, Some(at) if at < cutoff));
        Ok((before - self.availability.len()) as u64)
    }
}

// ── Tests ──────────────────────────────────────────────────────
