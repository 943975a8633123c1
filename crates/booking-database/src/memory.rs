//! In-memory repositories using Tokio read/write locks.
//!
//! Mirrors the constraints the PostgreSQL schema enforces: case-insensitive
//! unique emails, reservations that must reference existing rows, and
//! `ON DELETE RESTRICT` for referenced identities and services.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use booking_core::error::AppError;
use booking_core::result::AppResult;
use booking_entity::identity::{CreateIdentity, Identity, UpdateIdentity};
use booking_entity::reservation::{
    CreateReservation, Reservation, ReservationFilter, UpdateReservation,
};
use booking_entity::service::{CreateService, Service, UpdateService};

use crate::repositories::{IdentityRepository, ReservationRepository, ServiceRepository};

/// Every table plus its id sequence.
#[derive(Debug, Default)]
struct Tables {
    identities: BTreeMap<i64, Identity>,
    services: BTreeMap<i64, Service>,
    reservations: BTreeMap<i64, Reservation>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.identities
            .values()
            .any(|i| Some(i.id) != except && i.email.eq_ignore_ascii_case(email))
    }

    fn check_references(&self, identity_id: i64, service_id: i64) -> AppResult<()> {
        if !self.identities.contains_key(&identity_id) || !self.services.contains_key(&service_id)
        {
            return Err(AppError::validation(
                "Referenced identity or service does not exist",
            ));
        }
        Ok(())
    }
}

/// Shared in-memory store implementing every repository trait.
///
/// Suitable for tests and single-process demo runs only; nothing survives a
/// restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Identity>> {
        Ok(self.tables.read().await.identities.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>> {
        let tables = self.tables.read().await;
        Ok(tables
            .identities
            .values()
            .find(|i| i.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<Identity>> {
        Ok(self.tables.read().await.identities.values().cloned().collect())
    }

    async fn create(&self, input: &CreateIdentity) -> AppResult<Identity> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&input.email, None) {
            return Err(AppError::conflict("Email is already registered"));
        }

        let now = Utc::now();
        let identity = Identity {
            id: tables.next_id(),
            name: input.name.clone(),
            email: input.email.clone(),
            credential: input.credential.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.identities.insert(identity.id, identity.clone());
        debug!(identity_id = identity.id, "Stored identity in memory");
        Ok(identity)
    }

    async fn update(&self, id: i64, input: &UpdateIdentity) -> AppResult<Option<Identity>> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &input.email {
            if tables.email_taken(email, Some(id)) {
                return Err(AppError::conflict("Email is already registered"));
            }
        }

        Ok(tables.identities.get_mut(&id).map(|identity| {
            input.apply_to(identity, Utc::now());
            identity.clone()
        }))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.reservations.values().any(|r| r.identity_id == id) {
            return Err(AppError::conflict(
                "Record is referenced by existing reservations",
            ));
        }
        Ok(tables.identities.remove(&id).is_some())
    }
}

#[async_trait]
impl ServiceRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Service>> {
        Ok(self.tables.read().await.services.get(&id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Service>> {
        Ok(self.tables.read().await.services.values().cloned().collect())
    }

    async fn create(&self, input: &CreateService) -> AppResult<Service> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let service = Service {
            id: tables.next_id(),
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price,
            created_at: now,
            updated_at: now,
        };
        tables.services.insert(service.id, service.clone());
        Ok(service)
    }

    async fn update(&self, id: i64, input: &UpdateService) -> AppResult<Option<Service>> {
        let mut tables = self.tables.write().await;
        Ok(tables.services.get_mut(&id).map(|service| {
            input.apply_to(service, Utc::now());
            service.clone()
        }))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.reservations.values().any(|r| r.service_id == id) {
            return Err(AppError::conflict(
                "Record is referenced by existing reservations",
            ));
        }
        Ok(tables.services.remove(&id).is_some())
    }
}

#[async_trait]
impl ReservationRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Reservation>> {
        Ok(self.tables.read().await.reservations.get(&id).cloned())
    }

    async fn list(&self, filter: &ReservationFilter) -> AppResult<Vec<Reservation>> {
        let tables = self.tables.read().await;
        let mut found: Vec<Reservation> = tables
            .reservations
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        found.sort_by_key(|r| (r.reserved_at, r.id));
        Ok(found)
    }

    async fn create(&self, input: &CreateReservation) -> AppResult<Reservation> {
        let mut tables = self.tables.write().await;
        tables.check_references(input.identity_id, input.service_id)?;

        let now = Utc::now();
        let reservation = Reservation {
            id: tables.next_id(),
            identity_id: input.identity_id,
            service_id: input.service_id,
            reserved_at: input.reserved_at,
            notes: input.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.reservations.insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn update(
        &self,
        id: i64,
        input: &UpdateReservation,
    ) -> AppResult<Option<Reservation>> {
        let mut tables = self.tables.write().await;
        let Some(existing) = tables.reservations.get(&id) else {
            return Ok(None);
        };

        let mut updated = existing.clone();
        input.apply_to(&mut updated, Utc::now());
        tables.check_references(updated.identity_id, updated.service_id)?;
        tables.reservations.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.tables.write().await.reservations.remove(&id).is_some())
    }
}
