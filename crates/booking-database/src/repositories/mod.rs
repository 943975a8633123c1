//! Repository traits and their PostgreSQL implementations.
//!
//! Handlers and services only ever see the traits, so the same code runs
//! against PostgreSQL in production and against [`MemoryStore`] in tests.
//!
//! [`MemoryStore`]: crate::memory::MemoryStore

pub mod identity;
pub mod reservation;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use booking_core::result::AppResult;
use booking_entity::identity::{CreateIdentity, Identity, UpdateIdentity};
use booking_entity::reservation::{
    CreateReservation, Reservation, ReservationFilter, UpdateReservation,
};
use booking_entity::service::{CreateService, Service, UpdateService};

use crate::memory::MemoryStore;

pub use identity::PgIdentityRepository;
pub use reservation::PgReservationRepository;
pub use service::PgServiceRepository;

/// Persistence for identities and their credential material.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Find an identity by primary key.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Identity>>;

    /// Find an identity by email, ignoring case.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>>;

    /// List every identity, oldest first.
    async fn list(&self) -> AppResult<Vec<Identity>>;

    /// Insert a new identity. A taken email yields a conflict.
    async fn create(&self, input: &CreateIdentity) -> AppResult<Identity>;

    /// Apply a partial update. Returns `None` when the id does not exist.
    async fn update(&self, id: i64, input: &UpdateIdentity) -> AppResult<Option<Identity>>;

    /// Delete an identity. Returns `false` when the id does not exist.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// Persistence for bookable services.
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Service>>;

    async fn list(&self) -> AppResult<Vec<Service>>;

    async fn create(&self, input: &CreateService) -> AppResult<Service>;

    async fn update(&self, id: i64, input: &UpdateService) -> AppResult<Option<Service>>;

    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// Persistence for reservations.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Reservation>>;

    /// List reservations matching the filter, ordered by reserved time.
    async fn list(&self, filter: &ReservationFilter) -> AppResult<Vec<Reservation>>;

    /// Insert a reservation. Unknown identity or service ids are rejected
    /// as validation errors.
    async fn create(&self, input: &CreateReservation) -> AppResult<Reservation>;

    async fn update(
        &self,
        id: i64,
        input: &UpdateReservation,
    ) -> AppResult<Option<Reservation>>;

    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// The full set of repositories behind shared trait objects.
#[derive(Clone)]
pub struct Repositories {
    pub identities: Arc<dyn IdentityRepository>,
    pub services: Arc<dyn ServiceRepository>,
    pub reservations: Arc<dyn ReservationRepository>,
}

impl Repositories {
    /// Repositories backed by a PostgreSQL pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            identities: Arc::new(PgIdentityRepository::new(pool.clone())),
            services: Arc::new(PgServiceRepository::new(pool.clone())),
            reservations: Arc::new(PgReservationRepository::new(pool)),
        }
    }

    /// Repositories sharing one fresh in-memory store.
    pub fn memory() -> Self {
        Self::from_store(MemoryStore::new())
    }

    /// Repositories over an existing in-memory store.
    pub fn from_store(store: MemoryStore) -> Self {
        Self {
            identities: Arc::new(store.clone()),
            services: Arc::new(store.clone()),
            reservations: Arc::new(store),
        }
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}
