//! # booking-database
//!
//! PostgreSQL connection management, migrations, and the repository
//! implementations for identities, services, and reservations. An
//! in-memory implementation of the same traits backs tests and
//! database-less runs.

pub mod connection;
pub mod error;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use repositories::{
    IdentityRepository, Repositories, ReservationRepository, ServiceRepository,
};
