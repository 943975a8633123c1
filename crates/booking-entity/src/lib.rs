//! # booking-entity
//!
//! Domain entity models for the booking service. Every struct in this crate
//! represents a database table row or the input needed to write one.
//! Row types additionally derive `sqlx::FromRow`.
//!
//! Ownership is one-directional: a reservation holds the ids of its identity
//! and service, and neither of those carries a reservation collection.

pub mod identity;
pub mod reservation;
pub mod service;
