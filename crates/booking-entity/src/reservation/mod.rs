//! Reservation entities.

pub mod filter;
pub mod model;

pub use filter::ReservationFilter;
pub use model::{CreateReservation, Reservation, UpdateReservation};
