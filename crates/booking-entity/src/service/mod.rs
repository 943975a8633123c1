//! Bookable service entities.

pub mod model;

pub use model::{CreateService, Service, UpdateService};
