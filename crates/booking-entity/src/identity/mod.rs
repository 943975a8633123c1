//! Identity (client/customer) entities.

pub mod credential;
pub mod email;
pub mod model;

pub use credential::Credential;
pub use email::{normalize_email, validate_email};
pub use model::{CreateIdentity, Identity, UpdateIdentity, validate_name};
