//! JWT signing key, token settings, claims, issuance, and validation.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod key;
pub mod settings;

pub use claims::Claims;
pub use decoder::{TokenRejection, TokenValidator};
pub use encoder::{IssuedToken, TokenIssuer};
pub use key::SigningKey;
pub use settings::TokenSettings;
