//! Signing key generation.

use booking_auth::SigningKey;

/// Print a base64-encoded random key for `auth.signing_key`
pub fn execute() {
    println!("{}", SigningKey::generate_base64());
}
