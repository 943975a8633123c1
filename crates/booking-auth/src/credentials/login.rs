//! Login flow: verify the password, then issue an access token.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use booking_core::error::{AppError, ErrorKind};
use booking_database::IdentityRepository;
use booking_entity::identity::{Credential, Identity, UpdateIdentity};

use super::{hash_blocking, verify_blocking};
use crate::jwt::{IssuedToken, SigningKey, TokenIssuer};
use crate::password::PasswordHasher;

/// Shared response for every failed login, whatever the cause.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

fn invalid_credentials() -> AppError {
    AppError::authentication(INVALID_CREDENTIALS)
}

/// Authenticates identities by email and password.
#[derive(Clone)]
pub struct LoginService {
    identities: Arc<dyn IdentityRepository>,
    hasher: PasswordHasher,
    issuer: TokenIssuer,
    /// Verified against when the email is unknown, so both failure paths
    /// cost one Argon2 verification.
    decoy: Credential,
}

impl std::fmt::Debug for LoginService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginService")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

impl LoginService {
    /// Creates the login service. Hashes the decoy credential once.
    pub fn new(
        identities: Arc<dyn IdentityRepository>,
        hasher: PasswordHasher,
        issuer: TokenIssuer,
    ) -> Result<Self, AppError> {
        let decoy = hasher.hash_password(&SigningKey::generate_base64())?;
        Ok(Self {
            identities,
            hasher,
            issuer,
            decoy,
        })
    }

    /// Performs the login flow:
    ///
    /// 1. Reject blank fields
    /// 2. Look up the identity by email
    /// 3. Verify the password (against a decoy when the email is unknown)
    /// 4. Upgrade legacy or outdated material to fresh Argon2id
    /// 5. Issue the access token
    ///
    /// Unknown email, wrong password, and corrupt stored material all yield
    /// the same authentication error.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AppError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }

        let Some(identity) = self.identities.find_by_email(email).await? else {
            // Same Argon2 cost as the known-email path.
            let _ = verify_blocking(&self.hasher, password, &self.decoy).await;
            debug!("Login rejected: unknown email");
            return Err(invalid_credentials());
        };

        match verify_blocking(&self.hasher, password, &identity.credential).await {
            Ok(true) => {}
            Ok(false) => {
                debug!(identity_id = identity.id, "Login rejected: wrong password");
                return Err(invalid_credentials());
            }
            Err(e) if e.kind == ErrorKind::CorruptCredential => {
                error!(
                    identity_id = identity.id,
                    error = %e.message,
                    "Stored credential is corrupt"
                );
                return Err(invalid_credentials());
            }
            Err(e) => return Err(e),
        }

        if self.hasher.needs_rehash(&identity.credential) {
            self.upgrade_credential(&identity, password).await;
        }

        let token = self.issuer.issue(&identity)?;
        info!(identity_id = identity.id, "Login successful");
        Ok(token)
    }

    /// Replaces outdated material after a successful verification. Failures
    /// are logged and do not fail the login.
    async fn upgrade_credential(&self, identity: &Identity, password: &str) {
        let credential = match hash_blocking(&self.hasher, password).await {
            Ok(credential) => credential,
            Err(e) => {
                warn!(identity_id = identity.id, error = %e, "Credential rehash failed");
                return;
            }
        };

        let changes = UpdateIdentity {
            credential: Some(credential),
            ..UpdateIdentity::default()
        };
        match self.identities.update(identity.id, &changes).await {
            Ok(_) => info!(identity_id = identity.id, "Credential upgraded to Argon2id"),
            Err(e) => {
                warn!(identity_id = identity.id, error = %e, "Failed to store upgraded credential")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use base64::{Engine, engine::general_purpose::STANDARD};
    use chrono::Duration;

    use booking_core::config::AuthConfig;
    use booking_database::Repositories;
    use booking_entity::identity::CreateIdentity;

    use super::*;
    use crate::credentials::CredentialStore;
    use crate::jwt::{TokenSettings, TokenValidator};
    use crate::password::hasher::{derive_pbkdf2, generate_salt};

    struct Fixture {
        login: LoginService,
        store: CredentialStore,
        repo: Arc<dyn IdentityRepository>,
        validator: TokenValidator,
    }

    fn fixture() -> Fixture {
        let key = SigningKey::from_base64(&STANDARD.encode([3u8; 32])).unwrap();
        let settings = Arc::new(
            TokenSettings::new(key, "booking-api", "booking-clients", Duration::hours(1)).unwrap(),
        );
        let repos = Repositories::memory();
        let hasher = PasswordHasher::new();
        Fixture {
            login: LoginService::new(
                repos.identities.clone(),
                hasher.clone(),
                TokenIssuer::new(settings.clone()),
            )
            .unwrap(),
            store: CredentialStore::new(repos.identities.clone(), hasher, &AuthConfig::default()),
            repo: repos.identities,
            validator: TokenValidator::new(settings),
        }
    }

    #[tokio::test]
    async fn test_login_issues_valid_token() {
        let f = fixture();
        let ana = f.store.create("Ana", "ana@example.com", "secret123").await.unwrap();

        let token = f.login.login("ana@example.com", "secret123").await.unwrap();
        assert_eq!(token.token.split('.').count(), 3);

        let claims = f.validator.validate(&token.token).unwrap();
        assert_eq!(claims.identity_id().unwrap(), ana.id);
        assert_eq!(claims.name, "Ana");
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_look_identical() {
        let f = fixture();
        f.store.create("Ana", "ana@example.com", "secret123").await.unwrap();

        let unknown = f.login.login("nobody@example.com", "secret123").await.unwrap_err();
        let wrong = f.login.login("ana@example.com", "wrong-pass").await.unwrap_err();
        assert_eq!(unknown.kind, ErrorKind::Authentication);
        assert_eq!(unknown.kind, wrong.kind);
        assert_eq!(unknown.message, wrong.message);
    }

    #[tokio::test]
    async fn test_blank_fields_are_validation_errors() {
        let f = fixture();
        assert_eq!(
            f.login.login("  ", "secret123").await.unwrap_err().kind,
            ErrorKind::Validation
        );
        assert_eq!(
            f.login.login("ana@example.com", "").await.unwrap_err().kind,
            ErrorKind::Validation
        );
    }

    #[tokio::test]
    async fn test_corrupt_credential_is_generic_failure() {
        let f = fixture();
        let input = CreateIdentity::new(
            "Ana",
            "ana@example.com",
            Credential::self_salted("garbage"),
        )
        .unwrap();
        f.repo.create(&input).await.unwrap();

        let err = f.login.login("ana@example.com", "secret123").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_legacy_credential_upgraded_on_login() {
        let f = fixture();
        let salt = generate_salt();
        let digest = derive_pbkdf2("secret123", &salt).unwrap();
        let input = CreateIdentity::new(
            "Legacy",
            "legacy@example.com",
            Credential::salted(digest, salt),
        )
        .unwrap();
        let legacy = f.repo.create(&input).await.unwrap();

        f.login.login("legacy@example.com", "secret123").await.unwrap();

        let stored = f.repo.find_by_id(legacy.id).await.unwrap().unwrap();
        assert!(stored.credential.salt().is_none());
        assert!(stored.credential.password_hash().starts_with("$argon2id$"));

        // Still logs in with the same password after the upgrade.
        f.login.login("legacy@example.com", "secret123").await.unwrap();
    }

    #[tokio::test]
    async fn test_login_ignores_email_case() {
        let f = fixture();
        f.store.create("Ana", "ana@example.com", "secret123").await.unwrap();
        assert!(f.login.login("ANA@Example.com", "secret123").await.is_ok());
    }
}
