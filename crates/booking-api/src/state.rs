//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use booking_auth::{
    CredentialStore, LoginService, PasswordHasher, TokenIssuer, TokenSettings, TokenValidator,
};
use booking_core::config::AppConfig;
use booking_core::error::AppError;
use booking_database::Repositories;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Repositories ─────────────────────────────────────────
    /// Identity, service, and reservation persistence
    pub repos: Repositories,

    // ── Auth ─────────────────────────────────────────────────
    /// Signup and identity writes
    pub credentials: CredentialStore,
    /// Email + password login
    pub login: LoginService,
    /// Bearer token validator used by the request gate
    pub validator: TokenValidator,
}

impl AppState {
    /// Wires the auth services over the given repositories.
    ///
    /// Fails with a configuration error when the token settings are invalid,
    /// so a bad signing key stops startup.
    pub fn new(config: AppConfig, repos: Repositories) -> Result<Self, AppError> {
        let settings = Arc::new(TokenSettings::from_config(&config.auth)?);
        let hasher = PasswordHasher::new();

        let credentials =
            CredentialStore::new(repos.identities.clone(), hasher.clone(), &config.auth);
        let login = LoginService::new(
            repos.identities.clone(),
            hasher,
            TokenIssuer::new(Arc::clone(&settings)),
        )?;
        let validator = TokenValidator::new(settings);

        Ok(Self {
            config: Arc::new(config),
            repos,
            credentials,
            login,
            validator,
        })
    }
}
