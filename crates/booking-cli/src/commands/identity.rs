//! Identity management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use booking_auth::{CredentialStore, PasswordHasher};
use booking_core::config::{AppConfig, DatabaseProvider};
use booking_core::error::AppError;
use booking_database::{DatabasePool, Repositories};
use booking_entity::identity::Identity;

use crate::output::{self, OutputFormat};

/// Arguments for identity commands
#[derive(Debug, Args)]
pub struct IdentityArgs {
    /// Identity subcommand
    #[command(subcommand)]
    pub command: IdentityCommand,
}

/// Identity subcommands
#[derive(Debug, Subcommand)]
pub enum IdentityCommand {
    /// Create an identity (prompts for missing values)
    Create {
        /// Display name
        #[arg(short, long)]
        name: Option<String>,
        /// Login email
        #[arg(short, long)]
        email: Option<String>,
    },
    /// List all identities
    List,
    /// Set a new password for an identity
    ResetPassword {
        /// Identity id
        id: i64,
    },
}

/// Identity display row for table output
#[derive(Debug, Serialize, Tabled)]
struct IdentityRow {
    id: i64,
    name: String,
    email: String,
    /// Stored hash scheme
    scheme: &'static str,
    created_at: String,
}

impl From<&Identity> for IdentityRow {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            name: identity.name.clone(),
            email: identity.email.clone(),
            scheme: if identity.credential.is_explicitly_salted() {
                "pbkdf2 (legacy)"
            } else {
                "argon2id"
            },
            created_at: identity.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute identity commands
pub async fn execute(
    args: &IdentityArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let (db, store) = open_store(&config).await?;

    let result = run(&args.command, &store, format).await;
    db.close().await;
    result
}

async fn open_store(config: &AppConfig) -> Result<(DatabasePool, CredentialStore), AppError> {
    if config.database.provider == DatabaseProvider::Memory {
        return Err(AppError::configuration(
            "Identity commands need the postgres provider",
        ));
    }

    let db = super::connect_database(config).await?;
    let repos = Repositories::postgres(db.pool().clone());
    let store = CredentialStore::new(repos.identities, PasswordHasher::new(), &config.auth);
    Ok((db, store))
}

async fn run(
    command: &IdentityCommand,
    store: &CredentialStore,
    format: OutputFormat,
) -> Result<(), AppError> {
    match command {
        IdentityCommand::Create { name, email } => {
            let name = match name {
                Some(n) => n.clone(),
                None => prompt_text("Name")?,
            };
            let email = match email {
                Some(e) => e.clone(),
                None => prompt_text("Email")?,
            };
            let password = prompt_password("Password")?;

            let identity = store.create(&name, &email, &password).await?;
            output::print_success(&format!(
                "Identity '{}' created (id: {})",
                identity.email, identity.id
            ));
        }
        IdentityCommand::List => {
            let identities = store.list().await?;
            let rows: Vec<IdentityRow> = identities.iter().map(IdentityRow::from).collect();
            output::print_list(&rows, format);
        }
        IdentityCommand::ResetPassword { id } => {
            let password = prompt_password("New password")?;
            let identity = store.update(*id, None, None, Some(&password)).await?;
            output::print_success(&format!("Password reset for '{}'", identity.email));
        }
    }

    Ok(())
}

fn prompt_text(prompt: &str) -> Result<String, AppError> {
    dialoguer::Input::new()
        .with_prompt(prompt)
        .interact_text()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}

fn prompt_password(prompt: &str) -> Result<String, AppError> {
    dialoguer::Password::new()
        .with_prompt(prompt)
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}
