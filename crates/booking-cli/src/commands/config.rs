//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use booking_auth::TokenSettings;
use booking_core::config::{AppConfig, DatabaseProvider};
use booking_core::error::AppError;
use booking_database::connection::mask_password;

use crate::output;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets redacted
    Show,
    /// Validate the configuration file, including the signing key
    Validate,
    /// Write the default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config/generated.toml")]
        output: String,
    },
}

/// Execute config commands
pub async fn execute(args: &ConfigArgs, config_path: &str) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = super::load_config(config_path)?;
            println!("{:#?}", redacted(config));
        }
        ConfigCommand::Validate => {
            let config = super::load_config(config_path)
                .inspect_err(|e| output::print_error(&format!("Configuration invalid: {e}")))?;
            let settings = TokenSettings::from_config(&config.auth)
                .inspect_err(|e| output::print_error(&format!("Auth settings invalid: {e}")))?;

            output::print_success(&format!("Configuration '{config_path}' is valid"));
            output::print_kv(
                "Server",
                &format!("{}:{}", config.server.host, config.server.port),
            );
            match config.database.provider {
                DatabaseProvider::Postgres => {
                    output::print_kv("Database", &mask_password(&config.database.url));
                }
                DatabaseProvider::Memory => output::print_kv("Database", "memory"),
            }
            output::print_kv("Token issuer", settings.issuer());
            output::print_kv("Token audience", settings.audience());
            output::print_kv(
                "Token ttl",
                &format!("{} minutes", settings.ttl().num_minutes()),
            );
        }
        ConfigCommand::Generate { output: out_path } => {
            let default_config = include_str!("../../../../config/default.toml");

            if let Some(parent) = std::path::Path::new(out_path).parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| AppError::internal(format!("Failed to create dir: {e}")))?;
            }

            tokio::fs::write(out_path, default_config)
                .await
                .map_err(|e| AppError::internal(format!("Failed to write config: {e}")))?;

            output::print_success(&format!("Default config written to '{out_path}'"));
            output::print_warning("Set auth.signing_key before starting the server.");
        }
    }

    Ok(())
}

/// Masks the database password; the signing key is already a redacted secret.
fn redacted(mut config: AppConfig) -> AppConfig {
    config.database.url = mask_password(&config.database.url);
    config
}
