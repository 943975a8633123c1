//! CLI command definitions and dispatch.

pub mod config;
pub mod identity;
pub mod key;
pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

use booking_core::config::AppConfig;
use booking_core::error::AppError;
use booking_database::DatabasePool;

use crate::output::OutputFormat;

/// Booking service administration
#[derive(Debug, Parser)]
#[command(name = "booking", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Identity management
    Identity(identity::IdentityArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Print a fresh random signing key
    GenerateKey,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::Identity(args) => identity::execute(args, &self.config, self.format).await,
            Commands::Config(args) => config::execute(args, &self.config).await,
            Commands::GenerateKey => {
                key::execute();
                Ok(())
            }
        }
    }
}

/// Load configuration from one file plus `BOOKING__` environment overrides
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load_file(config_path)
}

/// Connect to the configured Postgres database
pub async fn connect_database(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}
