//! Database migration commands.

use clap::{Args, Subcommand};

use booking_core::config::DatabaseProvider;
use booking_core::error::AppError;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;

    match &args.command {
        MigrateCommand::Run => {
            if config.database.provider == DatabaseProvider::Memory {
                output::print_warning("Memory provider configured; nothing to migrate.");
                return Ok(());
            }

            let db = super::connect_database(&config).await?;
            println!("Running database migrations...");
            booking_database::migration::run_migrations(db.pool()).await?;
            db.close().await;
            output::print_success("All migrations applied successfully.");
        }
    }

    Ok(())
}
