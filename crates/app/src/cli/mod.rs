//! Administration commands.

use clap::{Args, Parser, Subcommand};
use shopfront_app::{auth::AuthServiceError, database, domain::tenants::TenantsServiceError};
use sqlx::{PgPool, migrate::MigrateError};
use thiserror::Error;

mod db;
mod tenant;
mod token;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("failed to apply migrations: {0}")]
    Migrate(#[from] MigrateError),

    #[error("failed to {action}: {source}")]
    Sql {
        action: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("{0}")]
    Tenant(#[from] TenantsServiceError),

    #[error("{0}")]
    Token(#[from] AuthServiceError),

    #[error("--{0} cannot be empty")]
    Blank(&'static str),
}

impl CliError {
    /// Wrap a storage failure with the step that was being attempted.
    pub(crate) fn sql(action: impl Into<String>) -> impl FnOnce(sqlx::Error) -> Self {
        let action = action.into();

        move |source| Self::Sql { action, source }
    }
}

/// Connection flags shared by every command that touches the database.
#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<PgPool, CliError> {
        database::connect(&self.database_url)
            .await
            .map_err(CliError::Connect)
    }
}

#[derive(Debug, Parser)]
#[command(name = "shopfront-app", about = "Shopfront administration", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage shops
    Tenant(tenant::TenantCommand),

    /// Issue, list and revoke API tokens
    Token(token::TokenCommand),

    /// Schema and role setup
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), CliError> {
        match self.command {
            Commands::Tenant(command) => command.run().await,
            Commands::Token(command) => command.run().await,
            Commands::Db(command) => command.run().await,
        }
    }
}
