//! Database Config

use clap::Args;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string for the application role.
    ///
    /// The role must not be a superuser or have `BYPASSRLS`; the server refuses to start
    /// otherwise.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,
}
