use clap::{Args, Subcommand};

use crate::cli::CliError;

mod ensure_app_role;
mod migrate;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply pending schema migrations
    Migrate(migrate::MigrateArgs),

    /// Create or update the row-level-security role the server connects as
    EnsureAppRole(ensure_app_role::EnsureAppRoleArgs),
}

impl DbCommand {
    pub(crate) async fn run(self) -> Result<(), CliError> {
        match self.command {
            DbSubcommand::Migrate(args) => migrate::run(args).await,
            DbSubcommand::EnsureAppRole(args) => ensure_app_role::run(args).await,
        }
    }
}
