use clap::{Args, Subcommand};

use crate::cli::CliError;

mod create;
mod list;

#[derive(Debug, Args)]
pub(crate) struct TenantCommand {
    #[command(subcommand)]
    command: TenantSubcommand,
}

#[derive(Debug, Subcommand)]
enum TenantSubcommand {
    /// Register a new shop
    Create(create::CreateTenantArgs),

    /// List registered shops
    List(list::ListTenantsArgs),
}

impl TenantCommand {
    pub(crate) async fn run(self) -> Result<(), CliError> {
        match self.command {
            TenantSubcommand::Create(args) => create::run(args).await,
            TenantSubcommand::List(args) => list::run(args).await,
        }
    }
}
