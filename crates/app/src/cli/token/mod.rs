use clap::{Args, Subcommand};
use jiff::Timestamp;

use crate::cli::CliError;

mod create;
mod list;
mod revoke;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    /// Issue a bearer token for a shop
    Create(create::CreateTokenArgs),

    /// List a shop's tokens, revoked ones included
    List(list::ListTokensArgs),

    /// Revoke a token
    Revoke(revoke::RevokeTokenArgs),
}

impl TokenCommand {
    pub(crate) async fn run(self) -> Result<(), CliError> {
        match self.command {
            TokenSubcommand::Create(args) => create::run(args).await,
            TokenSubcommand::List(args) => list::run(args).await,
            TokenSubcommand::Revoke(args) => revoke::run(args).await,
        }
    }
}

/// Render an optional timestamp, falling back to `missing`.
fn or_else(value: Option<Timestamp>, missing: &str) -> String {
    value.map_or_else(|| missing.to_string(), |at| at.to_string())
}
