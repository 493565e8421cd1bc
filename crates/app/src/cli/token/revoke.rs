use clap::Args;
use shopfront_app::auth::{ApiTokenUuid, PgAuthService};

use crate::cli::{CliError, DatabaseArgs};

#[derive(Debug, Args)]
pub(crate) struct RevokeTokenArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Token to revoke
    #[arg(long)]
    token_uuid: ApiTokenUuid,
}

pub(crate) async fn run(args: RevokeTokenArgs) -> Result<(), CliError> {
    let pool = args.database.connect().await?;

    let was_active = PgAuthService::new(pool)
        .revoke_api_token(args.token_uuid)
        .await?;

    let outcome = if was_active {
        "revoked"
    } else {
        "already revoked or unknown"
    };

    println!("token {}: {outcome}", args.token_uuid);

    Ok(())
}
