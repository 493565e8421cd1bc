use clap::Args;
use shopfront_app::{
    auth::{IssuedApiToken, PgAuthService},
    domain::tenants::records::TenantUuid,
};
use crate::cli::{CliError, DatabaseArgs};

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Shop that should own the token
    #[arg(long)]
    tenant_uuid: TenantUuid,
}

fn describe(issued: &IssuedApiToken) -> String {
    format!(
        "token {uuid} issued for shop {tenant} at {created}\n\n    {token}\n\nThe token is shown once; store it now.",
        uuid = issued.record.uuid,
        tenant = issued.record.tenant_uuid,
        created = issued.record.created_at,
        token = issued.token,
    )
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), CliError> {
    let pool = args.database.connect().await?;

    let issued = PgAuthService::new(pool)
        .issue_api_token(args.tenant_uuid)
        .await?;

    println!("{}", describe(&issued));

    Ok(())
}
