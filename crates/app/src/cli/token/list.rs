use clap::Args;
use shopfront_app::{
    auth::{ApiTokenRecord, PgAuthService},
    domain::tenants::records::TenantUuid,
};
use crate::cli::{CliError, DatabaseArgs, token::or_else};

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Shop whose tokens should be listed
    #[arg(long)]
    tenant_uuid: TenantUuid,
}

fn row(token: &ApiTokenRecord) -> String {
    format!(
        "{uuid}  created {created}  last used {used}  {state}",
        uuid = token.uuid,
        created = token.created_at,
        used = or_else(token.last_used_at, "never"),
        state = token
            .revoked_at
            .map_or_else(|| "active".to_string(), |at| format!("revoked {at}")),
    )
}

pub(crate) async fn run(args: ListTokensArgs) -> Result<(), CliError> {
    let pool = args.database.connect().await?;

    let tokens = PgAuthService::new(pool)
        .list_api_tokens(args.tenant_uuid)
        .await?;

    if tokens.is_empty() {
        println!("shop {} has no tokens", args.tenant_uuid);
    }

    for token in &tokens {
        println!("{}", row(token));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use shopfront_app::auth::ApiTokenUuid;
    use uuid::Uuid;

    use super::*;

    fn token() -> ApiTokenRecord {
        ApiTokenRecord {
            uuid: ApiTokenUuid::from_uuid(Uuid::nil()),
            tenant_uuid: TenantUuid::from_uuid(Uuid::nil()),
            created_at: Timestamp::UNIX_EPOCH,
            last_used_at: None,
            revoked_at: None,
        }
    }

    #[test]
    fn unused_token_reads_never_and_active() {
        let line = row(&token());

        assert!(line.contains("last used never"), "unexpected row: {line}");
        assert!(line.ends_with("active"), "unexpected row: {line}");
    }

    #[test]
    fn revoked_token_shows_when() {
        let line = row(&ApiTokenRecord {
            revoked_at: Some(Timestamp::UNIX_EPOCH),
            ..token()
        });

        assert!(
            line.ends_with("revoked 1970-01-01T00:00:00Z"),
            "unexpected row: {line}"
        );
    }
}
