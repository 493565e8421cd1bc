use clap::Args;
use shopfront_app::domain::tenants::{
    PgTenantsService, TenantsService, data::NewTenant, records::TenantUuid,
};
use crate::cli::{CliError, DatabaseArgs};

#[derive(Debug, Args)]
pub(crate) struct CreateTenantArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Shop name
    #[arg(long)]
    name: String,

    /// Tenant UUID to register; generated when omitted
    #[arg(long)]
    tenant_uuid: Option<TenantUuid>,
}

impl CreateTenantArgs {
    fn new_tenant(&self) -> Result<NewTenant, CliError> {
        let name = self.name.trim();

        if name.is_empty() {
            return Err(CliError::Blank("name"));
        }

        Ok(NewTenant {
            uuid: self.tenant_uuid.unwrap_or_default(),
            name: name.to_string(),
        })
    }
}

pub(crate) async fn run(args: CreateTenantArgs) -> Result<(), CliError> {
    let tenant = args.new_tenant()?;
    let pool = args.database.connect().await?;

    let created = PgTenantsService::new(pool).create_tenant(tenant).await?;

    println!("created shop {:?} ({})", created.name, created.uuid);

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;
    use uuid::Uuid;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        args: CreateTenantArgs,
    }

    fn parse(extra: &[&str]) -> Result<CreateTenantArgs, clap::Error> {
        let mut argv = vec!["create", "--database-url", "postgres://admin@localhost/shop"];
        argv.extend_from_slice(extra);

        Harness::try_parse_from(argv).map(|harness| harness.args)
    }

    #[test]
    fn explicit_uuid_is_kept() -> TestResult {
        let uuid = Uuid::parse_str("0b7d2f3e-4c55-4a8e-9d61-5a0f3f8e2c10")?;
        let uuid_arg = uuid.to_string();
        let args = parse(&["--name", "  Corner Phones ", "--tenant-uuid", uuid_arg.as_str()])?;

        let tenant = args.new_tenant()?;

        assert_eq!(tenant.uuid, TenantUuid::from_uuid(uuid));
        assert_eq!(tenant.name, "Corner Phones");

        Ok(())
    }

    #[test]
    fn blank_name_is_rejected_before_connecting() -> TestResult {
        let args = parse(&["--name", "   "])?;

        assert!(
            matches!(args.new_tenant(), Err(CliError::Blank("name"))),
            "expected a blank name to be rejected"
        );

        Ok(())
    }
}
