use clap::Args;
use shopfront_app::domain::tenants::{PgTenantsService, TenantsService, records::TenantRecord};

use crate::cli::{CliError, DatabaseArgs};

#[derive(Debug, Args)]
pub(crate) struct ListTenantsArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

fn row(tenant: &TenantRecord) -> String {
    format!("{}  {}  since {}", tenant.uuid, tenant.name, tenant.created_at)
}

pub(crate) async fn run(args: ListTenantsArgs) -> Result<(), CliError> {
    let pool = args.database.connect().await?;

    let tenants = PgTenantsService::new(pool).list_tenants().await?;

    if tenants.is_empty() {
        println!("no shops registered");
    }

    for tenant in &tenants {
        println!("{}", row(tenant));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use shopfront_app::domain::tenants::records::TenantUuid;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn row_leads_with_the_uuid() {
        let line = row(&TenantRecord {
            uuid: TenantUuid::from_uuid(Uuid::nil()),
            name: "Corner Phones".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            deleted_at: None,
        });

        assert_eq!(
            line,
            "00000000-0000-0000-0000-000000000000  Corner Phones  since 1970-01-01T00:00:00Z"
        );
    }
}
