use clap::Args;
use sqlx::{Postgres, Transaction, query, query_scalar};

use crate::cli::{CliError, DatabaseArgs};

#[derive(Debug, Args)]
pub(crate) struct EnsureAppRoleArgs {
    /// Administrative connection; must be allowed to manage roles
    #[command(flatten)]
    database: DatabaseArgs,

    /// Role the server connects as
    #[arg(long, default_value = "shopfront_app")]
    role_name: String,

    /// Password to set on the role
    #[arg(long, env = "APP_DB_PASSWORD", hide_env_values = true)]
    password: String,
}

const ROLE_FLAGS: &str = "LOGIN NOSUPERUSER NOCREATEDB NOCREATEROLE NOREPLICATION NOBYPASSRLS";

/// Quote a value server-side; role names and passwords cannot be bound as parameters.
async fn quote(
    tx: &mut Transaction<'_, Postgres>,
    function: &str,
    value: &str,
) -> Result<String, CliError> {
    query_scalar(&format!("SELECT {function}($1)"))
        .bind(value)
        .fetch_one(&mut **tx)
        .await
        .map_err(CliError::sql(format!("{function} value")))
}

fn grant_statements(database_ident: &str, role_ident: &str) -> [String; 4] {
    [
        format!("GRANT CONNECT ON DATABASE {database_ident} TO {role_ident}"),
        format!("GRANT USAGE ON SCHEMA public TO {role_ident}"),
        format!(
            "GRANT SELECT, INSERT, UPDATE, DELETE ON ALL TABLES IN SCHEMA public TO {role_ident}"
        ),
        format!(
            "ALTER DEFAULT PRIVILEGES IN SCHEMA public GRANT SELECT, INSERT, UPDATE, DELETE ON TABLES TO {role_ident}"
        ),
    ]
}

fn role_statement(exists: bool, role_ident: &str, password_lit: &str) -> String {
    let verb = if exists { "ALTER" } else { "CREATE" };

    format!("{verb} ROLE {role_ident} {ROLE_FLAGS} PASSWORD {password_lit}")
}

pub(crate) async fn run(args: EnsureAppRoleArgs) -> Result<(), CliError> {
    if args.role_name.trim().is_empty() {
        return Err(CliError::Blank("role-name"));
    }

    if args.password.trim().is_empty() {
        return Err(CliError::Blank("password"));
    }

    let pool = args.database.connect().await?;

    let mut tx = pool
        .begin()
        .await
        .map_err(CliError::sql("start transaction"))?;

    let role_ident = quote(&mut tx, "quote_ident", &args.role_name).await?;
    let password_lit = quote(&mut tx, "quote_literal", &args.password).await?;

    let exists: bool = query_scalar("SELECT EXISTS (SELECT 1 FROM pg_roles WHERE rolname = $1)")
        .bind(&args.role_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(CliError::sql("check whether the role exists"))?;

    query(&role_statement(exists, &role_ident, &password_lit))
        .execute(&mut *tx)
        .await
        .map_err(CliError::sql(format!("configure role {}", args.role_name)))?;

    let database_ident: String = query_scalar("SELECT quote_ident(current_database())")
        .fetch_one(&mut *tx)
        .await
        .map_err(CliError::sql("resolve the database name"))?;

    for sql in grant_statements(&database_ident, &role_ident) {
        query(&sql)
            .execute(&mut *tx)
            .await
            .map_err(CliError::sql(format!("apply `{sql}`")))?;
    }

    tx.commit().await.map_err(CliError::sql("commit changes"))?;

    println!(
        "role {} is ready ({})",
        args.role_name,
        if exists { "updated" } else { "created" }
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grants_cover_database_schema_and_tables() {
        let statements = grant_statements("\"shop\"", "shopfront_app");

        assert!(statements[0].starts_with("GRANT CONNECT ON DATABASE \"shop\""));
        assert!(statements.iter().all(|sql| sql.ends_with("TO shopfront_app")));
    }

    #[test]
    fn role_never_bypasses_row_level_security() {
        let create = role_statement(false, "shopfront_app", "'pw'");
        let alter = role_statement(true, "shopfront_app", "'pw'");

        assert!(create.starts_with("CREATE ROLE shopfront_app"));
        assert!(alter.starts_with("ALTER ROLE shopfront_app"));
        assert!(create.contains("NOBYPASSRLS") && create.contains("NOSUPERUSER"));
    }
}
