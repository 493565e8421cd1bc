//! Database connection management

use std::num::TryFromIntError;

use jiff::civil::{Date, date};
use shopfront::warranty::WarrantyTerms;
use sqlx::{
    PgPool, Postgres, Transaction,
    error::{DatabaseError, ErrorKind},
    migrate::MigrateError,
    query, query_scalar,
};
use thiserror::Error;

use crate::domain::tenants::records::TenantUuid;

/// SQL used to set tenant context for row-level security.
pub const SET_TENANT_CONTEXT_SQL: &str = "SELECT set_config('app.current_tenant_uuid', $1, true)";

/// Earliest value a Postgres `DATE` column accepts (4714-11-24 BC).
pub(crate) const EARLIEST_STORABLE_DATE: Date = date(-4713, 11, 24);

/// SQLSTATE classes for values the column types cannot represent.
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";
const DATETIME_FIELD_OVERFLOW: &str = "22008";

const CURRENT_ROLE_BYPASSES_RLS_SQL: &str =
    "SELECT rolsuper OR rolbypassrls FROM pg_roles WHERE rolname = current_user";

#[derive(Debug, Error)]
pub enum DatabaseRoleError {
    #[error("database role `{0}` bypasses row-level security; connect as the app role")]
    BypassesRowLevelSecurity(String),

    #[error("failed to inspect database role")]
    Sql(#[from] sqlx::Error),
}

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Begin a transaction and set tenant context for RLS policies.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting tenant context fails.
    pub async fn begin_tenant_transaction(
        &self,
        tenant: TenantUuid,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_TENANT_CONTEXT_SQL)
            .bind(tenant.into_uuid().to_string())
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Apply the bundled schema migrations.
///
/// # Errors
///
/// Returns an error if any migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Refuse connections whose role would skip tenant isolation.
///
/// Superusers and `BYPASSRLS` roles ignore row-level security policies, even when the tables
/// force them.
///
/// # Errors
///
/// Returns [`DatabaseRoleError::BypassesRowLevelSecurity`] for such roles, or a storage error
/// when the role cannot be inspected.
pub async fn ensure_rls_enforced_role(pool: &PgPool) -> Result<(), DatabaseRoleError> {
    let bypasses: bool = query_scalar(CURRENT_ROLE_BYPASSES_RLS_SQL)
        .fetch_one(pool)
        .await?;

    if bypasses {
        let role: String = query_scalar("SELECT current_user::text")
            .fetch_one(pool)
            .await?;

        return Err(DatabaseRoleError::BypassesRowLevelSecurity(role));
    }

    Ok(())
}

/// What a failed statement means to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Failure {
    /// No row matched.
    Missing,
    /// A unique constraint was violated.
    Duplicate,
    /// A foreign key pointed at nothing visible.
    DanglingReference,
    /// A required column was null.
    MissingValue,
    /// A check constraint rejected the row.
    Rejected,
    /// A bound value lies outside its column type's range.
    OutOfRange,
    /// Anything else: connectivity, pool exhaustion, driver errors.
    Storage,
}

/// Sort a storage error into the failures services distinguish.
pub(crate) fn classify(error: &sqlx::Error) -> Failure {
    if matches!(error, sqlx::Error::RowNotFound) {
        return Failure::Missing;
    }

    let Some(database_error) = error.as_database_error() else {
        return Failure::Storage;
    };

    if matches!(
        database_error.code().as_deref(),
        Some(NUMERIC_VALUE_OUT_OF_RANGE | DATETIME_FIELD_OVERFLOW)
    ) {
        return Failure::OutOfRange;
    }

    match DatabaseError::kind(database_error) {
        ErrorKind::UniqueViolation => Failure::Duplicate,
        ErrorKind::ForeignKeyViolation => Failure::DanglingReference,
        ErrorKind::NotNullViolation => Failure::MissingValue,
        ErrorKind::CheckViolation => Failure::Rejected,
        _ => Failure::Storage,
    }
}

/// Whether every date in `terms` fits a `DATE` column.
pub(crate) fn storable_terms(terms: &WarrantyTerms) -> bool {
    terms.warranty_start >= EARLIEST_STORABLE_DATE
        && terms
            .warranty_end
            .is_none_or(|end| end >= EARLIEST_STORABLE_DATE)
}

/// Wrap an integer that does not fit its column type as a bind failure.
pub(crate) fn encode_error(source: TryFromIntError) -> sqlx::Error {
    sqlx::Error::Encode(Box::new(source))
}

/// Wrap a stored value that does not fit its Rust type as a decode failure.
pub(crate) fn decode_error<E>(column: &str, source: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}
