//! Tenants Repository
//!
//! The tenants table sits outside row-level security; these queries run on the admin pool.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::domain::tenants::{
    data::NewTenant,
    records::{TenantRecord, TenantUuid},
};

const CREATE_TENANT_SQL: &str = include_str!("sql/create_tenant.sql");
const LIST_TENANTS_SQL: &str = include_str!("sql/list_tenants.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgTenantsRepository {
    pool: PgPool,
}

impl PgTenantsRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn insert(&self, tenant: &NewTenant) -> Result<TenantRecord, sqlx::Error> {
        query_as::<Postgres, TenantRecord>(CREATE_TENANT_SQL)
            .bind(tenant.uuid.into_uuid())
            .bind(&tenant.name)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn active(&self) -> Result<Vec<TenantRecord>, sqlx::Error> {
        query_as::<Postgres, TenantRecord>(LIST_TENANTS_SQL)
            .fetch_all(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for TenantRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let timestamp = |column: &str| -> sqlx::Result<_> {
            Ok(row.try_get::<SqlxTimestamp, _>(column)?.to_jiff())
        };

        Ok(Self {
            uuid: TenantUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            created_at: timestamp("created_at")?,
            updated_at: timestamp("updated_at")?,
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
