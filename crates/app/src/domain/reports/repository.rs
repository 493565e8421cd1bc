//! Reports Repository

use jiff::civil::Date;
use jiff_sqlx::Date as SqlxDate;
use sqlx::{Postgres, Row, Transaction, query};

use crate::{database::decode_error, domain::staff::records::StaffUuid};

const STAFF_SALES_SQL: &str = include_str!("sql/staff_sales.sql");

/// Aggregated sales of one staff member, before commission is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StaffSalesRow {
    pub staff_uuid: StaffUuid,
    pub name: String,
    pub commission_rate_bps: u32,
    pub sales_target: u64,
    pub sales: u64,
    pub units: u64,
    pub revenue: u64,
    pub warranted_sales: u64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReportsRepository;

fn unsigned(row: &sqlx::postgres::PgRow, column: &str) -> sqlx::Result<u64> {
    let value: i64 = row.try_get(column)?;

    u64::try_from(value).map_err(|e| decode_error(column, e))
}

impl PgReportsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn staff_sales(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        from: Date,
        to: Date,
    ) -> Result<Vec<StaffSalesRow>, sqlx::Error> {
        let rows = query(STAFF_SALES_SQL)
            .bind(SqlxDate::from(from))
            .bind(SqlxDate::from(to))
            .fetch_all(&mut **tx)
            .await?;

        rows.iter()
            .map(|row| {
                let rate: i32 = row.try_get("commission_rate_bps")?;

                Ok(StaffSalesRow {
                    staff_uuid: StaffUuid::from_uuid(row.try_get("staff_uuid")?),
                    name: row.try_get("name")?,
                    commission_rate_bps: u32::try_from(rate)
                        .map_err(|e| decode_error("commission_rate_bps", e))?,
                    sales_target: unsigned(row, "sales_target")?,
                    sales: unsigned(row, "sales")?,
                    units: unsigned(row, "units")?,
                    revenue: unsigned(row, "revenue")?,
                    warranted_sales: unsigned(row, "warranted_sales")?,
                })
            })
            .collect()
    }
}
