//! Staff Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{decode_error, encode_error},
    domain::staff::{
        data::{NewStaff, StaffUpdate},
        records::{StaffRecord, StaffRole, StaffUuid},
    },
};

const LIST_STAFF_SQL: &str = include_str!("sql/list_staff.sql");
const GET_STAFF_SQL: &str = include_str!("sql/get_staff.sql");
const CREATE_STAFF_SQL: &str = include_str!("sql/create_staff.sql");
const UPDATE_STAFF_SQL: &str = include_str!("sql/update_staff.sql");
const DELETE_STAFF_SQL: &str = include_str!("sql/delete_staff.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgStaffRepository;

fn normalise_email(email: Option<&str>) -> Option<&str> {
    email.map(str::trim).filter(|email| !email.is_empty())
}

impl PgStaffRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_staff(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<StaffRecord>, sqlx::Error> {
        query_as::<Postgres, StaffRecord>(LIST_STAFF_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_staff(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        staff: StaffUuid,
    ) -> Result<StaffRecord, sqlx::Error> {
        query_as::<Postgres, StaffRecord>(GET_STAFF_SQL)
            .bind(staff.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_staff(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        staff: &NewStaff,
    ) -> Result<StaffRecord, sqlx::Error> {
        query_as::<Postgres, StaffRecord>(CREATE_STAFF_SQL)
            .bind(staff.uuid.into_uuid())
            .bind(staff.name.trim())
            .bind(normalise_email(staff.email.as_deref()))
            .bind(staff.role.as_str())
            .bind(i32::try_from(staff.commission_rate_bps).map_err(encode_error)?)
            .bind(i64::try_from(staff.sales_target).map_err(encode_error)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_staff(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        staff: StaffUuid,
        update: &StaffUpdate,
    ) -> Result<StaffRecord, sqlx::Error> {
        query_as::<Postgres, StaffRecord>(UPDATE_STAFF_SQL)
            .bind(staff.into_uuid())
            .bind(update.name.trim())
            .bind(normalise_email(update.email.as_deref()))
            .bind(update.role.as_str())
            .bind(i32::try_from(update.commission_rate_bps).map_err(encode_error)?)
            .bind(i64::try_from(update.sales_target).map_err(encode_error)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_staff(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        staff: StaffUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_STAFF_SQL)
            .bind(staff.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for StaffRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;
        let commission_rate_bps: i32 = row.try_get("commission_rate_bps")?;
        let sales_target: i64 = row.try_get("sales_target")?;

        Ok(Self {
            uuid: StaffUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            role: role
                .parse::<StaffRole>()
                .map_err(|e| decode_error("role", e))?,
            commission_rate_bps: u32::try_from(commission_rate_bps)
                .map_err(|e| decode_error("commission_rate_bps", e))?,
            sales_target: u64::try_from(sales_target)
                .map_err(|e| decode_error("sales_target", e))?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
