//! Warranties Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use shopfront::warranty::{WarrantyDetails, WarrantyStatus, WarrantyTerms};
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar, types::Json,
};

use crate::{
    database::decode_error,
    domain::{
        sales::records::SaleUuid,
        staff::records::StaffUuid,
        warranties::{
            data::NewWarranty,
            records::{WarrantyRecord, WarrantyUuid},
        },
    },
};

const LIST_WARRANTIES_SQL: &str = include_str!("sql/list_warranties.sql");
const GET_WARRANTY_SQL: &str = include_str!("sql/get_warranty.sql");
const CREATE_WARRANTY_SQL: &str = include_str!("sql/create_warranty.sql");
const GET_STAFF_NAME_SQL: &str = include_str!("sql/get_staff_name.sql");
const GET_SALE_PRODUCT_NAME_SQL: &str = include_str!("sql/get_sale_product_name.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgWarrantiesRepository;

impl PgWarrantiesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_warranties(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<WarrantyRecord>, sqlx::Error> {
        query_as::<Postgres, WarrantyRecord>(LIST_WARRANTIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_warranty(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        warranty: WarrantyUuid,
    ) -> Result<WarrantyRecord, sqlx::Error> {
        query_as::<Postgres, WarrantyRecord>(GET_WARRANTY_SQL)
            .bind(warranty.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_warranty(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        warranty: &NewWarranty,
        product_name: &str,
        terms: &WarrantyTerms,
    ) -> Result<WarrantyRecord, sqlx::Error> {
        query_as::<Postgres, WarrantyRecord>(CREATE_WARRANTY_SQL)
            .bind(warranty.uuid.into_uuid())
            .bind(warranty.sale_uuid.map(SaleUuid::into_uuid))
            .bind(warranty.staff_uuid.into_uuid())
            .bind(product_name)
            .bind(Json(&warranty.warranty_details))
            .bind(warranty.input.months())
            .bind(SqlxDate::from(terms.warranty_start))
            .bind(terms.warranty_end.map(SqlxDate::from))
            .bind(terms.warranty_status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_staff_name(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        staff: StaffUuid,
    ) -> Result<Option<String>, sqlx::Error> {
        query_scalar(GET_STAFF_NAME_SQL)
            .bind(staff.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_sale_product_name(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sale: SaleUuid,
    ) -> Result<Option<String>, sqlx::Error> {
        query_scalar(GET_SALE_PRODUCT_NAME_SQL)
            .bind(sale.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for WarrantyRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("warranty_status")?;

        Ok(Self {
            uuid: WarrantyUuid::from_uuid(row.try_get("uuid")?),
            sale_uuid: row
                .try_get::<Option<uuid::Uuid>, _>("sale_uuid")?
                .map(SaleUuid::from_uuid),
            staff_uuid: StaffUuid::from_uuid(row.try_get("staff_uuid")?),
            product_name: row.try_get("product_name")?,
            warranty_details: row
                .try_get::<Json<WarrantyDetails>, _>("warranty_details")?
                .0,
            warranty_months: row.try_get("warranty_months")?,
            terms: WarrantyTerms {
                warranty_start: row.try_get::<SqlxDate, _>("warranty_start")?.to_jiff(),
                warranty_end: row
                    .try_get::<Option<SqlxDate>, _>("warranty_end")?
                    .map(SqlxDate::to_jiff),
                warranty_status: status
                    .parse::<WarrantyStatus>()
                    .map_err(|e| decode_error("warranty_status", e))?,
            },
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
