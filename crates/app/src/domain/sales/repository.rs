//! Sales Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use shopfront::warranty::{SaleWarranty, WarrantyDetails, WarrantyStatus, WarrantyTerms};
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json,
};

use crate::{
    database::{decode_error, encode_error},
    domain::{
        products::records::ProductUuid,
        sales::{
            data::{NewSale, SalesFilter},
            records::{SaleRecord, SaleUuid},
        },
        staff::records::StaffUuid,
    },
};

const LIST_SALES_SQL: &str = include_str!("sql/list_sales.sql");
const GET_SALE_SQL: &str = include_str!("sql/get_sale.sql");
const LOCK_SALE_SQL: &str = include_str!("sql/lock_sale.sql");
const CREATE_SALE_SQL: &str = include_str!("sql/create_sale.sql");
const UPDATE_SALE_SQL: &str = include_str!("sql/update_sale.sql");
const DELETE_SALE_SQL: &str = include_str!("sql/delete_sale.sql");
const LOCK_PRODUCT_SQL: &str = include_str!("sql/lock_product.sql");
const GET_SELLER_SQL: &str = include_str!("sql/get_seller.sql");
const ADJUST_STOCK_SQL: &str = include_str!("sql/adjust_stock.sql");

/// The product row a sale draws from, locked for the rest of the transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SaleProduct {
    pub name: String,
    pub price: u64,
    pub stock: u32,
    pub deleted: bool,
}

/// The staff member credited with a sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Seller {
    pub name: String,
    pub deleted: bool,
}

/// Warranty columns as bound to `has_warranty` through `warranty_status`.
struct WarrantyColumns {
    has_warranty: bool,
    months: Option<i64>,
    start: Option<SqlxDate>,
    end: Option<SqlxDate>,
    status: Option<&'static str>,
}

impl From<Option<&SaleWarranty>> for WarrantyColumns {
    fn from(warranty: Option<&SaleWarranty>) -> Self {
        match warranty {
            Some(warranty) => Self {
                has_warranty: true,
                months: Some(warranty.months),
                start: Some(SqlxDate::from(warranty.terms.warranty_start)),
                end: warranty.terms.warranty_end.map(SqlxDate::from),
                status: Some(warranty.terms.warranty_status.as_str()),
            },
            None => Self {
                has_warranty: false,
                months: None,
                start: None,
                end: None,
                status: None,
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSalesRepository;

impl PgSalesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_sales(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: SalesFilter,
    ) -> Result<Vec<SaleRecord>, sqlx::Error> {
        query_as::<Postgres, SaleRecord>(LIST_SALES_SQL)
            .bind(filter.from.map(SqlxDate::from))
            .bind(filter.to.map(SqlxDate::from))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_sale(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sale: SaleUuid,
    ) -> Result<SaleRecord, sqlx::Error> {
        query_as::<Postgres, SaleRecord>(GET_SALE_SQL)
            .bind(sale.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn lock_sale(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sale: SaleUuid,
    ) -> Result<SaleRecord, sqlx::Error> {
        query_as::<Postgres, SaleRecord>(LOCK_SALE_SQL)
            .bind(sale.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_sale(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sale: &NewSale,
        unit_price: u64,
        total: u64,
        warranty: Option<&SaleWarranty>,
    ) -> Result<SaleRecord, sqlx::Error> {
        let columns = WarrantyColumns::from(warranty);

        query_as::<Postgres, SaleRecord>(CREATE_SALE_SQL)
            .bind(sale.uuid.into_uuid())
            .bind(sale.product_uuid.into_uuid())
            .bind(sale.staff_uuid.into_uuid())
            .bind(i32::try_from(sale.quantity).map_err(encode_error)?)
            .bind(i64::try_from(unit_price).map_err(encode_error)?)
            .bind(i64::try_from(total).map_err(encode_error)?)
            .bind(sale.sold_at.map(SqlxDate::from))
            .bind(columns.has_warranty)
            .bind(columns.months)
            .bind(columns.start)
            .bind(columns.end)
            .bind(columns.status)
            .bind(Json(&sale.warranty_details))
            .fetch_one(&mut **tx)
            .await
    }

    /// Write back the mutable fields of a locked sale.
    pub(crate) async fn update_sale(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sale: &SaleRecord,
    ) -> Result<SaleRecord, sqlx::Error> {
        let columns = WarrantyColumns::from(sale.warranty.as_ref());

        query_as::<Postgres, SaleRecord>(UPDATE_SALE_SQL)
            .bind(sale.uuid.into_uuid())
            .bind(i32::try_from(sale.quantity).map_err(encode_error)?)
            .bind(i64::try_from(sale.total).map_err(encode_error)?)
            .bind(SqlxDate::from(sale.sold_at))
            .bind(columns.has_warranty)
            .bind(columns.months)
            .bind(columns.start)
            .bind(columns.end)
            .bind(columns.status)
            .bind(Json(&sale.warranty_details))
            .fetch_one(&mut **tx)
            .await
    }

    /// Soft-delete a sale, returning the product and quantity to restock.
    pub(crate) async fn delete_sale(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sale: SaleUuid,
    ) -> Result<Option<(ProductUuid, u32)>, sqlx::Error> {
        let Some(row) = query(DELETE_SALE_SQL)
            .bind(sale.into_uuid())
            .fetch_optional(&mut **tx)
            .await?
        else {
            return Ok(None);
        };

        let quantity: i32 = row.try_get("quantity")?;

        Ok(Some((
            ProductUuid::from_uuid(row.try_get("product_uuid")?),
            u32::try_from(quantity).map_err(|e| decode_error("quantity", e))?,
        )))
    }

    pub(crate) async fn lock_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<SaleProduct>, sqlx::Error> {
        let Some(row) = query(LOCK_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await?
        else {
            return Ok(None);
        };

        let price: i64 = row.try_get("price")?;
        let stock: i32 = row.try_get("stock")?;

        Ok(Some(SaleProduct {
            name: row.try_get("name")?,
            price: u64::try_from(price).map_err(|e| decode_error("price", e))?,
            stock: u32::try_from(stock).map_err(|e| decode_error("stock", e))?,
            deleted: row.try_get("deleted")?,
        }))
    }

    pub(crate) async fn get_seller(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        staff: StaffUuid,
    ) -> Result<Option<Seller>, sqlx::Error> {
        let Some(row) = query(GET_SELLER_SQL)
            .bind(staff.into_uuid())
            .fetch_optional(&mut **tx)
            .await?
        else {
            return Ok(None);
        };

        Ok(Some(Seller {
            name: row.try_get("name")?,
            deleted: row.try_get("deleted")?,
        }))
    }

    /// Add `delta` units to a product's stock; negative values take stock out.
    pub(crate) async fn adjust_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        delta: i32,
    ) -> Result<(), sqlx::Error> {
        query(ADJUST_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(delta)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

fn decode_warranty(row: &PgRow) -> sqlx::Result<Option<SaleWarranty>> {
    if !row.try_get::<bool, _>("has_warranty")? {
        return Ok(None);
    }

    let months: Option<i64> = row.try_get("warranty_months")?;
    let start: Option<SqlxDate> = row.try_get("warranty_start")?;
    let end: Option<SqlxDate> = row.try_get("warranty_end")?;
    let status: Option<String> = row.try_get("warranty_status")?;

    let (Some(months), Some(start), Some(status)) = (months, start, status) else {
        return Err(sqlx::Error::ColumnDecode {
            index: "has_warranty".to_string(),
            source: "warranted sale is missing warranty fields".into(),
        });
    };

    Ok(Some(SaleWarranty {
        months,
        terms: WarrantyTerms {
            warranty_start: start.to_jiff(),
            warranty_end: end.map(SqlxDate::to_jiff),
            warranty_status: status
                .parse::<WarrantyStatus>()
                .map_err(|e| decode_error("warranty_status", e))?,
        },
    }))
}

impl<'r> FromRow<'r, PgRow> for SaleRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i32 = row.try_get("quantity")?;
        let unit_price: i64 = row.try_get("unit_price")?;
        let total: i64 = row.try_get("total")?;

        Ok(Self {
            uuid: SaleUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            staff_uuid: StaffUuid::from_uuid(row.try_get("staff_uuid")?),
            quantity: u32::try_from(quantity).map_err(|e| decode_error("quantity", e))?,
            unit_price: u64::try_from(unit_price).map_err(|e| decode_error("unit_price", e))?,
            total: u64::try_from(total).map_err(|e| decode_error("total", e))?,
            sold_at: row.try_get::<SqlxDate, _>("sold_at")?.to_jiff(),
            warranty: decode_warranty(row)?,
            warranty_details: row
                .try_get::<Json<WarrantyDetails>, _>("warranty_details")?
                .0,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

