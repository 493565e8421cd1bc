//! Sales service.

use async_trait::async_trait;
use mockall::automock;
use shopfront::{
    notifications::WarrantyNotice,
    warranty::{SaleWarranty, today},
};
use tracing::{debug, info};

use crate::{
    database::{Db, storable_terms},
    domain::{
        sales::{
            data::{NewSale, SaleUpdate, SalesFilter},
            errors::SalesServiceError,
            records::{SaleRecord, SaleUuid},
            repository::PgSalesRepository,
        },
        tenants::records::TenantUuid,
    },
    notifications::NotificationQueue,
};

#[derive(Debug, Clone)]
pub struct PgSalesService {
    db: Db,
    repository: PgSalesRepository,
    notifications: NotificationQueue,
}

impl PgSalesService {
    #[must_use]
    pub fn new(db: Db, notifications: NotificationQueue) -> Self {
        Self {
            db,
            repository: PgSalesRepository::new(),
            notifications,
        }
    }

    /// Queue the customer's confirmation for a committed sale.
    fn notify(&self, acting_user: &str, product_name: &str, sale: &SaleRecord) {
        let Some(warranty) = sale.warranty.as_ref() else {
            return;
        };

        match WarrantyNotice::compose(
            acting_user,
            product_name,
            &sale.warranty_details,
            &warranty.terms,
        ) {
            Some(notice) => self.notifications.enqueue(notice),
            None => debug!(sale_uuid = %sale.uuid, "no customer email; warranty notice skipped"),
        }
    }
}

fn ensure_storable(warranty: Option<&SaleWarranty>) -> Result<(), SalesServiceError> {
    match warranty {
        Some(warranty) if !storable_terms(&warranty.terms) => {
            Err(SalesServiceError::WarrantyOutOfRange)
        }
        _ => Ok(()),
    }
}

fn line_total(unit_price: u64, quantity: u32) -> Result<u64, SalesServiceError> {
    unit_price
        .checked_mul(u64::from(quantity))
        .filter(|total| i64::try_from(*total).is_ok())
        .ok_or(SalesServiceError::TotalOutOfRange)
}

#[async_trait]
impl SalesService for PgSalesService {
    async fn list_sales(
        &self,
        tenant: TenantUuid,
        filter: SalesFilter,
    ) -> Result<Vec<SaleRecord>, SalesServiceError> {
        if matches!((filter.from, filter.to), (Some(from), Some(to)) if from > to) {
            return Err(SalesServiceError::InvalidDateRange);
        }

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let sales = self.repository.list_sales(&mut tx, filter).await?;

        tx.commit().await?;

        Ok(sales)
    }

    async fn get_sale(
        &self,
        tenant: TenantUuid,
        sale: SaleUuid,
    ) -> Result<SaleRecord, SalesServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let sale = self.repository.get_sale(&mut tx, sale).await?;

        tx.commit().await?;

        Ok(sale)
    }

    async fn create_sale(
        &self,
        tenant: TenantUuid,
        sale: NewSale,
    ) -> Result<SaleRecord, SalesServiceError> {
        if sale.quantity == 0 {
            return Err(SalesServiceError::InvalidQuantity);
        }

        let outcome = sale.warranty.on_create(today());

        ensure_storable(outcome.warranty.as_ref())?;

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let product = self
            .repository
            .lock_product(&mut tx, sale.product_uuid)
            .await?
            .filter(|product| !product.deleted)
            .ok_or(SalesServiceError::ProductNotFound)?;

        let seller = self
            .repository
            .get_seller(&mut tx, sale.staff_uuid)
            .await?
            .filter(|seller| !seller.deleted)
            .ok_or(SalesServiceError::StaffNotFound)?;

        if product.stock < sale.quantity {
            return Err(SalesServiceError::InsufficientStock {
                available: product.stock,
                requested: sale.quantity,
            });
        }

        let total = line_total(product.price, sale.quantity)?;

        self.repository
            .adjust_stock(&mut tx, sale.product_uuid, -i32::try_from(sale.quantity)?)
            .await?;

        let created = self
            .repository
            .create_sale(
                &mut tx,
                &sale,
                product.price,
                total,
                outcome.warranty.as_ref(),
            )
            .await?;

        tx.commit().await?;

        info!(
            sale_uuid = %created.uuid,
            has_warranty = created.has_warranty(),
            "recorded sale"
        );

        if outcome.transition.notifies_customer() {
            self.notify(&seller.name, &product.name, &created);
        }

        Ok(created)
    }

    async fn update_sale(
        &self,
        tenant: TenantUuid,
        sale: SaleUuid,
        update: SaleUpdate,
    ) -> Result<SaleRecord, SalesServiceError> {
        if update.quantity == Some(0) {
            return Err(SalesServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let current = self.repository.lock_sale(&mut tx, sale).await?;

        let product = self
            .repository
            .lock_product(&mut tx, current.product_uuid)
            .await?
            .ok_or(SalesServiceError::ProductNotFound)?;

        let quantity = update.quantity.unwrap_or(current.quantity);

        if quantity > current.quantity {
            let requested = quantity - current.quantity;

            if product.stock < requested {
                return Err(SalesServiceError::InsufficientStock {
                    available: product.stock,
                    requested,
                });
            }
        }

        if quantity != current.quantity {
            let delta = i32::try_from(current.quantity)? - i32::try_from(quantity)?;

            self.repository
                .adjust_stock(&mut tx, current.product_uuid, delta)
                .await?;
        }

        let outcome = update.warranty.on_update(current.warranty.as_ref(), today());

        ensure_storable(outcome.warranty.as_ref())?;

        let seller = if outcome.transition.notifies_customer() {
            self.repository.get_seller(&mut tx, current.staff_uuid).await?
        } else {
            None
        };

        let changed = SaleRecord {
            quantity,
            total: line_total(current.unit_price, quantity)?,
            sold_at: update.sold_at.unwrap_or(current.sold_at),
            warranty: outcome.warranty,
            warranty_details: update
                .warranty_details
                .unwrap_or_else(|| current.warranty_details.clone()),
            ..current
        };

        let updated = self.repository.update_sale(&mut tx, &changed).await?;

        tx.commit().await?;

        debug!(
            sale_uuid = %updated.uuid,
            transition = ?outcome.transition,
            "updated sale"
        );

        if let Some(seller) = seller {
            self.notify(&seller.name, &product.name, &updated);
        }

        Ok(updated)
    }

    async fn delete_sale(&self, tenant: TenantUuid, sale: SaleUuid) -> Result<(), SalesServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let (product, quantity) = self
            .repository
            .delete_sale(&mut tx, sale)
            .await?
            .ok_or(SalesServiceError::NotFound)?;

        self.repository
            .adjust_stock(&mut tx, product, i32::try_from(quantity)?)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait SalesService: Send + Sync {
    /// Retrieves current sales, newest first.
    async fn list_sales(
        &self,
        tenant: TenantUuid,
        filter: SalesFilter,
    ) -> Result<Vec<SaleRecord>, SalesServiceError>;

    /// Retrieve a single sale.
    async fn get_sale(
        &self,
        tenant: TenantUuid,
        sale: SaleUuid,
    ) -> Result<SaleRecord, SalesServiceError>;

    /// Records a sale, taking its quantity out of stock.
    ///
    /// When the sale carries a warranty and the customer left an email address, a confirmation
    /// is queued once the sale is committed.
    async fn create_sale(
        &self,
        tenant: TenantUuid,
        sale: NewSale,
    ) -> Result<SaleRecord, SalesServiceError>;

    /// Applies a partial update, including warranty toggling.
    async fn update_sale(
        &self,
        tenant: TenantUuid,
        sale: SaleUuid,
        update: SaleUpdate,
    ) -> Result<SaleRecord, SalesServiceError>;

    /// Soft-deletes a sale and restocks its product.
    async fn delete_sale(&self, tenant: TenantUuid, sale: SaleUuid) -> Result<(), SalesServiceError>;
}
