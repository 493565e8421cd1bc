//! Warranties service.

use async_trait::async_trait;
use mockall::automock;
use shopfront::{
    notifications::WarrantyNotice,
    warranty::{calculate, today},
};
use tracing::{debug, info};

use crate::{
    database::{Db, storable_terms},
    domain::{
        tenants::records::TenantUuid,
        warranties::{
            data::NewWarranty,
            errors::WarrantiesServiceError,
            records::{WarrantyRecord, WarrantyUuid},
            repository::PgWarrantiesRepository,
        },
    },
    notifications::NotificationQueue,
};

#[derive(Debug, Clone)]
pub struct PgWarrantiesService {
    db: Db,
    repository: PgWarrantiesRepository,
    notifications: NotificationQueue,
}

impl PgWarrantiesService {
    #[must_use]
    pub fn new(db: Db, notifications: NotificationQueue) -> Self {
        Self {
            db,
            repository: PgWarrantiesRepository::new(),
            notifications,
        }
    }
}

#[async_trait]
impl WarrantiesService for PgWarrantiesService {
    async fn list_warranties(
        &self,
        tenant: TenantUuid,
    ) -> Result<Vec<WarrantyRecord>, WarrantiesServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let warranties = self.repository.list_warranties(&mut tx).await?;

        tx.commit().await?;

        Ok(warranties)
    }

    async fn get_warranty(
        &self,
        tenant: TenantUuid,
        warranty: WarrantyUuid,
    ) -> Result<WarrantyRecord, WarrantiesServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let warranty = self.repository.get_warranty(&mut tx, warranty).await?;

        tx.commit().await?;

        Ok(warranty)
    }

    async fn file_warranty(
        &self,
        tenant: TenantUuid,
        warranty: NewWarranty,
    ) -> Result<WarrantyRecord, WarrantiesServiceError> {
        let terms = calculate(warranty.input, today());

        if !storable_terms(&terms) {
            return Err(WarrantiesServiceError::WarrantyOutOfRange);
        }

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let staff_name = self
            .repository
            .get_staff_name(&mut tx, warranty.staff_uuid)
            .await?
            .ok_or(WarrantiesServiceError::StaffNotFound)?;

        let given_name = warranty
            .product_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        let product_name = match (given_name, warranty.sale_uuid) {
            (Some(name), _) => name,
            (None, Some(sale)) => self
                .repository
                .get_sale_product_name(&mut tx, sale)
                .await?
                .ok_or(WarrantiesServiceError::SaleNotFound)?,
            (None, None) => return Err(WarrantiesServiceError::MissingRequiredData),
        };

        let filed = self
            .repository
            .create_warranty(&mut tx, &warranty, &product_name, &terms)
            .await?;

        tx.commit().await?;

        info!(
            warranty_uuid = %filed.uuid,
            status = %filed.terms.warranty_status,
            "filed warranty"
        );

        match WarrantyNotice::compose(
            &staff_name,
            &filed.product_name,
            &filed.warranty_details,
            &filed.terms,
        ) {
            Some(notice) => self.notifications.enqueue(notice),
            None => debug!(warranty_uuid = %filed.uuid, "no customer email; warranty notice skipped"),
        }

        Ok(filed)
    }
}

#[automock]
#[async_trait]
pub trait WarrantiesService: Send + Sync {
    /// Retrieves filed warranties, most recent first.
    async fn list_warranties(
        &self,
        tenant: TenantUuid,
    ) -> Result<Vec<WarrantyRecord>, WarrantiesServiceError>;

    /// Retrieve a single filed warranty.
    async fn get_warranty(
        &self,
        tenant: TenantUuid,
        warranty: WarrantyUuid,
    ) -> Result<WarrantyRecord, WarrantiesServiceError>;

    /// Files a warranty and queues the customer's confirmation.
    async fn file_warranty(
        &self,
        tenant: TenantUuid,
        warranty: NewWarranty,
    ) -> Result<WarrantyRecord, WarrantiesServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use shopfront::warranty::{WarrantyDetails, WarrantyInput, WarrantyRequest, WarrantyStatus};
    use testresult::TestResult;

    use crate::{
        domain::{
            sales::{
                SalesService,
                data::{NewSale, SaleUpdate},
                records::SaleUuid,
            },
            staff::records::StaffUuid,
        },
        test::{TestContext, helpers::new_sale},
    };

    use super::*;

    fn new_warranty(staff: StaffUuid, product_name: Option<&str>) -> NewWarranty {
        NewWarranty {
            uuid: WarrantyUuid::new(),
            sale_uuid: None,
            staff_uuid: staff,
            product_name: product_name.map(str::to_string),
            warranty_details: WarrantyDetails {
                customer_email: Some("ada@example.com".to_string()),
                ..WarrantyDetails::default()
            },
            input: WarrantyInput::new(date(2025, 1, 1), 12),
        }
    }

    #[tokio::test]
    async fn file_warranty_computes_terms_and_notifies() -> TestResult {
        let mut ctx = TestContext::new().await;
        let staff = ctx.seed_staff("Grace").await;

        let filed = ctx
            .warranties
            .file_warranty(ctx.tenant_uuid, new_warranty(staff, Some("Pixel 9")))
            .await?;

        assert_eq!(filed.product_name, "Pixel 9");
        assert_eq!(filed.warranty_months, 12);
        assert_eq!(filed.terms.warranty_start, date(2025, 1, 1));
        assert_eq!(filed.terms.warranty_end, Some(date(2026, 1, 1)));

        let notice = ctx.notifications.try_recv()?;

        assert_eq!(notice.to, "ada@example.com");
        assert_eq!(notice.subject, "Warranty registered by Grace");

        Ok(())
    }

    #[tokio::test]
    async fn file_warranty_without_months_has_unknown_status() -> TestResult {
        let ctx = TestContext::new().await;
        let staff = ctx.seed_staff("Grace").await;

        let filed = ctx
            .warranties
            .file_warranty(
                ctx.tenant_uuid,
                NewWarranty {
                    input: WarrantyInput::default(),
                    ..new_warranty(staff, Some("Case"))
                },
            )
            .await?;

        assert_eq!(filed.warranty_months, 0);
        assert_eq!(filed.terms.warranty_start, today());
        assert_eq!(filed.terms.warranty_end, None);
        assert_eq!(filed.terms.warranty_status, WarrantyStatus::Unknown);

        Ok(())
    }

    #[tokio::test]
    async fn warranty_ending_before_storable_dates_is_rejected() {
        let mut ctx = TestContext::new().await;
        let staff = ctx.seed_staff("Grace").await;

        let result = ctx
            .warranties
            .file_warranty(
                ctx.tenant_uuid,
                NewWarranty {
                    input: WarrantyInput::new(date(2025, 1, 1), -100_000),
                    ..new_warranty(staff, Some("Pixel 9"))
                },
            )
            .await;

        assert!(
            matches!(result, Err(WarrantiesServiceError::WarrantyOutOfRange)),
            "expected WarrantyOutOfRange, got {result:?}"
        );
        assert!(
            ctx.notifications.try_recv().is_err(),
            "a rejected warranty must not queue a notice"
        );
    }

    #[tokio::test]
    async fn product_name_defaults_to_linked_sale() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.seed_product("Galaxy S25", 89_900, 1).await;
        let staff = ctx.seed_staff("Grace").await;

        let sale = ctx
            .sales
            .create_sale(ctx.tenant_uuid, new_sale(product, staff, 1))
            .await?;

        let filed = ctx
            .warranties
            .file_warranty(
                ctx.tenant_uuid,
                NewWarranty {
                    sale_uuid: Some(sale.uuid),
                    ..new_warranty(staff, None)
                },
            )
            .await?;

        assert_eq!(filed.sale_uuid, Some(sale.uuid));
        assert_eq!(filed.product_name, "Galaxy S25");

        Ok(())
    }

    #[tokio::test]
    async fn missing_product_name_without_sale_is_rejected() {
        let ctx = TestContext::new().await;
        let staff = ctx.seed_staff("Grace").await;

        let result = ctx
            .warranties
            .file_warranty(ctx.tenant_uuid, new_warranty(staff, Some("  ")))
            .await;

        assert!(
            matches!(result, Err(WarrantiesServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn unknown_sale_is_rejected() {
        let ctx = TestContext::new().await;
        let staff = ctx.seed_staff("Grace").await;

        let result = ctx
            .warranties
            .file_warranty(
                ctx.tenant_uuid,
                NewWarranty {
                    sale_uuid: Some(SaleUuid::new()),
                    ..new_warranty(staff, None)
                },
            )
            .await;

        assert!(
            matches!(result, Err(WarrantiesServiceError::SaleNotFound)),
            "expected SaleNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn clearing_sale_warranty_keeps_filed_warranty() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.seed_product("Pixel 9", 79_900, 1).await;
        let staff = ctx.seed_staff("Grace").await;

        let sale = ctx
            .sales
            .create_sale(
                ctx.tenant_uuid,
                NewSale {
                    warranty: WarrantyRequest {
                        has_warranty: Some(true),
                        warranty_start: None,
                        warranty_months: Some(12),
                    },
                    ..new_sale(product, staff, 1)
                },
            )
            .await?;

        let filed = ctx
            .warranties
            .file_warranty(
                ctx.tenant_uuid,
                NewWarranty {
                    sale_uuid: Some(sale.uuid),
                    ..new_warranty(staff, None)
                },
            )
            .await?;

        ctx.sales
            .update_sale(
                ctx.tenant_uuid,
                sale.uuid,
                SaleUpdate {
                    warranty: WarrantyRequest {
                        has_warranty: Some(false),
                        ..WarrantyRequest::default()
                    },
                    ..SaleUpdate::default()
                },
            )
            .await?;

        let kept = ctx.warranties.get_warranty(ctx.tenant_uuid, filed.uuid).await?;

        assert_eq!(kept, filed);

        Ok(())
    }

    #[tokio::test]
    async fn warranty_not_visible_to_other_tenant() -> TestResult {
        let ctx = TestContext::new().await;
        let staff = ctx.seed_staff("Grace").await;

        let filed = ctx
            .warranties
            .file_warranty(ctx.tenant_uuid, new_warranty(staff, Some("Pixel 9")))
            .await?;

        let tenant_b = ctx.create_tenant("Tenant B").await;

        let result = ctx.warranties.get_warranty(tenant_b, filed.uuid).await;
        let listed = ctx.warranties.list_warranties(tenant_b).await?;

        assert!(
            matches!(result, Err(WarrantiesServiceError::NotFound)),
            "expected NotFound for cross-tenant access, got {result:?}"
        );
        assert!(listed.is_empty());

        Ok(())
    }
}
