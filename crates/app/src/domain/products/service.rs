//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        products::{
            data::{NewProduct, ProductUpdate, ProductsFilter},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
        tenants::records::TenantUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

fn check_ranges(price: u64, stock: u32) -> Result<(), ProductsServiceError> {
    i64::try_from(price)?;
    i32::try_from(stock)?;

    Ok(())
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        tenant: TenantUuid,
        filter: ProductsFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let filter = filter.normalized();

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let products = self.repository.list_products(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(
        &self,
        tenant: TenantUuid,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        tenant: TenantUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        check_ranges(product.price, product.stock)?;

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let created = self.repository.create_product(&mut tx, &product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        tenant: TenantUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        check_ranges(update.price, update.stock)?;

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(
        &self,
        tenant: TenantUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Products that have not been deleted, by name, narrowed by `filter`.
    async fn list_products(
        &self,
        tenant: TenantUuid,
        filter: ProductsFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(
        &self,
        tenant: TenantUuid,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        tenant: TenantUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces a product's editable fields.
    async fn update_product(
        &self,
        tenant: TenantUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-deletes a product.
    async fn delete_product(
        &self,
        tenant: TenantUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::new_product};

    use super::*;

    #[tokio::test]
    async fn create_product_returns_stored_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        let product = ctx
            .products
            .create_product(
                ctx.tenant_uuid,
                NewProduct {
                    sku: Some("PX9-128-BLK".to_string()),
                    category: Some("phones".to_string()),
                    ..new_product(uuid, "Pixel 9", 79_900, 5)
                },
            )
            .await?;

        assert_eq!(product.uuid, uuid);
        assert_eq!(product.name, "Pixel 9");
        assert_eq!(product.sku.as_deref(), Some("PX9-128-BLK"));
        assert_eq!(product.category.as_deref(), Some("phones"));
        assert_eq!(product.price, 79_900);
        assert_eq!(product.stock, 5);
        assert!(product.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn get_product_returns_created_product() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(ctx.tenant_uuid, new_product(uuid, "Case", 1_500, 10))
            .await?;

        let product = ctx.products.get_product(ctx.tenant_uuid, uuid).await?;

        assert_eq!(product.uuid, uuid);
        assert_eq!(product.price, 1_500);

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .get_product(ctx.tenant_uuid, ProductUuid::new())
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_products_is_sorted_by_name() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.products
            .create_product(
                ctx.tenant_uuid,
                new_product(ProductUuid::new(), "Screen protector", 900, 50),
            )
            .await?;

        ctx.products
            .create_product(
                ctx.tenant_uuid,
                new_product(ProductUuid::new(), "Charger", 1_900, 20),
            )
            .await?;

        let names: Vec<String> = ctx
            .products
            .list_products(ctx.tenant_uuid, ProductsFilter::default())
            .await?
            .into_iter()
            .map(|product| product.name)
            .collect();

        assert_eq!(names, vec!["Charger", "Screen protector"]);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_narrows_by_category_and_stock() -> TestResult {
        let ctx = TestContext::new().await;

        for (name, category, stock) in [
            ("Pixel 9", "Phones", 2),
            ("Galaxy S25", "phones", 12),
            ("USB-C cable", "Accessories", 1),
        ] {
            ctx.products
                .create_product(
                    ctx.tenant_uuid,
                    NewProduct {
                        category: Some(category.to_string()),
                        ..new_product(ProductUuid::new(), name, 10_000, stock)
                    },
                )
                .await?;
        }

        let names = |products: Vec<ProductRecord>| -> Vec<String> {
            products.into_iter().map(|product| product.name).collect()
        };

        let phones = ctx
            .products
            .list_products(
                ctx.tenant_uuid,
                ProductsFilter {
                    category: Some(" PHONES ".to_string()),
                    low_stock: None,
                },
            )
            .await?;

        assert_eq!(names(phones), vec!["Galaxy S25", "Pixel 9"]);

        let running_low = ctx
            .products
            .list_products(
                ctx.tenant_uuid,
                ProductsFilter {
                    category: None,
                    low_stock: Some(2),
                },
            )
            .await?;

        assert_eq!(names(running_low), vec!["Pixel 9", "USB-C cable"]);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_replaces_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(ctx.tenant_uuid, new_product(uuid, "Cable", 500, 3))
            .await?;

        let updated = ctx
            .products
            .update_product(
                ctx.tenant_uuid,
                uuid,
                ProductUpdate {
                    name: "USB-C cable".to_string(),
                    sku: None,
                    category: Some("accessories".to_string()),
                    price: 750,
                    stock: 12,
                },
            )
            .await?;

        assert_eq!(updated.name, "USB-C cable");
        assert_eq!(updated.price, 750);
        assert_eq!(updated.stock, 12);
        assert_eq!(updated.category.as_deref(), Some("accessories"));

        Ok(())
    }

    #[tokio::test]
    async fn update_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .update_product(
                ctx.tenant_uuid,
                ProductUuid::new(),
                ProductUpdate {
                    name: "Ghost".to_string(),
                    sku: None,
                    category: None,
                    price: 100,
                    stock: 0,
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn price_beyond_storage_range_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(
                ctx.tenant_uuid,
                new_product(ProductUuid::new(), "Gold phone", u64::MAX, 1),
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::OutOfRange(_))),
            "expected OutOfRange, got {result:?}"
        );
    }

    #[tokio::test]
    async fn blank_name_is_invalid_data() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(ctx.tenant_uuid, new_product(ProductUuid::new(), "  ", 100, 1))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn duplicate_sku_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        let with_sku = |uuid| NewProduct {
            sku: Some("SKU-1".to_string()),
            ..new_product(uuid, "Earbuds", 4_900, 2)
        };

        ctx.products
            .create_product(ctx.tenant_uuid, with_sku(ProductUuid::new()))
            .await?;

        let result = ctx
            .products
            .create_product(ctx.tenant_uuid, with_sku(ProductUuid::new()))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_hides_it() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(ctx.tenant_uuid, new_product(uuid, "Case", 1_000, 1))
            .await?;

        ctx.products.delete_product(ctx.tenant_uuid, uuid).await?;

        let result = ctx.products.get_product(ctx.tenant_uuid, uuid).await;
        let listed = ctx
            .products
            .list_products(ctx.tenant_uuid, ProductsFilter::default())
            .await?;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );
        assert!(
            !listed.iter().any(|p| p.uuid == uuid),
            "deleted product should not appear in list"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_twice_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(ctx.tenant_uuid, new_product(uuid, "Case", 1_000, 1))
            .await?;

        ctx.products.delete_product(ctx.tenant_uuid, uuid).await?;

        let result = ctx.products.delete_product(ctx.tenant_uuid, uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn product_not_visible_to_other_tenant() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .products
            .create_product(
                ctx.tenant_uuid,
                new_product(ProductUuid::new(), "Pixel 9", 79_900, 1),
            )
            .await?;

        let tenant_b = ctx.create_tenant("Tenant B").await;

        let result = ctx.products.get_product(tenant_b, product.uuid).await;
        let listed = ctx
            .products
            .list_products(tenant_b, ProductsFilter::default())
            .await?;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound for cross-tenant access, got {result:?}"
        );
        assert!(listed.is_empty(), "tenant B should see no products");

        Ok(())
    }
}
