//! Test helpers.

use std::{num::TryFromIntError, sync::Arc};

use jiff::{Timestamp, civil::date};
use salvo::{affix_state::inject, prelude::*};
use shopfront::warranty::{
    SaleWarranty, WarrantyDetails, WarrantyInput, WarrantyStatus, WarrantyTerms,
};
use shopfront_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        reports::MockReportsService,
        sales::{
            MockSalesService,
            records::{SaleRecord, SaleUuid},
        },
        staff::{
            MockStaffService,
            records::{StaffRecord, StaffRole, StaffUuid},
        },
        tenants::records::TenantUuid,
        warranties::{
            MockWarrantiesService,
            records::{WarrantyRecord, WarrantyUuid},
        },
    },
};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_TENANT_UUID: TenantUuid = TenantUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_tenant(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_tenant_uuid(TEST_TENANT_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// A storage failure for error-path tests.
pub(crate) fn sqlx_pool_timeout() -> sqlx::Error {
    sqlx::Error::PoolTimedOut
}

/// An integer conversion failure for error-path tests.
pub(crate) fn out_of_range() -> TryFromIntError {
    match u8::try_from(u16::MAX) {
        Ok(_) => unreachable!("u16::MAX does not fit a u8"),
        Err(error) => error,
    }
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

fn strict_staff_mock() -> MockStaffService {
    let mut staff = MockStaffService::new();

    staff.expect_list_staff().never();
    staff.expect_get_staff().never();
    staff.expect_create_staff().never();
    staff.expect_update_staff().never();
    staff.expect_delete_staff().never();

    staff
}

fn strict_sales_mock() -> MockSalesService {
    let mut sales = MockSalesService::new();

    sales.expect_list_sales().never();
    sales.expect_get_sale().never();
    sales.expect_create_sale().never();
    sales.expect_update_sale().never();
    sales.expect_delete_sale().never();

    sales
}

fn strict_warranties_mock() -> MockWarrantiesService {
    let mut warranties = MockWarrantiesService::new();

    warranties.expect_list_warranties().never();
    warranties.expect_get_warranty().never();
    warranties.expect_file_warranty().never();

    warranties
}

fn strict_reports_mock() -> MockReportsService {
    let mut reports = MockReportsService::new();

    reports.expect_sales_summary().never();

    reports
}

fn strict_app_context() -> AppContext {
    AppContext {
        products: Arc::new(strict_products_mock()),
        staff: Arc::new(strict_staff_mock()),
        sales: Arc::new(strict_sales_mock()),
        warranties: Arc::new(strict_warranties_mock()),
        reports: Arc::new(strict_reports_mock()),
        auth: Arc::new(strict_auth_mock()),
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    State::from_app_context(AppContext {
        auth: Arc::new(auth),
        ..strict_app_context()
    })
}

fn tenant_service(app: AppContext, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app)))
            .hoop(inject_tenant)
            .push(route),
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    tenant_service(
        AppContext {
            products: Arc::new(products),
            ..strict_app_context()
        },
        route,
    )
}

pub(crate) fn staff_service(staff: MockStaffService, route: Router) -> Service {
    tenant_service(
        AppContext {
            staff: Arc::new(staff),
            ..strict_app_context()
        },
        route,
    )
}

pub(crate) fn sales_service(sales: MockSalesService, route: Router) -> Service {
    tenant_service(
        AppContext {
            sales: Arc::new(sales),
            ..strict_app_context()
        },
        route,
    )
}

pub(crate) fn warranties_service(warranties: MockWarrantiesService, route: Router) -> Service {
    tenant_service(
        AppContext {
            warranties: Arc::new(warranties),
            ..strict_app_context()
        },
        route,
    )
}

pub(crate) fn reports_service(reports: MockReportsService, route: Router) -> Service {
    tenant_service(
        AppContext {
            reports: Arc::new(reports),
            ..strict_app_context()
        },
        route,
    )
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Pixel 9".to_string(),
        sku: Some("PX9-128-BLK".to_string()),
        category: Some("phones".to_string()),
        price: 79_900,
        stock: 5,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_staff(uuid: StaffUuid) -> StaffRecord {
    StaffRecord {
        uuid,
        name: "Grace".to_string(),
        email: Some("grace@example.com".to_string()),
        role: StaffRole::Sales,
        commission_rate_bps: 250,
        sales_target: 500_000,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

/// Customer details carried by the fixture sale and warranty.
pub(crate) fn customer_details() -> WarrantyDetails {
    WarrantyDetails {
        customer_name: Some("Ada Lovelace".to_string()),
        customer_email: Some("ada@example.com".to_string()),
        imei: Some("356938035643809".to_string()),
        ..WarrantyDetails::default()
    }
}

/// Twelve months from 2025-01-01, as computed on 2025-06-01.
pub(crate) fn twelve_month_terms() -> WarrantyTerms {
    WarrantyTerms {
        warranty_start: date(2025, 1, 1),
        warranty_end: Some(date(2026, 1, 1)),
        warranty_status: WarrantyStatus::Active,
    }
}

/// A sale without a warranty.
pub(crate) fn make_sale(uuid: SaleUuid) -> SaleRecord {
    SaleRecord {
        uuid,
        product_uuid: ProductUuid::from_uuid(Uuid::nil()),
        staff_uuid: StaffUuid::from_uuid(Uuid::nil()),
        quantity: 2,
        unit_price: 79_900,
        total: 159_800,
        sold_at: date(2025, 1, 1),
        warranty: None,
        warranty_details: WarrantyDetails::default(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

/// A sale carrying twelve months of warranty.
pub(crate) fn make_warranted_sale(uuid: SaleUuid) -> SaleRecord {
    SaleRecord {
        warranty: Some(SaleWarranty {
            months: 12,
            terms: twelve_month_terms(),
        }),
        warranty_details: customer_details(),
        ..make_sale(uuid)
    }
}

pub(crate) fn make_warranty(uuid: WarrantyUuid) -> WarrantyRecord {
    let input = WarrantyInput::new(date(2025, 1, 1), 12);

    WarrantyRecord {
        uuid,
        sale_uuid: None,
        staff_uuid: StaffUuid::from_uuid(Uuid::nil()),
        product_name: "Pixel 9".to_string(),
        warranty_details: customer_details(),
        warranty_months: input.months(),
        terms: twelve_month_terms(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}
