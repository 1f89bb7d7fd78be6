//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use salessense_app::{
    context::AppContext,
    domain::{
        carts::MockCartsService,
        catalog::{
            MockCatalogService,
            records::{ProductRecord, ProductUuid, VariantRecord, VariantUuid},
        },
        checkout::MockCheckoutService,
        customers::{MockCustomersService, records::CustomerUuid},
        purchases::MockPurchasesService,
        sessions::{
            MockSessionsService,
            records::{SessionRecord, SessionUuid},
        },
        stats::MockStatsService,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_STAFF_TOKEN: &str = "staff-test-token";

pub(crate) const TEST_CUSTOMER_UUID: CustomerUuid = CustomerUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_SESSION_UUID: SessionUuid = SessionUuid::from_uuid(Uuid::max());

/// One mock per service; anything a test does not replace rejects all calls.
pub(crate) struct AppMocks {
    pub(crate) catalog: MockCatalogService,
    pub(crate) customers: MockCustomersService,
    pub(crate) sessions: MockSessionsService,
    pub(crate) carts: MockCartsService,
    pub(crate) checkout: MockCheckoutService,
    pub(crate) purchases: MockPurchasesService,
    pub(crate) stats: MockStatsService,
}

impl Default for AppMocks {
    fn default() -> Self {
        Self {
            catalog: strict_catalog_mock(),
            customers: strict_customers_mock(),
            sessions: strict_sessions_mock(),
            carts: strict_carts_mock(),
            checkout: strict_checkout_mock(),
            purchases: strict_purchases_mock(),
            stats: strict_stats_mock(),
        }
    }
}

impl AppMocks {
    pub(crate) fn into_app_context(self) -> AppContext {
        AppContext {
            catalog: Arc::new(self.catalog),
            customers: Arc::new(self.customers),
            sessions: Arc::new(self.sessions),
            carts: Arc::new(self.carts),
            checkout: Arc::new(self.checkout),
            purchases: Arc::new(self.purchases),
            stats: Arc::new(self.stats),
        }
    }
}

pub(crate) fn strict_catalog_mock() -> MockCatalogService {
    let mut catalog = MockCatalogService::new();

    catalog.expect_list_products().never();
    catalog.expect_get_product().never();
    catalog.expect_create_product().never();
    catalog.expect_delete_product().never();
    catalog.expect_decrement_variant_stock().never();

    catalog
}

pub(crate) fn strict_customers_mock() -> MockCustomersService {
    let mut customers = MockCustomersService::new();

    customers.expect_register().never();
    customers.expect_get_customer().never();
    customers.expect_find_by_identifier().never();

    customers
}

pub(crate) fn strict_sessions_mock() -> MockSessionsService {
    let mut sessions = MockSessionsService::new();

    sessions.expect_create_session().never();
    sessions.expect_authenticate().never();
    sessions.expect_get_cart().never();
    sessions.expect_save_cart().never();
    sessions.expect_delete_session().never();

    sessions
}

pub(crate) fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_add_item().never();
    carts.expect_add_items().never();
    carts.expect_remove_item().never();
    carts.expect_get_cart().never();
    carts.expect_clear_cart().never();

    carts
}

pub(crate) fn strict_checkout_mock() -> MockCheckoutService {
    let mut checkout = MockCheckoutService::new();

    checkout.expect_checkout().never();

    checkout
}

pub(crate) fn strict_purchases_mock() -> MockPurchasesService {
    let mut purchases = MockPurchasesService::new();

    purchases.expect_record_purchases().never();
    purchases.expect_list_purchases().never();

    purchases
}

pub(crate) fn strict_stats_mock() -> MockStatsService {
    let mut stats = MockStatsService::new();

    stats.expect_dashboard().never();

    stats
}

pub(crate) fn state_with(mocks: AppMocks) -> Arc<State> {
    State::from_app_context(mocks.into_app_context(), Some(TEST_STAFF_TOKEN))
}

pub(crate) fn test_session() -> SessionRecord {
    SessionRecord {
        uuid: TEST_SESSION_UUID,
        customer_uuid: TEST_CUSTOMER_UUID,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

#[salvo::handler]
pub(crate) async fn inject_session(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_session(test_session());
    ctrl.call_next(req, depot, res).await;
}

/// A service with no authentication in front of `route`.
pub(crate) fn public_service(mocks: AppMocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state_with(mocks))).push(route))
}

/// A service that behaves as if the test session had authenticated.
pub(crate) fn session_service(mocks: AppMocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(mocks)))
            .hoop(inject_session)
            .push(route),
    )
}

pub(crate) fn make_product(uuid: ProductUuid, variants: Vec<VariantRecord>) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Ponni Rice".to_string(),
        category: "Grains".to_string(),
        variants,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_variant(label: &str, price: u64, stock: u32) -> VariantRecord {
    VariantRecord {
        uuid: VariantUuid::new(),
        label: label.to_string(),
        price,
        stock,
    }
}
