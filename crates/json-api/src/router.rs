//! App Router

use salvo::Router;

use crate::{
    auth, cart, checkout, customers, healthcheck, products, purchases, sessions, stats,
};

/// Routes covered by the OpenAPI document.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(catalog_router())
        .push(Router::with_path("customers").post(customers::create::handler))
        .push(Router::with_path("sessions").post(sessions::create::handler))
        .push(session_router())
        .push(admin_router())
}

fn admin_router() -> Router {
    Router::with_path("admin")
        .hoop(auth::staff::handler)
        .push(Router::with_path("stats").get(stats::get::handler))
}

fn catalog_router() -> Router {
    Router::with_path("products")
        .get(products::index::handler)
        .push(Router::with_path("{product}").get(products::get::handler))
        .push(
            Router::new()
                .hoop(auth::staff::handler)
                .post(products::create::handler)
                .push(Router::with_path("{product}").delete(products::delete::handler)),
        )
}

fn session_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("sessions/current").delete(sessions::delete::handler))
        .push(
            Router::with_path("cart")
                .get(cart::get::handler)
                .delete(cart::delete::handler)
                .push(
                    Router::with_path("items")
                        .post(cart::items::create::handler)
                        .push(Router::with_path("{key}").delete(cart::items::delete::handler)),
                ),
        )
        .push(Router::with_path("checkout").post(checkout::create::handler))
        .push(Router::with_path("purchases").get(purchases::index::handler))
}
