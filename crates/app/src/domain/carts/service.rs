//! Carts service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::domain::{
    carts::{
        data::NewCartLine,
        errors::CartsServiceError,
        models::{Cart, CartKey, CartSummary},
    },
    catalog::{CatalogService, records::ProductRecord},
    sessions::{SessionsService, records::SessionUuid},
};

/// Cart operations over the cart stored with each session.
///
/// Every call loads the session's cart, applies the change to it and saves
/// it back only when the change succeeded.
#[derive(Clone)]
pub struct SessionCartsService {
    catalog: Arc<dyn CatalogService>,
    sessions: Arc<dyn SessionsService>,
}

impl std::fmt::Debug for SessionCartsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCartsService").finish_non_exhaustive()
    }
}

impl SessionCartsService {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogService>, sessions: Arc<dyn SessionsService>) -> Self {
        Self { catalog, sessions }
    }
}

#[async_trait]
impl CartsService for SessionCartsService {
    async fn add_item(
        &self,
        session: SessionUuid,
        line: NewCartLine,
    ) -> Result<CartSummary, CartsServiceError> {
        self.add_items(session, vec![line]).await
    }

    async fn add_items(
        &self,
        session: SessionUuid,
        lines: Vec<NewCartLine>,
    ) -> Result<CartSummary, CartsServiceError> {
        if lines.is_empty() {
            return Err(CartsServiceError::NoItemsSelected);
        }

        let mut cart = self.sessions.get_cart(session).await?;
        let mut products: FxHashMap<_, ProductRecord> = FxHashMap::default();
        let mut summary = cart.summary()?;

        for line in lines {
            if !products.contains_key(&line.product_uuid) {
                let product = self.catalog.get_product(line.product_uuid).await?;

                products.insert(line.product_uuid, product);
            }

            let product = products
                .get(&line.product_uuid)
                .ok_or(CartsServiceError::ProductNotFound)?;

            summary = cart.add(product, line.variant_uuid, line.quantity)?;
        }

        self.sessions.save_cart(session, &cart).await?;

        debug!(
            session_uuid = %session,
            total = summary.total,
            line_count = summary.line_count,
            "updated cart"
        );

        Ok(summary)
    }

    async fn remove_item(
        &self,
        session: SessionUuid,
        key: CartKey,
    ) -> Result<CartSummary, CartsServiceError> {
        let mut cart = self.sessions.get_cart(session).await?;

        if cart.remove(&key) {
            self.sessions.save_cart(session, &cart).await?;
        }

        Ok(cart.summary()?)
    }

    async fn get_cart(&self, session: SessionUuid) -> Result<Cart, CartsServiceError> {
        Ok(self.sessions.get_cart(session).await?)
    }

    async fn clear_cart(&self, session: SessionUuid) -> Result<(), CartsServiceError> {
        self.sessions.save_cart(session, &Cart::default()).await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Add a single variant selection to the session's cart.
    async fn add_item(
        &self,
        session: SessionUuid,
        line: NewCartLine,
    ) -> Result<CartSummary, CartsServiceError>;

    /// Add several variant selections at once.
    ///
    /// Selections are applied in order and the cart is only saved if every
    /// one of them succeeds.
    async fn add_items(
        &self,
        session: SessionUuid,
        lines: Vec<NewCartLine>,
    ) -> Result<CartSummary, CartsServiceError>;

    /// Remove a line if present. Removing an absent line is not an error.
    async fn remove_item(
        &self,
        session: SessionUuid,
        key: CartKey,
    ) -> Result<CartSummary, CartsServiceError>;

    /// The session's current cart.
    async fn get_cart(&self, session: SessionUuid) -> Result<Cart, CartsServiceError>;

    /// Empty the session's cart.
    async fn clear_cart(&self, session: SessionUuid) -> Result<(), CartsServiceError>;
}
