//! Checkout service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use tracing::{info, warn};

use crate::domain::{
    carts::models::{Cart, CartKey},
    catalog::{CatalogService, CatalogServiceError, records::ProductRecord},
    checkout::{errors::CheckoutServiceError, models::CheckoutReceipt},
    customers::records::CustomerUuid,
    purchases::{
        PurchasesService, PurchasesServiceError, data::NewPurchase, records::PurchaseUuid,
    },
    sessions::{SessionsService, records::SessionUuid},
};

/// Validates a session's cart against live stock, commits it as purchases
/// and empties the cart.
#[derive(Clone)]
pub struct CheckoutProcessor {
    catalog: Arc<dyn CatalogService>,
    sessions: Arc<dyn SessionsService>,
    purchases: Arc<dyn PurchasesService>,
}

impl std::fmt::Debug for CheckoutProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutProcessor").finish_non_exhaustive()
    }
}

impl CheckoutProcessor {
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        sessions: Arc<dyn SessionsService>,
        purchases: Arc<dyn PurchasesService>,
    ) -> Self {
        Self {
            catalog,
            sessions,
            purchases,
        }
    }

    /// Check every line against live stock without mutating anything.
    async fn validate(&self, cart: &Cart) -> Result<(), CheckoutServiceError> {
        let mut products: FxHashMap<_, ProductRecord> = FxHashMap::default();

        for line in cart.lines() {
            let product_uuid = line.key.product_uuid;

            if !products.contains_key(&product_uuid) {
                let product = self
                    .catalog
                    .get_product(product_uuid)
                    .await
                    .map_err(|e| match e {
                        CatalogServiceError::NotFound => CheckoutServiceError::ProductNotFound {
                            product_name: line.product_name.clone(),
                        },
                        e => CheckoutServiceError::Catalog(e),
                    })?;

                products.insert(product_uuid, product);
            }

            let variant = products
                .get(&product_uuid)
                .and_then(|product| product.variant(line.key.variant_uuid))
                .ok_or_else(|| CheckoutServiceError::VariantNotFound {
                    product_name: line.product_name.clone(),
                    variant_label: line.variant_label.clone(),
                })?;

            if variant.stock < line.quantity {
                warn!(
                    product_uuid = %product_uuid,
                    variant_uuid = %line.key.variant_uuid,
                    requested = line.quantity,
                    available = variant.stock,
                    "insufficient stock at checkout"
                );

                return Err(CheckoutServiceError::InsufficientStock {
                    product_name: line.product_name.clone(),
                    variant_label: line.variant_label.clone(),
                    requested: line.quantity,
                    available: variant.stock,
                });
            }
        }

        Ok(())
    }
}

#[async_trait]
impl CheckoutService for CheckoutProcessor {
    async fn checkout(
        &self,
        session: SessionUuid,
        customer: CustomerUuid,
        payment_method: String,
    ) -> Result<CheckoutReceipt, CheckoutServiceError> {
        let cart = self.sessions.get_cart(session).await?;

        if cart.is_empty() {
            return Err(CheckoutServiceError::EmptyCart);
        }

        let payment_method = payment_method.trim();

        if payment_method.is_empty() {
            return Err(CheckoutServiceError::InvalidPaymentMethod);
        }

        let total = cart
            .total()
            .map_err(|_overflow| CheckoutServiceError::AmountOverflow)?;

        self.validate(&cart).await?;

        let drafts: Vec<NewPurchase> = cart
            .lines()
            .iter()
            .map(|line| NewPurchase {
                uuid: PurchaseUuid::new(),
                customer_uuid: customer,
                product_uuid: line.key.product_uuid,
                product_name: line.product_name.clone(),
                variant_uuid: line.key.variant_uuid,
                variant_label: line.variant_label.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                payment_method: payment_method.to_string(),
            })
            .collect();

        let purchases = self
            .purchases
            .record_purchases(drafts)
            .await
            .map_err(|e| commit_error(&cart, e))?;

        if let Err(e) = self.sessions.save_cart(session, &Cart::default()).await {
            warn!(
                session_uuid = %session,
                error = %e,
                "checkout committed but the cart could not be cleared"
            );
        }

        info!(
            session_uuid = %session,
            customer_uuid = %customer,
            lines = purchases.len(),
            total,
            "checkout completed"
        );

        Ok(CheckoutReceipt { purchases, total })
    }
}

/// Name the cart line a commit-time failure refers to.
fn commit_error(cart: &Cart, error: PurchasesServiceError) -> CheckoutServiceError {
    let line_for = |product_uuid, variant_uuid| cart.line(&CartKey::new(product_uuid, variant_uuid));

    match error {
        PurchasesServiceError::InsufficientStock {
            product_uuid,
            variant_uuid,
            available,
        } => match line_for(product_uuid, variant_uuid) {
            Some(line) => CheckoutServiceError::InsufficientStock {
                product_name: line.product_name.clone(),
                variant_label: line.variant_label.clone(),
                requested: line.quantity,
                available,
            },
            None => CheckoutServiceError::Purchases(PurchasesServiceError::InsufficientStock {
                product_uuid,
                variant_uuid,
                available,
            }),
        },
        PurchasesServiceError::VariantGone {
            product_uuid,
            variant_uuid,
        } => match line_for(product_uuid, variant_uuid) {
            Some(line) => CheckoutServiceError::ProductNotFound {
                product_name: line.product_name.clone(),
            },
            None => CheckoutServiceError::Purchases(PurchasesServiceError::VariantGone {
                product_uuid,
                variant_uuid,
            }),
        },
        PurchasesServiceError::InvalidData => CheckoutServiceError::AmountOverflow,
        PurchasesServiceError::Contention => CheckoutServiceError::Contention,
        error => CheckoutServiceError::Purchases(error),
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Check out the session's cart on behalf of `customer`.
    ///
    /// On any error the cart is left as it was and nothing is committed.
    async fn checkout(
        &self,
        session: SessionUuid,
        customer: CustomerUuid,
        payment_method: String,
    ) -> Result<CheckoutReceipt, CheckoutServiceError>;
}
