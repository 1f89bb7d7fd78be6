//! Purchases service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        catalog::{
            records::VariantUuid,
            repository::{PgCatalogRepository, StockDecrement},
        },
        customers::records::CustomerUuid,
        purchases::{
            data::NewPurchase, errors::PurchasesServiceError, records::PurchaseRecord,
            repository::PgPurchasesRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgPurchasesService {
    db: Db,
    repository: PgPurchasesRepository,
    catalog: PgCatalogRepository,
}

impl PgPurchasesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgPurchasesRepository::new(),
            catalog: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl PurchasesService for PgPurchasesService {
    async fn record_purchases(
        &self,
        purchases: Vec<NewPurchase>,
    ) -> Result<Vec<PurchaseRecord>, PurchasesServiceError> {
        if purchases.is_empty() {
            return Err(PurchasesServiceError::MissingRequiredData);
        }

        let totals = purchases
            .iter()
            .map(NewPurchase::storable_total)
            .collect::<Option<Vec<u64>>>()
            .ok_or(PurchasesServiceError::InvalidData)?;

        let variants: Vec<VariantUuid> = purchases.iter().map(|p| p.variant_uuid).collect();

        let mut tx = self.db.begin_transaction().await?;
        let mut recorded = Vec::with_capacity(purchases.len());

        self.catalog.lock_variants(&mut tx, &variants).await?;

        for (purchase, total) in purchases.into_iter().zip(totals) {

            let outcome = self
                .catalog
                .decrement_variant_stock(
                    &mut tx,
                    purchase.product_uuid,
                    purchase.variant_uuid,
                    purchase.quantity,
                )
                .await?;

            match outcome {
                StockDecrement::Applied { remaining } => {
                    info!(
                        product_uuid = %purchase.product_uuid,
                        variant_uuid = %purchase.variant_uuid,
                        quantity = purchase.quantity,
                        remaining,
                        "decremented stock"
                    );
                }
                StockDecrement::Insufficient { available } => {
                    warn!(
                        product_uuid = %purchase.product_uuid,
                        variant_uuid = %purchase.variant_uuid,
                        requested = purchase.quantity,
                        available,
                        "stock ran out during commit"
                    );

                    return Err(PurchasesServiceError::InsufficientStock {
                        product_uuid: purchase.product_uuid,
                        variant_uuid: purchase.variant_uuid,
                        available,
                    });
                }
                StockDecrement::Missing => {
                    return Err(PurchasesServiceError::VariantGone {
                        product_uuid: purchase.product_uuid,
                        variant_uuid: purchase.variant_uuid,
                    });
                }
            }

            let record = self
                .repository
                .create_purchase(&mut tx, purchase, total)
                .await?;

            recorded.push(record);
        }

        tx.commit().await?;

        Ok(recorded)
    }

    async fn list_purchases(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<PurchaseRecord>, PurchasesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let purchases = self.repository.list_purchases(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(purchases)
    }
}

#[automock]
#[async_trait]
pub trait PurchasesService: Send + Sync {
    /// Decrement stock and insert a record for every purchase, in order,
    /// inside one transaction.
    ///
    /// Nothing is written unless every line commits.
    async fn record_purchases(
        &self,
        purchases: Vec<NewPurchase>,
    ) -> Result<Vec<PurchaseRecord>, PurchasesServiceError>;

    /// A customer's purchases, newest first.
    async fn list_purchases(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<PurchaseRecord>, PurchasesServiceError>;
}
