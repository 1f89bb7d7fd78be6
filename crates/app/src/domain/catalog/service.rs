//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::catalog::{
        data::NewProduct,
        errors::CatalogServiceError,
        records::{ProductRecord, ProductUuid, VariantUuid},
        repository::{PgCatalogRepository, StockDecrement},
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, CatalogServiceError> {
        if !product.is_complete() {
            return Err(CatalogServiceError::MissingRequiredData);
        }

        product.check_ranges()?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        info!(
            product_uuid = %created.uuid,
            variants = created.variants.len(),
            "created product"
        );

        Ok(created)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn decrement_variant_stock(
        &self,
        product: ProductUuid,
        variant: VariantUuid,
        amount: u32,
    ) -> Result<u32, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let outcome = self
            .repository
            .decrement_variant_stock(&mut tx, product, variant, amount)
            .await?;

        match outcome {
            StockDecrement::Applied { remaining } => {
                tx.commit().await?;

                Ok(remaining)
            }
            StockDecrement::Insufficient { available } => {
                Err(CatalogServiceError::InsufficientStock { available })
            }
            StockDecrement::Missing => Err(CatalogServiceError::NotFound),
        }
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieves all listed products with their variants.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, CatalogServiceError>;

    /// Retrieve a single product with live variant stock.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, CatalogServiceError>;

    /// Creates a new product together with its variants.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, CatalogServiceError>;

    /// Removes a product from the catalog.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), CatalogServiceError>;

    /// Take `amount` units from a variant if, and only if, that many remain.
    ///
    /// Returns the remaining stock.
    async fn decrement_variant_stock(
        &self,
        product: ProductUuid,
        variant: VariantUuid,
        amount: u32,
    ) -> Result<u32, CatalogServiceError>;
}
