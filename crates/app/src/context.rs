//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        carts::{CartsService, SessionCartsService},
        catalog::{CatalogService, PgCatalogService},
        checkout::{CheckoutProcessor, CheckoutService},
        customers::{CustomersService, PgCustomersService},
        purchases::{PgPurchasesService, PurchasesService},
        sessions::{PgSessionsService, SessionsService},
        stats::{PgStatsService, StatsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub customers: Arc<dyn CustomersService>,
    pub sessions: Arc<dyn SessionsService>,
    pub carts: Arc<dyn CartsService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub purchases: Arc<dyn PurchasesService>,
    pub stats: Arc<dyn StatsService>,
}

impl AppContext {
    /// Wire every service against one database handle.
    #[must_use]
    pub fn from_db(db: &Db) -> Self {
        let catalog: Arc<dyn CatalogService> = Arc::new(PgCatalogService::new(db.clone()));
        let sessions: Arc<dyn SessionsService> = Arc::new(PgSessionsService::new(db.clone()));
        let purchases: Arc<dyn PurchasesService> = Arc::new(PgPurchasesService::new(db.clone()));

        Self {
            customers: Arc::new(PgCustomersService::new(db.clone())),
            stats: Arc::new(PgStatsService::new(db.clone())),
            carts: Arc::new(SessionCartsService::new(
                Arc::clone(&catalog),
                Arc::clone(&sessions),
            )),
            checkout: Arc::new(CheckoutProcessor::new(
                Arc::clone(&catalog),
                Arc::clone(&sessions),
                Arc::clone(&purchases),
            )),
            catalog,
            sessions,
            purchases,
        }
    }

    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(&Db::new(pool)))
    }

    /// Connect, apply pending migrations, then build the context.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or migrating fails.
    pub async fn from_database_url_migrated(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        Ok(Self::from_db(&Db::new(pool)))
    }
}
