//! Customers service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::customers::{
        data::NewCustomer,
        errors::CustomersServiceError,
        records::{CustomerRecord, CustomerUuid},
        repository::PgCustomersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCustomersService {
    db: Db,
    repository: PgCustomersRepository,
}

impl PgCustomersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCustomersRepository::new(),
        }
    }
}

#[async_trait]
impl CustomersService for PgCustomersService {
    async fn register(
        &self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let customer = customer.normalized();

        if !customer.is_complete() {
            return Err(CustomersServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_customer(&mut tx, customer).await?;

        tx.commit().await?;

        info!(customer_uuid = %created.uuid, "registered customer");

        Ok(created)
    }

    async fn get_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let customer = self.repository.get_customer(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(customer)
    }

    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let identifier = identifier.trim();

        if identifier.is_empty() {
            return Err(CustomersServiceError::NotFound);
        }

        let mut tx = self.db.begin_transaction().await?;

        let customer = self
            .repository
            .find_by_identifier(&mut tx, identifier)
            .await?;

        tx.commit().await?;

        customer.ok_or(CustomersServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Registers a new customer account.
    async fn register(
        &self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Retrieve a single customer.
    async fn get_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Find a customer by email address or mobile number.
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<CustomerRecord, CustomersServiceError>;
}
