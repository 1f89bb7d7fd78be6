//! Sessions service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        carts::models::Cart,
        customers::records::CustomerUuid,
        sessions::{
            errors::SessionsServiceError,
            records::{IssuedSession, SessionRecord, SessionUuid},
            repository::PgSessionsRepository,
            token::{
                SessionTokenVersion, format_session_token, generate_session_secret,
                parse_session_token, session_token_hash,
            },
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgSessionsService {
    db: Db,
    repository: PgSessionsRepository,
}

impl PgSessionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSessionsRepository::new(),
        }
    }
}

#[async_trait]
impl SessionsService for PgSessionsService {
    async fn create_session(
        &self,
        customer: CustomerUuid,
    ) -> Result<IssuedSession, SessionsServiceError> {
        let session_uuid = SessionUuid::new();
        let version = SessionTokenVersion::V1;
        let secret = generate_session_secret();

        let token = format_session_token(session_uuid, version, &secret);
        let token_hash = session_token_hash(session_uuid, version, &secret);

        let mut tx = self.db.begin_transaction().await?;

        let stored = self
            .repository
            .create_session(&mut tx, session_uuid, customer, &token_hash)
            .await?;

        tx.commit().await?;

        info!(
            session_uuid = %stored.record.uuid,
            customer_uuid = %customer,
            "created session"
        );

        Ok(IssuedSession {
            token,
            session: stored.record,
        })
    }

    async fn authenticate(&self, token: &str) -> Result<SessionRecord, SessionsServiceError> {
        let parsed = parse_session_token(token)?;

        let mut tx = self.db.begin_transaction().await?;

        let stored = self
            .repository
            .find_session(&mut tx, parsed.session_uuid)
            .await?
            .ok_or(SessionsServiceError::NotFound)?;

        tx.commit().await?;

        let expected = session_token_hash(parsed.session_uuid, parsed.version, &parsed.secret);

        if stored.token_hash != expected {
            debug!(session_uuid = %parsed.session_uuid, "session token hash mismatch");

            return Err(SessionsServiceError::NotFound);
        }

        Ok(stored.record)
    }

    async fn get_cart(&self, session: SessionUuid) -> Result<Cart, SessionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let value = self.repository.get_cart(&mut tx, session).await?;

        tx.commit().await?;

        Ok(serde_json::from_value(value)?)
    }

    async fn save_cart(&self, session: SessionUuid, cart: &Cart) -> Result<(), SessionsServiceError> {
        let value = serde_json::to_value(cart)?;

        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.save_cart(&mut tx, session, value).await?;

        if rows_affected == 0 {
            return Err(SessionsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn delete_session(&self, session: SessionUuid) -> Result<(), SessionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_session(&mut tx, session).await?;

        if rows_affected == 0 {
            return Err(SessionsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(session_uuid = %session, "deleted session");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait SessionsService: Send + Sync {
    /// Open a session for a customer and issue its bearer token.
    ///
    /// The raw token is only ever returned here.
    async fn create_session(
        &self,
        customer: CustomerUuid,
    ) -> Result<IssuedSession, SessionsServiceError>;

    /// Resolve a bearer token to its session.
    ///
    /// Malformed, unknown and mismatching tokens are all reported as
    /// [`SessionsServiceError::NotFound`].
    async fn authenticate(&self, token: &str) -> Result<SessionRecord, SessionsServiceError>;

    /// Load the cart stored with a session.
    async fn get_cart(&self, session: SessionUuid) -> Result<Cart, SessionsServiceError>;

    /// Replace the cart stored with a session.
    async fn save_cart(&self, session: SessionUuid, cart: &Cart) -> Result<(), SessionsServiceError>;

    /// End a session, discarding its cart.
    async fn delete_session(&self, session: SessionUuid) -> Result<(), SessionsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::catalog::{
            CatalogService,
            data::{NewProduct, NewVariant},
            records::{ProductUuid, VariantUuid},
        },
        test::TestContext,
    };

    use super::*;

    #[tokio::test]
    async fn issued_token_authenticates_to_session() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("asha@example.com", "9000000001").await?;

        let issued = ctx.sessions.create_session(customer.uuid).await?;
        let session = ctx.sessions.authenticate(&issued.token).await?;

        assert_eq!(session, issued.session);
        assert_eq!(session.customer_uuid, customer.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn tampered_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("ravi@example.com", "9000000002").await?;

        let issued = ctx.sessions.create_session(customer.uuid).await?;

        let (id, _secret) = issued.token.split_once('.').ok_or("token has no secret")?;
        let forged = format!("{id}.{}", "0".repeat(64));

        let result = ctx.sessions.authenticate(&forged).await;

        assert!(
            matches!(result, Err(SessionsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn new_session_has_empty_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("meena@example.com", "9000000003").await?;

        let issued = ctx.sessions.create_session(customer.uuid).await?;
        let cart = ctx.sessions.get_cart(issued.session.uuid).await?;

        assert!(cart.is_empty(), "new session cart should be empty");

        Ok(())
    }

    #[tokio::test]
    async fn saved_cart_is_loaded_back() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("kumar@example.com", "9000000004").await?;
        let issued = ctx.sessions.create_session(customer.uuid).await?;

        let product = ctx
            .catalog
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                name: "Toor Dal".to_string(),
                category: "Pulses".to_string(),
                variants: vec![NewVariant {
                    uuid: VariantUuid::new(),
                    label: "500g".to_string(),
                    price: 75_00,
                    stock: 8,
                }],
            })
            .await?;

        let variant = product.variants.first().map(|v| v.uuid).ok_or("no variant")?;

        let mut cart = Cart::default();

        cart.add(&product, variant, 2)?;

        ctx.sessions.save_cart(issued.session.uuid, &cart).await?;

        let loaded = ctx.sessions.get_cart(issued.session.uuid).await?;

        assert_eq!(loaded, cart);

        Ok(())
    }

    #[tokio::test]
    async fn deleted_session_no_longer_authenticates() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("divya@example.com", "9000000005").await?;
        let issued = ctx.sessions.create_session(customer.uuid).await?;

        ctx.sessions.delete_session(issued.session.uuid).await?;

        let result = ctx.sessions.authenticate(&issued.token).await;
        let cart = ctx.sessions.get_cart(issued.session.uuid).await;

        assert!(
            matches!(result, Err(SessionsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
        assert!(
            matches!(cart, Err(SessionsServiceError::NotFound)),
            "cart should be gone with the session, got {cart:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn session_for_unknown_customer_is_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx.sessions.create_session(CustomerUuid::new()).await;

        assert!(
            matches!(result, Err(SessionsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }
}
