//! Sessions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use serde_json::Value;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    customers::records::CustomerUuid,
    sessions::records::{SessionRecord, SessionUuid, StoredSession},
};

const CREATE_SESSION_SQL: &str = include_str!("sql/create_session.sql");
const FIND_SESSION_SQL: &str = include_str!("sql/find_session.sql");
const GET_SESSION_CART_SQL: &str = include_str!("sql/get_session_cart.sql");
const SAVE_SESSION_CART_SQL: &str = include_str!("sql/save_session_cart.sql");
const DELETE_SESSION_SQL: &str = include_str!("sql/delete_session.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSessionsRepository;

impl PgSessionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
        customer: CustomerUuid,
        token_hash: &str,
    ) -> Result<StoredSession, sqlx::Error> {
        query_as::<Postgres, StoredSession>(CREATE_SESSION_SQL)
            .bind(session.into_uuid())
            .bind(customer.into_uuid())
            .bind(token_hash)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
    ) -> Result<Option<StoredSession>, sqlx::Error> {
        query_as::<Postgres, StoredSession>(FIND_SESSION_SQL)
            .bind(session.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
    ) -> Result<Value, sqlx::Error> {
        query_scalar::<Postgres, Value>(GET_SESSION_CART_SQL)
            .bind(session.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn save_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
        cart: Value,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SAVE_SESSION_CART_SQL)
            .bind(session.into_uuid())
            .bind(cart)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_SESSION_SQL)
            .bind(session.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for StoredSession {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            record: SessionRecord {
                uuid: SessionUuid::from_uuid(row.try_get("uuid")?),
                customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
                created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            },
            token_hash: row.try_get("token_hash")?,
        })
    }
}
