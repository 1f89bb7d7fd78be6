//! Purchases Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    catalog::{
        records::{ProductUuid, VariantUuid},
        repository::{to_i32, to_i64, to_u32, to_u64},
    },
    customers::records::CustomerUuid,
    purchases::{
        data::NewPurchase,
        records::{PurchaseRecord, PurchaseUuid},
    },
};

const CREATE_PURCHASE_SQL: &str = include_str!("sql/create_purchase.sql");
const LIST_PURCHASES_SQL: &str = include_str!("sql/list_purchases.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPurchasesRepository;

impl PgPurchasesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_purchase(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        purchase: NewPurchase,
        total: u64,
    ) -> Result<PurchaseRecord, sqlx::Error> {
        query_as::<Postgres, PurchaseRecord>(CREATE_PURCHASE_SQL)
            .bind(purchase.uuid.into_uuid())
            .bind(purchase.customer_uuid.into_uuid())
            .bind(purchase.product_uuid.into_uuid())
            .bind(purchase.product_name)
            .bind(purchase.variant_uuid.into_uuid())
            .bind(purchase.variant_label)
            .bind(to_i32(purchase.quantity, "quantity")?)
            .bind(to_i64(purchase.unit_price, "unit_price")?)
            .bind(to_i64(total, "total")?)
            .bind(purchase.payment_method)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_purchases(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Vec<PurchaseRecord>, sqlx::Error> {
        query_as::<Postgres, PurchaseRecord>(LIST_PURCHASES_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for PurchaseRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PurchaseUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            variant_uuid: VariantUuid::from_uuid(row.try_get("variant_uuid")?),
            variant_label: row.try_get("variant_label")?,
            quantity: to_u32(row.try_get("quantity")?, "quantity")?,
            unit_price: to_u64(row.try_get("unit_price")?, "unit_price")?,
            total: to_u64(row.try_get("total")?, "total")?,
            payment_method: row.try_get("payment_method")?,
            purchased_at: row.try_get::<SqlxTimestamp, _>("purchased_at")?.to_jiff(),
        })
    }
}
