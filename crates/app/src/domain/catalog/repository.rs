//! Catalog Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::catalog::{
    data::NewProduct,
    records::{ProductRecord, ProductUuid, VariantRecord, VariantUuid},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LIST_VARIANTS_SQL: &str = include_str!("sql/list_variants.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const CREATE_VARIANT_SQL: &str = include_str!("sql/create_variant.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const DECREMENT_VARIANT_STOCK_SQL: &str = include_str!("sql/decrement_variant_stock.sql");
const GET_VARIANT_STOCK_SQL: &str = include_str!("sql/get_variant_stock.sql");
const LOCK_VARIANTS_SQL: &str = include_str!("sql/lock_variants.sql");

/// Outcome of a conditional stock decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StockDecrement {
    /// Stock was reduced; the remaining count is returned.
    Applied { remaining: u32 },

    /// The variant exists but holds fewer units than requested.
    Insufficient { available: u32 },

    /// The product or variant no longer exists.
    Missing,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let mut products = query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await?;

        self.attach_variants(tx, &mut products).await?;

        Ok(products)
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        let product = query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        let mut products = vec![product];

        self.attach_variants(tx, &mut products).await?;

        products.pop().ok_or(sqlx::Error::RowNotFound)
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        let mut created = query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.name)
            .bind(&product.category)
            .fetch_one(&mut **tx)
            .await?;

        for (position, variant) in product.variants.into_iter().enumerate() {
            query(CREATE_VARIANT_SQL)
                .bind(variant.uuid.into_uuid())
                .bind(created.uuid.into_uuid())
                .bind(to_i32(position, "position")?)
                .bind(&variant.label)
                .bind(to_i64(variant.price, "price")?)
                .bind(to_i32(variant.stock, "stock")?)
                .execute(&mut **tx)
                .await?;

            created.variants.push(VariantRecord {
                uuid: variant.uuid,
                label: variant.label,
                price: variant.price,
                stock: variant.stock,
            });
        }

        Ok(created)
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Decrement stock only when at least `amount` units remain.
    ///
    /// The check and the write happen in a single statement, so two
    /// concurrent buyers can never both take the last units.
    pub(crate) async fn decrement_variant_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        variant: VariantUuid,
        amount: u32,
    ) -> Result<StockDecrement, sqlx::Error> {
        let amount = to_i32(amount, "amount")?;

        let remaining: Option<i32> = query_scalar(DECREMENT_VARIANT_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(variant.into_uuid())
            .bind(amount)
            .fetch_optional(&mut **tx)
            .await?;

        if let Some(remaining) = remaining {
            return Ok(StockDecrement::Applied {
                remaining: to_u32(remaining, "stock")?,
            });
        }

        let available: Option<i32> = query_scalar(GET_VARIANT_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(variant.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        match available {
            Some(available) => Ok(StockDecrement::Insufficient {
                available: to_u32(available, "stock")?,
            }),
            None => Ok(StockDecrement::Missing),
        }
    }

    /// Row-lock the given variants in uuid order.
    ///
    /// Every multi-line commit takes its locks through here first, so two
    /// transactions touching the same variants always queue instead of
    /// deadlocking.
    pub(crate) async fn lock_variants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variants: &[VariantUuid],
    ) -> Result<(), sqlx::Error> {
        let mut uuids: Vec<Uuid> = variants.iter().map(|v| v.into_uuid()).collect();

        uuids.sort_unstable();
        uuids.dedup();

        query(LOCK_VARIANTS_SQL)
            .bind(uuids)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    async fn attach_variants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &mut [ProductRecord],
    ) -> Result<(), sqlx::Error> {
        if products.is_empty() {
            return Ok(());
        }

        let uuids: Vec<Uuid> = products.iter().map(|p| p.uuid.into_uuid()).collect();

        let rows = query_as::<Postgres, VariantRow>(LIST_VARIANTS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut by_product: FxHashMap<ProductUuid, Vec<VariantRecord>> = FxHashMap::default();

        for row in rows {
            by_product
                .entry(row.product_uuid)
                .or_default()
                .push(row.variant);
        }

        for product in products {
            product.variants = by_product.remove(&product.uuid).unwrap_or_default();
        }

        Ok(())
    }
}

struct VariantRow {
    product_uuid: ProductUuid,
    variant: VariantRecord,
}

impl<'r> FromRow<'r, PgRow> for VariantRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            variant: VariantRecord {
                uuid: VariantUuid::from_uuid(row.try_get("uuid")?),
                label: row.try_get("label")?,
                price: to_u64(row.try_get("price")?, "price")?,
                stock: to_u32(row.try_get("stock")?, "stock")?,
            },
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            variants: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

pub(crate) fn to_u64(value: i64, col: &str) -> Result<u64, sqlx::Error> {
    u64::try_from(value).map_err(|e| column_error(col, e))
}

pub(crate) fn to_u32(value: i32, col: &str) -> Result<u32, sqlx::Error> {
    u32::try_from(value).map_err(|e| column_error(col, e))
}

pub(crate) fn to_i64(value: u64, col: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(value).map_err(|e| column_error(col, e))
}

pub(crate) fn to_i32<T>(value: T, col: &str) -> Result<i32, sqlx::Error>
where
    i32: TryFrom<T, Error = std::num::TryFromIntError>,
{
    i32::try_from(value).map_err(|e| column_error(col, e))
}

fn column_error(col: &str, source: std::num::TryFromIntError) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(source),
    }
}
