//! Stats Repository

use jiff::{Timestamp, tz::TimeZone};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    catalog::repository::{to_i32, to_u64},
    stats::records::{CategorySales, DailySales},
};

const SUMMARY_SQL: &str = include_str!("sql/summary.sql");
const DAILY_SALES_SQL: &str = include_str!("sql/daily_sales.sql");
const CATEGORY_SALES_SQL: &str = include_str!("sql/category_sales.sql");

/// Scalar figures of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Summary {
    pub total_customers: u64,
    pub new_customers_today: u64,
    pub total_sales: u64,
    pub sales_today: u64,
    pub total_products: u64,
    pub low_stock_variants: u64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgStatsRepository;

impl PgStatsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn summary(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        day_start: Timestamp,
        low_stock_threshold: u32,
    ) -> Result<Summary, sqlx::Error> {
        let row = query(SUMMARY_SQL)
            .bind(SqlxTimestamp::from(day_start))
            .bind(to_i32(low_stock_threshold, "low_stock_threshold")?)
            .fetch_one(&mut **tx)
            .await?;

        Ok(Summary {
            total_customers: to_u64(row.try_get("total_customers")?, "total_customers")?,
            new_customers_today: to_u64(row.try_get("new_customers_today")?, "new_customers_today")?,
            total_sales: to_u64(row.try_get("total_sales")?, "total_sales")?,
            sales_today: to_u64(row.try_get("sales_today")?, "sales_today")?,
            total_products: to_u64(row.try_get("total_products")?, "total_products")?,
            low_stock_variants: to_u64(row.try_get("low_stock_variants")?, "low_stock_variants")?,
        })
    }

    /// Sales per day for the `days` days ending with the one starting at
    /// `day_start`.
    pub(crate) async fn daily_sales(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        day_start: Timestamp,
        days: u32,
    ) -> Result<Vec<DailySales>, sqlx::Error> {
        query_as::<Postgres, DailySales>(DAILY_SALES_SQL)
            .bind(SqlxTimestamp::from(day_start))
            .bind(to_i32(days, "days")?)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn category_sales(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: u32,
    ) -> Result<Vec<CategorySales>, sqlx::Error> {
        query_as::<Postgres, CategorySales>(CATEGORY_SALES_SQL)
            .bind(i64::from(limit))
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for DailySales {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            day: row
                .try_get::<SqlxTimestamp, _>("day_start")?
                .to_jiff()
                .to_zoned(TimeZone::UTC)
                .date(),
            total: to_u64(row.try_get("total")?, "total")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CategorySales {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            category: row.try_get("category")?,
            total: to_u64(row.try_get("total")?, "total")?,
        })
    }
}
