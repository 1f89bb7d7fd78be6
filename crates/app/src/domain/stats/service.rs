//! Stats service.

use async_trait::async_trait;
use jiff::{Timestamp, tz::TimeZone};
use mockall::automock;

use crate::{
    database::Db,
    domain::stats::{
        errors::StatsServiceError,
        records::{DAILY_SALES_DAYS, LOW_STOCK_THRESHOLD, SalesDashboard, TOP_CATEGORIES},
        repository::PgStatsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgStatsService {
    db: Db,
    repository: PgStatsRepository,
}

impl PgStatsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgStatsRepository::new(),
        }
    }

    /// The dashboard as seen at `now`.
    ///
    /// # Errors
    ///
    /// Returns an error when a query fails.
    pub async fn dashboard_at(&self, now: Timestamp) -> Result<SalesDashboard, StatsServiceError> {
        let day_start = now.to_zoned(TimeZone::UTC).start_of_day()?.timestamp();

        let mut tx = self.db.begin_transaction().await?;

        let summary = self
            .repository
            .summary(&mut tx, day_start, LOW_STOCK_THRESHOLD)
            .await?;
        let daily_sales = self
            .repository
            .daily_sales(&mut tx, day_start, DAILY_SALES_DAYS)
            .await?;
        let top_categories = self
            .repository
            .category_sales(&mut tx, TOP_CATEGORIES)
            .await?;

        tx.commit().await?;

        Ok(SalesDashboard {
            total_customers: summary.total_customers,
            new_customers_today: summary.new_customers_today,
            total_sales: summary.total_sales,
            sales_today: summary.sales_today,
            total_products: summary.total_products,
            low_stock_variants: summary.low_stock_variants,
            daily_sales,
            top_categories,
        })
    }
}

#[async_trait]
impl StatsService for PgStatsService {
    async fn dashboard(&self) -> Result<SalesDashboard, StatsServiceError> {
        self.dashboard_at(Timestamp::now()).await
    }
}

#[automock]
#[async_trait]
pub trait StatsService: Send + Sync {
    /// Sales totals, recent daily sales, best-selling categories and the
    /// number of variants running low.
    async fn dashboard(&self) -> Result<SalesDashboard, StatsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan;
    use testresult::TestResult;

    use crate::{
        domain::{
            catalog::{
                CatalogService,
                data::{NewProduct, NewVariant},
                records::{ProductRecord, ProductUuid, VariantUuid},
            },
            purchases::{PurchasesService, data::NewPurchase, records::PurchaseUuid},
        },
        test::TestContext,
    };

    use super::*;

    async fn create_product(
        ctx: &TestContext,
        name: &str,
        category: &str,
        stocks: &[u32],
    ) -> Result<ProductRecord, Box<dyn std::error::Error>> {
        let product = ctx
            .catalog
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                name: name.to_string(),
                category: category.to_string(),
                variants: stocks
                    .iter()
                    .enumerate()
                    .map(|(n, &stock)| NewVariant {
                        uuid: VariantUuid::new(),
                        label: format!("pack {n}"),
                        price: 10_00,
                        stock,
                    })
                    .collect(),
            })
            .await?;

        Ok(product)
    }

    async fn buy(
        ctx: &TestContext,
        product: &ProductRecord,
        quantity: u32,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let customer = ctx
            .create_customer(
                &format!("{}@example.com", PurchaseUuid::new()),
                &PurchaseUuid::new().to_string(),
            )
            .await?;
        let variant = product.variants.first().ok_or("product has no variants")?;

        ctx.purchases
            .record_purchases(vec![NewPurchase {
                uuid: PurchaseUuid::new(),
                customer_uuid: customer.uuid,
                product_uuid: product.uuid,
                product_name: product.name.clone(),
                variant_uuid: variant.uuid,
                variant_label: variant.label.clone(),
                quantity,
                unit_price: variant.price,
                payment_method: "cash".to_string(),
            }])
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn empty_store_has_zeroed_week() -> TestResult {
        let ctx = TestContext::new().await;

        let dashboard = ctx.stats.dashboard().await?;

        assert_eq!(dashboard.total_sales, 0);
        assert_eq!(dashboard.total_customers, 0);
        assert_eq!(dashboard.daily_sales.len(), 7);
        assert!(
            dashboard.daily_sales.iter().all(|day| day.total == 0),
            "no sales expected: {:?}",
            dashboard.daily_sales
        );
        assert!(dashboard.top_categories.is_empty());
        assert_eq!(
            dashboard.daily_sales.last().map(|day| day.day),
            Some(Timestamp::now().to_zoned(TimeZone::UTC).date()),
            "the series ends today"
        );

        Ok(())
    }

    #[tokio::test]
    async fn dashboard_aggregates_sales_and_low_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let rice = create_product(&ctx, "Rice", "Grains", &[50, 9]).await?;
        let dal = create_product(&ctx, "Dal", "Pulses", &[12]).await?;
        let gone = create_product(&ctx, "Old Stock", "Grains", &[1]).await?;

        ctx.catalog.delete_product(gone.uuid).await?;

        buy(&ctx, &rice, 3).await?;
        buy(&ctx, &dal, 3).await?;

        let dashboard = ctx.stats.dashboard().await?;

        let categories: Vec<(&str, u64)> = dashboard
            .top_categories
            .iter()
            .map(|c| (c.category.as_str(), c.total))
            .collect();

        assert_eq!(dashboard.total_customers, 2);
        assert_eq!(dashboard.new_customers_today, 2);
        assert_eq!(dashboard.total_sales, 60_00);
        assert_eq!(dashboard.sales_today, 60_00);
        assert_eq!(dashboard.total_products, 2);
        assert_eq!(dashboard.low_stock_variants, 2, "rice pack 1 and dal (12 - 3)");
        assert_eq!(
            dashboard.daily_sales.last().map(|day| day.total),
            Some(60_00)
        );
        assert_eq!(categories, [("Grains", 30_00), ("Pulses", 30_00)]);

        Ok(())
    }

    #[tokio::test]
    async fn yesterdays_sales_move_out_of_today() -> TestResult {
        let ctx = TestContext::new().await;
        let rice = create_product(&ctx, "Rice", "Grains", &[50]).await?;

        buy(&ctx, &rice, 2).await?;

        let dashboard = ctx.stats.dashboard_at(Timestamp::now() + 24.hours()).await?;

        let totals: Vec<u64> = dashboard.daily_sales.iter().map(|day| day.total).collect();

        assert_eq!(dashboard.sales_today, 0);
        assert_eq!(dashboard.new_customers_today, 0);
        assert_eq!(dashboard.total_sales, 20_00);
        assert_eq!(totals, [0, 0, 0, 0, 0, 20_00, 0]);

        Ok(())
    }
}
