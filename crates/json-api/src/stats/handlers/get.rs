//! Sales Dashboard Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use salessense_app::domain::stats::records::{CategorySales, DailySales, SalesDashboard};

use crate::{extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DailySalesResponse {
    /// UTC date, `YYYY-MM-DD`
    pub day: String,
    pub total: u64,
}

impl From<DailySales> for DailySalesResponse {
    fn from(day: DailySales) -> Self {
        DailySalesResponse {
            day: day.day.to_string(),
            total: day.total,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategorySalesResponse {
    pub category: String,
    pub total: u64,
}

impl From<CategorySales> for CategorySalesResponse {
    fn from(category: CategorySales) -> Self {
        CategorySalesResponse {
            category: category.category,
            total: category.total,
        }
    }
}

/// Sales Dashboard Response
///
/// Money in minor units; "today" is the current UTC day.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatsResponse {
    pub total_customers: u64,
    pub new_customers_today: u64,
    pub total_sales: u64,
    pub sales_today: u64,
    pub total_products: u64,

    /// Variants with fewer than 10 units left
    pub low_stock_variants: u64,

    /// Last seven days, oldest first
    pub daily_sales: Vec<DailySalesResponse>,

    /// Best-selling categories, at most five
    pub top_categories: Vec<CategorySalesResponse>,
}

impl From<SalesDashboard> for StatsResponse {
    fn from(dashboard: SalesDashboard) -> Self {
        StatsResponse {
            total_customers: dashboard.total_customers,
            new_customers_today: dashboard.new_customers_today,
            total_sales: dashboard.total_sales,
            sales_today: dashboard.sales_today,
            total_products: dashboard.total_products,
            low_stock_variants: dashboard.low_stock_variants,
            daily_sales: dashboard.daily_sales.into_iter().map(Into::into).collect(),
            top_categories: dashboard.top_categories.into_iter().map(Into::into).collect(),
        }
    }
}

/// Sales Dashboard Handler
#[endpoint(
    tags("stats"),
    summary = "Sales Dashboard",
    security(("staff_token" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Dashboard figures"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid staff token"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<StatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let dashboard = state
        .app
        .stats
        .dashboard()
        .await
        .or_500("failed to compute sales dashboard")?;

    Ok(Json(dashboard.into()))
}
