//! Stats Records

use jiff::civil::Date;

/// Variants holding fewer units than this count as low on stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Days covered by [`SalesDashboard::daily_sales`], today included.
pub const DAILY_SALES_DAYS: u32 = 7;

/// Categories listed in [`SalesDashboard::top_categories`].
pub const TOP_CATEGORIES: u32 = 5;

/// Store-wide figures for the staff dashboard.
///
/// Days are UTC calendar days; money is in minor units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesDashboard {
    pub total_customers: u64,
    pub new_customers_today: u64,
    pub total_sales: u64,
    pub sales_today: u64,
    pub total_products: u64,
    pub low_stock_variants: u64,

    /// Oldest day first, one entry per day even when nothing sold.
    pub daily_sales: Vec<DailySales>,

    /// Highest grossing first.
    pub top_categories: Vec<CategorySales>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySales {
    /// UTC calendar day
    pub day: Date,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySales {
    pub category: String,
    pub total: u64,
}
