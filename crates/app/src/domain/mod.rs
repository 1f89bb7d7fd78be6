//! SalesSense Domain Concerns

pub mod carts;
pub mod catalog;
pub mod checkout;
pub mod customers;
pub mod purchases;
pub mod sessions;
pub mod stats;
