//! Checkout Models

use crate::domain::purchases::records::PurchaseRecord;

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    /// Committed purchases in cart order.
    pub purchases: Vec<PurchaseRecord>,

    /// Amount charged across all purchases.
    pub total: u64,
}
