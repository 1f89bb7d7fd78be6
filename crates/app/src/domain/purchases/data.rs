//! Purchase Data

use crate::domain::{
    catalog::records::{ProductUuid, VariantUuid},
    customers::records::CustomerUuid,
    purchases::records::PurchaseUuid,
};

/// A purchase line waiting to be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPurchase {
    pub uuid: PurchaseUuid,
    pub customer_uuid: CustomerUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub variant_uuid: VariantUuid,
    pub variant_label: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub payment_method: String,
}

impl NewPurchase {
    /// `unit_price × quantity`, or `None` on overflow.
    #[must_use]
    pub fn total(&self) -> Option<u64> {
        self.unit_price.checked_mul(u64::from(self.quantity))
    }

    /// The total, provided quantity, unit price and total all fit their
    /// storage columns (`INTEGER` and `BIGINT`).
    #[must_use]
    pub fn storable_total(&self) -> Option<u64> {
        let total = self.total()?;

        let fits = i32::try_from(self.quantity).is_ok()
            && i64::try_from(self.unit_price).is_ok()
            && i64::try_from(total).is_ok();

        fits.then_some(total)
    }
}
