//! Cart Data

use crate::domain::catalog::records::{ProductUuid, VariantUuid};

/// A variant selection to add to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCartLine {
    pub product_uuid: ProductUuid,
    pub variant_uuid: VariantUuid,
    pub quantity: u32,
}
