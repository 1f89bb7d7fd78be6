//! Purchase Records

use jiff::Timestamp;

use crate::{
    domain::{
        catalog::records::{ProductUuid, VariantUuid},
        customers::records::CustomerUuid,
    },
    uuids::TypedUuid,
};

/// Purchase UUID
pub type PurchaseUuid = TypedUuid<PurchaseRecord>;

/// Purchase Record
///
/// One committed checkout line. Never updated after insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRecord {
    pub uuid: PurchaseUuid,
    pub customer_uuid: CustomerUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub variant_uuid: VariantUuid,
    pub variant_label: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub total: u64,
    pub payment_method: String,
    pub purchased_at: Timestamp,
}
