//! Catalog Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Variant UUID
pub type VariantUuid = TypedUuid<VariantRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub category: String,
    pub variants: Vec<VariantRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl ProductRecord {
    /// Look up one of this product's variants by its stable identifier.
    #[must_use]
    pub fn variant(&self, uuid: VariantUuid) -> Option<&VariantRecord> {
        self.variants.iter().find(|variant| variant.uuid == uuid)
    }
}

/// Variant Record
///
/// A purchasable unit of a product (for example a pack size) with its own
/// price in minor units and its available stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRecord {
    pub uuid: VariantUuid,
    pub label: String,
    pub price: u64,
    pub stock: u32,
}
