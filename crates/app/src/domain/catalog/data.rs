//! Catalog Data

use std::num::TryFromIntError;

use crate::domain::catalog::records::{ProductUuid, VariantUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub category: String,
    pub variants: Vec<NewVariant>,
}

/// New Variant Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVariant {
    pub uuid: VariantUuid,
    pub label: String,
    pub price: u64,
    pub stock: u32,
}

impl NewProduct {
    /// Whether the product carries everything needed to be listed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.category.trim().is_empty()
            && !self.variants.is_empty()
            && self
                .variants
                .iter()
                .all(|variant| !variant.label.trim().is_empty())
    }
}

impl NewVariant {
    /// Price must fit `BIGINT` and stock `INTEGER`.
    pub fn check_range(&self) -> Result<(), TryFromIntError> {
        i64::try_from(self.price)?;
        i32::try_from(self.stock)?;

        Ok(())
    }
}

impl NewProduct {
    /// Checks every variant with [`NewVariant::check_range`].
    pub fn check_ranges(&self) -> Result<(), TryFromIntError> {
        self.variants.iter().try_for_each(NewVariant::check_range)
    }
}
