//! Cart Models

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::catalog::records::{ProductRecord, ProductUuid, VariantUuid};

/// Identifies one cart line by product and variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartKey {
    pub product_uuid: ProductUuid,
    pub variant_uuid: VariantUuid,
}

impl CartKey {
    #[must_use]
    pub const fn new(product_uuid: ProductUuid, variant_uuid: VariantUuid) -> Self {
        Self {
            product_uuid,
            variant_uuid,
        }
    }
}

impl fmt::Display for CartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.product_uuid, self.variant_uuid)
    }
}

/// Cart key could not be parsed from its `{product}_{variant}` form.
#[derive(Debug, Error)]
#[error("cart key must look like {{product_uuid}}_{{variant_uuid}}")]
pub struct InvalidCartKey;

impl FromStr for CartKey {
    type Err = InvalidCartKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (product, variant) = value.split_once('_').ok_or(InvalidCartKey)?;

        let product_uuid = Uuid::try_parse(product).map_err(|_source| InvalidCartKey)?;
        let variant_uuid = Uuid::try_parse(variant).map_err(|_source| InvalidCartKey)?;

        Ok(Self::new(
            ProductUuid::from_uuid(product_uuid),
            VariantUuid::from_uuid(variant_uuid),
        ))
    }
}

/// One line of a cart.
///
/// Name, label and price are captured when the line is first added and are
/// not refreshed from the catalog afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub key: CartKey,
    pub product_name: String,
    pub variant_label: String,
    pub unit_price: u64,
    pub quantity: u32,
}

impl CartLine {
    /// `unit_price × quantity`, or `None` on overflow.
    #[must_use]
    pub fn line_total(&self) -> Option<u64> {
        self.unit_price.checked_mul(u64::from(self.quantity))
    }
}

/// Cart total and number of distinct lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartSummary {
    pub total: u64,
    pub line_count: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("variant not found")]
    VariantNotFound,

    #[error("only {available} of {product_name} ({variant_label}) available, {requested} requested")]
    InsufficientStock {
        product_name: String,
        variant_label: String,
        requested: u32,
        available: u32,
    },

    #[error("cart total overflowed")]
    AmountOverflow,
}

/// A customer's in-progress order, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn line(&self, key: &CartKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.key == *key)
    }

    /// Add `quantity` units of a variant, checking the cumulative quantity
    /// against the variant's current stock.
    ///
    /// The cart is left untouched when an error is returned.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`] when `quantity` is zero.
    /// - [`CartError::VariantNotFound`] when the product has no such variant.
    /// - [`CartError::InsufficientStock`] when stock cannot cover the line.
    /// - [`CartError::AmountOverflow`] when the new total does not fit.
    pub fn add(
        &mut self,
        product: &ProductRecord,
        variant: VariantUuid,
        quantity: u32,
    ) -> Result<CartSummary, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let variant = product
            .variant(variant)
            .ok_or(CartError::VariantNotFound)?;

        let key = CartKey::new(product.uuid, variant.uuid);

        let existing = self.line(&key).map_or(0, |line| line.quantity);
        let unit_price = self.line(&key).map_or(variant.price, |line| line.unit_price);

        let requested = existing
            .checked_add(quantity)
            .ok_or(CartError::InvalidQuantity)?;

        if requested > variant.stock {
            return Err(CartError::InsufficientStock {
                product_name: product.name.clone(),
                variant_label: variant.label.clone(),
                requested,
                available: variant.stock,
            });
        }

        let added = unit_price
            .checked_mul(u64::from(quantity))
            .ok_or(CartError::AmountOverflow)?;

        let total = self
            .total()?
            .checked_add(added)
            .ok_or(CartError::AmountOverflow)?;

        match self.lines.iter_mut().find(|line| line.key == key) {
            Some(line) => line.quantity = requested,
            None => self.lines.push(CartLine {
                key,
                product_name: product.name.clone(),
                variant_label: variant.label.clone(),
                unit_price: variant.price,
                quantity,
            }),
        }

        Ok(CartSummary {
            total,
            line_count: self.lines.len(),
        })
    }

    /// Remove a line; returns whether anything was removed.
    pub fn remove(&mut self, key: &CartKey) -> bool {
        let before = self.lines.len();

        self.lines.retain(|line| line.key != *key);

        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of all line totals.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::AmountOverflow`] if the sum does not fit in `u64`.
    pub fn total(&self) -> Result<u64, CartError> {
        self.lines.iter().try_fold(0_u64, |acc, line| {
            line.line_total()
                .and_then(|line_total| acc.checked_add(line_total))
                .ok_or(CartError::AmountOverflow)
        })
    }

    /// # Errors
    ///
    /// Returns [`CartError::AmountOverflow`] if the total does not fit in `u64`.
    pub fn summary(&self) -> Result<CartSummary, CartError> {
        Ok(CartSummary {
            total: self.total()?,
            line_count: self.lines.len(),
        })
    }
}
