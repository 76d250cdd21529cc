//! Cart line items and money totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identity of a cart line: a product in a specific color/size variant.
///
/// Two `add` calls with the same key merge into one line; everything else
/// appends a new line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CartKey {
    pub product_id: i64,
    pub variant_id: i64,
}

/// A single line in the cart.
///
/// `quantity` is always at least 1 while the item exists; dropping below 1
/// is only possible by removing the line explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: i64,
    pub variant_id: i64,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl CartItem {
    /// The `(product_id, variant_id)` uniqueness key for this line.
    #[must_use]
    pub fn key(&self) -> CartKey {
        CartKey {
            product_id: self.product_id,
            variant_id: self.variant_id,
        }
    }

    /// Line total: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Subtotal, tax, and grand total for a set of cart lines.
///
/// Derived on demand by consumers (checkout recap, cart drawer); never
/// stored alongside the items themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl CartTotals {
    /// Computes totals over `items` at the given tax rate.
    ///
    /// Each figure is rounded to 2 decimal places (currency cents), so
    /// `subtotal + tax == total` holds for the displayed values.
    #[must_use]
    pub fn compute(items: &[CartItem], tax_rate: Decimal) -> Self {
        let subtotal: Decimal = items.iter().map(CartItem::line_total).sum();
        let subtotal = subtotal.round_dp(2);
        let tax = (subtotal * tax_rate).round_dp(2);
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}
