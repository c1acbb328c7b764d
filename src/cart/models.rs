//! Shopping Cart Domain Models
//!
//! The cart is a read-only value supplied with each evaluation request.

use super::helpers::line_total;
use crate::error::{CouponError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maximum allowed unit price
pub const MAX_PRICE: f64 = 1_000_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: u32 = 1_000_000;

/// One line of the cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product identifier; the same product may appear on several lines
    pub product_id: i64,

    /// Unit price
    pub price: f64,

    /// Number of units on this line
    pub quantity: u32,
}

/// The cart sent along with an evaluation request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Cart lines in the order the client sent them
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// Pre-discount total: Σ(price × quantity) over every line
    pub fn total(&self) -> Decimal {
        self.items.iter().map(line_total).sum()
    }

    /// Lines carrying the given product, in cart order
    pub fn lines_for(&self, product_id: i64) -> impl Iterator<Item = &CartItem> {
        self.items
            .iter()
            .filter(move |item| item.product_id == product_id)
    }

    /// Rejects prices that are negative, not finite or above [`MAX_PRICE`],
    /// and quantities above [`MAX_QUANTITY`]. Within these bounds no cart
    /// total can overflow `Decimal`.
    pub fn validate(&self) -> Result<()> {
        self.items.iter().try_for_each(CartItem::validate)
    }
}

impl CartItem {
    fn validate(&self) -> Result<()> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CouponError::Validation(format!(
                "price of product {} must be a non-negative number",
                self.product_id
            )));
        }
        if self.price > MAX_PRICE {
            return Err(CouponError::Validation(format!(
                "price of product {} exceeds maximum allowed ({}), got {}",
                self.product_id, MAX_PRICE, self.price
            )));
        }
        if self.quantity > MAX_QUANTITY {
            return Err(CouponError::Validation(format!(
                "quantity of product {} exceeds maximum allowed ({}), got {}",
                self.product_id, MAX_QUANTITY, self.quantity
            )));
        }
        Ok(())
    }
}
