//! Cart Money Helpers
//!
//! Prices travel as `f64` on the wire; every calculation goes through
//! `Decimal` so that sums and percentages stay exact.

use super::models::CartItem;
use rust_decimal::prelude::*;

/// Convert a wire value to `Decimal` for calculation.
///
/// Cart prices reach this point only after [`Cart::validate`] has bounded
/// them, so the conversion cannot fail for them.
///
/// [`Cart::validate`]: super::models::Cart::validate
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert a calculated amount back to the wire format
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// `price × quantity` for one cart line
pub fn line_total(item: &CartItem) -> Decimal {
    to_decimal(item.price) * Decimal::from(item.quantity)
}

/// Produces a compact one-line summary of cart lines for log output.
///
/// Example output: `"2x #101 @ 200, 1x #102 @ 150"`.
pub fn format_item_summary(items: &[CartItem]) -> String {
    items
        .iter()
        .map(|i| format!("{}x #{} @ {}", i.quantity, i.product_id, i.price))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_keep_short_decimals() {
        assert_eq!(to_decimal(0.1), Decimal::new(1, 1));
        assert_eq!(to_decimal(19.99), Decimal::new(1999, 2));
        assert_eq!(to_f64(Decimal::new(5000, 2)), 50.0);
        assert_eq!(to_f64(Decimal::new(3, 3)), 0.003);
    }

    #[test]
    fn test_line_total() {
        let item = CartItem {
            product_id: 1,
            price: 0.1,
            quantity: 3,
        };
        assert_eq!(line_total(&item), Decimal::new(3, 1));

        let item = CartItem {
            product_id: 1,
            price: 19.99,
            quantity: 0,
        };
        assert_eq!(line_total(&item), Decimal::ZERO);
    }

    #[test]
    fn test_format_item_summary() {
        let items = vec![
            CartItem {
                product_id: 101,
                price: 200.0,
                quantity: 2,
            },
            CartItem {
                product_id: 102,
                price: 150.5,
                quantity: 1,
            },
        ];
        assert_eq!(format_item_summary(&items), "2x #101 @ 200, 1x #102 @ 150.5");
        assert_eq!(format_item_summary(&[]), "");
    }
}
