//! Discount Strategies
//!
//! Every rule shape answers the same two questions about a cart: does the
//! coupon apply, and how much does it take off. [`DiscountRule`] forwards to
//! the variant it holds.

use super::rules::{BxGyRules, CartWiseRules, DiscountRule, ProductWiseRules};
use crate::cart::{
    helpers::{line_total, to_decimal},
    Cart,
};
use rust_decimal::Decimal;

/// Applicability and discount calculation for one kind of rule
pub trait DiscountStrategy {
    /// Whether the coupon's precondition holds for `cart`.
    fn is_applicable(&self, cart: &Cart) -> bool;

    /// Discount produced for `cart`.
    fn calculate_discount(&self, cart: &Cart) -> Decimal;
}

impl DiscountStrategy for CartWiseRules {
    fn is_applicable(&self, cart: &Cart) -> bool {
        cart.total() >= self.min_amount
    }

    /// Flat amount, independent of the cart size.
    fn calculate_discount(&self, cart: &Cart) -> Decimal {
        if self.is_applicable(cart) {
            self.discount
        } else {
            Decimal::ZERO
        }
    }
}

impl DiscountStrategy for ProductWiseRules {
    /// Any line of the product counts, whatever its quantity.
    fn is_applicable(&self, cart: &Cart) -> bool {
        cart.lines_for(self.product_id).next().is_some()
    }

    /// Percentage of every matching line's total, summed. Percentages above
    /// 100 are not capped; a result beyond `Decimal`'s range saturates.
    fn calculate_discount(&self, cart: &Cart) -> Decimal {
        cart.lines_for(self.product_id)
            .map(|item| {
                line_total(item).saturating_mul(self.discount_percent) / Decimal::ONE_HUNDRED
            })
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}

impl DiscountStrategy for BxGyRules {
    /// Needs a single line holding at least `buyQty` units. A cart can be
    /// applicable here and still earn no free units.
    fn is_applicable(&self, cart: &Cart) -> bool {
        let required = self.buy_qty.get();

        cart.lines_for(self.product_id)
            .any(|item| item.quantity >= required)
    }

    /// Only the first line of the product is counted.
    fn calculate_discount(&self, cart: &Cart) -> Decimal {
        let Some(item) = cart.lines_for(self.product_id).next() else {
            return Decimal::ZERO;
        };

        let cycles = u64::from(item.quantity) / self.group_size();
        let free_units = cycles * u64::from(self.get_qty.get());

        Decimal::from(free_units) * to_decimal(item.price)
    }
}

impl DiscountStrategy for DiscountRule {
    fn is_applicable(&self, cart: &Cart) -> bool {
        match self {
            DiscountRule::CartWise(rules) => rules.is_applicable(cart),
            DiscountRule::ProductWise(rules) => rules.is_applicable(cart),
            DiscountRule::BxGy(rules) => rules.is_applicable(cart),
        }
    }

    fn calculate_discount(&self, cart: &Cart) -> Decimal {
        match self {
            DiscountRule::CartWise(rules) => rules.calculate_discount(cart),
            DiscountRule::ProductWise(rules) => rules.calculate_discount(cart),
            DiscountRule::BxGy(rules) => rules.calculate_discount(cart),
        }
    }
}

/// Discount a rule grants on `cart`: zero unless the rule is applicable.
pub fn evaluate(rule: &impl DiscountStrategy, cart: &Cart) -> Decimal {
    if rule.is_applicable(cart) {
        rule.calculate_discount(cart)
    } else {
        Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartItem;
    use std::num::NonZeroU32;

    fn cart(items: &[(i64, f64, u32)]) -> Cart {
        Cart::new(
            items
                .iter()
                .map(|&(product_id, price, quantity)| CartItem {
                    product_id,
                    price,
                    quantity,
                })
                .collect(),
        )
    }

    fn bxgy(product_id: i64, buy: u32, get: u32) -> BxGyRules {
        BxGyRules {
            product_id,
            buy_qty: NonZeroU32::new(buy).unwrap(),
            get_qty: NonZeroU32::new(get).unwrap(),
        }
    }

    #[test]
    fn test_cart_wise_threshold() {
        let rules = CartWiseRules {
            min_amount: Decimal::from(300),
            discount: Decimal::from(50),
        };

        let above = cart(&[(101, 200.0, 2)]);
        assert!(rules.is_applicable(&above));
        assert_eq!(rules.calculate_discount(&above), Decimal::from(50));

        let boundary = cart(&[(101, 150.0, 2)]);
        assert!(rules.is_applicable(&boundary));

        let below = cart(&[(101, 100.0, 2)]);
        assert!(!rules.is_applicable(&below));
        assert_eq!(rules.calculate_discount(&below), Decimal::ZERO);
    }

    #[test]
    fn test_cart_wise_discount_is_not_capped_by_total() {
        let rules = CartWiseRules {
            min_amount: Decimal::from(0),
            discount: Decimal::from(1000),
        };
        let small = cart(&[(1, 5.0, 1)]);
        assert_eq!(rules.calculate_discount(&small), Decimal::from(1000));
    }

    #[test]
    fn test_product_wise_percentage() {
        let rules = ProductWiseRules {
            product_id: 101,
            discount_percent: Decimal::from(10),
        };
        let c = cart(&[(101, 100.0, 5), (102, 999.0, 1)]);

        assert!(rules.is_applicable(&c));
        assert_eq!(rules.calculate_discount(&c), Decimal::from(50));
    }

    #[test]
    fn test_product_wise_accumulates_repeated_lines() {
        let rules = ProductWiseRules {
            product_id: 7,
            discount_percent: Decimal::from(20),
        };
        let c = cart(&[(7, 50.0, 2), (8, 10.0, 1), (7, 25.0, 4)]);

        // (100 + 100) * 20%
        assert_eq!(rules.calculate_discount(&c), Decimal::from(40));
    }

    #[test]
    fn test_product_wise_zero_quantity_line_still_applies() {
        let rules = ProductWiseRules {
            product_id: 7,
            discount_percent: Decimal::from(20),
        };
        let c = cart(&[(7, 0.0, 0)]);

        assert!(rules.is_applicable(&c));
        assert_eq!(rules.calculate_discount(&c), Decimal::ZERO);
        assert!(!rules.is_applicable(&cart(&[(8, 10.0, 1)])));
    }

    #[test]
    fn test_product_wise_percent_above_hundred_is_unguarded() {
        let rules = ProductWiseRules {
            product_id: 1,
            discount_percent: Decimal::from(150),
        };
        let c = cart(&[(1, 100.0, 1)]);
        assert_eq!(rules.calculate_discount(&c), Decimal::from(150));
    }

    #[test]
    fn test_product_wise_keeps_sub_cent_discounts() {
        let rules = ProductWiseRules {
            product_id: 1,
            discount_percent: Decimal::ONE,
        };
        let c = cart(&[(1, 0.3, 1)]);
        assert_eq!(rules.calculate_discount(&c), Decimal::new(3, 3));
    }

    #[test]
    fn test_product_wise_huge_percent_saturates() {
        let rules = ProductWiseRules {
            product_id: 1,
            discount_percent: Decimal::MAX,
        };
        let c = cart(&[(1, 1_000.0, 5)]);
        assert_eq!(
            rules.calculate_discount(&c),
            Decimal::MAX / Decimal::ONE_HUNDRED
        );
    }

    #[test]
    fn test_bxgy_cycles() {
        let rules = bxgy(101, 2, 1);
        let c = cart(&[(101, 50.0, 6)]);

        assert!(rules.is_applicable(&c));
        // floor(6 / 3) = 2 cycles, 2 * 1 * 50
        assert_eq!(rules.calculate_discount(&c), Decimal::from(100));
    }

    #[test]
    fn test_bxgy_buy_three_get_one() {
        let rules = bxgy(101, 3, 1);

        let six = cart(&[(101, 100.0, 6)]);
        assert_eq!(rules.calculate_discount(&six), Decimal::from(100));

        let eight = cart(&[(101, 100.0, 8)]);
        assert_eq!(rules.calculate_discount(&eight), Decimal::from(200));
    }

    #[test]
    fn test_bxgy_applicable_with_zero_discount() {
        let rules = bxgy(101, 3, 1);
        let c = cart(&[(101, 100.0, 3)]);

        assert!(rules.is_applicable(&c));
        assert_eq!(rules.calculate_discount(&c), Decimal::ZERO);
        assert_eq!(evaluate(&rules, &c), Decimal::ZERO);
    }

    #[test]
    fn test_bxgy_counts_only_first_line() {
        let rules = bxgy(101, 1, 1);
        let c = cart(&[(101, 10.0, 1), (101, 10.0, 10)]);

        // The second line makes it applicable, but only the first is priced.
        assert!(rules.is_applicable(&c));
        assert_eq!(rules.calculate_discount(&c), Decimal::ZERO);
    }

    #[test]
    fn test_bxgy_missing_product() {
        let rules = bxgy(101, 1, 1);
        let c = cart(&[(102, 10.0, 10)]);

        assert!(!rules.is_applicable(&c));
        assert_eq!(rules.calculate_discount(&c), Decimal::ZERO);
    }

    #[test]
    fn test_evaluate_skips_inapplicable_rules() {
        let rule = DiscountRule::ProductWise(ProductWiseRules {
            product_id: 5,
            discount_percent: Decimal::from(10),
        });
        assert_eq!(evaluate(&rule, &cart(&[(6, 100.0, 1)])), Decimal::ZERO);
        assert_eq!(evaluate(&rule, &cart(&[(5, 100.0, 1)])), Decimal::from(10));
    }

    #[test]
    fn test_empty_cart() {
        let empty = Cart::default();
        let cart_wise = DiscountRule::CartWise(CartWiseRules {
            min_amount: Decimal::from(0),
            discount: Decimal::from(5),
        });

        // A zero threshold is met by an empty cart.
        assert!(cart_wise.is_applicable(&empty));
        assert!(!DiscountRule::BxGy(bxgy(1, 1, 1)).is_applicable(&empty));
    }
}
