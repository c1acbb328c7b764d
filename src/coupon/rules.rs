//! Coupon Rule Payloads
//!
//! Each coupon stores its rules as loosely-typed JSON. This module decides the
//! shape once, turning the text into a [`DiscountRule`] or a [`RulesError`]
//! that callers can match on.
//!
//! Monetary fields are read straight into `Decimal`; a number `Decimal`
//! cannot hold makes the payload malformed rather than silently zero.

use super::models::{Coupon, CouponKind};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::num::NonZeroU32;

/// Rules of a cart-wise coupon: flat `discount` once the total reaches `minAmount`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartWiseRules {
    #[serde(with = "rust_decimal::serde::float")]
    pub min_amount: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
}

/// Rules of a product-wise coupon: `discountPercent` off one product's lines
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductWiseRules {
    #[serde(alias = "product_id")]
    pub product_id: i64,

    #[serde(alias = "discount", with = "rust_decimal::serde::float")]
    pub discount_percent: Decimal,
}

/// Rules of a buy-X-get-Y coupon on a single product
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BxGyRules {
    pub product_id: i64,
    pub buy_qty: NonZeroU32,
    pub get_qty: NonZeroU32,
}

impl BxGyRules {
    /// Units making up one complete buy+get bundle; never zero
    pub fn group_size(&self) -> u64 {
        u64::from(self.buy_qty.get()) + u64::from(self.get_qty.get())
    }
}

/// A coupon's rules, decoded according to its kind
#[derive(Debug, Clone, PartialEq)]
pub enum DiscountRule {
    CartWise(CartWiseRules),
    ProductWise(ProductWiseRules),
    BxGy(BxGyRules),
}

/// Why a coupon's rules could not be turned into a [`DiscountRule`]
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("unknown coupon type: {0}")]
    UnknownKind(String),

    #[error("malformed {kind} rules: {source}")]
    Malformed {
        kind: CouponKind,
        #[source]
        source: serde_json::Error,
    },
}

impl DiscountRule {
    /// Decodes `payload` as the rule shape belonging to `kind`.
    pub fn parse(kind: CouponKind, payload: &str) -> Result<Self, RulesError> {
        let malformed = |source: serde_json::Error| RulesError::Malformed { kind, source };

        match kind {
            CouponKind::CartWise => serde_json::from_str(payload)
                .map(DiscountRule::CartWise)
                .map_err(malformed),
            CouponKind::ProductWise => serde_json::from_str(payload)
                .map(DiscountRule::ProductWise)
                .map_err(malformed),
            CouponKind::BxGy => serde_json::from_str(payload)
                .map(DiscountRule::BxGy)
                .map_err(malformed),
        }
    }

    /// Decodes a stored coupon's rules according to its declared kind.
    pub fn from_coupon(coupon: &Coupon) -> Result<Self, RulesError> {
        let kind = coupon
            .known_kind()
            .ok_or_else(|| RulesError::UnknownKind(coupon.kind.clone()))?;
        Self::parse(kind, &coupon.rules)
    }

    pub fn kind(&self) -> CouponKind {
        match self {
            DiscountRule::CartWise(_) => CouponKind::CartWise,
            DiscountRule::ProductWise(_) => CouponKind::ProductWise,
            DiscountRule::BxGy(_) => CouponKind::BxGy,
        }
    }
}
