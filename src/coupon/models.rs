//! Coupon Domain Models
//!
//! This module contains the stored coupon record, the create/update input
//! and the response shapes produced by evaluation.

use super::helpers::deserialize_rules;
use crate::cart::helpers::to_f64;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Coupon Kind
// =============================================================================

/// The three coupon kinds the evaluator knows how to price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CouponKind {
    /// Flat discount once the cart total reaches a minimum
    CartWise,
    /// Percentage off every line of one product
    ProductWise,
    /// Buy X get Y free on one product
    BxGy,
}

impl CouponKind {
    /// Matches a stored type label, ignoring ASCII case.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "cartwise" => Some(CouponKind::CartWise),
            "productwise" => Some(CouponKind::ProductWise),
            "bxgy" => Some(CouponKind::BxGy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CouponKind::CartWise => "cartwise",
            CouponKind::ProductWise => "productwise",
            CouponKind::BxGy => "bxgy",
        }
    }
}

impl std::fmt::Display for CouponKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Stored Coupon
// =============================================================================

/// A coupon as persisted in the store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coupon {
    /// Store-assigned identifier
    pub id: i64,

    /// Unique human-readable code (e.g. "CART50")
    pub code: String,

    /// Declared type label as written by the client; may be unknown
    #[serde(rename = "type")]
    pub kind: String,

    /// Serialized JSON rules, shape depends on the kind
    pub rules: String,

    /// Stored and settable, never consulted during evaluation
    pub active: bool,
}

impl Coupon {
    /// The declared kind, if it is one the evaluator understands
    pub fn known_kind(&self) -> Option<CouponKind> {
        CouponKind::from_label(&self.kind)
    }
}

/// Input for creating or fully replacing a coupon
#[derive(Debug, Clone, Deserialize)]
pub struct CouponRequest {
    pub code: String,

    #[serde(rename = "type")]
    pub kind: String,

    /// Accepts a JSON string or an inline object; `details` is the legacy name
    #[serde(default, alias = "details", deserialize_with = "deserialize_rules")]
    pub rules: String,

    /// Only honoured on update; creation always stores an active coupon
    #[serde(default)]
    pub active: bool,
}

// =============================================================================
// Evaluation Responses
// =============================================================================

/// Outcome of evaluating one coupon against one cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub cart_total: f64,
    pub discount: f64,
    pub final_payable: f64,
    pub message: String,
}

impl EvaluationResult {
    /// Amounts are reported as computed; the payable amount saturates
    /// instead of overflowing for out-of-range discounts.
    pub fn new(cart_total: Decimal, discount: Decimal, message: impl Into<String>) -> Self {
        Self {
            cart_total: to_f64(cart_total),
            discount: to_f64(discount),
            final_payable: to_f64(cart_total.saturating_sub(discount)),
            message: message.into(),
        }
    }
}

/// Response for applicability checks
#[derive(Debug, Serialize)]
pub struct ApplicableResponse {
    pub applicable: bool,
}

/// Response for coupon deletion
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}
