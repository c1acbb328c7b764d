//! Coupon Evaluator
//!
//! Loads coupons from the store, decodes their rules by declared kind and
//! runs the matching strategy. Failure policy:
//!
//! * a missing coupon is always reported;
//! * an unknown kind is reported by [`CouponService::apply`], reads as "not
//!   applicable" in [`CouponService::is_applicable`] and is skipped by
//!   [`CouponService::list_applicable`];
//! * malformed rules never escape: the coupon simply does not apply.

use super::{
    models::{Coupon, CouponKind, CouponRequest, EvaluationResult},
    rules::{DiscountRule, RulesError},
    store::CouponStore,
    strategy::{evaluate, DiscountStrategy},
};
use crate::cart::Cart;
use crate::error::{CouponError, Result};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};

/// Entry point for coupon management and evaluation
#[derive(Clone)]
pub struct CouponService {
    store: Arc<dyn CouponStore>,
}

impl CouponService {
    pub fn new(store: Arc<dyn CouponStore>) -> Self {
        Self { store }
    }

    // =========================================================================
    // CRUD
    // =========================================================================

    /// Stores a new coupon. New coupons are always active.
    pub fn create_coupon(&self, request: CouponRequest) -> Result<Coupon> {
        let coupon = self.store.insert(CouponRequest {
            active: true,
            ..request
        })?;
        info!(coupon_id = coupon.id, code = %coupon.code, kind = %coupon.kind, "Coupon created");
        Ok(coupon)
    }

    pub fn list_coupons(&self) -> Vec<Coupon> {
        self.store.find_all()
    }

    pub fn get_coupon(&self, id: i64) -> Result<Coupon> {
        self.store.find_by_id(id).ok_or(CouponError::NotFound(id))
    }

    /// Replaces code, type, rules and the active flag; nothing is merged.
    pub fn update_coupon(&self, id: i64, request: CouponRequest) -> Result<Coupon> {
        let existing = self.get_coupon(id)?;

        let coupon = self.store.save(Coupon {
            id: existing.id,
            code: request.code,
            kind: request.kind,
            rules: request.rules,
            active: request.active,
        })?;
        info!(coupon_id = id, code = %coupon.code, "Coupon updated");
        Ok(coupon)
    }

    pub fn delete_coupon(&self, id: i64) -> Result<()> {
        let coupon = self.get_coupon(id)?;
        self.store.delete(&coupon)?;
        info!(coupon_id = id, code = %coupon.code, "Coupon deleted");
        Ok(())
    }

    // =========================================================================
    // Evaluation
    // =========================================================================

    /// Whether the coupon's precondition holds for `cart`. Unknown kinds and
    /// malformed rules answer `false`.
    pub fn is_applicable(&self, id: i64, cart: &Cart) -> Result<bool> {
        cart.validate()?;
        let coupon = self.get_coupon(id)?;

        Ok(match DiscountRule::from_coupon(&coupon) {
            Ok(rule) => rule.is_applicable(cart),
            Err(err) => {
                log_unusable(&coupon, &err);
                false
            }
        })
    }

    /// Reads the coupon's rules as buy-X-get-Y whatever its declared kind.
    pub fn is_applicable_bxgy(&self, id: i64, cart: &Cart) -> Result<bool> {
        cart.validate()?;
        let coupon = self.get_coupon(id)?;

        Ok(match DiscountRule::parse(CouponKind::BxGy, &coupon.rules) {
            Ok(rule) => rule.is_applicable(cart),
            Err(err) => {
                log_unusable(&coupon, &err);
                false
            }
        })
    }

    /// Prices a single coupon against `cart`.
    pub fn apply(&self, id: i64, cart: &Cart) -> Result<EvaluationResult> {
        cart.validate()?;
        let coupon = self.get_coupon(id)?;

        let discount = match DiscountRule::from_coupon(&coupon) {
            Ok(rule) => evaluate(&rule, cart),
            Err(RulesError::UnknownKind(kind)) => return Err(CouponError::UnknownKind(kind)),
            Err(err) => {
                log_unusable(&coupon, &err);
                Decimal::ZERO
            }
        };

        let message = if discount > Decimal::ZERO {
            format!("Applied {} coupon", coupon.kind)
        } else {
            "Coupon not applicable".to_string()
        };
        debug!(coupon_id = id, %discount, "Coupon evaluated");

        Ok(EvaluationResult::new(cart.total(), discount, message))
    }

    /// Evaluates every stored coupon independently and keeps those with a
    /// positive discount, in store order. The `active` flag is not consulted.
    pub fn list_applicable(&self, cart: &Cart) -> Result<Vec<EvaluationResult>> {
        cart.validate()?;
        let cart_total = cart.total();

        let results: Vec<EvaluationResult> = self
            .store
            .find_all()
            .into_iter()
            .filter_map(|coupon| {
                let rule = match DiscountRule::from_coupon(&coupon) {
                    Ok(rule) => rule,
                    Err(err) => {
                        log_unusable(&coupon, &err);
                        return None;
                    }
                };

                let discount = evaluate(&rule, cart);
                (discount > Decimal::ZERO).then(|| {
                    EvaluationResult::new(
                        cart_total,
                        discount,
                        format!("Applicable coupon: {}", coupon.code),
                    )
                })
            })
            .collect();

        debug!(count = results.len(), "Applicable coupons found");
        Ok(results)
    }
}

/// Coupons whose rules cannot be used are skipped quietly.
fn log_unusable(coupon: &Coupon, err: &RulesError) {
    debug!(coupon_id = coupon.id, code = %coupon.code, error = %err, "Coupon rules unusable");
}
