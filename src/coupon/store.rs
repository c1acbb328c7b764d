//! Coupon Store
//!
//! Persistence seam for coupon records. The evaluator only needs lookups and
//! a full scan; CRUD operations pass straight through.

use super::models::{Coupon, CouponRequest};
use crate::error::{CouponError, Result};
use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::atomic::{AtomicI64, Ordering};

/// Storage backend for coupons
pub trait CouponStore: Send + Sync {
    fn find_by_id(&self, id: i64) -> Option<Coupon>;

    /// Every coupon, in insertion order
    fn find_all(&self) -> Vec<Coupon>;

    fn find_by_code(&self, code: &str) -> Option<Coupon>;

    /// First save: assigns the identifier.
    fn insert(&self, request: CouponRequest) -> Result<Coupon>;

    /// Replaces the stored record carrying the same id.
    fn save(&self, coupon: Coupon) -> Result<Coupon>;

    fn delete(&self, coupon: &Coupon) -> Result<()>;
}

// =============================================================================
// In-memory Store
// =============================================================================

/// Process-local store.
/// DashMap allows concurrent access without external Mutexes.
pub struct InMemoryCouponStore {
    coupons: DashMap<i64, Coupon>,

    /// code -> id, the uniqueness index
    codes: DashMap<String, i64>,

    next_id: AtomicI64,
}

impl Default for InMemoryCouponStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCouponStore {
    pub fn new() -> Self {
        Self {
            coupons: DashMap::new(),
            codes: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Reserves `code` for `id`, failing if another coupon holds it.
    fn claim_code(&self, code: &str, id: i64) -> Result<()> {
        match self.codes.entry(code.to_string()) {
            Entry::Occupied(owner) if *owner.get() != id => {
                Err(CouponError::Conflict(code.to_string()))
            }
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(slot) => {
                slot.insert(id);
                Ok(())
            }
        }
    }

    fn release_code(&self, code: &str, id: i64) {
        self.codes.remove_if(code, |_, owner| *owner == id);
    }
}

impl CouponStore for InMemoryCouponStore {
    fn find_by_id(&self, id: i64) -> Option<Coupon> {
        self.coupons.get(&id).map(|c| c.value().clone())
    }

    fn find_all(&self) -> Vec<Coupon> {
        let mut all: Vec<Coupon> = self.coupons.iter().map(|c| c.value().clone()).collect();
        // ids are handed out in increasing order
        all.sort_by_key(|c| c.id);
        all
    }

    fn find_by_code(&self, code: &str) -> Option<Coupon> {
        let id = *self.codes.get(code)?;
        self.find_by_id(id)
    }

    fn insert(&self, request: CouponRequest) -> Result<Coupon> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.claim_code(&request.code, id)?;

        let coupon = Coupon {
            id,
            code: request.code,
            kind: request.kind,
            rules: request.rules,
            active: request.active,
        };
        self.coupons.insert(id, coupon.clone());

        Ok(coupon)
    }

    fn save(&self, coupon: Coupon) -> Result<Coupon> {
        let mut stored = self
            .coupons
            .get_mut(&coupon.id)
            .ok_or(CouponError::NotFound(coupon.id))?;

        if stored.code != coupon.code {
            self.claim_code(&coupon.code, coupon.id)?;
            self.release_code(&stored.code, coupon.id);
        }
        *stored = coupon.clone();

        Ok(coupon)
    }

    fn delete(&self, coupon: &Coupon) -> Result<()> {
        let (_, removed) = self
            .coupons
            .remove(&coupon.id)
            .ok_or(CouponError::NotFound(coupon.id))?;
        self.release_code(&removed.code, removed.id);

        Ok(())
    }
}
