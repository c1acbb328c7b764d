//! Coupon Service State
//!
//! Application state shared by every request handler.

use super::service::CouponService;
use super::store::{CouponStore, InMemoryCouponStore};
use std::sync::Arc;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state holding the coupon service
pub struct AppState {
    /// Evaluator and CRUD entry point, backed by the configured store
    pub coupons: CouponService,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates state backed by an empty in-memory store
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryCouponStore::new()))
    }

    /// Creates state around an existing store
    pub fn with_store(store: Arc<dyn CouponStore>) -> Self {
        Self {
            coupons: CouponService::new(store),
        }
    }
}
