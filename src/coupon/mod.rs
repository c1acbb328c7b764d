//! Coupon Domain Module
//!
//! This module contains all coupon business logic, including:
//! - Domain models (Coupon, CouponKind, requests, evaluation results)
//! - Rule payload decoding and the per-kind discount strategies
//! - The coupon store and the evaluator service
//! - Application state management
//! - REST API handlers

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod rules;
pub mod service;
pub mod state;
pub mod store;
pub mod strategy;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use service::CouponService;
pub use state::{AppState, SharedState};
pub use store::{CouponStore, InMemoryCouponStore};
