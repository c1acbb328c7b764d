//! Coupon Service Library
//!
//! This library stores coupon definitions (cart-wise, product-wise and
//! buy-X-get-Y) and evaluates them against shopping carts.

// Domain modules
pub mod cart;
pub mod coupon;

// Infrastructure
pub mod config;
pub mod error;
pub mod logger;
pub mod router;
