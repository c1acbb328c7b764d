//! Shopping Cart Domain Module
//!
//! This module contains the request-scoped cart value:
//! - Domain models (Cart, CartItem)
//! - Money helpers (decimal conversion, rounding, log summaries)

pub mod helpers;
pub mod models;

// Re-export commonly used types for convenience
pub use models::{Cart, CartItem};
