//! REST API handlers for coupon operations
//!
//! Thin wrappers translating HTTP requests into [`CouponService`] calls.
//!
//! [`CouponService`]: super::service::CouponService

use super::{models::*, state::SharedState};
use crate::cart::{helpers::format_item_summary, Cart};
use crate::error::Result;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::debug;

/// Bodies as extracted; rejections become [`crate::error::CouponError`]
type CouponBody = std::result::Result<Json<CouponRequest>, JsonRejection>;
type CartBody = std::result::Result<Json<Cart>, JsonRejection>;

/// Creates routes for coupon-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/coupons", post(create_coupon).get(list_coupons))
        .route(
            "/coupons/:id",
            get(get_coupon).put(update_coupon).delete(delete_coupon),
        )
        .route("/coupons/:id/applicable", post(check_applicable))
        .route("/coupons/:id/applicable/bxgy", post(check_applicable_bxgy))
        .route("/coupons/applicable-coupons", post(applicable_coupons))
        .route("/coupons/apply-coupon/:id", post(apply_coupon))
}

/// Endpoint: POST /coupons
async fn create_coupon(
    State(state): State<SharedState>,
    payload: CouponBody,
) -> Result<Json<Coupon>> {
    let Json(payload) = payload?;
    state.coupons.create_coupon(payload).map(Json)
}

/// Endpoint: GET /coupons
async fn list_coupons(State(state): State<SharedState>) -> Json<Vec<Coupon>> {
    Json(state.coupons.list_coupons())
}

/// Endpoint: GET /coupons/:id
async fn get_coupon(State(state): State<SharedState>, Path(id): Path<i64>) -> Result<Json<Coupon>> {
    state.coupons.get_coupon(id).map(Json)
}

/// Endpoint: PUT /coupons/:id
/// Full replace of code, type, rules and active flag.
async fn update_coupon(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    payload: CouponBody,
) -> Result<Json<Coupon>> {
    let Json(payload) = payload?;
    state.coupons.update_coupon(id, payload).map(Json)
}

/// Endpoint: DELETE /coupons/:id
async fn delete_coupon(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    state.coupons.delete_coupon(id)?;

    Ok(Json(DeleteResponse {
        message: format!("Coupon deleted successfully with ID: {}", id),
    }))
}

/// Endpoint: POST /coupons/:id/applicable
async fn check_applicable(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    cart: CartBody,
) -> Result<Json<ApplicableResponse>> {
    let Json(cart) = cart?;
    let applicable = state.coupons.is_applicable(id, &cart)?;
    Ok(Json(ApplicableResponse { applicable }))
}

/// Endpoint: POST /coupons/:id/applicable/bxgy
async fn check_applicable_bxgy(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    cart: CartBody,
) -> Result<Json<ApplicableResponse>> {
    let Json(cart) = cart?;
    let applicable = state.coupons.is_applicable_bxgy(id, &cart)?;
    Ok(Json(ApplicableResponse { applicable }))
}

/// Endpoint: POST /coupons/applicable-coupons
/// Every coupon that would take something off this cart.
async fn applicable_coupons(
    State(state): State<SharedState>,
    cart: CartBody,
) -> Result<Json<Vec<EvaluationResult>>> {
    let Json(cart) = cart?;
    debug!(cart = %format_item_summary(&cart.items), "Scanning coupons");
    state.coupons.list_applicable(&cart).map(Json)
}

/// Endpoint: POST /coupons/apply-coupon/:id
async fn apply_coupon(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    cart: CartBody,
) -> Result<Json<EvaluationResult>> {
    let Json(cart) = cart?;
    debug!(coupon_id = id, cart = %format_item_summary(&cart.items), "Applying coupon");
    state.coupons.apply(id, &cart).map(Json)
}
