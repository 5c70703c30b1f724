//! Authoritative evaluation endpoint
//!
//! Runs the same pure pipeline as client-side previews against the
//! campaign set loaded by the service.

use axum::extract::rejection::JsonRejection;
use axum::{Json, Router, extract::State, routing::post};
use shared::evaluation::{EvaluateRequest, EvaluateResponse};
use shared::models::CartSnapshot;
use shared::{AppError, AppResult, ErrorCode};

use crate::core::ServerState;
use crate::money::validate_cart;
use crate::pricing::evaluate;

pub fn router() -> Router<ServerState> {
    Router::new().route("/evaluate", post(evaluate_cart))
}

async fn evaluate_cart(
    State(state): State<ServerState>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> AppResult<Json<EvaluateResponse>> {
    let Json(request) = payload
        .map_err(|e| AppError::new(ErrorCode::InvalidRequest).with_detail("reason", e.body_text()))?;
    validate_cart(&request.cart)?;

    let cart = CartSnapshot::new(request.cart);
    let set = state.campaign_set();
    let ctx = state.evaluation_context();
    let result = evaluate(&cart, &set, &ctx);

    tracing::info!(
        lines = cart.len(),
        cart_total = %result.cart_total,
        points = result.points.total,
        applied = result.applied_promo_names.len(),
        "Authoritative evaluation"
    );

    Ok(Json(EvaluateResponse::from_result(&result, ctx.instant)))
}
