//! Money and points arithmetic using rust_decimal
//!
//! Prices stay `Decimal` end to end. Points are rounded per line, then
//! converted to integers.

use rust_decimal::prelude::*;
use shared::models::{CartLine, PointsRounding};
use shared::{AppError, ErrorCode};

/// Maximum allowed price per line
const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
/// Maximum allowed quantity per line
const MAX_QUANTITY: u32 = 9999;

/// Rounding strategy for points: half-up or floor (values are non-negative)
#[inline]
fn strategy(rounding: PointsRounding) -> RoundingStrategy {
    match rounding {
        PointsRounding::Round => RoundingStrategy::MidpointAwayFromZero,
        PointsRounding::Floor => RoundingStrategy::ToZero,
    }
}

/// Round a raw accrual to whole points. Negative input yields 0.
pub fn round_points(raw: Decimal, rounding: PointsRounding) -> u64 {
    raw.max(Decimal::ZERO)
        .round_dp_with_strategy(0, strategy(rounding))
        .to_u64()
        .unwrap_or_default()
}

/// Validate a cart line before evaluation
pub fn validate_cart_line(line: &CartLine) -> Result<(), AppError> {
    if line.id.trim().is_empty() {
        return Err(AppError::cart_line(
            ErrorCode::InvalidLineId,
            &line.id,
            "line id must not be empty",
        ));
    }
    if line.price < Decimal::ZERO {
        return Err(AppError::cart_line(
            ErrorCode::InvalidPrice,
            &line.id,
            format!("price must be non-negative, got {}", line.price),
        ));
    }
    if line.price > MAX_PRICE {
        return Err(AppError::cart_line(
            ErrorCode::InvalidPrice,
            &line.id,
            format!("price exceeds maximum allowed ({}), got {}", MAX_PRICE, line.price),
        ));
    }
    if line.quantity == 0 {
        return Err(AppError::cart_line(
            ErrorCode::InvalidQuantity,
            &line.id,
            "quantity must be at least 1",
        ));
    }
    if line.quantity > MAX_QUANTITY {
        return Err(AppError::cart_line(
            ErrorCode::InvalidQuantity,
            &line.id,
            format!(
                "quantity exceeds maximum allowed ({}), got {}",
                MAX_QUANTITY, line.quantity
            ),
        ));
    }
    Ok(())
}

/// Validate every line of a cart, stopping at the first invalid one
pub fn validate_cart(lines: &[CartLine]) -> Result<(), AppError> {
    lines.iter().try_for_each(validate_cart_line)
}
