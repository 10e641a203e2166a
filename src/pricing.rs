//! Money arithmetic for orders.
//!
//! All amounts go through [`Decimal`] so that `price × quantity` never picks
//! up binary floating point drift. Results are rounded half away from zero
//! to two places, the way a till rounds.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Decimal places of every stored amount.
pub const MONEY_SCALE: u32 = 2;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PricingError {
    #[error("Total amount must be zero or positive")]
    Negative,
    #[error("Total amount is not a valid number")]
    Malformed,
}

/// Rounds to cents and pins the scale so `50` is stored as `50.00`.
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// `round(price × quantity, 2)`.
///
/// A product that would overflow the decimal range yields zero; the order
/// validation downstream still sees a well-formed amount.
pub fn calculate_total(price: Decimal, quantity: i64) -> Decimal {
    price
        .checked_mul(Decimal::from(quantity))
        .map(round_money)
        .unwrap_or_else(|| round_money(Decimal::ZERO))
}

/// Normalizes a client-supplied total.
///
/// Blank, malformed and negative input all come back as `None`, which tells
/// the caller to fall back to the computed total.
pub fn normalize_total(explicit: Option<&str>) -> Option<Decimal> {
    parse_explicit_total(explicit).ok().flatten()
}

/// Strict form of [`normalize_total`] that reports why a total was rejected.
pub fn parse_explicit_total(explicit: Option<&str>) -> Result<Option<Decimal>, PricingError> {
    let Some(raw) = explicit.filter(|s| !s.trim().is_empty()) else {
        return Ok(None);
    };
    let amount = parse_decimal(raw).ok_or(PricingError::Malformed)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PricingError::Negative);
    }
    Ok(Some(round_money(amount)))
}
