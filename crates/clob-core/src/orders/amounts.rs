//! Tick rounding and fixed-point order amounts.
//!
//! All arithmetic is decimal. Amounts are integers at 6-decimal scale.

use alloy_primitives::U256;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::signing::OrderSide;
use crate::{Error, Result};

/// Decimal places of both collateral and conditional tokens.
pub const AMOUNT_DECIMALS: u32 = 6;

/// Round `price` to the nearest multiple of `tick_size`, ties away from zero.
#[allow(clippy::result_large_err)]
pub fn round_to_tick(price: Decimal, tick_size: Decimal) -> Result<Decimal> {
    if tick_size <= Decimal::ZERO {
        return Err(Error::InvalidTickSize(tick_size.to_string()));
    }

    let out_of_range = || Error::InvalidPrice(format!("{} cannot be rounded to tick {}", price, tick_size));

    let ticks = price
        .checked_div(tick_size)
        .ok_or_else(out_of_range)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let rounded = ticks.checked_mul(tick_size).ok_or_else(out_of_range)?;
    Ok(rounded.normalize())
}

/// Parse a tick size string as returned by the CLOB.
#[allow(clippy::result_large_err)]
pub fn parse_tick_size(tick_size: &str) -> Result<Decimal> {
    let parsed: Decimal = tick_size
        .trim()
        .parse()
        .map_err(|_| Error::InvalidTickSize(tick_size.to_string()))?;

    if parsed <= Decimal::ZERO || parsed >= Decimal::ONE {
        return Err(Error::InvalidTickSize(tick_size.to_string()));
    }
    Ok(parsed)
}

/// Compute maker and taker amounts for an order.
///
/// BUY pays collateral (price × size) for conditional tokens (size).
/// SELL is the reverse.
#[allow(clippy::result_large_err)]
pub fn calculate_amounts(side: OrderSide, price: Decimal, size: Decimal) -> Result<(U256, U256)> {
    let notional = price.checked_mul(size).ok_or_else(|| {
        Error::InvalidSize(format!("{} at price {} overflows the order notional", size, price))
    })?;
    let notional = to_base_units(notional)?;
    let shares = to_base_units(size)?;

    Ok(match side {
        OrderSide::Buy => (notional, shares),
        OrderSide::Sell => (shares, notional),
    })
}

/// Scale a decimal quantity to integer base units.
#[allow(clippy::result_large_err)]
fn to_base_units(value: Decimal) -> Result<U256> {
    let unrepresentable = || Error::InvalidSize(format!("{} cannot be expressed in base units", value));

    value
        .checked_mul(Decimal::from(10u64.pow(AMOUNT_DECIMALS)))
        .ok_or_else(unrepresentable)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u128()
        .map(U256::from)
        .ok_or_else(unrepresentable)
}
