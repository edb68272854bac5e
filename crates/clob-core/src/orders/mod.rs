//! Order construction: from a trade intent to a signed order.

pub mod amounts;
pub mod builder;

pub use amounts::{calculate_amounts, parse_tick_size, round_to_tick, AMOUNT_DECIMALS};
pub use builder::OrderBuilder;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::signing::OrderSide;
use crate::{Error, Result};

/// Order time-in-force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Good til cancelled.
    #[default]
    Gtc,
    /// Fill or kill.
    Fok,
    /// Good til date.
    Gtd,
    /// Fill and kill (partial fills allowed, remainder cancelled).
    Fak,
}

impl OrderType {
    /// Only GTD orders carry a non-zero expiration.
    pub fn expires(&self) -> bool {
        matches!(self, OrderType::Gtd)
    }
}

/// What the caller wants to trade, before any market parameters are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderIntent {
    /// Outcome token id as a decimal string.
    pub token_id: String,
    /// Limit price, strictly between 0 and 1.
    pub price: Decimal,
    pub side: OrderSide,
    /// Number of conditional tokens.
    pub size: Decimal,
}

impl OrderIntent {
    pub fn new(token_id: impl Into<String>, price: Decimal, side: OrderSide, size: Decimal) -> Self {
        Self {
            token_id: token_id.into(),
            price,
            side,
            size,
        }
    }

    /// Build an intent from floating point inputs.
    ///
    /// Non-finite values are rejected here, since they cannot be represented
    /// as decimals.
    #[allow(clippy::result_large_err)]
    pub fn try_from_f64(
        token_id: impl Into<String>,
        price: f64,
        side: OrderSide,
        size: f64,
    ) -> Result<Self> {
        let price =
            Decimal::from_f64(price).ok_or_else(|| Error::InvalidPrice(price.to_string()))?;
        let size = Decimal::from_f64(size).ok_or_else(|| Error::InvalidSize(size.to_string()))?;
        Ok(Self::new(token_id, price, side, size))
    }
}

/// Caller-supplied values that bypass the market parameter cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderOverrides {
    pub tick_size: Option<String>,
    pub neg_risk: Option<bool>,
}

impl OrderOverrides {
    pub fn tick_size(mut self, tick_size: impl Into<String>) -> Self {
        self.tick_size = Some(tick_size.into());
        self
    }

    pub fn neg_risk(mut self, neg_risk: bool) -> Self {
        self.neg_risk = Some(neg_risk);
        self
    }
}
