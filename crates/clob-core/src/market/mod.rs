//! Market parameters needed to build an order.
//!
//! Tick size, fee rate and the neg-risk flag are fetched per token from the
//! CLOB and cached for the lifetime of the process.

pub mod cache;

pub use cache::MarketParamsCache;

use crate::Result;

/// Market parameters for a single token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketParams {
    /// Minimum price increment as a decimal string, e.g. "0.01".
    pub tick_size: String,
    /// Fee rate in basis points.
    pub fee_rate_bps: u64,
    /// Whether the market settles on the neg-risk exchange.
    pub neg_risk: bool,
}

/// Remote source of market parameters, keyed solely by token id.
///
/// Each parameter is fetched independently.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MarketParamsSource: Send + Sync {
    /// Fetch the minimum tick size for a token.
    async fn fetch_tick_size(&self, token_id: &str) -> Result<String>;

    /// Fetch the fee rate in basis points for a token.
    async fn fetch_fee_rate(&self, token_id: &str) -> Result<u64>;

    /// Fetch whether a token trades on the neg-risk exchange.
    async fn fetch_neg_risk(&self, token_id: &str) -> Result<bool>;
}
