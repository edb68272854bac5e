//! Read-through cache over a [`MarketParamsSource`].

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::{MarketParams, MarketParamsSource};
use crate::{Error, Result};

/// Concurrent read-through cache of per-token market parameters.
///
/// Entries are never invalidated. Concurrent misses for the same token may
/// both fetch; the last write wins.
pub struct MarketParamsCache {
    source: Arc<dyn MarketParamsSource>,
    /// token_id -> minimum tick size
    tick_sizes: RwLock<HashMap<String, String>>,
    /// token_id -> fee rate (bps)
    fee_rates: RwLock<HashMap<String, u64>>,
    /// token_id -> neg-risk flag
    neg_risk: RwLock<HashMap<String, bool>>,
}

impl MarketParamsCache {
    pub fn new(source: Arc<dyn MarketParamsSource>) -> Self {
        Self {
            source,
            tick_sizes: RwLock::new(HashMap::new()),
            fee_rates: RwLock::new(HashMap::new()),
            neg_risk: RwLock::new(HashMap::new()),
        }
    }

    /// Get the tick size for a token, fetching it on first use.
    pub async fn get_tick_size(&self, token_id: &str) -> Result<String> {
        let tick_size = read_through(&self.tick_sizes, token_id, || {
            self.source.fetch_tick_size(token_id)
        })
        .await
        .map_err(|e| Error::MissingTickSize {
            token_id: token_id.to_string(),
            source: Box::new(e),
        })?;

        debug!(token_id = token_id, tick_size = %tick_size, "Resolved tick size");
        Ok(tick_size)
    }

    /// Get the fee rate for a token, fetching it on first use.
    pub async fn get_fee_rate(&self, token_id: &str) -> Result<u64> {
        let fee_rate_bps = read_through(&self.fee_rates, token_id, || {
            self.source.fetch_fee_rate(token_id)
        })
        .await
        .map_err(|e| Error::MissingFeeRate {
            token_id: token_id.to_string(),
            source: Box::new(e),
        })?;

        debug!(token_id = token_id, fee_rate_bps, "Resolved fee rate");
        Ok(fee_rate_bps)
    }

    /// Get the neg-risk flag for a token, fetching it on first use.
    pub async fn get_neg_risk(&self, token_id: &str) -> Result<bool> {
        let neg_risk = read_through(&self.neg_risk, token_id, || {
            self.source.fetch_neg_risk(token_id)
        })
        .await
        .map_err(|e| Error::MissingNegRiskFlag {
            token_id: token_id.to_string(),
            source: Box::new(e),
        })?;

        debug!(token_id = token_id, neg_risk, "Resolved neg-risk flag");
        Ok(neg_risk)
    }

    /// Resolve all three parameters for a token.
    pub async fn get_params(&self, token_id: &str) -> Result<MarketParams> {
        Ok(MarketParams {
            tick_size: self.get_tick_size(token_id).await?,
            fee_rate_bps: self.get_fee_rate(token_id).await?,
            neg_risk: self.get_neg_risk(token_id).await?,
        })
    }

    /// Seed the cache with known parameters for a token.
    pub async fn insert(&self, token_id: &str, params: MarketParams) {
        self.tick_sizes
            .write()
            .await
            .insert(token_id.to_string(), params.tick_size);
        self.fee_rates
            .write()
            .await
            .insert(token_id.to_string(), params.fee_rate_bps);
        self.neg_risk
            .write()
            .await
            .insert(token_id.to_string(), params.neg_risk);
    }
}

/// Return the cached value, or fetch and insert it.
///
/// The read lock is released before fetching so a slow fetch never blocks
/// readers of other tokens.
async fn read_through<T, F, Fut>(
    map: &RwLock<HashMap<String, T>>,
    token_id: &str,
    fetch: F,
) -> Result<T>
where
    T: Clone,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if let Some(cached) = map.read().await.get(token_id) {
        return Ok(cached.clone());
    }

    let value = fetch().await?;

    map.write()
        .await
        .insert(token_id.to_string(), value.clone());

    Ok(value)
}

impl std::fmt::Debug for MarketParamsCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketParamsCache")
            .field("tick_sizes", &self.tick_sizes.try_read().map(|m| m.len()).ok())
            .field("fee_rates", &self.fee_rates.try_read().map(|m| m.len()).ok())
            .field("neg_risk", &self.neg_risk.try_read().map(|m| m.len()).ok())
            .finish()
    }
}
