//! Order builder: resolves market parameters, computes amounts and signs.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use rust_decimal::Decimal;
use tracing::info;

use super::amounts::{calculate_amounts, parse_tick_size, round_to_tick};
use super::{OrderIntent, OrderOverrides, OrderType};
use crate::market::MarketParamsCache;
use crate::signing::{
    current_timestamp, ExchangeContract, OrderData, OrderSigner, SignatureType, SignedOrder,
};
use crate::{Error, Result};

/// How long a GTD order stays live.
pub const GTD_EXPIRATION_SECS: u64 = 30 * 24 * 60 * 60;

/// Builds and signs orders for one wallet.
pub struct OrderBuilder {
    signer: OrderSigner,
    cache: Arc<MarketParamsCache>,
    /// Address holding the funds, if different from the signer.
    funder: Option<Address>,
    signature_type: SignatureType,
}

impl OrderBuilder {
    pub fn new(signer: OrderSigner, cache: Arc<MarketParamsCache>) -> Self {
        Self {
            signer,
            cache,
            funder: None,
            signature_type: SignatureType::Eoa,
        }
    }

    /// Set the funder (maker) address for proxy and safe wallets.
    pub fn with_funder(mut self, funder: Address) -> Self {
        self.funder = Some(funder);
        self
    }

    pub fn with_signature_type(mut self, signature_type: SignatureType) -> Self {
        self.signature_type = signature_type;
        self
    }

    pub fn signer(&self) -> &OrderSigner {
        &self.signer
    }

    pub fn cache(&self) -> &Arc<MarketParamsCache> {
        &self.cache
    }

    /// The maker address: the funder, or the signer itself.
    pub fn maker(&self) -> Address {
        self.funder.unwrap_or_else(|| self.signer.address())
    }

    /// Build and sign an order from a trade intent.
    ///
    /// Input is validated before any market parameter is resolved. A price
    /// that rounds to 0 or 1 at the resolved tick size is still rejected
    /// with [`Error::InvalidPrice`], after the tick size lookup.
    pub async fn build_and_sign(
        &self,
        intent: &OrderIntent,
        overrides: &OrderOverrides,
        order_type: OrderType,
    ) -> Result<SignedOrder> {
        validate_intent(intent)?;
        let token_id = parse_token_id(&intent.token_id)?;

        let tick_size = match &overrides.tick_size {
            Some(tick_size) => tick_size.clone(),
            None => self.cache.get_tick_size(&intent.token_id).await?,
        };
        let tick_size = parse_tick_size(&tick_size)?;

        let price = round_to_tick(intent.price, tick_size)?;
        if price <= Decimal::ZERO || price >= Decimal::ONE {
            return Err(Error::InvalidPrice(format!(
                "{} rounds to {} at tick size {}",
                intent.price, price, tick_size
            )));
        }

        let (maker_amount, taker_amount) = calculate_amounts(intent.side, price, intent.size)?;

        let expiration = if order_type.expires() {
            current_timestamp() + GTD_EXPIRATION_SECS
        } else {
            0
        };

        let fee_rate_bps = self.cache.get_fee_rate(&intent.token_id).await?;

        let neg_risk = match overrides.neg_risk {
            Some(neg_risk) => neg_risk,
            None => self.cache.get_neg_risk(&intent.token_id).await?,
        };

        let order = OrderData {
            maker: self.maker(),
            signer: self.signer.address(),
            taker: Address::ZERO,
            token_id,
            maker_amount,
            taker_amount,
            expiration: U256::from(expiration),
            nonce: U256::ZERO,
            fee_rate_bps: U256::from(fee_rate_bps),
            side: intent.side,
            signature_type: self.signature_type,
        };

        let signed = self
            .signer
            .sign_order(
                &order,
                self.signer.chain_id(),
                ExchangeContract::from_neg_risk(neg_risk),
            )
            .await?;

        info!(
            token_id = %intent.token_id,
            side = %intent.side,
            price = %price,
            size = %intent.size,
            maker_amount = %signed.maker_amount,
            taker_amount = %signed.taker_amount,
            fee_rate_bps,
            neg_risk,
            order_type = ?order_type,
            "Built signed order"
        );

        Ok(signed)
    }
}

#[allow(clippy::result_large_err)]
fn validate_intent(intent: &OrderIntent) -> Result<()> {
    if intent.price <= Decimal::ZERO || intent.price >= Decimal::ONE {
        return Err(Error::InvalidPrice(format!(
            "{} is outside (0, 1)",
            intent.price
        )));
    }
    if intent.size <= Decimal::ZERO {
        return Err(Error::InvalidSize(format!("{} must be positive", intent.size)));
    }
    Ok(())
}

#[allow(clippy::result_large_err)]
fn parse_token_id(token_id: &str) -> Result<U256> {
    let trimmed = token_id.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidTokenId(token_id.to_string()));
    }
    U256::from_str_radix(trimmed, 10).map_err(|_| Error::InvalidTokenId(token_id.to_string()))
}

impl std::fmt::Debug for OrderBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderBuilder")
            .field("signer", &self.signer)
            .field("funder", &self.funder)
            .field("signature_type", &self.signature_type)
            .finish()
    }
}
