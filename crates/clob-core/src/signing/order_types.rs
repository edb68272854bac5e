//! Order types for Polymarket CLOB signing.
//!
//! Defines the canonical order payload used for EIP-712 signing and the
//! signed wire object submitted to the Polymarket CLOB API.

use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::SolValue;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::domain::{OrderSide, SignatureType};

/// Salts stay inside the IEEE 754 safe integer range because the API parses
/// them as JSON numbers.
const SALT_MASK: u64 = (1u64 << 53) - 1;

/// Canonical order payload, everything the exchange contract signs except the salt.
///
/// Amounts are integers at 6-decimal fixed point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderData {
    /// Maker address (the funder holding the assets).
    pub maker: Address,
    /// Signer address (the key that produces the signature).
    pub signer: Address,
    /// Taker address (zero for any taker).
    pub taker: Address,
    /// Token ID of the outcome being traded.
    pub token_id: U256,
    /// Maker amount in base units.
    pub maker_amount: U256,
    /// Taker amount in base units.
    pub taker_amount: U256,
    /// Order expiration timestamp (unix seconds, zero for none).
    pub expiration: U256,
    /// Exchange nonce for order management.
    pub nonce: U256,
    /// Fee rate in basis points.
    pub fee_rate_bps: U256,
    pub side: OrderSide,
    pub signature_type: SignatureType,
}

impl OrderData {
    /// Compute the EIP-712 struct hash for this order with the given salt.
    pub fn struct_hash(&self, salt: U256) -> B256 {
        let order_type_hash = keccak256(
            b"Order(uint256 salt,address maker,address signer,address taker,uint256 tokenId,uint256 makerAmount,uint256 takerAmount,uint256 expiration,uint256 nonce,uint256 feeRateBps,uint8 side,uint8 signatureType)",
        );

        // EIP-712 encodeData: all values must be padded to 32 bytes.
        // Addresses are left-padded from 20 bytes to 32 bytes.
        let maker_padded = B256::left_padding_from(self.maker.as_slice());
        let signer_padded = B256::left_padding_from(self.signer.as_slice());
        let taker_padded = B256::left_padding_from(self.taker.as_slice());

        let encoded = (
            order_type_hash,
            salt,
            maker_padded,
            signer_padded,
            taker_padded,
            self.token_id,
            self.maker_amount,
            self.taker_amount,
            self.expiration,
            self.nonce,
            self.fee_rate_bps,
            U256::from(self.side.as_u8()),
            U256::from(self.signature_type.as_u8()),
        )
            .abi_encode_packed();

        keccak256(&encoded)
    }
}

/// Generate a random salt for order uniqueness.
pub fn generate_salt() -> u64 {
    rand::rng().random::<u64>() & SALT_MASK
}

/// A signed order ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedOrder {
    /// Order salt (must be a JSON number).
    pub salt: u64,
    /// Maker address, checksummed.
    pub maker: String,
    /// Signer address, checksummed.
    pub signer: String,
    /// Taker address, checksummed.
    pub taker: String,
    #[serde(rename = "tokenId")]
    pub token_id: String,
    #[serde(rename = "makerAmount")]
    pub maker_amount: String,
    #[serde(rename = "takerAmount")]
    pub taker_amount: String,
    pub expiration: String,
    pub nonce: String,
    #[serde(rename = "feeRateBps")]
    pub fee_rate_bps: String,
    /// Side as a decimal string ("0" = buy, "1" = sell).
    pub side: String,
    #[serde(rename = "signatureType")]
    pub signature_type: u8,
    /// EIP-712 signature as lowercase hex with 0x prefix.
    pub signature: String,
}

impl SignedOrder {
    /// Create from order data, the salt it was signed with and the signature.
    pub fn from_order_data(order: &OrderData, salt: u64, signature: String) -> Self {
        Self {
            salt,
            maker: order.maker.to_checksum(None),
            signer: order.signer.to_checksum(None),
            taker: order.taker.to_checksum(None),
            token_id: order.token_id.to_string(),
            maker_amount: order.maker_amount.to_string(),
            taker_amount: order.taker_amount.to_string(),
            expiration: order.expiration.to_string(),
            nonce: order.nonce.to_string(),
            fee_rate_bps: order.fee_rate_bps.to_string(),
            side: order.side.as_u8().to_string(),
            signature_type: order.signature_type.as_u8(),
            signature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> OrderData {
        let maker = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
            .parse::<Address>()
            .unwrap();
        OrderData {
            maker,
            signer: maker,
            taker: Address::ZERO,
            token_id: U256::from(123u64),
            maker_amount: U256::from(2_500_000u64),
            taker_amount: U256::from(5_000_000u64),
            expiration: U256::ZERO,
            nonce: U256::ZERO,
            fee_rate_bps: U256::ZERO,
            side: OrderSide::Buy,
            signature_type: SignatureType::Eoa,
        }
    }

    #[test]
    fn test_struct_hash_depends_on_salt() {
        let order = sample_order();
        let a = order.struct_hash(U256::from(1u64));
        assert_eq!(a, order.struct_hash(U256::from(1u64)));
        assert_ne!(a, order.struct_hash(U256::from(2u64)));
    }

    #[test]
    fn test_struct_hash_depends_on_side() {
        let buy = sample_order();
        let mut sell = buy.clone();
        sell.side = OrderSide::Sell;
        assert_ne!(buy.struct_hash(U256::ZERO), sell.struct_hash(U256::ZERO));
    }

    #[test]
    fn test_salt_in_safe_range() {
        for _ in 0..100 {
            assert!(generate_salt() <= SALT_MASK);
        }
    }

    #[test]
    fn test_signed_order_wire_format() {
        let order = sample_order();
        let signed = SignedOrder::from_order_data(&order, 42, "0xabc".to_string());

        assert_eq!(signed.maker, "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        assert_eq!(signed.taker, "0x0000000000000000000000000000000000000000");
        assert_eq!(signed.side, "0");

        let json: serde_json::Value = serde_json::to_value(&signed).unwrap();
        assert_eq!(json["salt"], 42);
        assert_eq!(json["tokenId"], "123");
        assert_eq!(json["makerAmount"], "2500000");
        assert_eq!(json["takerAmount"], "5000000");
        assert_eq!(json["feeRateBps"], "0");
        assert_eq!(json["signatureType"], 0);
        assert_eq!(json["side"], "0");
    }
}
