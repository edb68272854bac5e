//! Request and order signing for Polymarket CLOB.
//!
//! Provides EIP-712 typed data signing for orders and L1 authentication
//! messages, plus HMAC signing for L2 requests.

use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::SolValue;
use auth::{ApiCredentials, TradingWallet};
use tracing::error;

use super::domain::{ClobAuthDomain, ContractConfig, Eip712Domain, ExchangeContract};
use super::headers::{L1AuthHeaders, L2AuthHeaders};
use super::l2::build_hmac_signature;
use super::order_types::{generate_salt, OrderData, SignedOrder};
use crate::{Error, Result};

/// Attestation phrase embedded in every ClobAuth message.
pub const CLOB_AUTH_MESSAGE: &str = "This message attests that I control the given wallet";

/// Signer for Polymarket CLOB requests and orders.
///
/// Owns the wallet key material. Holds no per-request state.
#[derive(Clone)]
pub struct OrderSigner {
    wallet: TradingWallet,
    chain_id: u64,
}

impl OrderSigner {
    /// Create a signer for the given chain.
    ///
    /// Fails if no exchange contracts are known for the chain.
    #[allow(clippy::result_large_err)]
    pub fn new(wallet: TradingWallet, chain_id: u64) -> Result<Self> {
        ContractConfig::for_chain(chain_id)?;
        Ok(Self { wallet, chain_id })
    }

    /// Get the signer's address.
    pub fn address(&self) -> Address {
        self.wallet.address()
    }

    /// Get the signer's address, checksummed.
    pub fn address_string(&self) -> String {
        self.wallet.address_string()
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Produce L1 headers by signing a ClobAuth message.
    ///
    /// ClobAuth(address address, string timestamp, uint256 nonce, string message)
    pub async fn sign_l1(&self, address: &str, timestamp: u64, nonce: u64) -> Result<L1AuthHeaders> {
        let address: Address = address
            .trim()
            .parse()
            .map_err(|_| Error::InvalidAddress(address.to_string()))?;

        let domain_separator = ClobAuthDomain::new(self.chain_id).separator();
        let struct_hash = clob_auth_struct_hash(address, timestamp, nonce);
        let digest = compute_typed_data_hash(domain_separator, struct_hash);

        let signature = self.sign_digest(&digest, "CLOB auth message").await?;

        Ok(L1AuthHeaders {
            address: address.to_checksum(None),
            signature,
            timestamp: timestamp.to_string(),
            nonce: nonce.to_string(),
        })
    }

    /// Produce L2 headers by HMAC-signing the request.
    #[allow(clippy::result_large_err)]
    pub fn sign_l2(
        &self,
        address: &str,
        method: &str,
        path: &str,
        body: Option<&str>,
        timestamp: u64,
        credentials: &ApiCredentials,
    ) -> Result<L2AuthHeaders> {
        let timestamp = timestamp.to_string();
        let signature =
            build_hmac_signature(&credentials.api_secret, &timestamp, method, path, body)?;

        Ok(L2AuthHeaders {
            address: address.to_string(),
            signature,
            timestamp,
            api_key: credentials.api_key.clone(),
            passphrase: credentials.api_passphrase.clone(),
        })
    }

    /// Sign an order against the chosen exchange contract.
    ///
    /// A fresh salt is drawn for every call, so identical payloads never
    /// produce identical signed orders.
    pub async fn sign_order(
        &self,
        order: &OrderData,
        chain_id: u64,
        contract: ExchangeContract,
    ) -> Result<SignedOrder> {
        self.sign_order_with_salt(order, chain_id, contract, generate_salt())
            .await
    }

    pub(crate) async fn sign_order_with_salt(
        &self,
        order: &OrderData,
        chain_id: u64,
        contract: ExchangeContract,
        salt: u64,
    ) -> Result<SignedOrder> {
        let domain = Eip712Domain::exchange(chain_id, contract)?;
        let struct_hash = order.struct_hash(U256::from(salt));
        let digest = compute_typed_data_hash(domain.separator(), struct_hash);

        let signature = self.sign_digest(&digest, "order").await?;

        Ok(SignedOrder::from_order_data(order, salt, signature))
    }

    async fn sign_digest(&self, digest: &B256, what: &str) -> Result<String> {
        self.wallet.sign_digest_hex(digest).await.map_err(|e| {
            error!(
                address = %self.address_string(),
                error = %e,
                "Failed to sign {}", what
            );
            Error::signing(format!("Failed to sign {}: {}", what, e))
        })
    }
}

/// Compute the EIP-712 typed data hash.
pub fn compute_typed_data_hash(domain_separator: B256, struct_hash: B256) -> B256 {
    let prefix = [0x19u8, 0x01u8];
    let data = (prefix, domain_separator, struct_hash).abi_encode_packed();
    keccak256(&data)
}

/// Compute the EIP-712 struct hash for ClobAuth.
pub fn clob_auth_struct_hash(address: Address, timestamp: u64, nonce: u64) -> B256 {
    let type_hash =
        keccak256(b"ClobAuth(address address,string timestamp,uint256 nonce,string message)");

    let timestamp_hash = keccak256(timestamp.to_string().as_bytes());
    let message_hash = keccak256(CLOB_AUTH_MESSAGE.as_bytes());

    let address_padded = B256::left_padding_from(address.as_slice());

    let encoded = (
        type_hash,
        address_padded,
        timestamp_hash,
        U256::from(nonce),
        message_hash,
    )
        .abi_encode_packed();

    keccak256(&encoded)
}

/// Current unix time in seconds.
pub fn current_timestamp() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}

impl std::fmt::Debug for OrderSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderSigner")
            .field("address", &self.address_string())
            .field("chain_id", &self.chain_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::domain::{OrderSide, SignatureType, POLYGON_AMOY_CHAIN_ID, POLYGON_CHAIN_ID};
    use alloy_primitives::Signature;

    // Test private key (DO NOT USE IN PRODUCTION)
    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    fn test_signer() -> OrderSigner {
        let wallet = TradingWallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        OrderSigner::new(wallet, POLYGON_CHAIN_ID).unwrap()
    }

    fn test_order(signer: &OrderSigner) -> OrderData {
        OrderData {
            maker: signer.address(),
            signer: signer.address(),
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

    fn recover(signature: &str, digest: B256) -> Address {
        let bytes = hex::decode(signature.trim_start_matches("0x")).unwrap();
        Signature::try_from(&bytes[..])
            .unwrap()
            .recover_address_from_prehash(&digest)
            .unwrap()
    }

    #[test]
    fn test_unsupported_chain() {
        let wallet = TradingWallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        assert!(OrderSigner::new(wallet, 1).is_err());
    }

    #[tokio::test]
    async fn test_sign_l1_recovers_to_wallet() {
        let signer = test_signer();
        let headers = signer
            .sign_l1(&TEST_ADDRESS.to_lowercase(), 1700000000, 0)
            .await
            .unwrap();

        assert_eq!(headers.address, TEST_ADDRESS);
        assert_eq!(headers.timestamp, "1700000000");
        assert_eq!(headers.nonce, "0");
        assert_eq!(headers.signature.len(), 132);
        let v = &headers.signature[130..];
        assert!(v == "1b" || v == "1c");

        let digest = compute_typed_data_hash(
            ClobAuthDomain::polygon().separator(),
            clob_auth_struct_hash(signer.address(), 1700000000, 0),
        );
        assert_eq!(recover(&headers.signature, digest), signer.address());
    }

    #[tokio::test]
    async fn test_sign_l1_invalid_address() {
        let signer = test_signer();
        let err = signer.sign_l1("0x1234", 1700000000, 0).await.unwrap_err();
        assert!(matches!(err, Error::InvalidAddress(_)));
    }

    #[tokio::test]
    async fn test_sign_l1_depends_on_nonce() {
        let signer = test_signer();
        let a = signer.sign_l1(TEST_ADDRESS, 1700000000, 0).await.unwrap();
        let b = signer.sign_l1(TEST_ADDRESS, 1700000000, 1).await.unwrap();
        assert_ne!(a.signature, b.signature);
    }

    #[tokio::test]
    async fn test_sign_l1_uses_configured_chain() {
        let wallet = TradingWallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let amoy = OrderSigner::new(wallet, POLYGON_AMOY_CHAIN_ID).unwrap();
        let a = test_signer().sign_l1(TEST_ADDRESS, 1, 0).await.unwrap();
        let b = amoy.sign_l1(TEST_ADDRESS, 1, 0).await.unwrap();
        assert_ne!(a.signature, b.signature);
    }

    #[test]
    fn test_sign_l2() {
        let signer = test_signer();
        let credentials = ApiCredentials::new("key", "c2VjcmV0LXNlY3JldC1zZWNyZXQ=", "pass");
        let headers = signer
            .sign_l2(TEST_ADDRESS, "POST", "/order", Some("{}"), 1700000000, &credentials)
            .unwrap();

        assert_eq!(headers.api_key, "key");
        assert_eq!(headers.passphrase, "pass");
        assert_eq!(headers.timestamp, "1700000000");
        assert_eq!(
            headers.signature,
            build_hmac_signature(
                &credentials.api_secret,
                "1700000000",
                "POST",
                "/order",
                Some("{}")
            )
            .unwrap()
        );
    }

    #[tokio::test]
    async fn test_sign_order_recovers_to_wallet() {
        let signer = test_signer();
        let order = test_order(&signer);

        let signed = signer
            .sign_order_with_salt(&order, POLYGON_CHAIN_ID, ExchangeContract::Standard, 999)
            .await
            .unwrap();

        assert_eq!(signed.salt, 999);
        assert_eq!(signed.signature.len(), 132);
        assert_eq!(signed.signature, signed.signature.to_lowercase());

        let domain = Eip712Domain::exchange(POLYGON_CHAIN_ID, ExchangeContract::Standard).unwrap();
        let digest = compute_typed_data_hash(domain.separator(), order.struct_hash(U256::from(999u64)));
        assert_eq!(recover(&signed.signature, digest), signer.address());
    }

    #[tokio::test]
    async fn test_fixed_salt_is_deterministic() {
        let signer = test_signer();
        let order = test_order(&signer);
        let a = signer
            .sign_order_with_salt(&order, POLYGON_CHAIN_ID, ExchangeContract::Standard, 7)
            .await
            .unwrap();
        let b = signer
            .sign_order_with_salt(&order, POLYGON_CHAIN_ID, ExchangeContract::Standard, 7)
            .await
            .unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_sign_order_fresh_salt() {
        let signer = test_signer();
        let order = test_order(&signer);

        let a = signer
            .sign_order(&order, POLYGON_CHAIN_ID, ExchangeContract::Standard)
            .await
            .unwrap();
        let b = signer
            .sign_order(&order, POLYGON_CHAIN_ID, ExchangeContract::Standard)
            .await
            .unwrap();

        assert_ne!(a.salt, b.salt);
        assert_ne!(a.signature, b.signature);
    }

    #[tokio::test]
    async fn test_contract_variant_changes_signature() {
        let signer = test_signer();
        let order = test_order(&signer);
        let standard = signer
            .sign_order_with_salt(&order, POLYGON_CHAIN_ID, ExchangeContract::Standard, 1)
            .await
            .unwrap();
        let neg_risk = signer
            .sign_order_with_salt(&order, POLYGON_CHAIN_ID, ExchangeContract::NegRisk, 1)
            .await
            .unwrap();
        assert_ne!(standard.signature, neg_risk.signature);
    }

    #[test]
    fn test_debug_does_not_expose_key() {
        let signer = test_signer();
        let debug_str = format!("{:?}", signer);

        assert!(debug_str.contains("OrderSigner"));
        assert!(debug_str.contains(TEST_ADDRESS));
        assert!(!debug_str.contains(TEST_PRIVATE_KEY));
    }
}
