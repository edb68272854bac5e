//! Trading wallet key material.
//!
//! Holds the secp256k1 signing key and the wallet address derived from it.
//! The address is computed once at load time and never changes afterwards.

use alloy_primitives::{Address, B256};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use anyhow::{Context, Result};
use std::str::FromStr;

/// Environment variable holding the hex-encoded private key.
pub const PRIVATE_KEY_ENV: &str = "POLY_PRIVATE_KEY";

/// A trading wallet with private key access for signing.
///
/// The wallet can be loaded from an environment variable or directly
/// from a hex-encoded private key.
#[derive(Clone)]
pub struct TradingWallet {
    signer: PrivateKeySigner,
    address: Address,
}

impl TradingWallet {
    /// Load wallet from the `POLY_PRIVATE_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set or
    /// if the private key format is invalid.
    pub fn from_env() -> Result<Self> {
        let private_key = std::env::var(PRIVATE_KEY_ENV)
            .with_context(|| format!("{PRIVATE_KEY_ENV} environment variable not set"))?;

        Self::from_private_key(&private_key)
    }

    /// Create a wallet from a hex-encoded private key.
    ///
    /// # Arguments
    ///
    /// * `key` - A 64-character hex string, optionally prefixed with "0x"
    ///
    /// # Errors
    ///
    /// Returns an error if the private key format is invalid.
    pub fn from_private_key(key: &str) -> Result<Self> {
        let key_clean = key.trim().trim_start_matches("0x");

        let signer = PrivateKeySigner::from_str(key_clean)
            .context("Invalid private key format - expected 64 hex characters")?;

        let address = signer.address();

        Ok(Self { signer, address })
    }

    /// Get the wallet's Ethereum address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Get the wallet address as an EIP-55 checksummed hex string.
    pub fn address_string(&self) -> String {
        self.address.to_checksum(None)
    }

    /// Sign a 32-byte digest and return the 65-byte `r || s || v` signature.
    ///
    /// `v` is always in the {27, 28} convention expected by the exchange.
    pub async fn sign_digest(&self, digest: &B256) -> Result<[u8; 65]> {
        let signature = self
            .signer
            .sign_hash(digest)
            .await
            .context("Failed to sign digest")?;

        let mut bytes = signature.as_bytes();
        if bytes[64] < 27 {
            bytes[64] += 27;
        }
        Ok(bytes)
    }

    /// Sign a digest and return the signature as a hex string with 0x prefix.
    pub async fn sign_digest_hex(&self, digest: &B256) -> Result<String> {
        let bytes = self.sign_digest(digest).await?;
        Ok(format!("0x{}", hex::encode(bytes)))
    }
}

impl std::fmt::Debug for TradingWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose the private key in debug output
        f.debug_struct("TradingWallet")
            .field("address", &self.address_string())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{keccak256, Signature};

    // Well-known Anvil test key (DO NOT USE IN PRODUCTION)
    const TEST_PRIVATE_KEY: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn test_from_private_key_with_prefix() {
        let wallet = TradingWallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        assert_eq!(wallet.address_string(), TEST_ADDRESS);
    }

    #[test]
    fn test_from_private_key_without_prefix() {
        let key_no_prefix = TEST_PRIVATE_KEY.trim_start_matches("0x");
        let wallet = TradingWallet::from_private_key(key_no_prefix).unwrap();
        assert_eq!(wallet.address_string(), TEST_ADDRESS);
    }

    #[test]
    fn test_address_is_stable() {
        let a = TradingWallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let b = TradingWallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        assert_eq!(a.address(), b.address());
    }

    #[test]
    fn test_invalid_private_key() {
        assert!(TradingWallet::from_private_key("not-a-valid-key").is_err());
        assert!(TradingWallet::from_private_key("0x1234").is_err());
    }

    #[test]
    fn test_debug_does_not_expose_key() {
        let wallet = TradingWallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let debug_str = format!("{:?}", wallet);

        assert!(debug_str.contains("TradingWallet"));
        assert!(debug_str.contains(TEST_ADDRESS));
        assert!(!debug_str.contains("ac0974bec39a17e36ba4a6b4d238ff944bacb478"));
    }

    #[tokio::test]
    async fn test_sign_digest_recovery_byte() {
        let wallet = TradingWallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let digest = keccak256(b"digest");

        let sig = wallet.sign_digest(&digest).await.unwrap();
        assert!(sig[64] == 27 || sig[64] == 28);

        let recovered = Signature::try_from(&sig[..])
            .unwrap()
            .recover_address_from_prehash(&digest)
            .unwrap();
        assert_eq!(recovered, wallet.address());
    }

    #[tokio::test]
    async fn test_sign_digest_hex() {
        let wallet = TradingWallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let sig_hex = wallet.sign_digest_hex(&keccak256(b"x")).await.unwrap();

        // 0x prefix + 130 hex chars (65 bytes)
        assert!(sig_hex.starts_with("0x"));
        assert_eq!(sig_hex.len(), 132);
        assert_eq!(sig_hex, sig_hex.to_lowercase());
    }
}
