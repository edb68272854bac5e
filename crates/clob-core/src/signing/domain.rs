//! EIP-712 domain separators for Polymarket CLOB.
//!
//! Polymarket uses EIP-712 typed data signing both for L1 authentication
//! (`ClobAuthDomain`, no verifying contract) and for orders (one domain per
//! exchange contract).

use alloy_primitives::{address, keccak256, Address, B256, U256};
use alloy_sol_types::SolValue;

use crate::{Error, Result};

/// Chain ID for Polygon mainnet.
pub const POLYGON_CHAIN_ID: u64 = 137;

/// Chain ID for Polygon Amoy testnet.
pub const POLYGON_AMOY_CHAIN_ID: u64 = 80002;

/// Domain name used by both exchange contracts.
pub const EXCHANGE_DOMAIN_NAME: &str = "Polymarket CTF Exchange";

/// Domain name for L1 authentication.
pub const CLOB_AUTH_DOMAIN_NAME: &str = "ClobAuthDomain";

/// Domain version shared by every Polymarket domain.
pub const DOMAIN_VERSION: &str = "1";

/// Which exchange contract an order settles against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeContract {
    /// Standard CTF Exchange.
    Standard,
    /// Neg Risk CTF Exchange, for markets with negative-risk structuring.
    NegRisk,
}

impl ExchangeContract {
    pub fn from_neg_risk(neg_risk: bool) -> Self {
        if neg_risk {
            ExchangeContract::NegRisk
        } else {
            ExchangeContract::Standard
        }
    }
}

/// Exchange contract addresses deployed on a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractConfig {
    pub exchange: Address,
    pub neg_risk_exchange: Address,
}

impl ContractConfig {
    /// Look up the deployment for a chain.
    #[allow(clippy::result_large_err)]
    pub fn for_chain(chain_id: u64) -> Result<Self> {
        match chain_id {
            POLYGON_CHAIN_ID => Ok(Self {
                exchange: address!("0x4bFb41d5B3570DeFd03C39a9A4D8dE6Bd8B8982E"),
                neg_risk_exchange: address!("0xC5d563A36AE78145C45a50134d48A1215220f80a"),
            }),
            POLYGON_AMOY_CHAIN_ID => Ok(Self {
                exchange: address!("0xdFE02Eb6733538f8Ea35D585af8DE5958AD99E40"),
                neg_risk_exchange: address!("0xC5d563A36AE78145C45a50134d48A1215220f80a"),
            }),
            other => Err(Error::config(format!(
                "No exchange contracts known for chain id {}",
                other
            ))),
        }
    }

    pub fn verifying_contract(&self, contract: ExchangeContract) -> Address {
        match contract {
            ExchangeContract::Standard => self.exchange,
            ExchangeContract::NegRisk => self.neg_risk_exchange,
        }
    }
}

/// EIP-712 domain separator for order signing.
#[derive(Debug, Clone)]
pub struct Eip712Domain {
    /// Domain name.
    pub name: String,
    /// Domain version.
    pub version: String,
    /// Chain ID.
    pub chain_id: U256,
    /// Verifying contract address.
    pub verifying_contract: Address,
}

impl Eip712Domain {
    /// Create the exchange domain for the given chain and contract variant.
    #[allow(clippy::result_large_err)]
    pub fn exchange(chain_id: u64, contract: ExchangeContract) -> Result<Self> {
        let contracts = ContractConfig::for_chain(chain_id)?;
        Ok(Self::custom(
            EXCHANGE_DOMAIN_NAME,
            DOMAIN_VERSION,
            chain_id,
            contracts.verifying_contract(contract),
        ))
    }

    /// Create domain with custom parameters.
    pub fn custom(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: u64,
        verifying_contract: Address,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id: U256::from(chain_id),
            verifying_contract,
        }
    }

    /// Compute the EIP-712 domain separator hash.
    pub fn separator(&self) -> B256 {
        let domain_type_hash = keccak256(
            b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)",
        );

        let name_hash = keccak256(self.name.as_bytes());
        let version_hash = keccak256(self.version.as_bytes());

        // encodeData pads the address to a full 32-byte word
        let contract_padded = B256::left_padding_from(self.verifying_contract.as_slice());

        let encoded = (
            domain_type_hash,
            name_hash,
            version_hash,
            self.chain_id,
            contract_padded,
        )
            .abi_encode_packed();

        keccak256(&encoded)
    }
}

/// EIP-712 domain separator for CLOB authentication (no verifyingContract).
#[derive(Debug, Clone)]
pub struct ClobAuthDomain {
    pub name: String,
    pub version: String,
    pub chain_id: U256,
}

impl ClobAuthDomain {
    pub fn new(chain_id: u64) -> Self {
        Self {
            name: CLOB_AUTH_DOMAIN_NAME.to_string(),
            version: DOMAIN_VERSION.to_string(),
            chain_id: U256::from(chain_id),
        }
    }

    /// Create the ClobAuthDomain for Polygon mainnet.
    pub fn polygon() -> Self {
        Self::new(POLYGON_CHAIN_ID)
    }

    /// Compute the EIP-712 domain separator hash.
    pub fn separator(&self) -> B256 {
        let domain_type_hash =
            keccak256(b"EIP712Domain(string name,string version,uint256 chainId)");

        let name_hash = keccak256(self.name.as_bytes());
        let version_hash = keccak256(self.version.as_bytes());

        let encoded =
            (domain_type_hash, name_hash, version_hash, self.chain_id).abi_encode_packed();

        keccak256(&encoded)
    }
}

/// Order side (buy/sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderSide {
    Buy = 0,
    Sell = 1,
}

impl OrderSide {
    /// Get the numeric value for signing.
    pub fn as_u8(&self) -> u8 {
        match self {
            OrderSide::Buy => 0,
            OrderSide::Sell => 1,
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

/// Signature scheme the maker wallet uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureType {
    /// Plain ECDSA signature from an externally owned account.
    #[default]
    Eoa = 0,
    /// EOA that owns a Polymarket proxy wallet (email / magic login).
    PolyProxy = 1,
    /// EOA that owns a Polymarket Gnosis safe (browser wallet login).
    PolyGnosisSafe = 2,
}

impl SignatureType {
    /// Get the numeric value for signing.
    pub fn as_u8(&self) -> u8 {
        match self {
            SignatureType::Eoa => 0,
            SignatureType::PolyProxy => 1,
            SignatureType::PolyGnosisSafe => 2,
        }
    }
}

impl TryFrom<u8> for SignatureType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(SignatureType::Eoa),
            1 => Ok(SignatureType::PolyProxy),
            2 => Ok(SignatureType::PolyGnosisSafe),
            other => Err(Error::config(format!(
                "Unknown signature type {} (expected 0, 1 or 2)",
                other
            ))),
        }
    }
}
